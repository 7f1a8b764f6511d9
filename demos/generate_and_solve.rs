use grid_maze::{generate, solve, GeneratorStrategy, MazeGrid, SolverStrategy};

// In this example a maze is carved with the recursive backtracker, written to disk, read back
// and solved with breadth-first search. The solved maze is printed with
// - █ marking a wall
// - S marking the start
// - E marking the end
// - . marking the cells of the solution
//
// Set RUST_LOG=debug to see what the generator and the solver are doing.

fn main() {
    env_logger::init();
    let maze = generate(31, 15, GeneratorStrategy::RecursiveBacktracker, Some(42)).unwrap();
    println!("{}", maze);

    let path = std::env::temp_dir().join("grid_maze_demo.txt");
    maze.save(&path).unwrap();
    let loaded = MazeGrid::load(&path).unwrap();
    println!("Saved to and loaded from {}", path.display());

    let solution = solve(&loaded, SolverStrategy::BreadthFirst);
    println!("Solution with {} steps:", solution.len() - 1);
    println!("{}", loaded.with_solution(&solution));
}
