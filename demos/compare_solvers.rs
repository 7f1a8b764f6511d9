use grid_maze::{explore, generate, GeneratorStrategy, SolverStrategy};

// Generates one maze per strategy and reports for every solver the length of the path it found
// and how many nodes it expanded to find it. Breadth-first search and A* always agree on the
// length, depth-first search may return a longer path.

fn main() {
    env_logger::init();
    for generator in GeneratorStrategy::ALL {
        let maze = generate(61, 41, generator, Some(0)).unwrap();
        println!("{generator} ({} open cells)", maze.open_cell_count());
        for solver in SolverStrategy::ALL {
            let exploration = explore(&maze, solver);
            let length = exploration.path.map_or(0, |path| path.len());
            println!(
                "  {solver:>5}: length {length:>4}, expanded {:>5}",
                exploration.expanded
            );
        }
    }
}
