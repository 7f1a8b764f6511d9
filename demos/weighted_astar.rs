use grid_maze::solver::astar::AstarSolver;
use grid_maze::{Cell, GridSolver, MazeGrid};

// The heuristic_factor can be set to scale the heuristic, causing nodes that are closer to the goal
// (ignoring walls) to be expanded sooner than in normal operation. This is called Weighted A* and
// it can reduce the number of expanded nodes at the cost of optimality.
//
// The grid is an open 30x30 room with a wall segment between the start and the end.

fn main() {
    env_logger::init();
    const N: i32 = 30;
    let size = N as usize;
    let cells = vec![Cell::Path; size * size];
    let mut grid = MazeGrid::from_cells(size, size, cells).unwrap();
    for x in 5..N - 5 {
        grid.set_cell(x, N / 2, Cell::Wall);
    }
    grid.set_start(N / 2, 2);
    grid.set_end(N / 2, N - 3);
    grid.update();

    for factor in [1.0, 1.3, 2.0] {
        let solver = AstarSolver::with_heuristic_factor(factor);
        let exploration = solver.explore(&grid, grid.start(), grid.end());
        let path = exploration.path.unwrap_or_default();
        println!(
            "heuristic_factor {factor}: cost {}, expanded {}",
            solver.get_path_cost(&path),
            exploration.expanded
        );
        if factor == 2.0 {
            println!("{}", grid.with_solution(&path));
        }
    }
}
