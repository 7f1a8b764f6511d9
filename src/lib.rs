//! # grid_maze
//!
//! Generation and solving of rectangular grid mazes with 4-connected, unit-cost moves.
//!
//! Mazes are carved into a [MazeGrid] on the odd lattice (rooms at odd coordinates, walls in
//! between), which yields a [perfect maze](https://en.wikipedia.org/wiki/Maze_generation_algorithm):
//! the open cells form a spanning tree. Three carving strategies are available, the
//! [recursive backtracker](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search),
//! a randomized variant of [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm)
//! and a randomized variant of [Kruskal's algorithm](https://en.wikipedia.org/wiki/Kruskal%27s_algorithm).
//!
//! Solving is done by breadth-first search, depth-first search or
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the Manhattan distance. Connected
//! components of open cells are maintained on the grid to avoid flood-filling behaviour if no
//! path exists. Grids can be persisted in a plain-text format, see [codec].
//!
//! ```
//! use grid_maze::{generate, solve, GeneratorStrategy, SolverStrategy};
//!
//! let maze = generate(21, 11, GeneratorStrategy::RecursiveBacktracker, Some(7)).unwrap();
//! let path = solve(&maze, SolverStrategy::BreadthFirst);
//! assert_eq!(path.first(), Some(&maze.start()));
//! assert_eq!(path.last(), Some(&maze.end()));
//! println!("{}", maze.with_solution(&path));
//! ```
mod astar_search;

pub mod codec;
pub mod generator;
pub mod maze_grid;
pub mod solver;

pub use generator::{GeneratorStrategy, MazeGenerator};
pub use grid_util::point::Point;
pub use maze_grid::{Cell, GridError, MazeGrid};
pub use solver::{explore, path_is_valid, solve, Exploration, GridSolver, SolverStrategy};

/// Cost of a single orthogonal move.
pub const MOVE_COST: i32 = 1;
/// Distance between two neighbouring rooms of the odd lattice.
pub const CARVE_STEP: i32 = 2;
/// Upper bound on `width * height` accepted by [MazeGrid::new].
pub const MAX_CELLS: usize = 1 << 28;
/// Search order of the 4-neighbourhood: down, right, up, left.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const N_SMALLVEC_SIZE: usize = 4;

/// Generates a maze of the given size. With `seed` set, the result is reproducible.
pub fn generate(
    width: usize,
    height: usize,
    strategy: GeneratorStrategy,
    seed: Option<u64>,
) -> Result<MazeGrid, GridError> {
    MazeGenerator::new(seed).generate(width, height, strategy)
}

/// Returned when parsing a strategy name fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("unknown strategy `{name}`, expected one of: {expected}")]
pub struct UnknownStrategy {
    pub name: String,
    pub expected: &'static str,
}
