use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use log::{debug, info};

use crate::{maze_grid::MazeGrid, UnknownStrategy, MOVE_COST};

pub mod astar;
pub mod bfs;
pub mod dfs;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;

/// Result of a single search: the path if the goal was found and the number of nodes that were
/// expanded on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exploration {
    pub path: Option<Vec<Point>>,
    pub expanded: usize,
}

pub trait GridSolver {
    /// Searches from `start` to `goal` over the open cells of `grid`.
    fn explore(&self, grid: &MazeGrid, start: Point, goal: Point) -> Exploration;

    /// Computes a path from start to goal. Skips the search entirely when the connected
    /// components already show that the goal cannot be reached.
    fn get_path_single_goal(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
    ) -> Option<Vec<Point>> {
        if grid.is_open(&start) && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        debug!("{} is reachable from {}, computing path", goal, start);
        self.explore(grid, start, goal).path
    }

    /// Path from the grid's start to its end, empty if there is none.
    fn solve(&self, grid: &MazeGrid) -> Vec<Point> {
        self.get_path_single_goal(grid, grid.start(), grid.end())
            .unwrap_or_default()
    }

    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.len().saturating_sub(1) as i32 * MOVE_COST
    }
}

/// Available search algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SolverStrategy {
    /// Shortest path by edge count.
    #[default]
    BreadthFirst,
    /// Any path, found by exhausting one branch before the next.
    DepthFirst,
    /// Shortest path, guided by the Manhattan distance to the end.
    AStar,
}

impl SolverStrategy {
    pub const ALL: [SolverStrategy; 3] = [
        SolverStrategy::BreadthFirst,
        SolverStrategy::DepthFirst,
        SolverStrategy::AStar,
    ];

    /// Short name, as accepted by [FromStr].
    pub fn name(self) -> &'static str {
        match self {
            SolverStrategy::BreadthFirst => "bfs",
            SolverStrategy::DepthFirst => "dfs",
            SolverStrategy::AStar => "astar",
        }
    }
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy {
                name: s.to_owned(),
                expected: "bfs, dfs, astar",
            })
    }
}

/// Solves `grid` from its start to its end with the given strategy. An empty path means the end
/// cannot be reached.
pub fn solve(grid: &MazeGrid, strategy: SolverStrategy) -> Vec<Point> {
    match strategy {
        SolverStrategy::BreadthFirst => BfsSolver.solve(grid),
        SolverStrategy::DepthFirst => DfsSolver.solve(grid),
        SolverStrategy::AStar => AstarSolver::new().solve(grid),
    }
}

/// Like [solve], but always runs the search and reports how many nodes it expanded.
pub fn explore(grid: &MazeGrid, strategy: SolverStrategy) -> Exploration {
    let (start, end) = (grid.start(), grid.end());
    match strategy {
        SolverStrategy::BreadthFirst => BfsSolver.explore(grid, start, end),
        SolverStrategy::DepthFirst => DfsSolver.explore(grid, start, end),
        SolverStrategy::AStar => AstarSolver::new().explore(grid, start, end),
    }
}

/// Checks that `path` runs from the grid's start to its end over open cells in 4-adjacent steps.
pub fn path_is_valid(grid: &MazeGrid, path: &[Point]) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) => {
            *first == grid.start()
                && *last == grid.end()
                && path.iter().all(|p| grid.is_open(p))
                && path.windows(2).all(|w| w[0].manhattan_distance(&w[1]) == 1)
        }
        _ => false,
    }
}

/// Visited flags and parent links for every cell, used by the uninformed searches.
struct SearchTree {
    width: usize,
    visited: Vec<bool>,
    parents: Vec<Option<Point>>,
}

impl SearchTree {
    fn new(grid: &MazeGrid) -> SearchTree {
        let n = grid.width() * grid.height();
        SearchTree {
            width: grid.width(),
            visited: vec![false; n],
            parents: vec![None; n],
        }
    }

    fn ix(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    /// Marks an in-bounds point as visited. Returns false if it already was.
    fn visit(&mut self, point: Point, parent: Option<Point>) -> bool {
        let ix = self.ix(&point);
        if self.visited[ix] {
            return false;
        }
        self.visited[ix] = true;
        self.parents[ix] = parent;
        true
    }

    /// Follows the parent links from `goal` back to the root.
    fn path_to(&self, goal: Point) -> Vec<Point> {
        let mut path: Vec<Point> =
            std::iter::successors(Some(goal), |p| self.parents[self.ix(p)]).collect();
        path.reverse();
        path
    }
}
