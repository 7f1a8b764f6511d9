use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{
    astar_search::SearchContext,
    maze_grid::MazeGrid,
    solver::{Exploration, GridSolver},
    MOVE_COST, N_SMALLVEC_SIZE,
};

/// A* search with the Manhattan distance as heuristic, which is consistent on a 4-connected
/// unit-cost grid, so the returned paths are shortest paths.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Values above 1 turn this into weighted A*, which tends to expand
    /// fewer nodes but no longer guarantees a shortest path.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }

    fn successors(
        &self,
        grid: &MazeGrid,
        node: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        grid.open_neighbours(node)
            .into_iter()
            .map(|p| (p, MOVE_COST))
            .collect()
    }

    /// Just the Manhattan distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        ((p1.manhattan_distance(p2) * MOVE_COST) as f32 * self.heuristic_factor) as i32
    }
}

impl GridSolver for AstarSolver {
    fn explore(&self, grid: &MazeGrid, start: Point, goal: Point) -> Exploration {
        if !grid.point_in_bounds(&start) {
            return Exploration::default();
        }
        let mut ct: SearchContext<Point, i32> = SearchContext::new();
        let path = ct
            .astar(
                &start,
                |node| self.successors(grid, node),
                |point| self.heuristic(point, &goal),
                |point| *point == goal,
            )
            .map(|(v, _c)| v);
        Exploration {
            path,
            expanded: ct.expanded,
        }
    }
}
