use grid_util::point::Point;

use crate::{
    maze_grid::MazeGrid,
    solver::{Exploration, GridSolver, SearchTree},
};

/// Depth-first search with an explicit stack. Finds a path whenever one exists, but not
/// necessarily the shortest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn explore(&self, grid: &MazeGrid, start: Point, goal: Point) -> Exploration {
        if !grid.point_in_bounds(&start) {
            return Exploration::default();
        }
        let mut tree = SearchTree::new(grid);
        let mut stack = vec![start];
        tree.visit(start, None);
        let mut expanded = 0;
        while let Some(node) = stack.pop() {
            expanded += 1;
            if node == goal {
                return Exploration {
                    path: Some(tree.path_to(node)),
                    expanded,
                };
            }
            for n in grid.open_neighbours(&node) {
                if tree.visit(n, Some(node)) {
                    stack.push(n);
                }
            }
        }
        Exploration {
            path: None,
            expanded,
        }
    }
}
