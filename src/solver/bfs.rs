use std::collections::VecDeque;

use grid_util::point::Point;

use crate::{
    maze_grid::MazeGrid,
    solver::{Exploration, GridSolver, SearchTree},
};

/// Breadth-first search. Cells are dequeued in order of their distance from the start, so the
/// first time the goal comes up its parent chain is a shortest path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn explore(&self, grid: &MazeGrid, start: Point, goal: Point) -> Exploration {
        if !grid.point_in_bounds(&start) {
            return Exploration::default();
        }
        let mut tree = SearchTree::new(grid);
        let mut queue = VecDeque::new();
        tree.visit(start, None);
        queue.push_back(start);
        let mut expanded = 0;
        while let Some(node) = queue.pop_front() {
            expanded += 1;
            if node == goal {
                return Exploration {
                    path: Some(tree.path_to(node)),
                    expanded,
                };
            }
            for n in grid.open_neighbours(&node) {
                if tree.visit(n, Some(node)) {
                    queue.push_back(n);
                }
            }
        }
        Exploration {
            path: None,
            expanded,
        }
    }
}
