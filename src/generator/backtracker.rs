use grid_util::point::Point;
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

use crate::{
    generator::{carve_between, lattice_neighbours, MazeCarver},
    maze_grid::{Cell, MazeGrid},
    N_SMALLVEC_SIZE,
};

/// Randomized depth-first carving. Starting from (1, 1), keep walking into a random unvisited
/// room and backtrack along the stack when there is none. A room is opened before it is pushed,
/// so each room is pushed at most once.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecursiveBacktracker;

impl MazeCarver for RecursiveBacktracker {
    fn carve<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) {
        let seed = Point::new(1, 1);
        grid.set_point(&seed, Cell::Path);
        let mut stack = vec![seed];
        while let Some(&current) = stack.last() {
            let unvisited: SmallVec<[Point; N_SMALLVEC_SIZE]> = lattice_neighbours(grid, &current)
                .into_iter()
                .filter(|n| grid.get_point(n) == Cell::Wall)
                .collect();
            match unvisited.choose(rng) {
                Some(&next) => {
                    carve_between(grid, &current, &next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}
