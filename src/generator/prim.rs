use grid_util::point::Point;
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

use crate::{
    generator::{carve_between, lattice_neighbours, MazeCarver},
    maze_grid::{Cell, MazeGrid},
    N_SMALLVEC_SIZE,
};

/// Frontier growth in the manner of Prim's algorithm with random weights: a random frontier room
/// is attached to a random room of the maze until the frontier runs dry.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomizedPrim;

impl MazeCarver for RandomizedPrim {
    fn carve<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) {
        let seed = Point::new(1, 1);
        grid.set_point(&seed, Cell::Path);
        let mut frontier: Vec<Point> = lattice_neighbours(grid, &seed).into_vec();
        while !frontier.is_empty() {
            let room = frontier.swap_remove(rng.gen_range(0..frontier.len()));
            // Rooms can be queued more than once
            if grid.get_point(&room) != Cell::Wall {
                continue;
            }
            let in_maze: SmallVec<[Point; N_SMALLVEC_SIZE]> = lattice_neighbours(grid, &room)
                .into_iter()
                .filter(|n| grid.is_open(n))
                .collect();
            if let Some(&from) = in_maze.choose(rng) {
                carve_between(grid, &from, &room);
            }
            frontier.extend(
                lattice_neighbours(grid, &room)
                    .into_iter()
                    .filter(|n| grid.get_point(n) == Cell::Wall),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn carves_all_rooms() {
        let mut grid = MazeGrid::new(11, 7).unwrap();
        RandomizedPrim.carve(&mut grid, &mut StdRng::seed_from_u64(9));
        // 5x3 rooms joined by 14 walls
        assert_eq!(grid.open_cell_count(), 15 + 14);
        assert_eq!(grid.count_open_edges(), 28);
    }
}
