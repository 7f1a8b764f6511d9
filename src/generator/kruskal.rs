use grid_util::point::Point;
use itertools::iproduct;
use petgraph::unionfind::UnionFind;
use rand::{seq::SliceRandom, Rng};

use crate::{
    generator::{carve_between, inside_margin, MazeCarver},
    maze_grid::{Cell, MazeGrid},
    CARVE_STEP,
};

/// Kruskal's algorithm over randomly ordered walls: a wall is knocked down whenever the rooms on
/// both sides are not yet connected.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomizedKruskal;

impl MazeCarver for RandomizedKruskal {
    fn carve<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) {
        let columns = (grid.width() - 1) / 2;
        let rows = (grid.height() - 1) / 2;
        let room_ix = |p: &Point| (p.y as usize / 2) * columns + p.x as usize / 2;

        let rooms: Vec<Point> = iproduct!(0..rows, 0..columns)
            .map(|(r, c)| Point::new(2 * c as i32 + 1, 2 * r as i32 + 1))
            .collect();
        let mut walls: Vec<(Point, Point)> = Vec::with_capacity(2 * rooms.len());
        for room in &rooms {
            for n in [
                Point::new(room.x + CARVE_STEP, room.y),
                Point::new(room.x, room.y + CARVE_STEP),
            ] {
                if inside_margin(grid, &n) {
                    walls.push((*room, n));
                }
            }
        }
        walls.shuffle(rng);

        for room in &rooms {
            grid.set_point(room, Cell::Path);
        }
        let mut sets = UnionFind::new(rooms.len());
        for (a, b) in walls {
            if sets.union(room_ix(&a), room_ix(&b)) {
                carve_between(grid, &a, &b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn knocks_down_one_wall_less_than_rooms() {
        let mut grid = MazeGrid::new(9, 9).unwrap();
        RandomizedKruskal.carve(&mut grid, &mut StdRng::seed_from_u64(2));
        assert_eq!(grid.open_cell_count(), 16 + 15);
        assert_eq!(grid.count_open_edges(), 30);
    }
}
