//! Maze generation on the odd lattice.
//!
//! Rooms sit at odd coordinates inside a one-cell border and the cells between two neighbouring
//! rooms are the walls that get knocked down. Every strategy connects each room exactly once, so
//! the carved cells always form a spanning tree.

use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use smallvec::SmallVec;

use crate::{
    maze_grid::{Cell, GridError, MazeGrid},
    UnknownStrategy, CARVE_STEP, NEIGHBOUR_OFFSETS, N_SMALLVEC_SIZE,
};

pub mod backtracker;
pub mod kruskal;
pub mod prim;

use backtracker::RecursiveBacktracker;
use kruskal::RandomizedKruskal;
use prim::RandomizedPrim;

pub trait MazeCarver {
    /// Carves passages into a grid that is all [Cell::Wall] and at least 3x3.
    fn carve<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeneratorStrategy {
    /// Randomized depth-first carving with an explicit stack.
    #[default]
    RecursiveBacktracker,
    /// Grows the maze from a random frontier cell at a time.
    Prim,
    /// Joins rooms along randomly ordered walls using a union-find.
    Kruskal,
}

impl GeneratorStrategy {
    pub const ALL: [GeneratorStrategy; 3] = [
        GeneratorStrategy::RecursiveBacktracker,
        GeneratorStrategy::Prim,
        GeneratorStrategy::Kruskal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorStrategy::RecursiveBacktracker => "backtracker",
            GeneratorStrategy::Prim => "prim",
            GeneratorStrategy::Kruskal => "kruskal",
        }
    }
}

impl fmt::Display for GeneratorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy {
                name: s.to_owned(),
                expected: "backtracker, prim, kruskal",
            })
    }
}

/// Maze generator owning its source of randomness, so a fixed seed reproduces the same mazes.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    pub fn from_rng(random: StdRng) -> Self {
        Self { random }
    }

    /// Generates a perfect maze with the start at (1, 1) and the end at (width - 2, height - 2).
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        strategy: GeneratorStrategy,
    ) -> Result<MazeGrid, GridError> {
        let mut grid = MazeGrid::new(width, height)?;
        if width < 3 || height < 3 {
            return Err(GridError::TooSmallToCarve { width, height });
        }
        match strategy {
            GeneratorStrategy::RecursiveBacktracker => {
                RecursiveBacktracker.carve(&mut grid, &mut self.random)
            }
            GeneratorStrategy::Prim => RandomizedPrim.carve(&mut grid, &mut self.random),
            GeneratorStrategy::Kruskal => RandomizedKruskal.carve(&mut grid, &mut self.random),
        }
        let end = Point::new(width as i32 - 2, height as i32 - 2);
        connect_to_lattice(&mut grid, &end);
        grid.set_start(1, 1);
        grid.set_end(end.x, end.y);
        debug!(
            "Carved {}x{} maze with {}: {} open cells",
            width,
            height,
            strategy,
            grid.open_cell_count()
        );
        Ok(grid)
    }
}

/// Whether `point` is inside the one-cell border that every maze keeps.
pub(crate) fn inside_margin(grid: &MazeGrid, point: &Point) -> bool {
    point.x > 0
        && point.y > 0
        && (point.x as usize) < grid.width() - 1
        && (point.y as usize) < grid.height() - 1
}

/// Rooms one lattice step away from `room`, in the fixed neighbour order.
pub(crate) fn lattice_neighbours(
    grid: &MazeGrid,
    room: &Point,
) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    NEIGHBOUR_OFFSETS
        .iter()
        .map(|(dx, dy)| Point::new(room.x + dx * CARVE_STEP, room.y + dy * CARVE_STEP))
        .filter(|p| inside_margin(grid, p))
        .collect()
}

/// Opens the wall between two neighbouring rooms and the room `to`.
pub(crate) fn carve_between(grid: &mut MazeGrid, from: &Point, to: &Point) {
    grid.set_cell((from.x + to.x) / 2, (from.y + to.y) / 2, Cell::Path);
    grid.set_point(to, Cell::Path);
}

/// On even-sized grids `point` lies off the lattice, in the solid border column or row. Carves a
/// straight spur from the nearest room to it; the spur only touches walls, so the maze stays a
/// tree.
fn connect_to_lattice(grid: &mut MazeGrid, point: &Point) {
    let to_lattice = |v: i32| if v % 2 == 1 { v } else { v - 1 };
    let mut current = Point::new(to_lattice(point.x), to_lattice(point.y));
    while current.x < point.x {
        current = Point::new(current.x + 1, current.y);
        grid.set_point(&current, Cell::Path);
    }
    while current.y < point.y {
        current = Point::new(current.x, current.y + 1);
        grid.set_point(&current, Cell::Path);
    }
}
