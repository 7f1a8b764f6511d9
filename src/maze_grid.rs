use core::fmt;
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{MAX_CELLS, NEIGHBOUR_OFFSETS, N_SMALLVEC_SIZE};

/// State of a single grid square. The numeric codes are the ones used by the text format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Path,
    Start,
    End,
    /// Transient marker placed by [MazeGrid::overlay_path].
    Solution,
}

impl Cell {
    pub const ALL: [Cell; 5] = [
        Cell::Wall,
        Cell::Path,
        Cell::Start,
        Cell::End,
        Cell::Solution,
    ];

    pub fn code(self) -> u8 {
        match self {
            Cell::Wall => 0,
            Cell::Path => 1,
            Cell::Start => 2,
            Cell::End => 3,
            Cell::Solution => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        Cell::ALL.get(code as usize).copied()
    }

    /// One-character representation used when rendering a grid.
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '█',
            Cell::Path => ' ',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Solution => '.',
        }
    }

    /// Everything but [Cell::Wall] can be walked on.
    pub fn is_open(self) -> bool {
        self != Cell::Wall
    }
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Cell::from_code(code).ok_or(code)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error(
        "invalid grid dimensions {width}x{height}: both must be positive with a bounded cell count"
    )]
    InvalidDimensions { width: usize, height: usize },
    #[error(
        "a {width}x{height} grid is too small to carve a maze into, both sides must be at least 3"
    )]
    TooSmallToCarve { width: usize, height: usize },
}

/// [MazeGrid] stores the [Cell] of every square in row-major order together with the start and
/// end markers. Like the cells, the markers are always inside the grid, but they are stored
/// separately so a grid loaded from text can derive them from its contents.
///
/// Open cells are tracked in a [UnionFind] so that connectivity questions can be answered
/// without searching. Opening a cell joins it with its open neighbours right away; closing one
/// may split a component, so the components are flagged as dirty and regenerated lazily.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl MazeGrid {
    /// Creates a grid filled with [Cell::Wall], with the start at (1, 1) and the end at
    /// (width - 2, height - 2). Both markers are clamped into bounds on grids narrower than 3.
    /// Grids with more than [MAX_CELLS] cells are rejected.
    pub fn new(width: usize, height: usize) -> Result<MazeGrid, GridError> {
        let too_many = width.checked_mul(height).map_or(true, |n| n > MAX_CELLS);
        if width == 0 || height == 0 || too_many {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(MazeGrid {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
            start: Point::new(1.min(width - 1) as i32, 1.min(height - 1) as i32),
            end: Point::new(
                width.saturating_sub(2) as i32,
                height.saturating_sub(2) as i32,
            ),
            components: UnionFind::new(width * height),
            components_dirty: false,
        })
    }

    /// Builds a grid from row-major cells. The start and end markers are taken from the last
    /// [Cell::Start] and [Cell::End] found; without a tag the default position of [MazeGrid::new]
    /// is kept.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
    ) -> Result<MazeGrid, GridError> {
        let mut grid = MazeGrid::new(width, height)?;
        if cells.len() != width * height {
            return Err(GridError::InvalidDimensions { width, height });
        }
        for (ix, cell) in cells.iter().enumerate() {
            let point = Point::new((ix % width) as i32, (ix / width) as i32);
            match cell {
                Cell::Start => grid.start = point,
                Cell::End => grid.end = point,
                _ => (),
            }
        }
        grid.cells = cells;
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn point_in_bounds(&self, point: &Point) -> bool {
        self.in_bounds(point.x, point.y)
    }

    fn get_ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        self.get_ix(point.x, point.y)
    }

    /// Out-of-bounds coordinates read as [Cell::Wall].
    pub fn get_cell(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) {
            self.cells[self.get_ix(x, y)]
        } else {
            Cell::Wall
        }
    }

    pub fn get_point(&self, point: &Point) -> Cell {
        self.get_cell(point.x, point.y)
    }

    pub fn is_open(&self, point: &Point) -> bool {
        self.get_point(point).is_open()
    }

    /// Updates a cell; out-of-bounds writes are ignored. Joins newly connected components and
    /// flags the components as dirty if an open cell is walled off.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.in_bounds(x, y) {
            return;
        }
        let ix = self.get_ix(x, y);
        let was_open = self.cells[ix].is_open();
        self.cells[ix] = cell;
        if was_open && !cell.is_open() {
            self.components_dirty = true;
        } else if !was_open && cell.is_open() {
            for n in self.open_neighbours(&Point::new(x, y)) {
                let n_ix = self.get_ix_point(&n);
                self.components.union(ix, n_ix);
            }
        }
    }

    pub fn set_point(&mut self, point: &Point, cell: Cell) {
        self.set_cell(point.x, point.y, cell)
    }

    /// Moves the start marker and tags its cell. The previous start cell goes back to
    /// [Cell::Path] if it still carries the tag.
    pub fn set_start(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let previous = self.start;
        self.start = Point::new(x, y);
        if previous != self.start && self.get_point(&previous) == Cell::Start {
            self.set_point(&previous, Cell::Path);
        }
        self.set_cell(x, y, Cell::Start);
    }

    /// Moves the end marker, see [MazeGrid::set_start].
    pub fn set_end(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let previous = self.end;
        self.end = Point::new(x, y);
        if previous != self.end && self.get_point(&previous) == Cell::End {
            self.set_point(&previous, Cell::Path);
        }
        self.set_cell(x, y, Cell::End);
    }

    /// Open 4-neighbours of `point` in the fixed search order: down, right, up, left.
    pub fn open_neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.is_open(p))
            .collect()
    }

    /// All cells with their coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(ix, c)| (Point::new((ix % width) as i32, (ix / width) as i32), *c))
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Number of adjacent pairs of open cells. A perfect maze has exactly one fewer than
    /// [MazeGrid::open_cell_count].
    pub fn count_open_edges(&self) -> usize {
        self.cells()
            .filter(|(_, c)| c.is_open())
            .map(|(p, _)| {
                [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)]
                    .iter()
                    .filter(|n| self.is_open(n))
                    .count()
            })
            .sum()
    }

    /// Marks the [Cell::Path] squares of `path` as [Cell::Solution]. Start and end tags stay.
    pub fn overlay_path(&mut self, path: &[Point]) {
        for p in path {
            if self.get_point(p) == Cell::Path {
                self.set_point(p, Cell::Solution);
            }
        }
    }

    /// Copy of the grid with `path` overlaid.
    pub fn with_solution(&self, path: &[Point]) -> MazeGrid {
        let mut grid = self.clone();
        grid.overlay_path(path);
        grid
    }

    pub fn clear_solution(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| **c == Cell::Solution) {
            *cell = Cell::Path;
        }
    }

    /// Retrieves the component id a given [Point] belongs to. While the components are dirty the
    /// id comes from a rebuilt structure and can change once [MazeGrid::update] runs.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        if !self.point_in_bounds(point) {
            return None;
        }
        let ix = self.get_ix_point(point);
        if self.components_dirty {
            Some(self.build_components().find(ix))
        } else {
            Some(self.components.find(ix))
        }
    }

    /// Checks if start and goal are on the same component. Walls are components of their own.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.point_in_bounds(start) && self.point_in_bounds(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            if self.components_dirty {
                !self.build_components().equiv(start_ix, goal_ix)
            } else {
                !self.components.equiv(start_ix, goal_ix)
            }
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} grid",
            self.width, self.height
        );
        self.components = self.build_components();
        self.components_dirty = false;
    }

    fn build_components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.width * self.height);
        for (point, cell) in self.cells() {
            if !cell.is_open() {
                continue;
            }
            let ix = self.get_ix_point(&point);
            for n in [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ] {
                if self.is_open(&n) {
                    components.union(ix, self.get_ix_point(&n));
                }
            }
        }
        components
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            MazeGrid::new(0, 4).unwrap_err(),
            GridError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert!(MazeGrid::new(4, 0).is_err());
        assert!(MazeGrid::new(1, 1).is_ok());
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let side = i32::MAX as usize;
        assert_eq!(
            MazeGrid::new(side, side).unwrap_err(),
            GridError::InvalidDimensions {
                width: side,
                height: side
            }
        );
        assert!(MazeGrid::new(usize::MAX, 2).is_err());
        assert!(MazeGrid::new(MAX_CELLS + 1, 1).is_err());
        assert!(MazeGrid::new(1 << 10, 1 << 10).is_ok());
    }

    #[test]
    fn default_markers() {
        let grid = MazeGrid::new(7, 5).unwrap();
        assert_eq!(grid.start(), Point::new(1, 1));
        assert_eq!(grid.end(), Point::new(5, 3));
        assert!(grid.cells().all(|(_, c)| c == Cell::Wall));

        // Markers stay in bounds on degenerate grids
        let tiny = MazeGrid::new(1, 2).unwrap();
        assert!(tiny.point_in_bounds(&tiny.start()));
        assert!(tiny.point_in_bounds(&tiny.end()));
    }

    #[test]
    fn out_of_bounds_access_is_clamped() {
        let mut grid = MazeGrid::new(3, 3).unwrap();
        grid.set_cell(1, 1, Cell::Path);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MAX, i32::MIN)] {
            assert_eq!(grid.get_cell(x, y), Cell::Wall);
            grid.set_cell(x, y, Cell::Path);
        }
        assert_eq!(grid.open_cell_count(), 1);
        grid.set_start(5, 5);
        grid.set_end(-1, 2);
        assert_eq!(grid.start(), Point::new(1, 1));
        assert_eq!(grid.end(), Point::new(1, 1));
    }

    #[test]
    fn moving_markers_clears_old_tag() {
        let mut grid = MazeGrid::new(5, 5).unwrap();
        grid.set_start(1, 1);
        grid.set_start(3, 1);
        assert_eq!(grid.get_cell(1, 1), Cell::Path);
        assert_eq!(grid.get_cell(3, 1), Cell::Start);
        assert_eq!(grid.start(), Point::new(3, 1));

        grid.set_end(3, 3);
        grid.set_end(1, 3);
        assert_eq!(grid.get_cell(3, 3), Cell::Path);
        assert_eq!(grid.get_cell(1, 3), Cell::End);
    }

    #[test]
    fn markers_are_derived_from_cells() {
        use Cell::*;
        let cells = vec![
            Start, Path, Wall, //
            Path, End, Start, //
        ];
        let grid = MazeGrid::from_cells(3, 2, cells).unwrap();
        assert_eq!(grid.start(), Point::new(2, 1));
        assert_eq!(grid.end(), Point::new(1, 1));
        assert!(MazeGrid::from_cells(3, 2, vec![Path; 5]).is_err());
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let mut grid = MazeGrid::from_cells(3, 2, vec![Cell::Path; 6]).unwrap();
        grid.set_cell(1, 0, Cell::Wall);
        grid.set_cell(1, 1, Cell::Wall);
        grid.update();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_eq!(grid.get_component(&p1), grid.get_component(&p3));
        assert_eq!(grid.get_component(&Point::new(3, 0)), None);
    }

    #[test]
    fn dirty_components_are_still_answered_correctly() {
        let mut grid = MazeGrid::from_cells(3, 1, vec![Cell::Path; 3]).unwrap();
        let left = Point::new(0, 0);
        let right = Point::new(2, 0);
        assert!(grid.reachable(&left, &right));
        grid.set_cell(1, 0, Cell::Wall);
        assert!(grid.unreachable(&left, &right));
        assert_ne!(grid.get_component(&left), grid.get_component(&right));
        grid.update();
        assert_ne!(grid.get_component(&left), grid.get_component(&right));
        // Reopening joins the components incrementally
        grid.set_cell(1, 0, Cell::Solution);
        assert!(grid.reachable(&left, &right));
    }

    #[test]
    fn overlay_keeps_markers() {
        let mut grid = MazeGrid::from_cells(4, 1, vec![Cell::Path; 4]).unwrap();
        grid.set_start(0, 0);
        grid.set_end(3, 0);
        let path: Vec<Point> = (0..4).map(|x| Point::new(x, 0)).collect();
        let solved = grid.with_solution(&path);
        assert_eq!(solved.to_string(), "S..E\n");
        assert_eq!(grid.to_string(), "S  E\n");

        let mut cleared = solved.clone();
        cleared.clear_solution();
        assert_eq!(cleared.to_string(), grid.to_string());
    }

    #[test]
    fn counts_open_edges() {
        // |# |
        // |  |
        let cells = vec![Cell::Wall, Cell::Path, Cell::Path, Cell::Path];
        let grid = MazeGrid::from_cells(2, 2, cells).unwrap();
        assert_eq!(grid.open_cell_count(), 3);
        assert_eq!(grid.count_open_edges(), 2);
        assert_eq!(
            grid.open_neighbours(&Point::new(1, 1)).as_slice(),
            &[Point::new(1, 0), Point::new(0, 1)]
        );
    }

    #[test]
    fn cell_codes() {
        for cell in Cell::ALL {
            assert_eq!(Cell::try_from(cell.code()), Ok(cell));
        }
        assert_eq!(Cell::try_from(5), Err(5));
        assert_eq!(Cell::Wall.glyph(), '█');
    }
}
