//! Plain-text persistence of a [MazeGrid].
//!
//! The first line holds the width and the height, followed by one line per row with the
//! [Cell::code] of every cell separated by spaces:
//!
//! ```text
//! 5 3
//! 0 0 0 0 0
//! 0 2 1 3 0
//! 0 0 0 0 0
//! ```
//!
//! The start and end markers are not stored separately; on load they are taken from the cells
//! tagged [Cell::Start] and [Cell::End].
use std::fs;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::maze_grid::{Cell, GridError, MazeGrid};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing `<width> <height>` header")]
    MissingHeader,
    #[error("invalid header `{0}`, expected `<width> <height>`")]
    InvalidHeader(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} cells, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {column}: `{token}` is not a cell code")]
    InvalidToken {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("row {row}, column {column}: unknown cell code {code}")]
    UnknownCellCode { row: usize, column: usize, code: u8 },
}

pub fn encode(grid: &MazeGrid) -> String {
    let mut out = format!("{} {}\n", grid.width(), grid.height());
    for y in 0..grid.height() as i32 {
        let row = (0..grid.width() as i32)
            .map(|x| grid.get_cell(x, y).code())
            .join(" ");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// Parses a grid, checking the rows and columns against the header. Blank lines are skipped.
pub fn decode(text: &str) -> Result<MazeGrid, CodecError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let header = lines.next().ok_or(CodecError::MissingHeader)?;
    let (width, height) = parse_header(header)?;

    let mut cells = Vec::new();
    let mut rows = 0;
    for (row, line) in lines.enumerate() {
        let mut columns = 0;
        for (column, token) in line.split_whitespace().enumerate() {
            let code: u8 = token.parse().map_err(|_| CodecError::InvalidToken {
                row,
                column,
                token: token.to_owned(),
            })?;
            let cell = Cell::try_from(code).map_err(|code| CodecError::UnknownCellCode {
                row,
                column,
                code,
            })?;
            cells.push(cell);
            columns += 1;
        }
        if columns != width {
            return Err(CodecError::ColumnCount {
                row,
                expected: width,
                found: columns,
            });
        }
        rows += 1;
    }
    if rows != height {
        return Err(CodecError::RowCount {
            expected: height,
            found: rows,
        });
    }
    Ok(MazeGrid::from_cells(width, height, cells)?)
}

fn parse_header(header: &str) -> Result<(usize, usize), CodecError> {
    let invalid = || CodecError::InvalidHeader(header.to_owned());
    let (width, height) = header
        .split_whitespace()
        .collect_tuple::<(&str, &str)>()
        .ok_or_else(invalid)?;
    Ok((
        width.parse().map_err(|_| invalid())?,
        height.parse().map_err(|_| invalid())?,
    ))
}

pub fn save<P: AsRef<Path>>(grid: &MazeGrid, path: P) -> Result<(), CodecError> {
    fs::write(path, encode(grid))?;
    Ok(())
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<MazeGrid, CodecError> {
    let content = fs::read_to_string(path)?;
    decode(&content)
}

impl MazeGrid {
    /// Writes the grid to `path` in the text format of [codec](crate::codec).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CodecError> {
        save(self, path)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<MazeGrid, CodecError> {
        load(path)
    }
}

impl FromStr for MazeGrid {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::point::Point;

    const SMALL: &str = "5 3\n0 0 0 0 0\n0 2 1 3 0\n0 0 0 0 0\n";

    #[test]
    fn encodes_rows() {
        let mut grid = MazeGrid::new(5, 3).unwrap();
        grid.set_cell(2, 1, Cell::Path);
        grid.set_start(1, 1);
        grid.set_end(3, 1);
        assert_eq!(encode(&grid), SMALL);
    }

    #[test]
    fn decodes_markers_from_cells() {
        let grid: MazeGrid = SMALL.parse().unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert_eq!(grid.start(), Point::new(1, 1));
        assert_eq!(grid.end(), Point::new(3, 1));
        assert!(grid.reachable(&grid.start(), &grid.end()));
    }

    #[test]
    fn tolerates_blank_lines_and_trailing_spaces() {
        let text = "\n2 2 \n1 2 \n\n3 1\n\n";
        let grid = decode(text).unwrap();
        assert_eq!(grid.start(), Point::new(1, 0));
        assert_eq!(grid.end(), Point::new(0, 1));
    }

    #[test]
    fn round_trip_with_solution() {
        let mut grid = MazeGrid::from_cells(4, 2, vec![Cell::Path; 8]).unwrap();
        grid.set_start(0, 0);
        grid.set_end(3, 1);
        grid.set_cell(1, 1, Cell::Wall);
        grid.overlay_path(&[Point::new(1, 0), Point::new(2, 0)]);
        let decoded = decode(&encode(&grid)).unwrap();
        assert_eq!(decoded.to_string(), grid.to_string());
        assert_eq!(decoded.start(), grid.start());
        assert_eq!(decoded.end(), grid.end());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(decode(""), Err(CodecError::MissingHeader)));
        assert!(matches!(decode("3\n"), Err(CodecError::InvalidHeader(_))));
        assert!(matches!(decode("3 x\n"), Err(CodecError::InvalidHeader(_))));
        assert!(matches!(
            decode("1 1 1\n0\n"),
            Err(CodecError::InvalidHeader(_))
        ));
        assert!(matches!(
            decode("0 0\n"),
            Err(CodecError::Grid(GridError::InvalidDimensions { .. }))
        ));
        assert!(matches!(
            decode("2 2\n0 0\n"),
            Err(CodecError::RowCount {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            decode("2 2\n0 0\n0\n"),
            Err(CodecError::ColumnCount {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            decode("2 1\n0 a\n"),
            Err(CodecError::InvalidToken {
                row: 0,
                column: 1,
                ..
            })
        ));
        assert!(matches!(
            decode("2 1\n0 7\n"),
            Err(CodecError::UnknownCellCode {
                row: 0,
                column: 1,
                code: 7
            })
        ));
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join(format!("grid_maze_codec_{}.txt", std::process::id()));
        let grid: MazeGrid = SMALL.parse().unwrap();
        grid.save(&path).unwrap();
        let loaded = MazeGrid::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(encode(&loaded), SMALL);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("grid_maze_codec_does_not_exist.txt");
        assert!(matches!(load(path), Err(CodecError::Io(_))));
    }
}
