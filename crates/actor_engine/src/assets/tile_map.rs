//! Tile map grid data
//!
//! A tile map is stored as comma-separated rows of non-negative tile
//! indices, one row per line. Blank lines are ignored and cells may carry
//! surrounding whitespace. A cell that is not a non-negative integer fails
//! the whole load; the caller keeps whatever grid it had before.

use std::path::Path;
use thiserror::Error;

/// Row-major grid of tile indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    rows: Vec<Vec<u32>>,
}

impl TileGrid {
    /// Build a grid directly from rows
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Self {
        Self { rows }
    }

    /// Parse grid text
    pub fn parse(text: &str) -> Result<Self, TileMapError> {
        let mut rows = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            rows.push(parse_row(line, index + 1)?);
        }
        Ok(Self { rows })
    }

    /// Read and parse a grid file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TileMapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TileMapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Tile at a position, if present
    pub fn get(&self, row: usize, column: usize) -> Option<u32> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Whether the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate `(row, column, tile)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(column, &tile)| (row, column, tile))
        })
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<Vec<u32>, TileMapError> {
    line.split(',')
        .enumerate()
        .map(|(index, cell)| {
            let cell = cell.trim();
            cell.parse::<u32>().map_err(|_| TileMapError::InvalidCell {
                line: line_number,
                column: index + 1,
                value: cell.to_string(),
            })
        })
        .collect()
}

/// Tile map loading errors
#[derive(Error, Debug)]
pub enum TileMapError {
    /// A cell is not a non-negative integer
    #[error("Invalid tile {value:?} at line {line}, column {column}")]
    InvalidCell {
        /// 1-based line number
        line: usize,
        /// 1-based column number
        column: usize,
        /// Offending cell text
        value: String,
    },

    /// The map file could not be read
    #[error("Could not read tile map {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid() {
        let grid = TileGrid::parse("0,1,2\n3,4,5").unwrap();

        assert_eq!(grid.rows(), &[vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.get(1, 2), Some(5));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_non_numeric_cell_is_error() {
        let err = TileGrid::parse("0,x,2").unwrap_err();

        match err {
            TileMapError::InvalidCell { line, column, value } => {
                assert_eq!(line, 1);
                assert_eq!(column, 2);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_cell_is_error() {
        assert!(matches!(
            TileGrid::parse("1,2\n-1,4"),
            Err(TileMapError::InvalidCell { line: 2, column: 1, .. })
        ));
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        let grid = TileGrid::parse(" 7 , 8\r\n\n9,10\n").unwrap();
        assert_eq!(grid.rows(), &[vec![7, 8], vec![9, 10]]);
    }

    #[test]
    fn test_iter_row_major() {
        let grid = TileGrid::parse("1,2\n3").unwrap();
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells, vec![(0, 0, 1), (0, 1, 2), (1, 0, 3)]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TileGrid::load("no/such/map.csv"),
            Err(TileMapError::Io { .. })
        ));
    }
}
