//! Core types: grid shape, opaque header, elevation grid and selection mask.

use serde::{Deserialize, Serialize};

use crate::error::{HeightmapError, Result};

/// Number of raw text lines that make up a grid header.
pub const HEADER_LINES: usize = 6;

/// Extent of a 2D array as (rows, cols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Create a new shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if the shape has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

/// The six header lines of a grid file.
///
/// Lines are carried as opaque text and written back unchanged; nothing here
/// interprets `ncols`, `cellsize` or any other key the file may contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    lines: Vec<String>,
}

impl Header {
    /// Build a header from exactly [`HEADER_LINES`] lines.
    ///
    /// Lines may not contain `\r` or `\n`; they would be written back as
    /// extra lines.
    pub fn new<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.len() != HEADER_LINES {
            return Err(HeightmapError::format(format!(
                "header must have {} lines, got {}",
                HEADER_LINES,
                lines.len()
            )));
        }
        if let Some(idx) = lines.iter().position(|l| l.contains(|c: char| c == '\r' || c == '\n')) {
            return Err(HeightmapError::format(format!(
                "header line {} contains a line break",
                idx + 1
            )));
        }
        Ok(Self { lines })
    }

    /// The raw header lines, in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// A 2D grid of elevations in row-major order (top row first).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    shape: Shape,
}

impl Grid {
    /// Create a grid, checking that `data` fills `shape` exactly.
    pub fn new(shape: Shape, data: Vec<f64>) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(HeightmapError::shape_mismatch(
                "grid construction",
                shape,
                Shape::new(1, data.len()),
            ));
        }
        Ok(Self { data, shape })
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(HeightmapError::shape_mismatch(
                    "grid construction",
                    Shape::new(rows.len(), cols),
                    Shape::new(rows.len(), row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Self::new(Shape::new(rows.len(), cols), data)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Cell values in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the value at a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        self.data.get(row * self.shape.cols + col).copied()
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, so an empty grid yields no rows
        let cols = self.shape.cols.max(1);
        self.data.chunks(cols).take(self.shape.rows)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// A boolean selection over grid cells, same layout as [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Vec<bool>,
    shape: Shape,
}

impl Mask {
    /// Create a mask, checking that `cells` fills `shape` exactly.
    pub fn new(shape: Shape, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != shape.len() {
            return Err(HeightmapError::shape_mismatch(
                "mask construction",
                shape,
                Shape::new(1, cells.len()),
            ));
        }
        Ok(Self { cells, shape })
    }

    /// Build a mask from nested rows.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(HeightmapError::shape_mismatch(
                "mask construction",
                Shape::new(rows.len(), cols),
                Shape::new(rows.len(), bad.len()),
            ));
        }
        let cells = rows.iter().flatten().copied().collect();
        Self::new(Shape::new(rows.len(), cols), cells)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Selection flags in row-major order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Get the flag at a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        self.cells.get(row * self.shape.cols + col).copied()
    }

    /// Number of selected cells.
    pub fn selected_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fraction of cells selected (0.0 - 1.0). Zero for an empty mask.
    pub fn coverage(&self) -> f64 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.selected_count() as f64 / self.cells.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_lines() -> Vec<&'static str> {
        vec![
            "ncols 2",
            "nrows 2",
            "xllcorner 0.0",
            "yllcorner 0.0",
            "cellsize 1.0",
            "NODATA_value -9999",
        ]
    }

    #[test]
    fn test_header_requires_six_lines() {
        assert!(Header::new(six_lines()).is_ok());
        assert!(matches!(
            Header::new(vec!["ncols 2"; 5]),
            Err(HeightmapError::Format(_))
        ));
        assert!(Header::new(vec!["x"; 7]).is_err());
    }

    #[test]
    fn test_header_keeps_lines_verbatim() {
        let header = Header::new(vec!["  ncols   2  ", "b", "c", "d", "e", "f"]).unwrap();
        assert_eq!(header.lines()[0], "  ncols   2  ");
    }

    #[test]
    fn test_header_rejects_carriage_return() {
        let mut lines = six_lines();
        lines[0] = "ncols 2\r";
        match Header::new(lines).unwrap_err() {
            HeightmapError::Format(msg) => assert!(msg.contains("line 1"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_header_rejects_embedded_newline() {
        let mut lines = six_lines();
        lines[3] = "yllcorner\n0.0";
        match Header::new(lines).unwrap_err() {
            HeightmapError::Format(msg) => assert!(msg.contains("line 4"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_grid_new_checks_length() {
        assert!(Grid::new(Shape::new(2, 2), vec![0.0; 4]).is_ok());
        let err = Grid::new(Shape::new(2, 2), vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, HeightmapError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_grid_from_rows_and_get() {
        let grid = Grid::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(grid.shape(), Shape::new(2, 3));
        assert_eq!(grid.get(0, 0), Some(1.0));
        assert_eq!(grid.get(1, 2), Some(6.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_grid_from_rows_rejects_ragged() {
        assert!(Grid::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn test_grid_rows_iter() {
        let grid = Grid::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let rows: Vec<&[f64]> = grid.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
    }

    #[test]
    fn test_mask_coverage() {
        let mask = Mask::from_rows(&[vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(mask.selected_count(), 2);
        assert!((mask.coverage() - 0.5).abs() < f64::EPSILON);
        assert_eq!(mask.get(1, 1), Some(true));

        let empty = Mask::new(Shape::new(0, 0), vec![]).unwrap();
        assert_eq!(empty.coverage(), 0.0);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(Shape::new(3, 4).to_string(), "(3, 4)");
    }
}
