//! Wall storage for both maze topologies
//!
//! Walls are plain boolean matrices. Generation only ever clears walls;
//! collision and draw code only reads them.

pub mod cartesian;
pub mod polar;

pub use cartesian::{CartesianGeometry, CartesianGrid, Cell, Side};
pub use polar::{PolarCell, PolarDir, PolarGeometry, PolarGrid, PolarLocation};

use serde::{Deserialize, Serialize};

/// Row-major boolean matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl WallMatrix {
    pub fn new(rows: usize, cols: usize, value: bool) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Out-of-range lookups read as `false`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        debug_assert!(row < self.rows && col < self.cols, "wall index out of range");
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
        }
    }

    pub fn fill(&mut self, value: bool) {
        self.cells.fill(value);
    }

    pub fn fill_row(&mut self, row: usize, value: bool) {
        if row < self.rows {
            let start = row * self.cols;
            self.cells[start..start + self.cols].fill(value);
        }
    }

    /// Number of `true` entries
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Number of `true` entries in one row
    pub fn count_row(&self, row: usize) -> usize {
        if row >= self.rows {
            return 0;
        }
        let start = row * self.cols;
        self.cells[start..start + self.cols].iter().filter(|&&v| v).count()
    }
}
