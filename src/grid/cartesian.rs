//! Rectangular wall grid
//!
//! Cell (r, c) is bounded by `horizontal[r][c]` (north),
//! `horizontal[r + 1][c]` (south), `vertical[r][c]` (west) and
//! `vertical[r][c + 1]` (east).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::WallMatrix;
use crate::sim::carve::CarveGrid;

/// A rectangular cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Cell side, also used as the carve direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::West => Side::East,
            Side::East => Side::West,
        }
    }
}

/// Pixel layout of a rectangular grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianGeometry {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
    /// Top-left corner of the grid on both axes
    pub offset: f32,
}

impl CartesianGeometry {
    /// x of the vertical wall line `col` (0..=cols)
    #[inline]
    pub fn line_x(&self, col: usize) -> f32 {
        col as f32 * self.cell_size + self.offset
    }

    /// y of the horizontal wall line `row` (0..=rows)
    #[inline]
    pub fn line_y(&self, row: usize) -> f32 {
        row as f32 * self.cell_size + self.offset
    }

    /// Cell containing `pos`, clamped into the grid
    pub fn cell_at(&self, pos: Vec2) -> Cell {
        let local = (pos - Vec2::splat(self.offset)) / self.cell_size;
        let clamp = |v: f32, n: usize| -> usize {
            if v.is_nan() || v < 0.0 {
                0
            } else {
                (v.floor() as usize).min(n - 1)
            }
        };
        Cell::new(clamp(local.y, self.rows), clamp(local.x, self.cols))
    }

    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            self.line_x(cell.col) + self.cell_size / 2.0,
            self.line_y(cell.row) + self.cell_size / 2.0,
        )
    }

    /// Top-left and bottom-right corners of the whole grid
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::splat(self.offset),
            Vec2::new(self.line_x(self.cols), self.line_y(self.rows)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartesianGrid {
    rows: usize,
    cols: usize,
    horizontal: WallMatrix,
    vertical: WallMatrix,
    visited: WallMatrix,
}

impl CartesianGrid {
    /// All walls present, nothing visited
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            horizontal: WallMatrix::new(rows + 1, cols, true),
            vertical: WallMatrix::new(rows, cols + 1, true),
            visited: WallMatrix::new(rows, cols, false),
        }
    }

    /// Restore every wall and forget visits
    pub fn reset(&mut self) {
        self.horizontal.fill(true);
        self.vertical.fill(true);
        self.visited.fill(false);
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Wall on the horizontal line `row` (0..=rows) above column `col`
    #[inline]
    pub fn horizontal(&self, row: usize, col: usize) -> bool {
        self.horizontal.get(row, col)
    }

    /// Wall on the vertical line `col` (0..=cols) beside row `row`
    #[inline]
    pub fn vertical(&self, row: usize, col: usize) -> bool {
        self.vertical.get(row, col)
    }

    pub fn horizontal_walls(&self) -> &WallMatrix {
        &self.horizontal
    }

    pub fn vertical_walls(&self) -> &WallMatrix {
        &self.vertical
    }

    /// Whether `cell` has a wall on `side`
    pub fn has_wall(&self, cell: Cell, side: Side) -> bool {
        match side {
            Side::North => self.horizontal(cell.row, cell.col),
            Side::South => self.horizontal(cell.row + 1, cell.col),
            Side::West => self.vertical(cell.row, cell.col),
            Side::East => self.vertical(cell.row, cell.col + 1),
        }
    }

    pub fn is_cell_visited(&self, cell: Cell) -> bool {
        self.visited.get(cell.row, cell.col)
    }

    /// In-bounds neighbour regardless of walls
    pub fn step(&self, cell: Cell, side: Side) -> Option<Cell> {
        let next = match side {
            Side::North => Cell::new(cell.row.checked_sub(1)?, cell.col),
            Side::South => Cell::new(cell.row + 1, cell.col),
            Side::West => Cell::new(cell.row, cell.col.checked_sub(1)?),
            Side::East => Cell::new(cell.row, cell.col + 1),
        };
        self.contains(next).then_some(next)
    }

    /// Neighbours reachable through an open wall
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Side::ALL
            .into_iter()
            .filter(move |&side| !self.has_wall(cell, side))
            .filter_map(move |side| self.step(cell, side))
    }

    /// Open interior walls, i.e. passages between two cells
    pub fn passage_count(&self) -> usize {
        let mut open = 0;
        for r in 1..self.rows {
            open += (0..self.cols).filter(|&c| !self.horizontal(r, c)).count();
        }
        for r in 0..self.rows {
            open += (1..self.cols).filter(|&c| !self.vertical(r, c)).count();
        }
        open
    }

    /// Perimeter cells walked clockwise from the top-left corner, each with
    /// the outer side it touches
    pub fn perimeter(&self) -> Vec<(Cell, Side)> {
        let (rows, cols) = (self.rows, self.cols);
        let mut cells = Vec::with_capacity(2 * (rows + cols));
        for c in 0..cols {
            cells.push((Cell::new(0, c), Side::North));
        }
        if rows > 1 {
            for r in 1..rows - 1 {
                cells.push((Cell::new(r, cols - 1), Side::East));
            }
            for c in (0..cols).rev() {
                cells.push((Cell::new(rows - 1, c), Side::South));
            }
            if cols > 1 {
                for r in (1..rows - 1).rev() {
                    cells.push((Cell::new(r, 0), Side::West));
                }
            }
        }
        cells
    }
}

impl CarveGrid for CartesianGrid {
    type Cell = Cell;
    type Dir = Side;

    fn directions() -> [Side; 4] {
        Side::ALL
    }

    fn neighbor(&self, cell: Cell, dir: Side) -> Option<Cell> {
        self.step(cell, dir)
    }

    fn is_visited(&self, cell: Cell) -> bool {
        self.is_cell_visited(cell)
    }

    fn mark_visited(&mut self, cell: Cell) {
        self.visited.set(cell.row, cell.col, true);
    }

    fn open_wall(&mut self, cell: Cell, dir: Side) {
        match dir {
            Side::North => self.horizontal.set(cell.row, cell.col, false),
            Side::South => self.horizontal.set(cell.row + 1, cell.col, false),
            Side::West => self.vertical.set(cell.row, cell.col, false),
            Side::East => self.vertical.set(cell.row, cell.col + 1, false),
        }
    }
}
