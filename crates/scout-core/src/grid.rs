//! The occupancy [`Grid`] searches run on.
//!
//! [`Cell`] is a newtype over `i32`: zero is free, any non-zero value is an
//! obstacle. Storage is a plain flat `Vec` addressed `y * width + x`, so a
//! `Grid` is `Send + Sync` and searches only ever read it.

use std::fmt;

use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single occupancy value, wrapping an `i32`.
///
/// Zero means the cell is traversable; any non-zero value blocks movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub i32);

impl Cell {
    /// A traversable cell.
    pub const FREE: Cell = Cell(0);
    /// The conventional obstacle value.
    pub const OBSTACLE: Cell = Cell(1);

    /// Create a new cell with the given value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether the cell can be traversed.
    pub const fn is_free(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Cell> for i32 {
    fn from(c: Cell) -> Self {
        c.0
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors that can occur when building a grid from row data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input had no rows, or a first row of zero width.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        len: usize,
        width: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid needs at least one non-empty row"),
            Self::Ragged { row, len, width } => {
                write!(f, "row {row} has {len} cells, expected {width}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular occupancy grid.
///
/// The grid owns its cells outright; there is no shared backing storage.
/// Search code treats a `Grid` as read-only — mutation happens between
/// searches via [`set`](Grid::set), [`place_obstacle`](Grid::place_obstacle)
/// and [`remove_obstacle`](Grid::remove_obstacle).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a grid of the given dimensions with every cell free.
    ///
    /// Negative dimensions are clamped to zero, yielding an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![Cell::FREE; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from rows of raw occupancy values (`rows[y][x]`).
    ///
    /// Fails fast on empty or ragged input rather than leaving neighbor
    /// queries undefined.
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    len: row.len(),
                    width,
                });
            }
            cells.extend(row.iter().map(|&v| Cell::new(v)));
        }
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
        })
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside this grid's bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        if self.bounds.contains(p) {
            Some(self.cells[self.idx(p)])
        } else {
            None
        }
    }

    /// Set the cell at `p`. No-op if `p` is outside bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if self.bounds.contains(p) {
            let i = self.idx(p);
            self.cells[i] = cell;
        }
    }

    /// Whether `p` is in bounds and traversable.
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        self.at(p).is_some_and(Cell::is_free)
    }

    /// Mark `p` as an obstacle, if it is in bounds and currently free.
    pub fn place_obstacle(&mut self, p: Point) {
        if self.is_free(p) {
            self.set(p, Cell::OBSTACLE);
        }
    }

    /// Clear any obstacle at `p`. No-op if `p` is outside bounds.
    pub fn remove_obstacle(&mut self, p: Point) {
        self.set(p, Cell::FREE);
    }

    /// Append the traversable cardinal neighbours of `p` into `buf`, in
    /// canonical order (up, down, left, right). The caller clears `buf`
    /// before calling.
    ///
    /// Every search algorithm expands nodes through this one method, so
    /// neighbor order and occupancy filtering are identical across them.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors4() {
            if self.is_free(n) {
                buf.push(n);
            }
        }
    }
}

impl fmt::Display for Grid {
    /// Rows of space-separated cell values, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in self.bounds.min.y..self.bounds.max.y {
            if y > self.bounds.min.y {
                writeln!(f)?;
            }
            for x in self.bounds.min.x..self.bounds.max.x {
                if x > self.bounds.min.x {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cells[self.idx(Point::new(x, y))].value())?;
            }
        }
        Ok(())
    }
}
