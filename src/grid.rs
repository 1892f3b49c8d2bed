//! Grid coordinates, index conversion and region shapes.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::BoardError;
use crate::config::{DEFAULT_REGION_SIZE, MAX_GRID_SIZE};

/// A cell on the grid, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(&self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Column letter followed by the one-based row, e.g. `C4` for (3, 2).
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.col as u8) as char;
        write!(f, "{}{}", col, self.row + 1)
    }
}

/// Shape of a weapon footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionShape {
    /// `size×size` block growing down and right from the anchor.
    Square(usize),
    /// Every cell in the anchor's row.
    Row,
    /// Every cell in the anchor's column.
    Column,
}

impl Default for RegionShape {
    fn default() -> Self {
        RegionShape::Square(DEFAULT_REGION_SIZE)
    }
}

impl FromStr for RegionShape {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(RegionShape::Square(DEFAULT_REGION_SIZE)),
            "row" => Ok(RegionShape::Row),
            "column" => Ok(RegionShape::Column),
            _ => Err(BoardError::InvalidRegion),
        }
    }
}

/// An `N×N` coordinate space with row-major linear indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(BoardError::InvalidConfig("grid size must be between 1 and 11"));
        }
        Ok(Self { size })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, `N²`.
    pub fn cells(&self) -> usize {
        self.size * self.size
    }

    /// Size of the full addressable search space, `2^ceil(log2(N²))`.
    pub fn address_space(&self) -> usize {
        self.cells().next_power_of_two()
    }

    /// Register width needed to address every cell.
    pub fn qubits(&self) -> u32 {
        self.address_space().trailing_zeros()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    pub fn to_index(&self, coord: Coord) -> Result<usize, BoardError> {
        if !self.contains(coord) {
            return Err(BoardError::OutOfBounds);
        }
        Ok(coord.row * self.size + coord.col)
    }

    pub fn to_coord(&self, index: usize) -> Result<Coord, BoardError> {
        if index >= self.cells() {
            return Err(BoardError::OutOfBounds);
        }
        Ok(Coord::new(index / self.size, index % self.size))
    }

    /// Every cell in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells()).map(move |i| Coord::new(i / self.size, i % self.size))
    }

    /// The cell the AI treats as the middle of the board.
    pub fn center(&self) -> Coord {
        Coord::new(self.size / 2, self.size / 2)
    }

    /// In-bounds cells of `shape` anchored at `anchor`, row-major.
    ///
    /// Squares are clipped to the grid; rows and columns ignore the anchor's
    /// other coordinate. An anchor outside the grid yields whatever part of
    /// the shape remains in bounds, possibly nothing.
    pub fn region(&self, anchor: Coord, shape: RegionShape) -> Vec<Coord> {
        let mut region = Vec::new();
        match shape {
            RegionShape::Square(size) => {
                for dr in 0..size {
                    for dc in 0..size {
                        let c = Coord::new(
                            anchor.row.saturating_add(dr),
                            anchor.col.saturating_add(dc),
                        );
                        if self.contains(c) {
                            region.push(c);
                        }
                    }
                }
            }
            RegionShape::Row => {
                if anchor.row < self.size {
                    region.extend((0..self.size).map(|col| Coord::new(anchor.row, col)));
                }
            }
            RegionShape::Column => {
                if anchor.col < self.size {
                    region.extend((0..self.size).map(|row| Coord::new(row, anchor.col)));
                }
            }
        }
        region
    }

    /// Every anchor for which a `size×size` square lies fully on the grid.
    pub fn square_anchors(&self, size: usize) -> impl Iterator<Item = Coord> + '_ {
        let span = (self.size + 1).saturating_sub(size.max(1));
        (0..span * span).map(move |i| Coord::new(i / span, i % span))
    }

    /// Axis-adjacent cells in bounds: right, left, down, up.
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        let mut out = Vec::with_capacity(4);
        if coord.col + 1 < self.size {
            out.push(Coord::new(coord.row, coord.col + 1));
        }
        if coord.col > 0 {
            out.push(Coord::new(coord.row, coord.col - 1));
        }
        if coord.row + 1 < self.size {
            out.push(Coord::new(coord.row + 1, coord.col));
        }
        if coord.row > 0 {
            out.push(Coord::new(coord.row - 1, coord.col));
        }
        out
    }
}
