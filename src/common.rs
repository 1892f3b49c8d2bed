//! Common types: board errors shared by every layer of the engine.

use crate::bitboard::BitBoardError;

/// Errors returned by board, weapon and match operations.
///
/// None of these are fatal: the caller is expected to ask for a different
/// input and try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoard(BitBoardError),
    /// Region is empty once out-of-bounds cells are dropped.
    InvalidRegion,
    /// Every cell of the region has already been resolved.
    AlreadyScanned,
    /// Shield requested on a cell that does not hold a live ship of our own.
    InvalidTarget,
    /// Coordinate or index lies outside the grid.
    OutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// The fleet already holds the configured number of ships.
    FleetFull,
    /// Configuration rejected at construction time.
    InvalidConfig(&'static str),
    /// The match already has a winner.
    GameOver,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { .. } => BoardError::OutOfBounds,
            other => BoardError::BitBoard(other),
        }
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidRegion => write!(f, "No target region selected"),
            BoardError::AlreadyScanned => write!(f, "You already scanned this area"),
            BoardError::InvalidTarget => write!(f, "Shield needs one of your own ships"),
            BoardError::OutOfBounds => write!(f, "Coordinate is outside the grid"),
            BoardError::ShipOverlaps => write!(f, "A ship already occupies that cell"),
            BoardError::FleetFull => write!(f, "All ships are already placed"),
            BoardError::InvalidConfig(why) => write!(f, "Invalid configuration: {}", why),
            BoardError::GameOver => write!(f, "The game is already over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
