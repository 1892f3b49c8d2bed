//! Commonly used types for ease of import.

pub use crate::{
    Action, AiPlayer, Board, BoardError, Coord, Difficulty, GameConfig, GameEngine, GameStatus,
    Grid, Outcome, Player, RegionShape, Shot, Side, Weapon,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
