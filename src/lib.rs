#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod outcome;
mod player;
pub mod prelude;
mod shield;
pub mod weapons;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with};
pub use outcome::*;
pub use player::*;
pub use shield::*;
pub use weapons::{Amplification, AmplifiedSearch, Engagement, InteractionFreeScan, Resolver, SHIELD_DAMPING};
