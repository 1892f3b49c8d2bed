//! Weapon outcomes as a tagged enum, plus the `Shot` record handed back to
//! callers after every resolved action.

use alloc::vec::Vec;
use core::fmt;

use crate::grid::Coord;
use crate::shield::ShieldLevel;

/// The three weapons a player can use on a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Weapon {
    /// Amplified search shot; the only weapon that destroys ships.
    Search,
    /// Interaction-free scan; region-level verdict only.
    Scan,
    /// Temporary shield on the player's own ships.
    Shield,
}

impl Weapon {
    /// Short method tag used in messages and logs.
    pub fn method(self) -> &'static str {
        match self {
            Weapon::Search => "grover",
            Weapon::Scan => "ev_scan",
            Weapon::Shield => "zeno_defense",
        }
    }
}

/// What a weapon resolved to. Each kind carries only its own fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Ship destroyed at `coord`.
    Hit {
        coord: Coord,
        iterations: u32,
        probability: f64,
    },
    /// Resolver landed on a ship that was already destroyed.
    AlreadyFound { coord: Coord },
    /// Measurement collapsed onto water, or onto nothing at all.
    Miss {
        coord: Option<Coord>,
        iterations: u32,
        probability: f64,
    },
    /// A shield deflected the shot; the ship is revealed but intact.
    Blocked { coord: Coord, probability: f64 },
    /// Scan saw `ship_count` ships somewhere in the region.
    Detected { ship_count: usize },
    /// Scan disturbed a region holding `ship_count` ships.
    Interaction { ship_count: usize },
    /// Scan could not decide.
    Inconclusive,
    /// Scan saw clean interference: the region is empty.
    Clear,
    /// Scan on an empty region produced a spurious signal.
    Noise,
    /// A shield hid the detection.
    Obfuscated,
    /// Shields raised on the listed cells.
    Protected { shields: Vec<(Coord, ShieldLevel)> },
}

impl Outcome {
    /// Tag name of the outcome kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Hit { .. } => "hit",
            Outcome::AlreadyFound { .. } => "already_found",
            Outcome::Miss { .. } => "miss",
            Outcome::Blocked { .. } => "blocked",
            Outcome::Detected { .. } => "detected",
            Outcome::Interaction { .. } => "interaction",
            Outcome::Inconclusive => "inconclusive",
            Outcome::Clear => "clear",
            Outcome::Noise => "noise",
            Outcome::Obfuscated => "obfuscated",
            Outcome::Protected { .. } => "protection_active",
        }
    }

    /// The single cell this outcome points at, if any.
    pub fn coord(&self) -> Option<Coord> {
        match self {
            Outcome::Hit { coord, .. }
            | Outcome::AlreadyFound { coord }
            | Outcome::Blocked { coord, .. } => Some(*coord),
            Outcome::Miss { coord, .. } => *coord,
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit { .. })
    }
}

/// A resolved weapon action: which weapon, where, and what happened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub weapon: Weapon,
    pub region: Vec<Coord>,
    pub outcome: Outcome,
}

impl Shot {
    pub fn coord(&self) -> Option<Coord> {
        self.outcome.coord()
    }

    pub fn is_hit(&self) -> bool {
        self.outcome.is_hit()
    }
}

/// Human-readable message for the shot.
impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Hit {
                coord, iterations, ..
            } => write!(
                f,
                "HIT! {} iterations amplified the target. Ship destroyed at {}!",
                iterations, coord
            ),
            Outcome::AlreadyFound { coord } => {
                write!(f, "Ship at {} was already found.", coord)
            }
            Outcome::Miss {
                coord: Some(coord), ..
            } => write!(f, "MISS! Measurement collapsed to empty water at {}.", coord),
            Outcome::Miss { coord: None, .. } => {
                write!(f, "MISS! No ship detected in this region.")
            }
            Outcome::Blocked { coord, .. } => {
                write!(f, "Shield deflected the attack at {}!", coord)
            }
            Outcome::Detected { ship_count } => write!(
                f,
                "Scan detected {} ship(s) somewhere in the {}-cell region. Exact location unknown.",
                ship_count,
                self.region.len()
            ),
            Outcome::Interaction { ship_count } => write!(
                f,
                "Scan interacted with a region containing {} ship(s). Ships disturbed but intact.",
                ship_count
            ),
            Outcome::Inconclusive => {
                write!(f, "Scan inconclusive. Interference prevented a clear reading.")
            }
            Outcome::Clear => write!(f, "Scan shows perfect interference. No ships in region."),
            Outcome::Noise => {
                write!(f, "Scan picked up noise. Possible false positive, region may be empty.")
            }
            Outcome::Obfuscated => write!(f, "Shield obfuscated the scan. Detection prevented."),
            Outcome::Protected { shields } => {
                write!(f, "Shield activated on {} cell(s):", shields.len())?;
                for (coord, level) in shields {
                    write!(f, " {} ({:?})", coord, level)?;
                }
                Ok(())
            }
        }
    }
}
