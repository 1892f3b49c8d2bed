//! Temporary shields: effectiveness draw, per-cell protection bookkeeping and
//! round-based expiry.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_4;
use rand::Rng;

use crate::grid::Coord;

/// Outcome of the weak-measurement sequence that powers a shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShieldLevel {
    Maximum,
    Partial,
}

impl ShieldLevel {
    /// Fraction by which the shield scales down an attacker's success.
    pub fn effectiveness(self) -> f64 {
        match self {
            ShieldLevel::Maximum => 0.9,
            ShieldLevel::Partial => 0.6,
        }
    }

    /// Probability that a shield of `strength` settles at [`ShieldLevel::Maximum`].
    ///
    /// Each unit of strength nets a 0.1 rad rotation on top of the initial
    /// superposition, so the chance of reading the frozen state is
    /// `cos²(π/4 + 0.05·strength)`.
    pub fn maximum_probability(strength: u32) -> f64 {
        let c = libm::cos(FRAC_PI_4 + 0.05 * strength as f64);
        c * c
    }

    /// Draw a level for a shield of the given strength.
    pub fn sample<R: Rng + ?Sized>(strength: u32, rng: &mut R) -> Self {
        if rng.random::<f64>() < Self::maximum_probability(strength) {
            ShieldLevel::Maximum
        } else {
            ShieldLevel::Partial
        }
    }
}

/// An active shield on one ship cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub level: ShieldLevel,
    pub rounds_remaining: u32,
}

impl Shield {
    pub fn effectiveness(&self) -> f64 {
        self.level.effectiveness()
    }
}

/// Active shields keyed by cell; at most one per cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Protections {
    active: BTreeMap<Coord, Shield>,
}

impl Protections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `shield` at `coord`, replacing any shield already there.
    pub fn insert(&mut self, coord: Coord, shield: Shield) {
        self.active.insert(coord, shield);
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Shield> {
        self.active.remove(&coord)
    }

    pub fn get(&self, coord: Coord) -> Option<&Shield> {
        self.active.get(&coord)
    }

    pub fn is_protected(&self, coord: Coord) -> bool {
        self.active.contains_key(&coord)
    }

    /// Effectiveness at `coord`, zero when unshielded.
    pub fn effectiveness(&self, coord: Coord) -> f64 {
        self.active.get(&coord).map_or(0.0, Shield::effectiveness)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Age every shield by one round and drop the ones that ran out.
    ///
    /// Returns the expired cells in row-major order.
    pub fn tick(&mut self) -> Vec<Coord> {
        let mut expired = Vec::new();
        for (coord, shield) in self.active.iter_mut() {
            shield.rounds_remaining = shield.rounds_remaining.saturating_sub(1);
            if shield.rounds_remaining == 0 {
                expired.push(*coord);
            }
        }
        for coord in &expired {
            self.active.remove(coord);
        }
        expired
    }
}
