//! Weapon resolution: the amplified search shot and the interaction-free scan.
//!
//! Neither weapon simulates a state vector. The search shot uses the closed
//! form of amplitude amplification: with `M` marked cells in an address space
//! of `N`, `k = floor(π/4·sqrt(N/M))` rounds rotate the state by
//! `θ = asin(sqrt(M/N))` each, and the measurement lands on a marked cell with
//! probability `sin²((2k+1)θ)`. The scan draws its verdict from fixed
//! categorical odds.
//!
//! Resolvers are pure with respect to the board: they read an [`Engagement`]
//! and return an [`Outcome`]. Applying the outcome is the board's job.

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_4;
use rand::Rng;

use crate::grid::Coord;
use crate::outcome::{Outcome, Weapon};
use crate::shield::Protections;

/// Share of a shield's effectiveness that is taken off the hit probability.
pub const SHIELD_DAMPING: f64 = 0.3;

const SCAN_DETECTED: f64 = 0.25;
const SCAN_INTERACTION: f64 = 0.25;
const SCAN_CLEAR: f64 = 0.75;

/// Closed-form amplification parameters for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Amplification {
    pub address_space: usize,
    pub marked: usize,
    pub iterations: u32,
    pub angle: f64,
    pub probability: f64,
}

impl Amplification {
    /// Parameters for `marked` targets in a space of `address_space` states.
    ///
    /// Returns `None` when nothing is marked or the space is smaller than the
    /// marked set.
    pub fn new(address_space: usize, marked: usize) -> Option<Self> {
        if marked == 0 || marked > address_space {
            return None;
        }
        let ratio = address_space as f64 / marked as f64;
        let iterations = libm::floor(FRAC_PI_4 * libm::sqrt(ratio)).max(1.0) as u32;
        let angle = libm::asin(libm::sqrt(marked as f64 / address_space as f64));
        let s = libm::sin((2 * iterations + 1) as f64 * angle);
        Some(Self {
            address_space,
            marked,
            iterations,
            angle,
            probability: s * s,
        })
    }

    /// Success probability against a shield of the given effectiveness.
    pub fn shielded_probability(&self, effectiveness: f64) -> f64 {
        self.probability * (1.0 - effectiveness * SHIELD_DAMPING)
    }
}

/// Everything a resolver may look at for one action.
#[derive(Debug, Clone)]
pub struct Engagement<'a> {
    /// The normalised region, in bounds and deduplicated.
    pub region: &'a [Coord],
    /// Region cells not yet resolved; never empty when a resolver runs.
    pub open: Vec<Coord>,
    /// Live ships inside the region, regardless of prior shots.
    pub targets: Vec<Coord>,
    /// Shields on the defending board.
    pub shields: &'a Protections,
    /// `2^ceil(log2(cells))` of the defending grid.
    pub address_space: usize,
}

impl Engagement<'_> {
    /// Open cells that hold no live ship.
    pub fn open_water(&self) -> Vec<Coord> {
        self.open
            .iter()
            .copied()
            .filter(|c| !self.targets.contains(c))
            .collect()
    }
}

/// A weapon that turns an engagement into an outcome.
pub trait Resolver {
    fn weapon(&self) -> Weapon;

    fn resolve<R: Rng + ?Sized>(&self, engagement: &Engagement<'_>, rng: &mut R) -> Outcome;
}

/// Uniform pick from a slice.
pub(crate) fn choose<R: Rng + ?Sized>(cells: &[Coord], rng: &mut R) -> Option<Coord> {
    if cells.is_empty() {
        None
    } else {
        Some(cells[rng.random_range(0..cells.len())])
    }
}

#[inline]
pub(crate) fn bernoulli<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    rng.random::<f64>() < p
}

/// The primary weapon.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmplifiedSearch;

impl Resolver for AmplifiedSearch {
    fn weapon(&self) -> Weapon {
        Weapon::Search
    }

    fn resolve<R: Rng + ?Sized>(&self, engagement: &Engagement<'_>, rng: &mut R) -> Outcome {
        let amp = match Amplification::new(engagement.address_space, engagement.targets.len()) {
            Some(amp) => amp,
            None => {
                return Outcome::Miss {
                    coord: choose(&engagement.open, rng),
                    iterations: 0,
                    probability: 0.0,
                }
            }
        };
        log::debug!(
            "search: M={} N={} k={} theta={:.4} p={:.4}",
            amp.marked,
            amp.address_space,
            amp.iterations,
            amp.angle,
            amp.probability
        );

        if !bernoulli(amp.probability, rng) {
            return Outcome::Miss {
                coord: choose(&engagement.open_water(), rng),
                iterations: amp.iterations,
                probability: amp.probability,
            };
        }

        let unprotected: Vec<Coord> = engagement
            .targets
            .iter()
            .copied()
            .filter(|c| !engagement.shields.is_protected(*c))
            .collect();
        if let Some(coord) = choose(&unprotected, rng) {
            return Outcome::Hit {
                coord,
                iterations: amp.iterations,
                probability: amp.probability,
            };
        }

        // Every target is shielded: pick one and fight through its shield.
        let Some(coord) = choose(&engagement.targets, rng) else {
            return Outcome::Miss {
                coord: None,
                iterations: amp.iterations,
                probability: amp.probability,
            };
        };
        let reduced = amp.shielded_probability(engagement.shields.effectiveness(coord));
        if bernoulli(reduced, rng) {
            Outcome::Hit {
                coord,
                iterations: amp.iterations,
                probability: reduced,
            }
        } else {
            Outcome::Blocked {
                coord,
                probability: reduced,
            }
        }
    }
}

/// The stealth weapon: tells whether ships are present, never where.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionFreeScan;

impl Resolver for InteractionFreeScan {
    fn weapon(&self) -> Weapon {
        Weapon::Scan
    }

    fn resolve<R: Rng + ?Sized>(&self, engagement: &Engagement<'_>, rng: &mut R) -> Outcome {
        let ship_count = engagement.targets.len();
        let roll = rng.random::<f64>();
        if ship_count == 0 {
            return if roll < SCAN_CLEAR {
                Outcome::Clear
            } else {
                Outcome::Noise
            };
        }

        if roll < SCAN_DETECTED {
            let shield = engagement
                .targets
                .iter()
                .map(|c| engagement.shields.effectiveness(*c))
                .fold(0.0, f64::max);
            if shield > 0.0 && bernoulli(shield, rng) {
                Outcome::Obfuscated
            } else {
                Outcome::Detected { ship_count }
            }
        } else if roll < SCAN_DETECTED + SCAN_INTERACTION {
            Outcome::Interaction { ship_count }
        } else {
            Outcome::Inconclusive
        }
    }
}
