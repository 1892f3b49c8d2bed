//! Board state for one fleet: ship placement, found/shot bookkeeping, shields
//! and the entry points that run a weapon against it.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::BoardError;
use crate::config::GameConfig;
use crate::grid::{Coord, Grid};
use crate::outcome::{Outcome, Shot, Weapon};
use crate::shield::{Protections, Shield, ShieldLevel};
use crate::weapons::{AmplifiedSearch, Engagement, InteractionFreeScan, Resolver};

type BB = BitBoard<u128>;

/// Result of random fleet placement. A short fleet is a warning, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Complete(Vec<Coord>),
    Short { placed: Vec<Coord>, requested: usize },
}

impl Placement {
    pub fn ships(&self) -> &[Coord] {
        match self {
            Placement::Complete(ships) => ships,
            Placement::Short { placed, .. } => placed,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Placement::Complete(_))
    }
}

/// Summary counters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardStats {
    pub ships_found: usize,
    pub total_ships: usize,
    pub ships_remaining: usize,
    pub total_cells: usize,
    pub qubits: u32,
    pub shots_taken: usize,
}

/// One player's fleet and everything the opponent has learned about it.
#[derive(Clone)]
pub struct Board {
    grid: Grid,
    fleet_size: usize,
    shield_strength: u32,
    shield_duration: u32,
    ships: BB,
    found: BB,
    shots: BB,
    disturbed: BB,
    shields: Protections,
}

impl Board {
    /// Create an empty board (no ships placed) for `config`.
    pub fn new(config: &GameConfig) -> Result<Self, BoardError> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        let empty = BB::try_new(grid.size())?;
        Ok(Board {
            grid,
            fleet_size: config.ship_count,
            shield_strength: config.shield_strength,
            shield_duration: config.shield_duration,
            ships: empty,
            found: empty,
            shots: empty,
            disturbed: empty,
            shields: Protections::new(),
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Ship occupancy mask.
    pub fn ships(&self) -> BB {
        self.ships
    }

    /// Ships destroyed so far.
    pub fn found(&self) -> BB {
        self.found
    }

    /// Cells resolved so far: destroyed ships and measured water.
    pub fn shots(&self) -> BB {
        self.shots
    }

    /// Cells disturbed by a scan interaction.
    pub fn disturbed(&self) -> BB {
        self.disturbed
    }

    pub fn shields(&self) -> &Protections {
        &self.shields
    }

    pub fn is_shot(&self, coord: Coord) -> bool {
        self.shots.contains(coord.row, coord.col)
    }

    pub fn has_ship(&self, coord: Coord) -> bool {
        self.ships.contains(coord.row, coord.col)
    }

    pub fn is_found(&self, coord: Coord) -> bool {
        self.found.contains(coord.row, coord.col)
    }

    /// Ships not yet destroyed.
    pub fn live_ships(&self) -> BB {
        self.ships & !self.found
    }

    /// Clear ships, shots and shields for a new game.
    pub fn reset(&mut self) {
        self.ships.clear_all();
        self.found.clear_all();
        self.shots.clear_all();
        self.disturbed.clear_all();
        self.shields.clear();
    }

    /// Place a single ship by hand.
    pub fn place_ship(&mut self, coord: Coord) -> Result<(), BoardError> {
        if !self.grid.contains(coord) {
            return Err(BoardError::OutOfBounds);
        }
        if self.has_ship(coord) {
            return Err(BoardError::ShipOverlaps);
        }
        if self.ships.count_ones() >= self.fleet_size {
            return Err(BoardError::FleetFull);
        }
        self.ships.set(coord.row, coord.col)?;
        Ok(())
    }

    /// Replace the fleet with `count` ships drawn uniformly without
    /// replacement, giving up after `2·N²` draws.
    pub fn place_ships_randomly<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Placement {
        self.reset();
        let size = self.grid.size();
        let budget = 2 * self.grid.cells();
        let mut placed = Vec::with_capacity(count);
        let mut attempts = 0;
        while placed.len() < count && attempts < budget {
            attempts += 1;
            let coord = Coord::new(rng.random_range(0..size), rng.random_range(0..size));
            if !self.has_ship(coord) && self.ships.set(coord.row, coord.col).is_ok() {
                placed.push(coord);
            }
        }
        self.fleet_size = count;
        if placed.len() < count {
            log::warn!(
                "could only place {} ships out of {} requested",
                placed.len(),
                count
            );
            Placement::Short {
                placed,
                requested: count,
            }
        } else {
            Placement::Complete(placed)
        }
    }

    /// In-bounds, deduplicated copy of `region`, order preserved, with the
    /// same cells as a mask.
    fn normalize(&self, region: &[Coord]) -> Result<(Vec<Coord>, BB), BoardError> {
        let mut seen = self.ships.empty_like();
        let mut cells = Vec::with_capacity(region.len());
        for &c in region {
            if self.grid.contains(c) && !seen.contains(c.row, c.col) {
                seen.set(c.row, c.col)?;
                cells.push(c);
            }
        }
        if cells.is_empty() {
            return Err(BoardError::InvalidRegion);
        }
        Ok((cells, seen))
    }

    /// Run `resolver` against this board and apply its outcome.
    ///
    /// Only the cell the outcome names becomes shot: the destroyed ship on a
    /// hit, the measured water on a miss. The rest of the region stays open,
    /// so a live ship is never hidden behind an `AlreadyScanned` region.
    pub fn fire_at<Z, R>(&mut self, region: &[Coord], resolver: &Z, rng: &mut R) -> Result<Shot, BoardError>
    where
        Z: Resolver,
        R: Rng + ?Sized,
    {
        let (region, mask) = self.normalize(region)?;
        let open: Vec<Coord> = region.iter().copied().filter(|c| !self.is_shot(*c)).collect();
        if open.is_empty() {
            return Err(BoardError::AlreadyScanned);
        }
        let targets: Vec<Coord> = (self.live_ships() & mask)
            .iter_set_bits()
            .map(Coord::from)
            .collect();

        let outcome = {
            let engagement = Engagement {
                region: &region,
                open,
                targets,
                shields: &self.shields,
                address_space: self.grid.address_space(),
            };
            resolver.resolve(&engagement, rng)
        };
        let outcome = self.apply(&region, outcome)?;
        let shot = Shot {
            weapon: resolver.weapon(),
            region,
            outcome,
        };
        log::debug!("{} -> {}", shot.weapon.method(), shot.outcome.kind());
        Ok(shot)
    }

    fn apply(&mut self, region: &[Coord], outcome: Outcome) -> Result<Outcome, BoardError> {
        match outcome {
            Outcome::Hit { coord, .. } if self.is_found(coord) => {
                Ok(Outcome::AlreadyFound { coord })
            }
            Outcome::Hit { coord, .. } => {
                self.found.set(coord.row, coord.col)?;
                self.shots.set(coord.row, coord.col)?;
                self.shields.remove(coord);
                log::info!("ship destroyed at {}", coord);
                Ok(outcome)
            }
            Outcome::Miss {
                coord: Some(coord), ..
            } => {
                self.shots.set(coord.row, coord.col)?;
                Ok(outcome)
            }
            Outcome::Interaction { .. } => {
                for c in region {
                    self.disturbed.set(c.row, c.col)?;
                }
                Ok(outcome)
            }
            other => Ok(other),
        }
    }

    /// Fire `weapon` at `region`. Shields go up on this board's own ships.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        region: &[Coord],
        weapon: Weapon,
        rng: &mut R,
    ) -> Result<Shot, BoardError> {
        match weapon {
            Weapon::Search => self.fire_at(region, &AmplifiedSearch, rng),
            Weapon::Scan => self.fire_at(region, &InteractionFreeScan, rng),
            Weapon::Shield => self.protect_region(region, rng),
        }
    }

    /// Raise a shield on one of our live ships, replacing any shield there.
    pub fn protect<R: Rng + ?Sized>(
        &mut self,
        coord: Coord,
        strength: u32,
        duration: u32,
        rng: &mut R,
    ) -> Result<Shield, BoardError> {
        if duration == 0 || !self.live_ships().contains(coord.row, coord.col) {
            return Err(BoardError::InvalidTarget);
        }
        let shield = Shield {
            level: ShieldLevel::sample(strength, rng),
            rounds_remaining: duration,
        };
        self.shields.insert(coord, shield);
        Ok(shield)
    }

    /// Shield every cell of `region` with the configured strength and
    /// duration. Either every cell is a live ship or nothing changes.
    pub fn protect_region<R: Rng + ?Sized>(&mut self, region: &[Coord], rng: &mut R) -> Result<Shot, BoardError> {
        let (region, mask) = self.normalize(region)?;
        if !mask.is_subset(&self.live_ships()) {
            return Err(BoardError::InvalidTarget);
        }
        let (strength, duration) = (self.shield_strength, self.shield_duration);
        let mut shields = Vec::with_capacity(region.len());
        for &c in &region {
            let shield = self.protect(c, strength, duration, rng)?;
            shields.push((c, shield.level));
        }
        Ok(Shot {
            weapon: Weapon::Shield,
            region,
            outcome: Outcome::Protected { shields },
        })
    }

    /// Age every shield by one round; returns the cells whose shield expired.
    pub fn end_turn(&mut self) -> Vec<Coord> {
        self.shields.tick()
    }

    /// All ships placed have been found. An empty fleet is never won.
    pub fn is_won(&self) -> bool {
        !self.ships.is_empty() && self.found == self.ships
    }

    pub fn stats(&self) -> BoardStats {
        let total = self.ships.count_ones();
        let found = self.found.count_ones();
        BoardStats {
            ships_found: found,
            total_ships: total,
            ships_remaining: total - found,
            total_cells: self.grid.cells(),
            qubits: self.grid.qubits(),
            shots_taken: self.shots.count_ones(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  grid: {:?},\n  ships: {:?},\n  found: {:?},\n  shots: {:?},\n  shields: {:?}\n}}",
            self.grid, self.ships, self.found, self.shots, self.shields
        )
    }
}

/// `S` ship, `X` destroyed, `o` measured water, `~` disturbed, `.` water.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.grid.size();
        write!(f, "   ")?;
        for c in 0..size {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        writeln!(f)?;
        for r in 0..size {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..size {
                let ch = if self.found.contains(r, c) {
                    'X'
                } else if self.shots.contains(r, c) {
                    'o'
                } else if self.ships.contains(r, c) {
                    'S'
                } else if self.disturbed.contains(r, c) {
                    '~'
                } else {
                    '.'
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
