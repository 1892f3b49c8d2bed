// Decision policies for the computer opponent.
// Everything here reads public board state only: shots and found ships,
// never the ship mask.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::board::Board;
use crate::common::BoardError;
use crate::grid::{Coord, Grid, RegionShape};
use crate::outcome::{Outcome, Shot};
use crate::weapons::choose;

type BB = BitBoard<u128>;

/// Opponent skill tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(BoardError::InvalidConfig("difficulty must be easy, medium or hard")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// What the hard opponent does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AdvancedTargeting,
    StealthScan,
    /// Self-defense is not modelled; resolves to advanced targeting.
    DefensiveFallback,
}

impl Strategy {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll = rng.random::<f64>();
        if roll < 0.6 {
            Strategy::AdvancedTargeting
        } else if roll < 0.9 {
            Strategy::StealthScan
        } else {
            Strategy::DefensiveFallback
        }
    }
}

/// Footprint for advanced targeting: lines are preferred for coverage.
pub fn sample_shape<R: Rng + ?Sized>(rng: &mut R) -> RegionShape {
    let roll = rng.random::<f64>();
    if roll < 0.3 {
        RegionShape::Square(2)
    } else if roll < 0.65 {
        RegionShape::Row
    } else {
        RegionShape::Column
    }
}

/// Per-opponent memory: cells it considers resolved, confirmed hits, and the
/// hunt queue of cells next to hits.
#[derive(Debug, Clone)]
pub struct AiMemory {
    grid: Grid,
    shots: BB,
    hits: Vec<Coord>,
    hunt: VecDeque<Coord>,
}

impl AiMemory {
    pub fn new(grid: Grid) -> Result<Self, BoardError> {
        Ok(Self {
            grid,
            shots: BB::try_new(grid.size())?,
            hits: Vec::new(),
            hunt: VecDeque::new(),
        })
    }

    pub fn reset(&mut self) {
        self.shots.clear_all();
        self.hits.clear();
        self.hunt.clear();
    }

    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    pub fn hunt_queue(&self) -> &VecDeque<Coord> {
        &self.hunt
    }

    pub fn shots(&self) -> BB {
        self.shots
    }

    /// Remember `coord` as resolved.
    pub fn mark(&mut self, coord: Coord) -> Result<(), BoardError> {
        self.shots.set(coord.row, coord.col)?;
        Ok(())
    }

    /// A cell neither we nor the board consider resolved.
    pub fn is_open(&self, coord: Coord, board: &Board) -> bool {
        !self.shots.contains(coord.row, coord.col) && !board.is_shot(coord)
    }

    /// Every open cell in row-major order.
    pub fn open_cells(&self, board: &Board) -> Vec<Coord> {
        board.grid().coords().filter(|c| self.is_open(*c, board)).collect()
    }

    /// Queue the axis neighbours of `hit` we have not shot or queued yet.
    pub fn enqueue_neighbors(&mut self, hit: Coord) {
        for n in self.grid.neighbors(hit) {
            if !self.shots.contains(n.row, n.col) && !self.hunt.contains(&n) {
                self.hunt.push_back(n);
            }
        }
    }

    /// Front of the hunt queue, skipping cells resolved since they were queued.
    pub fn next_hunt_target(&mut self, board: &Board) -> Option<Coord> {
        while let Some(c) = self.hunt.pop_front() {
            if self.is_open(c, board) {
                return Some(c);
            }
        }
        None
    }

    /// Fold a resolved shot back into memory. Fails if the shot names a
    /// cell outside this memory's grid.
    pub fn observe(&mut self, shot: &Shot) -> Result<(), BoardError> {
        match &shot.outcome {
            Outcome::Hit { coord, .. } => {
                self.mark(*coord)?;
                self.hits.push(*coord);
            }
            Outcome::AlreadyFound { coord } => self.mark(*coord)?,
            Outcome::Miss {
                coord: Some(coord), ..
            } => self.mark(*coord)?,
            // Clear can only come from a region without live ships.
            Outcome::Clear => {
                for c in &shot.region {
                    self.mark(*c)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Uniform pick among open cells.
pub fn random_open_cell<R: Rng + ?Sized>(memory: &AiMemory, board: &Board, rng: &mut R) -> Option<Coord> {
    choose(&memory.open_cells(board), rng)
}

/// Open cell drawn with weight `max(1, N - manhattan(cell, center))`.
pub fn center_weighted_cell<R: Rng + ?Sized>(memory: &AiMemory, board: &Board, rng: &mut R) -> Option<Coord> {
    let grid = board.grid();
    let center = grid.center();
    let weighted: Vec<(Coord, usize)> = memory
        .open_cells(board)
        .into_iter()
        .map(|c| (c, grid.size().saturating_sub(c.manhattan(center)).max(1)))
        .collect();
    let total: usize = weighted.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let threshold = rng.random_range(0..total);
    let mut cumulative = 0;
    for (c, w) in &weighted {
        cumulative += w;
        if threshold < cumulative {
            return Some(*c);
        }
    }
    weighted.last().map(|(c, _)| *c)
}

/// Candidate with the most open cells for `shape`; the first one wins ties.
/// Returns the candidate's full region and its score.
pub fn best_region(memory: &AiMemory, board: &Board, shape: RegionShape) -> (Vec<Coord>, usize) {
    let grid = board.grid();
    let anchors: Vec<Coord> = match shape {
        RegionShape::Row => (0..grid.size()).map(|r| Coord::new(r, 0)).collect(),
        RegionShape::Column => (0..grid.size()).map(|c| Coord::new(0, c)).collect(),
        RegionShape::Square(size) => grid.square_anchors(size).collect(),
    };
    let mut best: (Vec<Coord>, usize) = (Vec::new(), 0);
    let mut best_score = None;
    for anchor in anchors {
        let region = grid.region(anchor, shape);
        let score = region.iter().filter(|c| memory.is_open(**c, board)).count();
        if best_score.map_or(true, |s| score > s) {
            best_score = Some(score);
            best = (region, score);
        }
    }
    best
}

/// A random 2×2 window fully on the grid.
pub fn random_scan_window<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Vec<Coord> {
    let anchors: Vec<Coord> = grid.square_anchors(2).collect();
    match choose(&anchors, rng) {
        Some(anchor) => grid.region(anchor, RegionShape::Square(2)),
        // 1×1 grid: the whole board is the window.
        None => grid.region(Coord::new(0, 0), RegionShape::Square(2)),
    }
}
