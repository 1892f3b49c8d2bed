use alloc::vec::Vec;
use rand::RngCore;

use crate::ai::{self, AiMemory, Difficulty, Strategy};
use crate::board::Board;
use crate::common::BoardError;
use crate::grid::Coord;
use crate::outcome::{Outcome, Shot, Weapon};

/// A weapon aimed at a region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub weapon: Weapon,
    pub region: Vec<Coord>,
}

impl Action {
    pub fn new(weapon: Weapon, region: Vec<Coord>) -> Self {
        Self { weapon, region }
    }

    /// Search shot on a single cell.
    pub fn search_cell(coord: Coord) -> Self {
        Self::new(Weapon::Search, alloc::vec![coord])
    }
}

/// Interface implemented by anything that picks actions for one side.
pub trait Player {
    /// Choose the next action against `target`, or `None` if nothing is left
    /// to shoot at.
    fn select_action(&mut self, rng: &mut dyn RngCore, target: &Board) -> Option<Action>;

    /// Inform the player of the result of its last action.
    fn handle_shot(&mut self, _shot: &Shot) {}

    /// Forget everything for a new game.
    fn reset(&mut self) {}
}

/// Computer opponent with difficulty-tiered policies.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    memory: AiMemory,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty, board: &Board) -> Result<Self, BoardError> {
        Ok(Self {
            difficulty,
            memory: AiMemory::new(board.grid())?,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn memory(&self) -> &AiMemory {
        &self.memory
    }

    fn fallback(&self, rng: &mut dyn RngCore, target: &Board) -> Option<Action> {
        ai::random_open_cell(&self.memory, target, rng).map(Action::search_cell)
    }

    fn advanced_targeting(&self, rng: &mut dyn RngCore, target: &Board) -> Option<Action> {
        let shape = ai::sample_shape(rng);
        let (region, score) = ai::best_region(&self.memory, target, shape);
        log::debug!("ai: {:?} targeting, {} open cells", shape, score);
        let open: Vec<Coord> = region
            .into_iter()
            .filter(|c| self.memory.is_open(*c, target))
            .collect();
        if open.is_empty() {
            return self.fallback(rng, target);
        }
        Some(Action::new(Weapon::Search, open))
    }

    fn stealth_scan(&self, rng: &mut dyn RngCore, target: &Board) -> Option<Action> {
        let window = ai::random_scan_window(target.grid(), rng);
        if window.iter().all(|c| target.is_shot(*c)) {
            return self.fallback(rng, target);
        }
        Some(Action::new(Weapon::Scan, window))
    }

    /// Pick, fire and learn in one go against `board`.
    ///
    /// A rejected action makes the opponent write the region off and fire a
    /// random open cell instead, so a turn only fails when nothing is open.
    pub fn take_turn(&mut self, board: &mut Board, rng: &mut dyn RngCore) -> Result<Shot, BoardError> {
        let action = self
            .select_action(rng, board)
            .ok_or(BoardError::AlreadyScanned)?;
        let shot = match board.fire(&action.region, action.weapon, rng) {
            Ok(shot) => shot,
            Err(BoardError::AlreadyScanned | BoardError::InvalidRegion) => {
                log::debug!("ai: region rejected, falling back to a random cell");
                for c in &action.region {
                    if board.is_shot(*c) {
                        self.memory.mark(*c)?;
                    }
                }
                let retry = self.fallback(rng, board).ok_or(BoardError::AlreadyScanned)?;
                board.fire(&retry.region, retry.weapon, rng)?
            }
            Err(e) => return Err(e),
        };
        self.handle_shot(&shot);
        Ok(shot)
    }
}

impl Player for AiPlayer {
    fn select_action(&mut self, rng: &mut dyn RngCore, target: &Board) -> Option<Action> {
        match self.difficulty {
            Difficulty::Easy => self.fallback(rng, target),
            Difficulty::Medium => match self.memory.next_hunt_target(target) {
                Some(c) => Some(Action::search_cell(c)),
                None => ai::center_weighted_cell(&self.memory, target, rng).map(Action::search_cell),
            },
            Difficulty::Hard => {
                let strategy = Strategy::sample(rng);
                log::debug!("ai: strategy {:?}", strategy);
                match strategy {
                    Strategy::StealthScan => self.stealth_scan(rng, target),
                    Strategy::AdvancedTargeting | Strategy::DefensiveFallback => {
                        self.advanced_targeting(rng, target)
                    }
                }
            }
        }
    }

    fn handle_shot(&mut self, shot: &Shot) {
        if let Err(e) = self.memory.observe(shot) {
            log::warn!("ai: ignoring shot outside the grid: {}", e);
            return;
        }
        if self.difficulty == Difficulty::Medium {
            if let Outcome::Hit { coord, .. } = shot.outcome {
                self.memory.enqueue_neighbors(coord);
            }
        }
    }

    fn reset(&mut self) {
        self.memory.reset();
    }
}
