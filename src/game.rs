use alloc::vec::Vec;
use core::fmt;
use rand::{Rng, RngCore};

use crate::{
    board::{Board, Placement},
    common::BoardError,
    config::GameConfig,
    grid::Coord,
    outcome::{Outcome, Shot, Weapon},
    player::{Action, Player},
};

/// Seat at the table. `First` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("player1"),
            Side::Second => f.write_str("player2"),
        }
    }
}

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won(Side),
}

/// Running counters for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    /// Search shots fired.
    pub shots: usize,
    /// Ships destroyed.
    pub hits: usize,
    pub scans: usize,
    pub shields: usize,
}

impl PlayerStats {
    /// Hits per search shot, `0.0` before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.hits as f64 / self.shots as f64
        }
    }

    fn record(&mut self, shot: &Shot) {
        match shot.weapon {
            Weapon::Search => {
                self.shots += 1;
                if shot.is_hit() {
                    self.hits += 1;
                }
            }
            Weapon::Scan => self.scans += 1,
            Weapon::Shield => self.shields += 1,
        }
    }
}

/// What happened on one completed turn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub side: Side,
    pub shot: Shot,
    /// Shields on the opponent's board that ran out at the end of the turn.
    pub expired: Vec<Coord>,
    pub status: GameStatus,
}

/// Two boards and strict turn alternation.
///
/// Search and scan actions land on the opponent's board; shields go up on the
/// actor's own board. A rejected action leaves the turn where it was.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    boards: [Board; 2],
    stats: [PlayerStats; 2],
    turn: Side,
    turns: usize,
    status: GameStatus,
}

impl GameEngine {
    /// Create a match with empty boards. Call
    /// [`place_fleets_randomly`](Self::place_fleets_randomly) before playing.
    pub fn new(config: GameConfig) -> Result<Self, BoardError> {
        let board = Board::new(&config)?;
        Ok(Self {
            config,
            boards: [board.clone(), board],
            stats: [PlayerStats::default(); 2],
            turn: Side::First,
            turns: 0,
            status: GameStatus::InProgress,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board holding `side`'s fleet.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// Mutable access for hand placement.
    pub fn board_mut(&mut self, side: Side) -> &mut Board {
        &mut self.boards[side.index()]
    }

    /// Side to move.
    pub fn current(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Completed turns so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn stats(&self, side: Side) -> PlayerStats {
        self.stats[side.index()]
    }

    /// Place the configured fleet on both boards, first side first.
    pub fn place_fleets_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> [Placement; 2] {
        let count = self.config.ship_count;
        let first = self.boards[0].place_ships_randomly(count, rng);
        let second = self.boards[1].place_ships_randomly(count, rng);
        [first, second]
    }

    /// Clear everything and deal fresh fleets.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> [Placement; 2] {
        self.stats = [PlayerStats::default(); 2];
        self.turn = Side::First;
        self.turns = 0;
        self.status = GameStatus::InProgress;
        self.place_fleets_randomly(rng)
    }

    /// Resolve `action` for the side to move.
    pub fn act<R: Rng + ?Sized>(&mut self, action: &Action, rng: &mut R) -> Result<TurnReport, BoardError> {
        if self.status != GameStatus::InProgress {
            return Err(BoardError::GameOver);
        }
        let side = self.turn;
        let target = match action.weapon {
            Weapon::Shield => side,
            Weapon::Search | Weapon::Scan => side.opponent(),
        };
        let shot = self.boards[target.index()].fire(&action.region, action.weapon, rng)?;

        self.stats[side.index()].record(&shot);
        let opponent = &mut self.boards[side.opponent().index()];
        let expired = opponent.end_turn();
        if opponent.is_won() {
            self.status = GameStatus::Won(side);
            log::info!("{} wins after {} turns", side, self.turns + 1);
        }
        if let Outcome::Protected { shields } = &shot.outcome {
            log::debug!("{} raised {} shield(s)", side, shields.len());
        }
        self.turns += 1;
        self.turn = side.opponent();
        Ok(TurnReport {
            side,
            shot,
            expired,
            status: self.status,
        })
    }

    /// Ask `player` for an action as the side to move, play it and report the
    /// shot back.
    pub fn play_turn(&mut self, player: &mut dyn Player, rng: &mut dyn RngCore) -> Result<TurnReport, BoardError> {
        if self.status != GameStatus::InProgress {
            return Err(BoardError::GameOver);
        }
        let target = self.board(self.turn.opponent());
        let action = player
            .select_action(rng, target)
            .ok_or(BoardError::AlreadyScanned)?;
        let report = self.act(&action, rng)?;
        player.handle_shot(&report.shot);
        Ok(report)
    }
}
