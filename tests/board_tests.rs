mod common;

use common::{board_with, c, ConstRng};
use proptest::prelude::*;
use quantum_battleship::{
    Board, BoardError, Engagement, GameConfig, Outcome, Placement, Resolver, Weapon,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Resolver that always claims a hit on one cell.
struct Always(quantum_battleship::Coord);

impl Resolver for Always {
    fn weapon(&self) -> Weapon {
        Weapon::Search
    }

    fn resolve<R: Rng + ?Sized>(&self, _: &Engagement<'_>, _: &mut R) -> Outcome {
        Outcome::Hit {
            coord: self.0,
            iterations: 1,
            probability: 1.0,
        }
    }
}

#[test]
fn test_manual_placement_errors() {
    let mut board = Board::new(&GameConfig::with_grid(8, 2)).unwrap();
    board.place_ship(c(0, 0)).unwrap();
    assert_eq!(board.place_ship(c(0, 0)), Err(BoardError::ShipOverlaps));
    assert_eq!(board.place_ship(c(8, 0)), Err(BoardError::OutOfBounds));
    board.place_ship(c(1, 1)).unwrap();
    assert_eq!(board.place_ship(c(2, 2)), Err(BoardError::FleetFull));
    assert_eq!(board.ships().count_ones(), 2);
}

#[test]
fn test_random_placement_distinct() {
    let mut board = Board::new(&GameConfig::default()).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    let placement = board.place_ships_randomly(8, &mut rng);
    assert!(placement.is_complete());
    let mut ships = placement.ships().to_vec();
    ships.sort();
    ships.dedup();
    assert_eq!(ships.len(), 8);
    assert_eq!(board.ships().count_ones(), 8);
}

#[test]
fn test_random_placement_shortfall_is_reported() {
    let mut board = Board::new(&GameConfig::with_grid(2, 4)).unwrap();
    // The same cell every draw: one ship, then nothing but collisions.
    let placement = board.place_ships_randomly(4, &mut ConstRng::zero());
    assert_eq!(
        placement,
        Placement::Short {
            placed: vec![c(0, 0)],
            requested: 4
        }
    );
    assert_eq!(board.ships().count_ones(), 1);
}

#[test]
fn test_invalid_regions() {
    let mut board = board_with(&[(3, 3)]);
    let mut rng = ConstRng::zero();
    assert_eq!(
        board.fire(&[], Weapon::Search, &mut rng).unwrap_err(),
        BoardError::InvalidRegion
    );
    assert_eq!(
        board.fire(&[c(9, 9), c(8, 0)], Weapon::Scan, &mut rng).unwrap_err(),
        BoardError::InvalidRegion
    );
}

#[test]
fn test_out_of_bounds_cells_are_dropped() {
    let mut board = board_with(&[(7, 7)]);
    let shot = board
        .fire(&[c(7, 7), c(7, 8), c(7, 7)], Weapon::Search, &mut ConstRng::zero())
        .unwrap();
    assert_eq!(shot.region, vec![c(7, 7)]);
    assert!(shot.is_hit());
}

#[test]
fn test_resolved_region_is_already_scanned() {
    let mut board = board_with(&[(0, 0), (0, 1)]);
    let mut rng = ConstRng::zero();
    let shot = board.fire(&[c(0, 0)], Weapon::Search, &mut rng).unwrap();
    assert_eq!(shot.coord(), Some(c(0, 0)));
    assert_eq!(
        board.fire(&[c(0, 0)], Weapon::Search, &mut rng).unwrap_err(),
        BoardError::AlreadyScanned
    );
    // Scans are refused on fully resolved regions too.
    assert_eq!(
        board.fire(&[c(0, 0)], Weapon::Scan, &mut rng).unwrap_err(),
        BoardError::AlreadyScanned
    );
}

#[test]
fn test_hit_on_found_ship_is_already_found() {
    let mut board = board_with(&[(0, 0), (0, 1)]);
    board
        .fire(&[c(0, 0)], Weapon::Search, &mut ConstRng::zero())
        .unwrap();
    let before = board.found();

    let shot = board
        .fire_at(&[c(0, 0), c(0, 1)], &Always(c(0, 0)), &mut ConstRng::zero())
        .unwrap();
    assert_eq!(shot.outcome, Outcome::AlreadyFound { coord: c(0, 0) });
    assert_eq!(board.found(), before);
    assert!(!board.is_won());
}

#[test]
fn test_search_without_targets_never_finds() {
    let mut board = board_with(&[(7, 7)]);
    let shot = board
        .fire(&[c(0, 0), c(0, 1)], Weapon::Search, &mut ConstRng::zero())
        .unwrap();
    assert_eq!(
        shot.outcome,
        Outcome::Miss {
            coord: Some(c(0, 0)),
            iterations: 0,
            probability: 0.0
        }
    );
    assert!(board.found().is_empty());
    assert!(board.is_shot(c(0, 0)));
    assert!(!board.is_shot(c(0, 1)));
}

#[test]
fn test_win_after_all_ships_found() {
    let mut board = board_with(&[(1, 1), (5, 6)]);
    let mut rng = ConstRng::zero();
    board.fire(&[c(1, 1)], Weapon::Search, &mut rng).unwrap();
    assert!(!board.is_won());
    board.fire(&[c(5, 6)], Weapon::Search, &mut rng).unwrap();
    assert!(board.is_won());
    let stats = board.stats();
    assert_eq!(stats.ships_found, 2);
    assert_eq!(stats.ships_remaining, 0);
    assert_eq!(stats.qubits, 6);
}

#[test]
fn test_empty_fleet_is_never_won() {
    let board = Board::new(&GameConfig::with_grid(4, 0)).unwrap();
    assert!(!board.is_won());
}

#[test]
fn test_reset_clears_everything() {
    let mut board = board_with(&[(2, 2)]);
    let mut rng = ConstRng::zero();
    board.protect(c(2, 2), 3, 1, &mut rng).unwrap();
    board.fire(&[c(0, 0)], Weapon::Search, &mut rng).unwrap();
    board.reset();
    assert!(board.ships().is_empty());
    assert!(board.shots().is_empty());
    assert!(board.shields().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn found_stays_within_ships(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(&GameConfig::default()).unwrap();
        board.place_ships_randomly(8, &mut rng);
        for _ in 0..40 {
            let r = rng.random_range(0..8);
            let col = rng.random_range(0..8);
            let weapon = if rng.random_bool(0.5) { Weapon::Search } else { Weapon::Scan };
            let found = board.found().count_ones();
            match board.fire(&[c(r, col), c(r, (col + 1) % 8)], weapon, &mut rng) {
                Ok(shot) if weapon == Weapon::Scan => {
                    prop_assert_eq!(board.found().count_ones(), found);
                    prop_assert!(!shot.is_hit());
                }
                Ok(_) => {
                    prop_assert!(board.found().count_ones() <= found + 1);
                }
                Err(e) => {
                    prop_assert_eq!(e, BoardError::AlreadyScanned);
                }
            }
            prop_assert!(board.found().is_subset(&board.ships()));
            prop_assert!(board.found().is_subset(&board.shots()));
        }
    }
}
