mod common;

use common::{board_with, c, ConstRng};
use quantum_battleship::{
    Amplification, Outcome, RegionShape, ShieldLevel, Weapon, SHIELD_DAMPING,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Draws 0.3 from `random::<f64>()`: past detection, inside interaction.
const INTERACTION_WORD: u64 = 0x4CCC_CCCC_CCCC_CCCC;

#[test]
fn test_amplification_parameters() {
    let amp = Amplification::new(64, 1).unwrap();
    assert_eq!(amp.iterations, 6);
    assert!((amp.angle - 0.1253).abs() < 1e-4);
    assert!((amp.probability - 0.9966).abs() < 1e-3);

    let amp = Amplification::new(64, 4).unwrap();
    assert_eq!(amp.iterations, 3);
    assert!((amp.probability - 0.9613).abs() < 1e-3);

    let amp = Amplification::new(16, 3).unwrap();
    assert_eq!(amp.iterations, 1);
    assert!((amp.probability - 0.9492).abs() < 1e-3);

    // Everything marked still takes one round.
    let amp = Amplification::new(64, 64).unwrap();
    assert_eq!(amp.iterations, 1);
    assert!(amp.probability > 0.999);

    assert!(Amplification::new(64, 0).is_none());
    assert!(Amplification::new(4, 5).is_none());
}

#[test]
fn test_shielded_probability() {
    let amp = Amplification::new(64, 1).unwrap();
    let reduced = amp.shielded_probability(ShieldLevel::Maximum.effectiveness());
    assert!((reduced - amp.probability * (1.0 - 0.9 * SHIELD_DAMPING)).abs() < 1e-12);
    assert_eq!(amp.shielded_probability(0.0), amp.probability);
}

#[test]
fn test_search_hits_single_ship_in_square() {
    let mut board = board_with(&[(3, 3)]);
    let region = [c(2, 2), c(2, 3), c(3, 2), c(3, 3)];
    let shot = board
        .fire(&region, Weapon::Search, &mut ConstRng::zero())
        .unwrap();
    match shot.outcome {
        Outcome::Hit {
            coord,
            iterations,
            probability,
        } => {
            assert_eq!(coord, c(3, 3));
            assert_eq!(iterations, 6);
            assert!((probability - 0.9966).abs() < 1e-3);
        }
        other => panic!("expected a hit, got {:?}", other),
    }
    assert!(board.is_found(c(3, 3)));
    assert!(board.is_won());
    assert!(shot.to_string().contains("D4"));
}

#[test]
fn test_search_square_anchored_on_ship() {
    let mut board = board_with(&[(3, 3)]);
    let region = board.grid().region(c(3, 3), RegionShape::Square(2));
    assert_eq!(region, vec![c(3, 3), c(3, 4), c(4, 3), c(4, 4)]);
    let shot = board
        .fire(&region, Weapon::Search, &mut ConstRng::zero())
        .unwrap();
    assert_eq!(shot.coord(), Some(c(3, 3)));
    assert!(shot.is_hit());
    assert_eq!(shot.weapon.method(), "grover");
}

#[test]
fn test_failed_search_measures_open_water() {
    let mut board = board_with(&[(3, 3)]);
    let region = [c(2, 2), c(2, 3), c(3, 2), c(3, 3)];
    let shot = board
        .fire(&region, Weapon::Search, &mut ConstRng::ones())
        .unwrap();
    assert!(matches!(
        shot.outcome,
        Outcome::Miss {
            coord: Some(coord),
            iterations: 6,
            ..
        } if coord == c(3, 2)
    ));
    assert!(board.found().is_empty());
    assert!(board.is_shot(c(3, 2)));
}

#[test]
fn test_failed_search_on_all_ship_region_measures_nothing() {
    let mut board = board_with(&[(0, 0)]);
    let shot = board
        .fire(&[c(0, 0)], Weapon::Search, &mut ConstRng::ones())
        .unwrap();
    assert!(matches!(shot.outcome, Outcome::Miss { coord: None, .. }));
    assert!(board.shots().is_empty());
}

#[test]
fn test_scan_verdicts() {
    let region = [c(0, 0), c(0, 1), c(1, 0), c(1, 1)];

    let mut board = board_with(&[(1, 1)]);
    let shot = board.fire(&region, Weapon::Scan, &mut ConstRng::zero()).unwrap();
    assert_eq!(shot.outcome, Outcome::Detected { ship_count: 1 });
    let shot = board.fire(&region, Weapon::Scan, &mut ConstRng::ones()).unwrap();
    assert_eq!(shot.outcome, Outcome::Inconclusive);

    let mut empty = board_with(&[(7, 7)]);
    let shot = empty.fire(&region, Weapon::Scan, &mut ConstRng::zero()).unwrap();
    assert_eq!(shot.outcome, Outcome::Clear);
    let shot = empty.fire(&region, Weapon::Scan, &mut ConstRng::ones()).unwrap();
    assert_eq!(shot.outcome, Outcome::Noise);

    assert!(board.found().is_empty());
    assert!(board.shots().is_empty());
}

#[test]
fn test_scan_interaction_disturbs_region() {
    let region = [c(0, 0), c(0, 1), c(1, 0), c(1, 1)];
    let mut board = board_with(&[(1, 1), (0, 0)]);
    let shot = board
        .fire(&region, Weapon::Scan, &mut ConstRng(INTERACTION_WORD))
        .unwrap();
    assert_eq!(shot.outcome, Outcome::Interaction { ship_count: 2 });
    assert_eq!(board.disturbed().count_ones(), 4);
    assert!(board.found().is_empty());
    assert_eq!(board.live_ships().count_ones(), 2);
}

#[test]
fn test_shield_obfuscates_detection() {
    let region = [c(0, 0), c(0, 1), c(1, 0), c(1, 1)];
    let mut board = board_with(&[(1, 1)]);
    let mut rng = ConstRng::zero();
    let shield = board.protect(c(1, 1), 3, 1, &mut rng).unwrap();
    assert_eq!(shield.level, ShieldLevel::Maximum);
    let shot = board.fire(&region, Weapon::Scan, &mut rng).unwrap();
    assert_eq!(shot.outcome, Outcome::Obfuscated);
}

#[test]
fn test_scan_odds_with_ships() {
    let region = [c(0, 0), c(0, 1), c(1, 0), c(1, 1)];
    let mut board = board_with(&[(0, 1)]);
    let mut rng = SmallRng::seed_from_u64(7);
    let trials = 4000;
    let mut detected = 0;
    let mut inconclusive = 0;
    for _ in 0..trials {
        match board.fire(&region, Weapon::Scan, &mut rng).unwrap().outcome {
            Outcome::Detected { .. } => detected += 1,
            Outcome::Inconclusive => inconclusive += 1,
            Outcome::Interaction { .. } => {}
            other => panic!("unexpected scan outcome {:?}", other),
        }
    }
    let detected = detected as f64 / trials as f64;
    let inconclusive = inconclusive as f64 / trials as f64;
    assert!((detected - 0.25).abs() < 0.04, "detected rate {}", detected);
    assert!((inconclusive - 0.5).abs() < 0.04, "inconclusive rate {}", inconclusive);
}

#[test]
fn test_shield_lowers_hit_rate() {
    let mut rng = SmallRng::seed_from_u64(11);
    let trials = 2000;
    let mut hits = 0;
    let mut blocked = 0;
    for _ in 0..trials {
        let mut board = board_with(&[(4, 4)]);
        board.protect(c(4, 4), 3, 1, &mut rng).unwrap();
        match board.fire(&[c(4, 4)], Weapon::Search, &mut rng).unwrap().outcome {
            Outcome::Hit { .. } => {
                hits += 1;
                assert!(!board.shields().is_protected(c(4, 4)));
            }
            Outcome::Blocked { coord, .. } => {
                blocked += 1;
                assert_eq!(coord, c(4, 4));
                assert!(board.found().is_empty());
            }
            _ => {}
        }
    }
    let rate = hits as f64 / trials as f64;
    assert!(rate > 0.70 && rate < 0.87, "shielded hit rate {}", rate);
    assert!(blocked > 0);
}

#[test]
fn test_search_prefers_unshielded_targets() {
    let region = [c(0, 0), c(0, 1), c(1, 0), c(1, 1)];
    let mut rng = SmallRng::seed_from_u64(21);
    let mut hits = 0;
    for _ in 0..500 {
        let mut board = board_with(&[(0, 0), (0, 1)]);
        board.protect(c(0, 0), 3, 1, &mut rng).unwrap();
        let shot = board.fire(&region, Weapon::Search, &mut rng).unwrap();
        match shot.outcome {
            Outcome::Hit { coord, .. } => {
                assert_eq!(coord, c(0, 1));
                hits += 1;
            }
            Outcome::Blocked { coord, .. } => panic!("shield engaged at {}", coord),
            _ => {}
        }
        assert!(!board.is_found(c(0, 0)));
        assert!(board.shields().is_protected(c(0, 0)));
    }
    assert!(hits > 450, "unshielded hits {}", hits);
}
