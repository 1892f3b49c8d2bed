use quantum_battleship::{AiPlayer, Difficulty, GameConfig, GameEngine, GameStatus, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

const MAX_TURNS: usize = 1000;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if !(2..=4).contains(&args.len()) {
        eprintln!("Usage: {} <seed> [first-difficulty] [second-difficulty]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let difficulty = |i: usize| -> anyhow::Result<Difficulty> {
        match args.get(i) {
            Some(s) => s.parse().map_err(|e| anyhow::anyhow!("{}", e)),
            None => Ok(Difficulty::Hard),
        }
    };
    let (first, second) = (difficulty(2)?, difficulty(3)?);

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(GameConfig::default()).map_err(|e| anyhow::anyhow!(e))?;
    engine.place_fleets_randomly(&mut rng);
    let mut p1 = AiPlayer::new(first, engine.board(Side::Second)).map_err(|e| anyhow::anyhow!(e))?;
    let mut p2 = AiPlayer::new(second, engine.board(Side::First)).map_err(|e| anyhow::anyhow!(e))?;

    while engine.status() == GameStatus::InProgress && engine.turns() < MAX_TURNS {
        let player = match engine.current() {
            Side::First => &mut p1,
            Side::Second => &mut p2,
        };
        engine
            .play_turn(player, &mut rng)
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    let winner = match engine.status() {
        GameStatus::Won(side) => Some(side.to_string()),
        GameStatus::InProgress => None,
    };
    let result = json!({
        "seed": seed,
        "player1": {"difficulty": first.to_string(), "stats": engine.stats(Side::First)},
        "player2": {"difficulty": second.to_string(), "stats": engine.stats(Side::Second)},
        "turns": engine.turns(),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
