#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use quantum_battleship::{
    init_logging, AiPlayer, Amplification, Difficulty, GameConfig, GameEngine, GameStatus, Grid,
    Side, DEFAULT_GRID_SIZE, DEFAULT_SHIP_COUNT,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Level {
    Easy,
    Medium,
    Hard,
}

#[cfg(feature = "std")]
impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Watch two computer opponents play a match on the local machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
        grid_size: usize,
        #[arg(long, default_value_t = DEFAULT_SHIP_COUNT)]
        ships: usize,
        #[arg(long, value_enum, default_value_t = Level::Hard)]
        first: Level,
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        second: Level,
        #[arg(long, default_value_t = 500)]
        max_turns: usize,
        #[arg(long, help = "Print both boards after every turn")]
        show_boards: bool,
    },
    /// Print amplification iterations and hit odds for a grid.
    Odds {
        #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
        grid_size: usize,
        #[arg(long, default_value_t = 8)]
        max_marked: usize,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            seed,
            grid_size,
            ships,
            first,
            second,
            max_turns,
            show_boards,
        } => {
            let config = GameConfig::with_grid(grid_size, ships);
            run_local(config, seed, first.into(), second.into(), max_turns, show_boards)?;
        }
        Commands::Odds {
            grid_size,
            max_marked,
        } => print_odds(grid_size, max_marked)?,
    }
    Ok(())
}

#[cfg(feature = "std")]
fn run_local(
    config: GameConfig,
    seed: Option<u64>,
    first: Difficulty,
    second: Difficulty,
    max_turns: usize,
    show_boards: bool,
) -> anyhow::Result<()> {
    println!("Starting local AI vs AI game ({} vs {})...", first, second);
    let mut rng = if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let mut engine = GameEngine::new(config).map_err(|e| anyhow::anyhow!(e))?;
    let config = engine.config();
    println!(
        "{}x{} grid, {} ships per side, shields of strength {} for {} round(s)",
        config.grid_size,
        config.grid_size,
        config.ship_count,
        config.shield_strength,
        config.shield_duration
    );
    for (side, placement) in [Side::First, Side::Second]
        .into_iter()
        .zip(engine.place_fleets_randomly(&mut rng))
    {
        if !placement.is_complete() {
            println!("{}: only {} ships placed", side, placement.ships().len());
        }
    }
    let mut players = [
        AiPlayer::new(first, engine.board(Side::Second)).map_err(|e| anyhow::anyhow!(e))?,
        AiPlayer::new(second, engine.board(Side::First)).map_err(|e| anyhow::anyhow!(e))?,
    ];

    while engine.status() == GameStatus::InProgress && engine.turns() < max_turns {
        let idx = match engine.current() {
            Side::First => 0,
            Side::Second => 1,
        };
        let report = match engine.play_turn(&mut players[idx], &mut rng) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("{} cannot move: {}", engine.current(), e);
                break;
            }
        };
        log::info!(
            "turn {:>3} {} [{}] {}",
            engine.turns(),
            report.side,
            report.shot.weapon.method(),
            report.shot
        );
        for coord in &report.expired {
            log::debug!("shield at {} expired", coord);
        }
        if show_boards {
            println!("{}", engine.board(Side::First));
            println!("{}", engine.board(Side::Second));
        }
    }

    println!("\n=== GAME OVER after {} turns ===", engine.turns());
    for side in [Side::First, Side::Second] {
        let board = engine.board(side).stats();
        let stats = engine.stats(side);
        println!("{} fleet:", side);
        print!("{}", engine.board(side));
        println!(
            "  ships lost {}/{}, searches {}, hits {}, scans {}, shields {}, accuracy {:.1}%",
            board.ships_found,
            board.total_ships,
            stats.shots,
            stats.hits,
            stats.scans,
            stats.shields,
            stats.accuracy() * 100.0
        );
    }
    match engine.status() {
        GameStatus::Won(side) => println!("\n{} wins!", side),
        GameStatus::InProgress => println!("\nNo winner within {} turns.", max_turns),
    }
    Ok(())
}

#[cfg(feature = "std")]
fn print_odds(grid_size: usize, max_marked: usize) -> anyhow::Result<()> {
    let grid = Grid::new(grid_size).map_err(|e| anyhow::anyhow!(e))?;
    println!(
        "{}x{} grid: {} cells, {} qubits, address space {}",
        grid_size,
        grid_size,
        grid.cells(),
        grid.qubits(),
        grid.address_space()
    );
    println!("{:>4} {:>4} {:>8} {:>8}", "M", "k", "theta", "p");
    for marked in 1..=max_marked.min(grid.cells()) {
        if let Some(amp) = Amplification::new(grid.address_space(), marked) {
            println!(
                "{:>4} {:>4} {:>8.4} {:>8.4}",
                amp.marked, amp.iterations, amp.angle, amp.probability
            );
        }
    }
    Ok(())
}
