use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use naval_duel::{
    init_logging, ui, Coordinate, GameConfig, GameSession, GameState, SessionError, ShotCommand,
    Side, OPPONENT_DELAY_MS,
};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FirstTurn {
    Player,
    Opponent,
}

impl From<FirstTurn> for Side {
    fn from(turn: FirstTurn) -> Self {
        match turn {
            FirstTurn::Player => Side::Player,
            FirstTurn::Opponent => Side::Opponent,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the automated opponent, typing targets such as `C4`.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = OPPONENT_DELAY_MS, help = "Opponent answer delay in milliseconds")]
        delay_ms: u64,
        #[arg(long, value_enum, default_value_t = FirstTurn::Player)]
        first: FirstTurn,
    },
    /// Let random shots play the human side until one fleet is sunk.
    Auto {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0, help = "Opponent answer delay in milliseconds")]
        delay_ms: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            delay_ms,
            first,
        } => {
            let config = config_for(seed, delay_ms).with_first_turn(first.into());
            let session = GameSession::new(config).map_err(|e| anyhow::anyhow!(e))?;
            play(&session).await?;
            session.shutdown().await;
        }
        Commands::Auto { seed, delay_ms } => {
            let config = config_for(seed, delay_ms);
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s.wrapping_add(1)),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let session = GameSession::new(config).map_err(|e| anyhow::anyhow!(e))?;
            let state = auto_play(&session, &mut rng).await?;
            println!("{}", ui::render_state(&state));
            match state.winner() {
                Some(side) => println!("Winner: {}", side),
                None => println!("No winner"),
            }
            session.shutdown().await;
        }
    }
    Ok(())
}

fn config_for(seed: Option<u64>, delay_ms: u64) -> GameConfig {
    let config = GameConfig::default().with_opponent_delay(Duration::from_millis(delay_ms));
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            config.with_seed(s)
        }
        None => config,
    }
}

/// Wait until the player holds the turn again or the game is decided.
async fn await_player_turn(session: &GameSession) -> anyhow::Result<GameState> {
    let mut rx = session.subscribe();
    let state = rx
        .wait_for(|s| s.turn == Side::Player || s.winner().is_some())
        .await
        .map_err(|_| anyhow::anyhow!(SessionError::Closed))?
        .clone();
    Ok(state)
}

async fn play(session: &GameSession) -> anyhow::Result<()> {
    let board_size = session.state().player.grid.size();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let state = await_player_turn(session).await?;
        println!("\n{}", ui::render_state(&state));
        if let Some(side) = state.winner() {
            println!("Game over, {} wins. Type `reset` for a new game or `quit`.", side);
        } else {
            println!("Target (e.g. C4), `reset` or `quit`:");
        }

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let input = line.trim();
        match input {
            "quit" | "q" => return Ok(()),
            "reset" => {
                session.reset(Side::Player).await.map_err(|e| anyhow::anyhow!(e))?;
                continue;
            }
            _ => {}
        }
        let at: Coordinate = match input.parse() {
            Ok(at) => at,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if !at.in_bounds(board_size) {
            println!("{} is off the board", at);
            continue;
        }
        match session.shoot(ShotCommand::new(Side::Player, at)).await {
            Ok(()) => {}
            Err(SessionError::Shot(e)) => println!("{}", e),
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
    }
}

async fn auto_play(session: &GameSession, rng: &mut SmallRng) -> anyhow::Result<GameState> {
    loop {
        let state = await_player_turn(session).await?;
        if state.winner().is_some() {
            return Ok(state);
        }
        let targets: Vec<Coordinate> = state.targets_for(Side::Player).collect();
        let Some(&at) = targets.choose(rng) else {
            return Ok(state);
        };
        session
            .shoot(ShotCommand::new(Side::Player, at))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    }
}
