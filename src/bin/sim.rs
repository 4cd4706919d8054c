use std::time::Duration;

use naval_duel::{Coordinate, GameConfig, GameSession, Side, ShotCommand};
use rand::{rngs::SmallRng, seq::IndexedRandom, SeedableRng};
use serde_json::json;

/// Run one seeded game where random shots play the human side against the
/// automated opponent, then print a JSON summary.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <session-seed> <player-seed>", args[0]);
        std::process::exit(1);
    }
    let session_seed: u64 = args[1].parse()?;
    let player_seed: u64 = args[2].parse()?;

    let config = GameConfig::default()
        .with_seed(session_seed)
        .with_opponent_delay(Duration::ZERO);
    let session = GameSession::new(config).map_err(|e| anyhow::anyhow!(e))?;
    let mut rng = SmallRng::seed_from_u64(player_seed);
    let mut rx = session.subscribe();

    let state = loop {
        let state = rx
            .wait_for(|s| s.turn == Side::Player || s.winner().is_some())
            .await?
            .clone();
        if state.winner().is_some() {
            break state;
        }
        let targets: Vec<Coordinate> = state.targets_for(Side::Player).collect();
        let Some(&at) = targets.choose(&mut rng) else {
            break state;
        };
        session
            .shoot(ShotCommand::new(Side::Player, at))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    };

    let player = state.score(Side::Player);
    let opponent = state.score(Side::Opponent);
    let result = json!({
        "player": player,
        "opponent": opponent,
        "winner": state.winner(),
    });

    println!("{}", serde_json::to_string(&result)?);
    session.shutdown().await;
    Ok(())
}
