use anyhow::Context;
use broadside::{Board, GameEngine, GameStatus, Side, Strategy};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

#[derive(Serialize)]
struct SideSummary {
    strategy: &'static str,
    shots: usize,
    ships_left: usize,
}

#[derive(Serialize)]
struct Summary {
    player1: SideSummary,
    player2: SideSummary,
    rounds: usize,
    winner: Option<&'static str>,
}

fn main() -> anyhow::Result<()> {
    broadside::init_logging(None);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse().context("seed1 must be an integer")?;
    let seed2: u64 = args[2].parse().context("seed2 must be an integer")?;

    // Each seed fixes one fleet; the first also drives play.
    let mut rngs = [SmallRng::seed_from_u64(seed1), SmallRng::seed_from_u64(seed2)];
    let mut cpus = [Strategy::Targeting, Strategy::Targeting].map(Strategy::into_player);
    let mut boards = [Board::new(), Board::new()];
    for ((cpu, board), rng) in cpus.iter_mut().zip(boards.iter_mut()).zip(rngs.iter_mut()) {
        cpu.place_ships(rng, board)?;
    }
    let names = [cpus[0].name(), cpus[1].name()];
    let [rng, _] = rngs;

    let mut engine = GameEngine::new(boards, cpus.map(Some), rng)?;
    while !engine.is_game_finished() {
        engine.cpu_shoot()?;
    }

    let summarize = |side: Side| SideSummary {
        strategy: names[side.index()],
        shots: engine.shots(side),
        ships_left: engine.board(side).ships_remaining(),
    };
    let winner = match engine.status() {
        GameStatus::Won(Side::One) => Some("player1"),
        GameStatus::Won(Side::Two) => Some("player2"),
        GameStatus::Draw | GameStatus::InProgress => None,
    };
    let summary = Summary {
        player1: summarize(Side::One),
        player2: summarize(Side::Two),
        rounds: engine.round(),
        winner,
    };

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
