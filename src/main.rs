use std::io;
use std::path::PathBuf;

use anyhow::Context;
use broadside::{init_logging, save_layout, Board, CliSession, GameConfig, Strategy};
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); overrides BATTLESHIP_LOG.
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal.
    Play {
        /// 1 to play the computer, 2 for hot-seat. Asked when omitted.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        players: Option<u8>,
        /// Board file for player 1.
        #[arg(long)]
        p1_layout: Option<PathBuf>,
        /// Board file for player 2 or the computer.
        #[arg(long)]
        p2_layout: Option<PathBuf>,
        /// How the computer picks its shots.
        #[arg(long, value_enum, default_value_t = Strategy::Targeting)]
        strategy: Strategy,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Print the computer's probability board after each of its shots.
        #[arg(long)]
        show_probability: bool,
    },
    /// Write a random valid layout in board file format.
    ExportLayout {
        path: PathBuf,
        #[arg(long, help = "Fix RNG seed for a reproducible layout")]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Play {
            players,
            p1_layout,
            p2_layout,
            strategy,
            seed,
            show_probability,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let config = GameConfig {
                players,
                layouts: [p1_layout, p2_layout],
                strategy,
                seed,
                show_probability,
            };
            let stdin = io::stdin();
            CliSession::new(stdin.lock(), io::stdout(), config).run()?;
        }
        Commands::ExportLayout { path, seed } => {
            let config = GameConfig {
                seed,
                ..GameConfig::default()
            };
            let mut board = Board::new();
            board
                .place_randomly(&mut config.rng())
                .context("generating a random layout")?;
            save_layout(&board, &path)?;
            println!("Wrote layout to {}", path.display());
        }
    }
    Ok(())
}
