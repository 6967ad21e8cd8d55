//! Lattice-Arena: pit two move strategies against each other on a board
//! graph loaded from JSON.
//!
//! Blue is driven from here with its own strategy; Red is the engine's
//! computer opponent, so every game runs through the full controller.
//!
//! ## Usage
//!
//! - `lattice-arena board.json` - 10 games, greedy Blue against random Red
//! - `lattice-arena board.json --blue advanced --red attack --win capture3`
//! - `lattice-arena board.json --level 2` - play challenge level 2

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{RngExt, SeedableRng};
use rand::rngs::StdRng;
use tracing::{debug, info};

use lattice_go::{
    BoardGraph, ChallengeLevel, Engine, GameConfig, GameResult, Move, Stone, Strategy,
    WinCondition, choose_move,
};

/// Lattice-Arena: automated matches on a graph Go board
#[derive(Parser, Debug)]
#[command(name = "lattice-arena")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board graph JSON: `{ "nodes": N, "edges": [[a, b], ...] }`
    graph: PathBuf,

    /// Strategy playing Blue
    #[arg(long, default_value = "greedy")]
    blue: Strategy,

    /// Strategy of the computer opponent (Red)
    #[arg(long, default_value = "random")]
    red: Strategy,

    /// capture1, capture3 or territory
    #[arg(long, default_value = "territory")]
    win: WinCondition,

    /// Play a challenge level instead; overrides --red and --win
    #[arg(long)]
    level: Option<u8>,

    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Blue actions per game before it is abandoned
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Base seed; game `i` uses `seed + i` for both sides
    #[arg(long)]
    seed: Option<u64>,

    /// Print the tally as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    blue: u32,
    red: u32,
    ties: u32,
    unfinished: u32,
    blue_captures: u32,
    red_captures: u32,
}

impl Tally {
    fn record(&mut self, engine: &Engine) {
        match engine.result() {
            Some(GameResult::BlueWins) => self.blue += 1,
            Some(GameResult::RedWins) => self.red += 1,
            Some(GameResult::Tie) => self.ties += 1,
            None => self.unfinished += 1,
        }
        let captures = engine.captures();
        self.blue_captures += captures.blue;
        self.red_captures += captures.red;
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "blue": self.blue,
            "red": self.red,
            "ties": self.ties,
            "unfinished": self.unfinished,
            "captures": { "blue": self.blue_captures, "red": self.red_captures },
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lattice_arena=info,lattice_go=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.graph)
        .with_context(|| format!("reading {}", cli.graph.display()))?;
    let graph = BoardGraph::from_json(&text)
        .with_context(|| format!("parsing board graph {}", cli.graph.display()))?;
    let graph = Arc::new(graph);

    let config = match cli.level {
        Some(level) => GameConfig::challenge(ChallengeLevel::new(level)?),
        None => GameConfig::vs_computer(cli.win, cli.red),
    };

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        blue = %cli.blue,
        red = %config.effective_strategy(),
        win = %config.effective_win_condition(),
        games = cli.games,
        "starting arena"
    );

    let base_seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut tally = Tally::default();

    for game in 0..cli.games {
        let seed = base_seed.wrapping_add(u64::from(game));
        let engine = play_game(&graph, config.with_seed(seed), cli.blue, seed, cli.max_turns)
            .with_context(|| format!("game {game}"))?;
        info!(
            game,
            result = %engine.result().map_or("unfinished".to_string(), |r| r.to_string()),
            blue_captures = engine.captures().blue,
            red_captures = engine.captures().red,
            "game finished"
        );
        tally.record(&engine);
    }

    if cli.json {
        println!("{}", tally.to_json());
    } else {
        println!(
            "Blue ({}) {} - {} Red ({}), {} ties, {} unfinished",
            cli.blue,
            tally.blue,
            tally.red,
            config.effective_strategy(),
            tally.ties,
            tally.unfinished
        );
        println!(
            "Captures: Blue {}, Red {}",
            tally.blue_captures, tally.red_captures
        );
    }

    Ok(())
}

/// Play one game: Blue chooses with `blue`, the engine answers for Red.
fn play_game(
    graph: &Arc<BoardGraph>,
    config: GameConfig,
    blue: Strategy,
    seed: u64,
    max_turns: u32,
) -> Result<Engine> {
    let mut engine = Engine::new(Arc::clone(graph), config)?;
    let mut rng = StdRng::seed_from_u64(seed);

    for turn in 0..max_turns {
        if engine.stage().is_over() {
            break;
        }
        match choose_move(blue, engine.goban(), Stone::Blue, &mut rng) {
            Move::Play(node) => {
                let outcome = engine.place_stone(node, Stone::Blue);
                if let Some(err) = outcome.error {
                    anyhow::bail!("blue's {node} was rejected on turn {turn}: {err}");
                }
                debug!(turn, node, captured = outcome.captured, reply = ?outcome.ai_move, "blue played");
            }
            Move::Pass => {
                let outcome = engine.pass(Stone::Blue);
                debug!(turn, reply = ?outcome.ai_move, "blue passed");
            }
        }
    }

    Ok(engine)
}
