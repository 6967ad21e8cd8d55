pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod goban;
pub mod graph;
pub mod stone;
pub mod territory;
pub mod turn;

/// Index of a board node, `0..node_count`.
pub type Node = usize;

pub use ai::choose_move;
pub use config::{ChallengeLevel, GameConfig, Mode, Strategy, WinCondition};
pub use engine::{BoardSnapshot, COMPUTER, Engine, GameObserver, PassOutcome, PlayOutcome, Stage};
pub use error::{ConfigError, GoError, GraphError};
pub use goban::{Captures, Goban, Group, GroupEdges};
pub use graph::BoardGraph;
pub use stone::{Owner, Stone};
pub use territory::{GameResult, GameScore, TerritoryScore, score_territory};
pub use turn::{AiMove, Move, Turn};
