use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Node;
use crate::ai;
use crate::config::{ChallengeLevel, GameConfig, Mode};
use crate::error::{ConfigError, GoError};
use crate::goban::{Captures, Goban, GroupEdges};
use crate::graph::BoardGraph;
use crate::stone::Stone;
use crate::territory::{self, GameResult, GameScore, TerritoryScore};
use crate::turn::{AiMove, Move, Turn};

/// Color played by the computer in vsComputer and challenge modes.
pub const COMPUTER: Stone = Stone::Red;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "stage", content = "toMove")]
pub enum Stage {
    AwaitingMove(Stone),
    GameEnded,
}

impl Stage {
    pub fn is_over(&self) -> bool {
        matches!(self, Stage::GameEnded)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::AwaitingMove(stone) => write!(f, "{stone} to play"),
            Stage::GameEnded => write!(f, "game ended"),
        }
    }
}

/// Result of a placement request, including the computer's reply if one was
/// triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayOutcome {
    pub accepted: bool,
    pub captured: u32,
    pub ai_move: Option<AiMove>,
    pub game_over: bool,
    pub result: Option<GameResult>,
    pub error: Option<GoError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassOutcome {
    pub game_over: bool,
    pub result: Option<GameResult>,
    pub ai_move: Option<AiMove>,
}

/// Owned copy of everything a host needs to draw the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub stones: Vec<Option<Stone>>,
    pub captures: Captures,
    pub stage: Stage,
    pub result: Option<GameResult>,
    pub last_ai_move: Option<AiMove>,
}

/// Notifications pushed to the host as the game progresses.
pub trait GameObserver {
    fn on_ai_move(&mut self, _ai_move: &AiMove) {}

    /// `score` is present when the game ended by two passes, absent when a
    /// capture target decided it.
    fn on_game_end(&mut self, _result: GameResult, _score: Option<&GameScore>) {}

    fn on_level_completed(&mut self, _level: ChallengeLevel) {}
}

/// Turn and game controller. Owns the board, the capture counters and the
/// pass flag; in computer modes it answers every Blue action with a Red move
/// before returning.
pub struct Engine {
    graph: Arc<BoardGraph>,
    config: GameConfig,
    goban: Goban,
    captures: Captures,
    /// Most recent action by either side; decides turn order and double pass.
    last_turn: Option<Turn>,
    result: Option<GameResult>,
    score: Option<GameScore>,
    last_ai_move: Option<AiMove>,
    rng: StdRng,
    observers: Vec<Box<dyn GameObserver>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("captures", &self.captures)
            .field("stage", &self.stage())
            .field("result", &self.result)
            .field("last_ai_move", &self.last_ai_move)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(graph: Arc<BoardGraph>, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            mode = %config.mode,
            "new game"
        );
        Ok(Engine {
            goban: Goban::new(Arc::clone(&graph)),
            graph,
            config,
            captures: Captures::new(),
            last_turn: None,
            result: None,
            score: None,
            last_ai_move: None,
            rng: seeded_rng(&config),
            observers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    // -- Accessors --

    pub fn graph(&self) -> &Arc<BoardGraph> {
        &self.graph
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn stone_at(&self, node: Node) -> Option<Stone> {
        self.goban.stone_at(node)
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn last_ai_move(&self) -> Option<AiMove> {
        self.last_ai_move
    }

    pub fn last_turn(&self) -> Option<Turn> {
        self.last_turn
    }

    /// Blue opens; afterwards the color that did not act last is to move.
    pub fn current_turn_stone(&self) -> Stone {
        self.last_turn.map_or(Stone::Blue, |t| t.stone.opp())
    }

    pub fn stage(&self) -> Stage {
        if self.result.is_some() {
            Stage::GameEnded
        } else {
            Stage::AwaitingMove(self.current_turn_stone())
        }
    }

    pub fn is_legal(&self, node: Node, stone: Stone) -> bool {
        self.goban.is_legal_move(node, stone)
    }

    pub fn group_edges(&self, node: Node) -> GroupEdges {
        self.goban.group_edges(node)
    }

    /// Territory of the current position, computed on demand.
    pub fn territory(&self) -> TerritoryScore {
        territory::score_territory(&self.goban)
    }

    /// Territory plus captures for both colors. Once the game has ended by
    /// two passes this is the score that decided it.
    pub fn final_score(&self) -> GameScore {
        match self.score {
            Some(score) => score,
            None => territory::final_score(&self.territory(), &self.captures),
        }
    }

    pub fn state(&self) -> BoardSnapshot {
        BoardSnapshot {
            stones: (0..self.goban.node_count())
                .map(|n| self.goban.stone_at(n))
                .collect(),
            captures: self.captures,
            stage: self.stage(),
            result: self.result,
            last_ai_move: self.last_ai_move,
        }
    }

    // -- Game actions --

    pub fn place_stone(&mut self, node: Node, stone: Stone) -> PlayOutcome {
        if self.result.is_some() {
            return PlayOutcome {
                game_over: true,
                result: self.result,
                error: Some(GoError::GameOver),
                ..Default::default()
            };
        }

        let captured = match self.apply_play(node, stone) {
            Ok(captured) => captured,
            Err(err) => {
                debug!(%stone, node, %err, "placement rejected");
                return PlayOutcome {
                    error: Some(err),
                    ..Default::default()
                };
            }
        };

        let ai_move = self.reply_to(stone);
        self.announce_end();

        PlayOutcome {
            accepted: true,
            captured,
            ai_move,
            game_over: self.result.is_some(),
            result: self.result,
            error: None,
        }
    }

    pub fn pass(&mut self, stone: Stone) -> PassOutcome {
        if self.result.is_some() {
            return PassOutcome {
                game_over: true,
                result: self.result,
                ai_move: None,
            };
        }

        self.apply_pass(stone);
        let ai_move = self.reply_to(stone);
        self.announce_end();

        PassOutcome {
            game_over: self.result.is_some(),
            result: self.result,
            ai_move,
        }
    }

    /// Back to an empty board with the same graph and configuration.
    pub fn restart(&mut self) {
        self.goban = Goban::new(Arc::clone(&self.graph));
        self.captures = Captures::new();
        self.last_turn = None;
        self.result = None;
        self.score = None;
        self.last_ai_move = None;
        self.rng = seeded_rng(&self.config);
        debug!("game restarted");
    }

    // -- Internals --

    fn apply_play(&mut self, node: Node, stone: Stone) -> Result<u32, GoError> {
        let (goban, captures) = self.goban.play(node, stone)?;
        let captured = captures.get(stone);

        self.goban = goban;
        self.captures.add(stone, captured);
        self.last_turn = Some(Turn::play(stone, node));
        debug!(%stone, node, captured, "stone placed");

        self.check_capture_target(stone);
        Ok(captured)
    }

    fn apply_pass(&mut self, stone: Stone) {
        debug!(%stone, "pass");
        let double = self.last_turn.is_some_and(|t| t.is_pass());
        self.last_turn = Some(Turn::pass(stone));
        if double && self.passes_end_game() {
            let score = territory::final_score(&self.territory(), &self.captures);
            self.finish(score.result(), Some(score));
        }
    }

    /// Capture races against the computer only end on their target.
    fn passes_end_game(&self) -> bool {
        !self.config.mode.has_computer()
            || self.config.effective_win_condition().capture_target().is_none()
    }

    fn check_capture_target(&mut self, stone: Stone) {
        if !self.config.mode.has_computer() {
            return;
        }
        let Some(target) = self.config.effective_win_condition().capture_target() else {
            return;
        };
        if self.captures.get(stone) >= target {
            self.finish(GameResult::won_by(stone), None);
        }
    }

    fn finish(&mut self, result: GameResult, score: Option<GameScore>) {
        self.result = Some(result);
        self.score = score;
    }

    /// Let the computer answer a Blue action when the mode has one and the
    /// game is still running. The computer always plays Red.
    fn reply_to(&mut self, mover: Stone) -> Option<AiMove> {
        if self.result.is_some() || !self.config.mode.has_computer() || mover == COMPUTER {
            return None;
        }

        let stone = COMPUTER;
        let strategy = self.config.effective_strategy();
        let mut mv = ai::choose_move(strategy, &self.goban, stone, &mut self.rng);

        let captured = match mv {
            Move::Play(node) => {
                debug_assert!(
                    self.goban.is_legal_move(node, stone),
                    "{strategy} chose illegal node {node}"
                );
                match self.apply_play(node, stone) {
                    Ok(captured) => captured,
                    // Strategies draw from legal moves; fall back to a pass regardless.
                    Err(err) => {
                        debug!(%strategy, node, %err, "computer move rejected, passing");
                        mv = Move::Pass;
                        self.apply_pass(stone);
                        0
                    }
                }
            }
            Move::Pass => {
                self.apply_pass(stone);
                0
            }
        };

        let ai_move = AiMove {
            stone,
            mv,
            captured,
        };
        debug!(%strategy, %stone, %mv, captured, "computer replied");

        self.last_ai_move = Some(ai_move);
        for observer in &mut self.observers {
            observer.on_ai_move(&ai_move);
        }
        Some(ai_move)
    }

    fn announce_end(&mut self) {
        let Some(result) = self.result else {
            return;
        };

        match &self.score {
            Some(score) => info!(
                %result,
                blue = score.blue.total(),
                red = score.red.total(),
                "game over by passes"
            ),
            None => info!(
                %result,
                blue_captures = self.captures.blue,
                red_captures = self.captures.red,
                "game over by captures"
            ),
        }

        for observer in &mut self.observers {
            observer.on_game_end(result, self.score.as_ref());
        }

        if let (Mode::Challenge, Some(level), GameResult::BlueWins) =
            (self.config.mode, self.config.level, result)
        {
            info!(%level, "challenge level completed");
            for observer in &mut self.observers {
                observer.on_level_completed(level);
            }
        }
    }
}

fn seeded_rng(config: &GameConfig) -> StdRng {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    StdRng::seed_from_u64(seed)
}
