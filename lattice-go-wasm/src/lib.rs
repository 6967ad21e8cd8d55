use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use lattice_go::{BoardGraph, ChallengeLevel, Engine, GameConfig, GameObserver, Stone};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e.to_string()))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Validate a board graph and echo it back normalized.
/// Returns JSON: `{ nodes, edges: [[a, b], ...] }`
/// On error: `{ "error": "message" }`
#[wasm_bindgen]
pub fn parse_graph(graph_json: &str) -> String {
    match BoardGraph::from_json(graph_json) {
        Ok(graph) => to_json(&graph),
        Err(e) => error_json(&e.to_string()),
    }
}

/// Challenge levels won so far in this session.
#[derive(Default, Clone)]
struct LevelLog(Rc<RefCell<BTreeSet<u8>>>);

impl GameObserver for LevelLog {
    fn on_level_completed(&mut self, level: ChallengeLevel) {
        self.0.borrow_mut().insert(level.number());
    }
}

fn build_engine(graph_json: &str, config: GameConfig) -> Result<Engine, String> {
    let graph = BoardGraph::from_json(graph_json).map_err(|e| e.to_string())?;
    Engine::new(Arc::new(graph), config).map_err(|e| e.to_string())
}

fn parse_config(config_json: &str) -> Result<GameConfig, String> {
    if config_json.trim().is_empty() {
        return Ok(GameConfig::default());
    }
    GameConfig::from_json(config_json).map_err(|e| e.to_string())
}

/// Only the exact board values are accepted from JS.
fn parse_stone(stone: i8) -> Result<Stone, String> {
    match stone {
        1 => Ok(Stone::Blue),
        -1 => Ok(Stone::Red),
        _ => Err(format!("invalid stone: {stone}")),
    }
}

/// Seed for the computer's choices, drawn from the browser.
fn browser_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

#[wasm_bindgen]
pub struct WasmGame {
    engine: Engine,
    levels: LevelLog,
}

#[wasm_bindgen]
impl WasmGame {
    /// `graph_json`: `{ nodes, edges }`. `config_json`: `GameConfig` fields
    /// in camelCase, or an empty string for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(graph_json: &str, config_json: &str) -> Result<WasmGame, JsError> {
        let mut config = parse_config(config_json).map_err(|e| JsError::new(&e))?;
        if config.seed.is_none() {
            config.seed = Some(browser_seed());
        }
        let engine = build_engine(graph_json, config).map_err(|e| JsError::new(&e))?;
        Ok(Self::with_engine(engine))
    }

    // -- Game actions --

    /// Returns `PlayOutcome` JSON, or `{ "error": ... }` for a bad stone value.
    pub fn place_stone(&mut self, node: usize, stone: i8) -> String {
        match parse_stone(stone) {
            Ok(stone) => to_json(&self.engine.place_stone(node, stone)),
            Err(e) => error_json(&e),
        }
    }

    /// Returns `PassOutcome` JSON.
    pub fn pass(&mut self, stone: i8) -> String {
        match parse_stone(stone) {
            Ok(stone) => to_json(&self.engine.pass(stone)),
            Err(e) => error_json(&e),
        }
    }

    pub fn restart(&mut self) {
        self.engine.restart();
    }

    // -- JSON serialization (WASM boundary) --

    pub fn state_json(&self) -> String {
        to_json(&self.engine.state())
    }

    pub fn territory_json(&self) -> String {
        to_json(&self.engine.territory())
    }

    pub fn score_json(&self) -> String {
        to_json(&self.engine.final_score())
    }

    /// Group under `node` with the edges to highlight on hover.
    pub fn group_edges_json(&self, node: usize) -> String {
        to_json(&self.engine.group_edges(node))
    }

    pub fn config_json(&self) -> String {
        to_json(self.engine.config())
    }

    pub fn completed_levels_json(&self) -> String {
        to_json(&*self.levels.0.borrow())
    }

    // -- Engine accessors (WASM-friendly types) --

    pub fn board(&self) -> js_sys::Int8Array {
        js_sys::Int8Array::from(self.engine.goban().board())
    }

    pub fn node_count(&self) -> usize {
        self.engine.graph().node_count()
    }

    pub fn captures_blue(&self) -> u32 {
        self.engine.captures().get(Stone::Blue)
    }

    pub fn captures_red(&self) -> u32 {
        self.engine.captures().get(Stone::Red)
    }

    pub fn is_legal(&self, node: usize, stone: i8) -> bool {
        parse_stone(stone).is_ok_and(|stone| self.engine.is_legal(node, stone))
    }

    pub fn is_over(&self) -> bool {
        self.engine.stage().is_over()
    }

    /// Node of the computer's last placement, or -1.
    pub fn last_ai_node(&self) -> i32 {
        self.engine
            .last_ai_move()
            .and_then(|m| m.mv.node())
            .map_or(-1, |n| n as i32)
    }
}

impl WasmGame {
    fn with_engine(mut engine: Engine) -> Self {
        let levels = LevelLog::default();
        engine.subscribe(Box::new(levels.clone()));
        WasmGame { engine, levels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH4: &str = r#"{"nodes": 4, "edges": [[0, 1], [1, 2], [2, 3]]}"#;

    fn game(config_json: &str) -> WasmGame {
        let config = parse_config(config_json).unwrap();
        WasmGame::with_engine(build_engine(PATH4, config).unwrap())
    }

    fn json(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn parse_graph_normalizes_edges() {
        let out = json(&parse_graph(r#"{"nodes": 3, "edges": [[1, 0], [0, 1], [2, 1]]}"#));
        assert_eq!(out, serde_json::json!({"nodes": 3, "edges": [[0, 1], [1, 2]]}));
    }

    #[test]
    fn parse_graph_reports_errors() {
        let out = json(&parse_graph(r#"{"nodes": 2, "edges": [[0, 5]]}"#));
        assert!(out["error"].is_string());
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse_config("  ").unwrap(), GameConfig::default());
        assert!(parse_config(r#"{"mode": "challenge"}"#).is_err());
    }

    #[test]
    fn place_stone_reports_capture() {
        let mut game = game(r#"{"mode": "explore"}"#);
        game.place_stone(1, 1);
        game.place_stone(2, -1);
        let out = json(&game.place_stone(3, 1));
        assert_eq!(out["accepted"], true);
        assert_eq!(out["captured"], 1);
        assert_eq!(out["gameOver"], false);
        assert_eq!(game.captures_blue(), 1);
    }

    #[test]
    fn rejected_move_carries_reason() {
        let mut game = game(r#"{"mode": "explore"}"#);
        game.place_stone(0, 1);
        let out = json(&game.place_stone(0, -1));
        assert_eq!(out["accepted"], false);
        assert_eq!(out["error"], "overwrite");
    }

    #[test]
    fn bad_stone_value_is_an_error() {
        let mut game = game("");
        let out = json(&game.place_stone(0, 3));
        assert!(out["error"].as_str().unwrap().contains("invalid stone"));
        assert!(!game.is_legal(0, 0));
    }

    #[test]
    fn computer_reply_is_reported() {
        let mut game = game(r#"{"mode": "vsComputer", "aiStrategy": "random", "seed": 4}"#);
        let out = json(&game.place_stone(0, 1));
        assert_eq!(out["aiMove"]["stone"], -1);
        assert!(game.last_ai_node() >= 0 || out["aiMove"]["mv"]["kind"] == "pass");
    }

    #[test]
    fn challenge_win_is_recorded() {
        let mut game = game(r#"{"mode": "challenge", "level": 1, "seed": 2}"#);
        // Blue plays until someone captures; level 1 ends on the first capture.
        for node in 0..4 {
            if game.is_over() {
                break;
            }
            game.place_stone(node, 1);
        }
        let state = json(&game.state_json());
        let levels = json(&game.completed_levels_json());
        if state["result"] == "blue_wins" {
            assert_eq!(levels, serde_json::json!([1]));
        } else {
            assert_eq!(levels, serde_json::json!([]));
        }
    }

    #[test]
    fn restart_clears_board() {
        let mut game = game(r#"{"mode": "explore"}"#);
        game.place_stone(1, 1);
        game.restart();
        let state = json(&game.state_json());
        assert_eq!(state["stones"], serde_json::json!([null, null, null, null]));
    }
}
