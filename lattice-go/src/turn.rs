use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Node;
use crate::stone::Stone;

/// A chosen action: a placement or a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "node")]
pub enum Move {
    Play(Node),
    Pass,
}

impl Move {
    pub fn node(&self) -> Option<Node> {
        match self {
            Move::Play(node) => Some(*node),
            Move::Pass => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(node) => write!(f, "play {node}"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// A single action taken by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub stone: Stone,
    pub mv: Move,
}

impl Turn {
    pub fn play(stone: Stone, node: Node) -> Self {
        Turn {
            stone,
            mv: Move::Play(node),
        }
    }

    pub fn pass(stone: Stone) -> Self {
        Turn {
            stone,
            mv: Move::Pass,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.mv.is_pass()
    }
}

/// What the computer did in reply, and what it captured doing so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub stone: Stone,
    pub mv: Move,
    pub captured: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_turn() {
        let t = Turn::play(Stone::Blue, 4);
        assert_eq!(t.mv.node(), Some(4));
        assert!(!t.is_pass());
    }

    #[test]
    fn pass_turn() {
        let t = Turn::pass(Stone::Red);
        assert_eq!(t.mv.node(), None);
        assert!(t.is_pass());
    }

    #[test]
    fn move_json_shape() {
        let json = serde_json::to_value(Move::Play(3)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "play", "node": 3}));
        let json = serde_json::to_value(Move::Pass).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "pass"}));
    }

    #[test]
    fn display() {
        assert_eq!(Move::Play(12).to_string(), "play 12");
        assert_eq!(Move::Pass.to_string(), "pass");
    }
}
