use std::fmt;

use crate::Node;

/// Reasons a placement is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoError {
    Overwrite,
    Suicide,
    NotOnBoard,
    GameOver,
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::Overwrite => write!(f, "overwrite"),
            GoError::Suicide => write!(f, "suicide"),
            GoError::NotOnBoard => write!(f, "not on board"),
            GoError::GameOver => write!(f, "game over"),
        }
    }
}

impl std::error::Error for GoError {}

/// A board graph that violates the input contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    NodeOutOfRange {
        edge: usize,
        node: Node,
        node_count: usize,
    },
    SelfLoop {
        edge: usize,
        node: Node,
    },
    Json(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NodeOutOfRange {
                edge,
                node,
                node_count,
            } => write!(
                f,
                "edge {edge} references node {node} but the graph has {node_count} nodes"
            ),
            GraphError::SelfLoop { edge, node } => {
                write!(f, "edge {edge} joins node {node} to itself")
            }
            GraphError::Json(msg) => write!(f, "invalid graph json: {msg}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownLevel(u8),
    MissingLevel,
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownLevel(level) => write!(f, "unknown challenge level {level}"),
            ConfigError::MissingLevel => write!(f, "challenge mode requires a level"),
            ConfigError::Json(msg) => write!(f, "invalid config json: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(GoError::Suicide.to_string(), "suicide");
        assert_eq!(
            GraphError::NodeOutOfRange {
                edge: 2,
                node: 9,
                node_count: 4
            }
            .to_string(),
            "edge 2 references node 9 but the graph has 4 nodes"
        );
        assert_eq!(
            ConfigError::UnknownLevel(7).to_string(),
            "unknown challenge level 7"
        );
    }
}
