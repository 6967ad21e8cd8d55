use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Node;
use crate::error::GoError;
use crate::graph::BoardGraph;
use crate::stone::Stone;

/// Captures indexed by the color that made them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub blue: u32,
    pub red: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Blue => self.blue,
            Stone::Red => self.red,
        }
    }

    pub fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Blue => self.blue += count,
            Stone::Red => self.red += count,
        }
    }

    pub fn total(&self) -> u32 {
        self.blue + self.red
    }
}

/// A maximal connected set of same-colored stones and its liberties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub stone: Stone,
    pub stones: Vec<Node>,
    pub liberties: Vec<Node>,
}

/// A group together with the edges that highlight it: edges to empty
/// neighbors and edges joining two members (each `a < b`, listed once).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupEdges {
    pub group: Vec<Node>,
    pub liberty_edges: Vec<(Node, Node)>,
    pub internal_edges: Vec<(Node, Node)>,
}

/// Board state over a shared graph. Every game action returns a new `Goban`,
/// so lookahead never disturbs the position it started from.
#[derive(Debug, Clone, PartialEq)]
pub struct Goban {
    graph: Arc<BoardGraph>,
    board: Vec<i8>,
}

impl Goban {
    /// An empty board on `graph`.
    pub fn new(graph: Arc<BoardGraph>) -> Self {
        let board = vec![0i8; graph.node_count()];
        Goban { graph, board }
    }

    /// A board with the given stones set directly, without capture or
    /// legality processing.
    pub fn from_stones(graph: Arc<BoardGraph>, stones: &[(Node, Stone)]) -> Result<Self, GoError> {
        let mut goban = Goban::new(graph);
        for &(node, stone) in stones {
            if !goban.on_board(node) {
                return Err(GoError::NotOnBoard);
            }
            goban.set_stone(node, stone);
        }
        Ok(goban)
    }

    // -- Accessors --

    pub fn graph(&self) -> &Arc<BoardGraph> {
        &self.graph
    }

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn node_count(&self) -> usize {
        self.board.len()
    }

    pub fn stone_at(&self, node: Node) -> Option<Stone> {
        self.board.get(node).copied().and_then(Stone::from_int)
    }

    pub fn on_board(&self, node: Node) -> bool {
        node < self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|&s| s == 0)
    }

    pub fn empty_nodes(&self) -> Vec<Node> {
        (0..self.board.len())
            .filter(|&n| self.board[n] == 0)
            .collect()
    }

    pub fn stone_count(&self, stone: Stone) -> usize {
        self.board.iter().filter(|&&s| s == stone.to_int()).count()
    }

    // -- Game actions --

    /// Place a stone, resolve the opponent's captures, then reject the move if
    /// the placed stone's own group is left without liberties. Returns the new
    /// board and the stones captured by `stone`.
    pub fn play(&self, node: Node, stone: Stone) -> Result<(Goban, Captures), GoError> {
        if !self.on_board(node) {
            return Err(GoError::NotOnBoard);
        }

        if self.stone_at(node).is_some() {
            return Err(GoError::Overwrite);
        }

        let mut placed = self.clone();
        placed.set_stone(node, stone);

        let (goban, captures) = placed.resolve_captures(stone);

        if goban.liberties(node).is_empty() {
            return Err(GoError::Suicide);
        }

        Ok((goban, captures))
    }

    /// Remove every opponent group of `just_played` that has no liberties.
    /// Death is decided on this board for all groups before any removal.
    pub fn resolve_captures(&self, just_played: Stone) -> (Goban, Captures) {
        let opponent = just_played.opp();
        let mut visited = vec![false; self.board.len()];
        let mut dead = Vec::new();

        for node in 0..self.board.len() {
            if visited[node] || self.stone_at(node) != Some(opponent) {
                continue;
            }
            let chain = self.chain_from(node, &mut visited);
            if self.chain_liberties(&chain).is_empty() {
                dead.extend(chain);
            }
        }

        let mut goban = self.clone();
        for &node in &dead {
            goban.clear_stone(node);
        }

        let mut captures = Captures::new();
        captures.add(just_played, dead.len() as u32);
        (goban, captures)
    }

    pub fn is_legal_move(&self, node: Node, stone: Stone) -> bool {
        self.play(node, stone).is_ok()
    }

    /// Every node where `stone` may legally play, ascending.
    pub fn legal_moves(&self, stone: Stone) -> Vec<Node> {
        (0..self.board.len())
            .filter(|&n| self.board[n] == 0 && self.is_legal_move(n, stone))
            .collect()
    }

    // -- Graph algorithms --

    pub fn neighbors(&self, node: Node) -> &[Node] {
        self.graph.neighbors(node)
    }

    /// Flood-fill connected group of same-colored stones. Empty for an empty node.
    pub fn chain(&self, node: Node) -> Vec<Node> {
        let mut visited = vec![false; self.board.len()];
        self.chain_from(node, &mut visited)
    }

    /// Get the liberties of a single stone's connected group.
    pub fn liberties(&self, node: Node) -> Vec<Node> {
        let chain = self.chain(node);
        self.chain_liberties(&chain)
    }

    /// Get the liberties of a chain (pre-computed group of nodes).
    pub fn chain_liberties(&self, chain: &[Node]) -> Vec<Node> {
        let mut seen = vec![false; self.board.len()];
        let mut libs = Vec::new();
        for &p in chain {
            for &n in self.neighbors(p) {
                if !seen[n] && self.board[n] == 0 {
                    seen[n] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    /// All groups of `stone`, in order of their lowest node, each computed once.
    pub fn groups(&self, stone: Stone) -> Vec<Group> {
        let mut visited = vec![false; self.board.len()];
        let mut groups = Vec::new();

        for node in 0..self.board.len() {
            if visited[node] || self.stone_at(node) != Some(stone) {
                continue;
            }
            let stones = self.chain_from(node, &mut visited);
            let liberties = self.chain_liberties(&stones);
            groups.push(Group {
                stone,
                stones,
                liberties,
            });
        }

        groups
    }

    /// The group at `node` with its liberty and internal edges.
    pub fn group_edges(&self, node: Node) -> GroupEdges {
        let Some(stone) = self.stone_at(node) else {
            return GroupEdges::default();
        };

        let group = self.chain(node);
        let mut liberty_edges = Vec::new();
        let mut internal_edges = Vec::new();

        for &member in &group {
            for &n in self.neighbors(member) {
                match self.stone_at(n) {
                    None => liberty_edges.push((member, n)),
                    Some(s) if s == stone && member < n => internal_edges.push((member, n)),
                    _ => {}
                }
            }
        }

        GroupEdges {
            group,
            liberty_edges,
            internal_edges,
        }
    }

    /// Chain flood-fill using a shared visited bitset.
    fn chain_from(&self, node: Node, visited: &mut [bool]) -> Vec<Node> {
        let Some(stone) = self.stone_at(node) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut stack = vec![node];

        while let Some(p) = stack.pop() {
            if visited[p] {
                continue;
            }
            visited[p] = true;
            result.push(p);
            for &n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[n] {
                    stack.push(n);
                }
            }
        }

        result
    }

    // -- Internal helpers --

    fn set_stone(&mut self, node: Node, stone: Stone) {
        if let Some(cell) = self.board.get_mut(node) {
            *cell = stone.to_int();
        }
    }

    fn clear_stone(&mut self, node: Node) {
        if let Some(cell) = self.board.get_mut(node) {
            *cell = 0;
        }
    }
}
