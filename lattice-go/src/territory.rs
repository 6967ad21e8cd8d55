use std::collections::BTreeMap;

use serde::Serialize;

use crate::Node;
use crate::goban::{Captures, Goban};
use crate::stone::{Owner, Stone};

/// Empty-node counts per owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TerritoryCounts {
    pub blue: u32,
    pub red: u32,
    pub neutral: u32,
}

impl TerritoryCounts {
    pub fn get(&self, owner: Owner) -> u32 {
        match owner {
            Owner::Blue => self.blue,
            Owner::Red => self.red,
            Owner::Neutral => self.neutral,
        }
    }

    fn add(&mut self, owner: Owner, count: u32) {
        match owner {
            Owner::Blue => self.blue += count,
            Owner::Red => self.red += count,
            Owner::Neutral => self.neutral += count,
        }
    }
}

/// Territory counts plus a label for every empty node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TerritoryScore {
    pub counts: TerritoryCounts,
    pub ownership: BTreeMap<Node, Owner>,
}

/// Flood-fill every maximal empty region. A region bordered by exactly one
/// color belongs to it; no border or a mixed border makes it neutral.
pub fn score_territory(goban: &Goban) -> TerritoryScore {
    let mut score = TerritoryScore::default();
    let mut visited = vec![false; goban.node_count()];

    for start in 0..goban.node_count() {
        if visited[start] || goban.stone_at(start).is_some() {
            continue;
        }

        let mut region = Vec::new();
        let mut border: Option<Stone> = None;
        let mut mixed = false;
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            region.push(node);

            for &n in goban.neighbors(node) {
                match goban.stone_at(n) {
                    None if !visited[n] => stack.push(n),
                    None => {}
                    Some(s) => match border {
                        None => border = Some(s),
                        Some(b) if b != s => mixed = true,
                        Some(_) => {}
                    },
                }
            }
        }

        let owner = match border {
            Some(stone) if !mixed => Owner::from(stone),
            _ => Owner::Neutral,
        };

        score.counts.add(owner, region.len() as u32);
        for node in region {
            score.ownership.insert(node, owner);
        }
    }

    score
}

/// Per-color score breakdown: territory (empty nodes) and captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerPoints {
    pub territory: u32,
    pub captures: u32,
}

impl PlayerPoints {
    pub fn total(&self) -> u32 {
        self.territory + self.captures
    }
}

/// Full score breakdown for both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameScore {
    pub blue: PlayerPoints,
    pub red: PlayerPoints,
}

impl GameScore {
    /// The strictly higher total wins; equal totals tie.
    pub fn result(&self) -> GameResult {
        let blue = self.blue.total();
        let red = self.red.total();
        if blue > red {
            GameResult::BlueWins
        } else if red > blue {
            GameResult::RedWins
        } else {
            GameResult::Tie
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    BlueWins,
    RedWins,
    Tie,
}

impl GameResult {
    pub fn winner(&self) -> Option<Stone> {
        match self {
            GameResult::BlueWins => Some(Stone::Blue),
            GameResult::RedWins => Some(Stone::Red),
            GameResult::Tie => None,
        }
    }

    pub fn won_by(stone: Stone) -> Self {
        match stone {
            Stone::Blue => GameResult::BlueWins,
            Stone::Red => GameResult::RedWins,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::BlueWins => write!(f, "Blue wins"),
            GameResult::RedWins => write!(f, "Red wins"),
            GameResult::Tie => write!(f, "Tie"),
        }
    }
}

/// Final score: territory + captures for each color.
pub fn final_score(territory: &TerritoryScore, captures: &Captures) -> GameScore {
    GameScore {
        blue: PlayerPoints {
            territory: territory.counts.blue,
            captures: captures.get(Stone::Blue),
        },
        red: PlayerPoints {
            territory: territory.counts.red,
            captures: captures.get(Stone::Red),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::graph::BoardGraph;

    fn path(n: usize) -> Arc<BoardGraph> {
        let edges: Vec<(Node, Node)> = (1..n).map(|i| (i - 1, i)).collect();
        Arc::new(BoardGraph::new(n, &edges).unwrap())
    }

    /// Build a goban from one char per node. 'B' = Blue, 'R' = Red, '+' = Empty.
    fn goban_from_layout(graph: Arc<BoardGraph>, layout: &str) -> Goban {
        let stones: Vec<(Node, Stone)> = layout
            .chars()
            .enumerate()
            .filter_map(|(i, c)| match c {
                'B' => Some((i, Stone::Blue)),
                'R' => Some((i, Stone::Red)),
                _ => None,
            })
            .collect();
        Goban::from_stones(graph, &stones).unwrap()
    }

    // -- Territory --

    #[test]
    fn empty_board_all_neutral() {
        let goban = Goban::new(path(5));
        let score = score_territory(&goban);
        assert_eq!(score.counts.neutral, 5);
        assert_eq!(score.counts.blue, 0);
        assert!(score.ownership.values().all(|&o| o == Owner::Neutral));
        assert_eq!(score.ownership.len(), 5);
    }

    #[test]
    fn region_behind_single_wall_is_owned() {
        let goban = goban_from_layout(path(5), "++B+R");
        let score = score_territory(&goban);
        assert_eq!(score.counts.blue, 2);
        assert_eq!(score.counts.neutral, 1);
        assert_eq!(score.ownership[&0], Owner::Blue);
        assert_eq!(score.ownership[&1], Owner::Blue);
        assert_eq!(score.ownership[&3], Owner::Neutral);
        assert!(!score.ownership.contains_key(&2));
    }

    #[test]
    fn dame_between_colors() {
        let goban = goban_from_layout(path(7), "+B+++R+");
        let score = score_territory(&goban);
        assert_eq!(score.counts.blue, 1);
        assert_eq!(score.counts.red, 1);
        assert_eq!(score.counts.neutral, 3);
    }

    #[test]
    fn single_node_region_is_labelled() {
        let goban = goban_from_layout(path(3), "R+R");
        let score = score_territory(&goban);
        assert_eq!(score.counts.red, 1);
        assert_eq!(score.ownership[&1], Owner::Red);
    }

    #[test]
    fn isolated_empty_node_is_neutral() {
        let graph = Arc::new(BoardGraph::new(3, &[(0, 1)]).unwrap());
        let goban = goban_from_layout(graph, "B++");
        let score = score_territory(&goban);
        assert_eq!(score.ownership[&1], Owner::Blue);
        assert_eq!(score.ownership[&2], Owner::Neutral);
    }

    #[test]
    fn scoring_is_repeatable() {
        let goban = goban_from_layout(path(8), "+B+R++B+");
        assert_eq!(score_territory(&goban), score_territory(&goban));
    }

    // -- Final score --

    #[test]
    fn final_score_adds_captures() {
        let goban = goban_from_layout(path(5), "++B+R");
        let territory = score_territory(&goban);
        let captures = Captures { blue: 0, red: 3 };
        let score = final_score(&territory, &captures);
        assert_eq!(score.blue.total(), 2);
        assert_eq!(score.red.total(), 3);
        assert_eq!(score.result(), GameResult::RedWins);
    }

    #[test]
    fn equal_totals_tie() {
        let score = final_score(&TerritoryScore::default(), &Captures::new());
        assert_eq!(score.result(), GameResult::Tie);
        assert_eq!(score.result().winner(), None);
    }

    #[test]
    fn result_display_and_json() {
        assert_eq!(GameResult::BlueWins.to_string(), "Blue wins");
        assert_eq!(
            serde_json::to_string(&GameResult::RedWins).unwrap(),
            "\"red_wins\""
        );
        assert_eq!(GameResult::won_by(Stone::Red), GameResult::RedWins);
    }
}
