//! Two-ply alpha-beta search over a pruned move list.
//!
//! Every legal move is scored statically, the best [`CANDIDATES`] are
//! searched, and each simulated position considers at most [`BRANCH_LIMIT`]
//! replies, pre-ranked by the same evaluation from the replying side's view.
//! Captures are carried along each simulated line so the evaluation can
//! reward what a line wins and penalize what it loses.

use tracing::trace;

use crate::Node;
use crate::goban::{Captures, Goban};
use crate::stone::Stone;
use crate::turn::Move;

pub const CANDIDATES: usize = 5;
pub const BRANCH_LIMIT: usize = 8;
/// Plies searched from the root, the candidate move included.
pub const SEARCH_DEPTH: u32 = 2;
pub const CAPTURE_WEIGHT: i32 = 1000;

/// Counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited below the root.
    pub nodes: u64,
    /// Sibling lists abandoned by an alpha-beta cutoff.
    pub cutoffs: u64,
}

/// A simulated move with the position and captures it leads to.
struct Line {
    node: Node,
    goban: Goban,
    captures: Captures,
    score: i32,
}

/// Pick the best move for `stone`. Deterministic: of equally valued
/// candidates, the first in static-score order wins.
pub fn choose(goban: &Goban, stone: Stone) -> (Move, SearchStats) {
    let mut stats = SearchStats::default();

    let mut candidates = successors(goban, stone, &Captures::new());
    candidates.truncate(CANDIDATES);

    let mut best: Option<(Node, i32)> = None;
    let mut alpha = i32::MIN;

    for line in &candidates {
        let value = search(
            &line.goban,
            &line.captures,
            SEARCH_DEPTH - 1,
            alpha,
            i32::MAX,
            stone,
            stone.opp(),
            &mut stats,
        );
        if best.is_none_or(|(_, v)| value > v) {
            best = Some((line.node, value));
            alpha = alpha.max(value);
        }
    }

    trace!(
        %stone,
        candidates = candidates.len(),
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        best = ?best,
        "minimax search"
    );

    let mv = best.map_or(Move::Pass, |(node, _)| Move::Play(node));
    (mv, stats)
}

/// Static score of `goban` from `stone`'s side, given the captures made so
/// far along the line that produced it.
///
/// Own groups: one liberty -50, two -20, otherwise +5 per liberty.
/// Opponent groups: one liberty +100, two +30, three +10.
pub fn evaluate(goban: &Goban, stone: Stone, captures: &Captures) -> i32 {
    let won = captures.get(stone) as i32;
    let lost = captures.get(stone.opp()) as i32;
    let mut score = CAPTURE_WEIGHT * (won - lost);

    for group in goban.groups(stone) {
        score += match group.liberties.len() {
            1 => -50,
            2 => -20,
            n => 5 * n as i32,
        };
    }

    for group in goban.groups(stone.opp()) {
        score += match group.liberties.len() {
            1 => 100,
            2 => 30,
            3 => 10,
            _ => 0,
        };
    }

    score
}

/// Every legal move for `to_move`, simulated and sorted by static score
/// from `to_move`'s side, best first. The sort is stable, so equal scores
/// keep ascending node order.
fn successors(goban: &Goban, to_move: Stone, captures: &Captures) -> Vec<Line> {
    let mut lines: Vec<Line> = goban
        .legal_moves(to_move)
        .into_iter()
        .filter_map(|node| {
            let (after, captured) = goban.play(node, to_move).ok()?;
            let mut captures = *captures;
            captures.add(to_move, captured.get(to_move));
            let score = evaluate(&after, to_move, &captures);
            Some(Line {
                node,
                goban: after,
                captures,
                score,
            })
        })
        .collect();

    lines.sort_by(|a, b| b.score.cmp(&a.score));
    lines
}

/// Minimax value of `goban` for `me` with `to_move` about to play.
#[allow(clippy::too_many_arguments)]
fn search(
    goban: &Goban,
    captures: &Captures,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    me: Stone,
    to_move: Stone,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 {
        return evaluate(goban, me, captures);
    }

    let mut replies = successors(goban, to_move, captures);
    if replies.is_empty() {
        return evaluate(goban, me, captures);
    }
    replies.truncate(BRANCH_LIMIT);

    let maximizing = to_move == me;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for line in &replies {
        let value = search(
            &line.goban,
            &line.captures,
            depth - 1,
            alpha,
            beta,
            me,
            to_move.opp(),
            stats,
        );

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(best);
        } else {
            best = best.min(value);
            beta = beta.min(best);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    best
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

    fn captures(blue: u32, red: u32) -> Captures {
        Captures { blue, red }
    }

    // -- Evaluation --

    #[test]
    fn empty_board_scores_zero() {
        let goban = Goban::new(path(4));
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), 0);
    }

    #[test]
    fn captures_dominate_evaluation() {
        let goban = Goban::new(path(4));
        assert_eq!(evaluate(&goban, Stone::Blue, &captures(2, 1)), 1000);
        assert_eq!(evaluate(&goban, Stone::Red, &captures(2, 1)), -1000);
    }

    #[test]
    fn weighs_own_liberties() {
        // Blue at 0 has one liberty, Blue at 2 has two.
        let goban = Goban::from_stones(path(5), &[(0, Stone::Blue)]).unwrap();
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), -50);

        let goban = Goban::from_stones(path(5), &[(2, Stone::Blue)]).unwrap();
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), -20);

        // Hub of a star: four liberties.
        let star = Arc::new(BoardGraph::new(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap());
        let goban = Goban::from_stones(star, &[(0, Stone::Blue)]).unwrap();
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), 20);
    }

    #[test]
    fn weighs_opponent_liberties() {
        let goban = Goban::from_stones(path(5), &[(0, Stone::Red)]).unwrap();
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), 100);

        let goban = Goban::from_stones(path(5), &[(2, Stone::Red)]).unwrap();
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), 30);
    }

    #[test]
    fn evaluation_is_from_the_given_side() {
        // Blue at 0 is already enclosed by Red at 1, whose only liberty is 2.
        let goban = Goban::from_stones(path(4), &[(0, Stone::Blue), (1, Stone::Red)]).unwrap();
        assert_eq!(evaluate(&goban, Stone::Blue, &Captures::new()), 100);
        assert_eq!(evaluate(&goban, Stone::Red, &Captures::new()), -50);
    }

    // -- Search --

    #[test]
    fn passes_without_legal_moves() {
        let graph = Arc::new(BoardGraph::new(1, &[]).unwrap());
        let (mv, stats) = choose(&Goban::new(graph), Stone::Red);
        assert_eq!(mv, Move::Pass);
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn takes_a_capture() {
        // Blue at 3 breathes only through 2.
        let goban = Goban::from_stones(path(4), &[(3, Stone::Blue)]).unwrap();
        let (mv, _) = choose(&goban, Stone::Red);
        assert_eq!(mv, Move::Play(2));
    }

    #[test]
    fn prefers_the_bigger_capture() {
        let goban = Goban::from_stones(
            path(10),
            &[
                (0, Stone::Red),
                (1, Stone::Blue),
                (2, Stone::Blue),
                (7, Stone::Red),
                (8, Stone::Blue),
            ],
        )
        .unwrap();
        let (mv, _) = choose(&goban, Stone::Red);
        assert_eq!(mv, Move::Play(3));
    }

    #[test]
    fn is_deterministic() {
        let goban = Goban::from_stones(path(8), &[(2, Stone::Blue), (5, Stone::Red)]).unwrap();
        let first = choose(&goban, Stone::Blue);
        for _ in 0..5 {
            assert_eq!(choose(&goban, Stone::Blue), first);
        }
    }

    #[test]
    fn visits_opponent_replies() {
        let goban = Goban::new(path(6));
        let (mv, stats) = choose(&goban, Stone::Blue);
        assert!(matches!(mv, Move::Play(_)));
        assert!(stats.nodes >= CANDIDATES as u64);
    }

    #[test]
    fn search_stays_within_its_limits() {
        let graph = BoardGraph::from_json(include_str!("../../../boards/diamond-3.json")).unwrap();
        let goban = Goban::new(Arc::new(graph));
        assert!(goban.legal_moves(Stone::Red).len() > BRANCH_LIMIT * CANDIDATES);

        let (mv, stats) = choose(&goban, Stone::Red);
        assert!(matches!(mv, Move::Play(_)));
        assert!(stats.nodes >= CANDIDATES as u64);
        assert!(stats.nodes <= (CANDIDATES * (1 + BRANCH_LIMIT)) as u64);
    }

    #[test]
    fn looks_past_a_move_that_loses_its_stone() {
        // Red at 2 puts both Blue stones in atari but is taken at once from 3.
        // Red at 4 or 5 is taken from 6. Red at 6 keeps three liberties.
        let graph = Arc::new(
            BoardGraph::new(
                7,
                &[(0, 2), (0, 4), (1, 2), (1, 5), (2, 3), (3, 6), (4, 6), (5, 6)],
            )
            .unwrap(),
        );
        let goban = Goban::from_stones(graph, &[(0, Stone::Blue), (1, Stone::Blue)]).unwrap();

        let ranked = successors(&goban, Stone::Red, &Captures::new());
        assert_eq!(ranked[0].node, 2);
        assert_eq!(ranked[0].score, 150);

        let (mv, _) = choose(&goban, Stone::Red);
        assert_eq!(mv, Move::Play(6));
    }

    #[test]
    fn leaves_input_untouched() {
        let goban = Goban::from_stones(path(4), &[(3, Stone::Blue)]).unwrap();
        let before = goban.clone();
        let _ = choose(&goban, Stone::Red);
        assert_eq!(goban, before);
    }
}
