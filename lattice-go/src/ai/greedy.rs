use rand::Rng;

use super::{pick, random};
use crate::Node;
use crate::goban::Goban;
use crate::stone::Stone;
use crate::turn::Move;

/// Legal placement with its outcome, simulated once per candidate.
struct Candidate {
    node: Node,
    captured: u32,
    /// Liberties of the placed stone's group after captures.
    liberties: usize,
}

/// Priority cascade; the first tier with any candidate wins:
/// capture the most stones, rescue a group in atari, press an opponent group
/// with one to three liberties (fewest first), expand safely, or play randomly.
pub(super) fn choose<R: Rng + ?Sized>(goban: &Goban, stone: Stone, rng: &mut R) -> Move {
    let candidates = simulate(goban, stone);
    if candidates.is_empty() {
        return Move::Pass;
    }

    let tiers = [
        capturing(&candidates),
        rescuing(goban, stone, &candidates),
        pressing(goban, stone, &candidates),
        safe(&candidates),
    ];

    for tier in tiers {
        if let Some(mv) = pick(&tier, rng) {
            return mv;
        }
    }

    random::choose(goban, stone, rng)
}

fn simulate(goban: &Goban, stone: Stone) -> Vec<Candidate> {
    goban
        .empty_nodes()
        .into_iter()
        .filter_map(|node| {
            let (after, captures) = goban.play(node, stone).ok()?;
            Some(Candidate {
                node,
                captured: captures.get(stone),
                liberties: after.liberties(node).len(),
            })
        })
        .collect()
}

/// Moves capturing the largest number of stones.
fn capturing(candidates: &[Candidate]) -> Vec<Node> {
    let best = candidates.iter().map(|c| c.captured).max().unwrap_or(0);
    if best == 0 {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|c| c.captured == best)
        .map(|c| c.node)
        .collect()
}

/// The lone liberty of an own group in atari, when filling it leaves the
/// group with more than one liberty.
fn rescuing(goban: &Goban, stone: Stone, candidates: &[Candidate]) -> Vec<Node> {
    let mut moves = Vec::new();
    for group in goban.groups(stone) {
        let [liberty] = group.liberties[..] else {
            continue;
        };
        let saves = candidates
            .iter()
            .any(|c| c.node == liberty && c.liberties > 1);
        if saves && !moves.contains(&liberty) {
            moves.push(liberty);
        }
    }
    moves
}

/// Liberties of the most threatened opponent groups (one to three liberties),
/// skipping any move that leaves the mover with at most one liberty.
fn pressing(goban: &Goban, stone: Stone, candidates: &[Candidate]) -> Vec<Node> {
    let mut threats: Vec<(usize, Node)> = Vec::new();

    for group in goban.groups(stone.opp()) {
        let count = group.liberties.len();
        if !(1..=3).contains(&count) {
            continue;
        }
        for &liberty in &group.liberties {
            let safe = candidates
                .iter()
                .any(|c| c.node == liberty && c.liberties > 1);
            if safe {
                threats.push((count, liberty));
            }
        }
    }

    let Some(fewest) = threats.iter().map(|&(count, _)| count).min() else {
        return Vec::new();
    };
    let mut moves: Vec<Node> = threats
        .into_iter()
        .filter(|&(count, _)| count == fewest)
        .map(|(_, node)| node)
        .collect();
    moves.sort_unstable();
    moves.dedup();
    moves
}

fn safe(candidates: &[Candidate]) -> Vec<Node> {
    candidates
        .iter()
        .filter(|c| c.liberties > 1)
        .map(|c| c.node)
        .collect()
}
