//! Computer move selection.
//!
//! Every strategy draws its candidates from [`Goban::legal_moves`], so a
//! strategy passes exactly when the side to move has no legal placement.
//! Random, attack and greedy break ties with the supplied RNG; the minimax
//! search is deterministic and keeps the first of equally valued moves.

mod attack;
mod greedy;
pub mod minimax;
mod random;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::Node;
use crate::config::Strategy;
use crate::goban::Goban;
use crate::stone::Stone;
use crate::turn::Move;

pub use minimax::{SearchStats, evaluate};

/// Pick a move for `stone` on `goban` with the given strategy.
pub fn choose_move<R: Rng + ?Sized>(
    strategy: Strategy,
    goban: &Goban,
    stone: Stone,
    rng: &mut R,
) -> Move {
    match strategy {
        Strategy::Random => random::choose(goban, stone, rng),
        Strategy::Attack => attack::choose(goban, stone, rng),
        Strategy::Greedy => greedy::choose(goban, stone, rng),
        Strategy::Advanced => minimax::choose(goban, stone).0,
    }
}

fn pick<R: Rng + ?Sized>(nodes: &[Node], rng: &mut R) -> Option<Move> {
    nodes.choose(rng).copied().map(Move::Play)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::graph::BoardGraph;

    const ALL: [Strategy; 4] = [
        Strategy::Random,
        Strategy::Attack,
        Strategy::Greedy,
        Strategy::Advanced,
    ];

    #[test]
    fn every_strategy_passes_without_legal_moves() {
        let graph = Arc::new(BoardGraph::new(1, &[]).unwrap());
        let goban = Goban::new(graph);
        let mut rng = StdRng::seed_from_u64(1);
        for strategy in ALL {
            assert_eq!(choose_move(strategy, &goban, Stone::Red, &mut rng), Move::Pass);
        }
    }

    #[test]
    fn every_strategy_plays_the_only_legal_move() {
        // Path 0-1-2 with Blue on 0 and Red on 1 leaves a single empty node.
        let graph = Arc::new(BoardGraph::new(3, &[(0, 1), (1, 2)]).unwrap());
        let goban = Goban::from_stones(graph, &[(0, Stone::Blue), (1, Stone::Red)]).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for strategy in ALL {
            assert_eq!(
                choose_move(strategy, &goban, Stone::Red, &mut rng),
                Move::Play(2),
                "{strategy}"
            );
        }
    }
}
