use rand::Rng;
use rand::seq::IndexedRandom;

use super::{pick, random};
use crate::goban::Goban;
use crate::stone::Stone;
use crate::turn::Move;

/// Fill a liberty of the opponent group with the fewest liberties. Equally
/// weak groups are chosen between at random; with no target or no legal
/// liberty to fill, fall back to a random move.
pub(super) fn choose<R: Rng + ?Sized>(goban: &Goban, stone: Stone, rng: &mut R) -> Move {
    let groups = goban.groups(stone.opp());
    let fewest = groups
        .iter()
        .map(|g| g.liberties.len())
        .filter(|&n| n > 0)
        .min();

    let Some(fewest) = fewest else {
        return random::choose(goban, stone, rng);
    };

    let weakest: Vec<_> = groups
        .iter()
        .filter(|g| g.liberties.len() == fewest)
        .collect();

    if let Some(target) = weakest.choose(rng) {
        let moves: Vec<_> = target
            .liberties
            .iter()
            .copied()
            .filter(|&n| goban.is_legal_move(n, stone))
            .collect();
        if let Some(mv) = pick(&moves, rng) {
            return mv;
        }
    }

    random::choose(goban, stone, rng)
}
