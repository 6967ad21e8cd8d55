use rand::Rng;

use super::pick;
use crate::goban::Goban;
use crate::stone::Stone;
use crate::turn::Move;

/// Uniform choice among all legal placements.
pub(super) fn choose<R: Rng + ?Sized>(goban: &Goban, stone: Stone, rng: &mut R) -> Move {
    pick(&goban.legal_moves(stone), rng).unwrap_or(Move::Pass)
}
