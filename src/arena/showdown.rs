use std::cmp::Ordering;

use crate::core::{Card, HoleCards, Rank, rank_cards};

/// Decides who wins once the cards are on their backs.
///
/// `Greater` means the first hand wins, `Less` the second, and `Equal` is a
/// split.
pub trait ShowdownEvaluator {
    fn compare(&self, first: &HoleCards, second: &HoleCards, board: &[Card]) -> Ordering;
}

/// Compares the best five card hands with [`rank_cards`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RankEvaluator;

impl RankEvaluator {
    pub fn rank(hole: &HoleCards, board: &[Card]) -> Rank {
        let mut cards = Vec::with_capacity(7);
        cards.extend_from_slice(hole.cards());
        cards.extend_from_slice(board);
        rank_cards(&cards)
    }
}

impl ShowdownEvaluator for RankEvaluator {
    fn compare(&self, first: &HoleCards, second: &HoleCards, board: &[Card]) -> Ordering {
        Self::rank(first, board).cmp(&Self::rank(second, board))
    }
}
