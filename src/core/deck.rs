use rand::Rng;

use super::{Card, Suit, Value};

/// The cards not yet dealt in a hand.
///
/// Dealing picks a uniformly random remaining card with the rng that the
/// caller passes in, so a seeded rng gives a repeatable deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    /// A full 52 card deck.
    fn default() -> Self {
        let cards = Value::values()
            .into_iter()
            .flat_map(|v| Suit::suits().into_iter().map(move |s| Card::new(v, s)))
            .collect();
        Self { cards }
    }
}

impl Deck {
    /// An empty deck. Mostly useful with `insert` in tests.
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn insert(&mut self, card: Card) -> bool {
        if self.contains(&card) {
            false
        } else {
            self.cards.push(card);
            true
        }
    }

    /// Take a known card out of the deck. Returns false if it wasn't there.
    pub fn remove(&mut self, card: &Card) -> bool {
        if let Some(idx) = self.cards.iter().position(|c| c == card) {
            self.cards.swap_remove(idx);
            true
        } else {
            false
        }
    }

    /// Deal one random card, or `None` once the deck is empty.
    pub fn deal<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.cards.len());
        Some(self.cards.swap_remove(idx))
    }
}
