/// Card values, suits, cards, and a player's two hole cards.
mod card;
/// Export `Card`, `Value`, `Suit`, and `HoleCards`
pub use self::card::{Card, HoleCards, Suit, Value};

/// The deck that cards are dealt from.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Errors for parsing cards, hands, and ranges.
mod error;
/// Export `PokerError`
pub use self::error::PokerError;

/// Ranking of five to seven card holdings.
mod rank;
/// Export `Rank` and `rank_cards`
pub use self::rank::{Rank, rank_cards};
