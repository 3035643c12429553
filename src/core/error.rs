use thiserror::Error;

use super::Card;

/// Errors from parsing cards, hand classes, and range strings.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum PokerError {
    #[error("Unable to parse value '{0}'")]
    UnexpectedValueChar(char),
    #[error("Unable to parse suit '{0}'")]
    UnexpectedSuitChar(char),
    #[error("Card string '{0}' must be exactly a value and a suit")]
    InvalidCardString(String),
    #[error("Hole cards must be two different cards, got {0} twice")]
    DuplicateCard(Card),
    #[error("Invalid pre-flop notation: {0}")]
    InvalidPreflopNotation(String),
    #[error("Invalid range entry: {0}")]
    InvalidRange(String),
    #[error("Invalid depth {depth} for {hand}, depths must be finite and non-negative")]
    InvalidDepth { hand: String, depth: f32 },
}
