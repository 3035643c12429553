use thiserror::Error;

use super::game_state::GameStateBuilderError;

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum GameStateError {
    #[error("Action code {0} is not fold (-1), check/call (0), or a positive bet")]
    InvalidActionCode(i32),
    #[error("Seat {actual} acted but seat {expected} is to act")]
    ActionOutOfTurn { expected: usize, actual: usize },
    #[error("A bet of {amount} doesn't call {to_call} and isn't all in")]
    BetSizeDoesntCall { amount: u32, to_call: u32 },
    #[error("Can't act after the hand is over")]
    HandComplete,
    #[error("Only heads-up play is supported, found {0} players")]
    UnsupportedConfiguration(usize),
    #[error("Seat {0} doesn't exist")]
    InvalidSeat(usize),
    #[error("The hand hasn't reached showdown")]
    NotAtShowdown,
    #[error("Chip accounting broken: {0}")]
    InternalInvariantViolation(String),
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HoldemSimulationError {
    #[error("Builder needs a game state")]
    NeedGameState,

    #[error("Builder needs one agent per seat, expected {expected} got {actual}")]
    NeedAgents { expected: usize, actual: usize },

    #[error("The deck ran out of cards")]
    DeckExhausted,

    #[error(transparent)]
    GameState(#[from] GameStateError),

    #[error(transparent)]
    Builder(#[from] GameStateBuilderError),
}
