//! Historians are handed every `Action` a simulation produces, in order,
//! along with the `GameState` right after it happened.
//!
//! They are the way to watch a hand play out: record it, count things, or
//! check invariants from tests.
mod failing;
mod null;
mod vec;

use std::cell::BorrowMutError;

use thiserror::Error;

use crate::arena::GameState;
use crate::arena::action::Action;

pub use failing::FailingHistorian;
pub use null::NullHistorian;
pub use vec::{HistoryRecord, VecHistorian};

#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("History storage is already borrowed: {0}")]
    BorrowMutError(#[from] BorrowMutError),
}

/// Something that wants to see every action in a hand.
///
/// Returning an error takes the historian out of the simulation, or panics
/// when the simulation was built with `panic_on_historian_error`.
pub trait Historian {
    fn record_action(
        &mut self,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError>;
}
