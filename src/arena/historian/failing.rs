use tracing::warn;

use super::{Historian, HistorianError};
use crate::arena::{GameState, action::Action};

/// A historian that will always fail to record an action
/// and will return an error.
///
/// This historian is useful for testing the behavior of the simulation
pub struct FailingHistorian;

impl Historian for FailingHistorian {
    fn record_action(
        &mut self,
        _game_state: &GameState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        warn!("FailingHistorian intentionally returning error");
        Err(HistorianError::UnableToRecordAction)
    }
}
