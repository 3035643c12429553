use super::{Historian, HistorianError};
use crate::arena::{GameState, action::Action};

/// A no-op historian that discards all recorded actions.
///
/// Useful when you need a historian but don't care about the history.
pub struct NullHistorian;

impl Historian for NullHistorian {
    fn record_action(
        &mut self,
        _game_state: &GameState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        Ok(())
    }
}
