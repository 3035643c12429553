use tracing::{debug, instrument, trace};

use crate::arena::{action::ActionCode, game_state::GameState};

use super::Agent;

/// A replay agent that will replay a sequence of action codes from a
/// vector. Once the script runs out it answers with `default`.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    name: String,
    actions: Vec<ActionCode>,
    idx: usize,
    default: ActionCode,
}

impl VecReplayAgent {
    pub fn new(name: impl Into<String>, actions: Vec<ActionCode>) -> Self {
        Self::new_with_default(name, actions, ActionCode::FOLD)
    }

    pub fn new_with_default(
        name: impl Into<String>,
        actions: Vec<ActionCode>,
        default: ActionCode,
    ) -> Self {
        Self {
            name: name.into(),
            actions,
            idx: 0,
            default,
        }
    }
}

impl Agent for VecReplayAgent {
    #[instrument(level = "trace", skip(self, _game_state), fields(agent_name = %self.name))]
    fn act(&mut self, _game_state: &GameState) -> ActionCode {
        let idx = self.idx;
        self.idx += 1;
        if let Some(code) = self.actions.get(idx).copied() {
            trace!(idx, %code, "VecReplayAgent replaying action");
            return code;
        }
        debug!(
            idx,
            actions_len = self.actions.len(),
            default = %self.default,
            "VecReplayAgent exhausted actions, using default"
        );
        self.default
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl VecReplayAgent {
    /// How many codes have been handed out so far.
    pub fn played(&self) -> usize {
        self.idx
    }
}
