use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::arena::{action::ActionCode, game_state::GameState};

use super::{Agent, AgentGenerator};

/// An agent that gives up every hand at the first chance.
#[derive(Debug, Clone)]
pub struct FoldingAgent {
    name: String,
}

impl FoldingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FoldingAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        FoldingAgent::new(format!("FoldingAgent-{idx}"))
    }
}

impl Agent for FoldingAgent {
    fn act(&mut self, game_state: &GameState) -> ActionCode {
        trace!(agent_name = %self.name, street = %game_state.street, "folding");
        ActionCode::FOLD
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Default Generator for `FoldingAgent`.
#[derive(Debug, Clone, Default)]
pub struct FoldingAgentGenerator {
    name: Option<String>,
}

impl FoldingAgentGenerator {
    pub fn new() -> Self {
        Self { name: None }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    fn resolve_name(&self, player_idx: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("FoldingAgent-{player_idx}"))
    }
}

impl AgentGenerator for FoldingAgentGenerator {
    fn generate(&self, player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(FoldingAgent::new(self.resolve_name(player_idx)))
    }
}
