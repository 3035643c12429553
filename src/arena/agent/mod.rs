//! `Agent`s are the automatic players in the heads-up simulations. Each one
//! looks at the `GameState` and answers with an `ActionCode`.
//!
//! `SharkAgent` plays the range charts preflop and a simple continuation
//! bet heuristic on the flop. The others are baselines for testing.
mod config;
mod fish;
mod folding;
mod generator;
mod replay;
mod shark;

use crate::arena::{GameState, action::ActionCode};

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to implement the logic and state.
///
/// Agents only ever see the acting player's own hole cards through
/// `GameState::acting_player`. They must not read the opponent's.
pub trait Agent {
    /// This is the method that will be called by the game to get the action
    fn act(&mut self, game_state: &GameState) -> ActionCode;

    fn name(&self) -> &str;
}

pub use config::{AgentConfig, AgentConfigError, ConfigAgentGenerator};
pub use fish::{FishAgent, FishAgentGenerator};
pub use folding::{FoldingAgent, FoldingAgentGenerator};
pub use generator::AgentGenerator;
pub use replay::VecReplayAgent;
pub use shark::{SharkAgent, SharkAgentGenerator, SharkSizing};
