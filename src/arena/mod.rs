//! The heads-up arena: a betting engine, agents that play it, and
//! simulations that drive hands between agents.
//!
//! - [`GameState`] is the engine. It owns every chip, validates each
//!   `ActionCode`, and moves the hand from street to street.
//! - [`Agent`] is a decision policy. `SharkAgent` plays range charts
//!   preflop, the others are baselines.
//! - [`HoldemSimulation`] plays one hand and reports every step to its
//!   [`Historian`]s. [`HeadsUpSession`] plays hands until someone busts.

/// `ActionCode` and the events historians see.
pub mod action;
/// Agents and the generators that build them.
pub mod agent;
/// Engine and simulation errors.
pub mod errors;
/// The betting engine.
pub mod game_state;
/// Observers of simulated hands.
pub mod historian;
mod holdem_simulation;
mod session;
mod showdown;
mod sim_builder;

#[cfg(any(test, feature = "arena-test-util"))]
pub mod test_util;

pub use agent::{Agent, AgentGenerator};
pub use game_state::{GameState, GameStateBuilder, Player, Street};
pub use historian::{Historian, HistorianError};
pub use holdem_simulation::HoldemSimulation;
pub use session::{HeadsUpSession, SessionResult};
pub use showdown::{RankEvaluator, ShowdownEvaluator};
pub use sim_builder::HoldemSimulationBuilder;
