use crate::arena::{Agent, GameState};

/// Builds a fresh agent for every hand of a session.
pub trait AgentGenerator {
    /// Called before each hand. `player_idx` is the seat the agent will
    /// play from.
    fn generate(&self, player_idx: usize, game_state: &GameState) -> Box<dyn Agent>;
}
