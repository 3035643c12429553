use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::arena::{action::ActionCode, game_state::GameState};

use super::{Agent, AgentGenerator};

/// A calling station. Checks when it can and calls anything else.
///
/// This is also the fallback `SharkAgent` hands decisions to once its own
/// charts and heuristics run out.
#[derive(Debug, Clone)]
pub struct FishAgent {
    name: String,
}

impl FishAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FishAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        FishAgent::new(format!("FishAgent-{idx}"))
    }
}

impl Agent for FishAgent {
    fn act(&mut self, game_state: &GameState) -> ActionCode {
        trace!(
            agent_name = %self.name,
            to_call = game_state.to_call(),
            "check or call"
        );
        ActionCode::CHECK_OR_CALL
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Default Generator for `FishAgent`.
#[derive(Debug, Clone, Default)]
pub struct FishAgentGenerator {
    name: Option<String>,
}

impl FishAgentGenerator {
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
            .unwrap_or_else(|| format!("FishAgent-{player_idx}"))
    }
}

impl AgentGenerator for FishAgentGenerator {
    fn generate(&self, player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(FishAgent::new(self.resolve_name(player_idx)))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::arena::{
        GameStateBuilder, HoldemSimulationBuilder, game_state::Street,
        test_util::assert_valid_game_state,
    };

    use super::*;

    #[test]
    fn test_fish_generator_names() {
        let game_state = GameStateBuilder::new()
            .stacks(vec![100, 100])
            .big_blind(10)
            .build()
            .unwrap();
        assert_eq!(
            "FishAgent-1",
            FishAgentGenerator::new().generate(1, &game_state).name()
        );
        assert_eq!(
            "Nemo",
            FishAgentGenerator::with_name("Nemo")
                .generate(0, &game_state)
                .name()
        );
    }

    #[test_log::test]
    fn test_two_fish_check_it_down() {
        let game_state = GameStateBuilder::new()
            .stacks(vec![1000, 1000])
            .blinds(10, 5)
            .build()
            .unwrap();
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![
                Box::new(FishAgent::new("fish-0")),
                Box::new(FishAgent::new("fish-1")),
            ])
            .build()
            .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        sim.run(&mut rng).unwrap();

        assert_eq!(Street::Complete, sim.game_state.street);
        assert_eq!(Street::Showdown, sim.game_state.street_before);
        assert_eq!(5, sim.game_state.board.len());
        assert_eq!(20, sim.game_state.player_winnings.iter().sum::<u32>());
        assert_valid_game_state(&sim.game_state);
    }
}
