use rand::Rng;
use tracing::{debug, info, instrument};

use super::{
    AgentGenerator, GameStateBuilder, HoldemSimulationBuilder, errors::HoldemSimulationError,
    game_state::NUM_PLAYERS,
};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionResult {
    pub hands_played: usize,
    pub final_stacks: Vec<u32>,
    /// The seat holding every chip, if someone busted.
    pub winner: Option<usize>,
}

/// Plays hand after hand between two agent generators.
///
/// Stacks carry over from one hand to the next and the button moves every
/// hand. The session stops when a player has no chips left or `max_hands`
/// hands have been played. Each hand gets fresh agents from the
/// generators.
///
/// ```
/// use headsup_holdem::arena::{AgentGenerator, HeadsUpSession};
/// use headsup_holdem::arena::agent::{FishAgentGenerator, SharkAgentGenerator};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let generators: Vec<Box<dyn AgentGenerator>> = vec![
///     Box::new(SharkAgentGenerator::default().with_seed(7)),
///     Box::new(FishAgentGenerator::default()),
/// ];
/// let mut session = HeadsUpSession::new(generators, vec![1000, 1000], 10)
///     .unwrap()
///     .max_hands(50);
///
/// let result = session.run(&mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(2000, result.final_stacks.iter().sum::<u32>());
/// ```
pub struct HeadsUpSession {
    generators: Vec<Box<dyn AgentGenerator>>,
    stacks: Vec<u32>,
    big_blind: u32,
    small_blind: u32,
    dealer_idx: usize,
    max_hands: usize,
}

impl HeadsUpSession {
    pub fn new(
        generators: Vec<Box<dyn AgentGenerator>>,
        stacks: Vec<u32>,
        big_blind: u32,
    ) -> Result<Self, HoldemSimulationError> {
        if generators.len() != NUM_PLAYERS {
            return Err(HoldemSimulationError::NeedAgents {
                expected: NUM_PLAYERS,
                actual: generators.len(),
            });
        }
        // Let the game state builder reject bad stacks and blinds up front.
        GameStateBuilder::new()
            .stacks(stacks.clone())
            .big_blind(big_blind)
            .build()?;

        Ok(Self {
            generators,
            stacks,
            big_blind,
            small_blind: big_blind / 2,
            dealer_idx: 0,
            max_hands: 1000,
        })
    }

    pub fn small_blind(mut self, small_blind: u32) -> Self {
        self.small_blind = small_blind;
        self
    }

    /// Seat with the button on the first hand.
    pub fn dealer_idx(mut self, dealer_idx: usize) -> Self {
        self.dealer_idx = dealer_idx;
        self
    }

    pub fn max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    pub fn stacks(&self) -> &[u32] {
        &self.stacks
    }

    #[instrument(level = "debug", skip(self, rng))]
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<SessionResult, HoldemSimulationError> {
        let mut hands_played = 0;

        while hands_played < self.max_hands && self.stacks.iter().all(|s| *s > 0) {
            let game_state = GameStateBuilder::new()
                .stacks(self.stacks.clone())
                .blinds(self.big_blind, self.small_blind)
                .dealer_idx(self.dealer_idx)
                .build()?;
            let agents = self
                .generators
                .iter()
                .enumerate()
                .map(|(idx, generator)| generator.generate(idx, &game_state))
                .collect();

            let mut sim = HoldemSimulationBuilder::default()
                .game_state(game_state)
                .agents(agents)
                .build()?;
            sim.run(rng)?;

            self.stacks = sim.game_state.players.iter().map(|p| p.stack).collect();
            self.dealer_idx = (self.dealer_idx + 1) % NUM_PLAYERS;
            hands_played += 1;
            debug!(hands_played, stacks = ?self.stacks, "Hand complete");
        }

        let winner = self
            .stacks
            .iter()
            .position(|s| *s == 0)
            .map(|busted| (busted + 1) % NUM_PLAYERS);
        info!(hands_played, ?winner, stacks = ?self.stacks, "Session complete");

        Ok(SessionResult {
            hands_played,
            final_stacks: self.stacks.clone(),
            winner,
        })
    }
}
