use super::{
    Agent, GameState, HoldemSimulation,
    agent::FoldingAgent,
    errors::HoldemSimulationError,
    game_state::NUM_PLAYERS,
    historian::Historian,
    showdown::{RankEvaluator, ShowdownEvaluator},
};
use crate::core::Deck;

// Some builder methods to help with turning a builder struct into a ready
// simulation
fn build_deck(game_state: &GameState) -> Deck {
    let mut deck = Deck::default();

    for hole in game_state.players.iter().filter_map(|p| p.hole_cards) {
        for card in hole.cards() {
            deck.remove(card);
        }
    }
    for card in game_state.board.iter() {
        deck.remove(card);
    }

    deck
}

fn build_agents() -> Vec<Box<dyn Agent>> {
    (0..NUM_PLAYERS)
        .map(|_| -> Box<dyn Agent> { Box::<FoldingAgent>::default() })
        .collect()
}

/// # HoldemSimulationBuilder
///
/// `HoldemSimulationBuilder` is a builder to allow for complex
/// configurations of a heads-up simulation played via agents. A game state
/// is required, other fields are optional.
///
/// ## Setters
///
/// Each setter will set the optional value to the passed in value. Then
/// return the mutated builder.
///
/// While agents are not required the default is two folding agents.
/// So likely not that interesting a simulation.
///
/// ## Examples
///
/// ```
/// use headsup_holdem::arena::{Agent, GameStateBuilder, HoldemSimulationBuilder};
/// use headsup_holdem::arena::agent::FoldingAgent;
///
/// let game_state = GameStateBuilder::new()
///     .stacks(vec![100, 100])
///     .blinds(2, 1)
///     .dealer_idx(1)
///     .build()
///     .unwrap();
/// let agents: Vec<Box<dyn Agent>> = (0..2)
///     .map(|_| Box::<FoldingAgent>::default() as Box<dyn Agent>)
///     .collect();
/// let sim = HoldemSimulationBuilder::default()
///     .game_state(game_state)
///     .agents(agents)
///     .build()
///     .unwrap();
/// ```
pub struct HoldemSimulationBuilder {
    agents: Option<Vec<Box<dyn Agent>>>,
    historians: Vec<Box<dyn Historian>>,
    game_state: Option<GameState>,
    deck: Option<Deck>,
    evaluator: Option<Box<dyn ShowdownEvaluator>>,
    panic_on_historian_error: bool,
}

impl HoldemSimulationBuilder {
    /// Set the agents for the simulation created by this builder.
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Set the game state for ths simulation created by this builder.
    pub fn game_state(mut self, game_state: GameState) -> Self {
        self.game_state = Some(game_state);
        self
    }

    /// Set the deck. If not set a full deck minus the known cards is used.
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Set the historians for the simulation created by this builder.
    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// Set how showdowns are decided. Defaults to `RankEvaluator`.
    pub fn evaluator(mut self, evaluator: Box<dyn ShowdownEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Should the simulation panic if a historian errors.
    /// When false the simulation continues if a historian errors. It will
    /// be removed from the simulation and recorded in the logs.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Given the fields already specified build any that are not specified and
    /// create a new HoldemSimulation.
    ///
    /// @returns HoldemSimulationError if no game_state was given, or the
    /// number of agents doesn't match the seats.
    pub fn build(self) -> Result<HoldemSimulation, HoldemSimulationError> {
        let game_state = self
            .game_state
            .ok_or(HoldemSimulationError::NeedGameState)?;

        let agents = self.agents.unwrap_or_else(build_agents);
        if agents.len() != game_state.num_players() {
            return Err(HoldemSimulationError::NeedAgents {
                expected: game_state.num_players(),
                actual: agents.len(),
            });
        }

        let deck = self.deck.unwrap_or_else(|| build_deck(&game_state));
        let evaluator = self
            .evaluator
            .unwrap_or_else(|| Box::new(RankEvaluator));

        Ok(HoldemSimulation {
            agents,
            game_state,
            deck,
            historians: self.historians,
            evaluator,
            panic_on_historian_error: self.panic_on_historian_error,
        })
    }
}

impl Default for HoldemSimulationBuilder {
    fn default() -> Self {
        Self {
            agents: None,
            historians: vec![],
            game_state: None,
            deck: None,
            evaluator: None,
            panic_on_historian_error: true,
        }
    }
}
