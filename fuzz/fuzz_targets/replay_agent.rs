#![no_main]

extern crate arbitrary;
extern crate headsup_holdem;
extern crate libfuzzer_sys;
extern crate rand;

use rand::{rngs::StdRng, SeedableRng};

use headsup_holdem::arena::{
    action::ActionCode,
    agent::VecReplayAgent,
    errors::{GameStateError, HoldemSimulationError},
    historian::{self, Historian},
    test_util::{assert_valid_game_state, assert_valid_history},
    Agent, GameStateBuilder, HoldemSimulation, HoldemSimulationBuilder,
};

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub seat_zero_actions: Vec<ActionCode>,
    pub seat_one_actions: Vec<ActionCode>,
    pub stacks: (u16, u16),
    pub dealer_idx: bool,
    pub seed: u64,
}

fuzz_target!(|input: Input| {
    let stacks = vec![u32::from(input.stacks.0) + 1, u32::from(input.stacks.1) + 1];
    let game_state = GameStateBuilder::new()
        .stacks(stacks)
        .blinds(2, 1)
        .dealer_idx(usize::from(input.dealer_idx))
        .build()
        .unwrap();
    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(VecReplayAgent::new("replay-0", input.seat_zero_actions)),
        Box::new(VecReplayAgent::new("replay-1", input.seat_one_actions)),
    ];

    let vec_historian = historian::VecHistorian::new();
    let storage = vec_historian.get_storage();
    let historians: Vec<Box<dyn Historian>> = vec![Box::new(vec_historian)];

    let mut rng = StdRng::seed_from_u64(input.seed);
    let mut sim: HoldemSimulation = HoldemSimulationBuilder::default()
        .game_state(game_state)
        .agents(agents)
        .historians(historians)
        .build()
        .unwrap();

    match sim.run(&mut rng) {
        Ok(()) => {
            assert_valid_game_state(&sim.game_state);
            assert_valid_history(&storage.borrow());
        }
        // Agents are allowed to send garbage, the engine must only refuse it.
        Err(HoldemSimulationError::GameState(
            GameStateError::InvalidActionCode(_) | GameStateError::BetSizeDoesntCall { .. },
        )) => {
            assert!(!sim.game_state.is_complete());
        }
        Err(err) => panic!("unexpected simulation error {err}"),
    }
});
