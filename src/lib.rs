//! # headsup_holdem
//!
//! Heads-up No-Limit Texas Hold'em. Two seats, integer chips, one hand at a
//! time.
//!
//! The crate is split into three layers:
//!
//! - [`core`] holds cards, the deck, and hand ranking used at showdown.
//! - [`holdem`] holds the 169 starting hand classes and the static range
//!   tables that drive preflop decisions.
//! - [`arena`] holds the betting engine (`GameState`), the `Agent` trait
//!   with its range chart and heuristic implementations, and the simulation
//!   drivers that play hands between agents.
//!
//! ```
//! use headsup_holdem::arena::{GameStateBuilder, HoldemSimulationBuilder};
//! use headsup_holdem::arena::agent::FishAgent;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let game_state = GameStateBuilder::new()
//!     .stacks(vec![1000, 1000])
//!     .blinds(10, 5)
//!     .build()
//!     .unwrap();
//!
//! let mut sim = HoldemSimulationBuilder::default()
//!     .game_state(game_state)
//!     .agents(vec![
//!         Box::new(FishAgent::new("fish-0")),
//!         Box::new(FishAgent::new("fish-1")),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! sim.run(&mut rng).unwrap();
//! assert!(sim.game_state.is_complete());
//! ```

/// Cards, deck, and ranking.
pub mod core;

/// Starting hand classes and preflop range tables.
pub mod holdem;

/// The betting engine, agents, and simulations.
#[cfg(feature = "arena")]
pub mod arena;
