use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{instrument, trace};

use crate::arena::{
    action::ActionCode,
    game_state::{GameState, Street},
};
use crate::holdem::{HandClass, RangeTables};

use super::{Agent, AgentGenerator, FishAgent};

/// Bet sizing used by [`SharkAgent`].
///
/// Preflop sizes are raise-to amounts, either in big blinds or as a
/// multiple of the bet being faced. The flop bet is a fraction of the pot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SharkSizing {
    /// First in raise, in big blinds.
    pub open_mult: f32,
    /// Out of position raise, times the bet faced (or big blinds over a
    /// limp).
    pub oop_raise_mult: f32,
    /// In position raise, times the bet faced.
    pub ip_raise_mult: f32,
    /// Flop bet as a fraction of the pot.
    pub bet_pct: f32,
    /// Effective stacks at or under this many big blinds play push/fold.
    pub push_fold_depth: f32,
}

impl Default for SharkSizing {
    fn default() -> Self {
        Self {
            open_mult: 2.5,
            oop_raise_mult: 3.5,
            ip_raise_mult: 3.0,
            bet_pct: 0.6,
            push_fold_depth: 20.0,
        }
    }
}

/// Plays the preflop range charts, continuation bets the flop, and hands
/// every other decision to a fallback agent.
///
/// Preflop has two regimes keyed on the effective stack. Deep stacks climb
/// the open, three-bet, four-bet, five-bet shove ladder using the set
/// tables. Short stacks shove or call when the depth chart for the hand
/// reaches the current depth.
///
/// ```
/// use std::sync::Arc;
///
/// use headsup_holdem::arena::{Agent, GameStateBuilder, action::ActionCode, agent::SharkAgent};
/// use headsup_holdem::core::HoleCards;
/// use headsup_holdem::holdem::RangeTables;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut game_state = GameStateBuilder::new()
///     .stacks(vec![1000, 1000])
///     .blinds(10, 5)
///     .hands(vec![
///         HoleCards::from_str_pair("AsKs").unwrap(),
///         HoleCards::from_str_pair("7c2d").unwrap(),
///     ])
///     .build()
///     .unwrap();
/// game_state.post_blinds().unwrap();
///
/// let mut shark = SharkAgent::new(
///     "shark",
///     Arc::new(RangeTables::default()),
///     StdRng::seed_from_u64(1),
/// );
/// // Open to two and a half big blinds from the small blind.
/// assert_eq!(ActionCode::new(20), shark.act(&game_state));
/// ```
pub struct SharkAgent<R: Rng> {
    name: String,
    tables: Arc<RangeTables>,
    rng: R,
    fallback: Box<dyn Agent>,
    sizing: SharkSizing,
}

impl<R: Rng> SharkAgent<R> {
    /// A shark with default sizing and a `FishAgent` fallback.
    pub fn new(name: impl Into<String>, tables: Arc<RangeTables>, rng: R) -> Self {
        let name = name.into();
        let fallback = Box::new(FishAgent::new(format!("{name}-fallback")));
        Self {
            name,
            tables,
            rng,
            fallback,
            sizing: SharkSizing::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn Agent>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_sizing(mut self, sizing: SharkSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn sizing(&self) -> &SharkSizing {
        &self.sizing
    }

    fn preflop(&self, game_state: &GameState, hand: &HandClass) -> ActionCode {
        let depth = game_state.effective_stack_bb();
        if depth <= self.sizing.push_fold_depth {
            self.push_fold(game_state, hand, depth)
        } else {
            self.deep(game_state, hand)
        }
    }

    fn push_fold(&self, game_state: &GameState, hand: &HandClass, depth: f32) -> ActionCode {
        let me = game_state.acting_player();
        let shove = ActionCode::bet(me.stack);
        let call = ActionCode::bet(
            game_state.validate_bet_size(i64::from(game_state.bet_amt) - i64::from(me.in_for)),
        );
        let can_shove = self.tables.push_fold_shove.allows(hand, depth);
        let can_call = self.tables.push_fold_call.allows(hand, depth);
        let facing_all_in = game_state.opponent().is_all_in();

        trace!(
            %hand,
            depth,
            can_shove,
            can_call,
            facing_all_in,
            action_count = game_state.action_count,
            "push/fold"
        );

        match game_state.action_count {
            0 | 1 if facing_all_in => {
                if can_call {
                    call
                } else {
                    ActionCode::FOLD
                }
            }
            0 => {
                if can_shove {
                    shove
                } else {
                    ActionCode::FOLD
                }
            }
            // Limped to us. The shove chart decides whether to jam, and a
            // miss takes the free flop.
            1 if game_state.bet_amt == game_state.big_blind => {
                if can_shove {
                    shove
                } else {
                    ActionCode::CHECK_OR_CALL
                }
            }
            1 => {
                if can_shove {
                    shove
                } else {
                    ActionCode::FOLD
                }
            }
            _ => shove,
        }
    }

    fn deep(&self, game_state: &GameState, hand: &HandClass) -> ActionCode {
        let me = game_state.acting_player();
        let tables = &self.tables;
        let big_blind = game_state.big_blind as f32;
        let bet_amt = game_state.bet_amt as f32;

        let raise_to = |to: f32| {
            ActionCode::bet(game_state.validate_bet_size(to as i64 - i64::from(me.in_for)))
        };
        let call = ActionCode::bet(
            game_state.validate_bet_size(i64::from(game_state.bet_amt) - i64::from(me.in_for)),
        );
        let shove = ActionCode::bet(me.stack);

        trace!(
            %hand,
            action_count = game_state.action_count,
            in_for = me.in_for,
            bet_amt = game_state.bet_amt,
            "range chart"
        );

        match game_state.action_count {
            0 => {
                if tables.bu_open.contains(hand) {
                    raise_to(self.sizing.open_mult * big_blind)
                } else {
                    ActionCode::FOLD
                }
            }
            1 if me.in_for == game_state.bet_amt => {
                if tables.bb_three_bet.contains(hand) {
                    raise_to(self.sizing.oop_raise_mult * big_blind)
                } else {
                    ActionCode::CHECK_OR_CALL
                }
            }
            1 => {
                if tables.bb_three_bet.contains(hand) {
                    raise_to(self.sizing.oop_raise_mult * bet_amt)
                } else if tables.bb_call_open.contains(hand) {
                    call
                } else {
                    ActionCode::FOLD
                }
            }
            2 if me.in_for < game_state.bet_amt && me.in_for > game_state.big_blind => {
                if tables.bu_four_bet.contains(hand) {
                    raise_to(self.sizing.ip_raise_mult * bet_amt)
                } else if tables.bu_call_three_bet.contains(hand) {
                    call
                } else {
                    ActionCode::FOLD
                }
            }
            3 => {
                if tables.bb_five_bet_shove.contains(hand) {
                    shove
                } else {
                    ActionCode::FOLD
                }
            }
            n if n >= 4 => {
                if tables.bu_call_shove.contains(hand) {
                    shove
                } else {
                    ActionCode::FOLD
                }
            }
            _ => ActionCode::FOLD,
        }
    }

    /// Continuation bet heuristic. `None` means the spot isn't covered.
    fn flop(&mut self, game_state: &GameState) -> Option<ActionCode> {
        let (num, den) = match game_state.action_count {
            0 => (1, 3),
            1 if game_state.bet_amt == 0 => (1, 2),
            _ => return None,
        };

        let me = game_state.acting_player();
        let opponent = game_state.opponent();
        let fires = if me.aggressor {
            self.rng.random_ratio(9, 10)
        } else if opponent.aggressor {
            false
        } else {
            self.rng.random_ratio(num, den)
        };

        trace!(
            aggressor = me.aggressor,
            opponent_aggressor = opponent.aggressor,
            fires,
            "flop"
        );

        if fires {
            let size = (game_state.pot as f32 * self.sizing.bet_pct) as i64;
            Some(ActionCode::bet(game_state.validate_bet_size(size)))
        } else {
            Some(ActionCode::CHECK_OR_CALL)
        }
    }
}

impl<R: Rng> Agent for SharkAgent<R> {
    #[instrument(level = "trace", skip(self, game_state), fields(agent_name = %self.name))]
    fn act(&mut self, game_state: &GameState) -> ActionCode {
        let hole_cards = game_state.acting_player().hole_cards;
        let decision = match (game_state.street, hole_cards) {
            (Street::Preflop, Some(hole)) => Some(self.preflop(game_state, &HandClass::from(&hole))),
            (Street::Flop, _) => self.flop(game_state),
            _ => None,
        };

        decision.unwrap_or_else(|| {
            trace!(street = %game_state.street, "handing off to fallback");
            self.fallback.act(game_state)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Generator for `SharkAgent`s that share one set of tables.
///
/// With a seed every generated agent gets its own deterministic rng,
/// otherwise they are seeded from the thread rng.
#[derive(Debug)]
pub struct SharkAgentGenerator {
    tables: Arc<RangeTables>,
    sizing: SharkSizing,
    seed: Option<u64>,
    name: Option<String>,
    generated: AtomicU64,
}

impl SharkAgentGenerator {
    pub fn new(tables: Arc<RangeTables>) -> Self {
        Self {
            tables,
            sizing: SharkSizing::default(),
            seed: None,
            name: None,
            generated: AtomicU64::new(0),
        }
    }

    pub fn with_sizing(mut self, sizing: SharkSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn resolve_name(&self, player_idx: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("SharkAgent-{player_idx}"))
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => {
                let n = self.generated.fetch_add(1, Ordering::Relaxed);
                StdRng::seed_from_u64(seed.wrapping_add(n))
            }
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for SharkAgentGenerator {
    fn default() -> Self {
        Self::new(Arc::new(RangeTables::default()))
    }
}

impl AgentGenerator for SharkAgentGenerator {
    fn generate(&self, player_idx: usize, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(
            SharkAgent::new(
                self.resolve_name(player_idx),
                self.tables.clone(),
                self.rng(),
            )
            .with_sizing(self.sizing),
        )
    }
}
