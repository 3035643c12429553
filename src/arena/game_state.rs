use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::core::{Card, HoleCards};

use super::action::{ActionCode, AgentAction};
use super::errors::GameStateError;
use super::showdown::ShowdownEvaluator;

/// The only table size the engine plays.
pub const NUM_PLAYERS: usize = 2;

/// Every chip on the table has to fit in a positive `ActionCode`.
pub const MAX_CHIPS: u64 = i32::MAX as u64;

/// Errors that can occur when building a GameState.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameStateBuilderError {
    #[error("stacks are required")]
    MissingStacks,

    #[error("big_blind is required")]
    MissingBigBlind,

    #[error("exactly {expected} players are supported, got {0}", expected = NUM_PLAYERS)]
    UnsupportedPlayerCount(usize),

    #[error("dealer_idx {0} is not a seat")]
    InvalidDealerIndex(usize),

    #[error("acting_idx {0} is not a seat")]
    InvalidActingIndex(usize),

    #[error("big_blind must be positive")]
    InvalidBigBlind,

    #[error("small_blind {small_blind} can't be larger than big_blind {big_blind}")]
    InvalidSmallBlind { small_blind: u32, big_blind: u32 },

    #[error("player at index {0} has no chips or more than i32::MAX")]
    InvalidStack(usize),

    #[error("{0} chips on the table is more than i32::MAX")]
    TooManyChips(u64),

    #[error("{field} length {actual} must equal the number of players")]
    LengthMismatch { field: &'static str, actual: usize },

    #[error("board must have 0, 3, 4, or 5 cards, got {0}")]
    InvalidBoardSize(usize),

    #[error("duplicate card found: {0}")]
    DuplicateCard(Card),
}

/// Builder for constructing `GameState` with validation.
///
/// A fresh hand needs only stacks and a big blind. The mid hand setters
/// (`street`, `in_for`, `pot`, `action_count`, `acting_idx`, `aggressor`)
/// place the engine part way through a hand, and setting any of them marks
/// the blinds as already posted.
///
/// # Example
///
/// ```
/// use headsup_holdem::arena::GameStateBuilder;
///
/// let game_state = GameStateBuilder::new()
///     .stacks(vec![1000, 1000])
///     .big_blind(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(game_state.big_blind, 10);
/// assert_eq!(game_state.small_blind, 5); // defaults to big_blind / 2
/// ```
#[derive(Default, Clone, Debug)]
pub struct GameStateBuilder {
    // Required
    stacks: Option<Vec<u32>>,
    big_blind: Option<u32>,

    // Optional with defaults
    small_blind: Option<u32>,
    dealer_idx: Option<usize>,
    names: Option<Vec<String>>,
    hands: Option<Vec<HoleCards>>,
    board: Option<Vec<Card>>,

    // For mid-hand states
    street: Option<Street>,
    in_for: Option<Vec<u32>>,
    pot: Option<u32>,
    action_count: Option<u32>,
    acting_idx: Option<usize>,
    aggressor: Option<usize>,
}

impl GameStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chips behind for each seat, not counting `in_for`. Required.
    pub fn stacks(mut self, stacks: Vec<u32>) -> Self {
        self.stacks = Some(stacks);
        self
    }

    /// Set the big blind size. Required.
    pub fn big_blind(mut self, bb: u32) -> Self {
        self.big_blind = Some(bb);
        self
    }

    /// Set the small blind size. Defaults to `big_blind / 2`.
    pub fn small_blind(mut self, sb: u32) -> Self {
        self.small_blind = Some(sb);
        self
    }

    /// Convenience method to set both big and small blinds at once.
    pub fn blinds(mut self, big: u32, small: u32) -> Self {
        self.big_blind = Some(big);
        self.small_blind = Some(small);
        self
    }

    /// The button, who posts the small blind. Defaults to `0`.
    pub fn dealer_idx(mut self, idx: usize) -> Self {
        self.dealer_idx = Some(idx);
        self
    }

    pub fn names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn hands(mut self, hands: Vec<HoleCards>) -> Self {
        self.hands = Some(hands);
        self
    }

    pub fn board(mut self, board: Vec<Card>) -> Self {
        self.board = Some(board);
        self
    }

    pub fn street(mut self, street: Street) -> Self {
        self.street = Some(street);
        self
    }

    /// Chips each seat has put in on the current street.
    pub fn in_for(mut self, in_for: Vec<u32>) -> Self {
        self.in_for = Some(in_for);
        self
    }

    /// Chips collected from earlier streets.
    pub fn pot(mut self, pot: u32) -> Self {
        self.pot = Some(pot);
        self
    }

    pub fn action_count(mut self, action_count: u32) -> Self {
        self.action_count = Some(action_count);
        self
    }

    /// Defaults to whoever acts after `action_count` actions on the street.
    pub fn acting_idx(mut self, idx: usize) -> Self {
        self.acting_idx = Some(idx);
        self
    }

    /// The seat that raised last preflop.
    pub fn aggressor(mut self, idx: usize) -> Self {
        self.aggressor = Some(idx);
        self
    }

    /// Build the `GameState`, validating all inputs.
    pub fn build(self) -> Result<GameState, GameStateBuilderError> {
        let stacks = self.stacks.ok_or(GameStateBuilderError::MissingStacks)?;
        let big_blind = self
            .big_blind
            .ok_or(GameStateBuilderError::MissingBigBlind)?;

        if stacks.len() != NUM_PLAYERS {
            return Err(GameStateBuilderError::UnsupportedPlayerCount(stacks.len()));
        }

        if big_blind == 0 {
            return Err(GameStateBuilderError::InvalidBigBlind);
        }

        let small_blind = self.small_blind.unwrap_or(big_blind / 2);
        if small_blind > big_blind {
            return Err(GameStateBuilderError::InvalidSmallBlind {
                small_blind,
                big_blind,
            });
        }

        let dealer_idx = self.dealer_idx.unwrap_or(0);
        if dealer_idx >= NUM_PLAYERS {
            return Err(GameStateBuilderError::InvalidDealerIndex(dealer_idx));
        }

        let check_len = |field: &'static str, actual: usize| {
            if actual == NUM_PLAYERS {
                Ok(())
            } else {
                Err(GameStateBuilderError::LengthMismatch { field, actual })
            }
        };

        let mid_hand = self.street.is_some()
            || self.in_for.is_some()
            || self.pot.is_some()
            || self.action_count.is_some();

        let in_for = self.in_for.unwrap_or_else(|| vec![0; NUM_PLAYERS]);
        check_len("in_for", in_for.len())?;

        for (idx, (stack, bet)) in stacks.iter().zip(in_for.iter()).enumerate() {
            let total = *stack as u64 + *bet as u64;
            if total == 0 || total > MAX_CHIPS {
                return Err(GameStateBuilderError::InvalidStack(idx));
            }
        }
        let pot = self.pot.unwrap_or(0);
        let chips_in_play = pot as u64
            + stacks
                .iter()
                .zip(in_for.iter())
                .map(|(stack, bet)| *stack as u64 + *bet as u64)
                .sum::<u64>();
        if chips_in_play > MAX_CHIPS {
            return Err(GameStateBuilderError::TooManyChips(chips_in_play));
        }

        let names = match self.names {
            Some(names) => {
                check_len("names", names.len())?;
                names
            }
            None => (0..NUM_PLAYERS).map(|idx| format!("Seat-{idx}")).collect(),
        };

        let hands: Vec<Option<HoleCards>> = match self.hands {
            Some(hands) => {
                check_len("hands", hands.len())?;
                hands.into_iter().map(Some).collect()
            }
            None => vec![None; NUM_PLAYERS],
        };

        let board = self.board.unwrap_or_default();
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(GameStateBuilderError::InvalidBoardSize(board.len()));
        }

        let mut seen = HashSet::new();
        let dealt = hands
            .iter()
            .flatten()
            .flat_map(|h| h.cards().iter())
            .chain(board.iter());
        for card in dealt {
            if !seen.insert(*card) {
                return Err(GameStateBuilderError::DuplicateCard(*card));
            }
        }

        let street = self.street.unwrap_or(Street::Preflop);
        let action_count = self.action_count.unwrap_or(0);
        let first_to_act = if street == Street::Preflop {
            dealer_idx
        } else {
            1 - dealer_idx
        };
        let acting_idx = match self.acting_idx {
            Some(idx) if idx >= NUM_PLAYERS => {
                return Err(GameStateBuilderError::InvalidActingIndex(idx));
            }
            Some(idx) => idx,
            None if action_count % 2 == 0 => first_to_act,
            None => 1 - first_to_act,
        };
        if let Some(idx) = self.aggressor.filter(|idx| *idx >= NUM_PLAYERS) {
            return Err(GameStateBuilderError::InvalidActingIndex(idx));
        }

        let players: Vec<Player> = stacks
            .into_iter()
            .zip(in_for)
            .zip(names)
            .zip(hands)
            .enumerate()
            .map(|(idx, (((stack, in_for), name), hole_cards))| Player {
                name,
                stack,
                in_for,
                folded: false,
                hole_cards,
                aggressor: self.aggressor == Some(idx),
                // Whoever isn't up has acted once anyone has, and the seat
                // that is up has too once the action has gone around.
                acted: (action_count > 0 && idx != acting_idx)
                    || (action_count > 1 && idx == acting_idx),
                starting_stack: stack + in_for,
                uncalled: 0,
            })
            .collect();

        let bet_amt = players.iter().map(|p| p.in_for).max().unwrap_or(0);

        Ok(GameState {
            players,
            street,
            street_before: street,
            action_count,
            bet_amt,
            pot,
            big_blind,
            small_blind,
            acting_idx,
            dealer_idx,
            board,
            player_winnings: vec![0; NUM_PLAYERS],
            blinds_posted: mid_hand,
            chips_in_play,
        })
    }
}

/// The street of the hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    /// Betting is over, waiting on the showdown.
    Showdown,
    Complete,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
            Street::Complete => write!(f, "Complete"),
        }
    }
}

impl Street {
    pub fn advance(&self) -> Self {
        match *self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown => Street::Complete,
            Street::Complete => Street::Complete,
        }
    }

    /// Number of board cards once this street is dealt.
    pub fn board_len(&self) -> usize {
        match *self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown | Street::Complete => 5,
        }
    }

    pub fn is_betting(&self) -> bool {
        !matches!(self, Street::Showdown | Street::Complete)
    }
}

/// One seat at the table.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    /// Chips behind
    pub stack: u32,
    /// Chips put in on the current street
    pub in_for: u32,
    pub folded: bool,
    pub hole_cards: Option<HoleCards>,
    /// Last to raise preflop
    pub aggressor: bool,
    /// Has acted on the current street. Blinds don't count.
    pub acted: bool,
    /// `stack + in_for` when the hand started
    pub starting_stack: u32,
    /// Chips in the pot that the other seat couldn't match. They go back
    /// before the pot is awarded.
    pub uncalled: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            in_for: 0,
            folded: false,
            hole_cards: None,
            aggressor: false,
            acted: false,
            starting_stack: stack,
            uncalled: 0,
        }
    }

    pub fn is_all_in(&self) -> bool {
        !self.folded && self.stack == 0
    }

    /// Live, with chips behind, and either hasn't acted or is facing a bet.
    pub fn needs_action(&self, bet_amt: u32) -> bool {
        !self.folded && self.stack > 0 && (!self.acted || self.in_for < bet_amt)
    }
}

/// The state of a single heads-up hand.
///
/// `GameState` owns every chip. Agents read it, and only `advance`,
/// `post_blinds`, and `showdown` change it.
#[derive(Clone, PartialEq, Debug)]
pub struct GameState {
    pub players: Vec<Player>,
    pub street: Street,
    /// The street before the last change. After a preflop fold this is
    /// `Preflop` while `street` is `Complete`.
    pub street_before: Street,
    /// Actions taken on this street, not counting blinds
    pub action_count: u32,
    /// The largest `in_for` on this street
    pub bet_amt: u32,
    /// Chips collected from completed streets
    pub pot: u32,
    pub big_blind: u32,
    pub small_blind: u32,
    pub acting_idx: usize,
    /// The button. Posts the small blind and acts first preflop.
    pub dealer_idx: usize,
    pub board: Vec<Card>,
    pub player_winnings: Vec<u32>,
    pub blinds_posted: bool,
    chips_in_play: u64,
}

impl GameState {
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn is_complete(&self) -> bool {
        self.street == Street::Complete
    }

    /// The seat across from `idx`.
    ///
    /// # Errors
    ///
    /// `UnsupportedConfiguration` when the table isn't heads-up, and
    /// `InvalidSeat` when `idx` isn't a seat.
    pub fn next_position(&self, idx: usize) -> Result<usize, GameStateError> {
        if self.players.len() != NUM_PLAYERS {
            return Err(GameStateError::UnsupportedConfiguration(self.players.len()));
        }
        if idx >= NUM_PLAYERS {
            return Err(GameStateError::InvalidSeat(idx));
        }
        Ok(1 - idx)
    }

    pub fn acting_player(&self) -> &Player {
        &self.players[self.acting_idx]
    }

    /// The player who isn't acting.
    pub fn opponent(&self) -> &Player {
        &self.players[(self.acting_idx + 1) % self.players.len()]
    }

    /// A copy of the hand as `seat` sees it, with the other seat's hole
    /// cards hidden. This is what agents are asked to act on.
    pub fn view_for(&self, seat: usize) -> Result<GameState, GameStateError> {
        let other = self.next_position(seat)?;
        let mut view = self.clone();
        view.players[other].hole_cards = None;
        Ok(view)
    }

    pub fn small_blind_idx(&self) -> usize {
        self.dealer_idx
    }

    pub fn big_blind_idx(&self) -> usize {
        (self.dealer_idx + 1) % self.players.len()
    }

    /// The seat that acts first after the flop.
    pub fn out_of_position_idx(&self) -> usize {
        self.big_blind_idx()
    }

    /// The smaller of `stack + in_for` across players.
    pub fn effective_stack(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.stack + p.in_for)
            .min()
            .unwrap_or(0)
    }

    pub fn effective_stack_bb(&self) -> f32 {
        self.effective_stack() as f32 / self.big_blind as f32
    }

    /// What the acting player owes to continue.
    pub fn to_call(&self) -> u32 {
        self.bet_amt.saturating_sub(self.acting_player().in_for)
    }

    /// Pot plus everything in front of the players. Never goes down until
    /// the hand is awarded.
    pub fn total_pot(&self) -> u32 {
        self.pot + self.players.iter().map(|p| p.in_for).sum::<u32>()
    }

    /// Clamp a requested bet into `[0, acting stack]`.
    ///
    /// ```
    /// use headsup_holdem::arena::GameStateBuilder;
    ///
    /// let game_state = GameStateBuilder::new()
    ///     .stacks(vec![300, 1000])
    ///     .big_blind(10)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(300, game_state.validate_bet_size(5000));
    /// assert_eq!(0, game_state.validate_bet_size(-20));
    /// assert_eq!(25, game_state.validate_bet_size(25));
    /// ```
    pub fn validate_bet_size(&self, requested: i64) -> u32 {
        let stack = self.acting_player().stack;
        requested.clamp(0, stack as i64) as u32
    }

    /// Change in stack since the start of the hand.
    pub fn player_reward(&self, idx: usize) -> i64 {
        let p = &self.players[idx];
        p.stack as i64 - p.starting_stack as i64
    }

    /// Post both blinds. Blinds are clamped to the stack and don't count
    /// as actions. Does nothing if the blinds are already in.
    pub fn post_blinds(&mut self) -> Result<(), GameStateError> {
        if self.blinds_posted {
            return Ok(());
        }
        let sb_idx = self.small_blind_idx();
        let bb_idx = self.big_blind_idx();
        self.post_forced(sb_idx, self.small_blind);
        self.post_forced(bb_idx, self.big_blind);
        self.blinds_posted = true;
        debug!(
            small_blind = self.players[sb_idx].in_for,
            big_blind = self.players[bb_idx].in_for,
            "Posted blinds"
        );

        self.check_invariants()?;
        self.acting_idx = self.dealer_idx;
        if self.players[self.dealer_idx].needs_action(self.bet_amt) {
            Ok(())
        } else {
            self.move_action()
        }
    }

    fn post_forced(&mut self, idx: usize, amount: u32) {
        let player = &mut self.players[idx];
        let posted = player.stack.min(amount);
        player.stack -= posted;
        player.in_for += posted;
        self.bet_amt = self.bet_amt.max(player.in_for);
    }

    /// Apply `code` for `seat` and return the chips it put in.
    ///
    /// Fold ends the hand at once. Check or call puts in what is owed,
    /// clamped to the stack. A positive code puts in that many chips,
    /// clamped to the stack, and has to at least call unless it's all in.
    /// After the action the street closes when nobody needs to act, and
    /// otherwise the other seat is up.
    pub fn advance(&mut self, seat: usize, code: ActionCode) -> Result<u32, GameStateError> {
        if !self.street.is_betting() {
            return Err(GameStateError::HandComplete);
        }
        let opponent = self.next_position(seat)?;
        if seat != self.acting_idx {
            return Err(GameStateError::ActionOutOfTurn {
                expected: self.acting_idx,
                actual: seat,
            });
        }

        let action = code.decode()?;
        let to_call = self.to_call();
        let player = &self.players[seat];

        let committed = match action {
            AgentAction::Fold => {
                self.action_count += 1;
                self.players[seat].folded = true;
                self.players[seat].acted = true;
                self.award_uncontested(opponent)?;
                return Ok(0);
            }
            AgentAction::CheckOrCall => to_call.min(player.stack),
            AgentAction::Bet(amount) => {
                let amount = amount.min(player.stack);
                if amount < to_call && amount < player.stack {
                    return Err(GameStateError::BetSizeDoesntCall { amount, to_call });
                }
                amount
            }
        };

        let player = &mut self.players[seat];
        player.stack -= committed;
        player.in_for += committed;
        player.acted = true;
        let raised = player.in_for > self.bet_amt;
        self.bet_amt = self.bet_amt.max(player.in_for);
        self.action_count += 1;

        if raised && self.street == Street::Preflop {
            self.players[seat].aggressor = true;
            self.players[opponent].aggressor = false;
        }

        self.check_invariants()?;
        self.move_action()?;
        Ok(committed)
    }

    /// Hand the action to whoever needs it, or close the street.
    fn move_action(&mut self) -> Result<(), GameStateError> {
        let next = self.next_position(self.acting_idx)?;
        if self.players[next].needs_action(self.bet_amt) {
            self.acting_idx = next;
            Ok(())
        } else if self.players[self.acting_idx].needs_action(self.bet_amt) {
            Ok(())
        } else {
            self.finish_street()
        }
    }

    fn finish_street(&mut self) -> Result<(), GameStateError> {
        // Whatever the shorter stack couldn't match stays in the pot until
        // the award
        let matched = self.players.iter().map(|p| p.in_for).min().unwrap_or(0);
        for player in self.players.iter_mut() {
            player.uncalled += player.in_for - matched;
        }

        self.pot += self.players.iter().map(|p| p.in_for).sum::<u32>();
        for player in self.players.iter_mut() {
            player.in_for = 0;
            player.acted = false;
        }
        self.bet_amt = 0;
        self.action_count = 0;
        self.street_before = self.street;

        let all_in = self.players.iter().any(Player::is_all_in);
        self.street = if all_in {
            Street::Showdown
        } else {
            self.street.advance()
        };
        if self.street.is_betting() {
            self.acting_idx = self.out_of_position_idx();
        }
        debug!(from = %self.street_before, to = %self.street, pot = self.pot, "Street complete");

        self.check_invariants()
    }

    fn award_uncontested(&mut self, winner: usize) -> Result<(), GameStateError> {
        self.pot += self.players.iter().map(|p| p.in_for).sum::<u32>();
        for player in self.players.iter_mut() {
            player.in_for = 0;
        }
        self.bet_amt = 0;
        self.return_uncalled();
        let pot = self.pot;
        self.award(winner, pot);
        self.complete();
        debug!(winner, pot, "Hand won uncontested");
        self.check_invariants()
    }

    /// Award the pot once betting is over. A tie splits it, and the odd
    /// chip goes out of position.
    pub fn showdown(&mut self, evaluator: &dyn ShowdownEvaluator) -> Result<(), GameStateError> {
        if self.street != Street::Showdown {
            return Err(GameStateError::NotAtShowdown);
        }
        let (Some(first), Some(second)) = (self.players[0].hole_cards, self.players[1].hole_cards)
        else {
            return Err(GameStateError::InternalInvariantViolation(
                "showdown without hole cards".to_string(),
            ));
        };

        self.return_uncalled();
        let pot = self.pot;
        match evaluator.compare(&first, &second, &self.board) {
            Ordering::Greater => self.award(0, pot),
            Ordering::Less => self.award(1, pot),
            Ordering::Equal => {
                let oop = self.out_of_position_idx();
                let half = pot / 2;
                self.award(oop, half + pot % 2);
                self.award(1 - oop, half);
            }
        }
        debug!(pot, winnings = ?self.player_winnings, "Showdown");
        self.complete();
        self.check_invariants()
    }

    fn return_uncalled(&mut self) {
        for player in self.players.iter_mut() {
            let uncalled = std::mem::take(&mut player.uncalled);
            player.stack += uncalled;
            self.pot -= uncalled;
        }
    }

    fn award(&mut self, idx: usize, amount: u32) {
        self.players[idx].stack += amount;
        self.player_winnings[idx] += amount;
    }

    fn complete(&mut self) {
        if self.street == Street::Complete {
            return;
        }
        self.street_before = self.street;
        self.street = Street::Complete;
        self.action_count = 0;
    }

    fn check_invariants(&self) -> Result<(), GameStateError> {
        let fail = |msg: String| Err(GameStateError::InternalInvariantViolation(msg));

        let on_table: u64 = self
            .players
            .iter()
            .map(|p| p.stack as u64 + p.in_for as u64)
            .sum();
        let awarded: u64 = self.player_winnings.iter().map(|w| *w as u64).sum();
        if on_table + self.pot as u64 - awarded != self.chips_in_play {
            return fail(format!(
                "{} chips on the table and {} in the pot, expected {}",
                on_table, self.pot, self.chips_in_play
            ));
        }

        let uncalled: u64 = self.players.iter().map(|p| p.uncalled as u64).sum();
        if uncalled > self.pot as u64 {
            return fail(format!("{} uncalled but the pot is {}", uncalled, self.pot));
        }

        let max_in = self.players.iter().map(|p| p.in_for).max().unwrap_or(0);
        if max_in != self.bet_amt {
            return fail(format!("bet_amt {} but largest in_for {}", self.bet_amt, max_in));
        }

        if !self.is_complete() {
            for (idx, p) in self.players.iter().enumerate() {
                if p.stack + p.in_for > p.starting_stack {
                    return fail(format!(
                        "seat {} has {} but started with {}",
                        idx,
                        p.stack + p.in_for,
                        p.starting_stack
                    ));
                }
            }
        }

        if self.acting_idx >= self.players.len() {
            return fail(format!("acting_idx {} is not a seat", self.acting_idx));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arena::RankEvaluator;
    use crate::core::Deck;

    /// Test helper to create a game state with standard defaults
    fn test_game_state(stacks: Vec<u32>, big_blind: u32, small_blind: u32, dealer_idx: usize) -> GameState {
        GameStateBuilder::new()
            .stacks(stacks)
            .blinds(big_blind, small_blind)
            .dealer_idx(dealer_idx)
            .build()
            .unwrap()
    }

    struct FixedEvaluator(Ordering);

    impl ShowdownEvaluator for FixedEvaluator {
        fn compare(&self, _a: &HoleCards, _b: &HoleCards, _board: &[Card]) -> Ordering {
            self.0
        }
    }

    fn hands(a: &str, b: &str) -> Vec<HoleCards> {
        vec![
            HoleCards::from_str_pair(a).unwrap(),
            HoleCards::from_str_pair(b).unwrap(),
        ]
    }

    #[test]
    fn test_post_blinds() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();

        assert_eq!(5, gs.players[0].in_for);
        assert_eq!(995, gs.players[0].stack);
        assert_eq!(10, gs.players[1].in_for);
        assert_eq!(10, gs.bet_amt);
        assert_eq!(0, gs.action_count);
        assert_eq!(0, gs.pot);
        assert_eq!(0, gs.acting_idx);

        // Posting twice does nothing
        let before = gs.clone();
        gs.post_blinds().unwrap();
        assert_eq!(before, gs);
    }

    #[test]
    fn test_dealer_one_posts_small_blind() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 1);
        gs.post_blinds().unwrap();
        assert_eq!(10, gs.players[0].in_for);
        assert_eq!(5, gs.players[1].in_for);
        assert_eq!(1, gs.acting_idx);
    }

    #[test_log::test]
    fn test_limp_check_resets_street() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();

        assert_eq!(5, gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap());
        assert_eq!(1, gs.acting_idx);
        assert_eq!(1, gs.action_count);
        assert_eq!(Street::Preflop, gs.street);

        // Big blind still has the option
        assert_eq!(0, gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap());

        assert_eq!(Street::Flop, gs.street);
        assert_eq!(20, gs.pot);
        assert_eq!(0, gs.bet_amt);
        assert_eq!(0, gs.action_count);
        assert!(gs.players.iter().all(|p| p.in_for == 0 && !p.acted));
        // Non dealer acts first after the flop
        assert_eq!(1, gs.acting_idx);
    }

    #[test_log::test]
    fn test_big_blind_raises_option() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap();
        assert_eq!(20, gs.advance(1, ActionCode::new(20)).unwrap());

        assert_eq!(30, gs.bet_amt);
        assert_eq!(0, gs.acting_idx);
        assert_eq!(2, gs.action_count);
        assert_eq!(20, gs.to_call());

        gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap();
        assert_eq!(Street::Flop, gs.street);
        assert_eq!(60, gs.pot);
        assert!(gs.players[1].aggressor);
        assert!(!gs.players[0].aggressor);
    }

    #[test]
    fn test_out_of_turn() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        let before = gs.clone();

        assert_eq!(
            Err(GameStateError::ActionOutOfTurn {
                expected: 0,
                actual: 1
            }),
            gs.advance(1, ActionCode::CHECK_OR_CALL)
        );
        assert_eq!(before, gs);
    }

    #[test]
    fn test_invalid_codes_leave_state_alone() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        let before = gs.clone();

        assert_eq!(
            Err(GameStateError::InvalidActionCode(-2)),
            gs.advance(0, ActionCode::new(-2))
        );
        assert_eq!(Err(GameStateError::InvalidSeat(5)), gs.advance(5, ActionCode::FOLD));
        assert_eq!(before, gs);
    }

    #[test]
    fn test_bet_must_call() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        assert_eq!(
            Err(GameStateError::BetSizeDoesntCall {
                amount: 3,
                to_call: 5
            }),
            gs.advance(0, ActionCode::new(3))
        );

        // Exactly the call is fine
        assert_eq!(5, gs.advance(0, ActionCode::new(5)).unwrap());
        assert!(!gs.players[0].aggressor);
    }

    #[test]
    fn test_short_all_in_doesnt_need_to_call() {
        let mut gs = GameStateBuilder::new()
            .stacks(vec![1000, 40])
            .blinds(10, 5)
            .street(Street::Flop)
            .in_for(vec![0, 0])
            .pot(20)
            .build()
            .unwrap();
        assert_eq!(1, gs.acting_idx);
        gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap();
        gs.advance(0, ActionCode::new(100)).unwrap();
        // 40 is all in so it doesn't have to match 100
        assert_eq!(40, gs.advance(1, ActionCode::new(40)).unwrap());
        assert_eq!(Street::Showdown, gs.street);
        // The unmatched 60 waits in the pot
        assert_eq!(160, gs.pot);
        assert_eq!(60, gs.players[0].uncalled);
        assert_eq!(900, gs.players[0].stack);
    }

    #[test_log::test]
    fn test_over_stack_is_all_in() {
        let mut gs = test_game_state(vec![100, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();

        assert_eq!(95, gs.advance(0, ActionCode::new(5000)).unwrap());
        assert_eq!(0, gs.players[0].stack);
        assert!(gs.players[0].aggressor);

        assert_eq!(90, gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap());
        assert_eq!(Street::Showdown, gs.street);
        assert_eq!(200, gs.pot);
        assert_eq!(900, gs.players[1].stack);
        assert_eq!(Err(GameStateError::HandComplete), gs.advance(1, ActionCode::FOLD));
    }

    #[test_log::test]
    fn test_uncalled_excess_returns_at_showdown() {
        // Seat 1 is the dealer with the big stack
        let mut gs = test_game_state(vec![100, 1000], 10, 5, 1);
        gs.post_blinds().unwrap();
        assert_eq!(1, gs.acting_idx);

        assert_eq!(995, gs.advance(1, ActionCode::new(995)).unwrap());
        let before = gs.total_pot();
        assert_eq!(90, gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap());

        assert_eq!(Street::Showdown, gs.street);
        assert_eq!(1100, gs.pot);
        assert!(gs.total_pot() >= before);
        assert_eq!(900, gs.players[1].uncalled);
        assert_eq!(0, gs.players[1].stack);
        assert_eq!(0, gs.players[0].stack);

        gs.players[0].hole_cards = Some(HoleCards::from_str_pair("2c7d").unwrap());
        gs.players[1].hole_cards = Some(HoleCards::from_str_pair("AsAh").unwrap());
        gs.board = ["3s", "8h", "9d", "Jc", "Kd"]
            .iter()
            .map(|c| Card::try_from(*c).unwrap())
            .collect();
        gs.showdown(&RankEvaluator).unwrap();

        // The 900 goes back and only the matched 200 is won
        assert_eq!(200, gs.pot);
        assert_eq!(vec![0, 200], gs.player_winnings);
        assert_eq!(1100, gs.players[1].stack);
        assert_eq!(0, gs.players[1].uncalled);
    }

    #[test]
    fn test_blinds_can_put_players_all_in() {
        let mut gs = test_game_state(vec![3, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        assert_eq!(3, gs.players[0].in_for);
        assert_eq!(0, gs.players[0].stack);
        // The all in dealer can't act so the big blind is up
        assert_eq!(1, gs.acting_idx);

        gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap();
        assert_eq!(Street::Showdown, gs.street);
        assert_eq!(13, gs.pot);
        assert_eq!(7, gs.players[1].uncalled);
        assert_eq!(990, gs.players[1].stack);
    }

    #[test]
    fn test_big_blind_all_in_from_posting() {
        let mut gs = test_game_state(vec![1000, 3], 10, 5, 0);
        gs.post_blinds().unwrap();
        assert_eq!(0, gs.acting_idx);
        assert_eq!(0, gs.players[1].stack);

        assert_eq!(0, gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap());
        assert_eq!(Street::Showdown, gs.street);
        assert_eq!(8, gs.pot);
        assert_eq!(2, gs.players[0].uncalled);
        assert_eq!(995, gs.players[0].stack);
    }

    #[test_log::test]
    fn test_fold_awards_pot() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        assert_eq!(0, gs.advance(0, ActionCode::FOLD).unwrap());

        assert!(gs.is_complete());
        assert_eq!(Street::Preflop, gs.street_before);
        assert!(gs.players[0].folded);
        assert_eq!(995, gs.players[0].stack);
        assert_eq!(1005, gs.players[1].stack);
        assert_eq!(vec![0, 15], gs.player_winnings);
        assert_eq!(-5, gs.player_reward(0));
        assert_eq!(5, gs.player_reward(1));
        assert_eq!(Err(GameStateError::HandComplete), gs.advance(1, ActionCode::CHECK_OR_CALL));
    }

    #[test]
    fn test_reraise_moves_aggressor() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        gs.advance(0, ActionCode::new(20)).unwrap();
        assert!(gs.players[0].aggressor);
        gs.advance(1, ActionCode::new(65)).unwrap();
        assert!(gs.players[1].aggressor);
        assert!(!gs.players[0].aggressor);
        gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap();
        assert_eq!(Street::Flop, gs.street);
        assert_eq!(150, gs.pot);

        // Postflop bets don't change the preflop aggressor
        gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap();
        gs.advance(0, ActionCode::new(50)).unwrap();
        assert!(gs.players[1].aggressor);
        assert!(!gs.players[0].aggressor);
    }

    #[test_log::test]
    fn test_check_down_to_showdown() {
        let mut gs = GameStateBuilder::new()
            .stacks(vec![1000, 1000])
            .blinds(10, 5)
            .hands(hands("AsAd", "KsKd"))
            .build()
            .unwrap();
        gs.post_blinds().unwrap();
        gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap();
        gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap();
        for street in [Street::Flop, Street::Turn, Street::River] {
            assert_eq!(street, gs.street);
            gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap();
            gs.advance(0, ActionCode::CHECK_OR_CALL).unwrap();
        }
        assert_eq!(Street::Showdown, gs.street);
        assert_eq!(Street::River, gs.street_before);
        assert_eq!(20, gs.pot);

        gs.showdown(&FixedEvaluator(Ordering::Greater)).unwrap();
        assert!(gs.is_complete());
        assert_eq!(1010, gs.players[0].stack);
        assert_eq!(990, gs.players[1].stack);
    }

    #[test]
    fn test_showdown_requires_showdown_street() {
        let mut gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        assert_eq!(
            Err(GameStateError::NotAtShowdown),
            gs.showdown(&FixedEvaluator(Ordering::Equal))
        );
    }

    #[test]
    fn test_showdown_split_odd_chip_out_of_position() {
        let mut gs = GameStateBuilder::new()
            .stacks(vec![500, 500])
            .blinds(10, 5)
            .dealer_idx(0)
            .hands(hands("AsKd", "AhKc"))
            .street(Street::Showdown)
            .pot(21)
            .build()
            .unwrap();
        gs.showdown(&FixedEvaluator(Ordering::Equal)).unwrap();

        // Seat 1 is the big blind so it's out of position
        assert_eq!(vec![10, 11], gs.player_winnings);
        assert_eq!(510, gs.players[0].stack);
        assert_eq!(511, gs.players[1].stack);
    }

    #[test]
    fn test_showdown_without_cards_fails() {
        let mut gs = GameStateBuilder::new()
            .stacks(vec![500, 500])
            .big_blind(10)
            .street(Street::Showdown)
            .pot(20)
            .build()
            .unwrap();
        assert!(matches!(
            gs.showdown(&FixedEvaluator(Ordering::Less)),
            Err(GameStateError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn test_next_position() {
        let gs = test_game_state(vec![1000, 1000], 10, 5, 0);
        assert_eq!(Ok(1), gs.next_position(0));
        assert_eq!(Ok(0), gs.next_position(1));
        assert_eq!(Err(GameStateError::InvalidSeat(2)), gs.next_position(2));

        let mut three = gs.clone();
        three.players.push(Player::new("extra", 100));
        assert_eq!(
            Err(GameStateError::UnsupportedConfiguration(3)),
            three.next_position(0)
        );
        assert_eq!(
            Err(GameStateError::UnsupportedConfiguration(3)),
            three.advance(0, ActionCode::FOLD)
        );
    }

    #[test]
    fn test_validate_bet_size_bounds_and_idempotence() {
        let mut gs = test_game_state(vec![300, 1000], 10, 5, 0);
        gs.post_blinds().unwrap();
        let stack = gs.acting_player().stack;
        assert_eq!(295, stack);

        for requested in [i64::MIN, -100, -1, 0, 1, 25, 294, 295, 296, 10_000, i64::MAX] {
            let once = gs.validate_bet_size(requested);
            assert!(once <= stack);
            assert_eq!(once, gs.validate_bet_size(once as i64));
        }
        assert_eq!(0, gs.validate_bet_size(-100));
        assert_eq!(25, gs.validate_bet_size(25));
        assert_eq!(295, gs.validate_bet_size(10_000));
    }

    #[test]
    fn test_effective_stack() {
        let mut gs = test_game_state(vec![300, 1000], 10, 5, 0);
        assert_eq!(300, gs.effective_stack());
        gs.post_blinds().unwrap();
        // Chips in front still count
        assert_eq!(300, gs.effective_stack());
        assert_eq!(30.0, gs.effective_stack_bb());
    }

    #[test]
    fn test_builder_mid_hand_defaults() {
        let gs = GameStateBuilder::new()
            .stacks(vec![975, 990])
            .big_blind(10)
            .in_for(vec![25, 10])
            .action_count(1)
            .aggressor(0)
            .build()
            .unwrap();

        assert!(gs.blinds_posted);
        assert_eq!(25, gs.bet_amt);
        assert_eq!(1, gs.acting_idx);
        assert!(gs.players[0].acted);
        assert!(!gs.players[1].acted);
        assert!(gs.players[0].aggressor);
        assert_eq!(1000, gs.players[0].starting_stack);
        assert_eq!(15, gs.to_call());
    }

    #[test]
    fn test_builder_postflop_acting_default() {
        let gs = GameStateBuilder::new()
            .stacks(vec![900, 900])
            .big_blind(10)
            .dealer_idx(1)
            .street(Street::Flop)
            .pot(200)
            .build()
            .unwrap();
        assert_eq!(0, gs.acting_idx);
        assert_eq!(200, gs.total_pot());
    }

    #[test]
    fn test_builder_errors() {
        assert_eq!(
            Err(GameStateBuilderError::MissingStacks),
            GameStateBuilder::new().big_blind(10).build()
        );
        assert_eq!(
            Err(GameStateBuilderError::MissingBigBlind),
            GameStateBuilder::new().stacks(vec![100, 100]).build()
        );
        assert_eq!(
            Err(GameStateBuilderError::UnsupportedPlayerCount(3)),
            GameStateBuilder::new().stacks(vec![100; 3]).big_blind(10).build()
        );
        assert_eq!(
            Err(GameStateBuilderError::InvalidStack(1)),
            GameStateBuilder::new().stacks(vec![100, 0]).big_blind(10).build()
        );
        assert_eq!(
            Err(GameStateBuilderError::InvalidBigBlind),
            GameStateBuilder::new().stacks(vec![100, 100]).big_blind(0).build()
        );
        assert_eq!(
            Err(GameStateBuilderError::InvalidSmallBlind {
                small_blind: 20,
                big_blind: 10
            }),
            GameStateBuilder::new().stacks(vec![100, 100]).blinds(10, 20).build()
        );
        assert_eq!(
            Err(GameStateBuilderError::InvalidDealerIndex(2)),
            GameStateBuilder::new()
                .stacks(vec![100, 100])
                .big_blind(10)
                .dealer_idx(2)
                .build()
        );
        assert_eq!(
            Err(GameStateBuilderError::InvalidBoardSize(2)),
            GameStateBuilder::new()
                .stacks(vec![100, 100])
                .big_blind(10)
                .board(vec![
                    Card::try_from("2c").unwrap(),
                    Card::try_from("3c").unwrap()
                ])
                .build()
        );
        assert_eq!(
            Err(GameStateBuilderError::DuplicateCard(Card::try_from("As").unwrap())),
            GameStateBuilder::new()
                .stacks(vec![100, 100])
                .big_blind(10)
                .hands(hands("AsKs", "AsQd"))
                .build()
        );
        assert!(matches!(
            GameStateBuilder::new()
                .stacks(vec![100, 100])
                .big_blind(10)
                .in_for(vec![1, 2, 3])
                .build(),
            Err(GameStateBuilderError::LengthMismatch { field: "in_for", actual: 3 })
        ));
    }

    #[test]
    fn test_builder_rejects_chips_past_action_codes() {
        assert_eq!(
            Err(GameStateBuilderError::InvalidStack(0)),
            GameStateBuilder::new()
                .stacks(vec![3_000_000_000, 3_000_000_000])
                .big_blind(10)
                .build()
        );
        assert_eq!(
            Err(GameStateBuilderError::InvalidStack(1)),
            GameStateBuilder::new()
                .stacks(vec![100, u32::MAX])
                .in_for(vec![0, 10])
                .big_blind(10)
                .build()
        );
        assert_eq!(
            Err(GameStateBuilderError::TooManyChips(MAX_CHIPS + 1)),
            GameStateBuilder::new()
                .stacks(vec![i32::MAX as u32, 1])
                .big_blind(1)
                .build()
        );
        assert_eq!(
            Err(GameStateBuilderError::TooManyChips(MAX_CHIPS + 100)),
            GameStateBuilder::new()
                .stacks(vec![i32::MAX as u32 - 100, 100])
                .pot(100)
                .big_blind(10)
                .build()
        );
    }

    #[test]
    fn test_largest_stacks_shove_and_call() {
        let mut gs = test_game_state(vec![2_000_000_000, 100_000_000], 100, 50, 0);
        gs.post_blinds().unwrap();

        let shove = ActionCode::bet(gs.acting_player().stack);
        assert_eq!(1_999_999_950, gs.advance(0, shove).unwrap());
        assert!(gs.players[0].is_all_in());
        gs.advance(1, ActionCode::CHECK_OR_CALL).unwrap();

        assert_eq!(Street::Showdown, gs.street);
        assert_eq!(2_100_000_000, gs.total_pot());
        assert_eq!(1_900_000_000, gs.players[0].uncalled);
    }

    #[test]
    fn test_view_hides_the_other_hand() {
        let gs = GameStateBuilder::new()
            .stacks(vec![100, 100])
            .big_blind(10)
            .hands(vec![
                HoleCards::from_str_pair("AsKs").unwrap(),
                HoleCards::from_str_pair("7d2c").unwrap(),
            ])
            .build()
            .unwrap();

        let view = gs.view_for(0).unwrap();
        assert_eq!(gs.players[0].hole_cards, view.players[0].hole_cards);
        assert_eq!(None, view.players[1].hole_cards);
        assert_eq!(None, gs.view_for(1).unwrap().players[0].hole_cards);
        assert_eq!(Err(GameStateError::InvalidSeat(2)), gs.view_for(2));
    }

    /// Play random legal codes and check the chip invariants after every
    /// step.
    #[test_log::test]
    fn test_random_play_keeps_chip_invariants() {
        let mut rng = StdRng::seed_from_u64(420);
        let evaluator = RankEvaluator;

        for hand in 0..300 {
            let mut deck = Deck::default();
            let mut deal = || {
                let a = deck.deal(&mut rng).unwrap();
                let b = deck.deal(&mut rng).unwrap();
                HoleCards::new(a, b).unwrap()
            };
            let dealt = vec![deal(), deal()];
            let stacks = vec![rng.random_range(1..400), rng.random_range(1..400)];
            let mut gs = GameStateBuilder::new()
                .stacks(stacks.clone())
                .blinds(10, 5)
                .dealer_idx(hand % 2)
                .hands(dealt)
                .build()
                .unwrap();
            gs.post_blinds().unwrap();

            let mut committed = gs.total_pot();
            while gs.street.is_betting() {
                let player = gs.acting_player();
                let code = match rng.random_range(0..10) {
                    0 => ActionCode::FOLD,
                    1..=4 => ActionCode::CHECK_OR_CALL,
                    _ => ActionCode::bet(gs.to_call() + rng.random_range(1..=player.stack)),
                };
                let street = gs.street;
                gs.advance(gs.acting_idx, code).unwrap();

                for p in &gs.players {
                    assert!(p.stack + p.in_for <= p.starting_stack || gs.is_complete());
                }
                if !gs.is_complete() {
                    assert!(
                        gs.total_pot() >= committed,
                        "pot went from {committed} to {} moving from {street} to {}",
                        gs.total_pot(),
                        gs.street
                    );
                }
                if gs.street == street && street.is_betting() {
                    assert_eq!(gs.bet_amt, gs.players.iter().map(|p| p.in_for).max().unwrap());
                }
                committed = gs.total_pot();
            }

            if gs.street == Street::Showdown {
                while gs.board.len() < 5 {
                    gs.board.push(deck.deal(&mut rng).unwrap());
                }
                gs.showdown(&evaluator).unwrap();
            }

            assert!(gs.is_complete());
            assert_eq!(
                stacks.iter().sum::<u32>(),
                gs.players.iter().map(|p| p.stack).sum::<u32>()
            );
            assert_eq!(gs.pot, gs.player_winnings.iter().sum::<u32>());
        }
    }
}
