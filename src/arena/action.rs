use std::fmt;

use crate::core::{Card, HoleCards, Rank};

use super::errors::GameStateError;
use super::game_state::Street;

/// The integer every agent answers with.
///
/// - `-1` folds.
/// - `0` checks, or calls whatever is owed.
/// - Any positive value puts that many more chips in this street, as a
///   call, bet, or raise. Requests above the stack are treated as all in.
///
/// Anything below `-1` is rejected by the engine.
///
/// # Examples
///
/// ```
/// use headsup_holdem::arena::action::{ActionCode, AgentAction};
///
/// assert_eq!(Ok(AgentAction::Fold), ActionCode::FOLD.decode());
/// assert_eq!(Ok(AgentAction::Bet(25)), ActionCode::new(25).decode());
/// assert!(ActionCode::new(-7).decode().is_err());
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ActionCode(i32);

impl ActionCode {
    pub const FOLD: ActionCode = ActionCode(-1);
    pub const CHECK_OR_CALL: ActionCode = ActionCode(0);

    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Put `chips` more in. Zero is the same as check or call.
    pub fn bet(chips: u32) -> Self {
        Self(i32::try_from(chips).unwrap_or(i32::MAX))
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn decode(self) -> Result<AgentAction, GameStateError> {
        match self.0 {
            -1 => Ok(AgentAction::Fold),
            0 => Ok(AgentAction::CheckOrCall),
            n if n > 0 => Ok(AgentAction::Bet(n as u32)),
            n => Err(GameStateError::InvalidActionCode(n)),
        }
    }
}

impl From<i32> for ActionCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<ActionCode> for i32 {
    fn from(code: ActionCode) -> Self {
        code.0
    }
}

impl From<AgentAction> for ActionCode {
    fn from(action: AgentAction) -> Self {
        match action {
            AgentAction::Fold => Self::FOLD,
            AgentAction::CheckOrCall => Self::CHECK_OR_CALL,
            AgentAction::Bet(chips) => Self::bet(chips),
        }
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded `ActionCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum AgentAction {
    /// Folds the current hand.
    Fold,
    /// Matches the current bet, which is a check when nothing is owed.
    CheckOrCall,
    /// Puts this many more chips in.
    Bet(u32),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The hand has started.
pub struct GameStartPayload {
    pub small_blind: u32,
    pub big_blind: u32,
    pub dealer_idx: usize,
    pub stacks: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedBetType {
    SmallBlind,
    BigBlind,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBetPayload {
    /// What was actually posted. This can be under the blind when it puts
    /// the player all in.
    pub bet: u32,
    pub player_stack: u32,
    pub idx: usize,
    pub forced_bet_type: ForcedBetType,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealHolePayload {
    pub idx: usize,
    pub cards: HoleCards,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayedActionPayload {
    /// The code the agent returned
    pub code: ActionCode,
    pub action: AgentAction,

    pub idx: usize,
    pub street: Street,
    /// Chips that actually went in
    pub committed: u32,
    pub player_stack: u32,

    pub starting_bet: u32,
    pub final_bet: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPayload {
    pub total_pot: u32,
    pub award_amount: u32,
    /// Only known when the hand went to showdown
    pub rank: Option<Rank>,
    pub idx: usize,
}

/// Everything that can happen in a hand, in the order historians see it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    GameStart(GameStartPayload),
    /// A blind was posted.
    ForcedBet(ForcedBetPayload),
    DealHole(DealHolePayload),
    /// A community card has been dealt.
    DealCommunity(Card),
    /// A player has played an action.
    PlayedAction(PlayedActionPayload),
    /// The street has moved on.
    StreetAdvance(Street),
    /// There was some pot given to a player
    Award(AwardPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_keep_their_values() {
        assert_eq!(-1, ActionCode::FOLD.get());
        assert_eq!(0, ActionCode::CHECK_OR_CALL.get());
        assert_eq!(ActionCode::CHECK_OR_CALL, ActionCode::bet(0));
        assert_eq!(ActionCode::new(i32::MAX), ActionCode::bet(u32::MAX));
    }

    #[test]
    fn test_decode() {
        assert_eq!(Ok(AgentAction::CheckOrCall), ActionCode::new(0).decode());
        assert_eq!(Ok(AgentAction::Bet(1)), ActionCode::new(1).decode());
        assert_eq!(
            Err(GameStateError::InvalidActionCode(-2)),
            ActionCode::new(-2).decode()
        );
        assert_eq!(
            Err(GameStateError::InvalidActionCode(i32::MIN)),
            ActionCode::new(i32::MIN).decode()
        );
    }

    #[test]
    fn test_encode_agent_action() {
        assert_eq!(ActionCode::FOLD, AgentAction::Fold.into());
        assert_eq!(ActionCode::new(40), AgentAction::Bet(40).into());
        assert_eq!(-1, i32::from(ActionCode::FOLD));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_code_serializes_as_integer() {
        assert_eq!("-1", serde_json::to_string(&ActionCode::FOLD).unwrap());
        let code: ActionCode = serde_json::from_str("250").unwrap();
        assert_eq!(ActionCode::new(250), code);
    }
}
