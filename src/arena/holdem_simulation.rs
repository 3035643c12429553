use rand::Rng;
use tracing::{debug, instrument, trace, warn};

use crate::core::{Deck, HoleCards};

use super::{
    Agent, GameState,
    action::{
        Action, AwardPayload, DealHolePayload, ForcedBetPayload, ForcedBetType, GameStartPayload,
        PlayedActionPayload,
    },
    errors::{GameStateError, HoldemSimulationError},
    game_state::Street,
    historian::Historian,
    showdown::{RankEvaluator, ShowdownEvaluator},
};

/// # Description
///
/// Plays one heads-up hand between two agents. The simulation posts the
/// blinds, deals, asks whichever agent is up for an `ActionCode`, and
/// applies it to the `GameState` until the hand is complete.
///
/// Every step is reported to the historians as an `Action`.
///
/// A simulation can start mid-hand from a `GameState` built with the
/// mid-hand setters. Missing hole cards and board cards are dealt from the
/// deck before play resumes.
///
/// # Errors
///
/// An agent answering with an illegal code stops the hand with the
/// `GameStateError` that `GameState::advance` returned. The state is left
/// as it was before that action.
pub struct HoldemSimulation {
    pub agents: Vec<Box<dyn Agent>>,
    pub game_state: GameState,
    pub deck: Deck,
    pub historians: Vec<Box<dyn Historian>>,
    pub(crate) evaluator: Box<dyn ShowdownEvaluator>,
    pub(crate) panic_on_historian_error: bool,
}

impl HoldemSimulation {
    pub fn more_to_do(&self) -> bool {
        !self.game_state.is_complete()
    }

    /// Play the hand to the end.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<(), HoldemSimulationError> {
        if !self.game_state.blinds_posted {
            self.start_hand()?;
        }
        self.deal_hole_cards(rng)?;
        self.deal_board(rng)?;

        while self.more_to_do() {
            self.step(rng)?;
        }
        Ok(())
    }

    /// Advance the hand by a single agent action, or by the showdown once
    /// betting is over.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<(), HoldemSimulationError> {
        match self.game_state.street {
            Street::Complete => Ok(()),
            Street::Showdown => {
                self.deal_board(rng)?;
                self.game_state.showdown(self.evaluator.as_ref())?;
                self.record_awards();
                Ok(())
            }
            _ => self.run_agent_action(rng),
        }
    }

    fn start_hand(&mut self) -> Result<(), HoldemSimulationError> {
        for (player, agent) in self.game_state.players.iter_mut().zip(self.agents.iter()) {
            player.name = agent.name().to_string();
        }

        self.record_action(Action::GameStart(GameStartPayload {
            small_blind: self.game_state.small_blind,
            big_blind: self.game_state.big_blind,
            dealer_idx: self.game_state.dealer_idx,
            stacks: self.game_state.players.iter().map(|p| p.stack).collect(),
        }));

        self.game_state.post_blinds()?;

        let forced = [
            (self.game_state.small_blind_idx(), ForcedBetType::SmallBlind),
            (self.game_state.big_blind_idx(), ForcedBetType::BigBlind),
        ];
        for (idx, forced_bet_type) in forced {
            let player = &self.game_state.players[idx];
            let payload = ForcedBetPayload {
                bet: player.in_for,
                player_stack: player.stack,
                idx,
                forced_bet_type,
            };
            self.record_action(Action::ForcedBet(payload));
        }
        Ok(())
    }

    fn deal_hole_cards<R: Rng>(&mut self, rng: &mut R) -> Result<(), HoldemSimulationError> {
        for idx in 0..self.game_state.num_players() {
            if self.game_state.players[idx].hole_cards.is_some() {
                continue;
            }
            let first = self.deck.deal(rng).ok_or(HoldemSimulationError::DeckExhausted)?;
            let second = self.deck.deal(rng).ok_or(HoldemSimulationError::DeckExhausted)?;
            let cards = HoleCards::new(first, second).map_err(|e| {
                GameStateError::InternalInvariantViolation(format!("bad deal: {e}"))
            })?;
            self.game_state.players[idx].hole_cards = Some(cards);
            trace!(idx, %cards, "Dealt hole cards");
            self.record_action(Action::DealHole(DealHolePayload { idx, cards }));
        }
        Ok(())
    }

    /// Bring the board up to what the current street needs.
    fn deal_board<R: Rng>(&mut self, rng: &mut R) -> Result<(), HoldemSimulationError> {
        if self.game_state.is_complete() {
            return Ok(());
        }
        while self.game_state.board.len() < self.game_state.street.board_len() {
            let card = self.deck.deal(rng).ok_or(HoldemSimulationError::DeckExhausted)?;
            self.game_state.board.push(card);
            self.record_action(Action::DealCommunity(card));
        }
        Ok(())
    }

    fn run_agent_action<R: Rng>(&mut self, rng: &mut R) -> Result<(), HoldemSimulationError> {
        let idx = self.game_state.acting_idx;
        let street = self.game_state.street;
        let starting_bet = self.game_state.bet_amt;
        let in_for = self.game_state.players[idx].in_for;

        let view = self.game_state.view_for(idx)?;
        let code = self.agents[idx].act(&view);
        let action = code.decode()?;
        let committed = self.game_state.advance(idx, code)?;

        let payload = PlayedActionPayload {
            code,
            action,
            idx,
            street,
            committed,
            player_stack: self.game_state.players[idx].stack,
            starting_bet,
            final_bet: starting_bet.max(in_for + committed),
        };
        self.record_action(Action::PlayedAction(payload));

        if self.game_state.is_complete() {
            self.record_awards();
        } else if self.game_state.street != street {
            debug!(from = %street, to = %self.game_state.street, "Street advanced");
            self.record_action(Action::StreetAdvance(self.game_state.street));
            self.deal_board(rng)?;
        }
        Ok(())
    }

    fn record_awards(&mut self) {
        let total_pot: u32 = self.game_state.player_winnings.iter().sum();
        let went_to_showdown = self.game_state.street_before == Street::Showdown;

        for idx in 0..self.game_state.num_players() {
            let award_amount = self.game_state.player_winnings[idx];
            if award_amount == 0 {
                continue;
            }
            let rank = match self.game_state.players[idx].hole_cards {
                Some(hole) if went_to_showdown => {
                    Some(RankEvaluator::rank(&hole, &self.game_state.board))
                }
                _ => None,
            };
            self.record_action(Action::Award(AwardPayload {
                total_pot,
                award_amount,
                rank,
                idx,
            }));
        }
    }

    fn record_action(&mut self, action: Action) {
        let game_state = &self.game_state;
        let panic_on_historian_error = self.panic_on_historian_error;
        self.historians.retain_mut(|historian| {
            match historian.record_action(game_state, action.clone()) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian failed to record action: {error}");
                    }
                    warn!(%error, "Historian failed to record action, removing it");
                    false
                }
            }
        });
    }
}
