//! Assertions shared by tests that play whole hands.
use std::collections::HashSet;

use super::GameState;
use super::action::{Action, AgentAction};
use super::game_state::Street;
use super::historian::HistoryRecord;

/// Check a finished hand for chip and card consistency.
pub fn assert_valid_game_state(game_state: &GameState) {
    assert_eq!(Street::Complete, game_state.street);

    // Everything in front of the players was collected
    for (idx, player) in game_state.players.iter().enumerate() {
        assert_eq!(0, player.in_for, "Player {idx} still has chips in front");
        assert_eq!(0, player.uncalled, "Player {idx} wasn't given back uncalled chips");
    }
    assert_eq!(0, game_state.bet_amt);

    // The whole pot was handed out, and only to live players.
    let total_winning: u32 = game_state.player_winnings.iter().sum();
    assert_eq!(game_state.pot, total_winning);
    if game_state.pot > 0 {
        assert!(
            game_state.player_winnings.iter().any(|w| *w > 0),
            "Someone must win a non-empty pot"
        );
    }
    for (idx, player) in game_state.players.iter().enumerate() {
        if player.folded {
            assert_eq!(
                0, game_state.player_winnings[idx],
                "Player {idx} folded but won chips"
            );
        }
        assert!(
            game_state.player_reward(idx) >= -(player.starting_stack as i64),
            "Player {idx} lost more than they started with"
        );
    }
    assert!(
        game_state.players.iter().filter(|p| p.folded).count() < game_state.num_players(),
        "Everyone folded"
    );

    assert!(game_state.dealer_idx < game_state.num_players());
    assert!(game_state.small_blind <= game_state.big_blind);

    validate_cards(game_state);
}

fn validate_cards(game_state: &GameState) {
    let board_len = game_state.board.len();
    assert!(
        matches!(board_len, 0 | 3 | 4 | 5),
        "Invalid board card count: {board_len}"
    );
    if game_state.street_before == Street::Showdown {
        assert_eq!(5, board_len, "Showdown without a full board");
    }

    let mut seen = HashSet::new();
    let hole = game_state
        .players
        .iter()
        .filter_map(|p| p.hole_cards)
        .flat_map(|h| *h.cards());
    for card in game_state.board.iter().copied().chain(hole) {
        assert!(seen.insert(card), "Duplicate card {card} dealt");
    }
}

/// Check the order of events a historian saw for one hand.
pub fn assert_valid_history(history_storage: &[HistoryRecord]) {
    assert!(!history_storage.is_empty());

    assert!(
        matches!(history_storage[0].action, Action::GameStart(_)),
        "First action should be GameStart, but was: {:?}",
        history_storage[0].action
    );

    // Awards come last and nothing is played after them.
    let first_award = history_storage
        .iter()
        .position(|r| matches!(r.action, Action::Award(_)))
        .expect("a finished hand awards the pot");
    assert!(
        history_storage[first_award..]
            .iter()
            .all(|r| matches!(r.action, Action::Award(_)))
    );

    assert_no_player_actions_after_fold(history_storage);
    validate_street_progression(history_storage);
}

fn assert_no_player_actions_after_fold(history_storage: &[HistoryRecord]) {
    let fold_index = history_storage.iter().position(|record| {
        matches!(
            &record.action,
            Action::PlayedAction(action) if action.action == AgentAction::Fold
        )
    });

    if let Some(fold_index) = fold_index {
        let actions_after_fold = history_storage
            .iter()
            .skip(fold_index + 1)
            .filter(|record| matches!(record.action, Action::PlayedAction(_)));
        assert_eq!(0, actions_after_fold.count());
    }
}

fn validate_street_progression(history_storage: &[HistoryRecord]) {
    let streets: Vec<Street> = history_storage
        .iter()
        .filter_map(|record| match record.action {
            Action::StreetAdvance(street) => Some(street),
            _ => None,
        })
        .collect();

    for pair in streets.windows(2) {
        assert!(
            pair[0] < pair[1],
            "Street went from {} to {}",
            pair[0],
            pair[1]
        );
    }

    // Players only act on betting streets.
    for record in history_storage {
        if let Action::PlayedAction(payload) = &record.action {
            assert!(payload.street.is_betting());
        }
    }
}
