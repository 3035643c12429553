use std::{cell::RefCell, rc::Rc};

use crate::arena::{GameState, action::Action};

use super::{Historian, HistorianError};

/// One recorded action and the game state right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub action: Action,
    pub game_state: GameState,
}

/// Keeps every action in a shared vector.
///
/// The simulation owns the historian, so hold on to `get_storage()` before
/// handing it over to read the history after the hand.
#[derive(Debug, Clone, Default)]
pub struct VecHistorian {
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_storage(&self) -> Rc<RefCell<Vec<HistoryRecord>>> {
        self.records.clone()
    }
}

impl Historian for VecHistorian {
    fn record_action(
        &mut self,
        game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError> {
        self.records.try_borrow_mut()?.push(HistoryRecord {
            action,
            game_state: game_state.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arena::{
        GameStateBuilder, HoldemSimulationBuilder,
        action::{ForcedBetType, PlayedActionPayload},
        agent::{FishAgent, FoldingAgent},
        game_state::Street,
        test_util::assert_valid_history,
    };

    fn run(agents: Vec<Box<dyn crate::arena::Agent>>) -> Vec<HistoryRecord> {
        let historian = VecHistorian::new();
        let storage = historian.get_storage();
        let game_state = GameStateBuilder::new()
            .stacks(vec![1000, 1000])
            .blinds(10, 5)
            .build()
            .unwrap();
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![Box::new(historian)])
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        sim.run(&mut rng).unwrap();

        let records = storage.borrow().clone();
        records
    }

    #[test_log::test]
    fn test_records_a_fold() {
        let records = run(vec![
            Box::new(FoldingAgent::new("folder")),
            Box::new(FoldingAgent::new("other")),
        ]);
        let actions: Vec<&Action> = records.iter().map(|r| &r.action).collect();

        assert!(matches!(actions[0], Action::GameStart(_)));
        assert!(matches!(
            actions[1],
            Action::ForcedBet(p) if p.forced_bet_type == ForcedBetType::SmallBlind && p.idx == 0
        ));
        assert!(matches!(
            actions[2],
            Action::ForcedBet(p) if p.forced_bet_type == ForcedBetType::BigBlind && p.bet == 10
        ));
        assert!(matches!(actions[3], Action::DealHole(p) if p.idx == 0));
        assert!(matches!(actions[4], Action::DealHole(p) if p.idx == 1));
        assert!(matches!(
            actions[5],
            Action::PlayedAction(PlayedActionPayload { idx: 0, committed: 0, .. })
        ));
        assert!(matches!(
            actions[6],
            Action::Award(p) if p.idx == 1 && p.award_amount == 15 && p.rank.is_none()
        ));
        assert_eq!(7, actions.len());
        assert_valid_history(&records);
        assert_eq!("folder", records[0].game_state.players[0].name);
    }

    #[test_log::test]
    fn test_records_every_street() {
        let records = run(vec![
            Box::new(FishAgent::new("fish-0")),
            Box::new(FishAgent::new("fish-1")),
        ]);

        let streets: Vec<Street> = records
            .iter()
            .filter_map(|r| match r.action {
                Action::StreetAdvance(street) => Some(street),
                _ => None,
            })
            .collect();
        assert_eq!(
            vec![Street::Flop, Street::Turn, Street::River, Street::Showdown],
            streets
        );

        let community = records
            .iter()
            .filter(|r| matches!(r.action, Action::DealCommunity(_)))
            .count();
        assert_eq!(5, community);

        let awarded: u32 = records
            .iter()
            .filter_map(|r| match &r.action {
                Action::Award(p) => {
                    assert!(p.rank.is_some());
                    Some(p.award_amount)
                }
                _ => None,
            })
            .sum();
        assert_eq!(20, awarded);
        assert_valid_history(&records);
    }
}
