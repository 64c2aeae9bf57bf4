//! Public view of a table.
//!
//! `ObservableState` is what every player may see when deciding: zone
//! counts, the face-up board, the top of the trash pile, and how many cards
//! each seat holds. Individual hand contents are never part of it.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckType};
use crate::core::error::{Result, ZoneConsistencyError};
use crate::core::player::PlayerId;

/// Aggregate, non-secret state handed to player decision logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableState {
    pub player_count: usize,
    pub board: Vec<Card>,
    pub trash_top: Option<Card>,
    pub unused_count: usize,
    pub trash_pile_count: usize,
    pub player_hand_count: usize,
    /// Cards held per seat, in roster order.
    pub hand_sizes: Vec<(PlayerId, usize)>,
    pub deck_type: DeckType,
    pub wild_count: u16,
}

impl ObservableState {
    /// Size of the universe these counts describe.
    #[must_use]
    pub fn universe_size(&self) -> usize {
        self.deck_type.base_size() + self.wild_count as usize
    }

    /// Cards held by one seat, if the seat is on the roster.
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> Option<usize> {
        self.hand_sizes
            .iter()
            .find(|(p, _)| *p == player)
            .map(|&(_, n)| n)
    }

    /// Reject snapshots whose zone counts do not add up to the universe.
    pub fn validate(&self) -> Result<()> {
        let found =
            self.unused_count + self.board.len() + self.trash_pile_count + self.player_hand_count;
        let expected = self.universe_size();
        if found != expected {
            return Err(ZoneConsistencyError::ConservationBroken { expected, found }.into());
        }

        let seated: usize = self.hand_sizes.iter().map(|&(_, n)| n).sum();
        if seated > self.player_hand_count {
            return Err(ZoneConsistencyError::ConservationBroken {
                expected: self.player_hand_count,
                found: seated,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn state() -> ObservableState {
        ObservableState {
            player_count: 2,
            board: vec![Card::standard(Rank::Ace, Suit::Spades)],
            trash_top: None,
            unused_count: 47,
            trash_pile_count: 0,
            player_hand_count: 4,
            hand_sizes: vec![(PlayerId::new(0), 2), (PlayerId::new(1), 2)],
            deck_type: DeckType::French,
            wild_count: 0,
        }
    }

    #[test]
    fn test_validate_accepts_consistent_counts() {
        assert!(state().validate().is_ok());
        assert_eq!(state().hand_size(PlayerId::new(1)), Some(2));
        assert_eq!(state().hand_size(PlayerId::new(5)), None);
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let mut bad = state();
        bad.unused_count = 50;
        assert!(bad.validate().is_err());
    }
}
