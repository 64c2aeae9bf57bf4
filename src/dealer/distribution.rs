//! Splitting a drawn batch among players, and post-step count checks.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::error::{DistributionMismatchError, Result};
use crate::core::player::PlayerId;
use crate::rules::DistributionMethod;
use crate::zones::Zone;

/// A batch divided among a roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Split {
    /// Each card with its recipient, in dealing order.
    pub dealt: Vec<(PlayerId, Card)>,
    /// Cards a lump deal could not place.
    pub remainder: Vec<Card>,
}

/// Cards a lump deal of `batch` to `roster` seats cannot place.
#[must_use]
pub fn lump_remainder(batch: usize, roster: usize) -> usize {
    if roster == 0 {
        batch
    } else {
        batch % roster
    }
}

/// Divide `cards` among `roster`.
///
/// Round-robin gives card `i` to seat `i % n` until the batch is gone.
/// Lump makes one pass over the roster, handing each seat an equal
/// contiguous block; whatever is left after the last seat is returned as
/// the remainder.
#[must_use]
pub fn split(cards: Vec<Card>, roster: &[PlayerId], method: DistributionMethod) -> Split {
    if roster.is_empty() {
        return Split {
            dealt: Vec::new(),
            remainder: cards,
        };
    }

    match method {
        DistributionMethod::RoundRobin => Split {
            dealt: roster.iter().copied().cycle().zip(cards).collect(),
            remainder: Vec::new(),
        },
        DistributionMethod::Lump => {
            let block = cards.len() / roster.len();
            let placed = block * roster.len();
            let mut cards = cards;
            let remainder = cards.split_off(placed);

            let dealt = if block == 0 {
                Vec::new()
            } else {
                roster
                    .iter()
                    .zip(cards.chunks(block))
                    .flat_map(|(&seat, chunk)| chunk.iter().map(move |&card| (seat, card)))
                    .collect()
            };
            Split { dealt, remainder }
        }
    }
}

/// Fail unless exactly `target` cards reached `zone`.
pub fn check_distribution(zone: Zone, target: usize, moved: usize) -> Result<()> {
    if moved < target {
        return Err(DistributionMismatchError::UnderDistributed {
            zone,
            target,
            moved,
            leftover: target - moved,
        }
        .into());
    }
    if moved > target {
        return Err(DistributionMismatchError::OverDistributed {
            zone,
            target,
            moved,
            surplus: moved - target,
        }
        .into());
    }
    Ok(())
}

/// One zone serviced during a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStep {
    pub zone: Zone,
    pub method: DistributionMethod,
    pub target: usize,
    pub moved: usize,
}

/// What a `deal` call moved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandReport {
    pub hand_index: usize,
    pub player_count: usize,
    pub steps: Vec<ZoneStep>,
}

impl HandReport {
    /// Cards moved into `zone` this hand.
    #[must_use]
    pub fn moved(&self, zone: Zone) -> usize {
        self.steps
            .iter()
            .filter(|s| s.zone == zone)
            .map(|s| s.moved)
            .sum()
    }

    /// Cards drawn from Unused this hand.
    #[must_use]
    pub fn total_drawn(&self) -> usize {
        self.steps.iter().map(|s| s.moved).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardUniverse;
    use crate::core::error::Error;

    fn cards(n: usize) -> Vec<Card> {
        CardUniverse::french().iter().take(n).collect()
    }

    #[test]
    fn test_round_robin_cycles_roster() {
        let roster = PlayerId::roster(3);
        let batch = cards(7);
        let split = split(batch.clone(), &roster, DistributionMethod::RoundRobin);

        assert!(split.remainder.is_empty());
        assert_eq!(split.dealt.len(), 7);
        assert_eq!(split.dealt[0], (PlayerId::new(0), batch[0]));
        assert_eq!(split.dealt[4], (PlayerId::new(1), batch[4]));
        assert_eq!(split.dealt[6], (PlayerId::new(0), batch[6]));
    }

    #[test]
    fn test_lump_hands_out_blocks() {
        let roster = PlayerId::roster(2);
        let batch = cards(6);
        let split = split(batch.clone(), &roster, DistributionMethod::Lump);

        let first: Vec<_> = split.dealt.iter().filter(|(p, _)| p.index() == 0).map(|&(_, c)| c).collect();
        assert_eq!(first, batch[..3].to_vec());
        assert!(split.remainder.is_empty());
    }

    #[test]
    fn test_lump_remainder_is_returned() {
        let roster = PlayerId::roster(4);
        let batch = cards(6);
        let split = split(batch.clone(), &roster, DistributionMethod::Lump);

        assert_eq!(split.dealt.len(), 4);
        assert_eq!(split.remainder, batch[4..].to_vec());
        assert_eq!(lump_remainder(6, 4), 2);

        let tiny = super::split(cards(3), &roster, DistributionMethod::Lump);
        assert!(tiny.dealt.is_empty());
        assert_eq!(tiny.remainder.len(), 3);
    }

    #[test]
    fn test_check_distribution_directions() {
        assert!(check_distribution(Zone::Board, 3, 3).is_ok());

        let under = check_distribution(Zone::Board, 3, 1).unwrap_err();
        assert!(matches!(
            under,
            Error::DistributionMismatch(DistributionMismatchError::UnderDistributed { leftover: 2, .. })
        ));

        let over = check_distribution(Zone::PlayerHands, 3, 5).unwrap_err();
        assert!(matches!(
            over,
            Error::DistributionMismatch(DistributionMismatchError::OverDistributed { surplus: 2, .. })
        ));
    }
}
