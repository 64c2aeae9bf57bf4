//! The card universe: every distinct card a deck configuration contains.
//!
//! The universe is immutable. A ledger is seeded from a shuffled copy of it
//! and afterwards only ever moves those same cards between zones.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit, WildColor};
use crate::core::rng::GameRng;

/// Base deck families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckType {
    /// 13 ranks x 4 suits.
    #[default]
    French,
}

impl DeckType {
    /// Number of base (non-wild) cards.
    #[must_use]
    pub const fn base_size(self) -> usize {
        match self {
            DeckType::French => 52,
        }
    }
}

/// Immutable enumerable set of distinct card identities.
///
/// ## Example
///
/// ```
/// use rust_dealer::cards::{CardUniverse, DeckType};
///
/// let universe = CardUniverse::new(DeckType::French, 2);
/// assert_eq!(universe.len(), 54);
/// assert_eq!(universe.wild_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUniverse {
    deck_type: DeckType,
    wild_count: u16,
    cards: Vec<Card>,
}

impl CardUniverse {
    /// Enumerate a deck: every rank of every suit, then `wild_count` wild
    /// cards cycling Red, Black, Blue with sequence numbers `1..=wild_count`.
    #[must_use]
    pub fn new(deck_type: DeckType, wild_count: u16) -> Self {
        let mut cards = Vec::with_capacity(deck_type.base_size() + wild_count as usize);

        match deck_type {
            DeckType::French => {
                for rank in Rank::ALL {
                    for suit in Suit::ALL {
                        cards.push(Card::standard(rank, suit));
                    }
                }
            }
        }

        let colors = WildColor::CYCLE.iter().cycle();
        for (number, &color) in (1..=wild_count).zip(colors) {
            cards.push(Card::wild(color, number));
        }

        Self {
            deck_type,
            wild_count,
            cards,
        }
    }

    /// Standard 52-card French deck with no wild cards.
    #[must_use]
    pub fn french() -> Self {
        Self::new(DeckType::French, 0)
    }

    #[must_use]
    pub fn deck_type(&self) -> DeckType {
        self.deck_type
    }

    #[must_use]
    pub fn wild_count(&self) -> u16 {
        self.wild_count
    }

    /// Number of distinct cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether a card belongs to this universe.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Iterate over cards in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// A freshly shuffled ordering of the whole universe.
    #[must_use]
    pub fn shuffled(&self, rng: &mut GameRng) -> Vec<Card> {
        let mut order = self.cards.clone();
        rng.shuffle(&mut order);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_french_deck_is_distinct() {
        let universe = CardUniverse::french();
        let distinct: HashSet<_> = universe.iter().collect();

        assert_eq!(universe.len(), 52);
        assert_eq!(distinct.len(), 52);
        assert!(universe.iter().all(|c| !c.is_wild()));
    }

    #[test]
    fn test_wild_cards_cycle_colors() {
        let universe = CardUniverse::new(DeckType::French, 4);
        let wilds: Vec<_> = universe.iter().filter(|c| c.is_wild()).collect();

        assert_eq!(wilds, vec![
            Card::wild(WildColor::Red, 1),
            Card::wild(WildColor::Black, 2),
            Card::wild(WildColor::Blue, 3),
            Card::wild(WildColor::Red, 4),
        ]);
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let universe = CardUniverse::new(DeckType::French, 3);
        let mut rng = GameRng::new(11);

        let mut shuffled = universe.shuffled(&mut rng);
        assert_ne!(shuffled, universe.iter().collect::<Vec<_>>());

        shuffled.sort();
        let mut expected: Vec<_> = universe.iter().collect();
        expected.sort();
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn test_contains() {
        let universe = CardUniverse::french();
        assert!(universe.contains(Card::standard(Rank::Ace, Suit::Hearts)));
        assert!(!universe.contains(Card::wild(WildColor::Red, 1)));
    }
}
