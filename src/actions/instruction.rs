//! Player instructions.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::player::PlayerId;

/// The closed set of operations a game lets players request.
///
/// Implemented by a fieldless enum per game. `ALL` must list every
/// variant; handler tables are checked against it when built.
pub trait InstructionKind: Copy + Eq + Hash + Debug + 'static {
    const ALL: &'static [Self];
}

/// One requested operation, with the cards and target it names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction<K> {
    pub kind: K,
    /// Cards the instruction acts on. Most instructions name four or fewer.
    pub cards: SmallVec<[Card; 4]>,
    pub target: Option<PlayerId>,
}

impl<K: InstructionKind> Instruction<K> {
    #[must_use]
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            cards: SmallVec::new(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.cards.extend(cards);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.target = Some(target);
        self
    }
}
