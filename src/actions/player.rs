//! Seated players and their decision capability.
//!
//! A `Player` owns no cards. Its hand is whatever the ledger attributes to
//! its seat, handed to the behavior each turn inside a `PlayerView`.

use std::collections::VecDeque;
use std::fmt;

use super::instruction::{Instruction, InstructionKind};
use crate::cards::Card;
use crate::core::observe::ObservableState;
use crate::core::player::PlayerId;

/// What a player sees when deciding: the public table plus their own hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub player: PlayerId,
    pub public: ObservableState,
    pub hand: Vec<Card>,
}

/// Decision-making capability.
pub trait PlayerBehavior<K: InstructionKind> {
    /// Choose this turn's instructions.
    fn decide(&mut self, view: &PlayerView) -> Vec<Instruction<K>>;
}

/// Never asks for anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveBehavior;

impl<K: InstructionKind> PlayerBehavior<K> for PassiveBehavior {
    fn decide(&mut self, _view: &PlayerView) -> Vec<Instruction<K>> {
        Vec::new()
    }
}

/// Plays back a fixed list of turns, then passes.
#[derive(Clone, Debug)]
pub struct ScriptedBehavior<K> {
    turns: VecDeque<Vec<Instruction<K>>>,
}

impl<K: InstructionKind> ScriptedBehavior<K> {
    pub fn new(turns: impl IntoIterator<Item = Vec<Instruction<K>>>) -> Self {
        Self {
            turns: turns.into_iter().collect(),
        }
    }

    /// Turns not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.turns.len()
    }
}

impl<K: InstructionKind> PlayerBehavior<K> for ScriptedBehavior<K> {
    fn decide(&mut self, _view: &PlayerView) -> Vec<Instruction<K>> {
        self.turns.pop_front().unwrap_or_default()
    }
}

/// Behavior backed by a closure, for table-driven or model-backed play.
pub struct FnBehavior<F>(pub F);

impl<K, F> PlayerBehavior<K> for FnBehavior<F>
where
    K: InstructionKind,
    F: FnMut(&PlayerView) -> Vec<Instruction<K>>,
{
    fn decide(&mut self, view: &PlayerView) -> Vec<Instruction<K>> {
        (self.0)(view)
    }
}

/// A seat at the table with its own decision capability.
pub struct Player<K: InstructionKind> {
    id: PlayerId,
    name: String,
    score: i64,
    behavior: Box<dyn PlayerBehavior<K>>,
}

impl<K: InstructionKind> Player<K> {
    pub fn new(id: PlayerId, name: impl Into<String>, behavior: impl PlayerBehavior<K> + 'static) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            behavior: Box::new(behavior),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    /// Swap in a different decision capability.
    pub fn set_behavior(&mut self, behavior: impl PlayerBehavior<K> + 'static) {
        self.behavior = Box::new(behavior);
    }

    /// Ask the behavior for this turn's instructions.
    pub fn take_action(&mut self, view: &PlayerView) -> Vec<Instruction<K>> {
        self.behavior.decide(view)
    }
}

impl<K: InstructionKind> fmt::Debug for Player<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}
