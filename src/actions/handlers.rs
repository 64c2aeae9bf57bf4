//! Handler tables: one registered function per instruction kind.
//!
//! A table can only be built once every kind in `InstructionKind::ALL`
//! has a handler, so dispatch never has to discover a missing one at
//! play time.

use std::fmt;

use rustc_hash::FxHashMap;

use super::instruction::{Instruction, InstructionKind};
use crate::core::error::{ConfigurationError, Result, RuleViolationError};
use crate::core::player::PlayerId;
use crate::dealer::Dealer;
use crate::rules::RuleSet;
use crate::zones::ZoneLedger;

/// Everything a handler may touch while applying one instruction.
pub struct ActionContext<'a> {
    /// The player whose instruction is being applied.
    pub player: PlayerId,
    pub roster: &'a [PlayerId],
    pub dealer: &'a Dealer,
    pub ledger: &'a mut ZoneLedger,
    pub rules: &'a RuleSet,
}

impl ActionContext<'_> {
    /// Fail unless `player` is seated at this table.
    pub fn require_seated(&self, player: PlayerId) -> Result<()> {
        if self.roster.contains(&player) {
            Ok(())
        } else {
            Err(RuleViolationError::UnknownPlayer { player }.into())
        }
    }
}

/// A registered instruction handler.
pub type Handler<K> = Box<dyn Fn(&mut ActionContext<'_>, &Instruction<K>) -> Result<()>>;

/// Complete mapping from instruction kind to handler.
pub struct HandlerTable<K: InstructionKind> {
    handlers: FxHashMap<K, Handler<K>>,
}

impl<K: InstructionKind> HandlerTable<K> {
    #[must_use]
    pub fn builder() -> HandlerTableBuilder<K> {
        HandlerTableBuilder {
            handlers: FxHashMap::default(),
        }
    }

    /// Apply one instruction.
    pub fn dispatch(&self, ctx: &mut ActionContext<'_>, instruction: &Instruction<K>) -> Result<()> {
        match self.handlers.get(&instruction.kind) {
            Some(handler) => handler(ctx, instruction),
            None => Err(RuleViolationError::InvalidInstruction {
                reason: format!("no handler for {:?}", instruction.kind),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<K: InstructionKind> fmt::Debug for HandlerTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().map(|k| format!("{k:?}")).collect();
        kinds.sort();
        f.debug_struct("HandlerTable").field("kinds", &kinds).finish()
    }
}

/// Collects handlers and checks completeness on `build`.
pub struct HandlerTableBuilder<K: InstructionKind> {
    handlers: FxHashMap<K, Handler<K>>,
}

impl<K: InstructionKind> HandlerTableBuilder<K> {
    /// Register the handler for `kind`, replacing any earlier one.
    #[must_use]
    pub fn on(
        mut self,
        kind: K,
        handler: impl Fn(&mut ActionContext<'_>, &Instruction<K>) -> Result<()> + 'static,
    ) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    pub fn build(self) -> Result<HandlerTable<K>> {
        if let Some(kind) = K::ALL.iter().find(|k| !self.handlers.contains_key(k)) {
            return Err(ConfigurationError::MissingHandler {
                kind: format!("{kind:?}"),
            }
            .into());
        }
        Ok(HandlerTable {
            handlers: self.handlers,
        })
    }
}
