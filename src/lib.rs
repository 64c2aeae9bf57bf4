//! # rust-dealer
//!
//! A zone-custody rules engine for turn-based, multi-zone card games.
//!
//! ## Design Principles
//!
//! 1. **Conservation**: Every card of the universe is in exactly one of four
//!    zones (Unused, Board, TrashPile, PlayerHands) whenever the ledger is
//!    settled. Every mutation validates its whole batch before touching a zone.
//!
//! 2. **Capability-Gated Custody**: Only the holder of a ledger's
//!    `CustodyKey` can grant or revoke custody. Dealers receive a narrower
//!    `GameAssignment`; players never touch the ledger directly.
//!
//! 3. **Fail-Fast Configuration**: A `RuleSet` cannot exist unless it is
//!    well-formed and proven never to exhaust the deck for any supported
//!    player count.
//!
//! ## Architecture
//!
//! - **Single source of truth**: the ledger attributes every held card to
//!   its holder, so a player's hand is a derived view.
//!
//! - **Persistent Data Structures**: O(1) ledger clones via `im-rs`.
//!
//! - **Closed instruction sets**: games declare their operations as an enum
//!   and register one handler per variant; missing handlers are a
//!   construction error.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, errors, observable state
//! - `cards`: Card identities and deck universes
//! - `zones`: Zone identifiers and the custody-gated ledger
//! - `rules`: Rule sets and the feasibility proof
//! - `dealer`: Distribution engine
//! - `actions`: Instructions, handler tables, player behaviors
//! - `games`: Hold'em and Dynamite presets, reference table

pub mod actions;
pub mod cards;
pub mod core;
pub mod dealer;
pub mod games;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    AuthorizationError, ConfigurationError, DistributionMismatchError, Error, FeasibilityError,
    GameRng, GameRngState, ObservableState, PlayerId, PlayerMap, Result, RuleViolationError,
    ZoneConsistencyError,
};

pub use crate::cards::{Card, CardUniverse, DeckType, Rank, Suit, WildColor};

pub use crate::zones::{CustodyKey, LedgerSnapshot, Zone, ZoneLedger};

pub use crate::rules::{
    CountPlan, DistributionMethod, FeasibilityReport, FeasibilityViolation, HandPlan,
    LumpRemainder, RuleSet, RuleSetBuilder, RuleSetConfig, TransferRules,
};

pub use crate::dealer::{Dealer, Destination, GameAssignment, HandReport, Source, ZoneStep};

pub use crate::actions::{
    ActionContext, HandlerTable, Instruction, InstructionKind, Player, PlayerBehavior, PlayerView,
    ScriptedBehavior,
};

pub use crate::games::Table;
