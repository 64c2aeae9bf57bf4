//! Error taxonomy.
//!
//! Every failure in the engine is a deterministic logic violation, so
//! nothing here is retried. Configuration and feasibility errors stop a
//! `RuleSet` from ever existing; the rest surface to the orchestrator,
//! which decides whether to abort the game.

use thiserror::Error;

use crate::cards::Card;
use crate::core::player::PlayerId;
use crate::rules::feasibility::FeasibilityViolation;
use crate::zones::Zone;

/// Malformed rule set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("deck size must be positive")]
    EmptyDeck,
    #[error("player range must start at 1 or more, got {min}")]
    ZeroPlayers { min: usize },
    #[error("inverted player range: min {min} > max {max}")]
    InvertedPlayerRange { min: usize, max: usize },
    #[error("player range max {max} exceeds the supported 255 players")]
    TooManyPlayers { max: usize },
    #[error(
        "early hand plans differ in length: players {players}, board {board}, trash pile {trash_pile}"
    )]
    MismatchedEarlyHands {
        players: usize,
        board: usize,
        trash_pile: usize,
    },
    #[error("{field} maps player count {count}, outside the range {min}..={max}")]
    PlayerCountOutOfRange {
        field: String,
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("{field} has no entry for player count {count}")]
    MissingPlayerCount { field: String, count: usize },
    #[error("zone {zone} appears more than once in the distribution order")]
    DuplicateZoneInOrder { zone: Zone },
    #[error("zone {zone} receives cards but is missing from the distribution order")]
    UnorderedZone { zone: Zone },
    #[error("zone {zone} has no distribution method")]
    MissingMethod { zone: Zone },
    #[error("instruction kind {kind} has no registered handler")]
    MissingHandler { kind: String },
    #[error("malformed rule set: {0}")]
    Malformed(String),
}

/// A structurally valid plan that would exhaust the deck.
///
/// Carries every offending player count, not just the first.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{}", describe_violations(.violations))]
pub struct FeasibilityError {
    pub violations: Vec<FeasibilityViolation>,
}

impl FeasibilityError {
    /// Player counts that fail, ascending.
    #[must_use]
    pub fn player_counts(&self) -> Vec<usize> {
        let mut counts: Vec<_> = self.violations.iter().map(|v| v.player_count).collect();
        counts.sort_unstable();
        counts.dedup();
        counts
    }
}

fn describe_violations(violations: &[FeasibilityViolation]) -> String {
    let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
    format!(
        "distribution plan exhausts the deck for {} player count(s): {}",
        violations.len(),
        details.join("; ")
    )
}

/// Mutation or dealing attempted without the right capability.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("{operation} requires custody, which has not been granted")]
    CustodyNotGranted { operation: &'static str },
    #[error("custody key belongs to a different ledger")]
    ForeignKey,
    #[error("dealer has not been assigned to a game")]
    GameUnassigned,
}

/// Zone bookkeeping violation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ZoneConsistencyError {
    #[error("{card} is already in {zone}")]
    DuplicateCard { card: Card, zone: Zone },
    #[error("{card} is not in {zone}")]
    CardNotFound { card: Card, zone: Zone },
    #[error("{card} is held by {holder}, not {player}")]
    NotHeldBy {
        card: Card,
        player: PlayerId,
        holder: PlayerId,
    },
    #[error("cannot take {requested} cards from {zone}: only {available} available")]
    Underflow {
        zone: Zone,
        requested: usize,
        available: usize,
    },
    #[error("{card} was not taken out of a zone before being placed")]
    NotInTransit { card: Card },
    #[error("{card} does not belong to this deck")]
    UnknownCard { card: Card },
    #[error("zones hold {found} cards but the universe has {expected}")]
    ConservationBroken { expected: usize, found: usize },
}

/// Post-hoc count check after a zone step failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DistributionMismatchError {
    #[error("cards under-distributed to {zone}: target {target}, moved {moved}, {leftover} leftover")]
    UnderDistributed {
        zone: Zone,
        target: usize,
        moved: usize,
        leftover: usize,
    },
    #[error(
        "cards over-distributed to {zone}: target {target}, moved {moved}, {surplus} that weren't supposed to be distributed"
    )]
    OverDistributed {
        zone: Zone,
        target: usize,
        moved: usize,
        surplus: usize,
    },
    #[error("lump distribution of {batch} cards leaves {remainder} undealt after {roster} players")]
    LumpRemainder {
        batch: usize,
        roster: usize,
        remainder: usize,
    },
}

/// A valid rule set used in a way it does not allow.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleViolationError {
    #[error("roster of {count} players is outside the supported range {min}..={max}")]
    PlayerCountOutOfRange { count: usize, min: usize, max: usize },
    #[error("rule set expects a {rules}-card deck but the ledger holds {ledger}")]
    DeckSizeMismatch { rules: usize, ledger: usize },
    #[error("transfers from {from} to {to} are not permitted")]
    TransferNotPermitted { from: Zone, to: Zone },
    #[error("{player} is not seated at this table")]
    UnknownPlayer { player: PlayerId },
    #[error("invalid instruction: {reason}")]
    InvalidInstruction { reason: String },
}

/// Top-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Feasibility(#[from] FeasibilityError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    ZoneConsistency(#[from] ZoneConsistencyError),
    #[error(transparent)]
    DistributionMismatch(#[from] DistributionMismatchError),
    #[error(transparent)]
    RuleViolation(#[from] RuleViolationError),
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
