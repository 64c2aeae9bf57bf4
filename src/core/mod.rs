//! Core engine types: players, RNG, errors, observable state.
//!
//! Everything here is game-agnostic. Games layer rule sets and instruction
//! kinds on top rather than modifying the core.

pub mod error;
pub mod observe;
pub mod player;
pub mod rng;

pub use error::{
    AuthorizationError, ConfigurationError, DistributionMismatchError, Error, FeasibilityError,
    Result, RuleViolationError, ZoneConsistencyError,
};
pub use observe::ObservableState;
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, GameRngState};
