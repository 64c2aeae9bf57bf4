//! Distribution engine.
//!
//! ## Key Types
//!
//! - `Dealer`: Executes a rule set's plan against a ledger, one hand per call
//! - `GameAssignment`: Delegated right to take custody of one ledger
//! - `HandReport` / `ZoneStep`: What a hand moved, zone by zone
//! - `Source` / `Destination`: Endpoints of player-driven transfers

pub mod distribution;
pub mod engine;

pub use distribution::{HandReport, Split, ZoneStep};
pub use engine::{Dealer, Destination, GameAssignment, Source};
