//! Game presets and a reference table.
//!
//! - `holdem`: Texas Hold'em dealing rules with Bet/Fold/Check
//! - `dynamite`: Dynamite with Claim/Throw/Draw/Eliminate
//! - `table`: Orchestrator that runs hands for any instruction set

pub mod dynamite;
pub mod holdem;
pub mod table;

pub use table::{Scoring, Table};
