//! Rule sets and the feasibility proof.
//!
//! A `RuleSet` is pure policy: it never references a particular ledger or
//! roster. Construction fails fast, so a `RuleSet` value is always both
//! well-formed and feasible for every player count it supports.
//!
//! ## Key Types
//!
//! - `RuleSet`: Validated, immutable distribution policy
//! - `RuleSetBuilder`: Programmatic construction
//! - `RuleSetConfig`: Serialized layout, converted through `TryFrom`
//! - `HandPlan` / `CountPlan`: Per-hand card counts, flat or per player count
//! - `FeasibilityReport`: Card usage proven at construction

pub mod feasibility;
pub mod ruleset;

pub use feasibility::{CountUsage, FeasibilityReport, FeasibilityViolation, HandLabel, ViolationKind};
pub use ruleset::{
    CountPlan, DistributionMethod, HandPlan, LumpRemainder, PlayerRange, ResolvedHand, RuleSet,
    RuleSetBuilder, RuleSetConfig, TransferRules,
};
