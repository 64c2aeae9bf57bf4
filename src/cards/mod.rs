//! Card system: identities and deck universes.
//!
//! ## Key Types
//!
//! - `Card`: Opaque, hashable card token (standard or wild)
//! - `Rank`, `Suit`, `WildColor`: Components of a card identity
//! - `DeckType`: Base deck family
//! - `CardUniverse`: Every distinct card of a deck configuration

pub mod card;
pub mod universe;

pub use card::{Card, Rank, Suit, WildColor};
pub use universe::{CardUniverse, DeckType};
