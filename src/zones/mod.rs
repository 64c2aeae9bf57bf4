//! Zone system for card custody.
//!
//! Every card of the universe sits in exactly one of four zones:
//!
//! - `Unused`: the undealt stock, a LIFO stack
//! - `Board`: shared presence set
//! - `TrashPile`: discard pile, a LIFO stack
//! - `PlayerHands`: held cards, each attributed to its holder
//!
//! ## Key Types
//!
//! - `Zone`: Zone identifier, also used to key distribution plans
//! - `ZoneLedger`: Custody-gated zone bookkeeping
//! - `CustodyKey`: Orchestrator capability that grants/revokes custody
//! - `LedgerSnapshot`: Serializable picture of every zone

pub mod ledger;

pub use ledger::{CustodyKey, LedgerSnapshot, ZoneLedger};

use serde::{Deserialize, Serialize};

/// One of the four custody zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Unused,
    Board,
    TrashPile,
    #[serde(alias = "player", alias = "players")]
    PlayerHands,
}

impl Zone {
    /// All zones, in canonical order.
    pub const ALL: [Zone; 4] = [Zone::Unused, Zone::Board, Zone::TrashPile, Zone::PlayerHands];

    /// Stacks keep order; the other zones are presence sets.
    #[must_use]
    pub const fn is_stack(self) -> bool {
        matches!(self, Zone::Unused | Zone::TrashPile)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Unused => "unused",
            Zone::Board => "board",
            Zone::TrashPile => "trash pile",
            Zone::PlayerHands => "player hands",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_display() {
        assert_eq!(Zone::TrashPile.to_string(), "trash pile");
        assert_eq!(format!("{}", Zone::PlayerHands), "player hands");
    }

    #[test]
    fn test_zone_serde_aliases() {
        let zone: Zone = serde_json::from_str("\"player\"").unwrap();
        assert_eq!(zone, Zone::PlayerHands);

        let zone: Zone = serde_json::from_str("\"trash_pile\"").unwrap();
        assert_eq!(zone, Zone::TrashPile);

        assert!(serde_json::from_str::<Zone>("\"wut\"").is_err());
    }

    #[test]
    fn test_stack_zones() {
        assert!(Zone::Unused.is_stack());
        assert!(Zone::TrashPile.is_stack());
        assert!(!Zone::Board.is_stack());
        assert!(!Zone::PlayerHands.is_stack());
    }
}
