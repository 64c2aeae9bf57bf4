//! Rule sets: validated, immutable distribution policy.
//!
//! A `RuleSet` says how many cards leave Unused for each zone on every
//! hand, in which order zones are serviced, and how (lump or round-robin).
//! It also carries the permissions for non-dealing transfers and the
//! policy for undealt lump remainders.
//!
//! There is no way to hold an invalid `RuleSet`: both construction paths
//! (`RuleSetBuilder::build` and deserialization through `RuleSetConfig`)
//! run the same structural checks and the feasibility proof.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::feasibility::{self, FeasibilityReport};
use crate::core::error::{ConfigurationError, Error, Result, RuleViolationError};
use crate::core::player::MAX_PLAYERS;
use crate::zones::Zone;

// =============================================================================
// Count plans
// =============================================================================

/// Card count for one zone on one hand.
///
/// Either the same for every table size, or keyed by player count.
/// Deserializes from a bare integer or from a map such as
/// `{"2": 12, "3": 8}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CountPlan {
    Flat(u32),
    PerPlayerCount(BTreeMap<usize, u32>),
}

impl CountPlan {
    /// Build a per-player-count plan from `(player_count, count)` pairs.
    pub fn per_player(entries: impl IntoIterator<Item = (usize, u32)>) -> Self {
        CountPlan::PerPlayerCount(entries.into_iter().collect())
    }

    /// Count for a table of `player_count`, if the plan covers it.
    #[must_use]
    pub fn resolve(&self, player_count: usize) -> Option<usize> {
        match self {
            CountPlan::Flat(n) => Some(*n as usize),
            CountPlan::PerPlayerCount(map) => map.get(&player_count).map(|&n| n as usize),
        }
    }

    /// True if the plan never asks for a card.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            CountPlan::Flat(n) => *n == 0,
            CountPlan::PerPlayerCount(map) => map.values().all(|&n| n == 0),
        }
    }

    /// Every key must lie in `range` and every count in `range` must have a key.
    fn check_coverage(&self, field: &str, range: &PlayerRange) -> Result<()> {
        let CountPlan::PerPlayerCount(map) = self else {
            return Ok(());
        };

        if let Some(&count) = map.keys().find(|&&k| !range.contains(k)) {
            return Err(ConfigurationError::PlayerCountOutOfRange {
                field: field.to_string(),
                count,
                min: range.min,
                max: range.max,
            }
            .into());
        }
        if let Some(count) = range.iter().find(|k| !map.contains_key(k)) {
            return Err(ConfigurationError::MissingPlayerCount {
                field: field.to_string(),
                count,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for CountPlan {
    fn default() -> Self {
        CountPlan::Flat(0)
    }
}

impl From<u32> for CountPlan {
    fn from(n: u32) -> Self {
        CountPlan::Flat(n)
    }
}

impl From<BTreeMap<usize, u32>> for CountPlan {
    fn from(map: BTreeMap<usize, u32>) -> Self {
        CountPlan::PerPlayerCount(map)
    }
}

impl<'de> Deserialize<'de> for CountPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CountPlanVisitor)
    }
}

struct CountPlanVisitor;

impl<'de> Visitor<'de> for CountPlanVisitor {
    type Value = CountPlan;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a card count or a map from player count to card count")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<CountPlan, E> {
        u32::try_from(v).map(CountPlan::Flat).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<CountPlan, E> {
        u32::try_from(v).map(CountPlan::Flat).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<CountPlan, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, count)) = access.next_entry::<String, u32>()? {
            let player_count: usize = key
                .parse()
                .map_err(|_| <A::Error as de::Error>::custom(format!("player count key {key:?} is not a number")))?;
            map.insert(player_count, count);
        }
        Ok(CountPlan::PerPlayerCount(map))
    }
}

/// Counts for one hand: cards per player, to the board, to the trash pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPlan {
    pub players: CountPlan,
    pub board: CountPlan,
    pub trash_pile: CountPlan,
}

impl HandPlan {
    pub fn new(
        players: impl Into<CountPlan>,
        board: impl Into<CountPlan>,
        trash_pile: impl Into<CountPlan>,
    ) -> Self {
        Self {
            players: players.into(),
            board: board.into(),
            trash_pile: trash_pile.into(),
        }
    }

    /// Concrete counts for a table of `player_count`.
    #[must_use]
    pub fn resolve(&self, player_count: usize) -> Option<ResolvedHand> {
        Some(ResolvedHand {
            per_player: self.players.resolve(player_count)?,
            board: self.board.resolve(player_count)?,
            trash_pile: self.trash_pile.resolve(player_count)?,
        })
    }
}

/// A `HandPlan` resolved for one table size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolvedHand {
    pub per_player: usize,
    pub board: usize,
    pub trash_pile: usize,
}

impl ResolvedHand {
    /// Declared count for a zone; the player zone is `per_player * player_count`.
    #[must_use]
    pub fn target(&self, zone: Zone, player_count: usize) -> usize {
        match zone {
            Zone::PlayerHands => self.per_player.saturating_mul(player_count),
            Zone::Board => self.board,
            Zone::TrashPile => self.trash_pile,
            Zone::Unused => 0,
        }
    }
}

// =============================================================================
// Policies
// =============================================================================

/// How a zone's resolved count is moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMethod {
    /// The whole count as one batch.
    #[default]
    Lump,
    /// One card at a time, cycling through recipients.
    #[serde(alias = "one_at_a_time")]
    RoundRobin,
}

/// What to do with cards a lump deal to players cannot place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LumpRemainder {
    /// Put them back on top of Unused and let the count check report it.
    #[default]
    ReturnToUnused,
    /// Fail before any card reaches a player.
    Reject,
    /// Deal only the whole blocks and put the rest back on Unused without
    /// an error. The deal's target shrinks to what was dealt.
    Stop,
}

/// Permissions for transfers that do not originate in Unused.
///
/// Everything defaults to forbidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferRules {
    pub board_to_players: bool,
    pub trash_pile_to_players: bool,
    pub players_to_board: bool,
    pub trash_pile_to_board: bool,
    pub players_to_trash_pile: bool,
    pub board_to_trash_pile: bool,
    pub players_to_unused: bool,
    pub board_to_unused: bool,
    pub trash_pile_to_unused: bool,
    pub players_to_players: bool,
}

impl TransferRules {
    /// Whether cards may move from `from` to `to`.
    ///
    /// Moves out of Unused are dealing and always allowed.
    #[must_use]
    pub fn allows(&self, from: Zone, to: Zone) -> bool {
        use Zone::*;
        match (from, to) {
            (Unused, _) => true,
            (Board, PlayerHands) => self.board_to_players,
            (TrashPile, PlayerHands) => self.trash_pile_to_players,
            (PlayerHands, Board) => self.players_to_board,
            (TrashPile, Board) => self.trash_pile_to_board,
            (PlayerHands, TrashPile) => self.players_to_trash_pile,
            (Board, TrashPile) => self.board_to_trash_pile,
            (PlayerHands, Unused) => self.players_to_unused,
            (Board, Unused) => self.board_to_unused,
            (TrashPile, Unused) => self.trash_pile_to_unused,
            (PlayerHands, PlayerHands) => self.players_to_players,
            (Board, Board) | (TrashPile, TrashPile) => false,
        }
    }

    /// Permit one direction. Moves out of Unused need no permission.
    #[must_use]
    pub fn allow(mut self, from: Zone, to: Zone) -> Self {
        use Zone::*;
        let flag = match (from, to) {
            (Board, PlayerHands) => &mut self.board_to_players,
            (TrashPile, PlayerHands) => &mut self.trash_pile_to_players,
            (PlayerHands, Board) => &mut self.players_to_board,
            (TrashPile, Board) => &mut self.trash_pile_to_board,
            (PlayerHands, TrashPile) => &mut self.players_to_trash_pile,
            (Board, TrashPile) => &mut self.board_to_trash_pile,
            (PlayerHands, Unused) => &mut self.players_to_unused,
            (Board, Unused) => &mut self.board_to_unused,
            (TrashPile, Unused) => &mut self.trash_pile_to_unused,
            (PlayerHands, PlayerHands) => &mut self.players_to_players,
            _ => return self,
        };
        *flag = true;
        self
    }
}

/// Inclusive range of supported table sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRange {
    pub min: usize,
    pub max: usize,
}

impl PlayerRange {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, player_count: usize) -> bool {
        (self.min..=self.max).contains(&player_count)
    }

    #[must_use]
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    fn check(&self) -> Result<()> {
        if self.min == 0 {
            return Err(ConfigurationError::ZeroPlayers { min: self.min }.into());
        }
        if self.min > self.max {
            return Err(ConfigurationError::InvertedPlayerRange {
                min: self.min,
                max: self.max,
            }
            .into());
        }
        if self.max > MAX_PLAYERS {
            return Err(ConfigurationError::TooManyPlayers { max: self.max }.into());
        }
        Ok(())
    }
}

impl fmt::Display for PlayerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

// =============================================================================
// RuleSet
// =============================================================================

/// Validated distribution policy for one game.
///
/// ## Example
///
/// ```
/// use rust_dealer::rules::{CountPlan, DistributionMethod, HandPlan, RuleSet};
/// use rust_dealer::zones::Zone;
///
/// let rules = RuleSet::builder(52, 2, 5)
///     .early_hand(HandPlan::new(CountPlan::per_player([(2, 12), (3, 8), (4, 7), (5, 7)]), 0, 0))
///     .steady_state(HandPlan::new(1, 0, 0))
///     .order([Zone::PlayerHands, Zone::Board, Zone::TrashPile])
///     .all_methods(DistributionMethod::RoundRobin)
///     .build()
///     .unwrap();
///
/// assert_eq!(rules.resolve(0, 4).unwrap().per_player, 7);
/// assert_eq!(rules.resolve(9, 4).unwrap().per_player, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleSetConfig", into = "RuleSetConfig")]
pub struct RuleSet {
    deck_size: usize,
    player_range: PlayerRange,
    early_hands: Vec<HandPlan>,
    steady_state: HandPlan,
    methods: BTreeMap<Zone, DistributionMethod>,
    order: Vec<Zone>,
    transfers: TransferRules,
    lump_remainder: LumpRemainder,
    report: FeasibilityReport,
}

impl RuleSet {
    /// Start building a rule set for a `deck_size` deck and `min..=max` players.
    #[must_use]
    pub fn builder(deck_size: usize, min_players: usize, max_players: usize) -> RuleSetBuilder {
        RuleSetBuilder::new(deck_size, min_players, max_players)
    }

    /// Parse and validate a JSON rule set.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RuleSetConfig = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
        Self::try_from(config)
    }

    /// Serialize to JSON in the `RuleSetConfig` layout.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&RuleSetConfig::from(self.clone()))
            .map_err(|e| ConfigurationError::Malformed(e.to_string()).into())
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    #[must_use]
    pub fn player_range(&self) -> PlayerRange {
        self.player_range
    }

    #[must_use]
    pub fn early_hands(&self) -> &[HandPlan] {
        &self.early_hands
    }

    #[must_use]
    pub fn steady_state(&self) -> &HandPlan {
        &self.steady_state
    }

    /// Zones in the order they are serviced each hand.
    #[must_use]
    pub fn order(&self) -> &[Zone] {
        &self.order
    }

    #[must_use]
    pub fn method(&self, zone: Zone) -> Option<DistributionMethod> {
        self.methods.get(&zone).copied()
    }

    #[must_use]
    pub fn transfers(&self) -> &TransferRules {
        &self.transfers
    }

    #[must_use]
    pub fn lump_remainder(&self) -> LumpRemainder {
        self.lump_remainder
    }

    /// Card usage proven at construction.
    #[must_use]
    pub fn feasibility(&self) -> &FeasibilityReport {
        &self.report
    }

    /// True when the trash pile is serviced last and so takes whatever remains,
    /// up to its declared count.
    #[must_use]
    pub fn trash_pile_last(&self) -> bool {
        self.order.last() == Some(&Zone::TrashPile)
    }

    /// True if `hand_index` is one of the individually configured early hands.
    #[must_use]
    pub fn is_early(&self, hand_index: usize) -> bool {
        hand_index < self.early_hands.len()
    }

    /// The plan in force for `hand_index`.
    #[must_use]
    pub fn plan_for(&self, hand_index: usize) -> &HandPlan {
        self.early_hands.get(hand_index).unwrap_or(&self.steady_state)
    }

    /// Concrete counts for `hand_index` at a table of `player_count`.
    pub fn resolve(&self, hand_index: usize, player_count: usize) -> Result<ResolvedHand> {
        let out_of_range = || RuleViolationError::PlayerCountOutOfRange {
            count: player_count,
            min: self.player_range.min,
            max: self.player_range.max,
        };
        if !self.player_range.contains(player_count) {
            return Err(out_of_range().into());
        }
        self.plan_for(hand_index)
            .resolve(player_count)
            .ok_or_else(|| out_of_range().into())
    }

    fn validate(parts: RuleSetParts) -> Result<Self> {
        let RuleSetParts {
            deck_size,
            player_range,
            early_hands,
            steady_state,
            methods,
            order,
            transfers,
            lump_remainder,
        } = parts;

        if deck_size == 0 {
            return Err(ConfigurationError::EmptyDeck.into());
        }
        player_range.check()?;

        let labelled = early_hands
            .iter()
            .enumerate()
            .map(|(i, plan)| (format!("early hand {i}"), plan))
            .chain(std::iter::once(("steady state".to_string(), &steady_state)));

        let mut receiving = [false; 3];
        for (label, plan) in labelled {
            plan.players.check_coverage(&format!("{label} players"), &player_range)?;
            plan.board.check_coverage(&format!("{label} board"), &player_range)?;
            plan.trash_pile.check_coverage(&format!("{label} trash pile"), &player_range)?;

            receiving[0] |= !plan.players.is_zero();
            receiving[1] |= !plan.board.is_zero();
            receiving[2] |= !plan.trash_pile.is_zero();
        }

        for (i, zone) in order.iter().enumerate() {
            if order[..i].contains(zone) {
                return Err(ConfigurationError::DuplicateZoneInOrder { zone: *zone }.into());
            }
            if *zone != Zone::Unused && !methods.contains_key(zone) {
                return Err(ConfigurationError::MissingMethod { zone: *zone }.into());
            }
        }

        let zones = [Zone::PlayerHands, Zone::Board, Zone::TrashPile];
        for (zone, receives) in zones.into_iter().zip(receiving) {
            if receives && !order.contains(&zone) {
                return Err(ConfigurationError::UnorderedZone { zone }.into());
            }
        }

        let trash_last = order.last() == Some(&Zone::TrashPile);
        let report =
            feasibility::prove(deck_size, player_range, &early_hands, &steady_state, trash_last)?;

        Ok(Self {
            deck_size,
            player_range,
            early_hands,
            steady_state,
            methods,
            order,
            transfers,
            lump_remainder,
            report,
        })
    }
}

#[derive(Clone, Debug)]
struct RuleSetParts {
    deck_size: usize,
    player_range: PlayerRange,
    early_hands: Vec<HandPlan>,
    steady_state: HandPlan,
    methods: BTreeMap<Zone, DistributionMethod>,
    order: Vec<Zone>,
    transfers: TransferRules,
    lump_remainder: LumpRemainder,
}

// =============================================================================
// Builder
// =============================================================================

/// Programmatic construction of a `RuleSet`.
///
/// Nothing is checked until `build`.
#[derive(Clone, Debug)]
pub struct RuleSetBuilder {
    parts: RuleSetParts,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new(deck_size: usize, min_players: usize, max_players: usize) -> Self {
        Self {
            parts: RuleSetParts {
                deck_size,
                player_range: PlayerRange::new(min_players, max_players),
                early_hands: Vec::new(),
                steady_state: HandPlan::default(),
                methods: BTreeMap::new(),
                order: Vec::new(),
                transfers: TransferRules::default(),
                lump_remainder: LumpRemainder::default(),
            },
        }
    }

    /// Append the next early hand.
    #[must_use]
    pub fn early_hand(mut self, plan: HandPlan) -> Self {
        self.parts.early_hands.push(plan);
        self
    }

    /// Plan applied to every hand after the early hands.
    #[must_use]
    pub fn steady_state(mut self, plan: HandPlan) -> Self {
        self.parts.steady_state = plan;
        self
    }

    /// Service order of zones within a hand.
    #[must_use]
    pub fn order(mut self, zones: impl IntoIterator<Item = Zone>) -> Self {
        self.parts.order = zones.into_iter().collect();
        self
    }

    #[must_use]
    pub fn method(mut self, zone: Zone, method: DistributionMethod) -> Self {
        self.parts.methods.insert(zone, method);
        self
    }

    /// Use one method for every zone.
    #[must_use]
    pub fn all_methods(mut self, method: DistributionMethod) -> Self {
        for zone in Zone::ALL {
            self.parts.methods.insert(zone, method);
        }
        self
    }

    #[must_use]
    pub fn transfers(mut self, transfers: TransferRules) -> Self {
        self.parts.transfers = transfers;
        self
    }

    #[must_use]
    pub fn lump_remainder(mut self, policy: LumpRemainder) -> Self {
        self.parts.lump_remainder = policy;
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> Result<RuleSet> {
        RuleSet::validate(self.parts)
    }
}

// =============================================================================
// Serialized form
// =============================================================================

/// On-disk layout of a rule set.
///
/// Early hands are three parallel lists, one entry per hand, which must be
/// the same length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetConfig {
    pub deck_size: usize,
    pub player_range: (usize, usize),
    #[serde(default)]
    pub cards_per_player_early_hands: Vec<CountPlan>,
    #[serde(default)]
    pub board_distribution_early_hands: Vec<CountPlan>,
    #[serde(default)]
    pub trash_pile_distribution_early_hands: Vec<CountPlan>,
    #[serde(default)]
    pub cards_per_player_hand_i: CountPlan,
    #[serde(default)]
    pub board_distribution_hand_i: CountPlan,
    #[serde(default)]
    pub trash_pile_distribution_hand_i: CountPlan,
    pub distribution_methods: BTreeMap<Zone, DistributionMethod>,
    pub distribution_ordering: Vec<Zone>,
    #[serde(default)]
    pub transfers: TransferRules,
    #[serde(default)]
    pub lump_remainder: LumpRemainder,
}

impl TryFrom<RuleSetConfig> for RuleSet {
    type Error = Error;

    fn try_from(config: RuleSetConfig) -> Result<Self> {
        let players = config.cards_per_player_early_hands;
        let board = config.board_distribution_early_hands;
        let trash_pile = config.trash_pile_distribution_early_hands;

        if players.len() != board.len() || players.len() != trash_pile.len() {
            return Err(ConfigurationError::MismatchedEarlyHands {
                players: players.len(),
                board: board.len(),
                trash_pile: trash_pile.len(),
            }
            .into());
        }

        let early_hands = players
            .into_iter()
            .zip(board)
            .zip(trash_pile)
            .map(|((players, board), trash_pile)| HandPlan {
                players,
                board,
                trash_pile,
            })
            .collect();

        RuleSet::validate(RuleSetParts {
            deck_size: config.deck_size,
            player_range: PlayerRange::new(config.player_range.0, config.player_range.1),
            early_hands,
            steady_state: HandPlan {
                players: config.cards_per_player_hand_i,
                board: config.board_distribution_hand_i,
                trash_pile: config.trash_pile_distribution_hand_i,
            },
            methods: config.distribution_methods,
            order: config.distribution_ordering,
            transfers: config.transfers,
            lump_remainder: config.lump_remainder,
        })
    }
}

impl From<RuleSet> for RuleSetConfig {
    fn from(rules: RuleSet) -> Self {
        let mut players = Vec::with_capacity(rules.early_hands.len());
        let mut board = Vec::with_capacity(rules.early_hands.len());
        let mut trash_pile = Vec::with_capacity(rules.early_hands.len());
        for plan in rules.early_hands {
            players.push(plan.players);
            board.push(plan.board);
            trash_pile.push(plan.trash_pile);
        }

        Self {
            deck_size: rules.deck_size,
            player_range: (rules.player_range.min, rules.player_range.max),
            cards_per_player_early_hands: players,
            board_distribution_early_hands: board,
            trash_pile_distribution_early_hands: trash_pile,
            cards_per_player_hand_i: rules.steady_state.players,
            board_distribution_hand_i: rules.steady_state.board,
            trash_pile_distribution_hand_i: rules.steady_state.trash_pile,
            distribution_methods: rules.methods,
            distribution_ordering: rules.order,
            transfers: rules.transfers,
            lump_remainder: rules.lump_remainder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RuleSetBuilder {
        RuleSet::builder(52, 2, 5)
            .early_hand(HandPlan::new(CountPlan::per_player([(2, 12), (3, 8), (4, 7), (5, 7)]), 0, 0))
            .steady_state(HandPlan::new(1, 0, 0))
            .order([Zone::PlayerHands, Zone::Board, Zone::TrashPile])
            .all_methods(DistributionMethod::Lump)
    }

    fn config_err(result: Result<RuleSet>) -> ConfigurationError {
        match result {
            Err(Error::Configuration(e)) => e,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_count_plan_resolution() {
        let flat = CountPlan::Flat(3);
        let keyed = CountPlan::per_player([(2, 5), (3, 4)]);

        assert_eq!(flat.resolve(9), Some(3));
        assert_eq!(keyed.resolve(3), Some(4));
        assert_eq!(keyed.resolve(4), None);
        assert!(CountPlan::per_player([(2, 0)]).is_zero());
    }

    #[test]
    fn test_count_plan_deserializes_both_shapes() {
        let flat: CountPlan = serde_json::from_str("7").unwrap();
        assert_eq!(flat, CountPlan::Flat(7));

        let keyed: CountPlan = serde_json::from_str(r#"{"2": 12, "3": 8}"#).unwrap();
        assert_eq!(keyed, CountPlan::per_player([(2, 12), (3, 8)]));

        assert!(serde_json::from_str::<CountPlan>("-1").is_err());
        assert!(serde_json::from_str::<CountPlan>(r#"{"two": 1}"#).is_err());
    }

    #[test]
    fn test_builder_accepts_valid_rules() {
        let rules = base().build().unwrap();

        assert_eq!(rules.deck_size(), 52);
        assert!(rules.is_early(0));
        assert!(!rules.is_early(1));
        assert!(rules.trash_pile_last());
        assert_eq!(rules.resolve(0, 2).unwrap().per_player, 12);
    }

    #[test]
    fn test_resolve_rejects_roster_outside_range() {
        let rules = base().build().unwrap();
        let err = rules.resolve(0, 6).unwrap_err();
        assert!(matches!(
            err,
            Error::RuleViolation(RuleViolationError::PlayerCountOutOfRange { count: 6, min: 2, max: 5 })
        ));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(config_err(RuleSet::builder(0, 2, 5).build()), ConfigurationError::EmptyDeck);
        assert_eq!(
            config_err(RuleSet::builder(52, 5, 2).build()),
            ConfigurationError::InvertedPlayerRange { min: 5, max: 2 }
        );
        assert_eq!(
            config_err(RuleSet::builder(52, 0, 2).build()),
            ConfigurationError::ZeroPlayers { min: 0 }
        );
        assert_eq!(
            config_err(RuleSet::builder(52, 2, 300).build()),
            ConfigurationError::TooManyPlayers { max: 300 }
        );
    }

    #[test]
    fn test_per_player_maps_must_cover_range() {
        let missing = base().steady_state(HandPlan::new(CountPlan::per_player([(2, 1), (3, 1)]), 0, 0));
        assert!(matches!(
            config_err(missing.build()),
            ConfigurationError::MissingPlayerCount { count: 4, .. }
        ));

        let extra = base().steady_state(HandPlan::new(
            CountPlan::per_player([(2, 1), (3, 1), (4, 1), (5, 1), (6, 1)]),
            0,
            0,
        ));
        assert!(matches!(
            config_err(extra.build()),
            ConfigurationError::PlayerCountOutOfRange { count: 6, .. }
        ));
    }

    #[test]
    fn test_order_checks() {
        let dup = base().order([Zone::PlayerHands, Zone::Board, Zone::PlayerHands]);
        assert_eq!(
            config_err(dup.build()),
            ConfigurationError::DuplicateZoneInOrder { zone: Zone::PlayerHands }
        );

        let unordered = base().steady_state(HandPlan::new(1, 1, 0)).order([Zone::PlayerHands]);
        assert_eq!(
            config_err(unordered.build()),
            ConfigurationError::UnorderedZone { zone: Zone::Board }
        );

        let no_method = RuleSet::builder(52, 2, 4)
            .steady_state(HandPlan::new(1, 0, 0))
            .order([Zone::PlayerHands])
            .method(Zone::Board, DistributionMethod::Lump);
        assert_eq!(
            config_err(no_method.build()),
            ConfigurationError::MissingMethod { zone: Zone::PlayerHands }
        );
    }

    #[test]
    fn test_transfer_permissions_default_closed() {
        let rules = TransferRules::default();
        assert!(!rules.allows(Zone::PlayerHands, Zone::TrashPile));
        assert!(rules.allows(Zone::Unused, Zone::Board));

        let opened = rules.allow(Zone::PlayerHands, Zone::TrashPile);
        assert!(opened.allows(Zone::PlayerHands, Zone::TrashPile));
        assert!(!opened.allows(Zone::TrashPile, Zone::PlayerHands));
    }

    #[test]
    fn test_json_round_trip() {
        let rules = base()
            .transfers(TransferRules::default().allow(Zone::Board, Zone::TrashPile))
            .build()
            .unwrap();

        let json = rules.to_json().unwrap();
        let back = RuleSet::from_json(&json).unwrap();
        assert_eq!(rules, back);
    }

    #[test]
    fn test_json_mismatched_early_hands() {
        let json = r#"{
            "deck_size": 52,
            "player_range": [2, 4],
            "cards_per_player_early_hands": [2, 1],
            "board_distribution_early_hands": [0],
            "trash_pile_distribution_early_hands": [0, 0],
            "distribution_methods": {"player_hands": "lump"},
            "distribution_ordering": ["player_hands"]
        }"#;

        assert_eq!(
            config_err(RuleSet::from_json(json)),
            ConfigurationError::MismatchedEarlyHands { players: 2, board: 1, trash_pile: 2 }
        );
    }

    #[test]
    fn test_json_unknown_zone_is_malformed() {
        let json = r#"{
            "deck_size": 52,
            "player_range": [2, 4],
            "distribution_methods": {"graveyard": "lump"},
            "distribution_ordering": ["player_hands"]
        }"#;

        assert!(matches!(config_err(RuleSet::from_json(json)), ConfigurationError::Malformed(_)));
    }
}
