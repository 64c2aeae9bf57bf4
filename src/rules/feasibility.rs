//! Feasibility proof for distribution plans.
//!
//! For every supported table size the proof walks the early hands and then
//! one steady-state hand, accumulating the cards each one pulls from
//! Unused. A plan is feasible when that running total never passes the
//! deck size.
//!
//! When the trash pile is the last zone serviced it does not take its
//! declared count outright: it takes what is left of the deck after the
//! other zones, capped by the declared count. A negative remainder means
//! the other zones alone already overrun the deck, and is reported as its
//! own violation.
//!
//! Every failing table size is collected; the proof never stops at the
//! first one.

use std::collections::BTreeMap;
use std::fmt;

use super::ruleset::{HandPlan, PlayerRange, ResolvedHand};
use crate::core::error::FeasibilityError;

/// Which hand of the plan a violation refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandLabel {
    Early(usize),
    SteadyState,
}

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandLabel::Early(i) => write!(f, "early hand {i}"),
            HandLabel::SteadyState => f.write_str("steady-state hand"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// The hand asks for more cards than remain.
    Exhausted {
        deck_size: usize,
        consumed_before: usize,
        demanded: usize,
    },
    /// Trash pile is serviced last, but the zones before it already need
    /// more than remains.
    NegativeTrashRemainder {
        deck_size: usize,
        consumed_before: usize,
        demanded_before_trash: usize,
    },
}

/// First failure found for one table size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeasibilityViolation {
    pub player_count: usize,
    pub hand: HandLabel,
    pub kind: ViolationKind,
}

impl fmt::Display for FeasibilityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Exhausted {
                deck_size,
                consumed_before,
                demanded,
            } => write!(
                f,
                "{} players, {}: {} (deck) - {} (already dealt) < {} (demanded)",
                self.player_count, self.hand, deck_size, consumed_before, demanded
            ),
            ViolationKind::NegativeTrashRemainder {
                deck_size,
                consumed_before,
                demanded_before_trash,
            } => write!(
                f,
                "{} players, {}: trash pile remainder is negative, {} (deck) - {} (already dealt) - {} (other zones) < 0",
                self.player_count, self.hand, deck_size, consumed_before, demanded_before_trash
            ),
        }
    }
}

/// Proven card usage for one table size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountUsage {
    /// Cards dealt from Unused by the end of each early hand, cumulative.
    pub after_early_hands: Vec<usize>,
    /// Cards the first steady-state hand takes.
    pub steady_state_demand: usize,
    /// How many steady-state hands fit before Unused runs dry without
    /// replenishment. `None` when the steady state can repeat forever:
    /// it takes no cards, or only a trailing trash pile's remainder.
    pub steady_state_capacity: Option<usize>,
}

/// Result of a successful proof, keyed by table size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeasibilityReport {
    usage: BTreeMap<usize, CountUsage>,
}

impl FeasibilityReport {
    #[must_use]
    pub fn usage(&self, player_count: usize) -> Option<&CountUsage> {
        self.usage.get(&player_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CountUsage)> {
        self.usage.iter().map(|(&p, u)| (p, u))
    }
}

/// Cards one hand takes once `consumed` have already left the deck.
fn demand(
    hand: &ResolvedHand,
    player_count: usize,
    deck_size: usize,
    consumed: usize,
    trash_last: bool,
) -> Result<usize, ViolationKind> {
    let before_trash = hand
        .per_player
        .saturating_mul(player_count)
        .saturating_add(hand.board);

    let trash = if trash_last {
        let remaining = deck_size.saturating_sub(consumed);
        if before_trash > remaining && hand.trash_pile == 0 {
            return Err(ViolationKind::Exhausted {
                deck_size,
                consumed_before: consumed,
                demanded: before_trash,
            });
        }
        if before_trash > remaining {
            return Err(ViolationKind::NegativeTrashRemainder {
                deck_size,
                consumed_before: consumed,
                demanded_before_trash: before_trash,
            });
        }
        hand.trash_pile.min(remaining - before_trash)
    } else {
        hand.trash_pile
    };

    let demanded = before_trash.saturating_add(trash);
    if consumed.saturating_add(demanded) > deck_size {
        return Err(ViolationKind::Exhausted {
            deck_size,
            consumed_before: consumed,
            demanded,
        });
    }
    Ok(demanded)
}

/// Steady-state hands that fit in what is left of the deck.
///
/// Every hand that fits whole takes `before_trash + trash`. When the trash
/// pile is last, one more partial hand fits if the leftover still covers
/// the other zones, since the trash pile only takes what remains.
fn steady_state_capacity(
    hand: &ResolvedHand,
    player_count: usize,
    deck_size: usize,
    consumed: usize,
    trash_last: bool,
) -> Option<usize> {
    let before_trash = hand
        .per_player
        .saturating_mul(player_count)
        .saturating_add(hand.board);
    let full = before_trash.saturating_add(hand.trash_pile);
    // A trailing trash pile alone never fails; it stops burning once Unused is empty.
    if full == 0 || (trash_last && before_trash == 0) {
        return None;
    }

    let remaining = deck_size.saturating_sub(consumed);
    let whole = remaining / full;
    let partial = trash_last && remaining % full >= before_trash;
    Some(whole + usize::from(partial))
}

fn prove_count(
    player_count: usize,
    deck_size: usize,
    early: &[HandPlan],
    steady: &HandPlan,
    trash_last: bool,
) -> Result<CountUsage, FeasibilityViolation> {
    let violation = |hand, kind| FeasibilityViolation {
        player_count,
        hand,
        kind,
    };

    // Coverage of every table size is checked before the proof runs.
    let resolve = |plan: &HandPlan| plan.resolve(player_count).unwrap_or_default();

    let mut consumed = 0;
    let mut after_early_hands = Vec::with_capacity(early.len());
    for (i, plan) in early.iter().enumerate() {
        let taken = demand(&resolve(plan), player_count, deck_size, consumed, trash_last)
            .map_err(|kind| violation(HandLabel::Early(i), kind))?;
        consumed += taken;
        after_early_hands.push(consumed);
    }

    let steady = resolve(steady);
    let steady_state_demand = demand(&steady, player_count, deck_size, consumed, trash_last)
        .map_err(|kind| violation(HandLabel::SteadyState, kind))?;

    Ok(CountUsage {
        after_early_hands,
        steady_state_demand,
        steady_state_capacity: steady_state_capacity(
            &steady,
            player_count,
            deck_size,
            consumed,
            trash_last,
        ),
    })
}

/// Prove that no table size in `range` runs the deck dry.
pub(crate) fn prove(
    deck_size: usize,
    range: PlayerRange,
    early: &[HandPlan],
    steady: &HandPlan,
    trash_last: bool,
) -> Result<FeasibilityReport, FeasibilityError> {
    let mut usage = BTreeMap::new();
    let mut violations = Vec::new();

    for player_count in range.iter() {
        match prove_count(player_count, deck_size, early, steady, trash_last) {
            Ok(counts) => {
                usage.insert(player_count, counts);
            }
            Err(violation) => violations.push(violation),
        }
    }

    if violations.is_empty() {
        Ok(FeasibilityReport { usage })
    } else {
        Err(FeasibilityError { violations })
    }
}
