//! Texas Hold'em dealing rules.
//!
//! Hand 0 is pre-flop (two hole cards each), hand 1 the flop (burn one,
//! three to the board), and every later hand a turn or river (burn one,
//! one to the board). Betting is not modelled: Bet and Check only check
//! that the player is still in the hand; Fold mucks the hand into the
//! trash pile.

use crate::actions::{ActionContext, HandlerTable, Instruction, InstructionKind};
use crate::core::error::{Result, RuleViolationError};
use crate::dealer::{Destination, Source};
use crate::rules::{DistributionMethod, HandPlan, RuleSet, TransferRules};
use crate::zones::Zone;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoldemAction {
    /// Includes raising.
    Bet,
    Fold,
    Check,
}

impl InstructionKind for HoldemAction {
    const ALL: &'static [Self] = &[HoldemAction::Bet, HoldemAction::Fold, HoldemAction::Check];
}

/// Hold'em dealing plan for 2 to 10 players.
pub fn rules() -> Result<RuleSet> {
    RuleSet::builder(52, 2, 10)
        .early_hand(HandPlan::new(2, 0, 0))
        .early_hand(HandPlan::new(0, 3, 1))
        .steady_state(HandPlan::new(0, 1, 1))
        .order([Zone::TrashPile, Zone::PlayerHands, Zone::Board, Zone::Unused])
        .all_methods(DistributionMethod::Lump)
        .transfers(TransferRules::default().allow(Zone::PlayerHands, Zone::TrashPile))
        .build()
}

fn require_in_hand(ctx: &ActionContext<'_>) -> Result<()> {
    if ctx.ledger.hand_size(ctx.player) == 0 {
        return Err(RuleViolationError::InvalidInstruction {
            reason: format!("{} has already folded", ctx.player),
        }
        .into());
    }
    Ok(())
}

fn fold(ctx: &mut ActionContext<'_>, _instruction: &Instruction<HoldemAction>) -> Result<()> {
    require_in_hand(ctx)?;
    let hand = ctx.ledger.hand_of(ctx.player);
    ctx.dealer
        .transfer(ctx.ledger, ctx.rules, Source::Player(ctx.player, hand), Destination::TrashPile)?;
    Ok(())
}

/// Handlers for every Hold'em action.
pub fn handlers() -> Result<HandlerTable<HoldemAction>> {
    HandlerTable::builder()
        .on(HoldemAction::Bet, |ctx, _| require_in_hand(ctx))
        .on(HoldemAction::Check, |ctx, _| require_in_hand(ctx))
        .on(HoldemAction::Fold, fold)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_feasible_for_full_table() {
        let rules = rules().unwrap();
        let ten = rules.feasibility().usage(10).unwrap();

        assert_eq!(ten.after_early_hands, vec![20, 24]);
        assert_eq!(ten.steady_state_demand, 2);
        assert_eq!(ten.steady_state_capacity, Some(14));
        assert!(!rules.trash_pile_last());
    }

    #[test]
    fn test_handlers_cover_every_action() {
        assert_eq!(handlers().unwrap().len(), HoldemAction::ALL.len());
    }
}
