//! Dynamite.
//!
//! Everyone is dealt seven cards up front and nothing is dealt after
//! that. On a turn a player may claim a rank, throw cards of a claimed
//! rank to another player, draw one card from the stock, or eliminate a
//! complete set of four. The score is the number of cards left in hand,
//! so lower is better.

use crate::actions::{ActionContext, HandlerTable, Instruction, InstructionKind};
use crate::cards::{Card, Rank};
use crate::core::error::{Result, RuleViolationError};
use crate::core::player::PlayerId;
use crate::dealer::{Destination, Source};
use crate::rules::{DistributionMethod, HandPlan, RuleSet, TransferRules};
use crate::zones::{Zone, ZoneLedger};

/// Cards in a complete set.
pub const SET_SIZE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DynamiteAction {
    Claim,
    Throw,
    Draw,
    Eliminate,
}

impl InstructionKind for DynamiteAction {
    const ALL: &'static [Self] = &[
        DynamiteAction::Claim,
        DynamiteAction::Throw,
        DynamiteAction::Draw,
        DynamiteAction::Eliminate,
    ];
}

/// Dynamite dealing plan for 2 to 5 players.
pub fn rules() -> Result<RuleSet> {
    RuleSet::builder(52, 2, 5)
        .early_hand(HandPlan::new(7, 0, 0))
        .steady_state(HandPlan::new(0, 0, 0))
        .order([Zone::PlayerHands, Zone::Board, Zone::TrashPile, Zone::Unused])
        .all_methods(DistributionMethod::Lump)
        .transfers(
            TransferRules::default()
                .allow(Zone::PlayerHands, Zone::PlayerHands)
                .allow(Zone::PlayerHands, Zone::TrashPile),
        )
        .build()
}

/// Cards left in hand.
#[must_use]
pub fn score(ledger: &ZoneLedger, player: PlayerId) -> i64 {
    ledger.hand_size(player) as i64
}

fn invalid(reason: impl Into<String>) -> crate::core::error::Error {
    RuleViolationError::InvalidInstruction {
        reason: reason.into(),
    }
    .into()
}

/// The single rank shared by every card, if there is one.
fn shared_rank(cards: &[Card]) -> Option<Rank> {
    let first = cards.first()?.rank()?;
    cards
        .iter()
        .all(|c| c.rank() == Some(first))
        .then_some(first)
}

/// Every card must be held by the acting player and share one rank.
fn held_set(ctx: &ActionContext<'_>, cards: &[Card]) -> Result<Rank> {
    if let Some(&card) = cards.iter().find(|&&c| ctx.ledger.holder_of(c) != Some(ctx.player)) {
        return Err(invalid(format!("{} does not hold {card}", ctx.player)));
    }
    shared_rank(cards).ok_or_else(|| invalid("cards must all share one rank"))
}

fn claim(ctx: &mut ActionContext<'_>, instruction: &Instruction<DynamiteAction>) -> Result<()> {
    let rank = held_set(ctx, &instruction.cards)?;
    log::debug!("{} claims {:?}", ctx.player, rank);
    Ok(())
}

fn throw(ctx: &mut ActionContext<'_>, instruction: &Instruction<DynamiteAction>) -> Result<()> {
    held_set(ctx, &instruction.cards)?;
    let target = instruction
        .target
        .ok_or_else(|| invalid("throw needs a target player"))?;
    ctx.require_seated(target)?;
    if target == ctx.player {
        return Err(invalid("cannot throw to yourself"));
    }

    ctx.dealer.transfer(
        ctx.ledger,
        ctx.rules,
        Source::Player(ctx.player, instruction.cards.to_vec()),
        Destination::Player(target),
    )?;
    Ok(())
}

fn draw(ctx: &mut ActionContext<'_>, _instruction: &Instruction<DynamiteAction>) -> Result<()> {
    ctx.dealer
        .draw_to(ctx.ledger, ctx.rules, Destination::Player(ctx.player), 1)?;
    Ok(())
}

fn eliminate(ctx: &mut ActionContext<'_>, instruction: &Instruction<DynamiteAction>) -> Result<()> {
    if instruction.cards.len() != SET_SIZE {
        return Err(invalid(format!(
            "eliminate needs exactly {SET_SIZE} cards, got {}",
            instruction.cards.len()
        )));
    }
    held_set(ctx, &instruction.cards)?;

    ctx.dealer.transfer(
        ctx.ledger,
        ctx.rules,
        Source::Player(ctx.player, instruction.cards.to_vec()),
        Destination::TrashPile,
    )?;
    Ok(())
}

/// Handlers for every Dynamite action.
pub fn handlers() -> Result<HandlerTable<DynamiteAction>> {
    HandlerTable::builder()
        .on(DynamiteAction::Claim, claim)
        .on(DynamiteAction::Throw, throw)
        .on(DynamiteAction::Draw, draw)
        .on(DynamiteAction::Eliminate, eliminate)
        .build()
}
