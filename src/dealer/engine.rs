//! The distribution engine.
//!
//! A `Dealer` holds no game state of its own. It is assigned to one ledger
//! through a `GameAssignment`, takes custody of that ledger when it starts
//! work, and then executes a rule set's plan one hand at a time.
//!
//! Failures abort the current call. Steps already committed earlier in
//! the same call stay committed; the caller decides whether to abandon
//! the game.

use log::{debug, info, warn};

use super::distribution::{self, HandReport, ZoneStep};
use crate::actions::{ActionContext, HandlerTable, Instruction, InstructionKind};
use crate::cards::Card;
use crate::core::error::{
    AuthorizationError, DistributionMismatchError, Result, RuleViolationError,
};
use crate::core::player::PlayerId;
use crate::rules::{DistributionMethod, LumpRemainder, RuleSet};
use crate::zones::{CustodyKey, Zone, ZoneLedger};

/// A dealer's right to take custody of one game's ledger.
///
/// Created by `CustodyKey::delegate`. It can grant custody but never
/// revoke it; revoking stays with the orchestrator.
#[derive(Debug)]
pub struct GameAssignment {
    key: CustodyKey,
    game: String,
}

impl GameAssignment {
    pub(crate) fn new(key: CustodyKey, game: String) -> Self {
        Self { key, game }
    }

    /// Name of the game this assignment is for.
    #[must_use]
    pub fn game(&self) -> &str {
        &self.game
    }

    /// Id of the ledger this assignment controls.
    #[must_use]
    pub fn ledger_id(&self) -> u64 {
        self.key.ledger_id()
    }
}

/// Where cards come from in a non-dealing transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Board(Vec<Card>),
    /// The top `n` cards of the trash pile.
    TrashTop(usize),
    Player(PlayerId, Vec<Card>),
}

impl Source {
    #[must_use]
    pub fn zone(&self) -> Zone {
        match self {
            Source::Board(_) => Zone::Board,
            Source::TrashTop(_) => Zone::TrashPile,
            Source::Player(..) => Zone::PlayerHands,
        }
    }
}

/// Where cards go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Unused,
    Board,
    TrashPile,
    Player(PlayerId),
}

impl Destination {
    #[must_use]
    pub fn zone(&self) -> Zone {
        match self {
            Destination::Unused => Zone::Unused,
            Destination::Board => Zone::Board,
            Destination::TrashPile => Zone::TrashPile,
            Destination::Player(_) => Zone::PlayerHands,
        }
    }
}

/// Executes distribution plans against a ledger.
///
/// ## Example
///
/// ```
/// use rust_dealer::cards::CardUniverse;
/// use rust_dealer::core::{GameRng, PlayerId};
/// use rust_dealer::dealer::Dealer;
/// use rust_dealer::rules::{DistributionMethod, HandPlan, RuleSet};
/// use rust_dealer::zones::{Zone, ZoneLedger};
///
/// let rules = RuleSet::builder(52, 2, 4)
///     .early_hand(HandPlan::new(5, 0, 0))
///     .order([Zone::PlayerHands])
///     .all_methods(DistributionMethod::RoundRobin)
///     .build()
///     .unwrap();
///
/// let (mut ledger, key) = ZoneLedger::new(&CardUniverse::french(), &mut GameRng::new(3));
/// let mut dealer = Dealer::new("house");
/// dealer.assign_game(key.delegate("five-card draw"));
///
/// let roster = PlayerId::roster(3);
/// let report = dealer.deal(&roster, &rules, &mut ledger, 0).unwrap();
///
/// assert_eq!(report.moved(Zone::PlayerHands), 15);
/// assert_eq!(ledger.hand_size(PlayerId::new(2)), 5);
/// ```
#[derive(Debug)]
pub struct Dealer {
    name: String,
    assignment: Option<GameAssignment>,
}

impl Dealer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assignment: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach the dealer to a game, replacing any previous assignment.
    pub fn assign_game(&mut self, assignment: GameAssignment) {
        info!("dealer {}: assigned to {}", self.name, assignment.game);
        self.assignment = Some(assignment);
    }

    /// Detach the dealer from its game.
    pub fn unassign(&mut self) -> Option<GameAssignment> {
        self.assignment.take()
    }

    #[must_use]
    pub fn assignment(&self) -> Option<&GameAssignment> {
        self.assignment.as_ref()
    }

    /// The assignment, if it controls `ledger`. Touches nothing.
    fn assignment_for(&self, ledger: &ZoneLedger) -> Result<&GameAssignment> {
        let assignment = self
            .assignment
            .as_ref()
            .ok_or(AuthorizationError::GameUnassigned)?;
        if assignment.key.ledger_id() != ledger.id() {
            return Err(AuthorizationError::ForeignKey.into());
        }
        Ok(assignment)
    }

    /// Confirm the assignment matches `ledger` and make sure custody is granted.
    fn take_over(&self, ledger: &mut ZoneLedger) -> Result<()> {
        let assignment = self.assignment_for(ledger)?;
        if !ledger.custody_granted() {
            ledger.grant_custody(&assignment.key)?;
        }
        Ok(())
    }

    // === Dealing ===

    /// Deal hand `hand_index` to `roster`.
    ///
    /// Zones are serviced in the rule set's order; zones with nothing to
    /// receive are skipped and Unused is never dealt to. After each zone
    /// the moved count is checked against the target.
    pub fn deal(
        &self,
        roster: &[PlayerId],
        rules: &RuleSet,
        ledger: &mut ZoneLedger,
        hand_index: usize,
    ) -> Result<HandReport> {
        self.assignment_for(ledger)?;
        if rules.deck_size() != ledger.universe_size() {
            return Err(RuleViolationError::DeckSizeMismatch {
                rules: rules.deck_size(),
                ledger: ledger.universe_size(),
            }
            .into());
        }
        let player_count = roster.len();
        let hand = rules.resolve(hand_index, player_count)?;
        self.take_over(ledger)?;

        let mut report = HandReport {
            hand_index,
            player_count,
            steps: Vec::with_capacity(rules.order().len()),
        };

        for &zone in rules.order() {
            let method = rules.method(zone).unwrap_or_default();
            let target = match zone {
                Zone::Unused => continue,
                Zone::TrashPile if rules.trash_pile_last() => {
                    hand.trash_pile.min(ledger.unused_len())
                }
                _ => hand.target(zone, player_count),
            };
            if target == 0 {
                continue;
            }

            let moved = match zone {
                Zone::PlayerHands => {
                    let cards = ledger.draw_from_unused(target)?;
                    self.hand_out(ledger, roster, cards, method)?
                }
                _ => self.draw_batch(ledger, zone, target, method)?,
            };

            distribution::check_distribution(zone, target, moved)?;
            debug!(
                "dealer {}: hand {} moved {}/{} to {} ({:?})",
                self.name, hand_index, moved, target, zone, method
            );
            report.steps.push(ZoneStep {
                zone,
                method,
                target,
                moved,
            });
        }

        info!(
            "dealer {}: dealt hand {} to {} players, {} cards drawn",
            self.name,
            hand_index,
            player_count,
            report.total_drawn()
        );
        Ok(report)
    }

    /// Draw `count` cards and divide them among `roster` with the rule
    /// set's player method.
    ///
    /// A lump deal that does not divide evenly follows the rule set's
    /// `LumpRemainder` policy.
    pub fn deal_to_players(
        &self,
        roster: &[PlayerId],
        rules: &RuleSet,
        ledger: &mut ZoneLedger,
        count: usize,
    ) -> Result<ZoneStep> {
        self.assignment_for(ledger)?;
        let range = rules.player_range();
        if !range.contains(roster.len()) {
            return Err(RuleViolationError::PlayerCountOutOfRange {
                count: roster.len(),
                min: range.min,
                max: range.max,
            }
            .into());
        }

        let method = rules.method(Zone::PlayerHands).unwrap_or_default();
        let remainder = distribution::lump_remainder(count, roster.len());
        if method == DistributionMethod::Lump
            && remainder > 0
            && rules.lump_remainder() == LumpRemainder::Reject
        {
            return Err(DistributionMismatchError::LumpRemainder {
                batch: count,
                roster: roster.len(),
                remainder,
            }
            .into());
        }
        self.take_over(ledger)?;

        let target = match rules.lump_remainder() {
            LumpRemainder::Stop if method == DistributionMethod::Lump => count - remainder,
            _ => count,
        };
        let cards = ledger.draw_from_unused(count)?;
        let moved = self.hand_out(ledger, roster, cards, method)?;
        distribution::check_distribution(Zone::PlayerHands, target, moved)?;

        Ok(ZoneStep {
            zone: Zone::PlayerHands,
            method,
            target,
            moved,
        })
    }

    /// Draw `count` cards from Unused straight to a destination.
    ///
    /// Drawing is the dealing path, so no transfer permission is needed.
    pub fn draw_to(
        &self,
        ledger: &mut ZoneLedger,
        rules: &RuleSet,
        destination: Destination,
        count: usize,
    ) -> Result<usize> {
        self.take_over(ledger)?;
        let method = rules.method(destination.zone()).unwrap_or_default();

        match destination {
            Destination::Unused => Ok(0),
            Destination::Board => self.draw_batch(ledger, Zone::Board, count, method),
            Destination::TrashPile => self.draw_batch(ledger, Zone::TrashPile, count, method),
            Destination::Player(player) => {
                let cards = ledger.draw_from_unused(count)?;
                ledger.give_to_player(player, &cards)?;
                debug!("dealer {}: {} drew {}", self.name, player, cards.len());
                Ok(cards.len())
            }
        }
    }

    /// Lifted cards to players. Returns how many were placed.
    fn hand_out(
        &self,
        ledger: &mut ZoneLedger,
        roster: &[PlayerId],
        cards: Vec<Card>,
        method: DistributionMethod,
    ) -> Result<usize> {
        let split = distribution::split(cards, roster, method);
        ledger.give_to_players(&split.dealt)?;

        if !split.remainder.is_empty() {
            warn!(
                "dealer {}: lump deal left {} undealt, returning them to unused",
                self.name,
                split.remainder.len()
            );
            ledger.replenish_unused(&split.remainder)?;
        }
        Ok(split.dealt.len())
    }

    /// Unused to Board or TrashPile, as one batch or one card at a time.
    fn draw_batch(
        &self,
        ledger: &mut ZoneLedger,
        zone: Zone,
        count: usize,
        method: DistributionMethod,
    ) -> Result<usize> {
        match method {
            DistributionMethod::Lump => {
                let cards = ledger.draw_from_unused(count)?;
                place(ledger, zone, &cards)?;
                Ok(cards.len())
            }
            DistributionMethod::RoundRobin => {
                let mut moved = 0;
                for _ in 0..count {
                    let card = ledger.draw_from_unused(1)?;
                    place(ledger, zone, &card)?;
                    moved += card.len();
                }
                Ok(moved)
            }
        }
    }

    // === Player-driven moves ===

    /// Move cards between zones on a player's behalf, if the rule set
    /// permits that direction.
    pub fn transfer(
        &self,
        ledger: &mut ZoneLedger,
        rules: &RuleSet,
        source: Source,
        destination: Destination,
    ) -> Result<Vec<Card>> {
        self.take_over(ledger)?;

        let (from, to) = (source.zone(), destination.zone());
        if !rules.transfers().allows(from, to) {
            return Err(RuleViolationError::TransferNotPermitted { from, to }.into());
        }

        let cards = match source {
            Source::Board(selection) => ledger.remove_from_board(&selection)?,
            Source::TrashTop(n) => ledger.burn_from_trash(n)?,
            Source::Player(player, selection) => ledger.take_from_player(player, &selection)?,
        };

        match destination {
            Destination::Unused => ledger.replenish_unused(&cards)?,
            Destination::Board => ledger.add_to_board(&cards)?,
            Destination::TrashPile => ledger.add_to_trash(&cards)?,
            Destination::Player(player) => ledger.give_to_player(player, &cards)?,
        }

        debug!("dealer {}: transferred {} from {} to {}", self.name, cards.len(), from, to);
        Ok(cards)
    }

    /// Run each of a player's instructions through its registered handler.
    ///
    /// Stops at the first failing instruction.
    pub fn handle_player_actions<K: InstructionKind>(
        &self,
        player: PlayerId,
        roster: &[PlayerId],
        instructions: &[Instruction<K>],
        handlers: &HandlerTable<K>,
        ledger: &mut ZoneLedger,
        rules: &RuleSet,
    ) -> Result<()> {
        self.take_over(ledger)?;
        if !roster.contains(&player) {
            return Err(RuleViolationError::UnknownPlayer { player }.into());
        }

        let mut ctx = ActionContext {
            player,
            roster,
            dealer: self,
            ledger,
            rules,
        };
        for instruction in instructions {
            debug!("dealer {}: {} -> {:?}", self.name, player, instruction.kind);
            handlers.dispatch(&mut ctx, instruction)?;
        }
        Ok(())
    }
}

fn place(ledger: &mut ZoneLedger, zone: Zone, cards: &[Card]) -> Result<()> {
    match zone {
        Zone::Board => ledger.add_to_board(cards),
        _ => ledger.add_to_trash(cards),
    }
}
