//! Zone ledger: custody-gated card bookkeeping.
//!
//! The `ZoneLedger` owns the four zones over one card universe and is the
//! single authority for where every card is. Held cards are attributed to
//! their holder, so a player's hand is a view derived from the ledger
//! rather than a second copy kept elsewhere.
//!
//! Mutations come in two halves: a removal (`draw_from_unused`,
//! `remove_from_board`, ...) lifts cards out of a zone into transit, and a
//! placement (`add_to_board`, `give_to_players`, ...) only accepts cards
//! that are in transit. Once every lifted card has been placed the ledger
//! is settled and the zones partition the universe exactly.
//!
//! Every mutating operation requires custody, which only the holder of the
//! ledger's `CustodyKey` can grant. Each operation validates its whole
//! batch before touching any zone, so a rejected call leaves the ledger
//! unchanged.

use std::sync::atomic::{AtomicU64, Ordering};

use im::{OrdMap, OrdSet, Vector};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::Zone;
use crate::cards::{Card, CardUniverse, DeckType};
use crate::core::error::{AuthorizationError, Result, ZoneConsistencyError};
use crate::core::observe::ObservableState;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::dealer::GameAssignment;

static NEXT_LEDGER_ID: AtomicU64 = AtomicU64::new(1);

/// Capability to grant and revoke custody on exactly one ledger.
///
/// Returned once by `ZoneLedger::new`; it cannot be cloned, so whoever
/// holds it is the orchestrator. `delegate` hands a dealer the narrower
/// right to take custody for a hand.
#[derive(Debug, PartialEq, Eq)]
pub struct CustodyKey {
    ledger_id: u64,
}

impl CustodyKey {
    /// Id of the ledger this key controls.
    #[must_use]
    pub fn ledger_id(&self) -> u64 {
        self.ledger_id
    }

    /// Let a dealer take custody of this ledger while running `game`.
    #[must_use]
    pub fn delegate(&self, game: impl Into<String>) -> GameAssignment {
        let key = CustodyKey {
            ledger_id: self.ledger_id,
        };
        GameAssignment::new(key, game.into())
    }
}

/// Serializable picture of every zone, used for audits and equality checks.
///
/// Presence-set zones are listed in card order; stacks bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub unused: Vec<Card>,
    pub board: Vec<Card>,
    pub trash_pile: Vec<Card>,
    pub player_hands: Vec<(Card, PlayerId)>,
    pub in_transit: Vec<Card>,
    pub custody_granted: bool,
}

impl LedgerSnapshot {
    /// Encode to bytes for byte-for-byte comparison or archival.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Four disjoint zones over a card universe, gated by custody.
///
/// Uses `im` persistent collections, so cloning a ledger (e.g. to keep a
/// pre-hand copy) is O(1).
///
/// ## Usage
///
/// ```
/// use rust_dealer::cards::CardUniverse;
/// use rust_dealer::core::GameRng;
/// use rust_dealer::zones::ZoneLedger;
///
/// let universe = CardUniverse::french();
/// let (mut ledger, key) = ZoneLedger::new(&universe, &mut GameRng::new(1));
///
/// // Mutations fail until custody is granted.
/// assert!(ledger.draw_from_unused(3).is_err());
///
/// ledger.grant_custody(&key).unwrap();
/// let flop = ledger.draw_from_unused(3).unwrap();
/// ledger.add_to_board(&flop).unwrap();
///
/// assert_eq!(ledger.board_len(), 3);
/// assert!(ledger.check_conservation().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ZoneLedger {
    id: u64,
    deck_type: DeckType,
    wild_count: u16,

    /// Every card of the universe.
    members: OrdSet<Card>,

    /// Undealt stock; top of the stack is the back.
    unused: Vector<Card>,

    board: OrdSet<Card>,

    /// Discard pile; top of the stack is the back.
    trash_pile: Vector<Card>,

    /// Held cards, each attributed to its holder.
    player_hands: OrdMap<Card, PlayerId>,

    /// Cards lifted out of a zone and not yet placed.
    in_transit: OrdSet<Card>,

    custody_granted: bool,
}

impl ZoneLedger {
    /// Create a ledger with the whole universe shuffled into `unused`.
    ///
    /// Returns the ledger together with its one custody key.
    #[must_use]
    pub fn new(universe: &CardUniverse, rng: &mut GameRng) -> (Self, CustodyKey) {
        let id = NEXT_LEDGER_ID.fetch_add(1, Ordering::Relaxed);
        let ledger = Self {
            id,
            deck_type: universe.deck_type(),
            wild_count: universe.wild_count(),
            members: universe.iter().collect(),
            unused: universe.shuffled(rng).into_iter().collect(),
            board: OrdSet::new(),
            trash_pile: Vector::new(),
            player_hands: OrdMap::new(),
            in_transit: OrdSet::new(),
            custody_granted: false,
        };

        debug!("ledger {} created with {} cards", id, ledger.universe_size());
        (ledger, CustodyKey { ledger_id: id })
    }

    /// Unique id of this ledger.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    // === Custody ===

    /// Grant custody, allowing zone mutations.
    pub fn grant_custody(&mut self, key: &CustodyKey) -> Result<()> {
        self.check_key(key)?;
        if !self.custody_granted {
            info!("ledger {}: custody granted", self.id);
        }
        self.custody_granted = true;
        Ok(())
    }

    /// Revoke custody; every mutation fails until it is granted again.
    pub fn revoke_custody(&mut self, key: &CustodyKey) -> Result<()> {
        self.check_key(key)?;
        if self.custody_granted {
            info!("ledger {}: custody revoked", self.id);
        }
        self.custody_granted = false;
        Ok(())
    }

    #[must_use]
    pub fn custody_granted(&self) -> bool {
        self.custody_granted
    }

    fn check_key(&self, key: &CustodyKey) -> Result<()> {
        if key.ledger_id != self.id {
            return Err(AuthorizationError::ForeignKey.into());
        }
        Ok(())
    }

    fn require_custody(&self, operation: &'static str) -> Result<()> {
        if !self.custody_granted {
            return Err(AuthorizationError::CustodyNotGranted { operation }.into());
        }
        Ok(())
    }

    // === Unused ===

    /// Pop `n` cards off the top of `unused`, top card first.
    pub fn draw_from_unused(&mut self, n: usize) -> Result<Vec<Card>> {
        self.require_custody("draw_from_unused")?;
        let available = self.unused.len();
        if n > available {
            return Err(ZoneConsistencyError::Underflow {
                zone: Zone::Unused,
                requested: n,
                available,
            }
            .into());
        }

        let drawn = pop_n(&mut self.unused, n);
        self.lift(&drawn);
        debug!("ledger {}: drew {} from unused", self.id, drawn.len());
        Ok(drawn)
    }

    /// Push cards back onto `unused` so that drawing `cards.len()` cards
    /// returns them in their original order.
    pub fn replenish_unused(&mut self, cards: &[Card]) -> Result<()> {
        self.require_custody("replenish_unused")?;
        self.check_placeable(cards, Zone::Unused)?;

        for &card in cards.iter().rev() {
            self.unused.push_back(card);
        }
        self.land(cards);
        debug!("ledger {}: replenished unused with {}", self.id, cards.len());
        Ok(())
    }

    // === Board ===

    /// Place cards on the board.
    pub fn add_to_board(&mut self, cards: &[Card]) -> Result<()> {
        self.require_custody("add_to_board")?;
        self.check_placeable(cards, Zone::Board)?;

        for &card in cards {
            self.board.insert(card);
        }
        self.land(cards);
        debug!("ledger {}: {} to board", self.id, cards.len());
        Ok(())
    }

    /// Lift the selected cards off the board.
    pub fn remove_from_board(&mut self, selection: &[Card]) -> Result<Vec<Card>> {
        self.require_custody("remove_from_board")?;
        check_selection(selection, Zone::Board, |card| self.board.contains(card))?;

        for card in selection {
            self.board.remove(card);
        }
        self.lift(selection);
        debug!("ledger {}: {} off board", self.id, selection.len());
        Ok(selection.to_vec())
    }

    // === Trash pile ===

    /// Push cards onto the trash pile, last card on top.
    pub fn add_to_trash(&mut self, cards: &[Card]) -> Result<()> {
        self.require_custody("add_to_trash")?;
        self.check_placeable(cards, Zone::TrashPile)?;

        for &card in cards {
            self.trash_pile.push_back(card);
        }
        self.land(cards);
        debug!("ledger {}: {} to trash pile", self.id, cards.len());
        Ok(())
    }

    /// Pop `n` cards off the top of the trash pile, top card first.
    pub fn burn_from_trash(&mut self, n: usize) -> Result<Vec<Card>> {
        self.require_custody("burn_from_trash")?;
        let available = self.trash_pile.len();
        if n > available {
            return Err(ZoneConsistencyError::Underflow {
                zone: Zone::TrashPile,
                requested: n,
                available,
            }
            .into());
        }

        let burnt = pop_n(&mut self.trash_pile, n);
        self.lift(&burnt);
        debug!("ledger {}: {} off trash pile", self.id, burnt.len());
        Ok(burnt)
    }

    // === Player hands ===

    /// Place cards into players' hands, each with its recipient.
    pub fn give_to_players(&mut self, assignments: &[(PlayerId, Card)]) -> Result<()> {
        self.require_custody("give_to_players")?;
        let cards: Vec<Card> = assignments.iter().map(|&(_, card)| card).collect();
        self.check_placeable(&cards, Zone::PlayerHands)?;

        for &(player, card) in assignments {
            self.player_hands.insert(card, player);
        }
        self.land(&cards);
        debug!("ledger {}: {} to player hands", self.id, cards.len());
        Ok(())
    }

    /// Place cards into one player's hand.
    pub fn give_to_player(&mut self, player: PlayerId, cards: &[Card]) -> Result<()> {
        let assignments: Vec<_> = cards.iter().map(|&card| (player, card)).collect();
        self.give_to_players(&assignments)
    }

    /// Lift the selected cards out of whichever hands hold them.
    ///
    /// Returns each card with the player it was taken from.
    pub fn take_from_players(&mut self, selection: &[Card]) -> Result<Vec<(PlayerId, Card)>> {
        self.require_custody("take_from_players")?;
        check_selection(selection, Zone::PlayerHands, |card| {
            self.player_hands.contains_key(card)
        })?;

        let taken: Vec<_> = selection
            .iter()
            .filter_map(|card| self.player_hands.remove(card).map(|holder| (holder, *card)))
            .collect();
        self.lift(selection);
        debug!("ledger {}: {} out of player hands", self.id, taken.len());
        Ok(taken)
    }

    /// Lift cards out of one player's hand; every card must be theirs.
    pub fn take_from_player(&mut self, player: PlayerId, selection: &[Card]) -> Result<Vec<Card>> {
        self.require_custody("take_from_player")?;
        for &card in selection {
            if let Some(&holder) = self.player_hands.get(&card) {
                if holder != player {
                    return Err(ZoneConsistencyError::NotHeldBy { card, player, holder }.into());
                }
            }
        }

        let taken = self.take_from_players(selection)?;
        Ok(taken.into_iter().map(|(_, card)| card).collect())
    }

    // === Queries ===

    /// Number of distinct cards in the universe.
    #[must_use]
    pub fn universe_size(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn unused_len(&self) -> usize {
        self.unused.len()
    }

    #[must_use]
    pub fn board_len(&self) -> usize {
        self.board.len()
    }

    #[must_use]
    pub fn trash_pile_len(&self) -> usize {
        self.trash_pile.len()
    }

    /// Total cards held across all players.
    #[must_use]
    pub fn player_hands_len(&self) -> usize {
        self.player_hands.len()
    }

    /// Cards currently lifted and not yet placed.
    #[must_use]
    pub fn in_transit_len(&self) -> usize {
        self.in_transit.len()
    }

    /// True when no card is in transit.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.in_transit.is_empty()
    }

    /// Board cards in card order.
    #[must_use]
    pub fn board(&self) -> Vec<Card> {
        self.board.iter().copied().collect()
    }

    /// Top card of the trash pile, the only one that is face up.
    #[must_use]
    pub fn trash_top(&self) -> Option<Card> {
        self.trash_pile.back().copied()
    }

    /// Cards held by one player, in card order.
    #[must_use]
    pub fn hand_of(&self, player: PlayerId) -> Vec<Card> {
        self.player_hands
            .iter()
            .filter(|(_, &holder)| holder == player)
            .map(|(&card, _)| card)
            .collect()
    }

    /// Number of cards held by one player.
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.player_hands.values().filter(|&&holder| holder == player).count()
    }

    /// Which player holds a card, if any.
    #[must_use]
    pub fn holder_of(&self, card: Card) -> Option<PlayerId> {
        self.player_hands.get(&card).copied()
    }

    /// Which zone a card is in; `None` while it is in transit or unknown.
    #[must_use]
    pub fn zone_of(&self, card: Card) -> Option<Zone> {
        if self.board.contains(&card) {
            Some(Zone::Board)
        } else if self.player_hands.contains_key(&card) {
            Some(Zone::PlayerHands)
        } else if self.unused.contains(&card) {
            Some(Zone::Unused)
        } else if self.trash_pile.contains(&card) {
            Some(Zone::TrashPile)
        } else {
            None
        }
    }

    /// Verify that the zones partition the universe exactly.
    ///
    /// Fails while any card is in transit, if any card appears twice,
    /// or if any card is missing.
    pub fn check_conservation(&self) -> Result<()> {
        let expected = self.universe_size();
        let found = self.unused.len()
            + self.board.len()
            + self.trash_pile.len()
            + self.player_hands.len();

        if found != expected || !self.in_transit.is_empty() {
            return Err(ZoneConsistencyError::ConservationBroken { expected, found }.into());
        }

        let mut seen: OrdSet<Card> = OrdSet::new();
        let all = self
            .unused
            .iter()
            .chain(self.board.iter())
            .chain(self.trash_pile.iter())
            .chain(self.player_hands.keys());
        for &card in all {
            if !self.members.contains(&card) {
                return Err(ZoneConsistencyError::UnknownCard { card }.into());
            }
            if seen.insert(card).is_some() {
                return Err(ZoneConsistencyError::ConservationBroken { expected, found }.into());
            }
        }
        Ok(())
    }

    /// Public counts for decision-making.
    #[must_use]
    pub fn observe(&self, roster: &[PlayerId]) -> ObservableState {
        ObservableState {
            player_count: roster.len(),
            board: self.board(),
            trash_top: self.trash_top(),
            unused_count: self.unused.len(),
            trash_pile_count: self.trash_pile.len(),
            player_hand_count: self.player_hands.len(),
            hand_sizes: roster.iter().map(|&p| (p, self.hand_size(p))).collect(),
            deck_type: self.deck_type,
            wild_count: self.wild_count,
        }
    }

    /// Full picture of every zone.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            unused: self.unused.iter().copied().collect(),
            board: self.board(),
            trash_pile: self.trash_pile.iter().copied().collect(),
            player_hands: self.player_hands.iter().map(|(&c, &p)| (c, p)).collect(),
            in_transit: self.in_transit.iter().copied().collect(),
            custody_granted: self.custody_granted,
        }
    }

    // === Internal ===

    fn lift(&mut self, cards: &[Card]) {
        for &card in cards {
            self.in_transit.insert(card);
        }
    }

    fn land(&mut self, cards: &[Card]) {
        for card in cards {
            self.in_transit.remove(card);
        }
    }

    fn contains_in(&self, zone: Zone, card: Card) -> bool {
        match zone {
            Zone::Unused => self.unused.contains(&card),
            Zone::Board => self.board.contains(&card),
            Zone::TrashPile => self.trash_pile.contains(&card),
            Zone::PlayerHands => self.player_hands.contains_key(&card),
        }
    }

    /// Every card must be known, not already in `zone`, distinct within
    /// the batch, and in transit.
    fn check_placeable(&self, cards: &[Card], zone: Zone) -> Result<()> {
        let mut batch: OrdSet<Card> = OrdSet::new();
        for &card in cards {
            if !self.members.contains(&card) {
                return Err(ZoneConsistencyError::UnknownCard { card }.into());
            }
            if self.contains_in(zone, card) || batch.insert(card).is_some() {
                return Err(ZoneConsistencyError::DuplicateCard { card, zone }.into());
            }
            if !self.in_transit.contains(&card) {
                return Err(ZoneConsistencyError::NotInTransit { card }.into());
            }
        }
        Ok(())
    }
}

/// Every selected card must be present and selected once.
fn check_selection(selection: &[Card], zone: Zone, present: impl Fn(&Card) -> bool) -> Result<()> {
    let mut seen: OrdSet<Card> = OrdSet::new();
    for &card in selection {
        if !present(&card) || seen.insert(card).is_some() {
            return Err(ZoneConsistencyError::CardNotFound { card, zone }.into());
        }
    }
    Ok(())
}

fn pop_n(stack: &mut Vector<Card>, n: usize) -> Vec<Card> {
    let mut popped = Vec::with_capacity(n);
    for _ in 0..n {
        match stack.pop_back() {
            Some(card) => popped.push(card),
            None => break,
        }
    }
    popped
}
