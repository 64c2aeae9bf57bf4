//! A thin orchestrator tying a ledger, rule set, dealer and players together.
//!
//! The table holds the custody key. Each hand it lets the dealer deal,
//! asks every seat for instructions in roster order, applies them, and
//! checks conservation before the next hand.

use std::fmt;

use log::info;

use crate::actions::{HandlerTable, InstructionKind, Player, PlayerView};
use crate::cards::CardUniverse;
use crate::core::error::{Result, RuleViolationError};
use crate::core::player::{PlayerId, PlayerMap, MAX_PLAYERS};
use crate::core::rng::{GameRng, GameRngState};
use crate::dealer::{Dealer, HandReport};
use crate::rules::RuleSet;
use crate::zones::{CustodyKey, ZoneLedger};

/// Score function: `(ledger, seat) -> score`.
pub type Scoring = fn(&ZoneLedger, PlayerId) -> i64;

fn cards_held(ledger: &ZoneLedger, player: PlayerId) -> i64 {
    ledger.hand_size(player) as i64
}

pub struct Table<K: InstructionKind> {
    name: String,
    ledger: ZoneLedger,
    key: CustodyKey,
    rules: RuleSet,
    dealer: Dealer,
    handlers: HandlerTable<K>,
    players: PlayerMap<Player<K>>,
    scoring: Scoring,
    hand_index: usize,
    shuffle_state: GameRngState,
}

impl<K: InstructionKind> Table<K> {
    /// Seat `players` (seat `i` must carry `PlayerId(i)`) and shuffle a
    /// fresh ledger from `universe`.
    pub fn new(
        name: impl Into<String>,
        universe: &CardUniverse,
        rules: RuleSet,
        handlers: HandlerTable<K>,
        players: Vec<Player<K>>,
        rng: &mut GameRng,
    ) -> Result<Self> {
        let range = rules.player_range();
        if players.is_empty() || players.len() > MAX_PLAYERS || !range.contains(players.len()) {
            return Err(RuleViolationError::PlayerCountOutOfRange {
                count: players.len(),
                min: range.min,
                max: range.max,
            }
            .into());
        }
        if let Some((_, player)) = players
            .iter()
            .enumerate()
            .find(|(seat, p)| p.id().index() != *seat)
        {
            return Err(RuleViolationError::UnknownPlayer { player: player.id() }.into());
        }

        let name = name.into();
        let shuffle_state = rng.state();
        let (ledger, key) = ZoneLedger::new(universe, rng);
        let mut dealer = Dealer::new(format!("{name} dealer"));
        dealer.assign_game(key.delegate(name.clone()));

        Ok(Self {
            name,
            ledger,
            key,
            rules,
            dealer,
            handlers,
            players: PlayerMap::from_vec(players),
            scoring: cards_held,
            hand_index: 0,
            shuffle_state,
        })
    }

    /// Replace the score function (default: cards held).
    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn ledger(&self) -> &ZoneLedger {
        &self.ledger
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Index of the next hand to be dealt.
    #[must_use]
    pub fn hand_index(&self) -> usize {
        self.hand_index
    }

    #[must_use]
    pub fn roster(&self) -> Vec<PlayerId> {
        self.players.roster()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player<K>> {
        self.players.get(id)
    }

    /// RNG position the deck was shuffled from. Replaying it against the
    /// same universe reproduces the opening deck order.
    #[must_use]
    pub fn shuffle_state(&self) -> GameRngState {
        self.shuffle_state
    }

    /// What `player` would see right now.
    #[must_use]
    pub fn view_for(&self, player: PlayerId) -> PlayerView {
        PlayerView {
            player,
            public: self.ledger.observe(&self.roster()),
            hand: self.ledger.hand_of(player),
        }
    }

    /// Deal the next hand, then collect and apply every seat's instructions.
    pub fn play_hand(&mut self) -> Result<HandReport> {
        let roster = self.roster();
        self.ledger.grant_custody(&self.key)?;

        let report = self
            .dealer
            .deal(&roster, &self.rules, &mut self.ledger, self.hand_index)?;

        for &seat in &roster {
            let view = self.view_for(seat);
            let instructions = self.players[seat].take_action(&view);
            self.dealer.handle_player_actions(
                seat,
                &roster,
                &instructions,
                &self.handlers,
                &mut self.ledger,
                &self.rules,
            )?;
        }

        self.ledger.check_conservation()?;
        self.ledger.observe(&roster).validate()?;
        self.hand_index += 1;
        info!("{}: hand {} complete", self.name, report.hand_index);
        Ok(report)
    }

    /// Recompute every seat's score from the ledger.
    pub fn update_scores(&mut self) -> Vec<(PlayerId, i64)> {
        let scoring = self.scoring;
        let ledger = &self.ledger;
        self.players
            .iter_mut()
            .map(|(seat, player)| {
                let score = scoring(ledger, seat);
                player.set_score(score);
                (seat, score)
            })
            .collect()
    }

    /// Stop the game: revoke custody so no further moves are possible.
    pub fn close(&mut self) -> Result<()> {
        self.ledger.revoke_custody(&self.key)?;
        info!("{}: closed after {} hands", self.name, self.hand_index);
        Ok(())
    }
}

impl<K: InstructionKind> fmt::Debug for Table<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("hand_index", &self.hand_index)
            .field("shuffle_state", &self.shuffle_state)
            .field("dealer", &self.dealer)
            .field("players", &self.players)
            .finish_non_exhaustive()
    }
}
