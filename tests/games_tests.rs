//! Full games driven through a `Table`.
//!
//! Hold'em exercises multi-stage dealing with a scripted fold; Dynamite
//! exercises player-to-player transfers, drawing, and set elimination.

use rust_dealer::actions::{FnBehavior, PassiveBehavior, PlayerView};
use rust_dealer::cards::{CardUniverse, Rank};
use rust_dealer::core::{Error, GameRng, PlayerId, RuleViolationError};
use rust_dealer::dealer::Dealer;
use rust_dealer::games::dynamite::{self, DynamiteAction};
use rust_dealer::games::holdem::{self, HoldemAction};
use rust_dealer::zones::{Zone, ZoneLedger};
use rust_dealer::{Instruction, Player, ScriptedBehavior, Table};

fn holdem_table(seed: u64, players: Vec<Player<HoldemAction>>) -> Table<HoldemAction> {
    Table::new(
        "holdem",
        &CardUniverse::french(),
        holdem::rules().unwrap(),
        holdem::handlers().unwrap(),
        players,
        &mut GameRng::new(seed),
    )
    .unwrap()
}

/// Pre-flop, flop, turn, river with one player folding on the flop.
#[test]
fn test_holdem_full_hand_with_fold() {
    let bettor = FnBehavior(|view: &PlayerView| {
        if view.hand.is_empty() {
            Vec::new()
        } else {
            vec![Instruction::new(HoldemAction::Bet)]
        }
    });
    let folder = ScriptedBehavior::new([
        vec![Instruction::new(HoldemAction::Check)],
        vec![Instruction::new(HoldemAction::Fold)],
    ]);
    let players = vec![
        Player::new(PlayerId::new(0), "alice", bettor),
        Player::new(PlayerId::new(1), "bob", folder),
        Player::new(PlayerId::new(2), "carol", PassiveBehavior),
    ];
    let mut table = holdem_table(7, players);

    let preflop = table.play_hand().unwrap();
    assert_eq!(preflop.moved(Zone::PlayerHands), 6);
    assert_eq!(table.ledger().board_len(), 0);

    let flop = table.play_hand().unwrap();
    assert_eq!(flop.moved(Zone::TrashPile), 1);
    assert_eq!(flop.moved(Zone::Board), 3);
    assert_eq!(table.ledger().hand_size(PlayerId::new(1)), 0);
    assert_eq!(table.ledger().trash_pile_len(), 3);

    table.play_hand().unwrap();
    table.play_hand().unwrap();

    let ledger = table.ledger();
    assert_eq!(table.hand_index(), 4);
    assert_eq!(ledger.board_len(), 5);
    assert_eq!(ledger.trash_pile_len(), 5);
    assert_eq!(ledger.player_hands_len(), 4);
    assert_eq!(ledger.unused_len(), 38);
    assert!(ledger.check_conservation().is_ok());

    let view = table.view_for(PlayerId::new(0));
    assert_eq!(view.hand.len(), 2);
    assert_eq!(view.public.board.len(), 5);
    assert_eq!(view.public.hand_size(PlayerId::new(1)), Some(0));
}

/// A folded player cannot bet again.
#[test]
fn test_holdem_bet_after_fold_is_rejected() {
    let players = vec![
        Player::new(
            PlayerId::new(0),
            "alice",
            ScriptedBehavior::new([
                vec![Instruction::new(HoldemAction::Fold)],
                vec![Instruction::new(HoldemAction::Bet)],
            ]),
        ),
        Player::new(PlayerId::new(1), "bob", PassiveBehavior),
    ];
    let mut table = holdem_table(8, players);

    table.play_hand().unwrap();
    let err = table.play_hand().unwrap_err();

    assert!(matches!(
        err,
        Error::RuleViolation(RuleViolationError::InvalidInstruction { .. })
    ));
    assert_eq!(table.hand_index(), 1);
}

/// A full ten-handed table deals out the whole plan and stays conserved.
#[test]
fn test_holdem_ten_players() {
    let players = (0..10)
        .map(|i| Player::new(PlayerId::new(i), format!("p{i}"), PassiveBehavior))
        .collect();
    let mut table = holdem_table(9, players);

    for _ in 0..4 {
        table.play_hand().unwrap();
    }
    assert_eq!(table.ledger().player_hands_len(), 20);
    assert_eq!(table.ledger().unused_len(), 52 - 20 - 5 - 3);

    table.close().unwrap();
    assert!(!table.ledger().custody_granted());
}

/// Drawing and throwing shift hand sizes, and scores follow hand sizes.
#[test]
fn test_dynamite_throw_and_draw() {
    let drawer = FnBehavior(|_: &PlayerView| vec![Instruction::new(DynamiteAction::Draw)]);
    let thrower = FnBehavior(|view: &PlayerView| match view.hand.first() {
        Some(&card) => vec![Instruction::new(DynamiteAction::Throw)
            .with_cards([card])
            .with_target(PlayerId::new(2))],
        None => Vec::new(),
    });
    let players = vec![
        Player::new(PlayerId::new(0), "drawer", drawer),
        Player::new(PlayerId::new(1), "thrower", thrower),
        Player::new(PlayerId::new(2), "target", PassiveBehavior),
    ];
    let mut table = Table::new(
        "dynamite",
        &CardUniverse::french(),
        dynamite::rules().unwrap(),
        dynamite::handlers().unwrap(),
        players,
        &mut GameRng::new(10),
    )
    .unwrap()
    .with_scoring(dynamite::score);

    table.play_hand().unwrap();
    table.play_hand().unwrap();

    let scores = table.update_scores();
    assert_eq!(
        scores,
        vec![(PlayerId::new(0), 9), (PlayerId::new(1), 5), (PlayerId::new(2), 9)]
    );
    assert_eq!(table.player(PlayerId::new(1)).unwrap().score(), 5);
    assert_eq!(table.ledger().unused_len(), 52 - 21 - 2);
    assert!(table.ledger().check_conservation().is_ok());
}

/// Seat 0 holds every seven; the set can be eliminated to the trash pile.
fn stacked_ledger() -> (ZoneLedger, Dealer, Vec<rust_dealer::Card>) {
    let (mut ledger, key) = ZoneLedger::new(&CardUniverse::french(), &mut GameRng::new(11));
    ledger.grant_custody(&key).unwrap();

    let all = ledger.draw_from_unused(52).unwrap();
    let (sevens, rest): (Vec<_>, Vec<_>) =
        all.into_iter().partition(|c| c.rank() == Some(Rank::Seven));
    ledger.give_to_player(PlayerId::new(0), &sevens).unwrap();
    ledger.replenish_unused(&rest).unwrap();

    let mut dealer = Dealer::new("dynamite");
    dealer.assign_game(key.delegate("dynamite"));
    (ledger, dealer, sevens)
}

#[test]
fn test_dynamite_eliminate_set() {
    let rules = dynamite::rules().unwrap();
    let handlers = dynamite::handlers().unwrap();
    let (mut ledger, dealer, sevens) = stacked_ledger();
    let roster = PlayerId::roster(2);

    let short = [Instruction::new(DynamiteAction::Eliminate).with_cards(sevens[..3].iter().copied())];
    let err = dealer
        .handle_player_actions(roster[0], &roster, &short, &handlers, &mut ledger, &rules)
        .unwrap_err();
    assert!(matches!(err, Error::RuleViolation(RuleViolationError::InvalidInstruction { .. })));

    let full = [Instruction::new(DynamiteAction::Eliminate).with_cards(sevens.iter().copied())];
    dealer
        .handle_player_actions(roster[0], &roster, &full, &handlers, &mut ledger, &rules)
        .unwrap();

    assert_eq!(ledger.hand_size(roster[0]), 0);
    assert_eq!(ledger.trash_pile_len(), 4);
    assert!(ledger.check_conservation().is_ok());
}

#[test]
fn test_dynamite_rejects_bad_instructions() {
    let rules = dynamite::rules().unwrap();
    let handlers = dynamite::handlers().unwrap();
    let (mut ledger, dealer, sevens) = stacked_ledger();
    let roster = PlayerId::roster(2);

    let cases = [
        // not the holder
        (roster[1], Instruction::new(DynamiteAction::Claim).with_cards([sevens[0]])),
        // throw without a target
        (roster[0], Instruction::new(DynamiteAction::Throw).with_cards([sevens[0]])),
        // throw to yourself
        (
            roster[0],
            Instruction::new(DynamiteAction::Throw)
                .with_cards([sevens[0]])
                .with_target(roster[0]),
        ),
    ];
    for (player, instruction) in cases {
        let err = dealer
            .handle_player_actions(player, &roster, &[instruction], &handlers, &mut ledger, &rules)
            .unwrap_err();
        assert!(matches!(err, Error::RuleViolation(RuleViolationError::InvalidInstruction { .. })));
    }

    let err = dealer
        .handle_player_actions(
            PlayerId::new(4),
            &roster,
            &[Instruction::new(DynamiteAction::Draw)],
            &handlers,
            &mut ledger,
            &rules,
        )
        .unwrap_err();
    assert!(matches!(err, Error::RuleViolation(RuleViolationError::UnknownPlayer { .. })));

    assert_eq!(ledger.hand_size(roster[0]), 4);
    assert!(ledger.check_conservation().is_ok());
}
