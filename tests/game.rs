//! Game integration tests.

use std::sync::{Arc, Mutex as StdMutex};

use bjtable::{
    ActionError, BettingError, Card, DealerId, Effect, Game, GameState, HandOutcome, HandStatus,
    HouseRules, Rank, ResetError, RuleProfile, Seat, SessionStats, Shoe, SwitchDealerError,
};

/// Cards of the given ranks, suits cycling so no two neighbours match.
fn cards(ranks: &[Rank]) -> Vec<Card> {
    ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| Card::new(bjtable::Suit::ALL[i % 4], rank))
        .collect()
}

/// Stacks the shoe so the next draws come out in `ranks` order.
///
/// The deal takes player, dealer up card, player, dealer hole card.
fn stack(game: &Game, ranks: &[Rank]) {
    *game.shoe.lock() = Shoe::stacked(&cards(ranks));
}

use bjtable::Rank::{Ace, Eight, Five, Four, Jack, King, Nine, Seven, Six, Ten, Three, Two};

#[test]
fn basic_round_flow() {
    let game = Game::new(DealerId::Ruby, 100, 42);
    stack(&game, &[Eight, Six, Seven, Ten, Four, Five]);

    game.place_bet(10).unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.bankroll(), 90);
    assert_eq!(game.active_hand(), Some(0));

    game.hit().unwrap();
    assert_eq!(game.hands()[0].value(), 19);

    game.stand().unwrap();
    assert_eq!(game.state(), GameState::Betting);

    let dealer = game.dealer_hand();
    assert_eq!(dealer.value(), 21);
    assert_eq!(dealer.len(), 3);

    let result = game.last_result().unwrap();
    assert_eq!(result.hands.len(), 1);
    assert_eq!(result.hands[0].outcome, HandOutcome::Loss);
    assert_eq!(result.net, -10);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn bet_errors() {
    let game = Game::new(DealerId::Ruby, 50, 1);

    assert_eq!(
        game.place_bet(5).unwrap_err(),
        BettingError::BelowMinimum {
            amount: 5,
            minimum: 10
        }
    );
    assert_eq!(
        game.place_bet(60).unwrap_err(),
        BettingError::AboveBankroll {
            amount: 60,
            bankroll: 50
        }
    );
    assert_eq!(game.bankroll(), 50);
    assert_eq!(game.state(), GameState::Betting);

    stack(&game, &[Ten, Six, Seven, Ten]);
    game.place_bet(50).unwrap();
    assert_eq!(game.place_bet(10).unwrap_err(), BettingError::InvalidState);
}

#[test]
fn actions_rejected_outside_player_turn() {
    let game = Game::new(DealerId::Ruby, 100, 3);

    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.double_down().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.split().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.surrender().unwrap_err(), ActionError::InvalidState);
    assert!(!game.allowed_actions().any());
}

#[test]
fn natural_against_low_up_card_settles_at_once() {
    let game = Game::new(DealerId::Ruby, 100, 7);
    stack(&game, &[Ace, Nine, King, Seven]);

    game.place_bet(10).unwrap();
    assert_eq!(game.state(), GameState::Betting);

    let dealer = game.dealer_hand();
    assert_eq!(dealer.len(), 2);
    assert!(dealer.is_hole_revealed());

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, 25);
    assert_eq!(game.bankroll(), 115);
}

#[test]
fn natural_against_ten_waits_for_the_hole_card() {
    let game = Game::new(DealerId::Ruby, 100, 8);
    stack(&game, &[Ace, King, King, Ace]);

    game.place_bet(10).unwrap();
    let result = game.last_result().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(game.bankroll(), 100);

    stack(&game, &[Ace, Ten, King, Seven]);
    game.place_bet(10).unwrap();
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.dealer_value, 17);
    assert_eq!(game.bankroll(), 115);
}

#[test]
fn natural_beats_a_dealer_who_draws_to_twenty_one() {
    let game = Game::new(DealerId::Ruby, 100, 10);
    stack(&game, &[Ace, Ten, King, Six, Five]);

    game.place_bet(10).unwrap();
    assert_eq!(game.state(), GameState::Betting);

    let dealer = game.dealer_hand();
    assert_eq!(dealer.len(), 3);
    assert_eq!(dealer.value(), 21);

    let result = game.last_result().unwrap();
    assert!(!result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, 25);
    assert_eq!(game.bankroll(), 115);
}

#[test]
fn blackjack_payout_ratio_per_dealer() {
    let ruby = Game::new(DealerId::Ruby, 1000, 9);
    stack(&ruby, &[Ace, Nine, King, Seven]);
    ruby.place_bet(100).unwrap();
    let record = &ruby.last_result().unwrap().hands[0];
    assert_eq!(record.payout, 250);
    assert_eq!(record.net(), 150);

    let shark = Game::new(DealerId::Shark, 1000, 9);
    stack(&shark, &[Ace, Nine, King, Seven]);
    shark.place_bet(100).unwrap();
    let record = &shark.last_result().unwrap().hands[0];
    assert_eq!(record.payout, 220);
    assert_eq!(record.net(), 120);
}

#[test]
fn eights_split_to_the_hand_limit() {
    let game = Game::new(DealerId::Ruby, 1000, 11);
    stack(
        &game,
        &[
            Eight, Six, Eight, Ten, // deal
            Eight, Two, // first split
            Eight, Three, // second split
            Eight, Four, // third split
            King, // dealer draw
        ],
    );

    game.place_bet(10).unwrap();
    game.split().unwrap();
    game.split().unwrap();
    game.split().unwrap();

    let hands = game.hands();
    assert_eq!(hands.len(), 4);
    assert_eq!(game.bankroll(), 960);
    let second_cards: Vec<Rank> = hands.iter().map(|h| h.cards()[1].rank).collect();
    assert_eq!(second_cards, vec![Eight, Four, Three, Two]);

    assert_eq!(game.split().unwrap_err(), ActionError::MaxSplitsReached);
    assert_eq!(game.hands(), hands);
    assert_eq!(game.bankroll(), 960);
    assert!(!game.allowed_actions().split);

    for _ in 0..4 {
        game.stand().unwrap();
    }

    let result = game.last_result().unwrap();
    assert!(result.dealer_bust);
    assert!(
        result
            .hands
            .iter()
            .all(|r| r.outcome == HandOutcome::DealerBust && r.payout == 20)
    );
    assert_eq!(game.bankroll(), 1040);
}

#[test]
fn split_on_unequal_cards_rejected() {
    let game = Game::new(DealerId::Ruby, 100, 12);
    stack(&game, &[Eight, Six, Nine, Ten]);

    game.place_bet(10).unwrap();
    assert_eq!(game.split().unwrap_err(), ActionError::CannotSplit);
    assert_eq!(game.hands().len(), 1);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn ten_value_pair_can_split() {
    let game = Game::new(DealerId::Ruby, 100, 12);
    stack(&game, &[King, Six, Jack, Ten, Nine, Eight]);

    game.place_bet(10).unwrap();
    assert!(game.allowed_actions().split);
    game.split().unwrap();
    assert_eq!(game.hands().len(), 2);
}

#[test]
fn split_aces_take_one_card_and_do_not_make_blackjack() {
    let game = Game::new(DealerId::Ruby, 100, 13);
    stack(&game, &[Ace, Six, Ace, Ten, King, Nine, Two]);

    game.place_bet(10).unwrap();
    game.split().unwrap();

    // Both aces stood on their card, so the dealer has already played.
    assert_eq!(game.state(), GameState::Betting);

    let result = game.last_result().unwrap();
    assert_eq!(result.dealer_value, 18);
    assert_eq!(result.hands[0].player_total, 21);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, 20);
    assert_eq!(result.hands[1].outcome, HandOutcome::Win);
    assert_eq!(game.bankroll(), 120);
}

#[test]
fn zen_resplits_aces() {
    let game = Game::new(DealerId::Zen, 100, 14);
    stack(&game, &[Ace, Six, Ace, Ten, Ace, Nine, Five, Seven, Ten]);

    game.place_bet(10).unwrap();
    game.split().unwrap();

    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.active_hand(), Some(0));
    assert_eq!(game.hands()[1].status(), HandStatus::Stood);

    assert_eq!(game.hit().unwrap_err(), ActionError::SplitAcesOneCard);
    assert_eq!(game.double_down().unwrap_err(), ActionError::SplitAcesOneCard);
    let allowed = game.allowed_actions();
    assert!(allowed.split && allowed.stand && !allowed.hit && !allowed.double_down);

    game.split().unwrap();
    assert_eq!(game.hands().len(), 3);
    assert_eq!(game.state(), GameState::Betting);

    let result = game.last_result().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(game.bankroll(), 100 - 30 + 60);
}

#[test]
fn split_with_one_bust_still_plays_the_dealer() {
    let game = Game::new(DealerId::Ruby, 100, 14);
    stack(&game, &[Eight, Six, Eight, Ten, Ten, Five, King, Ace]);

    game.place_bet(10).unwrap();
    game.split().unwrap();
    assert_eq!(game.hands()[0].value(), 18);
    assert_eq!(game.hands()[1].value(), 13);

    game.stand().unwrap();
    assert_eq!(game.active_hand(), Some(1));
    game.hit().unwrap();
    assert_eq!(game.state(), GameState::Betting);

    let dealer = game.dealer_hand();
    assert_eq!(dealer.len(), 3);
    assert_eq!(dealer.value(), 17);

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].dealer_total, 17);
    assert_eq!(result.hands[0].payout, 20);
    assert_eq!(result.hands[1].outcome, HandOutcome::Bust);
    assert_eq!(result.hands[1].payout, 0);
    assert_eq!(game.bankroll(), 100);
}

#[test]
fn ruby_does_not_resplit_aces() {
    let game = Game::new(DealerId::Ruby, 100, 15);
    stack(&game, &[Ace, Six, Ace, Ten, Ace, Nine, Two]);

    game.place_bet(10).unwrap();
    game.split().unwrap();

    let hands = game.hands();
    assert_eq!(hands.len(), 2);
    assert!(hands.iter().all(|h| h.status() == HandStatus::Stood));
    assert_eq!(game.state(), GameState::Betting);
}

#[test]
fn double_down_doubles_wager_and_stands() {
    let game = Game::new(DealerId::Ruby, 100, 5);
    stack(&game, &[Five, Five, Four, Ten, Ten, Two]);

    game.place_bet(10).unwrap();
    game.double_down().unwrap();
    assert_eq!(game.state(), GameState::Betting);

    let hands = game.hands();
    assert_eq!(hands[0].bet(), 20);
    assert_eq!(hands[0].len(), 3);
    assert_eq!(hands[0].status(), HandStatus::Doubled);

    let record = &game.last_result().unwrap().hands[0];
    assert_eq!(record.outcome, HandOutcome::Win);
    assert_eq!(record.payout, 40);
    assert_eq!(game.bankroll(), 120);
}

#[test]
fn double_down_rejected_on_three_cards() {
    let game = Game::new(DealerId::Ruby, 100, 5);
    stack(&game, &[Two, Five, Three, Ten, Two]);

    game.place_bet(10).unwrap();
    game.hit().unwrap();
    assert_eq!(game.double_down().unwrap_err(), ActionError::CannotDouble);
    assert_eq!(game.hands()[0].bet(), 10);
}

#[test]
fn double_down_rejected_when_total_not_allowed() {
    let game = Game::new(DealerId::Lucky, 100, 6);
    stack(&game, &[Five, Two, Three, Seven]);

    game.place_bet(10).unwrap();
    assert_eq!(game.double_down().unwrap_err(), ActionError::CannotDouble);
    assert_eq!(game.hands()[0].len(), 2);
    assert_eq!(game.state(), GameState::PlayerTurn);
}

#[test]
fn double_down_needs_funds() {
    let game = Game::new(DealerId::Ruby, 15, 6);
    stack(&game, &[Five, Two, Five, Seven, Ten]);

    game.place_bet(10).unwrap();
    assert_eq!(
        game.double_down().unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(game.bankroll(), 5);
}

#[test]
fn lucky_free_double_pays_on_full_wager() {
    let game = Game::new(DealerId::Lucky, 100, 16);
    stack(&game, &[Six, Nine, Four, Seven, Ten, Ten]);

    game.place_bet(10).unwrap();
    game.double_down().unwrap();
    assert_eq!(game.bankroll(), 120);

    let record = &game.last_result().unwrap().hands[0];
    assert_eq!(record.outcome, HandOutcome::DealerBust);
    assert_eq!(record.bet_amount, 10);
    assert_eq!(record.free_amount, 10);
    assert_eq!(record.payout, 30);
    assert_eq!(record.net(), 20);
}

#[test]
fn lucky_free_double_loses_only_the_stake() {
    let game = Game::new(DealerId::Lucky, 100, 17);
    stack(&game, &[Six, Nine, Four, Seven, Five, Four]);

    game.place_bet(10).unwrap();
    game.double_down().unwrap();

    let record = &game.last_result().unwrap().hands[0];
    assert_eq!(record.outcome, HandOutcome::Loss);
    assert_eq!(record.net(), -10);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn lucky_free_split_costs_nothing() {
    let game = Game::new(DealerId::Lucky, 100, 18);
    stack(&game, &[Eight, Seven, Eight, Nine, Three, Two, Ten]);

    game.place_bet(10).unwrap();
    game.split().unwrap();
    assert_eq!(game.bankroll(), 90);

    let hands = game.hands();
    assert_eq!((hands[0].bet(), hands[0].free_bet()), (10, 0));
    assert_eq!((hands[1].bet(), hands[1].free_bet()), (0, 10));

    game.stand().unwrap();
    game.stand().unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].payout, 20);
    assert_eq!(result.hands[1].payout, 10);
    assert_eq!(result.net, 20);
    assert_eq!(game.bankroll(), 120);
}

#[test]
fn surrender_refunds_half_bet_and_dealer_does_not_draw() {
    let game = Game::new(DealerId::Ruby, 100, 21);
    stack(&game, &[Ten, Seven, Six, Eight]);

    game.place_bet(10).unwrap();
    game.surrender().unwrap();
    assert_eq!(game.state(), GameState::Betting);

    assert_eq!(game.dealer_hand().len(), 2);
    let record = &game.last_result().unwrap().hands[0];
    assert_eq!(record.outcome, HandOutcome::Surrender);
    assert_eq!(record.payout, 5);
    assert_eq!(game.bankroll(), 95);
}

#[test]
fn surrender_only_as_first_decision() {
    let game = Game::new(DealerId::Ruby, 100, 22);
    stack(&game, &[Two, Seven, Three, Eight, Two]);

    game.place_bet(10).unwrap();
    game.hit().unwrap();
    assert_eq!(game.surrender().unwrap_err(), ActionError::CannotSurrender);

    let lucky = Game::new(DealerId::Lucky, 100, 22);
    stack(&lucky, &[Ten, Seven, Six, Eight]);
    lucky.place_bet(10).unwrap();
    assert_eq!(lucky.surrender().unwrap_err(), ActionError::CannotSurrender);
    assert!(!lucky.allowed_actions().surrender);
}

#[test]
fn bust_skips_dealer_draw() {
    let game = Game::new(DealerId::Ruby, 100, 23);
    stack(&game, &[Ten, Six, Six, Ten, Ten]);

    game.place_bet(10).unwrap();
    game.hit().unwrap();

    assert_eq!(game.state(), GameState::Betting);
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(game.hands()[0].status(), HandStatus::Busted);
    assert_eq!(game.last_result().unwrap().hands[0].outcome, HandOutcome::Bust);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn five_card_charlie_stands_and_wins() {
    let profile = RuleProfile::default().with_house_rules(HouseRules {
        five_card_charlie: true,
        suited_blackjack_pays: None,
    });
    let game = Game::with_profile(profile, 100, 24);
    stack(&game, &[Two, Ten, Three, Seven, Two, Two, Three]);

    game.place_bet(10).unwrap();
    game.hit().unwrap();
    game.hit().unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn);
    game.hit().unwrap();
    assert_eq!(game.state(), GameState::Betting);

    let record = &game.last_result().unwrap().hands[0];
    assert_eq!(record.player_total, 12);
    assert_eq!(record.dealer_total, 17);
    assert_eq!(record.outcome, HandOutcome::Win);
    assert_eq!(game.bankroll(), 110);
}

#[test]
fn game_over_when_bankroll_below_minimum() {
    let game = Game::new(DealerId::Ruby, 15, 25);
    stack(&game, &[Ten, Ten, Six, Nine]);

    game.place_bet(10).unwrap();
    game.stand().unwrap();

    assert_eq!(game.bankroll(), 5);
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.place_bet(5).unwrap_err(), BettingError::InvalidState);

    assert_eq!(
        game.reset_bankroll(3).unwrap_err(),
        ResetError::BelowMinimum {
            amount: 3,
            minimum: 10
        }
    );
    game.reset_bankroll(100).unwrap();
    assert_eq!(game.state(), GameState::Betting);
    assert_eq!(game.bankroll(), 100);
    assert!(game.last_result().is_none());

    assert_eq!(game.reset_bankroll(50).unwrap_err(), ResetError::NotGameOver);
}

#[test]
fn hit_with_empty_shoe_returns_error() {
    let game = Game::new(DealerId::Ruby, 100, 7);
    stack(&game, &[Five, Nine, Six, Seven]);

    game.place_bet(10).unwrap();
    let before = game.hands();

    assert!(matches!(
        game.hit().unwrap_err(),
        ActionError::ShoeExhausted(_)
    ));
    assert_eq!(game.hands(), before);
    assert_eq!(game.state(), GameState::PlayerTurn);
}

#[test]
fn bet_with_short_shoe_leaves_bankroll_alone() {
    let game = Game::new(DealerId::Ruby, 100, 7);
    stack(&game, &[Five, Nine, Six]);

    assert!(matches!(
        game.place_bet(10).unwrap_err(),
        BettingError::ShoeExhausted(_)
    ));
    assert_eq!(game.bankroll(), 100);
    assert_eq!(game.state(), GameState::Betting);
}

#[test]
fn dealer_draws_from_a_fresh_shoe_when_the_cards_run_out() {
    let game = Game::new(DealerId::Ruby, 100, 30);
    stack(&game, &[Ten, Five, Six, Six]);

    game.place_bet(10).unwrap();
    game.drain_effects();
    game.stand().unwrap();

    assert_eq!(game.state(), GameState::Betting);
    assert!(game.drain_effects().contains(&Effect::Shuffle));
    assert!(!game.shoe.lock().is_stacked());

    let dealer = game.dealer_hand();
    assert!(dealer.len() >= 3);
    assert!(dealer.value() >= 17);

    let result = game.last_result().unwrap();
    assert_eq!(game.bankroll(), 90 + result.total_payout);
    game.place_bet(10).unwrap();
}

#[test]
fn shoe_without_penetration_still_refills() {
    for penetration in [0.0, 1.0] {
        let profile = RuleProfile::default()
            .with_decks(1)
            .with_penetration(penetration);
        let game = Game::with_profile(profile, 1000, 29);

        let mut shuffles = 0;
        for _ in 0..40 {
            game.place_bet(10).unwrap();
            while game.state() == GameState::PlayerTurn {
                game.stand().unwrap();
            }
            shuffles += game
                .drain_effects()
                .iter()
                .filter(|effect| **effect == Effect::Shuffle)
                .count();
        }
        assert!(shuffles > 0, "penetration {penetration}");
    }
}

#[test]
fn switch_dealer_keeps_bankroll() {
    let game = Game::new(DealerId::Ruby, 100, 26);
    stack(&game, &[Ten, Six, Seven, Ten]);
    game.place_bet(10).unwrap();

    assert_eq!(
        game.switch_dealer(RuleProfile::for_dealer(DealerId::Zen))
            .unwrap_err(),
        SwitchDealerError::RoundInProgress
    );

    game.stand().unwrap();
    let bankroll = game.bankroll();

    game.switch_dealer(RuleProfile::for_dealer(DealerId::Shark))
        .unwrap();
    assert_eq!(game.profile().dealer, DealerId::Shark);
    assert_eq!(game.bankroll(), bankroll);
    assert_eq!(game.cards_remaining(), 2 * 52);
    assert!(game.last_result().is_none());
    assert!(game.hands().is_empty());
}

#[test]
fn switch_to_higher_minimum_can_end_the_game() {
    let game = Game::new(DealerId::Zen, 20, 27);
    game.switch_dealer(RuleProfile::for_dealer(DealerId::Shark))
        .unwrap();
    assert_eq!(game.state(), GameState::GameOver);
}

#[test]
fn shoe_reshuffles_between_rounds() {
    let profile = RuleProfile::default().with_decks(1);
    let game = Game::with_profile(profile, 1000, 28);

    let mut reshuffled = false;
    for _ in 0..40 {
        let dealt_before = 52 - game.cards_remaining();
        game.place_bet(10).unwrap();
        while game.state() == GameState::PlayerTurn {
            game.stand().unwrap();
        }
        if game.drain_effects().contains(&Effect::Shuffle) {
            reshuffled = true;
            assert!(dealt_before > 39);
        }
    }
    assert!(reshuffled);
}

#[test]
fn subscribers_see_every_transition() {
    let game = Game::new(DealerId::Ruby, 100, 42);
    stack(&game, &[Eight, Six, Seven, Ten, Four, Five]);

    let seen = Arc::new(StdMutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = game.subscribe(move |snapshot| {
        sink.lock().unwrap().push(snapshot.state);
    });

    game.place_bet(10).unwrap();
    game.hit().unwrap();
    game.stand().unwrap();

    let mut states = seen.lock().unwrap().clone();
    states.dedup();
    assert_eq!(
        states,
        vec![
            GameState::Dealing,
            GameState::PlayerTurn,
            GameState::DealerTurn,
            GameState::Result,
            GameState::Betting,
        ]
    );

    assert!(game.unsubscribe(id));
    assert!(!game.unsubscribe(id));
}

#[test]
fn listener_can_act_on_the_game() {
    let game = Arc::new(Game::new(DealerId::Blitz, 100, 31));
    stack(&game, &[Ten, Seven, Nine, Ten]);

    let timer = Arc::downgrade(&game);
    game.subscribe(move |snapshot| {
        if snapshot.state == GameState::PlayerTurn && snapshot.active_hand.is_some() {
            if let Some(game) = timer.upgrade() {
                let _ = game.stand();
            }
        }
    });

    let bet = game.profile().minimum_bet;
    game.place_bet(bet).unwrap();

    assert_eq!(game.state(), GameState::Betting);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].player_total, 19);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(game.bankroll(), 100 + bet);
}

#[test]
fn snapshot_hides_hole_card_until_dealer_turn() {
    let game = Game::new(DealerId::Ruby, 100, 42);
    stack(&game, &[Eight, Six, Seven, Ten, Four, Five]);
    game.place_bet(10).unwrap();

    let snapshot = game.current_state();
    assert_eq!(snapshot.state, GameState::PlayerTurn);
    assert!(snapshot.hole_hidden);
    assert_eq!(snapshot.dealer_cards.len(), 1);
    assert_eq!(snapshot.dealer_value, 6);
    assert!(snapshot.allowed.hit && snapshot.allowed.double_down);

    game.stand().unwrap();
    let snapshot = game.current_state();
    assert!(!snapshot.hole_hidden);
    assert_eq!(snapshot.dealer_cards.len(), 3);
}

#[test]
fn effects_follow_the_deal() {
    let game = Game::new(DealerId::Ruby, 100, 42);
    stack(&game, &[Eight, Six, Seven, Ten, Four, Five]);
    game.place_bet(10).unwrap();

    let effects = game.drain_effects();
    assert_eq!(effects[0], Effect::ChipDelta { amount: -10 });

    let deals: Vec<(Seat, bool)> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::DealCard { seat, face_up, .. } => Some((*seat, *face_up)),
            _ => None,
        })
        .collect();
    assert_eq!(
        deals,
        vec![
            (Seat::Player(0), true),
            (Seat::Dealer, true),
            (Seat::Player(0), true),
            (Seat::Dealer, false),
        ]
    );
    assert!(game.drain_effects().is_empty());

    game.stand().unwrap();
    let effects = game.drain_effects();
    assert!(effects.iter().any(|e| matches!(e, Effect::FlipCard { .. })));
}

#[test]
fn sinks_receive_every_settled_hand() {
    let game = Game::new(DealerId::Ruby, 1000, 29);
    let stats = Arc::new(bjtable::Mutex::new(SessionStats::new()));
    game.add_sink(Box::new(Arc::clone(&stats)));

    stack(
        &game,
        &[Eight, Six, Eight, Ten, Eight, Two, Eight, Three, Eight, Four, King],
    );
    game.place_bet(10).unwrap();
    game.split().unwrap();
    game.split().unwrap();
    game.split().unwrap();
    for _ in 0..4 {
        game.stand().unwrap();
    }

    let stats = *stats.lock();
    assert_eq!(stats.hands, 4);
    assert_eq!(stats.wins, 4);
    assert_eq!(stats.net, 40);
    assert_eq!(stats, game.stats());
}
