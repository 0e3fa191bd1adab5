//! Settlement.
//!
//! [`settle_hand`] is pure: given a finished hand, the dealer's final hand
//! and the table rules it returns the record, including exactly what the
//! bankroll is credited. [`Game`] credits the sum of those payouts and
//! nothing else, so replaying the records always reproduces the bankroll.

use alloc::vec::Vec;

use crate::effect::{Effect, SoundCue};
use crate::hand::{DealerHand, Hand, HandStatus};
use crate::profile::{PayoutRatio, RuleProfile};
use crate::result::{HandOutcome, HandRecord, RoundResult};

use super::{Game, GameState};

/// Ratio a natural in `hand` is paid at.
fn natural_ratio(hand: &Hand, profile: &RuleProfile) -> PayoutRatio {
    let suited = match hand.cards() {
        [first, second] => first.suit == second.suit,
        _ => false,
    };

    match profile.house_rules.suited_blackjack_pays {
        Some(ratio) if suited => ratio,
        _ => profile.blackjack_payout,
    }
}

/// Decides `hand` against `dealer` and returns its record.
///
/// Even-money wins pay on the full wager, house-funded part included, but
/// only the player's own stake is returned; losses cost only that stake.
#[must_use]
pub fn settle_hand(
    hand_index: usize,
    hand: &Hand,
    dealer: &DealerHand,
    profile: &RuleProfile,
) -> HandRecord {
    let bet = hand.bet();
    let win = bet + hand.wager();
    let player_total = hand.value();
    let dealer_total = dealer.value();

    let (outcome, payout) = if hand.status() == HandStatus::Surrendered {
        let refund = PayoutRatio::HALF.apply(bet, profile.rounding_surrender);
        (HandOutcome::Surrender, refund)
    } else if hand.is_bust() {
        (HandOutcome::Bust, 0)
    } else if hand.is_blackjack() {
        if dealer.is_blackjack() {
            (HandOutcome::Push, bet)
        } else {
            let bonus = natural_ratio(hand, profile).apply(bet, profile.rounding_blackjack);
            (HandOutcome::Blackjack, bet + bonus)
        }
    } else if profile.house_rules.five_card_charlie && hand.len() >= 5 {
        (HandOutcome::Win, win)
    } else if dealer.is_blackjack() {
        (HandOutcome::Loss, 0)
    } else if dealer.is_bust() {
        (HandOutcome::DealerBust, win)
    } else if player_total > dealer_total {
        (HandOutcome::Win, win)
    } else if player_total < dealer_total {
        (HandOutcome::Loss, 0)
    } else {
        (HandOutcome::Push, bet)
    };

    HandRecord {
        hand_index,
        player_cards: hand.cards().to_vec(),
        player_total,
        dealer_cards: dealer.cards().to_vec(),
        dealer_total,
        bet_amount: bet,
        free_amount: hand.free_bet(),
        payout,
        outcome,
    }
}

/// Settles every hand against `dealer`, left to right.
#[must_use]
pub fn settle_hands(hands: &[Hand], dealer: &DealerHand, profile: &RuleProfile) -> Vec<HandRecord> {
    hands
        .iter()
        .enumerate()
        .map(|(index, hand)| settle_hand(index, hand, dealer, profile))
        .collect()
}

impl Game {
    /// Settles the round, credits the bankroll, feeds the sinks and opens
    /// the next round (or ends the game).
    pub(super) fn settle_round(&self) {
        let profile = self.profile();
        let dealer = self.dealer_hand();
        let records = settle_hands(&self.hands(), &dealer, &profile);

        let total_payout: usize = records.iter().map(|r| r.payout).sum();
        let net: isize = records.iter().map(HandRecord::net).sum();

        let bankroll = {
            let mut bankroll = self.bankroll.lock();
            *bankroll += total_payout;
            *bankroll
        };

        if total_payout > 0 {
            self.push_effect(Effect::ChipDelta {
                amount: total_payout as isize,
            });
        }
        let cue = if records.iter().any(|r| r.outcome == HandOutcome::Blackjack) {
            SoundCue::Blackjack
        } else if net > 0 {
            SoundCue::Win
        } else if net < 0 {
            SoundCue::Lose
        } else {
            SoundCue::Push
        };
        self.push_effect(Effect::SoundCue(cue));

        for record in &records {
            log::debug!(
                "hand {}: {:?}, bet {} paid {}",
                record.hand_index,
                record.outcome,
                record.bet_amount,
                record.payout
            );
        }
        log::info!("round settled: net {net}, bankroll {bankroll}");

        {
            let mut stats = self.stats.lock();
            for record in &records {
                stats.add(record);
            }
        }
        {
            let mut sinks = self.sinks.lock();
            for sink in sinks.iter_mut() {
                for record in &records {
                    sink.record(record);
                }
            }
        }

        *self.last_result.lock() = Some(RoundResult {
            hands: records,
            dealer_value: dealer.value(),
            dealer_bust: dealer.is_bust(),
            dealer_blackjack: dealer.is_blackjack(),
            total_payout,
            net,
            bankroll,
        });

        if bankroll < profile.minimum_bet {
            log::warn!(
                "bankroll {bankroll} below the {} minimum: game over",
                profile.minimum_bet
            );
            self.set_state(GameState::GameOver);
        } else {
            self.set_state(GameState::Betting);
        }
    }
}
