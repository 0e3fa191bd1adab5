use crate::card::Card;
use crate::effect::{Effect, Seat, SoundCue};
use crate::error::{ActionError, ShoeExhausted};
use crate::hand::{Hand, HandStatus};
use crate::profile::RuleProfile;

use super::{AllowedActions, Game, GameState};

/// Whether `hand` may double, and what it costs the bankroll.
fn double_cost(hand: &Hand, profile: &RuleProfile, bankroll: usize) -> Result<usize, ActionError> {
    if hand.is_split_aces() {
        return Err(ActionError::SplitAcesOneCard);
    }

    // Only on an untouched two-card hand.
    if hand.len() != 2 || !hand.is_untouched() {
        return Err(ActionError::CannotDouble);
    }

    if hand.is_from_split() && !profile.double_after_split {
        return Err(ActionError::CannotDouble);
    }

    if !profile.double_restriction.permits(hand.value()) {
        return Err(ActionError::CannotDouble);
    }

    let cost = if profile.free_double { 0 } else { hand.wager() };
    if bankroll < cost {
        return Err(ActionError::InsufficientFunds);
    }

    Ok(cost)
}

/// Whether `hand` may split given `hand_count` hands already in play, and
/// what it costs the bankroll.
fn split_cost(
    hand: &Hand,
    hand_count: usize,
    profile: &RuleProfile,
    bankroll: usize,
) -> Result<usize, ActionError> {
    if !hand.can_split() {
        return Err(ActionError::CannotSplit);
    }

    if hand_count >= profile.max_split_hands as usize {
        return Err(ActionError::MaxSplitsReached);
    }

    if hand.is_split_aces() && !profile.resplit_aces {
        return Err(ActionError::CannotSplit);
    }

    let cost = if profile.free_split { 0 } else { hand.wager() };
    if bankroll < cost {
        return Err(ActionError::InsufficientFunds);
    }

    Ok(cost)
}

fn check_surrender(hand: &Hand, profile: &RuleProfile) -> Result<(), ActionError> {
    if !profile.surrender {
        return Err(ActionError::CannotSurrender);
    }

    // First decision on the original two cards only.
    if hand.len() != 2 || hand.is_from_split() || !hand.is_untouched() {
        return Err(ActionError::CannotSurrender);
    }

    Ok(())
}

fn check_hit(hand: &Hand) -> Result<(), ActionError> {
    if hand.is_split_aces() {
        return Err(ActionError::SplitAcesOneCard);
    }
    Ok(())
}

impl Game {
    /// Index and clone of the hand awaiting a decision.
    fn active(&self) -> Result<(usize, Hand), ActionError> {
        if self.state() != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        let index = self.active_hand().ok_or(ActionError::NoActiveHand)?;
        let hand = self
            .hands
            .lock()
            .get(index)
            .cloned()
            .ok_or(ActionError::NoActiveHand)?;

        if !hand.is_active() {
            return Err(ActionError::NoActiveHand);
        }

        Ok((index, hand))
    }

    /// Applies `f` to the hand at `index`.
    fn with_hand<T>(&self, index: usize, f: impl FnOnce(&mut Hand) -> T) -> Option<T> {
        self.hands.lock().get_mut(index).map(f)
    }

    fn deal_to_hand(&self, index: usize) -> Result<Card, ShoeExhausted> {
        let card = self.draw()?;
        self.with_hand(index, |hand| hand.add_card(card));
        self.push_effect(Effect::DealCard {
            seat: Seat::Player(index),
            card,
            face_up: true,
        });
        self.push_effect(Effect::SoundCue(SoundCue::Deal));
        Ok(card)
    }

    fn take_from_bankroll(&self, cost: usize) {
        if cost == 0 {
            return;
        }

        *self.bankroll.lock() -= cost;
        self.push_effect(Effect::ChipDelta {
            amount: -(cost as isize),
        });
        self.push_effect(Effect::SoundCue(SoundCue::Chips));
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust ends the hand. Under five-card charlie a fifth card that does
    /// not bust stands the hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the hand is a
    /// split ace, or the shoe is empty.
    pub fn hit(&self) -> Result<(), ActionError> {
        let (index, hand) = self.active()?;
        check_hit(&hand)?;
        self.ensure_cards(1)?;

        let card = self.deal_to_hand(index)?;
        let charlie = self.profile.lock().house_rules.five_card_charlie;
        let ended = self
            .with_hand(index, |hand| {
                hand.mark_acted();
                if hand.is_bust() {
                    Some(true)
                } else if charlie && hand.len() >= 5 {
                    hand.set_status(HandStatus::Stood);
                    Some(false)
                } else {
                    None
                }
            })
            .flatten();

        log::debug!("hand {index} hits {card}");

        match ended {
            Some(busted) => {
                if busted {
                    self.push_effect(Effect::SoundCue(SoundCue::Bust));
                }
                self.advance_from(index);
            }
            None => self.notify(),
        }

        Ok(())
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision.
    pub fn stand(&self) -> Result<(), ActionError> {
        let (index, _) = self.active()?;

        self.with_hand(index, |hand| {
            hand.mark_acted();
            hand.set_status(HandStatus::Stood);
        });
        log::debug!("hand {index} stands");

        self.advance_from(index);
        Ok(())
    }

    /// Player action: Double down (double the wager, take one card, stand).
    ///
    /// Under a free-double table the house funds the added wager.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the hand is not
    /// an untouched two-card hand, the table forbids doubling this hand or
    /// total, the bankroll cannot cover the wager, or the shoe is empty.
    pub fn double_down(&self) -> Result<(), ActionError> {
        let (index, hand) = self.active()?;
        let profile = self.profile();
        let cost = double_cost(&hand, &profile, self.bankroll())?;
        self.ensure_cards(1)?;

        self.take_from_bankroll(cost);
        self.with_hand(index, |hand| {
            hand.mark_acted();
            hand.double_wager(profile.free_double);
        });
        let card = self.deal_to_hand(index)?;

        let busted = self
            .with_hand(index, |hand| {
                if hand.is_bust() {
                    true
                } else {
                    hand.set_status(HandStatus::Doubled);
                    false
                }
            })
            .unwrap_or(false);

        log::debug!("hand {index} doubles for {cost} and draws {card}");
        if busted {
            self.push_effect(Effect::SoundCue(SoundCue::Bust));
        }

        self.advance_from(index);
        Ok(())
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The second card moves to a new hand right of the current one and
    /// each hand receives one card. Split aces stand on their card unless
    /// it is another ace the table lets them resplit.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the hand is not a
    /// pair, the table's hand limit is reached, aces may not be resplit, the
    /// bankroll cannot cover the wager, or the shoe cannot supply two cards.
    pub fn split(&self) -> Result<(), ActionError> {
        let (index, hand) = self.active()?;
        let profile = self.profile();
        let hand_count = self.hands.lock().len();
        let cost = split_cost(&hand, hand_count, &profile, self.bankroll())?;
        self.ensure_cards(2)?;

        let new_hand = {
            let mut hands = self.hands.lock();
            let current = &mut hands[index];
            let card = current
                .take_split_card()
                .ok_or(ActionError::CannotSplit)?;
            let (bet, free_bet) = if profile.free_split {
                (0, current.wager())
            } else {
                (current.wager(), 0)
            };
            Hand::from_split(card, bet, free_bet)
        };
        self.hands.lock().insert(index + 1, new_hand);
        self.take_from_bankroll(cost);
        log::debug!("hand {index} splits for {cost}");

        self.deal_to_hand(index)?;
        self.deal_to_hand(index + 1)?;

        if hand.cards().first().is_some_and(Card::is_ace) {
            let mut hands = self.hands.lock();
            let room = hands.len() < profile.max_split_hands as usize;
            for split_hand in &mut hands[index..=index + 1] {
                let can_resplit = profile.resplit_aces && room && split_hand.can_split();
                if split_hand.is_active() && !can_resplit {
                    split_hand.set_status(HandStatus::Stood);
                }
            }
        }

        let still_active = self.with_hand(index, |h| h.is_active()).unwrap_or(false);
        if still_active {
            self.notify();
        } else {
            self.advance_from(index);
        }

        Ok(())
    }

    /// Player action: Surrender (give up half the bet and end the hand).
    ///
    /// The refund is paid at settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the table does
    /// not offer surrender, or a decision was already taken on the hand.
    pub fn surrender(&self) -> Result<(), ActionError> {
        let (index, hand) = self.active()?;
        check_surrender(&hand, &self.profile())?;

        self.with_hand(index, |hand| {
            hand.mark_acted();
            hand.set_status(HandStatus::Surrendered);
        });
        log::debug!("hand {index} surrenders");

        self.advance_from(index);
        Ok(())
    }

    /// Returns the decisions open on the hand awaiting one.
    pub fn allowed_actions(&self) -> AllowedActions {
        let Ok((_, hand)) = self.active() else {
            return AllowedActions::default();
        };

        let profile = self.profile();
        let bankroll = self.bankroll();
        let hand_count = self.hands.lock().len();

        AllowedActions {
            hit: check_hit(&hand).is_ok() && self.can_supply(1),
            stand: true,
            double_down: double_cost(&hand, &profile, bankroll).is_ok() && self.can_supply(1),
            split: split_cost(&hand, hand_count, &profile, bankroll).is_ok()
                && self.can_supply(2),
            surrender: check_surrender(&hand, &profile).is_ok(),
        }
    }

    /// Opens the player turn on the first hand that needs a decision.
    pub(super) fn begin_player_turn(&self) {
        self.set_state(GameState::PlayerTurn);
        let first = self.hands.lock().iter().position(Hand::is_active);

        match first {
            Some(index) => {
                *self.active_hand.lock() = Some(index);
                self.notify();
            }
            None => self.finish_player_turn(),
        }
    }

    /// Moves on from the hand at `index` to the next hand needing a
    /// decision, or to the dealer once none remain.
    fn advance_from(&self, index: usize) {
        let next = self
            .hands
            .lock()
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, hand)| hand.is_active())
            .map(|(i, _)| i);

        match next {
            Some(next) => {
                *self.active_hand.lock() = Some(next);
                self.notify();
            }
            None => self.finish_player_turn(),
        }
    }

    fn finish_player_turn(&self) {
        *self.active_hand.lock() = None;
        self.dealer_turn()
    }
}
