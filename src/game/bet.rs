use alloc::vec;

use crate::effect::{Effect, Seat, SoundCue};
use crate::error::{BettingError, ShoeExhausted};
use crate::hand::{Hand, HandStatus};

use super::{Game, GameState};

/// Cards the initial deal takes from the shoe.
const INITIAL_DEAL: usize = 4;

impl Game {
    /// Places a bet and deals the round.
    ///
    /// The stake leaves the bankroll immediately. If the shoe has passed its
    /// penetration, or cannot cover the deal, it is rebuilt first (and
    /// Maverick draws new rules). The
    /// deal then plays out as far as it can without a decision: a natural
    /// against an up card that cannot make blackjack settles at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, the bet is
    /// under the table minimum or over the bankroll, or the shoe cannot
    /// supply the deal.
    pub fn place_bet(&self, amount: usize) -> Result<(), BettingError> {
        if self.state() != GameState::Betting {
            return Err(BettingError::InvalidState);
        }

        let minimum = self.profile.lock().minimum_bet;
        if amount < minimum {
            return Err(BettingError::BelowMinimum { amount, minimum });
        }

        let bankroll = self.bankroll();
        if amount > bankroll {
            return Err(BettingError::AboveBankroll { amount, bankroll });
        }

        if self.shoe_due(INITIAL_DEAL) {
            self.rebuild_shoe();
        }
        self.ensure_cards(INITIAL_DEAL)?;

        *self.bankroll.lock() -= amount;
        self.push_effect(Effect::ChipDelta {
            amount: -(amount as isize),
        });
        self.push_effect(Effect::SoundCue(SoundCue::Chips));
        log::debug!("bet {amount} placed, bankroll {}", bankroll - amount);

        *self.last_result.lock() = None;
        *self.hands.lock() = vec![Hand::new(amount)];
        self.dealer_hand.lock().clear();
        *self.active_hand.lock() = None;

        self.set_state(GameState::Dealing);
        self.deal()?;

        Ok(())
    }

    fn deal_to_player(&self) -> Result<(), ShoeExhausted> {
        let card = self.draw()?;
        if let Some(hand) = self.hands.lock().first_mut() {
            hand.add_card(card);
        }
        self.push_effect(Effect::DealCard {
            seat: Seat::Player(0),
            card,
            face_up: true,
        });
        self.push_effect(Effect::SoundCue(SoundCue::Deal));
        Ok(())
    }

    fn deal_to_dealer(&self, face_up: bool) -> Result<(), ShoeExhausted> {
        let card = self.draw()?;
        self.dealer_hand.lock().add_card(card);
        self.push_effect(Effect::DealCard {
            seat: Seat::Dealer,
            card,
            face_up,
        });
        self.push_effect(Effect::SoundCue(SoundCue::Deal));
        Ok(())
    }

    /// Deals player, dealer up card, player, dealer hole card, then routes
    /// the round on.
    fn deal(&self) -> Result<(), ShoeExhausted> {
        self.deal_to_player()?;
        self.deal_to_dealer(true)?;
        self.deal_to_player()?;
        self.deal_to_dealer(false)?;

        let natural = self.hands.lock().first().is_some_and(Hand::is_blackjack);
        if !natural {
            self.begin_player_turn();
            return Ok(());
        }

        if let Some(hand) = self.hands.lock().first_mut() {
            hand.set_status(HandStatus::Stood);
        }
        self.push_effect(Effect::SoundCue(SoundCue::Blackjack));
        log::debug!("player natural");

        if self.dealer_hand.lock().can_have_blackjack() {
            // The dealer still has to show whether they tie it.
            self.begin_player_turn();
        } else {
            self.reveal_hole();
            self.set_state(GameState::Result);
            self.settle_round();
        }
        Ok(())
    }
}
