//! Dealer play.

use alloc::vec::Vec;

use crate::card::Card;
use crate::effect::{Effect, Seat, SoundCue};
use crate::error::ShoeExhausted;
use crate::hand::{DealerHand, HandStatus};
use crate::profile::RuleProfile;
use crate::shoe::Shoe;

use super::{Game, GameState};

/// Returns whether the dealer must draw to `hand` under `profile`.
///
/// The dealer draws below 17, and on a soft 17 at tables where the dealer
/// hits soft 17.
#[must_use]
pub fn must_hit(hand: &DealerHand, profile: &RuleProfile) -> bool {
    let value = hand.value();
    value < 17 || (value == 17 && hand.is_soft() && profile.dealer_hits_soft_17)
}

/// Plays the dealer's hand out from `shoe`.
///
/// Returns the cards drawn. Draws nothing but shoe cards, so the same shoe
/// order always produces the same hand.
///
/// # Errors
///
/// Returns [`ShoeExhausted`] if the shoe runs out while the dealer must
/// draw.
pub fn play_out(
    hand: &mut DealerHand,
    profile: &RuleProfile,
    shoe: &mut Shoe,
) -> Result<Vec<Card>, ShoeExhausted> {
    let mut drawn = Vec::new();

    while must_hit(hand, profile) {
        let card = shoe.draw()?;
        hand.add_card(card);
        drawn.push(card);
    }

    Ok(drawn)
}

impl Game {
    /// Turns the hole card face up.
    pub(super) fn reveal_hole(&self) {
        let mut dealer = self.dealer_hand.lock();
        if dealer.is_hole_revealed() {
            return;
        }

        dealer.reveal_hole();
        let hole = dealer.hole_card().copied();
        drop(dealer);

        if let Some(card) = hole {
            self.push_effect(Effect::FlipCard { card });
            self.push_effect(Effect::SoundCue(SoundCue::Flip));
        }
    }

    /// Returns whether some hand still depends on the dealer's total.
    fn any_hand_in_play(&self) -> bool {
        self.hands.lock().iter().any(|hand| {
            !matches!(
                hand.status(),
                HandStatus::Busted | HandStatus::Surrendered
            )
        })
    }

    /// Reveals the hole card, plays the dealer's hand if any player hand
    /// still needs it, and settles.
    ///
    /// Never fails: a shoe that runs dry while the dealer must draw is
    /// replaced with a fresh one under the current profile.
    pub(super) fn dealer_turn(&self) {
        self.set_state(GameState::DealerTurn);
        self.reveal_hole();

        if self.any_hand_in_play() {
            let profile = self.profile();
            let mut dealer = self.dealer_hand();
            let start = dealer.len();
            loop {
                let played = play_out(&mut dealer, &profile, &mut *self.shoe.lock());
                if played.is_ok() {
                    break;
                }
                log::warn!("shoe ran out during dealer play; reshuffling");
                self.refill_shoe();
            }
            let drawn = dealer.cards()[start..].to_vec();
            *self.dealer_hand.lock() = dealer.clone();

            for card in drawn {
                self.push_effect(Effect::DealCard {
                    seat: Seat::Dealer,
                    card,
                    face_up: true,
                });
                self.push_effect(Effect::SoundCue(SoundCue::Deal));
            }

            log::debug!(
                "dealer finishes on {}{}",
                dealer.value(),
                if dealer.is_bust() { " (bust)" } else { "" }
            );
        } else {
            log::debug!("no hand in play; dealer stands");
        }

        self.set_state(GameState::Result);
        self.settle_round();
    }
}
