//! Presentation effects.
//!
//! Every transition queues the effects a table view needs to replay it:
//! which card went where, when the hole card turned, how chips moved and
//! which sound to play. The engine never waits on them; the UI drains the
//! queue with [`crate::Game::drain_effects`] and paces playback itself.

use crate::card::Card;

/// Where a dealt card lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    /// A player hand, by index.
    Player(usize),
    /// The dealer.
    Dealer,
}

/// Sound hooks for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundCue {
    /// Card slides out of the shoe.
    Deal,
    /// Card turned face up.
    Flip,
    /// Chips placed.
    Chips,
    /// Shoe shuffled.
    Shuffle,
    /// Round won.
    Win,
    /// Round lost.
    Lose,
    /// Round pushed.
    Push,
    /// Player natural.
    Blackjack,
    /// Hand busted.
    Bust,
}

/// One step for the presentation layer to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// A card was dealt.
    DealCard {
        /// Destination of the card.
        seat: Seat,
        /// The card.
        card: Card,
        /// Whether it lands face up.
        face_up: bool,
    },
    /// The dealer's hole card was turned over.
    FlipCard {
        /// The revealed card.
        card: Card,
    },
    /// The bankroll moved by `amount`.
    ChipDelta {
        /// Signed change.
        amount: isize,
    },
    /// A sound to play.
    SoundCue(SoundCue),
    /// The shoe was rebuilt and shuffled.
    Shuffle,
}
