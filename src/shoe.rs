//! The card shoe: a shuffled multi-deck supply with a draw cursor.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ShoeExhausted;

/// A shoe of one or more decks, dealt front to back until reshuffled.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Cards in draw order.
    cards: Vec<Card>,
    /// Index of the next card to draw.
    cursor: usize,
    /// Fraction of the shoe dealt before a reshuffle is due. 0 disables.
    penetration: f64,
    /// Whether the draw order was fixed by the caller.
    stacked: bool,
}

impl Shoe {
    /// Builds and shuffles a shoe of `decks` standard decks, at least one.
    #[must_use]
    pub fn build<R: Rng>(decks: u8, penetration: f64, rng: &mut R) -> Self {
        let decks = decks.max(1);
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);

        Self {
            cards,
            cursor: 0,
            penetration,
            stacked: false,
        }
    }

    /// Creates a shoe that deals `cards` in the given order and never asks
    /// for a reshuffle.
    ///
    /// Between rounds a game never replaces a stacked shoe on its own, so a
    /// short stack makes the next bet fail instead of dealing other cards.
    #[must_use]
    pub fn stacked(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            cursor: 0,
            penetration: 0.0,
            stacked: true,
        }
    }

    /// Draws the next card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeExhausted`] if every card has been dealt.
    pub fn draw(&mut self) -> Result<Card, ShoeExhausted> {
        let card = self.cards.get(self.cursor).copied().ok_or_else(|| {
            log::error!("shoe exhausted after {} cards", self.cards.len());
            ShoeExhausted
        })?;
        self.cursor += 1;
        Ok(card)
    }

    /// Returns whether enough of the shoe has been dealt to reshuffle.
    ///
    /// True once the remaining cards fall below `(1 - penetration)` of the
    /// shoe. Always false when penetration is 0; a game still rebuilds such
    /// a shoe once it cannot cover what the round needs.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        if self.penetration <= 0.0 {
            return false;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let threshold = (1.0 - self.penetration) * self.total() as f64;
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let remaining = self.remaining() as f64;

        remaining < threshold
    }

    /// Number of cards left to deal.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Number of cards dealt since the shoe was built.
    #[must_use]
    pub const fn dealt(&self) -> usize {
        self.cursor
    }

    /// Total size of the shoe.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// The configured penetration.
    #[must_use]
    pub const fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Returns whether the shoe was built by [`Shoe::stacked`].
    #[must_use]
    pub const fn is_stacked(&self) -> bool {
        self.stacked
    }
}
