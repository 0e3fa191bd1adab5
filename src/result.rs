//! Settlement result types.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// How a settled hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandOutcome {
    /// Player beat the dealer's total (or held a five-card charlie).
    Win,
    /// Dealer beat the player's total.
    Loss,
    /// Totals tied, or both held blackjack.
    Push,
    /// Player natural against a dealer without one.
    Blackjack,
    /// Player went over 21.
    Bust,
    /// Player surrendered half the bet.
    Surrender,
    /// Dealer went over 21 against a standing hand.
    DealerBust,
}

impl HandOutcome {
    /// Returns whether the outcome pays the player.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack | Self::DealerBust)
    }
}

/// Record of one settled hand, handed to downstream collaborators.
///
/// `payout` is what settlement credited back to the bankroll, stake
/// included, and `bet_amount` is the player's own money on the hand, so
/// [`HandRecord::net`] is exactly the hand's effect on the bankroll.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    /// Position of the hand, left to right, after splits.
    pub hand_index: usize,
    /// The player's cards.
    pub player_cards: Vec<Card>,
    /// The player's final total.
    pub player_total: u8,
    /// The dealer's cards.
    pub dealer_cards: Vec<Card>,
    /// The dealer's final total.
    pub dealer_total: u8,
    /// Money the player wagered on the hand.
    pub bet_amount: usize,
    /// Wager the house funded through free doubles or splits.
    pub free_amount: usize,
    /// Amount credited back at settlement.
    pub payout: usize,
    /// How the hand ended.
    pub outcome: HandOutcome,
}

impl HandRecord {
    /// Net effect of the hand on the bankroll.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
    pub const fn net(&self) -> isize {
        self.payout as isize - self.bet_amount as isize
    }
}

/// Result of a settled round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// One record per hand, left to right.
    pub hands: Vec<HandRecord>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Sum of the payouts credited.
    pub total_payout: usize,
    /// Net bankroll change over the round (positive = profit).
    pub net: isize,
    /// Bankroll after settlement.
    pub bankroll: usize,
}
