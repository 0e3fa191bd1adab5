//! Error types for game operations.

use thiserror::Error;

/// The shoe ran out of cards.
///
/// The reshuffle policy keeps this out of reach in normal play; seeing it
/// means the shoe was configured or stacked too small for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cards left in the shoe")]
pub struct ShoeExhausted;

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BettingError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet is under the table minimum.
    #[error("bet of {amount} is below the table minimum of {minimum}")]
    BelowMinimum {
        /// The rejected bet.
        amount: usize,
        /// The table minimum.
        minimum: usize,
    },
    /// Bet is larger than the bankroll.
    #[error("bet of {amount} exceeds the bankroll of {bankroll}")]
    AboveBankroll {
        /// The rejected bet.
        amount: usize,
        /// The bankroll at the time of the bet.
        bankroll: usize,
    },
    /// The shoe could not supply the initial deal.
    #[error(transparent)]
    ShoeExhausted(#[from] ShoeExhausted),
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// No hand is waiting for a decision.
    #[error("no active hand")]
    NoActiveHand,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum split hands reached.
    #[error("maximum split hands reached")]
    MaxSplitsReached,
    /// Split aces take exactly one card.
    #[error("split aces take exactly one card")]
    SplitAcesOneCard,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// The shoe cannot supply the cards this action needs.
    #[error(transparent)]
    ShoeExhausted(#[from] ShoeExhausted),
}

/// Errors that can occur when switching dealers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwitchDealerError {
    /// A round is in progress.
    #[error("cannot switch dealers during a round")]
    RoundInProgress,
}

/// Errors that can occur when resetting the bankroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResetError {
    /// The bankroll can only be reset once the game is over.
    #[error("the bankroll can only be reset after game over")]
    NotGameOver,
    /// The new bankroll would not cover the table minimum.
    #[error("bankroll of {amount} is below the table minimum of {minimum}")]
    BelowMinimum {
        /// The rejected bankroll.
        amount: usize,
        /// The table minimum.
        minimum: usize,
    },
}
