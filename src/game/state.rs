//! Game state types.

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// Accepting a bet for the next round.
    Betting,
    /// Dealing initial cards.
    Dealing,
    /// Waiting for player decisions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Hands are being settled.
    Result,
    /// The bankroll no longer covers the table minimum.
    GameOver,
}

/// Decisions currently open to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllowedActions {
    /// Draw a card.
    pub hit: bool,
    /// Keep the hand.
    pub stand: bool,
    /// Double the wager and take one card.
    pub double_down: bool,
    /// Split the pair.
    pub split: bool,
    /// Give up half the bet.
    pub surrender: bool,
}

impl AllowedActions {
    /// Returns whether any decision is open.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.hit || self.stand || self.double_down || self.split || self.surrender
    }
}
