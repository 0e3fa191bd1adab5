//! Player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Running blackjack total of a card sequence.
///
/// Aces enter at 11; `soft_aces` counts the aces still worth 11 after
/// demoting as many as needed to stay at or under 21.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Tally {
    total: u8,
    soft_aces: u8,
}

impl Tally {
    fn add(&mut self, card: Card) {
        self.total = self.total.saturating_add(card.value());
        if card.is_ace() {
            self.soft_aces += 1;
        }

        while self.total > 21 && self.soft_aces > 0 {
            self.total -= 10;
            self.soft_aces -= 1;
        }
    }

    fn of(cards: &[Card]) -> Self {
        let mut tally = Self::default();
        for &card in cards {
            tally.add(card);
        }
        tally
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood (also used for naturals and auto-stood hands).
    Stood,
    /// Hand has busted (over 21).
    Busted,
    /// Player doubled down and received their one card.
    Doubled,
    /// Player has surrendered.
    Surrendered,
}

/// A player's hand and the wager riding on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    tally: Tally,
    /// Current status of the hand.
    status: HandStatus,
    /// Money the player has put on this hand.
    bet: usize,
    /// Wager funded by the house through a free double or free split.
    free_bet: usize,
    /// Whether this hand was created by splitting.
    from_split: bool,
    /// Whether the player has taken any decision on this hand.
    acted: bool,
    /// Whether this hand holds a split ace.
    split_aces: bool,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            tally: Tally {
                total: 0,
                soft_aces: 0,
            },
            status: HandStatus::Active,
            bet,
            free_bet: 0,
            from_split: false,
            acted: false,
            split_aces: false,
        }
    }

    /// Creates a new hand from a split with a single card.
    ///
    /// `bet` is the player's money on the new hand and `free_bet` the part
    /// of the wager the house funds.
    #[must_use]
    pub fn from_split(card: Card, bet: usize, free_bet: usize) -> Self {
        let mut hand = Self::new(bet);
        hand.free_bet = free_bet;
        hand.from_split = true;
        hand.split_aces = card.is_ace();
        hand.add_card(card);
        hand
    }

    /// Adds a card to the hand, busting it if the total passes 21.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.tally.add(card);

        if self.tally.total > 21 {
            self.status = HandStatus::Busted;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns whether the hand still takes decisions.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, HandStatus::Active)
    }

    /// Money the player has riding on this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Wager the house funds on this hand.
    #[must_use]
    pub const fn free_bet(&self) -> usize {
        self.free_bet
    }

    /// Full wager the hand settles against: money plus house-funded amount.
    #[must_use]
    pub const fn wager(&self) -> usize {
        self.bet + self.free_bet
    }

    /// Doubles the wager. With `free`, the house funds the added half.
    pub const fn double_wager(&mut self, free: bool) {
        let added = self.wager();
        if free {
            self.free_bet += added;
        } else {
            self.bet += added;
        }
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns whether this hand holds a split ace.
    #[must_use]
    pub const fn is_split_aces(&self) -> bool {
        self.split_aces
    }

    /// Returns whether no decision has been taken on this hand yet.
    #[must_use]
    pub const fn is_untouched(&self) -> bool {
        !self.acted
    }

    /// Records that the player took a decision on this hand.
    pub const fn mark_acted(&mut self) {
        self.acted = true;
    }

    /// Current total, with aces counted as 11 where they fit.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.tally.total
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.tally.soft_aces > 0
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.tally.total > 21
    }

    /// Returns whether the hand is a natural: an original two-card 21.
    ///
    /// A 21 made by drawing onto a split card is not a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        !self.from_split && self.cards.len() == 2 && self.tally.total == 21
    }

    /// Returns whether the hand is a pair of equal-value cards.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].value() == self.cards[1].value()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() != 2 {
            return None;
        }

        let card = self.cards.pop()?;
        self.tally = Tally::of(&self.cards);
        self.from_split = true;
        self.split_aces = card.is_ace();
        Some(card)
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerHand {
    /// Cards in the hand.
    cards: Vec<Card>,
    tally: Tally,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            tally: Tally {
                total: 0,
                soft_aces: 0,
            },
            hole_revealed: false,
        }
    }

    /// Creates a dealer hand holding `cards`, hole card revealed.
    #[must_use]
    pub fn with_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            tally: Tally::of(cards),
            hole_revealed: true,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.tally.add(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the cards a player can see: the up card only while the hole
    /// card is hidden.
    #[must_use]
    pub fn visible_cards(&self) -> &[Card] {
        if self.hole_revealed {
            &self.cards
        } else {
            &self.cards[..self.cards.len().min(1)]
        }
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the hole card (second card).
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the up card could complete a blackjack.
    #[must_use]
    pub fn can_have_blackjack(&self) -> bool {
        self.up_card()
            .is_some_and(|c| c.is_ace() || c.rank.is_ten_value())
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.value()
        } else {
            self.cards.first().map_or(0, Card::value)
        }
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.tally.total
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.tally.total == 21
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.tally.total > 21
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.tally.soft_aces > 0
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.tally = Tally::default();
        self.hole_revealed = false;
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}
