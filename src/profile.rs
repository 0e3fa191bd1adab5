//! Dealer rule profiles.

use core::fmt;

/// Totals on which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DoubleRestriction {
    /// Double down allowed on any two cards.
    #[default]
    AnyTwoCards,
    /// Double down allowed only on totals of 9, 10 or 11.
    NineTenEleven,
}

impl DoubleRestriction {
    /// Returns whether a two-card hand totalling `value` may double.
    #[must_use]
    pub const fn permits(self, value: u8) -> bool {
        match self {
            Self::AnyTwoCards => true,
            Self::NineTenEleven => value >= 9 && value <= 11,
        }
    }
}

/// Rounding mode for payouts that do not come out even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves up.
    Nearest,
}

/// An exact payout ratio such as 3:2 or 6:5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoutRatio {
    /// Amount won per `denominator` wagered.
    pub numerator: u16,
    /// Amount wagered per `numerator` won. Never zero.
    pub denominator: u16,
}

impl PayoutRatio {
    /// 3:2, the classic blackjack payout.
    pub const THREE_TO_TWO: Self = Self::new(3, 2);
    /// 6:5.
    pub const SIX_TO_FIVE: Self = Self::new(6, 5);
    /// 2:1.
    pub const TWO_TO_ONE: Self = Self::new(2, 1);
    /// 1:1, even money.
    pub const EVEN: Self = Self::new(1, 1);
    /// 1:2, the share of a bet refunded on surrender.
    pub const HALF: Self = Self::new(1, 2);

    /// Creates a ratio. A zero denominator is treated as 1.
    #[must_use]
    pub const fn new(numerator: u16, denominator: u16) -> Self {
        Self {
            numerator,
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    /// Applies the ratio to `amount` with exact integer arithmetic.
    ///
    /// ```
    /// use bjtable::{PayoutRatio, RoundingMode};
    ///
    /// assert_eq!(PayoutRatio::THREE_TO_TWO.apply(100, RoundingMode::Down), 150);
    /// assert_eq!(PayoutRatio::SIX_TO_FIVE.apply(100, RoundingMode::Down), 120);
    /// assert_eq!(PayoutRatio::THREE_TO_TWO.apply(5, RoundingMode::Down), 7);
    /// assert_eq!(PayoutRatio::THREE_TO_TWO.apply(5, RoundingMode::Up), 8);
    /// ```
    #[must_use]
    pub const fn apply(self, amount: usize, mode: RoundingMode) -> usize {
        let scaled = amount * self.numerator as usize;
        let denominator = self.denominator as usize;
        let quotient = scaled / denominator;
        let remainder = scaled % denominator;

        let round_up = match mode {
            RoundingMode::Down => false,
            RoundingMode::Up => remainder > 0,
            RoundingMode::Nearest => remainder * 2 >= denominator && remainder > 0,
        };

        if round_up { quotient + 1 } else { quotient }
    }

    /// The ratio as a decimal, for display.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl fmt::Display for PayoutRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// House rules beyond the standard table parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseRules {
    /// A five-card hand that has not busted stands and wins even money.
    pub five_card_charlie: bool,
    /// Payout for a natural whose two cards share a suit, replacing the
    /// regular blackjack payout.
    pub suited_blackjack_pays: Option<PayoutRatio>,
}

/// The dealers a player can sit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DealerId {
    /// Classic Vegas shoe game.
    Ruby,
    /// Free doubles and free splits.
    Lucky,
    /// Tough double-deck game paying 6:5.
    Shark,
    /// Relaxed player-friendly rules.
    Zen,
    /// Fast game with a decision timer.
    Blitz,
    /// Wildcard: new rules every shoe.
    Maverick,
}

impl DealerId {
    /// All dealers in lobby order.
    pub const ALL: [Self; 6] = [
        Self::Ruby,
        Self::Lucky,
        Self::Shark,
        Self::Zen,
        Self::Blitz,
        Self::Maverick,
    ];

    /// Display name of the dealer.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ruby => "Ruby",
            Self::Lucky => "Lucky",
            Self::Shark => "Shark",
            Self::Zen => "Zen",
            Self::Blitz => "Blitz",
            Self::Maverick => "Maverick",
        }
    }

    /// Whether this dealer draws fresh rules whenever a shoe is built.
    #[must_use]
    pub const fn regenerates_rules(self) -> bool {
        matches!(self, Self::Maverick)
    }
}

impl fmt::Display for DealerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rules a dealer plays by.
///
/// Profiles are plain data. Start from [`RuleProfile::for_dealer`] or
/// [`RuleProfile::default`] and adjust with the builder methods:
///
/// ```
/// use bjtable::{DealerId, PayoutRatio, RuleProfile};
///
/// let profile = RuleProfile::for_dealer(DealerId::Ruby)
///     .with_decks(8)
///     .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE)
///     .with_dealer_hits_soft_17(true);
/// assert_eq!(profile.decks, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleProfile {
    /// Dealer this profile belongs to.
    pub dealer: DealerId,
    /// Number of decks.
    pub decks: u8,
    /// Deck penetration (fraction of the shoe dealt before reshuffle).
    /// 0 to disable reshuffling.
    pub penetration: f64,
    /// Smallest bet the table accepts.
    pub minimum_bet: usize,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Double down conditions.
    pub double_restriction: DoubleRestriction,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Maximum number of hands a player can hold through splitting.
    pub max_split_hands: u8,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Whether surrender is allowed.
    pub surrender: bool,
    /// Blackjack payout ratio.
    pub blackjack_payout: PayoutRatio,
    /// Whether doubling down costs nothing.
    pub free_double: bool,
    /// Whether splitting costs nothing.
    pub free_split: bool,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for surrender refunds.
    pub rounding_surrender: RoundingMode,
    /// Extra house rules.
    pub house_rules: HouseRules,
    /// Seconds per decision for an external timer, if the table uses one.
    pub decision_seconds: Option<u16>,
}

impl Default for RuleProfile {
    fn default() -> Self {
        Self::for_dealer(DealerId::Ruby)
    }
}

impl RuleProfile {
    const fn classic(dealer: DealerId) -> Self {
        Self {
            dealer,
            decks: 6,
            penetration: 0.75,
            minimum_bet: 10,
            dealer_hits_soft_17: false,
            double_restriction: DoubleRestriction::AnyTwoCards,
            double_after_split: true,
            max_split_hands: 4,
            resplit_aces: false,
            surrender: true,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            free_double: false,
            free_split: false,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
            house_rules: HouseRules {
                five_card_charlie: false,
                suited_blackjack_pays: None,
            },
            decision_seconds: None,
        }
    }

    /// The table rules of `dealer`.
    ///
    /// Maverick's entry is the base the per-shoe variant is laid over; see
    /// [`crate::maverick`].
    #[must_use]
    pub const fn for_dealer(dealer: DealerId) -> Self {
        let base = Self::classic(dealer);
        match dealer {
            DealerId::Ruby | DealerId::Maverick => base,
            DealerId::Lucky => base
                .with_dealer_hits_soft_17(true)
                .with_double_restriction(DoubleRestriction::NineTenEleven)
                .with_surrender(false)
                .with_free_double(true)
                .with_free_split(true),
            DealerId::Shark => base
                .with_decks(2)
                .with_minimum_bet(25)
                .with_dealer_hits_soft_17(true)
                .with_double_restriction(DoubleRestriction::NineTenEleven)
                .with_double_after_split(false)
                .with_max_split_hands(2)
                .with_surrender(false)
                .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE),
            DealerId::Zen => base
                .with_decks(2)
                .with_minimum_bet(5)
                .with_resplit_aces(true),
            DealerId::Blitz => base
                .with_decks(4)
                .with_dealer_hits_soft_17(true)
                .with_max_split_hands(3)
                .with_decision_seconds(Some(10)),
        }
    }

    /// Sets the dealer.
    #[must_use]
    pub const fn with_dealer(mut self, dealer: DealerId) -> Self {
        self.dealer = dealer;
        self
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::RuleProfile;
    ///
    /// let profile = RuleProfile::default().with_decks(1);
    /// assert_eq!(profile.decks, 1);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the deck penetration.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the table minimum.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::RuleProfile;
    ///
    /// let profile = RuleProfile::default().with_minimum_bet(25);
    /// assert_eq!(profile.minimum_bet, 25);
    /// ```
    #[must_use]
    pub const fn with_minimum_bet(mut self, minimum: usize) -> Self {
        self.minimum_bet = minimum;
        self
    }

    /// Sets whether the dealer hits soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the double down conditions.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{DoubleRestriction, RuleProfile};
    ///
    /// let profile = RuleProfile::default()
    ///     .with_double_restriction(DoubleRestriction::NineTenEleven);
    /// assert!(!profile.double_restriction.permits(8));
    /// assert!(profile.double_restriction.permits(11));
    /// ```
    #[must_use]
    pub const fn with_double_restriction(mut self, restriction: DoubleRestriction) -> Self {
        self.double_restriction = restriction;
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the maximum number of hands reachable by splitting.
    #[must_use]
    pub const fn with_max_split_hands(mut self, hands: u8) -> Self {
        self.max_split_hands = hands;
        self
    }

    /// Sets whether split aces may be split again.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets whether surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{PayoutRatio, RuleProfile};
    ///
    /// let profile = RuleProfile::default().with_blackjack_payout(PayoutRatio::SIX_TO_FIVE);
    /// assert_eq!(profile.blackjack_payout.to_string(), "6:5");
    /// ```
    #[must_use]
    pub const fn with_blackjack_payout(mut self, ratio: PayoutRatio) -> Self {
        self.blackjack_payout = ratio;
        self
    }

    /// Sets whether doubling down is free.
    #[must_use]
    pub const fn with_free_double(mut self, free: bool) -> Self {
        self.free_double = free;
        self
    }

    /// Sets whether splitting is free.
    #[must_use]
    pub const fn with_free_split(mut self, free: bool) -> Self {
        self.free_split = free;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Sets the house rules.
    #[must_use]
    pub const fn with_house_rules(mut self, rules: HouseRules) -> Self {
        self.house_rules = rules;
        self
    }

    /// Sets the decision timer length surfaced to the timer collaborator.
    #[must_use]
    pub const fn with_decision_seconds(mut self, seconds: Option<u16>) -> Self {
        self.decision_seconds = seconds;
        self
    }
}
