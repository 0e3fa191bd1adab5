//! Per-shoe rule generation for the Maverick dealer.
//!
//! Maverick deals every shoe under a different rule set drawn from a fixed
//! pool. Only variants whose estimated house edge lies inside
//! [`EDGE_BAND_BPS`] are ever picked, so the table stays fair however the
//! draw falls. Generation is a pure function of the random source: seed a
//! [`ChaCha8Rng`] and the same variant comes back.

use core::fmt;
use core::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::profile::{DoubleRestriction, HouseRules, PayoutRatio, RuleProfile};

/// House edge band, in basis points, a Maverick variant must fall inside.
pub const EDGE_BAND_BPS: RangeInclusive<i32> = 40..=80;

/// Estimated edge of six decks, dealer stands on soft 17, double any two,
/// double after split, four hands, no resplit of aces, no surrender, 3:2.
const BASELINE_BPS: i32 = 43;

/// Value of one unit of blackjack payout across all naturals.
const NATURAL_UNIT_BPS: i64 = 453;

/// The rule sets Maverick can deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaverickVariant {
    /// Five cards without busting win; 6:5 naturals, eight decks.
    FiveCardCharlie,
    /// Suited naturals pay 2:1; eight decks, restricted doubling.
    SuitedBlackjack,
    /// Double deck where the dealer hits soft 17.
    DoubleDeckHitSoft17,
    /// Resplit aces and surrender against a soft-17-hitting dealer.
    ResplitAcesSurrender,
    /// Single deck paying 6:5.
    SingleDeckSixToFive,
    /// Single deck with classic rules.
    SingleDeckClassic,
}

impl MaverickVariant {
    /// Every variant in the pool, eligible or not.
    pub const POOL: [Self; 6] = [
        Self::FiveCardCharlie,
        Self::SuitedBlackjack,
        Self::DoubleDeckHitSoft17,
        Self::ResplitAcesSurrender,
        Self::SingleDeckSixToFive,
        Self::SingleDeckClassic,
    ];

    /// Short name shown to the player.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FiveCardCharlie => "Five-Card Charlie",
            Self::SuitedBlackjack => "Suited Blackjack",
            Self::DoubleDeckHitSoft17 => "Double Deck H17",
            Self::ResplitAcesSurrender => "Resplit Aces",
            Self::SingleDeckSixToFive => "Single Deck 6:5",
            Self::SingleDeckClassic => "Single Deck Classic",
        }
    }

    /// One-line rule summary shown to the player.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FiveCardCharlie => {
                "Five cards without busting win automatically. Blackjack pays 6:5."
            }
            Self::SuitedBlackjack => "Suited blackjack pays 2:1. Double on 9-11 only.",
            Self::DoubleDeckHitSoft17 => "Two decks. Dealer hits soft 17. No double after split.",
            Self::ResplitAcesSurrender => "Aces may be resplit. Surrender allowed. Dealer hits soft 17.",
            Self::SingleDeckSixToFive => "One deck. Blackjack pays 6:5.",
            Self::SingleDeckClassic => "One deck. Blackjack pays 3:2.",
        }
    }

    /// Lays the variant's rules over `base`, keeping its dealer, table
    /// minimum, penetration and rounding.
    #[must_use]
    pub const fn apply(self, base: RuleProfile) -> RuleProfile {
        let rules = base
            .with_free_double(false)
            .with_free_split(false)
            .with_decision_seconds(None);

        match self {
            Self::FiveCardCharlie => rules
                .with_decks(8)
                .with_dealer_hits_soft_17(true)
                .with_double_restriction(DoubleRestriction::AnyTwoCards)
                .with_double_after_split(false)
                .with_max_split_hands(4)
                .with_resplit_aces(false)
                .with_surrender(false)
                .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE)
                .with_house_rules(HouseRules {
                    five_card_charlie: true,
                    suited_blackjack_pays: None,
                }),
            Self::SuitedBlackjack => rules
                .with_decks(8)
                .with_dealer_hits_soft_17(true)
                .with_double_restriction(DoubleRestriction::NineTenEleven)
                .with_double_after_split(false)
                .with_max_split_hands(2)
                .with_resplit_aces(false)
                .with_surrender(false)
                .with_blackjack_payout(PayoutRatio::THREE_TO_TWO)
                .with_house_rules(HouseRules {
                    five_card_charlie: false,
                    suited_blackjack_pays: Some(PayoutRatio::TWO_TO_ONE),
                }),
            Self::DoubleDeckHitSoft17 => rules
                .with_decks(2)
                .with_dealer_hits_soft_17(true)
                .with_double_restriction(DoubleRestriction::AnyTwoCards)
                .with_double_after_split(false)
                .with_max_split_hands(4)
                .with_resplit_aces(false)
                .with_surrender(false)
                .with_blackjack_payout(PayoutRatio::THREE_TO_TWO)
                .with_house_rules(HouseRules {
                    five_card_charlie: false,
                    suited_blackjack_pays: None,
                }),
            Self::ResplitAcesSurrender => rules
                .with_decks(6)
                .with_dealer_hits_soft_17(true)
                .with_double_restriction(DoubleRestriction::AnyTwoCards)
                .with_double_after_split(true)
                .with_max_split_hands(4)
                .with_resplit_aces(true)
                .with_surrender(true)
                .with_blackjack_payout(PayoutRatio::THREE_TO_TWO)
                .with_house_rules(HouseRules {
                    five_card_charlie: false,
                    suited_blackjack_pays: None,
                }),
            Self::SingleDeckSixToFive => rules
                .with_decks(1)
                .with_dealer_hits_soft_17(false)
                .with_double_restriction(DoubleRestriction::AnyTwoCards)
                .with_double_after_split(true)
                .with_max_split_hands(4)
                .with_resplit_aces(false)
                .with_surrender(false)
                .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE)
                .with_house_rules(HouseRules {
                    five_card_charlie: false,
                    suited_blackjack_pays: None,
                }),
            Self::SingleDeckClassic => rules
                .with_decks(1)
                .with_dealer_hits_soft_17(false)
                .with_double_restriction(DoubleRestriction::AnyTwoCards)
                .with_double_after_split(true)
                .with_max_split_hands(4)
                .with_resplit_aces(false)
                .with_surrender(false)
                .with_blackjack_payout(PayoutRatio::THREE_TO_TWO)
                .with_house_rules(HouseRules {
                    five_card_charlie: false,
                    suited_blackjack_pays: None,
                }),
        }
    }

    /// Estimated house edge of the variant in basis points.
    #[must_use]
    pub fn edge_bps(self) -> i32 {
        estimate_edge_bps(&self.apply(RuleProfile::default()))
    }

    /// Returns whether the variant may be dealt.
    #[must_use]
    pub fn is_eligible(self) -> bool {
        EDGE_BAND_BPS.contains(&self.edge_bps())
    }
}

impl fmt::Display for MaverickVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimates the house edge of `profile` in basis points from standard
/// basic-strategy rule effects. Positive favours the house.
///
/// Free doubles and free splits are not modelled.
///
/// ```
/// use bjtable::{DealerId, RuleProfile, maverick::estimate_edge_bps};
///
/// let ruby = RuleProfile::for_dealer(DealerId::Ruby);
/// let shark = RuleProfile::for_dealer(DealerId::Shark);
/// assert!(estimate_edge_bps(&shark) > estimate_edge_bps(&ruby));
/// ```
#[must_use]
pub fn estimate_edge_bps(profile: &RuleProfile) -> i32 {
    let mut edge = BASELINE_BPS;

    edge += match profile.decks {
        0 | 1 => -48,
        2 => -19,
        3 | 4 => -6,
        5 | 6 => 0,
        _ => 2,
    };

    if profile.dealer_hits_soft_17 {
        edge += 22;
    }
    if profile.double_restriction == DoubleRestriction::NineTenEleven {
        edge += 9;
    }
    if !profile.double_after_split {
        edge += 14;
    }
    if profile.resplit_aces {
        edge -= 8;
    }
    edge += match profile.max_split_hands {
        0..=2 => 10,
        3 => 1,
        _ => 0,
    };
    if profile.surrender {
        edge -= 8;
    }

    // 1.5 - n/d, scaled by the natural unit.
    let ratio = profile.blackjack_payout;
    let (n, d) = (i64::from(ratio.numerator), i64::from(ratio.denominator));
    edge += (NATURAL_UNIT_BPS * (3 * d - 2 * n) / (2 * d)) as i32;

    // Roughly a quarter of naturals are suited.
    if let Some(suited) = profile.house_rules.suited_blackjack_pays {
        let (sn, sd) = (i64::from(suited.numerator), i64::from(suited.denominator));
        edge -= (NATURAL_UNIT_BPS * (sn * d - n * sd) / (4 * sd * d)) as i32;
    }

    if profile.house_rules.five_card_charlie {
        edge -= 146;
    }

    edge
}

/// Variants whose estimated edge lies inside [`EDGE_BAND_BPS`].
pub fn eligible_variants() -> impl Iterator<Item = MaverickVariant> {
    MaverickVariant::POOL
        .into_iter()
        .filter(|variant| variant.is_eligible())
}

/// Draws a variant uniformly from the eligible pool and lays it over `base`.
#[must_use]
pub fn generate<R: Rng>(base: RuleProfile, rng: &mut R) -> (MaverickVariant, RuleProfile) {
    let count = eligible_variants().count();
    let pick = rng.random_range(0..count);
    let variant = eligible_variants()
        .nth(pick)
        .unwrap_or(MaverickVariant::DoubleDeckHitSoft17);

    log::debug!(
        "maverick dealt {} ({} bps)",
        variant.name(),
        variant.edge_bps()
    );

    (variant, variant.apply(base))
}

/// [`generate`] from a fresh [`ChaCha8Rng`] seeded with `seed`.
#[must_use]
pub fn generate_from_seed(base: RuleProfile, seed: u64) -> (MaverickVariant, RuleProfile) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(base, &mut rng)
}
