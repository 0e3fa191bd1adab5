//! Game engine and state management.

use core::sync::atomic::AtomicUsize;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

use crate::card::Card;
use crate::effect::{Effect, SoundCue};
use crate::error::{ResetError, ShoeExhausted, SwitchDealerError};
use crate::hand::{DealerHand, Hand};
use crate::maverick::{self, MaverickVariant};
use crate::profile::{DealerId, RuleProfile};
use crate::result::RoundResult;
use crate::shoe::Shoe;
use crate::stats::{ResultSink, SessionStats};

mod actions;
mod bet;
pub mod dealer;
pub mod settle;
mod snapshot;
pub mod state;

pub use snapshot::{GameSnapshot, SubscriptionId};
pub use state::{AllowedActions, GameState};

type Listener = Arc<dyn Fn(&GameSnapshot) + Send + Sync>;

/// A single-seat blackjack table: one shoe, one bankroll, one round at a
/// time.
///
/// Every public call runs its transitions to completion before returning.
/// The game then rests in [`GameState::Betting`], [`GameState::PlayerTurn`]
/// or [`GameState::GameOver`]; subscribers see the transient states as they
/// pass, and [`Game::drain_effects`] hands over what the view should
/// animate.
pub struct Game {
    /// Cards in the shoe.
    pub shoe: Mutex<Shoe>,
    /// Profile chosen for the table, before any per-shoe variation.
    table: Mutex<RuleProfile>,
    /// Profile in effect for the current shoe.
    profile: Mutex<RuleProfile>,
    /// Maverick rule set in effect for the current shoe.
    maverick: Mutex<Option<MaverickVariant>>,
    /// Current game state.
    state: Mutex<GameState>,
    /// Player money not currently wagered.
    bankroll: Mutex<usize>,
    /// Player hands, left to right.
    hands: Mutex<Vec<Hand>>,
    /// Dealer's hand.
    dealer_hand: Mutex<DealerHand>,
    /// Index of the hand awaiting a decision.
    active_hand: Mutex<Option<usize>>,
    /// Result of the most recent round.
    last_result: Mutex<Option<RoundResult>>,
    /// Effects not yet drained by the view.
    effects: Mutex<Vec<Effect>>,
    /// Next subscription ID to assign.
    next_subscription: AtomicUsize,
    subscribers: Mutex<Vec<(SubscriptionId, Listener)>>,
    sinks: Mutex<Vec<Box<dyn ResultSink + Send>>>,
    stats: Mutex<SessionStats>,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
}

impl Game {
    /// Creates a game at `dealer`'s table with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{DealerId, Game, GameState};
    ///
    /// let game = Game::new(DealerId::Ruby, 500, 42);
    /// assert_eq!(game.state(), GameState::Betting);
    /// assert_eq!(game.bankroll(), 500);
    /// ```
    #[must_use]
    pub fn new(dealer: DealerId, bankroll: usize, seed: u64) -> Self {
        Self::with_profile(RuleProfile::for_dealer(dealer), bankroll, seed)
    }

    /// Creates a game playing by `profile` with the given seed.
    #[must_use]
    pub fn with_profile(profile: RuleProfile, bankroll: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (variant, active) = Self::profile_for_shoe(&profile, &mut rng);
        let shoe = Shoe::build(active.decks, active.penetration, &mut rng);
        let state = if bankroll < active.minimum_bet {
            GameState::GameOver
        } else {
            GameState::Betting
        };

        log::info!(
            "table opened with {} ({} decks), bankroll {bankroll}",
            active.dealer,
            active.decks
        );

        Self {
            shoe: Mutex::new(shoe),
            table: Mutex::new(profile),
            profile: Mutex::new(active),
            maverick: Mutex::new(variant),
            state: Mutex::new(state),
            bankroll: Mutex::new(bankroll),
            hands: Mutex::new(Vec::new()),
            dealer_hand: Mutex::new(DealerHand::new()),
            active_hand: Mutex::new(None),
            last_result: Mutex::new(None),
            effects: Mutex::new(Vec::new()),
            next_subscription: AtomicUsize::new(0),
            subscribers: Mutex::new(Vec::new()),
            sinks: Mutex::new(Vec::new()),
            stats: Mutex::new(SessionStats::new()),
            rng: Mutex::new(rng),
        }
    }

    /// Resolves the profile a new shoe plays under. Maverick draws a fresh
    /// variant; every other dealer keeps its table profile.
    fn profile_for_shoe(
        table: &RuleProfile,
        rng: &mut ChaCha8Rng,
    ) -> (Option<MaverickVariant>, RuleProfile) {
        if table.dealer.regenerates_rules() {
            let (variant, profile) = maverick::generate(table.clone(), rng);
            (Some(variant), profile)
        } else {
            (None, table.clone())
        }
    }

    /// Builds and shuffles a new shoe under the table profile.
    fn rebuild_shoe(&self) {
        let table = self.table.lock().clone();
        let mut rng = self.rng.lock();
        let (variant, active) = Self::profile_for_shoe(&table, &mut rng);
        let shoe = Shoe::build(active.decks, active.penetration, &mut *rng);
        drop(rng);

        log::info!("shoe rebuilt: {} decks for {}", active.decks, active.dealer);
        if let Some(variant) = variant {
            log::info!("maverick rules for this shoe: {variant}");
        }

        *self.shoe.lock() = shoe;
        *self.profile.lock() = active;
        *self.maverick.lock() = variant;
        self.push_effect(Effect::Shuffle);
        self.push_effect(Effect::SoundCue(SoundCue::Shuffle));
    }

    /// Replaces the shoe mid-round with a fresh one under the profile
    /// already in effect.
    fn refill_shoe(&self) {
        let profile = self.profile();
        let shoe = Shoe::build(profile.decks, profile.penetration, &mut *self.rng.lock());
        log::info!("shoe refilled: {} decks", profile.decks);

        *self.shoe.lock() = shoe;
        self.push_effect(Effect::Shuffle);
        self.push_effect(Effect::SoundCue(SoundCue::Shuffle));
    }

    /// Returns whether the shoe should be replaced before the next deal.
    ///
    /// A stacked shoe is never replaced; a built one is replaced once it is
    /// past its penetration or holds fewer than `needed` cards.
    fn shoe_due(&self, needed: usize) -> bool {
        let shoe = self.shoe.lock();
        !shoe.is_stacked() && (shoe.needs_reshuffle() || shoe.remaining() < needed)
    }

    /// Returns whether the shoe is due for a reshuffle.
    pub fn needs_reshuffle(&self) -> bool {
        self.shoe.lock().needs_reshuffle()
    }

    /// Draws a card from the shoe.
    fn draw(&self) -> Result<Card, ShoeExhausted> {
        self.shoe.lock().draw()
    }

    /// Fails unless the shoe holds at least `needed` cards. A built shoe
    /// that runs short is refilled instead.
    fn ensure_cards(&self, needed: usize) -> Result<(), ShoeExhausted> {
        if self.cards_remaining() >= needed {
            return Ok(());
        }
        let stacked = self.shoe.lock().is_stacked();
        if !stacked {
            self.refill_shoe();
        }
        if self.cards_remaining() < needed {
            log::error!("shoe cannot supply {needed} cards");
            return Err(ShoeExhausted);
        }
        Ok(())
    }

    /// Returns whether a player action needing `needed` cards can be dealt.
    fn can_supply(&self, needed: usize) -> bool {
        let shoe = self.shoe.lock();
        !shoe.is_stacked() || shoe.remaining() >= needed
    }

    fn push_effect(&self, effect: Effect) {
        self.effects.lock().push(effect);
    }

    /// Moves to `state` and notifies subscribers.
    fn set_state(&self, state: GameState) {
        let previous = core::mem::replace(&mut *self.state.lock(), state);
        if previous != state {
            log::debug!("state {previous:?} -> {state:?}");
        }
        self.notify();
    }

    /// Returns the number of cards remaining in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shoe.lock().remaining()
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        *self.state.lock()
    }

    /// Returns the profile in effect for the current shoe.
    pub fn profile(&self) -> RuleProfile {
        self.profile.lock().clone()
    }

    /// Returns the Maverick rule set in effect, if Maverick is dealing.
    pub fn maverick_variant(&self) -> Option<MaverickVariant> {
        *self.maverick.lock()
    }

    /// Returns the money not currently wagered.
    pub fn bankroll(&self) -> usize {
        *self.bankroll.lock()
    }

    /// Returns the player's hands.
    pub fn hands(&self) -> Vec<Hand> {
        self.hands.lock().clone()
    }

    /// Returns the index of the hand awaiting a decision.
    pub fn active_hand(&self) -> Option<usize> {
        *self.active_hand.lock()
    }

    /// Returns a clone of the dealer's hand.
    pub fn dealer_hand(&self) -> DealerHand {
        self.dealer_hand.lock().clone()
    }

    /// Returns the result of the most recent round.
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result.lock().clone()
    }

    /// Returns statistics over every hand settled at this table.
    pub fn stats(&self) -> SessionStats {
        *self.stats.lock()
    }

    /// Takes the queued presentation effects, oldest first.
    pub fn drain_effects(&self) -> Vec<Effect> {
        core::mem::take(&mut *self.effects.lock())
    }

    /// Registers a collaborator that receives every settled hand.
    pub fn add_sink(&self, sink: Box<dyn ResultSink + Send>) {
        self.sinks.lock().push(sink);
    }

    /// Sits down with another dealer.
    ///
    /// The shoe is rebuilt under `profile` and the previous round cleared;
    /// the bankroll carries over. If the bankroll no longer covers the new
    /// table minimum the game is over.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn switch_dealer(&self, profile: RuleProfile) -> Result<(), SwitchDealerError> {
        let state = self.state();
        if state != GameState::Betting && state != GameState::GameOver {
            return Err(SwitchDealerError::RoundInProgress);
        }

        log::info!("switching dealer to {}", profile.dealer);
        *self.table.lock() = profile;
        self.rebuild_shoe();
        self.clear_round();

        let minimum = self.profile.lock().minimum_bet;
        let next = if self.bankroll() < minimum {
            log::warn!("bankroll below the {minimum} minimum at the new table");
            GameState::GameOver
        } else {
            state
        };
        self.set_state(next);

        Ok(())
    }

    /// Refills the bankroll after game over and reopens betting.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not over or `amount` does not cover
    /// the table minimum.
    pub fn reset_bankroll(&self, amount: usize) -> Result<(), ResetError> {
        if self.state() != GameState::GameOver {
            return Err(ResetError::NotGameOver);
        }

        let minimum = self.profile.lock().minimum_bet;
        if amount < minimum {
            return Err(ResetError::BelowMinimum { amount, minimum });
        }

        log::info!("bankroll reset to {amount}");
        *self.bankroll.lock() = amount;
        self.clear_round();
        self.set_state(GameState::Betting);

        Ok(())
    }

    /// Clears hands and the last result.
    fn clear_round(&self) {
        self.hands.lock().clear();
        self.dealer_hand.lock().clear();
        *self.active_hand.lock() = None;
        *self.last_result.lock() = None;
    }
}
