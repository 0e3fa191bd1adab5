//! Read-only state snapshots and change notification.

use core::sync::atomic::Ordering;

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::Hand;
use crate::maverick::MaverickVariant;
use crate::profile::RuleProfile;
use crate::result::RoundResult;

use super::{AllowedActions, Game, GameState, Listener};

/// Handle returned by [`Game::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Everything a view needs to draw the table, as of one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Current game state.
    pub state: GameState,
    /// Profile in effect.
    pub profile: RuleProfile,
    /// Maverick rule set in effect, if Maverick is dealing.
    pub maverick: Option<MaverickVariant>,
    /// Money not currently wagered.
    pub bankroll: usize,
    /// Player hands, left to right.
    pub hands: Vec<Hand>,
    /// Hand awaiting a decision.
    pub active_hand: Option<usize>,
    /// Dealer cards the player can see.
    pub dealer_cards: Vec<Card>,
    /// Value of the visible dealer cards.
    pub dealer_value: u8,
    /// Whether the dealer still has a hidden hole card.
    pub hole_hidden: bool,
    /// Cards left in the shoe.
    pub cards_remaining: usize,
    /// Decisions open to the player.
    pub allowed: AllowedActions,
    /// Result of the most recent round.
    pub last_result: Option<RoundResult>,
}

impl Game {
    /// Returns a snapshot of the table.
    pub fn current_state(&self) -> GameSnapshot {
        let dealer = self.dealer_hand();
        GameSnapshot {
            state: self.state(),
            profile: self.profile(),
            maverick: self.maverick_variant(),
            bankroll: self.bankroll(),
            hands: self.hands(),
            active_hand: self.active_hand(),
            dealer_cards: dealer.visible_cards().to_vec(),
            dealer_value: dealer.visible_value(),
            hole_hidden: !dealer.is_hole_revealed() && dealer.len() > 1,
            cards_remaining: self.cards_remaining(),
            allowed: self.allowed_actions(),
            last_result: self.last_result(),
        }
    }

    /// Calls `listener` with a fresh snapshot after every state change.
    ///
    /// Listeners run synchronously inside the call that changed the state,
    /// with no lock held. They may act on the game, subscribe or
    /// unsubscribe; a listener added during a notification first hears the
    /// next one.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&GameSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().push((id, Arc::new(listener)));
        log::debug!("subscriber {} registered", id.0);
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        before != subscribers.len()
    }

    pub(super) fn notify(&self) {
        if self.subscribers.lock().is_empty() {
            return;
        }

        let snapshot = self.current_state();
        let listeners: Vec<Listener> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
