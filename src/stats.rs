//! Result sinks and session statistics.

extern crate alloc;

use alloc::sync::Arc;

use crate::result::{HandOutcome, HandRecord};
use crate::sync::Mutex;

/// Receives one record per settled hand.
///
/// Sinks run after settlement has been committed. They cannot fail the
/// round; a sink that persists records handles its own errors.
pub trait ResultSink {
    /// Called once for every settled hand, left to right.
    fn record(&mut self, record: &HandRecord);
}

/// Running totals over a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionStats {
    /// Hands settled.
    pub hands: usize,
    /// Hands won at even money (including dealer busts).
    pub wins: usize,
    /// Hands lost to the dealer's total.
    pub losses: usize,
    /// Hands pushed.
    pub pushes: usize,
    /// Naturals paid.
    pub blackjacks: usize,
    /// Hands busted.
    pub busts: usize,
    /// Hands surrendered.
    pub surrenders: usize,
    /// Money wagered.
    pub wagered: usize,
    /// Net result.
    pub net: isize,
    /// Largest single-hand profit.
    pub biggest_win: isize,
}

impl SessionStats {
    /// Creates empty statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hands: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            blackjacks: 0,
            busts: 0,
            surrenders: 0,
            wagered: 0,
            net: 0,
            biggest_win: 0,
        }
    }

    /// Adds a settled hand.
    pub fn add(&mut self, record: &HandRecord) {
        self.hands += 1;
        self.wagered += record.bet_amount;

        match record.outcome {
            HandOutcome::Win | HandOutcome::DealerBust => self.wins += 1,
            HandOutcome::Loss => self.losses += 1,
            HandOutcome::Push => self.pushes += 1,
            HandOutcome::Blackjack => self.blackjacks += 1,
            HandOutcome::Bust => self.busts += 1,
            HandOutcome::Surrender => self.surrenders += 1,
        }

        let net = record.net();
        self.net += net;
        self.biggest_win = self.biggest_win.max(net);
    }

    /// Share of hands that paid the player, or `None` before any hand.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        if self.hands == 0 {
            return None;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for hand counts"
        )]
        let rate = (self.wins + self.blackjacks) as f64 / self.hands as f64;
        Some(rate)
    }
}

impl ResultSink for SessionStats {
    fn record(&mut self, record: &HandRecord) {
        self.add(record);
    }
}

/// Lets a caller keep a handle on a sink it gives to the game.
impl<S: ResultSink> ResultSink for Arc<Mutex<S>> {
    fn record(&mut self, record: &HandRecord) {
        self.lock().record(record);
    }
}
