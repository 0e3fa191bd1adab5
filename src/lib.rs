//! A blackjack table engine with per-dealer rule profiles and optional
//! `no_std` support.
//!
//! The crate provides a [`Game`] type that runs the full round loop for a
//! single seat: betting, the deal, player decisions, dealer play and
//! settlement. Tables are described by a [`RuleProfile`]; six dealers ship
//! with their own, and Maverick draws new rules with every shoe.
//!
//! # Example
//!
//! ```
//! use bjtable::{DealerId, Game, GameState};
//!
//! let game = Game::new(DealerId::Ruby, 500, 42);
//! game.place_bet(25).unwrap();
//!
//! while game.state() == GameState::PlayerTurn {
//!     game.stand().unwrap();
//! }
//!
//! let result = game.last_result().unwrap();
//! assert_eq!(game.bankroll() as isize, 500 + result.net);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod effect;
pub mod error;
pub mod game;
pub mod hand;
pub mod maverick;
pub mod profile;
pub mod result;
pub mod shoe;
pub mod stats;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use effect::{Effect, Seat, SoundCue};
pub use error::{ActionError, BettingError, ResetError, ShoeExhausted, SwitchDealerError};
pub use game::{AllowedActions, Game, GameSnapshot, GameState, SubscriptionId};
pub use hand::{DealerHand, Hand, HandStatus};
pub use maverick::MaverickVariant;
pub use profile::{DealerId, DoubleRestriction, HouseRules, PayoutRatio, RoundingMode, RuleProfile};
pub use result::{HandOutcome, HandRecord, RoundResult};
pub use shoe::Shoe;
pub use stats::{ResultSink, SessionStats};
pub use sync::Mutex;
