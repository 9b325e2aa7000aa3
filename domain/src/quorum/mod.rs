//! Meal consensus domain
//!
//! This module contains the core concepts for group restaurant decisions.
//!
//! # Core Concepts
//!
//! ## Vote Ledger
//! Every member records approve/disapprove decisions per restaurant, tagged
//! with the round they were cast in.
//!
//! ## Rounds
//! A round closes once every active member has decided on every restaurant
//! that was eligible for them when the round opened. Disapproved restaurants
//! never come back; approved ones stay in play.
//!
//! ## Consensus
//! Unanimous approval by every active member. The first restaurant to reach
//! it is chosen and the meal becomes terminal.
//!
//! ```text
//! ┌──────────────┐   cast    ┌─────────────┐  complete?  ┌──────────────┐
//! │ Eligibility  │ ────────▶ │ Vote Ledger │ ──────────▶ │ Round / Cons │
//! └──────────────┘           └─────────────┘             └──────────────┘
//! ```

pub mod consensus;
pub mod ledger;
pub mod round;
pub mod tally;
pub mod vote;

// Re-export main types
pub use consensus::{resolve, unanimous_candidates};
pub use ledger::VoteLedger;
pub use round::{RoundSnapshot, RoundState, RoundTransition};
pub use tally::{PlaceScore, tally};
pub use vote::{Decision, VoteRecord};
