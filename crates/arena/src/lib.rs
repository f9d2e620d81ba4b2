//! Match layer for stack battles.
//!
//! [`Match`] owns every board of one battle together with the garbage
//! coordinator they share, and applies player actions one at a time.
//! [`MatchHandle`] runs a match on its own tokio task so concurrent sessions can
//! submit actions without sharing the match state.
//!
//! The core crate never logs; this layer emits `tracing` events for joins, leaves,
//! garbage traffic, top-outs and the match result.

pub mod actor;
pub mod battle;
pub mod config;
pub mod error;

pub use actor::MatchHandle;
pub use battle::{player_seed, ActionResult, Match, MatchSnapshot, Standing};
pub use config::MatchConfig;
pub use error::ArenaError;
