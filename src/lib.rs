//! Piper, a retro arcade buddy: tracks what the player is doing, picks
//! friendly canned messages, and tunes display settings for the session.

pub mod buddy;
pub mod chat;
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod identity;
pub mod recommendation;
pub mod responses;
pub mod scheduler;
pub mod selector;
pub mod shell;
pub mod status;

pub use buddy::{Buddy, SharedBuddy};
pub use config::Config;
pub use error::{BuddyError, Result};
