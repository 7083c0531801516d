//! wordrill - terminal vocabulary drill
//!
//! Loads a word list with translations, groups it into categories and
//! drills the learner by asking for the word behind each translation.
//! Words can be spoken through an ordered fallback of speech backends.

pub mod error;
pub mod platform;
pub mod quiz;
pub mod speech;
pub mod state;
pub mod words;

pub use error::{Result, WordrillError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
