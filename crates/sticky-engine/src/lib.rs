//! Sticky-message consistency engine.
//!
//! Keeps one bot-owned message at the bottom of each configured channel. Chat
//! activity is debounced per channel by the [`scheduler`]; when a channel goes
//! quiet the [`reconciler`] checks whether the sticky is still the last message
//! and recreates or relocates it if not. Operators build stickies through the
//! [`compose`] flow and clear them through [`removal`].

pub mod cache;
pub mod compose;
pub mod drafts;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod locks;
pub mod platform;
pub mod reconciler;
pub mod removal;
pub mod scheduler;
pub mod store;
pub mod validation;
pub mod welcome;

#[cfg(test)]
mod testing;

pub use engine::{EngineConfig, StickyEngine};
pub use error::{StickyError, ValidationError};
pub use platform::{ChatPlatform, PlatformError};
pub use store::{SqliteStore, StickyStore};
