pub mod api;
pub mod models;

pub use models::{Draft, StickyContent, StickyKind, StickyRecord};
