//! [`ChatPlatform`](sticky_engine::ChatPlatform) over the Discord REST API.

pub mod client;
pub mod payload;

pub use client::DiscordClient;
