//! Realtime conversation client for VoiceVibe.
//!
//! A [`session::ChatSession`] keeps one WebSocket bound to one conversation,
//! encodes outbound intents with [`codec`], and fans decoded server pushes
//! out through [`events::ChatEvents`].

// layers
pub mod domain;
pub mod dto;

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod timeline;
pub mod transport;

pub mod cli;
