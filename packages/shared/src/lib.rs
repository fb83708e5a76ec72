//! Shared utilities for the VoiceVibe chat crates.

pub mod logger;
pub mod time;
