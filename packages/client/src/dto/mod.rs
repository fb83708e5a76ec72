//! Data Transfer Objects (DTOs) for the chat client.
//!
//! DTOs are organized by protocol:
//! - `websocket`: realtime envelope DTOs
//! - `http`: messaging records shared with the REST API

pub mod conversion;
pub mod http;
pub mod websocket;
