//! Interactive command-line chat client.

mod domain;
mod formatter;
mod runner;
mod ui;

pub use runner::{ClientOptions, run_client};
