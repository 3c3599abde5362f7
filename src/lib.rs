//! Relaychat is a terminal-first chat client for selector-routed prompt
//! gateways.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the append-only transcript, the two-stage
//!   selector/target request chain, and configuration handling.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the request payloads exchanged with the gateway.
//! - [`utils`] holds URL handling and the optional session log.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
