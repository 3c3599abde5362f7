//! Shared constants used across the application

/// Gateway address used when neither the CLI, the environment, nor the
/// config file provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the endpoint that picks a target and prompt for a piece of input.
pub const SELECTOR_ENDPOINT: &str = "api/selector";

/// Path of the endpoint that executes a prompt against the chosen target.
pub const TARGET_ENDPOINT: &str = "api/target";

/// Prompt value the target endpoint interprets as a stop command.
pub const QUIT_PROMPT: &str = "quit";
