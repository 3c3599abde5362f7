//! Terminal UI layer for interactive chat sessions.
//!
//! Owns rendering, layout, keyboard handling, and loop control for the text
//! user interface. [`chat_loop`] runs the interaction loop that dispatches
//! submissions to [`crate::core::chain`] and renders the transcript.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns domain logic and gateway coordination.

pub mod chat_loop;
