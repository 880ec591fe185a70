//! Wire contract with the external translation model.
//!
//! Builds the chat-completions request for a batch of terms and validates the
//! structured reply. All functions here are pure (no I/O); the HTTP call lives
//! in [`crate::translator`].

pub mod openai_types;
pub mod request;
pub mod response;
pub mod schema;
