//! Foundry core domain layer.
//!
//! Documents, merge semantics, conversation transcripts, annotations,
//! and persona configuration for the conversational co-authoring engine.

pub mod annotation;
pub mod conversation;
pub mod document;
pub mod error;
pub mod persona;

// Re-export common error type
pub use error::{FoundryError, Result};
