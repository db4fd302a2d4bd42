//! Revision feedback compilation.
//!
//! Turns the annotation collection into a single operator-turn message
//! that the extraction engine consumes as an ordinary turn.

use super::model::AnnotationSet;
use crate::error::{FoundryError, Result};

/// Header line of every compiled feedback message.
pub const FEEDBACK_HEADER: &str = "Feedback based on annotations:";

/// Compiles all annotations into one revision request.
///
/// Lines are emitted in global collection order (creation order), not in
/// per-field rendering order. Calling this with an empty collection is a
/// precondition failure; the caller must check before invoking.
///
/// Annotations are not cleared by compilation: submitting the same
/// feedback twice resubmits every line, including ones the agent already
/// addressed.
pub fn compile_feedback(annotations: &AnnotationSet) -> Result<String> {
    if annotations.is_empty() {
        return Err(FoundryError::precondition("no annotations to compile"));
    }

    let mut message = String::from(FEEDBACK_HEADER);
    for (index, annotation) in annotations.iter().enumerate() {
        message.push('\n');
        message.push_str(&format!(
            "{}. In {} ({}): {}",
            index + 1,
            annotation.field,
            annotation.selected_text,
            annotation.comment
        ));
    }
    Ok(message)
}
