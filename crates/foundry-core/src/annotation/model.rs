//! Annotation domain model.
//!
//! An annotation anchors a comment to a substring of a rendered document
//! field. Annotations are immutable after creation and are owned by one
//! session; they may become orphaned when the field's text changes, but
//! they are never deleted automatically.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FoundryError, Result};

/// A comment anchored to previously rendered field text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Wire name of the annotated document field
    pub field: String,
    /// The exact substring the user selected
    pub selected_text: String,
    /// The user's comment
    pub comment: String,
    /// Timestamp when the annotation was created (ISO 8601 format)
    pub created_at: String,
}

/// A pending text selection awaiting a comment.
///
/// This is the explicit handoff between the capture step and the
/// comment-entry prompt: it is resolved exactly once, either by
/// [`AnnotationSet::commit`] or by dropping it (cancel). No ambient
/// selection state exists outside this object.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    field: String,
    selected_text: String,
}

impl SelectionRequest {
    /// Captures a selection. The text is trimmed; an empty selection is a
    /// precondition failure.
    pub fn new(field: impl Into<String>, selected_text: &str) -> Result<Self> {
        let trimmed = selected_text.trim();
        if trimmed.is_empty() {
            return Err(FoundryError::precondition("selection is empty"));
        }
        Ok(Self {
            field: field.into(),
            selected_text: trimmed.to_string(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }
}

/// The ordered annotation collection of one session.
///
/// Insertion order is the global ordering: it is the source of the stable
/// badge number shown to the user and the order used when compiling
/// revision feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSet {
    annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a pending selection into an annotation.
    ///
    /// `field_text` is the current rendered value of the selection's
    /// field; the selection must still be a substring of it, and the
    /// comment must be non-empty.
    pub fn commit(
        &mut self,
        request: SelectionRequest,
        comment: &str,
        field_text: &str,
    ) -> Result<Annotation> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(FoundryError::precondition("annotation comment is empty"));
        }
        if !field_text.contains(request.selected_text()) {
            return Err(FoundryError::precondition(format!(
                "selection '{}' is not part of the current '{}' text",
                request.selected_text(),
                request.field()
            )));
        }

        let annotation = Annotation {
            id: Uuid::new_v4().to_string(),
            field: request.field,
            selected_text: request.selected_text,
            comment: comment.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.annotations.push(annotation.clone());
        Ok(annotation)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    /// Returns the stable 1-based badge number of an annotation.
    ///
    /// The badge is the annotation's position in the global collection;
    /// it never changes for the life of the session, regardless of later
    /// annotations on other fields.
    pub fn badge_of(&self, id: &str) -> Option<usize> {
        self.annotations
            .iter()
            .position(|a| a.id == id)
            .map(|index| index + 1)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_trims_and_rejects_empty() {
        let request = SelectionRequest::new("vision", "  empower educators  ").unwrap();
        assert_eq!(request.selected_text(), "empower educators");

        let err = SelectionRequest::new("vision", "   ").unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn commit_requires_comment_and_live_substring() {
        let mut set = AnnotationSet::new();
        let text = "We want to empower educators globally.";

        let request = SelectionRequest::new("vision", "empower educators").unwrap();
        let err = set.commit(request, "   ", text).unwrap_err();
        assert!(err.is_precondition());

        let request = SelectionRequest::new("vision", "empower robots").unwrap();
        let err = set.commit(request, "Be more specific", text).unwrap_err();
        assert!(err.is_precondition());

        let request = SelectionRequest::new("vision", "empower educators").unwrap();
        let annotation = set.commit(request, "Be more specific", text).unwrap();
        assert_eq!(annotation.selected_text, "empower educators");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn badges_are_stable_across_later_annotations() {
        let mut set = AnnotationSet::new();
        let first = set
            .commit(
                SelectionRequest::new("vision", "educators").unwrap(),
                "who exactly?",
                "empower educators",
            )
            .unwrap()
            .id;
        assert_eq!(set.badge_of(&first), Some(1));

        set.commit(
            SelectionRequest::new("problem", "expensive").unwrap(),
            "quantify this",
            "tutoring is expensive",
        )
        .unwrap();
        set.commit(
            SelectionRequest::new("solution", "AI tutor").unwrap(),
            "name the product",
            "an AI tutor for everyone",
        )
        .unwrap();

        // the first annotation's badge is unchanged by later additions
        assert_eq!(set.badge_of(&first), Some(1));
    }

    #[test]
    fn dropping_a_selection_commits_nothing() {
        let mut set = AnnotationSet::new();
        {
            let _pending = SelectionRequest::new("vision", "educators").unwrap();
            // user cancels: the request goes out of scope unresolved
        }
        assert!(set.is_empty());
        set.commit(
            SelectionRequest::new("vision", "educators").unwrap(),
            "ok",
            "educators",
        )
        .unwrap();
        assert_eq!(set.len(), 1);
    }
}
