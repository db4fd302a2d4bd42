//! Highlight decoration over rendered field text.
//!
//! Re-renders a field's text as a deterministic sequence of plain and
//! highlighted segments. Orphaned annotations (whose selected text no
//! longer occurs in the field) produce no highlight but stay in the
//! collection.

use serde::{Deserialize, Serialize};

use super::model::AnnotationSet;

/// One piece of a rendered field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Text outside any highlight.
    Plain(String),
    /// A highlighted span carrying its annotation's stable badge number
    /// and comment.
    Highlight {
        text: String,
        badge: usize,
        comment: String,
    },
}

/// Renders `text` with non-overlapping highlights for every live
/// annotation on `field`.
///
/// Matching annotations are ordered by the offset of the first occurrence
/// of their selected text (creation order on ties) and consumed left to
/// right; an annotation whose text only occurs inside an already consumed
/// span is skipped, so highlighted spans never overlap. The badge number
/// is the annotation's position in the global collection plus one, not
/// its position in the per-field ordering.
pub fn render_with_highlights(field: &str, text: &str, annotations: &AnnotationSet) -> Vec<Segment> {
    let mut eligible: Vec<(usize, &super::model::Annotation)> = annotations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.field == field && text.contains(&a.selected_text))
        .collect();
    // stable sort keeps creation order for equal offsets
    eligible.sort_by_key(|(_, a)| text.find(&a.selected_text).unwrap_or(usize::MAX));

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (global_index, annotation) in eligible {
        let Some(found) = text[cursor..].find(&annotation.selected_text) else {
            // already consumed by an earlier, overlapping annotation
            continue;
        };
        let start = cursor + found;
        if start > cursor {
            segments.push(Segment::Plain(text[cursor..start].to_string()));
        }
        segments.push(Segment::Highlight {
            text: annotation.selected_text.clone(),
            badge: global_index + 1,
            comment: annotation.comment.clone(),
        });
        cursor = start + annotation.selected_text.len();
    }
    if cursor < text.len() {
        segments.push(Segment::Plain(text[cursor..].to_string()));
    }
    segments
}
