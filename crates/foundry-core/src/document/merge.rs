//! Shallow override merge of partial updates into documents.
//!
//! For every key present in the update, the document's value is replaced
//! wholesale; array-valued fields are replaced, not concatenated. Keys
//! absent from the update are left untouched, so previously captured
//! information survives unless the update explicitly supplies an empty
//! value.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::model::Document;
use super::update::PartialUpdate;
use crate::error::{FoundryError, Result};

impl Document {
    /// Applies a partial update, returning the merged document.
    ///
    /// A value whose type does not match the target field (e.g. a string
    /// where an array is expected) fails the whole merge as a malformed
    /// response; the merge is all-or-nothing for a turn.
    pub fn merge(&self, update: &PartialUpdate) -> Result<Document> {
        match self {
            Self::Project(doc) => Ok(Self::Project(merge_fields(doc, update)?)),
            Self::Profile(doc) => Ok(Self::Profile(merge_fields(doc, update)?)),
        }
    }
}

fn merge_fields<T>(document: &T, update: &PartialUpdate) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(document)?;
    let Value::Object(fields) = &mut value else {
        return Err(FoundryError::internal("document did not serialize to an object"));
    };
    for (key, incoming) in update.entries() {
        fields.insert(key.clone(), incoming.clone());
    }
    serde_json::from_value(value).map_err(|err| {
        FoundryError::malformed_response(format!("update value has the wrong type: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::DocumentKind;
    use serde_json::json;

    fn update_of(value: Value) -> PartialUpdate {
        let mut update = PartialUpdate::new();
        if let Value::Object(map) = value {
            for (key, val) in map {
                update.insert(key, val);
            }
        }
        update
    }

    #[test]
    fn merge_overrides_present_keys_and_keeps_absent_ones() {
        let doc = Document::new(DocumentKind::Project);
        let merged = doc
            .merge(&update_of(json!({
                "name": "Nebula AI",
                "talentNeeds": ["CTO"]
            })))
            .unwrap();

        assert_eq!(merged.field_text("name").as_deref(), Some("Nebula AI"));
        assert_eq!(merged.field_text("sector").as_deref(), Some(""));
        let Document::Project(project) = &merged else {
            panic!("kind changed by merge");
        };
        assert_eq!(project.talent_needs, vec!["CTO".to_string()]);
    }

    #[test]
    fn merge_replaces_arrays_wholesale() {
        let doc = Document::new(DocumentKind::Project)
            .merge(&update_of(json!({"talentNeeds": ["CTO", "Lead AI Engineer"]})))
            .unwrap();
        let merged = doc
            .merge(&update_of(json!({"talentNeeds": ["Sales Director"]})))
            .unwrap();

        let Document::Project(project) = &merged else {
            panic!("kind changed by merge");
        };
        assert_eq!(project.talent_needs, vec!["Sales Director".to_string()]);
    }

    #[test]
    fn merge_is_idempotent() {
        let doc = Document::new(DocumentKind::Profile);
        let update = update_of(json!({
            "title": "Senior Engineer",
            "skills": ["Rust", "Distributed Systems"]
        }));

        let once = doc.merge(&update).unwrap();
        let twice = once.merge(&update).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_clears_only_on_explicit_empty() {
        let doc = Document::new(DocumentKind::Project)
            .merge(&update_of(json!({"vision": "Empower educators."})))
            .unwrap();

        let untouched = doc.merge(&update_of(json!({"stage": "Seed"}))).unwrap();
        assert_eq!(untouched.field_text("vision").as_deref(), Some("Empower educators."));

        let cleared = doc.merge(&update_of(json!({"vision": ""}))).unwrap();
        assert_eq!(cleared.field_text("vision").as_deref(), Some(""));
    }

    #[test]
    fn merge_rejects_type_mismatch() {
        let doc = Document::new(DocumentKind::Project);
        let err = doc
            .merge(&update_of(json!({"talentNeeds": "CTO"})))
            .unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn merge_scenario_from_empty_manifest() {
        let doc = Document::new(DocumentKind::Project);
        let merged = doc
            .merge(&update_of(json!({
                "name": "Nebula AI",
                "talentNeeds": ["CTO"]
            })))
            .unwrap();

        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["name"], json!("Nebula AI"));
        assert_eq!(value["sector"], json!(""));
        assert_eq!(value["talentNeeds"], json!(["CTO"]));
    }
}
