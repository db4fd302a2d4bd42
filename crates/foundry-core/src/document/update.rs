//! Sparse partial updates produced by the extraction agent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FoundryError, Result};

/// A sparse update naming only the document fields extracted from the
/// latest conversation turn.
///
/// Keys are wire names (camelCase). A `PartialUpdate` decoded from a model
/// response must be built through [`PartialUpdate::validated`] so that a
/// key outside the persona's permitted field set is rejected as a
/// malformed response instead of being silently merged or dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialUpdate(Map<String, Value>);

impl PartialUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a raw update object against a permitted field list.
    pub fn validated(fields: Map<String, Value>, permitted: &[&'static str]) -> Result<Self> {
        for key in fields.keys() {
            if !permitted.iter().any(|name| *name == key.as_str()) {
                return Err(FoundryError::malformed_response(format!(
                    "update names a field outside the persona's set: '{key}'"
                )));
            }
        }
        Ok(Self(fields))
    }

    /// Inserts a field value. For trusted internal writers (e.g. the
    /// avatar finalize path); model output goes through `validated`.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> &mut Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
