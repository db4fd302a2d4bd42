//! Document domain models.
//!
//! A document is the structured record being co-authored: either a
//! startup-project manifest or a personal talent profile. Fields start
//! empty and are filled incrementally by the extraction engine's merge
//! step; a field that has received a value is never implicitly cleared.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two kinds of co-authored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Startup-project manifest
    Project,
    /// Personal talent profile
    Profile,
}

/// Identity fields of an authenticated user, used to seed a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySeed {
    pub name: String,
    pub avatar: String,
    pub bio: String,
}

/// A startup-project manifest.
///
/// All fields default to empty; `talent_needs` is the only array-valued
/// field and is replaced wholesale by merges, never concatenated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDocument {
    pub name: String,
    pub one_liner: String,
    pub sector: String,
    pub location: String,
    pub stage: String,
    pub vision: String,
    pub problem: String,
    pub solution: String,
    pub talent_needs: Vec<String>,
    pub product_highlights: String,
    pub target_audience: String,
    pub business_model: String,
    pub differentiation: String,
    pub market_size: String,
    pub team_members: String,
    pub why_now: String,
    pub long_term_moat: String,
    pub roadmap_finance: String,
    pub others: String,
}

/// A personal talent profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDocument {
    pub name: String,
    pub title: String,
    pub location: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub experience_highlights: String,
    pub education: String,
    pub looking_for: String,
    pub superpower: String,
    pub others: String,
    pub avatar: String,
}

impl ProfileDocument {
    /// Creates a profile pre-filled with the authenticated user's identity.
    pub fn seeded(seed: &IdentitySeed) -> Self {
        Self {
            name: seed.name.clone(),
            avatar: seed.avatar.clone(),
            bio: seed.bio.clone(),
            ..Self::default()
        }
    }
}

/// The document value owned by one co-authoring session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Project(ProjectDocument),
    Profile(ProfileDocument),
}

impl Document {
    /// Creates an empty document of the given kind.
    pub fn new(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Project => Self::Project(ProjectDocument::default()),
            DocumentKind::Profile => Self::Profile(ProfileDocument::default()),
        }
    }

    /// Creates a document seeded with the user's identity fields.
    ///
    /// Only profiles carry identity fields; a project manifest starts
    /// empty regardless of the seed.
    pub fn seeded(kind: DocumentKind, seed: &IdentitySeed) -> Self {
        match kind {
            DocumentKind::Project => Self::Project(ProjectDocument::default()),
            DocumentKind::Profile => Self::Profile(ProfileDocument::seeded(seed)),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Project(_) => DocumentKind::Project,
            Self::Profile(_) => DocumentKind::Profile,
        }
    }

    /// Returns the current text of a scalar-string field by wire name.
    ///
    /// Array-valued fields (`talentNeeds`, `skills`) and unknown names
    /// return `None`; they are not annotatable text.
    pub fn field_text(&self, field: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        match value.get(field) {
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        }
    }
}
