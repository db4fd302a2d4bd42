//! Document store: the structured record being co-authored.

pub mod field;
pub mod merge;
pub mod model;
pub mod update;

pub use field::{ProfileField, ProjectField};
pub use model::{Document, DocumentKind, IdentitySeed, ProfileDocument, ProjectDocument};
pub use update::PartialUpdate;
