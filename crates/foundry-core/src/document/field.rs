//! Field-key enumerations for the two document kinds.
//!
//! Every document field the extraction agent may populate is named here.
//! The wire names (camelCase) are the keys used in partial updates and in
//! the serialized document itself.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Fields of a startup-project manifest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProjectField {
    Name,
    OneLiner,
    Sector,
    Location,
    Stage,
    Vision,
    Problem,
    Solution,
    TalentNeeds,
    ProductHighlights,
    TargetAudience,
    BusinessModel,
    Differentiation,
    MarketSize,
    TeamMembers,
    WhyNow,
    LongTermMoat,
    RoadmapFinance,
    Others,
}

/// Fields of a personal talent profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProfileField {
    Name,
    Title,
    Location,
    Bio,
    Skills,
    ExperienceHighlights,
    Education,
    LookingFor,
    Superpower,
    Others,
    Avatar,
}

impl ProjectField {
    /// Returns the wire name of this field (e.g. `oneLiner`).
    pub fn wire_name(self) -> &'static str {
        self.into()
    }

    /// Returns the wire names of every project field.
    pub fn all_wire_names() -> Vec<&'static str> {
        Self::iter().map(Self::wire_name).collect()
    }
}

impl ProfileField {
    /// Returns the wire name of this field (e.g. `lookingFor`).
    pub fn wire_name(self) -> &'static str {
        self.into()
    }

    /// Returns the wire names of every profile field.
    pub fn all_wire_names() -> Vec<&'static str> {
        Self::iter().map(Self::wire_name).collect()
    }
}
