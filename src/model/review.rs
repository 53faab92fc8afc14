/// A review left by a user on a property.
///
/// A review has two owners for policy purposes: its author (`owner_id`) and,
/// through `property_id`, the owner of the reviewed property.
use crate::model::{PropertyId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub u64);

impl From<u64> for ReviewId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "review_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    /// The author.
    pub owner_id: UserId,
    pub property_id: PropertyId,
    pub rating: u8,
    pub comment: Option<String>,
}

/// Payload for creating a review. `author_id` is overwritten with the
/// requesting principal when the create goes through the gatekeeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub author_id: UserId,
    pub property_id: PropertyId,
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}
