/// A listed property.
///
/// # Actor Framework
/// Implements [`ActorEntity`](crate::framework::ActorEntity) (see
/// `property_actor::entity`), so it is stored by a
/// [`ResourceActor`](crate::framework::ResourceActor).
///
/// Images are embedded: deleting a property deletes its images with it. This
/// is the opposite of location deletion, which leaves children in place.
use crate::model::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub u64);

impl From<u64> for PropertyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "property_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub url: String,
    pub caption: Option<String>,
    pub primary: bool,
}

impl PropertyImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            primary: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    /// Free-text address as entered by the owner.
    pub location: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<f64>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub images: Vec<PropertyImage>,
}

impl Property {
    /// Creates a property with only the required fields set.
    pub fn new(
        id: PropertyId,
        owner_id: UserId,
        title: impl Into<String>,
        price: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner_id,
            title: title.into(),
            description: None,
            price,
            location: location.into(),
            bedrooms: None,
            bathrooms: None,
            area: None,
            property_type: None,
            listing_type: None,
            images: Vec::new(),
        }
    }
}

/// Payload for creating a property. `owner_id` is overwritten with the
/// requesting principal when the create goes through the gatekeeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCreate {
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub location: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<f64>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
}

impl PropertyCreate {
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        price: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            title: title.into(),
            description: None,
            price,
            location: location.into(),
            bedrooms: None,
            bathrooms: None,
            area: None,
            property_type: None,
            listing_type: None,
        }
    }
}

/// Partial update. Ownership cannot be changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<f64>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
}
