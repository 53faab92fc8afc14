//! Owner lookup for policy checks.
//!
//! The evaluator never touches the stores directly. It asks a
//! [`ResourceLookup`] for the ownership projection of a resource, which in the
//! running system is answered by the property and review actors through
//! [`ClientLookup`].

use super::evaluator::ResourceKind;
use crate::clients::{PropertyClient, ReviewClient};
use crate::framework::ActorClient;
use crate::model::{Property, PropertyId, Review, ReviewId, UserId};
use async_trait::async_trait;
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, instrument};

/// A resource a policy decision is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRef {
    Property(PropertyId),
    Review(ReviewId),
}

impl ResourceRef {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Property(_) => ResourceKind::Property,
            ResourceRef::Review(_) => ResourceKind::Review,
        }
    }
}

impl Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceRef::Property(id) => id.fmt(f),
            ResourceRef::Review(id) => id.fmt(f),
        }
    }
}

/// What the policy needs to know about a resource.
///
/// `property_id` is set for reviews and opens the second ownership path: the
/// owner of the reviewed property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedResource {
    pub target: ResourceRef,
    pub owner_id: UserId,
    pub property_id: Option<PropertyId>,
}

impl From<&Property> for OwnedResource {
    fn from(property: &Property) -> Self {
        Self {
            target: ResourceRef::Property(property.id),
            owner_id: property.owner_id,
            property_id: None,
        }
    }
}

impl From<&Review> for OwnedResource {
    fn from(review: &Review) -> Self {
        Self {
            target: ResourceRef::Review(review.id),
            owner_id: review.owner_id,
            property_id: Some(review.property_id),
        }
    }
}

/// The owning store could not answer. Never turned into an allow or deny.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("owner lookup for {target} failed: {reason}")]
pub struct LookupError {
    pub target: ResourceRef,
    pub reason: String,
}

#[async_trait]
pub trait ResourceLookup: Send + Sync {
    /// `Ok(None)` when the resource does not exist.
    async fn find_owner_of(&self, target: ResourceRef) -> Result<Option<OwnedResource>, LookupError>;
}

/// [`ResourceLookup`] backed by the property and review actors.
#[derive(Clone)]
pub struct ClientLookup {
    properties: PropertyClient,
    reviews: ReviewClient,
}

impl ClientLookup {
    pub fn new(properties: PropertyClient, reviews: ReviewClient) -> Self {
        Self {
            properties,
            reviews,
        }
    }
}

#[async_trait]
impl ResourceLookup for ClientLookup {
    #[instrument(skip(self))]
    async fn find_owner_of(&self, target: ResourceRef) -> Result<Option<OwnedResource>, LookupError> {
        let unavailable = |reason: String| LookupError { target, reason };
        let found = match target {
            ResourceRef::Property(id) => self
                .properties
                .get(id)
                .await
                .map_err(|e| unavailable(e.to_string()))?
                .as_ref()
                .map(OwnedResource::from),
            ResourceRef::Review(id) => self
                .reviews
                .get(id)
                .await
                .map_err(|e| unavailable(e.to_string()))?
                .as_ref()
                .map(OwnedResource::from),
        };
        debug!(found = found.is_some(), "Owner lookup");
        Ok(found)
    }
}
