//! # Gatekeeper
//!
//! The guarded entry point for mutating properties and reviews.
//!
//! Every mutation runs the same pipeline:
//!
//! 1. validate the payload (a malformed request is a `Validation` error even
//!    for a caller who would also be forbidden)
//! 2. resolve the principal from the [`IdentityContext`]
//! 3. evaluate the policy for the target
//! 4. forward to the resource client
//!
//! A denial stops the request before the resource actor sees it.
//!
//! Creates need no ownership check. They only require a principal, who
//! becomes the owner regardless of what the payload says.

use crate::clients::{PropertyClient, ReviewClient};
use crate::error::ServiceError;
use crate::framework::ActorClient;
use crate::model::{
    Principal, Property, PropertyCreate, PropertyId, PropertyUpdate, Review, ReviewCreate, ReviewId,
    ReviewUpdate,
};
use crate::policy::{IdentityContext, Operation, PolicyEvaluator, ResourceLookup, ResourceRef};
use crate::validation::{
    validate_property, validate_property_update, validate_review, validate_review_update,
};
use tracing::{debug, info, instrument};

pub struct Gatekeeper<I, L> {
    identity: I,
    policy: PolicyEvaluator<L>,
    properties: PropertyClient,
    reviews: ReviewClient,
}

impl<I: IdentityContext, L: ResourceLookup> Gatekeeper<I, L> {
    pub fn new(identity: I, lookup: L, properties: PropertyClient, reviews: ReviewClient) -> Self {
        Self {
            identity,
            policy: PolicyEvaluator::new(lookup),
            properties,
            reviews,
        }
    }

    fn principal(&self) -> Result<Principal, ServiceError> {
        self.identity.current().ok_or(ServiceError::Unauthenticated)
    }

    async fn authorize(&self, operation: Operation, target: ResourceRef) -> Result<(), ServiceError> {
        let principal = self.identity.current();
        let decision = self
            .policy
            .evaluate(principal.as_ref(), operation, target)
            .await?;
        if decision.allowed {
            Ok(())
        } else {
            Err(ServiceError::denied(decision, target))
        }
    }

    #[instrument(skip(self, params))]
    pub async fn create_property(&self, mut params: PropertyCreate) -> Result<PropertyId, ServiceError> {
        validate_property(&params)?;
        let principal = self.principal()?;
        params.owner_id = principal.id;
        let id = self.properties.create_property(params).await?;
        info!(%id, owner = %principal.id, "Property listed");
        Ok(id)
    }

    #[instrument(skip(self, update))]
    pub async fn update_property(
        &self,
        id: PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, ServiceError> {
        validate_property_update(&update)?;
        self.authorize(Operation::Update, ResourceRef::Property(id)).await?;
        debug!("Forwarding update");
        Ok(self.properties.update_property(id, update).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_property(&self, id: PropertyId) -> Result<(), ServiceError> {
        self.authorize(Operation::Delete, ResourceRef::Property(id)).await?;
        debug!("Forwarding delete");
        Ok(self.properties.delete(id).await?)
    }

    #[instrument(skip(self, params))]
    pub async fn create_review(&self, mut params: ReviewCreate) -> Result<ReviewId, ServiceError> {
        validate_review(&params)?;
        let principal = self.principal()?;
        params.author_id = principal.id;
        let id = self.reviews.create_review(params).await?;
        info!(%id, author = %principal.id, "Review posted");
        Ok(id)
    }

    #[instrument(skip(self, update))]
    pub async fn update_review(&self, id: ReviewId, update: ReviewUpdate) -> Result<Review, ServiceError> {
        validate_review_update(&update)?;
        self.authorize(Operation::Update, ResourceRef::Review(id)).await?;
        debug!("Forwarding update");
        Ok(self.reviews.update_review(id, update).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), ServiceError> {
        self.authorize(Operation::Delete, ResourceRef::Review(id)).await?;
        debug!("Forwarding delete");
        Ok(self.reviews.delete(id).await?)
    }
}
