//! [`ActorEntity`] implementation for [`Review`].
//!
//! The review actor runs with a [`PropertyClient`] as its context and refuses
//! to store a review for a property that does not exist.

use super::error::ReviewError;
use crate::clients::PropertyClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{Review, ReviewCreate, ReviewId, ReviewUpdate};
use crate::validation::{validate_review, validate_review_update};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = PropertyClient;
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, ReviewError> {
        validate_review(&params)?;
        Ok(Review {
            id,
            owner_id: params.author_id,
            property_id: params.property_id,
            rating: params.rating,
            comment: params.comment,
        })
    }

    async fn on_create(&mut self, properties: &PropertyClient) -> Result<(), ReviewError> {
        debug!(review = %self.id, property = %self.property_id, "Checking reviewed property");
        match properties.get(self.property_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ReviewError::PropertyNotFound(self.property_id)),
            Err(e) => Err(ReviewError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(
        &mut self,
        update: ReviewUpdate,
        _properties: &PropertyClient,
    ) -> Result<(), ReviewError> {
        validate_review_update(&update)?;
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(comment) = update.comment {
            self.comment = Some(comment);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _properties: &PropertyClient) -> Result<(), ReviewError> {
        Ok(())
    }
}
