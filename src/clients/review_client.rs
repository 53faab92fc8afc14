use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Review, ReviewCreate, ReviewId, ReviewUpdate};
use crate::review_actor::ReviewError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Review actor.
///
/// The check that the reviewed property exists happens in the Review actor's
/// `on_create` hook.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
}

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<ReviewId, ReviewError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_review(&self, id: ReviewId, update: ReviewUpdate) -> Result<Review, ReviewError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &ResourceClient<Review> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ReviewError::NotFound(id),
            other => other
                .into_entity_error::<ReviewError>()
                .unwrap_or_else(|e| ReviewError::ActorCommunicationError(e.to_string())),
        }
    }
}
