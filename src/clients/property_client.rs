//! # Property Client
//!
//! High-level API for the `Property` actor. Wraps a `ResourceClient<Property>`
//! and unpacks image action results into plain return types.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Property, PropertyCreate, PropertyId, PropertyImage, PropertyUpdate};
use crate::property_actor::{PropertyAction, PropertyActionResult, PropertyError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Property actor.
#[derive(Clone)]
pub struct PropertyClient {
    inner: ResourceClient<Property>,
}

impl PropertyClient {
    pub fn new(inner: ResourceClient<Property>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Property> for PropertyClient {
    type Error = PropertyError;

    fn inner(&self) -> &ResourceClient<Property> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => PropertyError::NotFound(id),
            other => other
                .into_entity_error::<PropertyError>()
                .unwrap_or_else(|e| PropertyError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl PropertyClient {
    /// Stores a new property. Bypasses the policy check; see
    /// [`Gatekeeper`](crate::gatekeeper::Gatekeeper) for the guarded path.
    #[instrument(skip(self))]
    pub async fn create_property(&self, params: PropertyCreate) -> Result<PropertyId, PropertyError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_property(
        &self,
        id: PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, PropertyError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn act(
        &self,
        id: PropertyId,
        action: PropertyAction,
    ) -> Result<PropertyActionResult, PropertyError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Appends an image and returns its position.
    #[instrument(skip(self))]
    pub async fn add_image(&self, id: PropertyId, image: PropertyImage) -> Result<usize, PropertyError> {
        debug!("Adding image");
        match self.act(id, PropertyAction::AddImage(image)).await? {
            PropertyActionResult::AddImage(index) => Ok(index),
            _ => unreachable!("AddImage action must return AddImage result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_image(&self, id: PropertyId, index: usize) -> Result<PropertyImage, PropertyError> {
        debug!("Removing image");
        match self.act(id, PropertyAction::RemoveImage(index)).await? {
            PropertyActionResult::RemoveImage(image) => Ok(image),
            _ => unreachable!("RemoveImage action must return RemoveImage result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_primary_image(&self, id: PropertyId, index: usize) -> Result<(), PropertyError> {
        debug!("Setting primary image");
        match self.act(id, PropertyAction::SetPrimaryImage(index)).await? {
            PropertyActionResult::SetPrimaryImage(()) => Ok(()),
            _ => unreachable!("SetPrimaryImage action must return SetPrimaryImage result"),
        }
    }

    pub async fn list_images(&self, id: PropertyId) -> Result<Vec<PropertyImage>, PropertyError> {
        match self.act(id, PropertyAction::ListImages).await? {
            PropertyActionResult::ListImages(images) => Ok(images),
            _ => unreachable!("ListImages action must return ListImages result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::create_mock_client;
    use crate::framework::ResourceRequest;
    use crate::validation::ValidationError;

    #[tokio::test]
    async fn test_add_image_returns_position() {
        let (client, mut receiver) = create_mock_client::<Property>(10);
        let property_client = PropertyClient::new(client);

        let add_task = tokio::spawn(async move {
            property_client
                .add_image(PropertyId(1), PropertyImage::new("front.jpg"))
                .await
        });

        let Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) = receiver.recv().await
        else {
            panic!("Expected Action request");
        };
        assert_eq!(id, PropertyId(1));
        assert!(matches!(action, PropertyAction::AddImage(ref image) if image.url == "front.jpg"));
        respond_to.send(Ok(PropertyActionResult::AddImage(2))).unwrap();

        assert_eq!(add_task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_entity_error_keeps_its_kind() {
        let (client, mut receiver) = create_mock_client::<Property>(10);
        let property_client = PropertyClient::new(client);

        let update_task = tokio::spawn(async move {
            property_client
                .update_property(
                    PropertyId(1),
                    PropertyUpdate {
                        price: Some(-1.0),
                        ..Default::default()
                    },
                )
                .await
        });

        let Some(ResourceRequest::Update { respond_to, .. }) = receiver.recv().await else {
            panic!("Expected Update request");
        };
        let rejection = PropertyError::Validation(ValidationError::new("price", "must be greater than zero"));
        respond_to
            .send(Err(FrameworkError::EntityError(Box::new(rejection.clone()))))
            .unwrap();

        assert_eq!(update_task.await.unwrap().unwrap_err(), rejection);
    }

    #[tokio::test]
    async fn test_missing_property_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Property>(10);
        let property_client = PropertyClient::new(client);

        let delete_task = tokio::spawn(async move { property_client.delete(PropertyId(8)).await });

        let Some(ResourceRequest::Delete { respond_to, .. }) = receiver.recv().await else {
            panic!("Expected Delete request");
        };
        respond_to
            .send(Err(FrameworkError::NotFound(PropertyId(8).to_string())))
            .unwrap();

        assert_eq!(
            delete_task.await.unwrap().unwrap_err(),
            PropertyError::NotFound("property_8".to_string())
        );
    }

    #[tokio::test]
    async fn test_closed_actor_is_communication_error() {
        let (client, receiver) = create_mock_client::<Property>(10);
        drop(receiver);
        let err = PropertyClient::new(client)
            .list_images(PropertyId(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PropertyError::ActorCommunicationError(_)));
    }
}
