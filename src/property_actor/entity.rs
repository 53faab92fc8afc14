//! [`ActorEntity`] implementation for [`Property`].
//!
//! Payloads are validated again here even though the gatekeeper already checked
//! them, so a client that talks to the actor directly cannot store a property
//! the gatekeeper would have refused.

use super::actions::{PropertyAction, PropertyActionResult};
use super::error::PropertyError;
use crate::framework::ActorEntity;
use crate::model::{Property, PropertyCreate, PropertyId, PropertyUpdate};
use crate::validation::{validate_property, validate_property_update};
use async_trait::async_trait;
use tracing::info;

impl Property {
    fn image_index(&self, index: usize) -> Result<usize, PropertyError> {
        if index < self.images.len() {
            Ok(index)
        } else {
            Err(PropertyError::ImageNotFound {
                index,
                count: self.images.len(),
            })
        }
    }

    fn clear_primary(&mut self) {
        for image in &mut self.images {
            image.primary = false;
        }
    }
}

#[async_trait]
impl ActorEntity for Property {
    type Id = PropertyId;
    type Create = PropertyCreate;
    type Update = PropertyUpdate;
    type Action = PropertyAction;
    type ActionResult = PropertyActionResult;
    type Context = ();
    type Error = PropertyError;

    fn from_create_params(id: PropertyId, params: PropertyCreate) -> Result<Self, PropertyError> {
        validate_property(&params)?;
        let mut property = Property::new(id, params.owner_id, params.title, params.price, params.location);
        property.description = params.description;
        property.bedrooms = params.bedrooms;
        property.bathrooms = params.bathrooms;
        property.area = params.area;
        property.property_type = params.property_type;
        property.listing_type = params.listing_type;
        Ok(property)
    }

    /// Applies the fields present in the update. The owner never changes.
    async fn on_update(&mut self, update: PropertyUpdate, _ctx: &()) -> Result<(), PropertyError> {
        validate_property_update(&update)?;
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(bedrooms) = update.bedrooms {
            self.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = update.bathrooms {
            self.bathrooms = Some(bathrooms);
        }
        if let Some(area) = update.area {
            self.area = Some(area);
        }
        if let Some(property_type) = update.property_type {
            self.property_type = Some(property_type);
        }
        if let Some(listing_type) = update.listing_type {
            self.listing_type = Some(listing_type);
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), PropertyError> {
        info!(id = %self.id, images = self.images.len(), "Dropping property images");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PropertyAction,
        _ctx: &(),
    ) -> Result<PropertyActionResult, PropertyError> {
        match action {
            PropertyAction::AddImage(image) => {
                if image.primary {
                    self.clear_primary();
                }
                self.images.push(image);
                Ok(PropertyActionResult::AddImage(self.images.len() - 1))
            }
            PropertyAction::RemoveImage(index) => {
                let index = self.image_index(index)?;
                Ok(PropertyActionResult::RemoveImage(self.images.remove(index)))
            }
            PropertyAction::SetPrimaryImage(index) => {
                let index = self.image_index(index)?;
                self.clear_primary();
                self.images[index].primary = true;
                Ok(PropertyActionResult::SetPrimaryImage(()))
            }
            PropertyAction::ListImages => Ok(PropertyActionResult::ListImages(self.images.clone())),
        }
    }
}
