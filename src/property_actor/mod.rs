//! Property resource logic, including the embedded image gallery.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PropertyClient;
use crate::framework::ResourceActor;
use crate::model::Property;

/// Creates a new Property actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Property>, PropertyClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = PropertyClient::new(generic_client);

    (actor, client)
}
