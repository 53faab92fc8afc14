//! # Review Actor
//!
//! Stores reviews. Its context is a [`PropertyClient`](crate::clients::PropertyClient),
//! so it must be started after the property actor and it keeps that actor
//! alive until it shuts down itself.
//!
//! ```rust,ignore
//! let (property_actor, property_client) = property_actor::new(32);
//! let (review_actor, review_client) = review_actor::new(32);
//! tokio::spawn(property_actor.run(()));
//! tokio::spawn(review_actor.run(property_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ReviewClient;
use crate::framework::ResourceActor;
use crate::model::Review;

/// Creates a new Review actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Review>, ReviewClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = ReviewClient::new(generic_client);

    (actor, client)
}
