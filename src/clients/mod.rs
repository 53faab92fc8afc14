//! Type-safe wrappers around the actor channels.
//!
//! [`PropertyClient`] and [`ReviewClient`] wrap a generic
//! [`ResourceClient`](crate::framework::ResourceClient) and pick up `get` and
//! `delete` from [`ActorClient`](crate::framework::ActorClient).
//! [`LocationClient`] talks to the dedicated location actor.

pub mod location_client;
pub mod property_client;
pub mod review_client;

pub use location_client::*;
pub use property_client::*;
pub use review_client::*;
