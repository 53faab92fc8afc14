//! Generic resource actor framework.
//!
//! A [`ResourceActor`] owns a key-indexed store for one resource type and
//! serves CRUD + Action requests sent by cloned [`ResourceClient`]s. Properties
//! and reviews run on it; the location tree has a dedicated actor because its
//! operations span the whole store.
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
