//! # ActorEntity Trait
//!
//! The contract every owner-bearing resource (Property, Review) implements so a
//! generic [`ResourceActor`](crate::framework::ResourceActor) can store it and
//! serve CRUD + Action requests for it.
//!
//! Hooks run inside the actor task, one request at a time, so an entity never
//! observes a concurrent mutation of itself.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Associated Types
/// The associated types pin every payload to its resource: a `Review` actor only
/// accepts `ReviewCreate`, so a property payload can never reach it.
///
/// # Context
/// `Context` is injected through `run()` rather than `new()`. The review actor
/// uses it to hold a `PropertyClient` so it can check that the reviewed property
/// exists before a review is stored.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier type. Built from the actor's `u64` sequence.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u64>;

    /// Creation payload.
    type Create: Send + Sync + Debug;

    /// Partial update payload.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AddImage`).
    type Action: Send + Sync + Debug;

    /// Result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` when there are none.
    type Context: Send + Sync;

    /// Per-resource error type.
    ///
    /// The actor boxes it into [`FrameworkError::EntityError`](crate::framework::FrameworkError)
    /// and the typed client recovers it with `into_entity_error`, so validation
    /// failures stay distinguishable from transport failures end to end.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its freshly allocated id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a partial update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the entity is removed. Returning an error keeps it stored.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
