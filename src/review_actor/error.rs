//! Error types for the Review actor.

use crate::model::PropertyId;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    /// The requested review was not found.
    #[error("Review not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The review points at a property that does not exist.
    #[error("Reviewed property not found: {0}")]
    PropertyNotFound(PropertyId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
