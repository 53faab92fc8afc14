//! Error types for the Location actor.

use crate::model::LocationId;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur during location operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    /// The referenced location (node or prospective parent) does not exist.
    #[error("Location not found: {0}")]
    NotFound(LocationId),

    /// The change would break the tree, e.g. by introducing a cycle.
    #[error("Invalid location operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
