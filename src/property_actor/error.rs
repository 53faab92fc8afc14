//! Error types for the Property actor.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur during property operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PropertyError {
    /// The requested property was not found.
    #[error("Property not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An image action referenced a position past the end of the gallery.
    #[error("Image {index} not found ({count} images)")]
    ImageNotFound { index: usize, count: usize },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
