//! Crate-level error returned by the [`Gatekeeper`](crate::gatekeeper::Gatekeeper).
//!
//! Folds the per-actor errors into the kinds a caller can act on. Transport
//! failures end up as `Unavailable`, which is never the caller's fault.

use crate::location_actor::LocationError;
use crate::policy::{DecisionReason, LookupError, PolicyDecision, ResourceRef};
use crate::property_actor::PropertyError;
use crate::review_actor::ReviewError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// Turns a denying decision into the matching error kind.
    pub fn denied(decision: PolicyDecision, target: ResourceRef) -> Self {
        match decision.reason {
            DecisionReason::Unauthenticated => ServiceError::Unauthenticated,
            DecisionReason::NotFound => ServiceError::NotFound(target.to_string()),
            _ => ServiceError::Forbidden(format!("{target}: {decision}")),
        }
    }
}

impl From<LocationError> for ServiceError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::NotFound(id) => ServiceError::NotFound(id.to_string()),
            LocationError::InvalidOperation(msg) => ServiceError::InvalidOperation(msg),
            LocationError::Validation(v) => ServiceError::Validation(v),
            LocationError::ActorCommunicationError(msg) => ServiceError::Unavailable(msg),
        }
    }
}

impl From<PropertyError> for ServiceError {
    fn from(e: PropertyError) -> Self {
        match e {
            PropertyError::NotFound(id) => ServiceError::NotFound(id),
            PropertyError::Validation(v) => ServiceError::Validation(v),
            e @ PropertyError::ImageNotFound { .. } => ServiceError::NotFound(e.to_string()),
            PropertyError::ActorCommunicationError(msg) => ServiceError::Unavailable(msg),
        }
    }
}

impl From<ReviewError> for ServiceError {
    fn from(e: ReviewError) -> Self {
        match e {
            ReviewError::NotFound(id) => ServiceError::NotFound(id),
            ReviewError::Validation(v) => ServiceError::Validation(v),
            ReviewError::PropertyNotFound(id) => ServiceError::NotFound(id.to_string()),
            ReviewError::ActorCommunicationError(msg) => ServiceError::Unavailable(msg),
        }
    }
}

impl From<LookupError> for ServiceError {
    fn from(e: LookupError) -> Self {
        ServiceError::Unavailable(e.to_string())
    }
}
