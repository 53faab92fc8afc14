//! Where the requesting principal comes from.
//!
//! Token verification happens outside this crate; by the time a request gets
//! here it either carries an authenticated [`Principal`] or nothing.

use crate::model::Principal;
use std::sync::Arc;

/// Supplies the authenticated principal for the current request.
pub trait IdentityContext: Send + Sync {
    fn current(&self) -> Option<Principal>;
}

/// A fixed identity, captured once per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestIdentity(Option<Principal>);

impl RequestIdentity {
    pub fn authenticated(principal: Principal) -> Self {
        Self(Some(principal))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityContext for RequestIdentity {
    fn current(&self) -> Option<Principal> {
        self.0
    }
}

impl<T: IdentityContext + ?Sized> IdentityContext for Arc<T> {
    fn current(&self) -> Option<Principal> {
        (**self).current()
    }
}
