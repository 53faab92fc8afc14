//! Ownership-based authorization.
//!
//! - [`identity`] - who is asking
//! - [`lookup`] - who owns the target
//! - [`evaluator`] - the ordered rule tables that turn the two into a
//!   [`PolicyDecision`]

pub mod evaluator;
pub mod identity;
pub mod lookup;

pub use evaluator::*;
pub use identity::*;
pub use lookup::*;
