//! Plain data types: the location tree nodes, the owner-bearing resources
//! managed by [`ResourceActor`](crate::framework::ResourceActor), and the
//! principal that acts on them.

pub mod location;
pub mod property;
pub mod review;
pub mod user;

pub use location::*;
pub use property::*;
pub use review::*;
pub use user::*;
