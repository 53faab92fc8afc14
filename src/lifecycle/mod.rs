//! # System Lifecycle
//!
//! [`ListingSystem`] creates the actors, injects their dependencies through
//! `run(context)` and shuts them down by dropping every client and awaiting
//! the tasks.
//!
//! ```rust,ignore
//! let (location_actor, location_client) = location_actor::new(32, GeoIndex::default());
//! let (property_actor, property_client) = property_actor::new(32);
//! let (review_actor, review_client) = review_actor::new(32);
//!
//! tokio::spawn(location_actor.run());
//! tokio::spawn(property_actor.run(()));
//! tokio::spawn(review_actor.run(property_client.clone()));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, including the ones held by gatekeepers
//! 2. Each actor's `recv()` returns `None` once its last sender is gone
//! 3. The actor logs its final size and returns
//! 4. `shutdown` awaits the tasks
//!
//! The only context dependency is review → property. The graph is acyclic,
//! so channel closure alone is enough to stop everything.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber; see [`tracing`] for the
//! fields each actor logs.

pub mod listing_system;
pub mod tracing;

pub use listing_system::*;
pub use self::tracing::setup_tracing;
