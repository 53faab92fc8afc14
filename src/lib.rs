//! # Property Finder Core
//!
//! The core of a real-estate listing backend, built from resource actors.
//!
//! Two parts carry the weight:
//!
//! - **The location tree** (city → district → neighborhood). Nodes link to
//!   their parent by id, and the tree stays acyclic under arbitrary
//!   re-parenting. Proximity queries run over the located nodes.
//! - **Ownership policy**. Updates and deletes of properties and reviews are
//!   allowed for admins and owners, and a review can also be deleted by the
//!   owner of the property it is about.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic [`ResourceActor`](framework::ResourceActor) that stores
//! properties and reviews, its [`ResourceClient`](framework::ResourceClient),
//! and the [`mock`](framework::mock) module for tests.
//!
//! ### 2. The Actors ([`location_actor`], [`property_actor`], [`review_actor`])
//! The location actor owns the whole tree and is hand-written because its
//! operations span the store. Properties and reviews implement
//! [`ActorEntity`](framework::ActorEntity).
//!
//! ### 3. The Interface ([`clients`], [`gatekeeper`])
//! Typed clients hide the message passing. The [`Gatekeeper`](gatekeeper::Gatekeeper)
//! adds validation and the policy check in front of the property and review
//! clients.
//!
//! ### 4. Policy ([`policy`])
//! Ordered rule tables evaluated against an owner lookup.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`ListingSystem`](lifecycle::ListingSystem) starts and wires the actors and
//! shuts them down.
//!
//! ## Quick Start
//!
//! ```rust
//! use property_finder::lifecycle::ListingSystem;
//! use property_finder::model::{LocationCreate, LocationKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = ListingSystem::new();
//!     let porto = system
//!         .location_client
//!         .create_location(LocationCreate::new("Porto", LocationKind::City))
//!         .await
//!         .unwrap();
//!     let ribeira = system
//!         .location_client
//!         .create_location(LocationCreate::new("Ribeira", LocationKind::Neighborhood).under(porto.id))
//!         .await
//!         .unwrap();
//!
//!     // Porto cannot move under its own neighborhood
//!     assert!(system.location_client.reparent(porto.id, ribeira.id).await.is_err());
//!     system.shutdown().await.unwrap();
//! }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod gatekeeper;
pub mod geo;
pub mod lifecycle;
pub mod location_actor;
pub mod model;
pub mod policy;
pub mod property_actor;
pub mod review_actor;
pub mod validation;
