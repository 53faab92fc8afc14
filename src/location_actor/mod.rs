//! # Location Actor
//!
//! Owns the whole [`LocationTree`] and serves every request against it one at
//! a time.
//!
//! Unlike properties and reviews, location operations are not per-entity:
//! `reparent` reads the parent chain of another node, `children` and
//! `nearby` scan the store. So the tree gets a dedicated actor instead of a
//! generic [`ResourceActor`](crate::framework::ResourceActor). Sequential
//! processing means the read-check-write of a reparent can never interleave
//! with another mutation, which is what keeps the tree acyclic under
//! concurrent callers.
//!
//! ## Structure
//!
//! - [`tree`] - the store and its cycle-safe operations
//! - [`message`] - [`LocationRequest`] and [`LocationQuery`]
//! - [`error`] - [`LocationError`]
//! - [`new()`] - factory returning the actor and its [`LocationClient`]

pub mod error;
pub mod message;
pub mod tree;

pub use error::*;
pub use message::*;
pub use tree::LocationTree;

use crate::clients::LocationClient;
use crate::geo::GeoIndex;
use crate::model::Location;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct LocationActor {
    receiver: mpsc::Receiver<LocationRequest>,
    tree: LocationTree,
    geo: GeoIndex,
}

/// Creates a new Location actor and its client.
pub fn new(buffer_size: usize, geo: GeoIndex) -> (LocationActor, LocationClient) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let actor = LocationActor {
        receiver,
        tree: LocationTree::new(),
        geo,
    };
    (actor, LocationClient::new(sender))
}

fn reply<T>(op: &'static str, respond_to: Reply<T>, result: Result<T, LocationError>) {
    if let Err(e) = &result {
        warn!(entity_type = "Location", op, error = %e, "Request rejected");
    }
    let _ = respond_to.send(result);
}

impl LocationActor {
    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(entity_type = "Location", "Actor started");
        while let Some(request) = self.receiver.recv().await {
            self.handle(request);
        }
        info!(entity_type = "Location", size = self.tree.len(), "Shutdown");
    }

    fn handle(&mut self, request: LocationRequest) {
        match request {
            LocationRequest::Create { params, respond_to } => {
                debug!(entity_type = "Location", ?params, "Create");
                let result = self.tree.create(params);
                if let Ok(location) = &result {
                    info!(entity_type = "Location", id = %location.id, size = self.tree.len(), "Created");
                }
                reply("create", respond_to, result);
            }
            LocationRequest::Get { id, respond_to } => {
                let location = self.tree.get(id).cloned();
                debug!(entity_type = "Location", %id, found = location.is_some(), "Get");
                reply("get", respond_to, Ok(location));
            }
            LocationRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type = "Location", %id, ?update, "Update");
                let result = self.tree.update(id, update);
                if result.is_ok() {
                    info!(entity_type = "Location", %id, "Updated");
                }
                reply("update", respond_to, result);
            }
            LocationRequest::Reparent {
                id,
                new_parent_id,
                respond_to,
            } => {
                debug!(entity_type = "Location", %id, %new_parent_id, "Reparent");
                let result = self.tree.reparent(id, new_parent_id);
                if result.is_ok() {
                    info!(entity_type = "Location", %id, %new_parent_id, "Reparented");
                }
                reply("reparent", respond_to, result);
            }
            LocationRequest::Detach { id, respond_to } => {
                debug!(entity_type = "Location", %id, "Detach");
                let result = self.tree.detach(id);
                if result.is_ok() {
                    info!(entity_type = "Location", %id, "Detached");
                }
                reply("detach", respond_to, result);
            }
            LocationRequest::Delete { id, respond_to } => {
                debug!(entity_type = "Location", %id, "Delete");
                let result = self.tree.delete(id);
                if result.is_ok() {
                    let orphans = self.tree.orphans().len();
                    info!(entity_type = "Location", %id, size = self.tree.len(), orphans, "Deleted");
                }
                reply("delete", respond_to, result);
            }
            LocationRequest::IsAncestor {
                ancestor,
                node,
                respond_to,
            } => {
                let answer = self.tree.is_ancestor(ancestor, node);
                debug!(entity_type = "Location", %ancestor, %node, answer, "IsAncestor");
                reply("is_ancestor", respond_to, Ok(answer));
            }
            LocationRequest::Query { query, respond_to } => {
                debug!(entity_type = "Location", ?query, "Query");
                let result = self.query(query);
                reply("query", respond_to, result);
            }
            LocationRequest::Nearby {
                center,
                radius_km,
                respond_to,
            } => {
                let hits = self.geo.nearby(self.tree.locations(), center, radius_km);
                debug!(entity_type = "Location", ?center, radius_km, hits = hits.len(), "Nearby");
                reply("nearby", respond_to, Ok(hits));
            }
            LocationRequest::Nearest {
                center,
                limit,
                respond_to,
            } => {
                let hits = self.geo.nearest(self.tree.locations(), center, limit);
                debug!(entity_type = "Location", ?center, limit, hits = hits.len(), "Nearest");
                reply("nearest", respond_to, Ok(hits));
            }
        }
    }

    fn query(&self, query: LocationQuery) -> Result<Vec<Location>, LocationError> {
        match query {
            LocationQuery::Children(id) => self.tree.children(id),
            LocationQuery::Roots => Ok(self.tree.roots()),
            LocationQuery::Orphans => Ok(self.tree.orphans()),
            LocationQuery::Ancestors(id) => self.tree.ancestors(id),
            LocationQuery::Descendants(id) => self.tree.descendants(id),
            LocationQuery::All => Ok(self.tree.all()),
            LocationQuery::ByKind(kind) => Ok(self.tree.by_kind(&kind)),
            LocationQuery::NameContains(fragment) => Ok(self.tree.search_by_name(&fragment)),
            LocationQuery::NeighborhoodsOf(city) => Ok(self.tree.neighborhoods_of(&city)),
        }
    }
}
