//! Requests served by the location actor.

use super::error::LocationError;
use crate::geo::{GeoPoint, Nearby};
use crate::model::{Location, LocationCreate, LocationId, LocationKind, LocationUpdate};
use tokio::sync::oneshot;

pub type Reply<T> = oneshot::Sender<Result<T, LocationError>>;

/// Read-only queries that return a list of nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Children(LocationId),
    Roots,
    /// Nodes whose parent has been deleted.
    Orphans,
    /// Parent first, root last.
    Ancestors(LocationId),
    /// Breadth first, excluding the node itself.
    Descendants(LocationId),
    All,
    ByKind(LocationKind),
    /// Case-insensitive substring match on the name.
    NameContains(String),
    /// Neighborhood children of any node with exactly this name.
    NeighborhoodsOf(String),
}

#[derive(Debug)]
pub enum LocationRequest {
    Create {
        params: LocationCreate,
        respond_to: Reply<Location>,
    },
    Get {
        id: LocationId,
        respond_to: Reply<Option<Location>>,
    },
    Update {
        id: LocationId,
        update: LocationUpdate,
        respond_to: Reply<Location>,
    },
    Reparent {
        id: LocationId,
        new_parent_id: LocationId,
        respond_to: Reply<Location>,
    },
    Detach {
        id: LocationId,
        respond_to: Reply<Location>,
    },
    Delete {
        id: LocationId,
        respond_to: Reply<Location>,
    },
    IsAncestor {
        ancestor: LocationId,
        node: LocationId,
        respond_to: Reply<bool>,
    },
    Query {
        query: LocationQuery,
        respond_to: Reply<Vec<Location>>,
    },
    Nearby {
        center: GeoPoint,
        radius_km: f64,
        respond_to: Reply<Vec<Nearby>>,
    },
    Nearest {
        center: GeoPoint,
        limit: usize,
        respond_to: Reply<Vec<Nearby>>,
    },
}
