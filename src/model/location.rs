/// A node of the location hierarchy (city → district → neighborhood).
///
/// The parent link is a plain id, not an owning reference: a child never owns
/// its parent, and the tree keeps no child lists that could drift out of sync.
/// `parent_id` is only ever changed by [`LocationTree::reparent`] and
/// [`LocationTree::detach`](crate::location_actor::LocationTree::detach).
///
/// [`LocationTree::reparent`]: crate::location_actor::LocationTree::reparent
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u64);

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "location_{}", self.0)
    }
}

/// Level of a location in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    City,
    District,
    Neighborhood,
    Other(String),
}

impl LocationKind {
    /// Parses a free-form type label, case-insensitively for the known levels.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "city" => LocationKind::City,
            "district" => LocationKind::District,
            "neighborhood" | "neighbourhood" => LocationKind::Neighborhood,
            _ => LocationKind::Other(label.trim().to_string()),
        }
    }
}

impl Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationKind::City => f.write_str("City"),
            LocationKind::District => f.write_str("District"),
            LocationKind::Neighborhood => f.write_str("Neighborhood"),
            LocationKind::Other(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
    pub kind: LocationKind,
    pub parent_id: Option<LocationId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    /// Both coordinates, or `None` when either is missing.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Payload for creating a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCreate {
    pub name: String,
    pub description: Option<String>,
    pub kind: LocationKind,
    pub parent_id: Option<LocationId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationCreate {
    pub fn new(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            parent_id: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn under(mut self, parent_id: LocationId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update. There is no parent field: re-parenting goes
/// through `reparent`, which checks for cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<LocationKind>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
