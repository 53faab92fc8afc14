//! # Geo Index
//!
//! Great-circle distance and radius filtering over located tree nodes.
//!
//! Distance uses the haversine formula on a sphere of mean Earth radius:
//!
//! ```text
//! d = 2R · asin(√(sin²(Δlat/2) + cos(lat1) · cos(lat2) · sin²(Δlon/2)))
//! ```
//!
//! Nodes without both coordinates never match a proximity query; they are
//! skipped, not reported as errors.

use crate::model::Location;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Haversine distance on a sphere of the given radius.
pub fn great_circle_km(a: GeoPoint, b: GeoPoint, radius_km: f64) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let half_dlat = (b.latitude - a.latitude).to_radians() / 2.0;
    let half_dlon = (b.longitude - a.longitude).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // rounding can push h a hair past 1 for antipodal points
    2.0 * radius_km * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Haversine distance with the mean Earth radius.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    great_circle_km(a, b, EARTH_RADIUS_KM)
}

/// A located node with its distance from the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearby {
    pub location: Location,
    pub distance_km: f64,
}

/// Proximity queries over a set of locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoIndex {
    earth_radius_km: f64,
}

impl Default for GeoIndex {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}

impl GeoIndex {
    pub fn new(earth_radius_km: f64) -> Self {
        Self { earth_radius_km }
    }

    pub fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        great_circle_km(a, b, self.earth_radius_km)
    }

    /// Every located node within `radius_km` of `center` (inclusive), closest first.
    ///
    /// A negative or NaN radius matches nothing.
    pub fn nearby<'a>(
        &self,
        locations: impl IntoIterator<Item = &'a Location>,
        center: GeoPoint,
        radius_km: f64,
    ) -> Vec<Nearby> {
        let mut hits = self.measured(locations, center);
        hits.retain(|hit| hit.distance_km <= radius_km);
        sort_by_distance(&mut hits);
        hits
    }

    /// The `limit` located nodes closest to `center`.
    pub fn nearest<'a>(
        &self,
        locations: impl IntoIterator<Item = &'a Location>,
        center: GeoPoint,
        limit: usize,
    ) -> Vec<Nearby> {
        let mut hits = self.measured(locations, center);
        sort_by_distance(&mut hits);
        hits.truncate(limit);
        hits
    }

    fn measured<'a>(
        &self,
        locations: impl IntoIterator<Item = &'a Location>,
        center: GeoPoint,
    ) -> Vec<Nearby> {
        locations
            .into_iter()
            .filter_map(|location| {
                let point = location.coordinates()?;
                Some(Nearby {
                    location: location.clone(),
                    distance_km: self.distance_km(center, point),
                })
            })
            .collect()
    }
}

fn sort_by_distance(hits: &mut [Nearby]) {
    hits.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
            .then(a.location.id.cmp(&b.location.id))
    });
}
