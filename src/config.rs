//! Runtime settings for the listing system.

use crate::geo::EARTH_RADIUS_KM;
use serde::Deserialize;
use std::str::FromStr;
use tracing::warn;

pub const CHANNEL_CAPACITY_VAR: &str = "PROPERTY_FINDER_CHANNEL_CAPACITY";
pub const EARTH_RADIUS_VAR: &str = "PROPERTY_FINDER_EARTH_RADIUS_KM";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Mailbox size of every actor.
    pub channel_capacity: usize,
    /// Sphere radius used for proximity queries.
    pub earth_radius_km: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl CoreConfig {
    /// Reads overrides from the environment, falling back to the defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            channel_capacity: parsed(&lookup, CHANNEL_CAPACITY_VAR, defaults.channel_capacity),
            earth_radius_km: parsed(&lookup, EARTH_RADIUS_VAR, defaults.earth_radius_km),
        }
        .validated()
    }

    /// Clamps the capacity to at least 1 and replaces a radius that is not a
    /// finite positive number with the default.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let channel_capacity = if self.channel_capacity == 0 {
            warn!(channel_capacity = 0, "Channel capacity raised to 1");
            1
        } else {
            self.channel_capacity
        };
        let earth_radius_km = if self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0 {
            self.earth_radius_km
        } else {
            warn!(earth_radius_km = self.earth_radius_km, "Ignoring non-positive radius");
            defaults.earth_radius_km
        };
        Self {
            channel_capacity,
            earth_radius_km,
        }
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: T) -> T {
    match lookup(key) {
        None => fallback,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = key, value = %raw, "Unparsable setting, using default");
            fallback
        }),
    }
}
