use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Radius used when a query does not name one (km)
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Search parameters for an offer lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SearchArea {
    /// Requester position
    pub center: GeoPoint,
    /// Maximum distance in kilometers
    pub radius_km: f64,
}

impl SearchArea {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}
