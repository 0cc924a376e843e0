//! Great-circle distances and nearest-neighbor ranking.

use serde::{Deserialize, Serialize};

/// The Earth radius used by `distance_km` .
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How many entries `nearest` usually returns.
pub const DEFAULT_NEAREST_LIMIT: usize = 3;

/// A latitude/longitude pair in degrees.
///
/// A point marked as `placeholder` is not a real location
/// and never takes part in distance ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            placeholder: false,
        }
    }

    pub const fn placeholder(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            placeholder: true,
        }
    }

    /// Whether the point can be used for distances and map markers.
    pub fn is_usable(&self) -> bool {
        !self.placeholder && self.lat.is_finite() && self.lon.is_finite()
    }
}

/// The haversine distance between two points, in kilometers.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.).sin().powi(2);
    let h = h.min(1.);
    let c = 2. * h.sqrt().atan2((1. - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// A candidate with its distance to the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<I> {
    pub id: I,
    pub distance_km: f64,
}

/// Rank the candidates by their distance to `reference` .
///
/// Candidates without a usable point, and the candidate whose id equals `reference_id` ,
/// are skipped.
/// Equal distances keep the input order.
/// At most `limit` entries are returned.
pub fn nearest<I: PartialEq>(
    reference_id: Option<&I>,
    reference: &GeoPoint,
    candidates: impl IntoIterator<Item = (I, Option<GeoPoint>)>,
    limit: usize,
) -> Vec<Ranked<I>> {
    let mut ret: Vec<Ranked<I>> = candidates
        .into_iter()
        .filter(|(id, _)| Some(id) != reference_id)
        .filter_map(|(id, point)| {
            let point = point.filter(|x| x.is_usable())?;
            Some(Ranked {
                distance_km: distance_km(reference, &point),
                id,
            })
        })
        .collect();
    ret.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ret.truncate(limit);
    ret
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_distance() {
        // Taipei 101 to Taichung station
        let a = GeoPoint::new(25.0340, 121.5645);
        let b = GeoPoint::new(24.1369, 120.6869);
        let d = distance_km(&a, &b);
        assert!((d - 133.0).abs() < 2., "{}", d);
    }

    #[test]
    fn antipodes_do_not_overflow() {
        let a = GeoPoint::new(0., 0.);
        let b = GeoPoint::new(0., 180.);
        let d = distance_km(&a, &b);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn unusable_points() {
        assert!(!GeoPoint::placeholder(23., 120.).is_usable());
        assert!(!GeoPoint::new(f64::NAN, 120.).is_usable());
        assert!(GeoPoint::new(23., 120.).is_usable());
    }
}
