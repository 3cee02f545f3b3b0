//! Geographic utility functions for polar map composition.
//!
//! This module provides the data extent and padded bounding box used to clip
//! coastlines, precision snapping for coordinate subsampling, and the south-polar
//! stereographic projection the scene is drawn in.

use serde::{Deserialize, Serialize};

/// Latitude/longitude extent of a dataset (finite coordinates only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Extent {
    /// Compute the extent of paired coordinate columns.
    ///
    /// Non-finite values are ignored. Returns `None` when either axis has no
    /// finite value, which is how an empty dataset shows up.
    pub fn from_coordinates(lat: &[f64], lon: &[f64]) -> Option<Self> {
        let (lat_min, lat_max) = finite_range(lat)?;
        let (lon_min, lon_max) = finite_range(lon)?;
        Some(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Clipping box around a data extent.
///
/// Only an upper latitude bound is applied unless `lat_min` is set, which
/// happens when symmetric clipping is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
    pub lat_min: Option<f64>,
}

impl BoundingBox {
    /// Pad an extent by `pad` degrees on each enforced side
    pub fn padded(extent: &Extent, pad: f64, symmetric: bool) -> Self {
        Self {
            lon_min: extent.lon_min - pad,
            lon_max: extent.lon_max + pad,
            lat_max: extent.lat_max + pad,
            lat_min: symmetric.then(|| extent.lat_min - pad),
        }
    }

    /// Whether a vertex lies inside the box. Non-finite vertices never do.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let above_floor = self.lat_min.map_or(true, |min| lat >= min);
        lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max && above_floor
    }
}

/// Index of the precision multiple nearest to `value`, ties away from zero
pub fn snap_multiple(value: f64, precision: f64) -> f64 {
    (value / precision).round()
}

/// Snap `value` to the nearest multiple of `precision`, ties away from zero
pub fn snap_to_precision(value: f64, precision: f64) -> f64 {
    snap_multiple(value, precision) * precision
}

/// Map projection descriptor handed to the rendering library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarProjection {
    /// Projection family name as understood by the host library
    pub name: String,
    /// Orientation as (latitude, longitude, rotation) in degrees
    pub orientation: [f64; 3],
}

impl PolarProjection {
    /// Stereographic projection viewed from the South Pole
    pub fn south_polar_stereographic() -> Self {
        Self {
            name: "stereographic".to_string(),
            orientation: [-90.0, 0.0, 0.0],
        }
    }

    /// Project a (lon, lat) pair onto the unit-sphere stereographic plane.
    ///
    /// The projection centre maps to the origin and the equator to radius 2.
    /// The antipodal pole has no image and yields `None`.
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        let [lat0, lon0, rotation] = self.orientation;
        // Angular distance from the projection centre (0 at the centre, pi at the antipode)
        let phi = lat.to_radians();
        let phi0 = lat0.to_radians();
        let dlon = (lon - lon0).to_radians();
        let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * dlon.cos();
        if 1.0 + cos_c <= 1e-12 {
            return None;
        }
        let k = 2.0 / (1.0 + cos_c);
        let x = k * phi.cos() * dlon.sin();
        let y = k * (phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * dlon.cos());

        let theta = rotation.to_radians();
        Some((
            x * theta.cos() - y * theta.sin(),
            x * theta.sin() + y * theta.cos(),
        ))
    }
}
