//! Precision-based spatial subsampling.
//!
//! Coordinates are snapped to the nearest multiple of a requested precision and
//! the dataset is reduced to the records whose original coordinate is itself
//! one of the snapped values. Values are never changed or combined.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{AustralError, Result};
use crate::geoutil::{snap_multiple, snap_to_precision};

/// Optional per-axis precision in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Precision {
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Self {
        Self { lat, lon }
    }

    /// Whether any axis requests snapping
    pub fn is_set(&self) -> bool {
        self.lat.is_some() || self.lon.is_some()
    }

    /// Reject non-positive or non-finite precisions
    pub fn validate(&self) -> Result<()> {
        for (axis, value) in [("lat_precision", self.lat), ("lon_precision", self.lon)] {
            if let Some(p) = value {
                if !(p.is_finite() && p > 0.0) {
                    return Err(AustralError::InvalidParameter {
                        param: axis.to_string(),
                        message: format!("Precision must be a positive number, got {}", p),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Subsample a dataset with canonical `lat`/`lon` columns.
///
/// Latitude is thinned first, then longitude over the remaining records.
pub fn subsample(dataset: &Dataset, precision: &Precision) -> Result<Dataset> {
    precision.validate()?;
    // Both coordinates must exist even if only one axis is filtered
    dataset.lat()?;
    dataset.lon()?;

    let mut current = dataset.clone();
    if let Some(p) = precision.lat {
        let keep = snapped_membership(current.lat()?, p);
        current = current.filter(&keep);
    }
    if let Some(p) = precision.lon {
        let keep = snapped_membership(current.lon()?, p);
        current = current.filter(&keep);
    }

    debug!(
        rows_in = dataset.len(),
        rows_out = current.len(),
        lat_precision = ?precision.lat,
        lon_precision = ?precision.lon,
        "Subsampled dataset"
    );
    Ok(current)
}

/// Mask keeping one original value per snapped key.
///
/// Distinct values that snap to a key of their own are all kept, so a precision
/// at or finer than the data spacing changes nothing. When several values share
/// a key, only the one nearest the snapped multiple survives. Values that cannot
/// be snapped (non-finite, or overflowing `v / p`) are kept.
fn snapped_membership(values: &[f64], precision: f64) -> Vec<bool> {
    let mut representatives: BTreeMap<u64, f64> = BTreeMap::new();
    for &v in values {
        let Some(key) = snap_key(v, precision) else {
            continue;
        };
        representatives
            .entry(key)
            .and_modify(|kept| {
                if snap_distance(v, precision) < snap_distance(*kept, precision) {
                    *kept = v;
                }
            })
            .or_insert(v);
    }

    values
        .iter()
        .map(|&v| match snap_key(v, precision) {
            Some(key) => representatives.get(&key).is_some_and(|&kept| kept == v),
            None => true,
        })
        .collect()
}

/// Bit pattern of the snapped multiple, with -0 folded into +0
fn snap_key(value: f64, precision: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    let multiple = snap_multiple(value, precision);
    multiple.is_finite().then(|| (multiple + 0.0).to_bits())
}

fn snap_distance(value: f64, precision: f64) -> f64 {
    (value - snap_to_precision(value, precision)).abs()
}
