//! Assertion utilities for testing.
//!
//! Floating-point and geometric checks shared by the integration tests.

#![allow(dead_code)]

use austral::CoastlineOverlay;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a result is within expected bounds (inclusive).
pub fn assert_in_range(actual: f64, min: f64, max: f64) {
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}

/// Assert that every value is an integer multiple of `step`.
pub fn assert_on_grid(values: &[f64], step: f64) {
    for (i, value) in values.iter().enumerate() {
        let multiple = value / step;
        assert!(
            (multiple - multiple.round()).abs() < 1e-9,
            "Value at index {} is off the {} grid: {}",
            i,
            step,
            value
        );
    }
}

/// Assert that every overlay vertex lies in the given lon range and at or below `lat_max`.
pub fn assert_overlay_within(overlay: &CoastlineOverlay, lon_min: f64, lon_max: f64, lat_max: f64) {
    for vertex in overlay.vertices() {
        assert_in_range(vertex.lon, lon_min, lon_max);
        assert!(
            vertex.lat <= lat_max,
            "Vertex above latitude bound {}: {:?}",
            lat_max,
            vertex
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_on_grid() {
        assert_on_grid(&[-90.0, -80.0, 0.0, 10.0], 10.0);
        assert_on_grid(&[0.5, 1.0, 1.5], 0.5);
    }
}
