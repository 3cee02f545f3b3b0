//! Synthetic datasets and coastlines for integration tests.

#![allow(dead_code)]

use austral::coastline::Vertex;
use austral::{Column, Dataset, WorldCoastline};

/// Latitudes -85, -80, ..., -60
pub fn polar_latitudes() -> Vec<f64> {
    (0..6).map(|i| -85.0 + 5.0 * i as f64).collect()
}

/// Longitudes 10, 15, ..., 40
pub fn polar_longitudes() -> Vec<f64> {
    (0..7).map(|i| 10.0 + 5.0 * i as f64).collect()
}

/// Grid of observations south of 60S with a value column rising from 1.0 to 9.5
pub fn polar_grid() -> Dataset {
    let mut lat = Vec::new();
    let mut lon = Vec::new();
    for &y in &polar_latitudes() {
        for &x in &polar_longitudes() {
            lat.push(y);
            lon.push(x);
        }
    }
    let n = lat.len();
    let v = (0..n)
        .map(|i| 1.0 + 8.5 * i as f64 / (n - 1) as f64)
        .collect();

    Dataset::new(vec![
        Column::numeric("lat", lat),
        Column::numeric("lon", lon),
        Column::numeric("v", v),
    ])
    .unwrap()
}

/// The polar grid plus a categorical column cycling through `levels` classes
pub fn polar_grid_with_classes(levels: usize) -> Dataset {
    let grid = polar_grid();
    let classes = (0..grid.len())
        .map(|i| Some(format!("class{:02}", i % levels)))
        .collect();
    let mut columns = grid.columns().to_vec();
    columns.push(Column::categorical("class", classes));
    Dataset::new(columns).unwrap()
}

/// Meridian paths every 2 degrees of longitude, each running pole to pole in 1 degree steps
pub fn meridian_coastline() -> WorldCoastline {
    let paths = (-90..90)
        .map(|i| {
            let lon = i as f64 * 2.0;
            (-90..=90)
                .map(|lat| Vertex::new(lon, lat as f64))
                .collect::<Vec<_>>()
        })
        .collect();
    WorldCoastline::from_paths(paths)
}
