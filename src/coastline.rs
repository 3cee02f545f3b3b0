//! Coastline overlay extraction.
//!
//! A coastline source exposes world coastline vertices as one long `(lon, lat)`
//! sequence in which non-finite vertices separate disjoint paths. Clipping keeps
//! the vertices inside a padded box around the data and splits the sequence
//! wherever a vertex is missing or falls outside; nothing is interpolated and no
//! vertices are added at the box edge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geoutil::{BoundingBox, Extent};

/// Default pad around the data extent, in degrees
pub const DEFAULT_PAD_DEGREES: f64 = 2.0;

/// A coastline vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub lon: f64,
    pub lat: f64,
}

impl Vertex {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Marker separating two paths
    pub fn gap() -> Self {
        Self {
            lon: f64::NAN,
            lat: f64::NAN,
        }
    }

    pub fn is_gap(&self) -> bool {
        !(self.lon.is_finite() && self.lat.is_finite())
    }
}

/// Read-only provider of world coastline vertices
pub trait CoastlineSource: Send + Sync {
    /// All vertices, with gap vertices marking path breaks
    fn vertices(&self) -> &[Vertex];
}

/// In-memory coastline source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldCoastline {
    vertices: Vec<Vertex>,
}

impl WorldCoastline {
    /// Wrap a gap-delimited vertex sequence
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Join separate paths into one sequence with gap markers between them
    pub fn from_paths(paths: Vec<Vec<Vertex>>) -> Self {
        let mut vertices = Vec::new();
        for (i, path) in paths.into_iter().enumerate() {
            if i > 0 {
                vertices.push(Vertex::gap());
            }
            vertices.extend(path);
        }
        Self { vertices }
    }
}

impl CoastlineSource for WorldCoastline {
    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// One independently drawn path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastlineSegment {
    pub vertices: Vec<Vertex>,
}

/// A coastline path record as handed to the rendering library
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathRecord {
    pub lon: f64,
    pub lat: f64,
    pub group: usize,
}

/// Drawable coastline overlay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoastlineOverlay {
    pub segments: Vec<CoastlineSegment>,
    /// Box the overlay was clipped to, absent for caller-supplied overlays
    pub bbox: Option<BoundingBox>,
}

impl CoastlineOverlay {
    /// Overlay from precomputed segments
    pub fn from_segments(segments: Vec<CoastlineSegment>) -> Self {
        Self {
            segments,
            bbox: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(|s| s.vertices.len()).sum()
    }

    /// Iterate over every vertex of every segment
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.segments.iter().flat_map(|s| s.vertices.iter())
    }

    /// Flatten into (lon, lat, group) records, one group per segment
    pub fn path_records(&self) -> Vec<PathRecord> {
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(group, segment)| {
                segment.vertices.iter().map(move |v| PathRecord {
                    lon: v.lon,
                    lat: v.lat,
                    group,
                })
            })
            .collect()
    }
}

/// Clipping parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipOptions {
    /// Margin added around the data extent, in degrees
    pub pad: f64,
    /// Also enforce a lower latitude bound
    pub symmetric: bool,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            pad: DEFAULT_PAD_DEGREES,
            symmetric: false,
        }
    }
}

/// Clip a coastline source to the padded data extent.
///
/// Without an extent (no finite data coordinates) the overlay is empty.
pub fn clip(
    source: &dyn CoastlineSource,
    extent: Option<&Extent>,
    options: &ClipOptions,
) -> CoastlineOverlay {
    let Some(extent) = extent else {
        debug!("No data extent; coastline overlay left empty");
        return CoastlineOverlay::default();
    };

    let bbox = BoundingBox::padded(extent, options.pad, options.symmetric);
    let mut segments = Vec::new();
    let mut current: Vec<Vertex> = Vec::new();

    for vertex in source.vertices() {
        if !vertex.is_gap() && bbox.contains(vertex.lon, vertex.lat) {
            current.push(*vertex);
        } else if !current.is_empty() {
            segments.push(CoastlineSegment {
                vertices: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() {
        segments.push(CoastlineSegment { vertices: current });
    }

    debug!(
        lon_min = bbox.lon_min,
        lon_max = bbox.lon_max,
        lat_max = bbox.lat_max,
        lat_min = ?bbox.lat_min,
        segments = segments.len(),
        "Clipped coastline"
    );

    CoastlineOverlay {
        segments,
        bbox: Some(bbox),
    }
}
