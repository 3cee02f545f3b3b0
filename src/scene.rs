//! Scene composition for south-polar maps.
//!
//! The composer normalizes the input dataset, optionally subsamples it, clips
//! the coastline overlay, resolves implicit aesthetics from a per-geometry
//! policy table, selects color scales and returns a layered `Scene` that an
//! external plotting library can render. No rendering or file I/O happens here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::coastline::{clip, ClipOptions, CoastlineOverlay, CoastlineSource};
use crate::colormaps::scale::{
    DEFAULT_DIVERGING_PALETTE, DEFAULT_QUALITATIVE_PALETTE, MAX_BREWER_LEVELS,
};
use crate::colormaps::{ColourAesthetic, PaletteRef, PaletteTable, ScaleDescriptor, ScaleSelector};
use crate::dataset::{canonical_coordinate, Dataset, LAT, LON};
use crate::error::{AustralError, Result};
use crate::geoutil::PolarProjection;
use crate::subsample::{subsample, Precision};

/// Default output range of the implicit size-by-latitude scale
pub const DEFAULT_SIZE_RANGE: [f64; 2] = [0.5, 1.5];

/// Title of the y axis
pub const Y_AXIS_TITLE: &str = "Latitude";

/// Pass-through geometry options forwarded verbatim to the rendering layer
pub type GeomOptions = serde_json::Map<String, serde_json::Value>;

/// Geometry drawn for the data layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeomKind {
    Point,
    Tile,
}

impl GeomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeomKind::Point => "point",
            GeomKind::Tile => "tile",
        }
    }
}

impl FromStr for GeomKind {
    type Err = AustralError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "point" => Ok(GeomKind::Point),
            "tile" => Ok(GeomKind::Tile),
            _ => Err(AustralError::UnsupportedGeometry {
                kind: s.to_string(),
            }),
        }
    }
}

/// An aesthetic bound implicitly unless the caller binds it
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImplicitAesthetic {
    aesthetic: &'static str,
    column: &'static str,
}

/// Per-geometry defaults
#[derive(Debug, Clone, Copy, PartialEq)]
struct GeomPolicy {
    implicit: &'static [ImplicitAesthetic],
}

const POINT_POLICY: GeomPolicy = GeomPolicy {
    implicit: &[ImplicitAesthetic {
        aesthetic: "size",
        column: LAT,
    }],
};

const TILE_POLICY: GeomPolicy = GeomPolicy { implicit: &[] };

impl GeomPolicy {
    fn for_kind(kind: GeomKind) -> &'static GeomPolicy {
        match kind {
            GeomKind::Point => &POINT_POLICY,
            GeomKind::Tile => &TILE_POLICY,
        }
    }
}

/// Aesthetic name to column name bindings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping(BTreeMap<String, String>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an aesthetic to a column. `color` is stored as `colour`.
    pub fn bind(mut self, aesthetic: &str, column: impl Into<String>) -> Self {
        self.insert(aesthetic, column);
        self
    }

    pub fn insert(&mut self, aesthetic: &str, column: impl Into<String>) {
        self.0.insert(normalize_aesthetic(aesthetic), column.into());
    }

    pub fn get(&self, aesthetic: &str) -> Option<&str> {
        self.0.get(&normalize_aesthetic(aesthetic)).map(String::as_str)
    }

    pub fn contains(&self, aesthetic: &str) -> bool {
        self.0.contains_key(&normalize_aesthetic(aesthetic))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Point coordinate aliases at the canonical lat/lon columns
    fn canonicalize(&self, data: &Dataset) -> Self {
        let bindings = self
            .0
            .iter()
            .map(|(aesthetic, column)| {
                let column = match canonical_coordinate(column) {
                    Some(canonical) if data.column(column).is_none() => canonical.to_string(),
                    _ => column.clone(),
                };
                (aesthetic.clone(), column)
            })
            .collect();
        Self(bindings)
    }
}

fn normalize_aesthetic(aesthetic: &str) -> String {
    match aesthetic.to_lowercase().as_str() {
        "color" => "colour".to_string(),
        other => other.to_string(),
    }
}

/// A scene layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Data layer drawn with a point or tile geometry
    Geometry {
        geom: GeomKind,
        mapping: Mapping,
        options: GeomOptions,
    },
    /// Coastline paths drawn above the data
    Coastline { overlay: CoastlineOverlay },
}

/// A scale attached to the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scale {
    Colour(ScaleDescriptor),
    Size {
        column: String,
        range: [f64; 2],
        guide_visible: bool,
    },
}

impl Scale {
    pub fn aesthetic(&self) -> &str {
        match self {
            Scale::Colour(descriptor) => descriptor.aesthetic.as_str(),
            Scale::Size { .. } => "size",
        }
    }
}

/// Axis styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisStyle {
    pub title: Option<String>,
    pub labels: bool,
    pub ticks: bool,
}

/// Minimal theme with the x axis blanked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub base: String,
    pub x_axis: AxisStyle,
    pub y_axis: AxisStyle,
}

impl Theme {
    /// Longitude ticks carry no meaning around a pole, so the x axis is hidden
    pub fn polar() -> Self {
        Self {
            base: "minimal".to_string(),
            x_axis: AxisStyle {
                title: None,
                labels: false,
                ticks: false,
            },
            y_axis: AxisStyle {
                title: Some(Y_AXIS_TITLE.to_string()),
                labels: true,
                ticks: true,
            },
        }
    }
}

/// A renderable scene description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Records to draw, with canonical lat/lon columns
    pub data: Dataset,
    pub projection: PolarProjection,
    /// Bottom to top
    pub layers: Vec<Layer>,
    pub scales: Vec<Scale>,
    pub theme: Theme,
}

impl Scene {
    /// Geometry kind, mapping and options of the data layer
    pub fn geometry(&self) -> Option<(GeomKind, &Mapping, &GeomOptions)> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Geometry {
                geom,
                mapping,
                options,
            } => Some((*geom, mapping, options)),
            _ => None,
        })
    }

    pub fn coastline(&self) -> Option<&CoastlineOverlay> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Coastline { overlay } => Some(overlay),
            _ => None,
        })
    }

    pub fn scale(&self, aesthetic: &str) -> Option<&Scale> {
        let aesthetic = normalize_aesthetic(aesthetic);
        self.scales.iter().find(|s| s.aesthetic() == aesthetic)
    }

    pub fn colour_scale(&self, aesthetic: ColourAesthetic) -> Option<&ScaleDescriptor> {
        self.scales.iter().find_map(|s| match s {
            Scale::Colour(d) if d.aesthetic == aesthetic => Some(d),
            _ => None,
        })
    }
}

/// Composer settings shared by every request
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub clip: ClipOptions,
    /// Output range of the implicit size scale
    pub size_range: [f64; 2],
    pub diverging_palette: PaletteRef,
    pub qualitative_palette: PaletteRef,
    pub max_brewer_levels: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            clip: ClipOptions::default(),
            size_range: DEFAULT_SIZE_RANGE,
            diverging_palette: PaletteRef::name(DEFAULT_DIVERGING_PALETTE),
            qualitative_palette: PaletteRef::name(DEFAULT_QUALITATIVE_PALETTE),
            max_brewer_levels: MAX_BREWER_LEVELS,
        }
    }
}

/// Per-call inputs of a composition
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub mapping: Mapping,
    pub geom: GeomKind,
    pub precision: Precision,
    /// Precomputed overlay used verbatim instead of clipping
    pub coastline: Option<CoastlineOverlay>,
    pub geom_options: GeomOptions,
}

impl PlotRequest {
    pub fn new(mapping: Mapping, geom: GeomKind) -> Self {
        Self {
            mapping,
            geom,
            precision: Precision::default(),
            coastline: None,
            geom_options: GeomOptions::new(),
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_coastline(mut self, overlay: CoastlineOverlay) -> Self {
        self.coastline = Some(overlay);
        self
    }

    pub fn with_geom_options(mut self, options: GeomOptions) -> Self {
        self.geom_options = options;
        self
    }
}

/// Builds scenes from datasets. Holds read-only context shared across calls.
#[derive(Clone)]
pub struct SceneComposer {
    palettes: Arc<PaletteTable>,
    coastline: Arc<dyn CoastlineSource>,
    options: PlotOptions,
}

impl SceneComposer {
    pub fn new(palettes: Arc<PaletteTable>, coastline: Arc<dyn CoastlineSource>) -> Self {
        Self {
            palettes,
            coastline,
            options: PlotOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PlotOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Compose a scene from a raw dataset
    pub fn compose(&self, raw: &Dataset, request: &PlotRequest) -> Result<Scene> {
        let mut data = raw.clone().normalize_coordinates()?;
        let mut mapping = request.mapping.canonicalize(&data);

        if request.precision.is_set() {
            data = subsample(&data, &request.precision)?;
        }

        let overlay = match &request.coastline {
            Some(overlay) => {
                debug!(segments = overlay.segments.len(), "Using supplied coastline overlay");
                overlay.clone()
            }
            None => clip(
                self.coastline.as_ref(),
                data.extent()?.as_ref(),
                &self.options.clip,
            ),
        };

        // Positions and policy defaults only fill aesthetics the caller left unbound
        let mut scales = Vec::new();
        for (aesthetic, column) in [("x", LON), ("y", LAT)] {
            if !mapping.contains(aesthetic) {
                mapping.insert(aesthetic, column);
            }
        }
        for implicit in GeomPolicy::for_kind(request.geom).implicit {
            if mapping.contains(implicit.aesthetic) {
                continue;
            }
            mapping.insert(implicit.aesthetic, implicit.column);
            scales.push(Scale::Size {
                column: implicit.column.to_string(),
                range: self.options.size_range,
                guide_visible: false,
            });
        }

        for (_, column) in mapping.iter() {
            data.column_checked(column)?;
        }

        let selector = ScaleSelector::new(&self.palettes)
            .with_diverging(self.options.diverging_palette.clone())
            .with_qualitative(self.options.qualitative_palette.clone())
            .with_max_brewer_levels(self.options.max_brewer_levels);
        for aesthetic in ColourAesthetic::ALL {
            if let Some(column) = mapping.get(aesthetic.as_str()) {
                let column = data.column_checked(column)?;
                scales.push(Scale::Colour(selector.select(column, aesthetic)?));
            }
        }

        debug!(
            rows_in = raw.len(),
            rows_out = data.len(),
            geom = request.geom.as_str(),
            coastline_segments = overlay.segments.len(),
            scales = scales.len(),
            "Composed scene"
        );

        Ok(Scene {
            data,
            projection: PolarProjection::south_polar_stereographic(),
            layers: vec![
                Layer::Geometry {
                    geom: request.geom,
                    mapping,
                    options: request.geom_options.clone(),
                },
                Layer::Coastline { overlay },
            ],
            scales,
            theme: Theme::polar(),
        })
    }
}
