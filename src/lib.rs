//! # austral
//!
//! Builds south-polar map scenes from tabular latitude/longitude records.
//!
//! Given a table of point observations, this library produces a renderer-ready
//! scene description: the records (optionally thinned to a coarser grid), a polar
//! stereographic projection, a coastline overlay clipped to the data, and color
//! scales chosen from the statistical type of the mapped columns.
//!
//! ## Pipeline
//!
//! - **Subsampling**: keep only records whose coordinates lie on a coarser grid
//! - **Coastline clipping**: cut the world coastline down to a padded data box
//! - **Scale selection**: diverging palettes for numbers, qualitative for categories
//! - **Composition**: assemble layers, scales and theme into a [`Scene`]

pub mod coastline;
pub mod colormaps;
pub mod config;
pub mod data_loader;
pub mod dataset;
pub mod error;
pub mod geoutil;
pub mod logging;
pub mod scene;
pub mod subsample;

pub use coastline::{clip, ClipOptions, CoastlineOverlay, CoastlineSource, Vertex, WorldCoastline};
pub use colormaps::{PaletteRef, PaletteTable, ScaleDescriptor, ScaleKind};
pub use config::Config;
pub use dataset::{Column, ColumnValues, Dataset};
pub use error::{AustralError, Result};
pub use logging::{
    generate_request_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_scene_stats, log_timed_operation,
};
pub use scene::{GeomKind, Layer, Mapping, PlotOptions, PlotRequest, Scale, Scene, SceneComposer};
pub use subsample::{subsample, Precision};
