//! Palettes and color scale selection.
//!
//! This module provides the Brewer palette table, the colormap trait used to
//! preview continuous scales, and the selector that decides which color scale a
//! mapped column receives.

pub mod brewer;
pub mod colormap;
pub mod scale;

pub use brewer::{Palette, PaletteRef, PaletteTable, PaletteType};
pub use colormap::{Colormap, GradientColormap};
pub use scale::{ColourAesthetic, Guide, ScaleDescriptor, ScaleKind, ScaleSelector};
