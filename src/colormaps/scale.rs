//! Adaptive color scale selection.
//!
//! The selector looks at the statistical type of the mapped column and picks a
//! reversed diverging palette for numeric data, a Brewer qualitative palette for
//! categorical data with few levels, or defers to the host library's default
//! palette when there are too many levels.

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use super::brewer::{PaletteRef, PaletteTable, PaletteType, DIVERGING_CLASSES};
use super::colormap::GradientColormap;
use crate::dataset::{Column, ColumnValues};
use crate::error::Result;

/// Default diverging palette for numeric columns
pub const DEFAULT_DIVERGING_PALETTE: &str = "Spectral";

/// Default qualitative palette for categorical columns
pub const DEFAULT_QUALITATIVE_PALETTE: &str = "Set3";

/// Largest number of levels a Brewer qualitative palette is used for
pub const MAX_BREWER_LEVELS: usize = 12;

/// Color channels a scale can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColourAesthetic {
    Fill,
    Colour,
}

impl ColourAesthetic {
    pub const ALL: [ColourAesthetic; 2] = [ColourAesthetic::Fill, ColourAesthetic::Colour];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColourAesthetic::Fill => "fill",
            ColourAesthetic::Colour => "colour",
        }
    }
}

impl fmt::Display for ColourAesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of color scale attached to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Continuous,
    DiscreteBrewer,
    DiscreteDefault,
}

/// Legend style for a scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guide {
    ColourBar,
    Legend,
    /// Whatever the host library does by default
    HostDefault,
    None,
}

/// Result of color scale selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleDescriptor {
    pub aesthetic: ColourAesthetic,
    pub kind: ScaleKind,
    /// Palette the colors came from, absent for host defaults
    pub palette: Option<String>,
    /// Ordered palette colors; continuous scales are reversed from fetch order
    pub colors: Vec<String>,
    /// Sorted levels for discrete scales
    pub levels: Vec<String>,
    pub guide: Guide,
}

impl ScaleDescriptor {
    /// Whether the scale shows a guide at all
    pub fn guide_visible(&self) -> bool {
        self.guide != Guide::None
    }

    /// Color assigned to a categorical level, if the scale lists explicit colors
    pub fn color_for_level(&self, level: &str) -> Option<&str> {
        let index = self.levels.iter().position(|l| l == level)?;
        self.colors.get(index).map(String::as_str)
    }

    /// Gradient through the colors of a continuous scale
    pub fn colormap(&self) -> Result<Option<GradientColormap>> {
        if self.kind != ScaleKind::Continuous {
            return Ok(None);
        }
        let name = self.palette.as_deref().unwrap_or("continuous");
        GradientColormap::from_hex(name, &self.colors).map(Some)
    }
}

/// Picks a color scale for a column
#[derive(Debug, Clone)]
pub struct ScaleSelector<'a> {
    palettes: &'a PaletteTable,
    diverging: PaletteRef,
    qualitative: PaletteRef,
    max_brewer_levels: usize,
}

impl<'a> ScaleSelector<'a> {
    /// Selector with the default Spectral / Set3 palettes
    pub fn new(palettes: &'a PaletteTable) -> Self {
        Self {
            palettes,
            diverging: PaletteRef::name(DEFAULT_DIVERGING_PALETTE),
            qualitative: PaletteRef::name(DEFAULT_QUALITATIVE_PALETTE),
            max_brewer_levels: MAX_BREWER_LEVELS,
        }
    }

    /// Override the diverging palette used for numeric columns
    pub fn with_diverging(mut self, palette: PaletteRef) -> Self {
        self.diverging = palette;
        self
    }

    /// Override the qualitative palette used for categorical columns
    pub fn with_qualitative(mut self, palette: PaletteRef) -> Self {
        self.qualitative = palette;
        self
    }

    pub fn with_max_brewer_levels(mut self, levels: usize) -> Self {
        self.max_brewer_levels = levels;
        self
    }

    /// Select a scale for `column` on the given channel
    pub fn select(&self, column: &Column, aesthetic: ColourAesthetic) -> Result<ScaleDescriptor> {
        let descriptor = match &column.values {
            ColumnValues::Numeric(_) => self.continuous(aesthetic)?,
            ColumnValues::Categorical(_) => self.discrete(column.levels(), aesthetic)?,
        };

        debug!(
            aesthetic = %aesthetic,
            column = %column.name,
            kind = ?descriptor.kind,
            palette = ?descriptor.palette,
            "Selected color scale"
        );
        Ok(descriptor)
    }

    fn continuous(&self, aesthetic: ColourAesthetic) -> Result<ScaleDescriptor> {
        let palette = self
            .palettes
            .resolve(&self.diverging, PaletteType::Diverging)?;
        let mut colors = palette.colors(DIVERGING_CLASSES)?;
        // Low values take the palette's high end
        colors.reverse();

        Ok(ScaleDescriptor {
            aesthetic,
            kind: ScaleKind::Continuous,
            palette: Some(palette.name.to_string()),
            colors,
            levels: Vec::new(),
            guide: Guide::ColourBar,
        })
    }

    fn discrete(&self, levels: Vec<String>, aesthetic: ColourAesthetic) -> Result<ScaleDescriptor> {
        if levels.len() > self.max_brewer_levels {
            return Ok(ScaleDescriptor {
                aesthetic,
                kind: ScaleKind::DiscreteDefault,
                palette: None,
                colors: Vec::new(),
                levels,
                guide: Guide::HostDefault,
            });
        }

        let palette = self
            .palettes
            .resolve(&self.qualitative, PaletteType::Qualitative)?;
        let colors = palette.colors(levels.len())?;
        if colors.len() < levels.len() {
            warn!(
                palette = palette.name,
                levels = levels.len(),
                available = colors.len(),
                "Palette has fewer colors than levels; extra levels are left uncolored"
            );
        }

        Ok(ScaleDescriptor {
            aesthetic,
            kind: ScaleKind::DiscreteBrewer,
            palette: Some(palette.name.to_string()),
            colors,
            levels,
            guide: Guide::Legend,
        })
    }
}
