//! Brewer palette table.
//!
//! Holds the diverging and qualitative ColorBrewer schemes the scale selector
//! draws from. The table is built once and shared read-only.

use colorgrad::CustomGradient;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AustralError, Result};

/// Number of classes stored for diverging schemes
pub const DIVERGING_CLASSES: usize = 6;

static BREWER: Lazy<Arc<PaletteTable>> = Lazy::new(|| Arc::new(PaletteTable::brewer()));

/// ColorBrewer scheme families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteType {
    Diverging,
    Qualitative,
}

/// A named list of hex colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    pub kind: PaletteType,
    pub colors: &'static [&'static str],
}

impl Palette {
    /// Fetch `n` colors in palette order.
    ///
    /// Qualitative palettes return their first `n` colors (never more than
    /// they hold). Diverging palettes return the stored classes when `n`
    /// matches and are resampled along their gradient otherwise.
    pub fn colors(&self, n: usize) -> Result<Vec<String>> {
        let fits = n <= self.colors.len();
        if fits && (self.kind == PaletteType::Qualitative || n == self.colors.len()) {
            return Ok(self.colors[..n].iter().map(|c| c.to_string()).collect());
        }
        if self.kind == PaletteType::Qualitative {
            return Ok(self.colors.iter().map(|c| c.to_string()).collect());
        }

        let gradient = CustomGradient::new()
            .html_colors(self.colors)
            .build()
            .map_err(|e| AustralError::PaletteSelection {
                message: format!("Cannot build gradient for {}: {}", self.name, e),
            })?;
        Ok(gradient
            .colors(n)
            .iter()
            .map(|c| c.to_hex_string().to_uppercase())
            .collect())
    }
}

/// Reference to a palette, by name or by position within its family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteRef {
    /// Palette name, matched case-insensitively
    Name(String),
    /// Zero-based position within the family's palette list
    Index(usize),
}

impl PaletteRef {
    pub fn name(name: impl Into<String>) -> Self {
        PaletteRef::Name(name.into())
    }
}

/// Lookup table of palettes
#[derive(Debug, Clone)]
pub struct PaletteTable {
    palettes: Vec<Palette>,
}

impl PaletteTable {
    /// Build a table from explicit palettes
    pub fn new(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    /// The ColorBrewer diverging and qualitative schemes
    pub fn brewer() -> Self {
        use PaletteType::{Diverging, Qualitative};

        fn entry(
            name: &'static str,
            kind: PaletteType,
            colors: &'static [&'static str],
        ) -> Palette {
            Palette { name, kind, colors }
        }

        Self::new(vec![
            entry(
                "BrBG",
                Diverging,
                &["#8C510A", "#D8B365", "#F6E8C3", "#C7EAE5", "#5AB4AC", "#01665E"],
            ),
            entry(
                "PiYG",
                Diverging,
                &["#C51B7D", "#E9A3C9", "#FDE0EF", "#E6F5D0", "#A1D76A", "#4D9221"],
            ),
            entry(
                "RdBu",
                Diverging,
                &["#B2182B", "#EF8A62", "#FDDBC7", "#D1E5F0", "#67A9CF", "#2166AC"],
            ),
            entry(
                "RdYlBu",
                Diverging,
                &["#D73027", "#FC8D59", "#FEE090", "#E0F3F8", "#91BFDB", "#4575B4"],
            ),
            entry(
                "RdYlGn",
                Diverging,
                &["#D73027", "#FC8D59", "#FEE08B", "#D9EF8B", "#91CF60", "#1A9850"],
            ),
            entry(
                "Spectral",
                Diverging,
                &["#D53E4F", "#FC8D59", "#FEE08B", "#E6F598", "#99D594", "#3288BD"],
            ),
            entry(
                "Accent",
                Qualitative,
                &[
                    "#7FC97F", "#BEAED4", "#FDC086", "#FFFF99", "#386CB0", "#F0027F",
                    "#BF5B17", "#666666",
                ],
            ),
            entry(
                "Dark2",
                Qualitative,
                &[
                    "#1B9E77", "#D95F02", "#7570B3", "#E7298A", "#66A61E", "#E6AB02",
                    "#A6761D", "#666666",
                ],
            ),
            entry(
                "Paired",
                Qualitative,
                &[
                    "#A6CEE3", "#1F78B4", "#B2DF8A", "#33A02C", "#FB9A99", "#E31A1C",
                    "#FDBF6F", "#FF7F00", "#CAB2D6", "#6A3D9A", "#FFFF99", "#B15928",
                ],
            ),
            entry(
                "Pastel1",
                Qualitative,
                &[
                    "#FBB4AE", "#B3CDE3", "#CCEBC5", "#DECBE4", "#FED9A6", "#FFFFCC",
                    "#E5D8BD", "#FDDAEC", "#F2F2F2",
                ],
            ),
            entry(
                "Pastel2",
                Qualitative,
                &[
                    "#B3E2CD", "#FDCDAC", "#CBD5E8", "#F4CAE4", "#E6F5C9", "#FFF2AE",
                    "#F1E2CC", "#CCCCCC",
                ],
            ),
            entry(
                "Set1",
                Qualitative,
                &[
                    "#E41A1C", "#377EB8", "#4DAF4A", "#984EA3", "#FF7F00", "#FFFF33",
                    "#A65628", "#F781BF", "#999999",
                ],
            ),
            entry(
                "Set2",
                Qualitative,
                &[
                    "#66C2A5", "#FC8D62", "#8DA0CB", "#E78AC3", "#A6D854", "#FFD92F",
                    "#E5C494", "#B3B3B3",
                ],
            ),
            entry(
                "Set3",
                Qualitative,
                &[
                    "#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462",
                    "#B3DE69", "#FCCDE5", "#D9D9D9", "#BC80BD", "#CCEBC5", "#FFED6F",
                ],
            ),
        ])
    }

    /// Process-wide Brewer table, built on first use
    pub fn shared() -> Arc<Self> {
        Arc::clone(&BREWER)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Palettes of one family, in table order
    pub fn family(&self, kind: PaletteType) -> impl Iterator<Item = &Palette> {
        self.palettes.iter().filter(move |p| p.kind == kind)
    }

    /// Resolve a palette reference within a family
    pub fn resolve(&self, reference: &PaletteRef, kind: PaletteType) -> Result<&Palette> {
        match reference {
            PaletteRef::Name(name) => match self.get(name) {
                Some(palette) if palette.kind == kind => Ok(palette),
                Some(palette) => Err(AustralError::PaletteSelection {
                    message: format!(
                        "Palette {} is {:?}, expected a {:?} palette",
                        palette.name, palette.kind, kind
                    ),
                }),
                None => Err(AustralError::PaletteSelection {
                    message: format!("Unknown palette: {}", name),
                }),
            },
            PaletteRef::Index(index) => {
                self.family(kind)
                    .nth(*index)
                    .ok_or_else(|| AustralError::PaletteSelection {
                        message: format!(
                            "Palette index {} out of range for {:?} palettes ({} available)",
                            index,
                            kind,
                            self.family(kind).count()
                        ),
                    })
            }
        }
    }
}
