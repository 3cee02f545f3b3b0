//! Configuration management for austral.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coastline::{ClipOptions, DEFAULT_PAD_DEGREES};
use crate::colormaps::scale::{DEFAULT_DIVERGING_PALETTE, MAX_BREWER_LEVELS};
use crate::colormaps::PaletteRef;
use crate::error::{AustralError, Result};
use crate::scene::{GeomKind, PlotOptions, DEFAULT_SIZE_RANGE};
use crate::subsample::Precision;

/// Command-line arguments for austral
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "austral")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON file holding an array of records
    pub data_file: PathBuf,

    /// Path to a JSON coastline vertex file ([lon, lat] pairs, null for gaps)
    #[arg(long, env = "AUSTRAL_COASTLINE")]
    pub coastline: Option<PathBuf>,

    /// Column mapped to the fill aesthetic
    #[arg(long)]
    pub fill: Option<String>,

    /// Column mapped to the colour aesthetic
    #[arg(long, visible_alias = "color")]
    pub colour: Option<String>,

    /// Geometry kind (point or tile)
    #[arg(short, long, env = "AUSTRAL_GEOM")]
    pub geom: Option<String>,

    /// Latitude subsampling precision in degrees
    #[arg(long)]
    pub lat_precision: Option<f64>,

    /// Longitude subsampling precision in degrees
    #[arg(long)]
    pub lon_precision: Option<f64>,

    /// Also clip coastlines below the data's minimum latitude
    #[arg(long)]
    pub symmetric_clip: bool,

    /// Qualitative palette for categorical columns (name or zero-based index)
    #[arg(long, env = "AUSTRAL_PALETTE")]
    pub palette: Option<String>,

    /// Write the scene JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "AUSTRAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AUSTRAL_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Plot composition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Default geometry kind
    #[serde(default = "default_geom")]
    pub geom: String,

    /// Degrees added around the data extent when clipping coastlines
    #[serde(default = "default_pad")]
    pub pad_degrees: f64,

    /// Enforce a lower latitude bound when clipping
    #[serde(default)]
    pub symmetric_clip: bool,

    /// Output range of the implicit size scale
    #[serde(default = "default_size_range")]
    pub size_range: [f64; 2],

    /// Diverging palette for numeric columns
    #[serde(default = "default_diverging_palette")]
    pub diverging_palette: String,

    /// Qualitative palette override for categorical columns
    #[serde(default)]
    pub qualitative_palette: Option<PaletteRef>,

    /// Most levels a Brewer qualitative palette is used for
    #[serde(default = "default_max_brewer_levels")]
    pub max_brewer_levels: usize,

    #[serde(default)]
    pub lat_precision: Option<f64>,

    #[serde(default)]
    pub lon_precision: Option<f64>,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Plot configuration
    #[serde(default)]
    pub plot: PlotConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Args)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args))
    }

    /// Build configuration from parsed arguments and the config file they name
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        if let Some(geom) = &args.geom {
            config.plot.geom = geom.clone();
        }
        if args.lat_precision.is_some() {
            config.plot.lat_precision = args.lat_precision;
        }
        if args.lon_precision.is_some() {
            config.plot.lon_precision = args.lon_precision;
        }
        if args.symmetric_clip {
            config.plot.symmetric_clip = true;
        }
        if let Some(palette) = &args.palette {
            config.plot.qualitative_palette = Some(parse_palette_ref(palette));
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.plot = other.plot;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AustralError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        self.plot.geom_kind()?;

        if !(self.plot.pad_degrees.is_finite() && self.plot.pad_degrees >= 0.0) {
            return Err(AustralError::Config {
                message: format!(
                    "Coastline pad must be a non-negative number, got {}",
                    self.plot.pad_degrees
                ),
            });
        }

        let [low, high] = self.plot.size_range;
        if !(low > 0.0 && low <= high) {
            return Err(AustralError::Config {
                message: format!("Invalid size range: [{}, {}]", low, high),
            });
        }

        if self.plot.max_brewer_levels == 0 {
            return Err(AustralError::Config {
                message: "max_brewer_levels must be at least 1".to_string(),
            });
        }

        self.plot.precision().validate()
    }
}

impl PlotConfig {
    pub fn geom_kind(&self) -> Result<GeomKind> {
        self.geom.parse()
    }

    pub fn precision(&self) -> Precision {
        Precision::new(self.lat_precision, self.lon_precision)
    }

    /// Composer options described by this configuration
    pub fn to_options(&self) -> PlotOptions {
        let defaults = PlotOptions::default();
        PlotOptions {
            clip: ClipOptions {
                pad: self.pad_degrees,
                symmetric: self.symmetric_clip,
            },
            size_range: self.size_range,
            diverging_palette: PaletteRef::name(self.diverging_palette.clone()),
            qualitative_palette: self
                .qualitative_palette
                .clone()
                .unwrap_or(defaults.qualitative_palette),
            max_brewer_levels: self.max_brewer_levels,
        }
    }
}

/// Interpret a palette argument as an index when it is a bare number
pub fn parse_palette_ref(value: &str) -> PaletteRef {
    match value.trim().parse::<usize>() {
        Ok(index) => PaletteRef::Index(index),
        Err(_) => PaletteRef::name(value.trim()),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plot: PlotConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            geom: default_geom(),
            pad_degrees: default_pad(),
            symmetric_clip: false,
            size_range: default_size_range(),
            diverging_palette: default_diverging_palette(),
            qualitative_palette: None,
            max_brewer_levels: default_max_brewer_levels(),
            lat_precision: None,
            lon_precision: None,
        }
    }
}

// Default value functions for serde
fn default_geom() -> String {
    "point".to_string()
}

fn default_pad() -> f64 {
    DEFAULT_PAD_DEGREES
}

fn default_size_range() -> [f64; 2] {
    DEFAULT_SIZE_RANGE
}

fn default_diverging_palette() -> String {
    DEFAULT_DIVERGING_PALETTE.to_string()
}

fn default_max_brewer_levels() -> usize {
    MAX_BREWER_LEVELS
}

fn default_log_level() -> String {
    "info".to_string()
}
