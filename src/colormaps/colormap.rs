//! Colormap trait and a gradient-backed implementation.
//!
//! A continuous scale descriptor only lists its palette colors; the rendering
//! library interpolates between them. `GradientColormap` performs the same
//! interpolation so callers can preview the colors a value will receive.

use colorgrad::{CustomGradient, Gradient};

use crate::error::{AustralError, Result};

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f32, min: f32, max: f32) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Linear gradient through an ordered list of hex colors
pub struct GradientColormap {
    name: String,
    gradient: Gradient,
}

impl GradientColormap {
    /// Build a gradient through `colors`, first color at 0.0 and last at 1.0
    pub fn from_hex(name: impl Into<String>, colors: &[String]) -> Result<Self> {
        let name = name.into();
        let html: Vec<&str> = colors.iter().map(String::as_str).collect();
        let gradient = CustomGradient::new()
            .html_colors(&html)
            .build()
            .map_err(|e| AustralError::PaletteSelection {
                message: format!("Cannot build colormap {}: {}", name, e),
            })?;
        Ok(Self { name, gradient })
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        if !value.is_finite() {
            // Transparent for missing values
            return [0, 0, 0, 0];
        }
        self.gradient.at(value.clamp(0.0, 1.0) as f64).to_rgba8()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> GradientColormap {
        GradientColormap::from_hex("grey", &["#000000".to_string(), "#FFFFFF".to_string()])
            .unwrap()
    }

    #[test]
    fn test_gradient_endpoints() {
        let colormap = black_to_white();
        assert_eq!(colormap.map_normalized(0.0), [0, 0, 0, 255]);
        assert_eq!(colormap.map_normalized(1.0), [255, 255, 255, 255]);
        assert_eq!(colormap.name(), "grey");
    }

    #[test]
    fn test_map_with_range() {
        let colormap = black_to_white();
        // Values outside the range are clamped
        assert_eq!(colormap.map(-5.0, 0.0, 10.0), [0, 0, 0, 255]);
        assert_eq!(colormap.map(50.0, 0.0, 10.0), [255, 255, 255, 255]);

        let mid = colormap.map(5.0, 0.0, 10.0);
        assert!(mid[0] > 100 && mid[0] < 160);

        assert_eq!(colormap.map_normalized(f32::NAN), [0, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = GradientColormap::from_hex("bad", &["not-a-color".to_string()]);
        assert!(result.is_err());
    }
}
