use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DriftError, Result};

const DEVICON_BASE: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

/// Half-open sampling range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        SampleRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    fn check(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(DriftError::InvalidConfig(format!(
                "{name} must satisfy min < max, got [{}, {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Settings for the floating icon layer.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Icon sources: local raster paths or remote URLs
    pub icons: Vec<String>,
    /// Icon edge length in pixels
    pub size_range: SampleRange,
    /// Per-frame velocity component, in percent of the viewport
    pub velocity_range: SampleRange,
    /// Viewports narrower than this (px) hide the icon layer entirely
    pub mobile_breakpoint: u32,
    pub frames_per_second: u32,
    /// Icon opacity in the preview window
    pub opacity: f32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for DriftConfig {
    fn default() -> Self {
        let icons = [
            "photoshop/photoshop-plain.svg",
            "figma/figma-original.svg",
            "flutter/flutter-original.svg",
            "javascript/javascript-original.svg",
            "mysql/mysql-original.svg",
            "react/react-original.svg",
            "css3/css3-original.svg",
            "html5/html5-original.svg",
            "github/github-original.svg",
            "rstudio/rstudio-original.svg",
            "mongodb/mongodb-original.svg",
        ]
        .iter()
        .map(|icon| format!("{DEVICON_BASE}/{icon}"))
        .collect();

        DriftConfig {
            icons,
            size_range: SampleRange::new(40.0, 60.0),
            velocity_range: SampleRange::new(-0.015, -0.012),
            mobile_breakpoint: 768,
            frames_per_second: 60,
            opacity: 0.25,
            seed: None,
        }
    }
}

impl DriftConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DriftConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.size_range.check("size_range")?;
        self.velocity_range.check("velocity_range")?;
        if self.size_range.min <= 0.0 {
            return Err(DriftError::InvalidConfig(
                "size_range.min must be positive".to_string(),
            ));
        }
        if self.frames_per_second == 0 {
            return Err(DriftError::InvalidConfig(
                "frames_per_second must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(DriftError::InvalidConfig(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}
