//! Layout configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for the derived views of a tree.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LayoutConfig {
    /// Maximum number of items in the rectangle view.
    #[builder(default = "20")]
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Deepest level the radial layout recurses into.
    #[builder(default = "4")]
    #[serde(default = "default_max_level")]
    pub max_level: u32,

    /// Inner radius of the innermost ring.
    #[builder(default = "50.0")]
    #[serde(default = "default_min_radius")]
    pub min_radius: f64,

    /// Outer radius no ring may exceed.
    #[builder(default = "280.0")]
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,

    /// Subtract a removed subtree's size from its ancestors when pruning.
    #[builder(default = "false")]
    #[serde(default)]
    pub resize_on_prune: bool,
}

fn default_max_items() -> usize {
    20
}

fn default_max_level() -> u32 {
    4
}

fn default_min_radius() -> f64 {
    50.0
}

fn default_max_radius() -> f64 {
    280.0
}

impl LayoutConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_items == Some(0) {
            return Err("max_items must be at least 1".to_string());
        }
        if self.max_level == Some(0) {
            return Err("max_level must be at least 1".to_string());
        }

        let min_radius = self.min_radius.unwrap_or_else(default_min_radius);
        let max_radius = self.max_radius.unwrap_or_else(default_max_radius);
        if !(min_radius >= 0.0 && min_radius < max_radius) {
            return Err(format!(
                "Radius bounds must satisfy 0 <= min ({min_radius}) < max ({max_radius})"
            ));
        }
        Ok(())
    }
}

impl LayoutConfig {
    /// Create a new layout config builder.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// Width of one radial band.
    pub fn band_width(&self) -> f64 {
        (self.max_radius - self.min_radius) / f64::from(self.max_level.max(1))
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            max_level: default_max_level(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
            resize_on_prune: false,
        }
    }
}
