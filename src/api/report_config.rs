use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::render::{MaterialStyle, PaletteStop, default_palette, validate_palette};

pub const DEFAULT_GROUP_LABEL: &str = "Other";
pub const DEFAULT_MIN_PERCENT: f64 = 1.5;

/// Public controller configuration.
///
/// This type is serializable so viewer hosts can persist panel setup next to
/// their own settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Label of the bucket collecting low-share categories.
    #[serde(default = "default_group_label")]
    pub group_label: String,
    /// Categories strictly below this share (in percent) are merged.
    #[serde(default = "default_min_percent")]
    pub min_percent: f64,
    #[serde(default = "default_palette")]
    pub palette: Vec<PaletteStop>,
    #[serde(default)]
    pub material: MaterialStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            group_label: default_group_label(),
            min_percent: DEFAULT_MIN_PERCENT,
            palette: default_palette(),
            material: MaterialStyle::default(),
        }
    }
}

fn default_group_label() -> String {
    DEFAULT_GROUP_LABEL.to_owned()
}

fn default_min_percent() -> f64 {
    DEFAULT_MIN_PERCENT
}

impl ReportConfig {
    #[must_use]
    pub fn with_group_label(mut self, group_label: impl Into<String>) -> Self {
        self.group_label = group_label.into();
        self
    }

    #[must_use]
    pub fn with_min_percent(mut self, min_percent: f64) -> Self {
        self.min_percent = min_percent;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<PaletteStop>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialStyle) -> Self {
        self.material = material;
        self
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.group_label.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "group label must not be empty".to_owned(),
            ));
        }
        if !self.min_percent.is_finite() || !(0.0..=100.0).contains(&self.min_percent) {
            return Err(ReportError::InvalidConfig(format!(
                "min percent must be finite and in [0, 100], got {}",
                self.min_percent
            )));
        }
        if !self.material.shininess.is_finite() || self.material.shininess < 0.0 {
            return Err(ReportError::InvalidConfig(
                "material shininess must be finite and >= 0".to_owned(),
            ));
        }
        validate_palette(&self.palette)
    }

    pub fn from_json_str(input: &str) -> ReportResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ReportError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ReportResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::InvalidData(format!("failed to serialize config json: {e}")))
    }
}
