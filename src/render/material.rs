use serde::{Deserialize, Serialize};

use crate::core::{CycleToken, PanelId};
use crate::render::Color;

/// Shading shared by every category material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialStyle {
    pub shininess: f64,
    pub flat_shading: bool,
}

impl Default for MaterialStyle {
    fn default() -> Self {
        Self {
            shininess: 10.0,
            flat_shading: true,
        }
    }
}

/// Request handed to the scene to register one renderable material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Unique within the scene's material table.
    pub name: String,
    pub color: Color,
    pub specular: Color,
    pub shininess: f64,
    pub flat_shading: bool,
}

impl MaterialSpec {
    #[must_use]
    pub fn for_category(
        panel: PanelId,
        cycle: CycleToken,
        rank: usize,
        color: Color,
        style: MaterialStyle,
    ) -> Self {
        Self {
            name: format!("visual-report-{panel}-{cycle}-{rank}"),
            color,
            specular: color,
            shininess: style.shininess,
            flat_shading: style.flat_shading,
        }
    }
}
