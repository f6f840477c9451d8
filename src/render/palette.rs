use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::CategoryDatum;
use crate::core::{CycleToken, GroupedPartition, LinearScale, PanelId};
use crate::error::{ReportError, ReportResult};
use crate::render::{Color, MaterialSpec, MaterialStyle};
use crate::scene::Scene;

/// One palette anchor; `at` is a fraction of the category count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteStop {
    pub at: f64,
    pub color: Color,
}

impl PaletteStop {
    #[must_use]
    pub const fn new(at: f64, color: Color) -> Self {
        Self { at, color }
    }
}

/// Orange to green through magenta and blue.
#[must_use]
pub fn default_palette() -> Vec<PaletteStop> {
    vec![
        PaletteStop::new(0.0, Color::from_packed_rgb(0xB58929)),
        PaletteStop::new(0.33, Color::from_packed_rgb(0xC61C6F)),
        PaletteStop::new(0.66, Color::from_packed_rgb(0x268BD2)),
        PaletteStop::new(1.0, Color::from_packed_rgb(0x85992C)),
    ]
}

/// Stops must start at 0, end at 1 and strictly increase.
pub fn validate_palette(stops: &[PaletteStop]) -> ReportResult<()> {
    if stops.len() < 2 {
        return Err(ReportError::InvalidConfig(
            "palette needs at least two stops".to_owned(),
        ));
    }
    if stops.first().map(|s| s.at) != Some(0.0) || stops.last().map(|s| s.at) != Some(1.0) {
        return Err(ReportError::InvalidConfig(
            "palette stops must start at 0 and end at 1".to_owned(),
        ));
    }
    if stops
        .windows(2)
        .any(|pair| pair[0].at.partial_cmp(&pair[1].at) != Some(Ordering::Less))
    {
        return Err(ReportError::InvalidConfig(
            "palette stops must be strictly increasing".to_owned(),
        ));
    }
    for stop in stops {
        stop.color.validate()?;
    }
    Ok(())
}

/// Positional category coloring.
///
/// For `n` categories the stops are laid out on `[0, n]` and the category at
/// rank `i` samples position `i`, so colors depend on order and count only.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssigner {
    stops: Vec<PaletteStop>,
    style: MaterialStyle,
}

impl ColorAssigner {
    pub fn new(stops: Vec<PaletteStop>, style: MaterialStyle) -> ReportResult<Self> {
        validate_palette(&stops)?;
        Ok(Self { stops, style })
    }

    #[must_use]
    pub fn stops(&self) -> &[PaletteStop] {
        &self.stops
    }

    /// Color of the category at `rank` among `count` categories.
    #[must_use]
    pub fn color_at(&self, rank: usize, count: usize) -> Color {
        let n = count as f64;
        let x = rank as f64;
        let last_segment = self.stops.len() - 2;
        let segment = self.stops[1..self.stops.len() - 1]
            .iter()
            .take_while(|stop| stop.at * n <= x)
            .count()
            .min(last_segment);

        let from = self.stops[segment];
        let to = self.stops[segment + 1];
        match LinearScale::new(from.at * n, to.at * n) {
            Ok(scale) => from.color.lerp(to.color, scale.normalize(x)),
            // Only reachable with no categories, where nothing is sampled.
            Err(_) => from.color,
        }
    }

    /// Maps each label to its positional color, keeping label order.
    pub fn assign_colors<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> IndexMap<String, Color> {
        let labels: Vec<&str> = labels.into_iter().collect();
        let count = labels.len();
        labels
            .into_iter()
            .enumerate()
            .map(|(rank, label)| (label.to_owned(), self.color_at(rank, count)))
            .collect()
    }

    /// Colors every category, registers one material per color with the
    /// scene and applies it to the category's components.
    pub fn paint<S: Scene + ?Sized>(
        &self,
        scene: &S,
        panel: PanelId,
        cycle: CycleToken,
        grouped: GroupedPartition,
    ) -> Vec<CategoryDatum> {
        let colors = self.assign_colors(grouped.labels());

        grouped
            .into_iter()
            .zip(colors.into_values())
            .enumerate()
            .map(|(rank, ((label, ids), color))| {
                let spec = MaterialSpec::for_category(panel, cycle, rank, color, self.style);
                let material = scene.create_material(&spec);
                for &id in &ids {
                    scene.apply_material(&material, id);
                }
                debug!(
                    panel = %panel,
                    cycle = %cycle,
                    category = %label,
                    color = %color,
                    components = ids.len(),
                    "applied category material"
                );
                CategoryDatum::new(label, ids, color)
            })
            .collect()
    }
}
