//! Seam between the controller and the chart renderers.
//!
//! Drawing lives outside this crate. A [`ChartFactory`] mounts one view per
//! [`ChartKind`] and each view reports user picks through the
//! [`SelectionSink`] it was subscribed with.

mod selection;

use serde::{Deserialize, Serialize};

use crate::core::{ComponentId, HierarchyNode, PanelId};
use crate::error::ReportResult;
use crate::render::Color;

pub use selection::{SelectionEvent, SelectionSink};

/// The four report views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Pie,
    Bar,
    Force,
    Circle,
}

impl ChartKind {
    pub const ALL: [Self; 4] = [Self::Pie, Self::Bar, Self::Force, Self::Circle];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pie => "Pie Chart",
            Self::Bar => "Bar Chart",
            Self::Force => "Force Graph",
            Self::Circle => "Circle Graph",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Bar => "bar",
            Self::Force => "force",
            Self::Circle => "circle",
        }
    }

    /// Categorical views draw [`CategoryDatum`] lists, the others draw the
    /// normalized hierarchy.
    #[must_use]
    pub const fn is_categorical(self) -> bool {
        matches!(self, Self::Pie | Self::Bar)
    }

    /// The pie tab is the one shown when the panel opens.
    #[must_use]
    pub const fn is_default_tab(self) -> bool {
        matches!(self, Self::Pie)
    }
}

/// Where a chart view is attached in the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountTarget {
    pub kind: ChartKind,
    pub selector: String,
}

impl MountTarget {
    /// One target per chart kind; selectors are unique per panel.
    #[must_use]
    pub fn set_for(panel: PanelId) -> [MountTarget; 4] {
        ChartKind::ALL.map(|kind| MountTarget {
            kind,
            selector: format!("d3 d3-{slug} c{panel}-{slug}", slug = kind.slug()),
        })
    }
}

/// Visualization-ready record for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDatum {
    pub label: String,
    pub ids: Vec<ComponentId>,
    pub color: Color,
    /// Number of components in the category.
    pub value: usize,
}

impl CategoryDatum {
    #[must_use]
    pub fn new(label: impl Into<String>, ids: Vec<ComponentId>, color: Color) -> Self {
        let value = ids.len();
        Self {
            label: label.into(),
            ids,
            color,
            value,
        }
    }
}

/// Data handed to a chart view at mount time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartData<'a> {
    Categories(&'a [CategoryDatum]),
    Hierarchy(&'a HierarchyNode),
}

/// A mounted chart instance.
pub trait ChartView {
    fn kind(&self) -> ChartKind;

    /// Registers the sink the view reports selections through.
    fn subscribe(&mut self, sink: SelectionSink);

    /// Drops the subscription; called before the view is replaced.
    fn detach(&mut self);
}

/// Builds chart views inside the host UI.
pub trait ChartFactory {
    /// Removes every previously drawn chart output.
    fn clear(&mut self);

    fn mount(
        &mut self,
        target: &MountTarget,
        data: ChartData<'_>,
    ) -> ReportResult<Box<dyn ChartView>>;
}
