//! visual-report: property-driven visual analytics for 3D scene viewers.
//!
//! A user-chosen component attribute is aggregated two ways at once: as a
//! categorical breakdown (with low-share categories merged) and as a
//! normalized component hierarchy. The controller paints the scene per
//! category, remounts the chart views and forwards chart picks back to the
//! scene as framing and isolation.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{ReportConfig, ReportController};
pub use error::{ReportError, ReportResult};
