mod attribute_menu;
mod cycle;
mod hierarchy_builder;
mod report_config;
mod report_controller;
mod report_snapshot;

pub use attribute_menu::{AttributeMenuItem, attribute_menu};
pub use cycle::{CycleOutcome, CycleState};
pub use hierarchy_builder::{build_raw_tree, build_tree};
pub use report_config::{DEFAULT_GROUP_LABEL, DEFAULT_MIN_PERCENT, ReportConfig};
pub use report_controller::{RenderedCycle, ReportController};
pub use report_snapshot::{
    CategorySummary, REPORT_SNAPSHOT_JSON_SCHEMA_V1, ReportSnapshot, ReportSnapshotJsonContractV1,
};
