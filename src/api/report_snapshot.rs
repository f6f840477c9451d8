use serde::{Deserialize, Serialize};

use crate::chart::CategoryDatum;
use crate::core::{CycleToken, HierarchyNode};
use crate::error::{ReportError, ReportResult};
use crate::render::Color;

pub const REPORT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub label: String,
    pub color: Color,
    pub value: usize,
}

/// Serializable summary of one rendered cycle, for host diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub attribute: String,
    pub cycle: CycleToken,
    pub categories: Vec<CategorySummary>,
    pub tree_nodes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ReportSnapshot,
}

impl ReportSnapshot {
    #[must_use]
    pub fn new(
        attribute: &str,
        cycle: CycleToken,
        categories: &[CategoryDatum],
        tree: &HierarchyNode,
    ) -> Self {
        Self {
            attribute: attribute.to_owned(),
            cycle,
            categories: categories
                .iter()
                .map(|datum| CategorySummary {
                    label: datum.label.clone(),
                    color: datum.color,
                    value: datum.value,
                })
                .collect(),
            tree_nodes: tree.node_count(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ReportResult<String> {
        let payload = ReportSnapshotJsonContractV1 {
            schema_version: REPORT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ReportError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ReportResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ReportSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ReportSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ReportError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != REPORT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ReportError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
