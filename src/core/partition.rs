use indexmap::IndexMap;
use indexmap::map::IntoIter;
use serde::{Deserialize, Serialize};

use crate::core::types::ComponentId;

/// Component ids grouped by attribute value, in category encounter order.
///
/// Every component is expected to appear in exactly one category. The type
/// does not enforce that: it is the scene's partition service contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition {
    categories: IndexMap<String, Vec<ComponentId>>,
}

/// A partition whose low-share categories were merged into one bucket.
pub type GroupedPartition = Partition;

impl Partition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to `label`, creating the category on first use.
    pub fn push(&mut self, label: impl Into<String>, id: ComponentId) {
        self.categories.entry(label.into()).or_default().push(id);
    }

    /// Appends `ids` to `label`, creating the category on first use.
    pub fn extend(&mut self, label: impl Into<String>, ids: impl IntoIterator<Item = ComponentId>) {
        self.categories.entry(label.into()).or_default().extend(ids);
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[ComponentId]> {
        self.categories.get(label).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of component ids across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ComponentId])> {
        self.categories
            .iter()
            .map(|(label, ids)| (label.as_str(), ids.as_slice()))
    }

    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.categories.values().flatten().copied()
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<ComponentId>)> for Partition {
    fn from_iter<T: IntoIterator<Item = (L, Vec<ComponentId>)>>(iter: T) -> Self {
        let mut partition = Self::new();
        for (label, ids) in iter {
            partition.extend(label, ids);
        }
        partition
    }
}

impl IntoIterator for Partition {
    type Item = (String, Vec<ComponentId>);
    type IntoIter = IntoIter<String, Vec<ComponentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.into_iter()
    }
}

/// Merges every category whose share of the total is strictly below
/// `min_percent` into one `group_label` bucket placed after all kept
/// categories.
///
/// Merged ids keep the order in which their categories were encountered. A
/// kept category that is itself named `group_label` joins the bucket so no id
/// is dropped. A partition with no ids at all is returned unchanged.
#[must_use]
pub fn group_partition(partition: &Partition, group_label: &str, min_percent: f64) -> GroupedPartition {
    let total = partition.total();
    if total == 0 {
        return partition.clone();
    }

    let mut kept = Partition::new();
    let mut merged: Option<Vec<ComponentId>> = None;

    for (label, ids) in partition.iter() {
        let share = 100.0 * ids.len() as f64 / total as f64;
        if share < min_percent || label == group_label {
            merged.get_or_insert_with(Vec::new).extend_from_slice(ids);
        } else {
            kept.extend(label, ids.iter().copied());
        }
    }

    if let Some(ids) = merged {
        kept.extend(group_label, ids);
    }
    kept
}
