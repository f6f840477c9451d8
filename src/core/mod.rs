pub mod hierarchy;
pub mod partition;
pub mod scale;
pub mod types;

pub use hierarchy::{ComponentTree, HierarchyNode, normalize};
pub use partition::{GroupedPartition, Partition, group_partition};
pub use scale::LinearScale;
pub use types::{ComponentId, CycleToken, NumericValue, PanelId, PropertyValue};
