use futures::future::join_all;
use tracing::debug;

use crate::core::{ComponentId, HierarchyNode, NumericValue, normalize};
use crate::error::ReportResult;
use crate::scene::Scene;

/// Builds the normalized hierarchy of `property` over the scene's component tree.
///
/// One lookup is issued per node and all of them run interleaved. A node whose
/// lookup fails or yields a non-numeric or negative value gets a size of `0`;
/// only a failure to fetch the tree itself is returned. Normalization runs
/// once every lookup has settled.
pub async fn build_tree<S: Scene + ?Sized>(scene: &S, property: &str) -> ReportResult<HierarchyNode> {
    let mut root = build_raw_tree(scene, property).await?;
    normalize(&mut root);
    Ok(root)
}

/// Same as [`build_tree`] without the normalization pass.
pub async fn build_raw_tree<S: Scene + ?Sized>(
    scene: &S,
    property: &str,
) -> ReportResult<HierarchyNode> {
    let tree = scene.component_tree().await?;
    let ids = tree.preorder_ids();

    let sizes = join_all(ids.iter().map(|&id| resolve_size(scene, id, property))).await;
    debug!(property, nodes = ids.len(), "resolved hierarchy sizes");

    Ok(HierarchyNode::from_component_tree(tree, &sizes))
}

async fn resolve_size<S: Scene + ?Sized>(scene: &S, id: ComponentId, property: &str) -> f64 {
    match scene.property_value(id, property).await {
        Ok(value) => match value.numeric() {
            NumericValue::Numeric(size) if size >= 0.0 => size,
            NumericValue::Numeric(size) => {
                debug!(component = %id, property, size, "negative property, size clamped to 0");
                0.0
            }
            NumericValue::NonNumeric => {
                debug!(component = %id, property, ?value, "non-numeric property, size defaults to 0");
                0.0
            }
        },
        Err(err) => {
            debug!(component = %id, property, error = %err, "property lookup failed, size defaults to 0");
            0.0
        }
    }
}
