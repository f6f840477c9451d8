use serde::{Deserialize, Serialize};

use crate::core::scale::LinearScale;
use crate::core::types::ComponentId;

/// Component tree as reported by the scene, before any property is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTree {
    pub id: ComponentId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentTree>,
}

impl ComponentTree {
    #[must_use]
    pub fn leaf(id: ComponentId) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(id: ComponentId, children: Vec<ComponentTree>) -> Self {
        Self {
            id,
            children,
        }
    }

    /// Ids of every node in depth-first pre-order.
    #[must_use]
    pub fn preorder_ids(&self) -> Vec<ComponentId> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.id);
            stack.extend(node.children.iter().rev());
        }
        ids
    }
}

/// One scene component with its resolved numeric weight.
///
/// Children are owned; the parent is referenced by id so the tree stays a
/// plain owned value that chart views can borrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: ComponentId,
    pub parent: Option<ComponentId>,
    pub size: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Attaches `sizes`, given in the tree's pre-order, to every node of `tree`.
    ///
    /// Nodes past the end of `sizes` get a size of `0`.
    #[must_use]
    pub fn from_component_tree(tree: ComponentTree, sizes: &[f64]) -> Self {
        let mut sizes = sizes.iter().copied();
        attach(tree, None, &mut sizes)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first pre-order traversal.
    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    #[must_use]
    pub fn find(&self, id: ComponentId) -> Option<&HierarchyNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Largest `size` in the tree, `None` only when a size is NaN everywhere.
    #[must_use]
    pub fn max_size(&self) -> Option<f64> {
        self.iter()
            .map(|node| node.size)
            .filter(|size| !size.is_nan())
            .max_by(f64::total_cmp)
    }

    fn for_each_mut(&mut self, mut visit: impl FnMut(&mut HierarchyNode)) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            stack.extend(node.children.iter_mut());
        }
    }
}

fn attach(
    tree: ComponentTree,
    parent: Option<ComponentId>,
    sizes: &mut impl Iterator<Item = f64>,
) -> HierarchyNode {
    let size = sizes.next().unwrap_or(0.0);
    let id = tree.id;
    let children = tree
        .children
        .into_iter()
        .map(|child| attach(child, Some(id), sizes))
        .collect();

    HierarchyNode {
        id,
        parent,
        size,
        children,
    }
}

/// Rescales every `size` by the tree-wide maximum so the largest node ends
/// at exactly `1`.
///
/// A tree whose maximum is not positive is left untouched. Negative sizes
/// are scaled, not clamped.
pub fn normalize(root: &mut HierarchyNode) {
    let Some(max) = root.max_size() else {
        return;
    };
    if max <= 0.0 {
        return;
    }

    let Ok(scale) = LinearScale::new(0.0, max) else {
        return;
    };
    root.for_each_mut(|node| node.size = scale.normalize(node.size));
}
