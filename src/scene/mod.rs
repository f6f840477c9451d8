//! Contract implemented by the hosting 3D viewer.
//!
//! Requests that may suspend return boxed local futures: scheduling is
//! single-threaded and cooperative, so nothing here needs to be `Send`.
//! Every method takes `&self` because a cycle keeps the scene borrowed while
//! its lookups are in flight; implementations own their interior mutability.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ComponentId, ComponentTree, Partition, PropertyValue};
use crate::render::MaterialSpec;

pub type SceneResult<T> = Result<T, SceneError>;

/// Scene request that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneRequest {
    ComponentTree,
    PropertyValue,
    Partition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{request:?} request failed: {message}")]
pub struct SceneError {
    pub request: SceneRequest,
    pub message: String,
}

impl SceneError {
    #[must_use]
    pub fn new(request: SceneRequest, message: impl Into<String>) -> Self {
        Self {
            request,
            message: message.into(),
        }
    }
}

/// Handle returned by the scene for a registered material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialHandle(pub u64);

pub trait Scene {
    /// Raw component tree of the loaded model.
    fn component_tree(&self) -> LocalBoxFuture<'_, SceneResult<ComponentTree>>;

    /// Value of `property` on one component. A missing property may be
    /// reported either as an error or as [`PropertyValue::Absent`].
    fn property_value<'a>(
        &'a self,
        id: ComponentId,
        property: &'a str,
    ) -> LocalBoxFuture<'a, SceneResult<PropertyValue>>;

    /// `ids` grouped by their display value of `property`.
    fn partition_by_property<'a>(
        &'a self,
        property: &'a str,
        ids: &'a [ComponentId],
    ) -> LocalBoxFuture<'a, SceneResult<Partition>>;

    fn create_material(&self, spec: &MaterialSpec) -> MaterialHandle;

    fn apply_material(&self, material: &MaterialHandle, id: ComponentId);

    /// Shows only `ids`; an empty slice shows the whole model.
    fn isolate(&self, ids: &[ComponentId]);

    /// Frames `ids`; an empty slice frames the whole model.
    fn fit_to_view(&self, ids: &[ComponentId]);

    fn invalidate_render(&self);
}
