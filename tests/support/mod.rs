#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use visual_report::chart::{
    CategoryDatum, ChartData, ChartFactory, ChartKind, ChartView, MountTarget, SelectionSink,
};
use visual_report::core::{ComponentId, ComponentTree, HierarchyNode, Partition, PropertyValue};
use visual_report::render::MaterialSpec;
use visual_report::scene::{MaterialHandle, Scene, SceneError, SceneRequest, SceneResult};
use visual_report::{ReportError, ReportResult};

pub fn cid(raw: u32) -> ComponentId {
    ComponentId::new(raw)
}

pub fn cids(raw: impl IntoIterator<Item = u32>) -> Vec<ComponentId> {
    raw.into_iter().map(ComponentId::new).collect()
}

pub fn leaf(raw: u32) -> ComponentTree {
    ComponentTree::leaf(cid(raw))
}

pub fn branch(raw: u32, children: Vec<ComponentTree>) -> ComponentTree {
    ComponentTree::with_children(cid(raw), children)
}

/// Resolves after returning `Pending` a fixed number of times.
pub struct YieldTimes(pub usize);

impl Future for YieldTimes {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            return Poll::Ready(());
        }
        self.0 -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    CreateMaterial(MaterialSpec),
    ApplyMaterial(MaterialHandle, ComponentId),
    Isolate(Vec<ComponentId>),
    FitToView(Vec<ComponentId>),
    InvalidateRender,
}

/// In-memory scene recording every side effect.
#[derive(Default)]
pub struct FakeScene {
    pub tree: Option<ComponentTree>,
    pub properties: HashMap<(ComponentId, String), PropertyValue>,
    pub failing_lookups: HashSet<ComponentId>,
    pub partitions: HashMap<String, Partition>,
    /// Partition requests for these properties yield this many times first.
    pub partition_delays: HashMap<String, usize>,
    pub fail_partition: Cell<bool>,
    /// Property and id set of every partition request, in call order.
    pub partition_requests: RefCell<Vec<(String, Vec<ComponentId>)>>,
    pub lookups: Cell<usize>,
    pub calls: RefCell<Vec<SceneCall>>,
    next_material: Cell<u64>,
}

impl FakeScene {
    pub fn with_tree(tree: ComponentTree) -> Self {
        Self {
            tree: Some(tree),
            ..Self::default()
        }
    }

    pub fn set_property(&mut self, id: u32, property: &str, value: impl Into<PropertyValue>) {
        self.properties
            .insert((cid(id), property.to_owned()), value.into());
    }

    pub fn set_partition(&mut self, property: &str, partition: Partition) {
        self.partitions.insert(property.to_owned(), partition);
    }

    pub fn calls(&self) -> Vec<SceneCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn isolate_calls(&self) -> Vec<Vec<ComponentId>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SceneCall::Isolate(ids) => Some(ids.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn materials(&self) -> Vec<MaterialSpec> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SceneCall::CreateMaterial(spec) => Some(spec.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Scene for FakeScene {
    fn component_tree(&self) -> LocalBoxFuture<'_, SceneResult<ComponentTree>> {
        let tree = self.tree.clone();
        async move {
            tree.ok_or_else(|| SceneError::new(SceneRequest::ComponentTree, "no model loaded"))
        }
        .boxed_local()
    }

    fn property_value<'a>(
        &'a self,
        id: ComponentId,
        property: &'a str,
    ) -> LocalBoxFuture<'a, SceneResult<PropertyValue>> {
        async move {
            self.lookups.set(self.lookups.get() + 1);
            // Later ids settle first so completion order differs from issue order.
            YieldTimes((id.raw() % 3) as usize).await;
            if self.failing_lookups.contains(&id) {
                return Err(SceneError::new(SceneRequest::PropertyValue, "lookup error"));
            }
            self.properties
                .get(&(id, property.to_owned()))
                .cloned()
                .ok_or_else(|| SceneError::new(SceneRequest::PropertyValue, "property missing"))
        }
        .boxed_local()
    }

    fn partition_by_property<'a>(
        &'a self,
        property: &'a str,
        ids: &'a [ComponentId],
    ) -> LocalBoxFuture<'a, SceneResult<Partition>> {
        async move {
            self.partition_requests
                .borrow_mut()
                .push((property.to_owned(), ids.to_vec()));
            YieldTimes(self.partition_delays.get(property).copied().unwrap_or(0)).await;
            if self.fail_partition.get() {
                return Err(SceneError::new(SceneRequest::Partition, "service unavailable"));
            }
            // Like the viewer service, only requested ids are grouped.
            let requested: HashSet<ComponentId> = ids.iter().copied().collect();
            let partition = self.partitions.get(property).cloned().unwrap_or_default();
            Ok(partition
                .into_iter()
                .map(|(label, ids)| {
                    let ids: Vec<ComponentId> =
                        ids.into_iter().filter(|id| requested.contains(id)).collect();
                    (label, ids)
                })
                .filter(|(_, ids)| !ids.is_empty())
                .collect())
        }
        .boxed_local()
    }

    fn create_material(&self, spec: &MaterialSpec) -> MaterialHandle {
        let handle = MaterialHandle(self.next_material.get());
        self.next_material.set(handle.0 + 1);
        self.calls
            .borrow_mut()
            .push(SceneCall::CreateMaterial(spec.clone()));
        handle
    }

    fn apply_material(&self, material: &MaterialHandle, id: ComponentId) {
        self.calls
            .borrow_mut()
            .push(SceneCall::ApplyMaterial(*material, id));
    }

    fn isolate(&self, ids: &[ComponentId]) {
        self.calls.borrow_mut().push(SceneCall::Isolate(ids.to_vec()));
    }

    fn fit_to_view(&self, ids: &[ComponentId]) {
        self.calls
            .borrow_mut()
            .push(SceneCall::FitToView(ids.to_vec()));
    }

    fn invalidate_render(&self) {
        self.calls.borrow_mut().push(SceneCall::InvalidateRender);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MountedData {
    Categories(Vec<CategoryDatum>),
    Hierarchy(HierarchyNode),
}

#[derive(Default)]
pub struct ChartLog {
    pub clears: usize,
    pub mounted: Vec<(MountTarget, MountedData)>,
    pub sinks: Vec<SelectionSink>,
    pub detached: Vec<ChartKind>,
}

impl ChartLog {
    pub fn sink(&self, kind: ChartKind) -> SelectionSink {
        self.sinks
            .iter()
            .rev()
            .find(|sink| sink.source() == kind)
            .cloned()
            .expect("chart subscribed")
    }
}

/// Chart factory that records mounts and hands sinks back to the test.
#[derive(Clone, Default)]
pub struct RecordingCharts {
    pub log: Rc<RefCell<ChartLog>>,
    pub fail_on: Option<ChartKind>,
}

struct RecordingView {
    kind: ChartKind,
    log: Rc<RefCell<ChartLog>>,
}

impl ChartView for RecordingView {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn subscribe(&mut self, sink: SelectionSink) {
        self.log.borrow_mut().sinks.push(sink);
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detached.push(self.kind);
    }
}

impl ChartFactory for RecordingCharts {
    fn clear(&mut self) {
        self.log.borrow_mut().clears += 1;
    }

    fn mount(
        &mut self,
        target: &MountTarget,
        data: ChartData<'_>,
    ) -> ReportResult<Box<dyn ChartView>> {
        if self.fail_on == Some(target.kind) {
            return Err(ReportError::Render {
                chart: target.kind,
                reason: "canvas unavailable".to_owned(),
            });
        }
        let data = match data {
            ChartData::Categories(categories) => MountedData::Categories(categories.to_vec()),
            ChartData::Hierarchy(tree) => MountedData::Hierarchy(tree.clone()),
        };
        self.log.borrow_mut().mounted.push((target.clone(), data));
        Ok(Box::new(RecordingView {
            kind: target.kind,
            log: Rc::clone(&self.log),
        }))
    }
}
