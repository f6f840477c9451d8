use std::cell::RefCell;
use std::sync::mpsc::{Receiver, Sender, channel};

use tracing::{debug, info, warn};

use crate::chart::{
    CategoryDatum, ChartData, ChartFactory, ChartView, MountTarget, SelectionEvent, SelectionSink,
};
use crate::core::{ComponentId, CycleToken, HierarchyNode, PanelId, group_partition};
use crate::error::{ReportError, ReportResult};
use crate::render::ColorAssigner;
use crate::scene::Scene;

use super::{CycleOutcome, CycleState, ReportConfig, ReportSnapshot, build_tree};

/// Data of the cycle currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCycle {
    pub cycle: CycleToken,
    pub attribute: String,
    pub categories: Vec<CategoryDatum>,
    pub tree: HierarchyNode,
}

/// Keeps the report charts and the 3D scene in sync.
///
/// Each [`select_attribute`](Self::select_attribute) call aggregates the
/// chosen attribute, paints the scene, and remounts the four chart views.
/// Picks made in any view are queued through their [`SelectionSink`] and
/// forwarded to the scene by
/// [`dispatch_selections`](Self::dispatch_selections).
///
/// Cycles may overlap when the host polls several selections on one task.
/// The newest cycle wins: older ones return [`CycleOutcome::Superseded`]
/// without touching the scene or the charts.
pub struct ReportController<S: Scene, F: ChartFactory> {
    scene: S,
    factory: RefCell<F>,
    panel: PanelId,
    components: Vec<ComponentId>,
    config: ReportConfig,
    colors: ColorAssigner,
    targets: [MountTarget; 4],
    state: RefCell<CycleState>,
    views: RefCell<Vec<Box<dyn ChartView>>>,
    rendered: RefCell<Option<RenderedCycle>>,
    selection_tx: Sender<SelectionEvent>,
    selection_rx: Receiver<SelectionEvent>,
}

impl<S: Scene, F: ChartFactory> ReportController<S, F> {
    pub fn new(
        scene: S,
        factory: F,
        components: impl IntoIterator<Item = ComponentId>,
        config: ReportConfig,
    ) -> ReportResult<Self> {
        config.validate()?;
        let colors = ColorAssigner::new(config.palette.clone(), config.material)?;
        let (selection_tx, selection_rx) = channel();
        let panel = PanelId::allocate();

        Ok(Self {
            scene,
            factory: RefCell::new(factory),
            panel,
            components: components.into_iter().collect(),
            config,
            colors,
            targets: MountTarget::set_for(panel),
            state: RefCell::new(CycleState::default()),
            views: RefCell::new(Vec::new()),
            rendered: RefCell::new(None),
            selection_tx,
            selection_rx,
        })
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    #[must_use]
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Panel this controller draws into; part of every material name.
    #[must_use]
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    #[must_use]
    pub fn mount_targets(&self) -> &[MountTarget; 4] {
        &self.targets
    }

    #[must_use]
    pub fn current_attribute(&self) -> Option<String> {
        self.state.borrow().current_attribute().map(str::to_owned)
    }

    #[must_use]
    pub fn latest_cycle(&self) -> CycleToken {
        self.state.borrow().latest()
    }

    /// Copy of the cycle currently on screen.
    #[must_use]
    pub fn rendered(&self) -> Option<RenderedCycle> {
        self.rendered.borrow().clone()
    }

    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.borrow().len()
    }

    /// Runs one synchronization cycle for `property`.
    ///
    /// Partition retrieval and the hierarchy build run interleaved; nothing
    /// is painted or mounted until both have finished. Collaborator failures
    /// leave the previous render in place. A chart failing to mount is
    /// returned as-is: materials already applied stay applied.
    pub async fn select_attribute(&self, property: &str) -> ReportResult<CycleOutcome> {
        let cycle = self.state.borrow_mut().begin();
        info!(panel = %self.panel, attribute = property, cycle = %cycle, "attribute selected");

        let (partition, tree) = futures::join!(
            self.scene.partition_by_property(property, &self.components),
            build_tree(&self.scene, property),
        );

        let latest = self.state.borrow().latest();
        if latest != cycle {
            info!(attribute = property, cycle = %cycle, by = %latest, "cycle superseded");
            return Ok(CycleOutcome::Superseded { cycle, by: latest });
        }

        let partition = partition.map_err(|err| {
            warn!(attribute = property, cycle = %cycle, error = %err, "partition request failed");
            ReportError::from(err)
        })?;
        let tree = tree.inspect_err(|err| {
            warn!(attribute = property, cycle = %cycle, error = %err, "hierarchy build failed");
        })?;

        let grouped = group_partition(&partition, &self.config.group_label, self.config.min_percent);
        debug!(
            cycle = %cycle,
            categories = partition.len(),
            grouped = grouped.len(),
            "grouped partition"
        );
        let categories = self.colors.paint(&self.scene, self.panel, cycle, grouped);

        self.replace_views(cycle, &categories, &tree)?;
        self.scene.invalidate_render();

        let snapshot = ReportSnapshot::new(property, cycle, &categories, &tree);
        self.state.borrow_mut().complete(cycle, property);
        info!(
            attribute = property,
            cycle = %cycle,
            categories = categories.len(),
            nodes = snapshot.tree_nodes,
            "report rendered"
        );
        *self.rendered.borrow_mut() = Some(RenderedCycle {
            cycle,
            attribute: property.to_owned(),
            categories,
            tree,
        });

        Ok(CycleOutcome::Rendered(snapshot))
    }

    fn replace_views(
        &self,
        cycle: CycleToken,
        categories: &[CategoryDatum],
        tree: &HierarchyNode,
    ) -> ReportResult<()> {
        self.state.borrow_mut().teardown();
        self.rendered.borrow_mut().take();

        let mut views = self.views.borrow_mut();
        for view in views.iter_mut() {
            view.detach();
        }
        views.clear();

        let mut factory = self.factory.borrow_mut();
        factory.clear();
        self.scene.fit_to_view(&[]);
        self.scene.isolate(&[]);

        for target in &self.targets {
            let data = if target.kind.is_categorical() {
                ChartData::Categories(categories)
            } else {
                ChartData::Hierarchy(tree)
            };
            let mut view = factory.mount(target, data).inspect_err(|err| {
                warn!(chart = ?target.kind, cycle = %cycle, error = %err, "chart failed to mount");
            })?;
            view.subscribe(SelectionSink::new(
                target.kind,
                cycle,
                self.selection_tx.clone(),
            ));
            views.push(view);
        }
        Ok(())
    }

    /// Forwards every queued chart selection to the scene.
    ///
    /// Returns how many selections reached the scene.
    pub fn dispatch_selections(&self) -> usize {
        let mut forwarded = 0;
        while let Ok(event) = self.selection_rx.try_recv() {
            if self.handle_selection(&event) {
                forwarded += 1;
            }
        }
        forwarded
    }

    /// Frames and isolates exactly the selected components.
    ///
    /// Events from views that are no longer on screen and empty selections
    /// are dropped. Sibling views are not notified.
    pub fn handle_selection(&self, event: &SelectionEvent) -> bool {
        if !self.state.borrow().accepts_selection_from(event.cycle) {
            debug!(source = ?event.source, cycle = %event.cycle, "dropping selection from replaced chart");
            return false;
        }
        if event.ids.is_empty() {
            debug!(source = ?event.source, "ignoring empty selection");
            return false;
        }

        debug!(source = ?event.source, components = event.ids.len(), "forwarding chart selection");
        self.scene.fit_to_view(&event.ids);
        self.scene.isolate(&event.ids);
        true
    }
}
