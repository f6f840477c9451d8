use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::chart::ChartKind;
use crate::core::{ComponentId, CycleToken};

/// Components picked by the user in one chart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub source: ChartKind,
    pub cycle: CycleToken,
    pub ids: SmallVec<[ComponentId; 4]>,
}

/// Per-chart channel back to the controller.
///
/// Each sink is tagged with the chart it was handed to and the cycle that
/// mounted that chart, so events from replaced views can be told apart.
#[derive(Debug, Clone)]
pub struct SelectionSink {
    source: ChartKind,
    cycle: CycleToken,
    sender: Sender<SelectionEvent>,
}

impl SelectionSink {
    pub(crate) fn new(source: ChartKind, cycle: CycleToken, sender: Sender<SelectionEvent>) -> Self {
        Self {
            source,
            cycle,
            sender,
        }
    }

    #[must_use]
    pub fn source(&self) -> ChartKind {
        self.source
    }

    #[must_use]
    pub fn cycle(&self) -> CycleToken {
        self.cycle
    }

    /// Queues a selection for the controller.
    ///
    /// Returns `false` once the controller has been dropped.
    pub fn emit(&self, ids: impl IntoIterator<Item = ComponentId>) -> bool {
        let event = SelectionEvent {
            source: self.source,
            cycle: self.cycle,
            ids: ids.into_iter().collect(),
        };
        self.sender.send(event).is_ok()
    }
}
