use crate::core::CycleToken;

use super::ReportSnapshot;

/// Controller state, changed only at cycle start, teardown and completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleState {
    latest: CycleToken,
    rendered: Option<CycleToken>,
    current_attribute: Option<String>,
}

impl CycleState {
    /// Starts a new cycle; every earlier in-flight cycle becomes stale.
    pub fn begin(&mut self) -> CycleToken {
        self.latest = self.latest.next();
        self.latest
    }

    #[must_use]
    pub fn is_latest(&self, cycle: CycleToken) -> bool {
        self.latest == cycle
    }

    #[must_use]
    pub fn latest(&self) -> CycleToken {
        self.latest
    }

    /// Charts of the rendered cycle are about to be replaced.
    pub fn teardown(&mut self) {
        self.rendered = None;
    }

    pub fn complete(&mut self, cycle: CycleToken, attribute: &str) {
        self.rendered = Some(cycle);
        self.current_attribute = Some(attribute.to_owned());
    }

    #[must_use]
    pub fn rendered(&self) -> Option<CycleToken> {
        self.rendered
    }

    #[must_use]
    pub fn current_attribute(&self) -> Option<&str> {
        self.current_attribute.as_deref()
    }

    /// Only views mounted by the rendered cycle may drive the scene.
    #[must_use]
    pub fn accepts_selection_from(&self, cycle: CycleToken) -> bool {
        self.rendered == Some(cycle)
    }
}

/// How one `select_attribute` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Rendered(ReportSnapshot),
    /// A newer selection started while this one was in flight; nothing was
    /// painted or mounted.
    Superseded { cycle: CycleToken, by: CycleToken },
}

impl CycleOutcome {
    #[must_use]
    pub fn snapshot(&self) -> Option<&ReportSnapshot> {
        match self {
            Self::Rendered(snapshot) => Some(snapshot),
            Self::Superseded { .. } => None,
        }
    }

    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}
