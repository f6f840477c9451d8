use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque identifier of one scene component (a viewer database id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(u32);

impl ComponentId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ComponentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token identifying one attribute-selection cycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CycleToken(u64);

impl CycleToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CycleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide identifier of one report panel.
///
/// Keeps mount selectors and material names apart when several controllers
/// share one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns an id no earlier call in this process has returned.
    #[must_use]
    pub fn allocate() -> Self {
        static NEXT_PANEL: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_PANEL.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw value returned by the scene's property service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Absent,
}

impl PropertyValue {
    #[must_use]
    pub fn numeric(&self) -> NumericValue {
        NumericValue::parse(self)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Typed outcome of coercing a raw property value to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Numeric(f64),
    NonNumeric,
}

impl NumericValue {
    /// Numbers must be finite. Text is trimmed and parsed as a decimal float;
    /// blank text, `inf` and `NaN` spellings are non-numeric.
    #[must_use]
    pub fn parse(value: &PropertyValue) -> Self {
        let parsed = match value {
            PropertyValue::Number(number) => Some(*number),
            PropertyValue::Text(text) => text.trim().parse::<f64>().ok(),
            PropertyValue::Absent => None,
        };

        match parsed {
            Some(number) if number.is_finite() => Self::Numeric(number),
            _ => Self::NonNumeric,
        }
    }

    #[must_use]
    pub fn or_zero(self) -> f64 {
        match self {
            Self::Numeric(number) => number,
            Self::NonNumeric => 0.0,
        }
    }
}
