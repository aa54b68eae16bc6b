use serde::{Deserialize, Serialize};

/// A single storage slot of a [`Vector`](crate::Vector).
///
/// `None` means the slot has never been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(Option<f64>);

impl Cell {
    pub fn new(value: f64) -> Self {
        Cell(Some(value))
    }

    pub fn is_initialized(&self) -> bool {
        self.0.is_some()
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn set(&mut self, value: f64) {
        self.0 = Some(value);
    }

    /// Write access to the slot. An unset slot becomes initialized with 0.0.
    pub fn value_mut(&mut self) -> &mut f64 {
        self.0.get_or_insert(0.0)
    }

    /// Raw stored value, 0.0 for an unset slot. Does not mark the slot.
    pub(crate) fn raw(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    /// Overwrites the stored number without touching the initialized state.
    pub(crate) fn overwrite_raw(&mut self, value: f64) {
        if let Some(v) = self.0.as_mut() {
            *v = value;
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::new(value)
    }
}
