use super::backend::SlotBackend;
use crate::error::{Result, ShelfError};
use std::cell::{Cell, RefCell};

/// In-memory slot for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This lets the `SlotBackend` trait use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    slot: RefCell<Option<String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose slot already holds `text`, as if written by an
    /// earlier session.
    pub fn with_text(text: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.slot.borrow_mut() = Some(text.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Current raw content of the slot.
    pub fn stored_text(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl SlotBackend for MemBackend {
    fn read_slot(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write_slot(&self, text: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ShelfError::Store("Simulated write error".to_string()));
        }
        *self.slot.borrow_mut() = Some(text.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://books".to_string()
    }
}
