//! # Shift Log State

use std::sync::{Arc, Mutex, PoisonError};

use barista_core::ShiftManager;

#[derive(Debug, Clone, Default)]
pub struct ShiftLogState {
    shift: Arc<Mutex<ShiftManager>>,
}

impl ShiftLogState {
    pub fn new(shift: ShiftManager) -> Self {
        ShiftLogState {
            shift: Arc::new(Mutex::new(shift)),
        }
    }

    pub fn with_shift<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ShiftManager) -> R,
    {
        let shift = self.shift.lock().unwrap_or_else(PoisonError::into_inner);
        f(&shift)
    }

    pub fn with_shift_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ShiftManager) -> R,
    {
        let mut shift = self.shift.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut shift)
    }
}
