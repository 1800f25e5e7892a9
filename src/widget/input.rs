//! Input element handle
//!
//! The widget owns the text input it is bound to and forwards focus and
//! blur to it.

use std::sync::atomic::{AtomicBool, Ordering};

/// Something that can take and release keyboard focus
pub trait InputHandle: Send + Sync {
    fn focus(&self);
    fn blur(&self);
    fn is_focused(&self) -> bool;
}

/// Input handle that only records focus
#[derive(Debug, Default)]
pub struct FocusFlag {
    focused: AtomicBool,
}

impl InputHandle for FocusFlag {
    fn focus(&self) {
        self.focused.store(true, Ordering::Relaxed);
    }

    fn blur(&self) {
        self.focused.store(false, Ordering::Relaxed);
    }

    fn is_focused(&self) -> bool {
        self.focused.load(Ordering::Relaxed)
    }
}
