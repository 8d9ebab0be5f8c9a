//! Transient notifications raised by page actions.

use std::collections::VecDeque;

use serde::Serialize;

use crate::traits::Toaster;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Holds toasts until the next page render picks them up.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.pending.back()
    }
}

impl Toaster for ToastQueue {
    fn show(&mut self, title: &str, description: &str, variant: ToastVariant) {
        self.pending.push_back(Toast {
            title: title.to_string(),
            description: description.to_string(),
            variant,
        });
    }
}
