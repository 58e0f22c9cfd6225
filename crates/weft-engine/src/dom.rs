//! DOM sink boundary.
//!
//! Mounting rendered HTML is not core work; the engine only defines the
//! collaborator contract and reports lookup failure. A real frontend
//! binds this to an actual document; tests use [`MemorySink`].

use std::collections::HashMap;

/// A render-output sink addressed by selector.
///
/// Implementations resolve the selector to at most one target and replace
/// that target's contents with `html`.
pub trait DomSink {
    /// Returns `false` when no target matches `selector`; the renderer
    /// surfaces that as [`crate::RenderError::ElementNotFound`].
    fn replace_contents(&mut self, selector: &str, html: &str) -> bool;
}

/// In-memory sink double: a set of known selectors and their current
/// contents.
#[derive(Debug, Default)]
pub struct MemorySink {
    targets: HashMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selector this sink will resolve.
    pub fn add_target(&mut self, selector: impl Into<String>) {
        self.targets.insert(selector.into(), String::new());
    }

    /// Current contents of a target, if the selector is known.
    pub fn contents(&self, selector: &str) -> Option<&str> {
        self.targets.get(selector).map(String::as_str)
    }
}

impl DomSink for MemorySink {
    fn replace_contents(&mut self, selector: &str, html: &str) -> bool {
        match self.targets.get_mut(selector) {
            Some(slot) => {
                *slot = html.to_string();
                true
            }
            None => false,
        }
    }
}
