//! Search query with an immediate and a deferred value.

/// Operator's search text.
///
/// `immediate` follows every keystroke. `deferred` is what the filter sees; it only
/// catches up when the view is idle (`settle`). The lag never changes results, only
/// when they are recomputed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchQuery {
    immediate: String,
    deferred: String,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the immediate value (typing).
    pub fn set(&mut self, text: impl Into<String>) {
        self.immediate = text.into();
    }

    /// Promote the immediate value to the deferred one. Returns true if it changed.
    pub fn settle(&mut self) -> bool {
        if self.deferred == self.immediate {
            return false;
        }
        self.deferred.clone_from(&self.immediate);
        true
    }

    pub fn immediate(&self) -> &str {
        &self.immediate
    }

    pub fn deferred(&self) -> &str {
        &self.deferred
    }

    /// True while the filter is still showing results for older text.
    pub fn is_pending(&self) -> bool {
        self.immediate != self.deferred
    }
}
