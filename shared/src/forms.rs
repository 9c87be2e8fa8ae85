//! Form-level helpers: unsaved change tracking and submit button labels.

/// Field excluded from snapshots, it changes on every render
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Order-independent fingerprint of a form's `(name, value)` entries
pub fn snapshot<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<String> = entries
        .into_iter()
        .filter(|(key, _)| key.as_ref() != CSRF_FIELD)
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect();
    pairs.sort();
    pairs.join("&")
}

/// Tracks whether a form differs from what the server rendered
#[derive(Debug, Clone, PartialEq)]
pub struct DirtyTracker {
    initial: String,
    dirty: bool,
    submitting: bool,
}

impl DirtyTracker {
    pub fn new(initial_snapshot: String) -> Self {
        Self {
            initial: initial_snapshot,
            dirty: false,
            submitting: false,
        }
    }

    /// Recompute after an input or change event; returns the new flag
    pub fn update(&mut self, current_snapshot: &str) -> bool {
        self.dirty = self.initial != current_snapshot;
        self.dirty
    }

    pub fn mark_submitting(&mut self) {
        self.submitting = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Leaving the page would lose edits
    pub fn blocks_unload(&self) -> bool {
        self.dirty && !self.submitting
    }
}

/// Whether any tracked form should make the browser ask before leaving
pub fn any_blocks_unload<'a>(trackers: impl IntoIterator<Item = &'a DirtyTracker>) -> bool {
    trackers.into_iter().any(DirtyTracker::blocks_unload)
}

/// Label shown on a submit button while the request is in flight
pub fn loading_label(button_text: &str) -> &'static str {
    if button_text.contains("Exclu") {
        "Excluindo..."
    } else {
        "Salvando..."
    }
}
