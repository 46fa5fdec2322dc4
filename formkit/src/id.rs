//! Unique display ids for controls.
//!
//! Ids are used by hosts to link labels, listboxes and options for
//! accessibility (`aria-labelledby`, `aria-controls`, ...). Generation is
//! injected through [`IdSource`] so tests can use an isolated, deterministic
//! counter instead of process-wide state.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

/// Prefix used for toggle (switch) ids.
pub const SWITCH_PREFIX: &str = "ui-switch";
/// Prefix used for select ids.
pub const SELECT_PREFIX: &str = "ui-select";

/// Unique identifier for a control instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the element carrying the visible label.
    pub fn label_id(&self) -> String {
        format!("{}-label", self.0)
    }

    /// Id of the dropdown list container.
    pub fn listbox_id(&self) -> String {
        format!("{}-listbox", self.0)
    }

    /// Id of the option row at `index`.
    pub fn option_id(&self, index: usize) -> String {
        format!("{}-opt-{}", self.0, index)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Source of unique ids.
pub trait IdSource: Send + Sync {
    /// Produce the next id for the given prefix.
    fn next_id(&self, prefix: &str) -> WidgetId;
}

/// Per-prefix counters owned by a single source.
///
/// Produces `prefix-0`, `prefix-1`, ... independently for each prefix.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counters: Mutex<HashMap<String, usize>>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self, prefix: &str) -> WidgetId {
        next_from(&self.counters, prefix)
    }
}

fn next_from(counters: &Mutex<HashMap<String, usize>>, prefix: &str) -> WidgetId {
    let n = match counters.lock() {
        Ok(mut guard) => {
            let slot = guard.entry(prefix.to_string()).or_insert(0);
            let n = *slot;
            *slot += 1;
            n
        }
        Err(_) => {
            // Poisoned: fall back to a shared counter so ids stay unique.
            static FALLBACK: AtomicUsize = AtomicUsize::new(0);
            FALLBACK.fetch_add(1, Ordering::SeqCst)
        }
    };
    WidgetId(format!("{}-{}", prefix, n))
}

fn global_counters() -> &'static Mutex<HashMap<String, usize>> {
    static COUNTERS: OnceLock<Mutex<HashMap<String, usize>>> = OnceLock::new();
    COUNTERS.get_or_init(Default::default)
}

/// Process-wide counters. Default source for controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalIds;

impl IdSource for GlobalIds {
    fn next_id(&self, prefix: &str) -> WidgetId {
        next_from(global_counters(), prefix)
    }
}

/// Reset the process-wide counters used by [`GlobalIds`].
///
/// Intended for tests that assert on generated ids.
pub fn reset_global_ids() {
    if let Ok(mut guard) = global_counters().lock() {
        guard.clear();
    }
}

/// Random ids (`prefix-<uuid v4>`), for hosts that merge controls from
/// several independently rendered documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self, prefix: &str) -> WidgetId {
        WidgetId(format!("{}-{}", prefix, uuid::Uuid::new_v4().simple()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_per_prefix() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id("ui-switch").as_str(), "ui-switch-0");
        assert_eq!(ids.next_id("ui-switch").as_str(), "ui-switch-1");
        assert_eq!(ids.next_id("ui-select").as_str(), "ui-select-0");
    }

    #[test]
    fn test_sources_are_isolated() {
        let a = SequentialIds::new();
        let b = SequentialIds::new();
        a.next_id("x");
        assert_eq!(b.next_id("x").as_str(), "x-0");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let a = UuidIds.next_id("ui-select");
        let b = UuidIds.next_id("ui-select");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("ui-select-"));
    }

    #[test]
    fn test_global_ids_restart_after_reset() {
        let prefix = "global-reset";
        assert_eq!(GlobalIds.next_id(prefix).as_str(), "global-reset-0");
        assert_eq!(GlobalIds.next_id(prefix).as_str(), "global-reset-1");

        reset_global_ids();

        assert_eq!(GlobalIds.next_id(prefix).as_str(), "global-reset-0");
    }

    #[test]
    fn test_derived_ids() {
        let id = WidgetId::new("ui-select-3");
        assert_eq!(id.label_id(), "ui-select-3-label");
        assert_eq!(id.listbox_id(), "ui-select-3-listbox");
        assert_eq!(id.option_id(2), "ui-select-3-opt-2");
    }
}
