//! Toggle widget state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::adapter::{ChangeEmitter, ChangeFn, ControlCallbacks};
use crate::id::{GlobalIds, IdSource, SWITCH_PREFIX, WidgetId};

/// Internal state for a toggle.
#[derive(Debug, Default)]
struct ToggleInner {
    /// Current on/off value (the only form-synchronized field)
    value: bool,
    disabled: bool,
    /// Display-only busy indicator
    loading: bool,
    label: String,
}

/// A boolean on/off switch.
///
/// Clones share state. User activation goes through [`toggle`](Self::toggle);
/// external writes go through [`set_value`](Self::set_value) and never
/// notify anyone.
///
/// # Example
///
/// ```
/// use formkit::widgets::ToggleControl;
///
/// let notifications = ToggleControl::new()
///     .with_label("Notifications")
///     .on_change(|on| println!("notifications: {on}"));
///
/// notifications.toggle();
/// assert!(notifications.value());
/// ```
#[derive(Debug, Clone)]
pub struct ToggleControl {
    id: WidgetId,
    inner: Arc<RwLock<ToggleInner>>,
    dirty: Arc<AtomicBool>,
    pub(super) callbacks: Arc<ControlCallbacks<bool>>,
    change: Arc<ChangeEmitter<bool>>,
}

impl ToggleControl {
    /// Create an unchecked, enabled toggle with an id from [`GlobalIds`].
    pub fn new() -> Self {
        Self::with_ids(&GlobalIds)
    }

    /// Create a toggle taking its id from `ids`.
    pub fn with_ids(ids: &dyn IdSource) -> Self {
        Self {
            id: ids.next_id(SWITCH_PREFIX),
            inner: Arc::new(RwLock::new(ToggleInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
            callbacks: Arc::new(ControlCallbacks::new()),
            change: Arc::new(ChangeEmitter::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Override the generated id.
    pub fn with_id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the visible label.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// Set the initial value without notifying anyone.
    pub fn with_value(self, value: bool) -> Self {
        self.set_value(value);
        self
    }

    /// Set the initial disabled state.
    pub fn with_disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Set the initial loading state.
    pub fn with_loading(self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Subscribe to the public change event.
    pub fn on_change(self, f: impl Fn(&bool) + Send + Sync + 'static) -> Self {
        self.subscribe_change(Arc::new(f));
        self
    }

    /// Get the control's id.
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current on/off value.
    pub fn value(&self) -> bool {
        self.inner.read().map(|guard| guard.value).unwrap_or(false)
    }

    /// External write. Accepted regardless of `disabled`; emits nothing.
    pub fn set_value(&self, value: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.value != value
        {
            guard.value = value;
            self.mark_dirty();
        }
    }

    /// User-origin activation.
    ///
    /// No-op while disabled. Otherwise flips the value, then notifies the
    /// adapter change callback, the public change event and the adapter
    /// touched callback, in that order. Returns whether the value flipped.
    pub fn toggle(&self) -> bool {
        let new_value = match self.inner.write() {
            Ok(mut guard) => {
                if guard.disabled {
                    log::debug!("ToggleControl::toggle id={} ignored (disabled)", self.id);
                    return false;
                }
                guard.value = !guard.value;
                guard.value
            }
            Err(_) => return false,
        };
        self.mark_dirty();
        log::debug!("ToggleControl::toggle id={} value={}", self.id, new_value);

        self.callbacks.changed(&new_value);
        self.change.emit(&new_value);
        self.callbacks.touched();
        true
    }

    /// Alias of [`toggle`](Self::toggle) for hosts forwarding raw
    /// click/activation events.
    pub fn handle_interaction(&self) -> bool {
        self.toggle()
    }

    /// Notify the adapter that the control was touched (e.g. on blur).
    pub fn mark_as_touched(&self) {
        self.callbacks.touched();
    }

    /// Add a listener to the public change event.
    pub fn subscribe_change(&self, f: ChangeFn<bool>) {
        self.change.subscribe(f);
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    /// Check if the toggle is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.read().map(|guard| guard.disabled).unwrap_or(false)
    }

    /// Enable or disable. Never alters the value.
    pub fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.disabled != disabled
        {
            guard.disabled = disabled;
            self.mark_dirty();
            log::debug!("ToggleControl::set_disabled id={} disabled={}", self.id, disabled);
        }
    }

    /// Check if the busy indicator is shown.
    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|guard| guard.loading).unwrap_or(false)
    }

    /// Show or hide the busy indicator.
    pub fn set_loading(&self, loading: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.loading != loading
        {
            guard.loading = loading;
            self.mark_dirty();
        }
    }

    /// Get the visible label.
    pub fn label(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.label.clone())
            .unwrap_or_default()
    }

    /// Set the visible label.
    pub fn set_label(&self, label: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.label = label.into();
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the toggle changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl Default for ToggleControl {
    fn default() -> Self {
        Self::new()
    }
}
