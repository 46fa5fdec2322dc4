//! The form-control adapter contract.
//!
//! A host form-management layer binds a value to a control through four
//! operations: write a value in, receive value changes out, receive the
//! "touched" signal, and toggle the disabled state. Both callbacks default to
//! no-ops so user interaction before registration is harmless.
//!
//! Callbacks are always invoked with no control lock held, so a callback may
//! call back into the control (e.g. a form field writing a normalized value).

use std::fmt;
use std::sync::{Arc, Mutex};

/// Callback invoked with the new value on every user-origin change.
pub type ChangeFn<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// Callback invoked when the control counts as touched.
pub type TouchedFn = Arc<dyn Fn() + Send + Sync>;

/// Capability implemented by every control that can be bound to a form.
pub trait FormControl {
    /// The value type exchanged with the form layer.
    type Value: Clone + Send + Sync + 'static;

    /// External write. Never emits a change notification. `None` resets the
    /// control to its empty value.
    fn write_value(&self, value: Option<Self::Value>);

    /// Register the callback receiving user-origin value changes.
    fn register_on_change(&self, f: ChangeFn<Self::Value>);

    /// Register the callback receiving the touched signal.
    fn register_on_touched(&self, f: TouchedFn);

    /// External enable/disable.
    fn set_disabled_state(&self, disabled: bool);
}

/// The registered adapter callbacks of one control.
pub struct ControlCallbacks<V> {
    on_change: Mutex<ChangeFn<V>>,
    on_touched: Mutex<TouchedFn>,
}

impl<V: 'static> ControlCallbacks<V> {
    pub fn new() -> Self {
        let on_change: ChangeFn<V> = Arc::new(|_: &V| {});
        let on_touched: TouchedFn = Arc::new(|| {});
        Self {
            on_change: Mutex::new(on_change),
            on_touched: Mutex::new(on_touched),
        }
    }

    /// Replace the change callback.
    pub fn set_on_change(&self, f: ChangeFn<V>) {
        if let Ok(mut guard) = self.on_change.lock() {
            *guard = f;
        }
    }

    /// Replace the touched callback.
    pub fn set_on_touched(&self, f: TouchedFn) {
        if let Ok(mut guard) = self.on_touched.lock() {
            *guard = f;
        }
    }

    /// Invoke the change callback.
    pub fn changed(&self, value: &V) {
        let f = self.on_change.lock().map(|guard| guard.clone());
        if let Ok(f) = f {
            f(value);
        }
    }

    /// Invoke the touched callback.
    pub fn touched(&self) {
        let f = self.on_touched.lock().map(|guard| guard.clone());
        if let Ok(f) = f {
            f();
        }
    }
}

impl<V: 'static> Default for ControlCallbacks<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ControlCallbacks<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlCallbacks").finish_non_exhaustive()
    }
}

/// Public change event: any number of listeners, notified in subscription
/// order.
pub struct ChangeEmitter<V> {
    listeners: Mutex<Vec<ChangeFn<V>>>,
}

impl<V> ChangeEmitter<V> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Add a listener.
    pub fn subscribe(&self, f: ChangeFn<V>) {
        if let Ok(mut guard) = self.listeners.lock() {
            guard.push(f);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify every listener with `value`.
    pub fn emit(&self, value: &V) {
        let listeners = self
            .listeners
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        for listener in listeners {
            listener(value);
        }
    }
}

impl<V> Default for ChangeEmitter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ChangeEmitter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("listeners", &self.len())
            .finish()
    }
}
