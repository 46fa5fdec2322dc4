//! A form-binding collaborator for controls.
//!
//! [`FormField`] is the model side of the adapter contract: it owns a value
//! plus the touched/dirty/disabled bookkeeping a form needs, and keeps any
//! number of bound controls in sync with it.
//!
//! # Example
//!
//! ```
//! use formkit::field::FormField;
//! use formkit::widgets::SelectControl;
//!
//! let framework = SelectControl::new([("rust", "Rust"), ("zig", "Zig")]);
//! let field = FormField::new(Some("zig"));
//! field.bind(&framework);
//!
//! assert_eq!(framework.selected_label(), "Zig");
//!
//! framework.click_option(0);
//! assert_eq!(field.value(), Some("rust"));
//! assert!(field.is_dirty());
//! ```

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use crate::adapter::FormControl;

type WriteFn<V> = Arc<dyn Fn(Option<V>) + Send + Sync>;
type DisableFn = Arc<dyn Fn(bool) + Send + Sync>;

/// Model-to-view handles of one bound control.
struct Binding<V> {
    write: WriteFn<V>,
    disable: DisableFn,
}

impl<V> Clone for Binding<V> {
    fn clone(&self) -> Self {
        Self {
            write: Arc::clone(&self.write),
            disable: Arc::clone(&self.disable),
        }
    }
}

struct FieldInner<V> {
    value: Option<V>,
    /// Value restored by `reset`
    initial: Option<V>,
    touched: bool,
    /// Set by user-origin changes only
    dirty: bool,
    disabled: bool,
    bindings: Vec<Binding<V>>,
}

/// Value holder bound to one or more controls.
///
/// Clones share state. Controls are held strongly by the field; the
/// callbacks registered on the controls refer back to the field weakly, so
/// dropping every field handle releases everything.
pub struct FormField<V> {
    inner: Arc<RwLock<FieldInner<V>>>,
}

impl<V> FormField<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an enabled field holding `initial`.
    pub fn new(initial: Option<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FieldInner {
                value: initial.clone(),
                initial,
                touched: false,
                dirty: false,
                disabled: false,
                bindings: Vec::new(),
            })),
        }
    }

    /// Create a field that starts disabled.
    pub fn disabled(initial: Option<V>) -> Self {
        let field = Self::new(initial);
        if let Ok(mut guard) = field.inner.write() {
            guard.disabled = true;
        }
        field
    }

    /// Get the current value.
    pub fn value(&self) -> Option<V> {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or(None)
    }

    /// Whether any bound control reported a touch.
    pub fn is_touched(&self) -> bool {
        self.inner.read().map(|guard| guard.touched).unwrap_or(false)
    }

    /// Whether the value changed through user interaction.
    pub fn is_dirty(&self) -> bool {
        self.inner.read().map(|guard| guard.dirty).unwrap_or(false)
    }

    /// Check if the field is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.read().map(|guard| guard.disabled).unwrap_or(false)
    }

    /// Get the number of bound controls.
    pub fn binding_count(&self) -> usize {
        self.inner.read().map(|guard| guard.bindings.len()).unwrap_or(0)
    }

    /// Bind `control` to this field.
    ///
    /// Writes the current value (and disabled state) into the control, then
    /// registers the change and touched callbacks.
    pub fn bind<C>(&self, control: &C)
    where
        C: FormControl<Value = V> + Clone + Send + Sync + 'static,
    {
        control.write_value(self.value());
        if self.is_disabled() {
            control.set_disabled_state(true);
        }

        let weak = Arc::downgrade(&self.inner);
        control.register_on_change(Arc::new(move |value: &V| {
            with_upgraded(&weak, |inner| {
                inner.value = Some(value.clone());
                inner.dirty = true;
            });
        }));

        let weak = Arc::downgrade(&self.inner);
        control.register_on_touched(Arc::new(move || {
            with_upgraded(&weak, |inner| inner.touched = true);
        }));

        let writer = control.clone();
        let disabler = control.clone();
        let binding = Binding {
            write: Arc::new(move |value| writer.write_value(value)),
            disable: Arc::new(move |disabled| disabler.set_disabled_state(disabled)),
        };
        if let Ok(mut guard) = self.inner.write() {
            guard.bindings.push(binding);
        }
        log::debug!("FormField::bind bindings={}", self.binding_count());
    }

    /// Programmatic write. Updates every bound control without marking the
    /// field dirty.
    pub fn set_value(&self, value: Option<V>) {
        let bindings = match self.inner.write() {
            Ok(mut guard) => {
                guard.value = value.clone();
                guard.bindings.clone()
            }
            Err(_) => return,
        };
        for binding in bindings {
            (binding.write)(value.clone());
        }
    }

    /// Disable the field and every bound control.
    pub fn disable(&self) {
        self.set_disabled(true);
    }

    /// Enable the field and every bound control.
    pub fn enable(&self) {
        self.set_disabled(false);
    }

    fn set_disabled(&self, disabled: bool) {
        let bindings = match self.inner.write() {
            Ok(mut guard) => {
                guard.disabled = disabled;
                guard.bindings.clone()
            }
            Err(_) => return,
        };
        log::debug!("FormField::set_disabled disabled={}", disabled);
        for binding in bindings {
            (binding.disable)(disabled);
        }
    }

    /// Mark the field as touched.
    pub fn mark_as_touched(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.touched = true;
        }
    }

    /// Restore the initial value and clear touched/dirty.
    pub fn reset(&self) {
        let initial = match self.inner.write() {
            Ok(mut guard) => {
                guard.touched = false;
                guard.dirty = false;
                guard.initial.clone()
            }
            Err(_) => return,
        };
        self.set_value(initial);
    }
}

fn with_upgraded<V>(weak: &Weak<RwLock<FieldInner<V>>>, f: impl FnOnce(&mut FieldInner<V>)) {
    if let Some(inner) = weak.upgrade()
        && let Ok(mut guard) = inner.write()
    {
        f(&mut *guard);
    }
}

impl<V> Clone for FormField<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for FormField<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.read() {
            Ok(guard) => f
                .debug_struct("FormField")
                .field("value", &guard.value)
                .field("touched", &guard.touched)
                .field("dirty", &guard.dirty)
                .field("disabled", &guard.disabled)
                .field("bindings", &guard.bindings.len())
                .finish(),
            Err(_) => f.write_str("FormField { <poisoned> }"),
        }
    }
}
