//! Select widget state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::adapter::{ChangeEmitter, ChangeFn, ControlCallbacks};
use crate::id::{GlobalIds, IdSource, SELECT_PREFIX, WidgetId};
use crate::scroll::{self, ListScroll};
use crate::schedule::{FrameQueue, TaskHandle};

use super::item::{self, SelectOption};

/// Placeholder shown when nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// Internal state for a Select widget.
#[derive(Debug)]
struct SelectInner<V> {
    /// Current value (None = no selection)
    value: Option<V>,
    /// Label of the option matching `value`, "" when none matches
    selected_label: String,
    is_open: bool,
    /// Keyboard focus inside the open list; always None while closed
    focused: Option<usize>,
    disabled: bool,
    error: bool,
    options: Vec<SelectOption<V>>,
    label: String,
    placeholder: String,
    scroll: ListScroll,
    /// Deferred scroll-into-view waiting for the next render pass
    pending_scroll: Option<TaskHandle>,
}

impl<V> Default for SelectInner<V> {
    fn default() -> Self {
        Self {
            value: None,
            selected_label: String::new(),
            is_open: false,
            focused: None,
            disabled: false,
            error: false,
            options: Vec::new(),
            label: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            scroll: ListScroll::new(),
            pending_scroll: None,
        }
    }
}

impl<V> SelectInner<V> {
    fn cancel_pending_scroll(&mut self) {
        if let Some(handle) = self.pending_scroll.take() {
            handle.cancel();
        }
    }

    /// Close the list. Returns true if it was open.
    fn close(&mut self) -> bool {
        self.cancel_pending_scroll();
        self.focused = None;
        std::mem::replace(&mut self.is_open, false)
    }

    fn focused_option(&self) -> Option<&SelectOption<V>> {
        self.focused.and_then(|i| self.options.get(i))
    }
}

/// A single-value dropdown with keyboard navigation.
///
/// `SelectControl` owns its open/closed state, the keyboard focus inside the
/// open list and the current value. Clones share state, so the host can keep
/// one for rendering while a form field holds another.
///
/// Opening the list and moving the focus schedule a scroll-into-view on the
/// control's [`FrameQueue`]; the host flushes it after rendering with the
/// fresh layout (see [`scheduler`](Self::scheduler)).
///
/// # Example
///
/// ```
/// use formkit::event::{Key, KeyCombo};
/// use formkit::widgets::{SelectControl, Widget};
///
/// let priority = SelectControl::new([("low", "Low"), ("high", "High")])
///     .with_placeholder("Choose priority");
///
/// priority.on_key(&KeyCombo::key(Key::Enter)); // open
/// priority.on_key(&KeyCombo::key(Key::Down));  // focus "High"
/// priority.on_key(&KeyCombo::key(Key::Enter)); // select it
///
/// assert_eq!(priority.value(), Some("high"));
/// assert_eq!(priority.selected_label(), "High");
/// ```
#[derive(Debug)]
pub struct SelectControl<V> {
    id: WidgetId,
    inner: Arc<RwLock<SelectInner<V>>>,
    dirty: Arc<AtomicBool>,
    pub(super) callbacks: Arc<ControlCallbacks<V>>,
    change: Arc<ChangeEmitter<V>>,
    scheduler: FrameQueue,
}

impl<V> SelectControl<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a closed select over `options`, with an id from [`GlobalIds`].
    pub fn new<O>(options: impl IntoIterator<Item = O>) -> Self
    where
        O: Into<SelectOption<V>>,
    {
        Self::with_ids(&GlobalIds, options)
    }

    /// Create a select taking its id from `ids`.
    pub fn with_ids<O>(ids: &dyn IdSource, options: impl IntoIterator<Item = O>) -> Self
    where
        O: Into<SelectOption<V>>,
    {
        let inner = SelectInner {
            options: options.into_iter().map(Into::into).collect(),
            ..SelectInner::default()
        };
        Self {
            id: ids.next_id(SELECT_PREFIX),
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
            callbacks: Arc::new(ControlCallbacks::new()),
            change: Arc::new(ChangeEmitter::new()),
            scheduler: FrameQueue::new(),
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

    /// Share a frame queue with other controls of the same host.
    pub fn with_scheduler(mut self, scheduler: FrameQueue) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Set the visible label.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// Set the text shown when nothing is selected.
    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.set_placeholder(placeholder);
        self
    }

    /// Set the initial value without notifying anyone.
    pub fn with_value(self, value: Option<V>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the initial disabled state.
    pub fn with_disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Set the initial error state.
    pub fn with_error(self, error: bool) -> Self {
        self.set_error(error);
        self
    }

    /// Subscribe to the public change event.
    pub fn on_change(self, f: impl Fn(&V) + Send + Sync + 'static) -> Self {
        self.subscribe_change(Arc::new(f));
        self
    }

    /// Get the control's id.
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// The queue deferred scroll adjustments are scheduled on.
    pub fn scheduler(&self) -> &FrameQueue {
        &self.scheduler
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current value.
    pub fn value(&self) -> Option<V> {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or(None)
    }

    /// Label of the selected option, `""` when nothing matches.
    pub fn selected_label(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.selected_label.clone())
            .unwrap_or_default()
    }

    /// External write. Re-derives the selected label; emits nothing.
    ///
    /// A value with no matching option is kept as-is and displays as no
    /// selection.
    pub fn set_value(&self, value: Option<V>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected_label = item::label_for(&guard.options, value.as_ref());
            guard.value = value;
            self.mark_dirty();
        }
    }

    /// Select `option` on behalf of the user.
    ///
    /// No-op while disabled. Closes the list, then notifies the adapter change
    /// callback and the public change event with the option's value. The
    /// option's own `disabled` flag is not checked here; see
    /// [`click_option`](Self::click_option).
    pub fn select_option(&self, option: &SelectOption<V>) {
        match self.inner.write() {
            Ok(mut guard) => {
                if guard.disabled {
                    log::debug!("SelectControl::select_option id={} ignored (disabled)", self.id);
                    return;
                }
                guard.value = Some(option.value.clone());
                guard.selected_label = option.label.clone();
                guard.close();
            }
            Err(_) => return,
        }
        self.mark_dirty();
        log::debug!(
            "SelectControl::select_option id={} label={:?}",
            self.id,
            option.label
        );

        self.callbacks.changed(&option.value);
        self.change.emit(&option.value);
    }

    /// Pointer selection of the option at `index`.
    ///
    /// Ignores out-of-range indices and disabled options. Returns whether a
    /// selection happened.
    pub fn click_option(&self, index: usize) -> bool {
        let option = match self.inner.read() {
            Ok(guard) if !guard.disabled => guard.options.get(index).cloned(),
            _ => None,
        };
        match option {
            Some(option) if !option.disabled => {
                self.select_option(&option);
                true
            }
            _ => false,
        }
    }

    /// Notify the adapter that the control was touched.
    pub fn mark_as_touched(&self) {
        self.callbacks.touched();
    }

    /// Add a listener to the public change event.
    pub fn subscribe_change(&self, f: ChangeFn<V>) {
        self.change.subscribe(f);
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Check if the option list is open.
    pub fn is_open(&self) -> bool {
        self.inner.read().map(|guard| guard.is_open).unwrap_or(false)
    }

    /// Open the list.
    ///
    /// No-op while disabled or already open. Focuses the selected option, or
    /// the first enabled option, or nothing when no option is enabled. Notifies
    /// the touched callback and schedules a scroll-into-view.
    pub fn open(&self) {
        match self.inner.write() {
            Ok(mut guard) => {
                if guard.disabled || guard.is_open {
                    return;
                }
                guard.is_open = true;
                guard.focused = item::index_of(&guard.options, guard.value.as_ref())
                    .or_else(|| item::edge_enabled(&guard.options, true));
                self.schedule_scroll_into_view(&mut *guard);
                log::debug!(
                    "SelectControl::open id={} focused={:?} options={}",
                    self.id,
                    guard.focused,
                    guard.options.len()
                );
            }
            Err(_) => return,
        }
        self.mark_dirty();
        self.callbacks.touched();
    }

    /// Close the list and clear the keyboard focus. Idempotent.
    pub fn close(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.close()
        {
            self.mark_dirty();
            log::debug!("SelectControl::close id={}", self.id);
        }
    }

    /// Close if open, open if closed. No-op while disabled.
    pub fn toggle_open(&self) {
        if self.is_disabled() {
            return;
        }
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Close in response to a pointer interaction outside the control.
    ///
    /// For hosts that hit-test themselves. Returns true if the list closed.
    pub fn handle_outside_interaction(&self) -> bool {
        let closed = self
            .inner
            .write()
            .map(|mut guard| guard.close())
            .unwrap_or(false);
        if closed {
            self.mark_dirty();
            log::debug!("SelectControl::close id={} (outside interaction)", self.id);
        }
        closed
    }

    // -------------------------------------------------------------------------
    // Keyboard focus (while open)
    // -------------------------------------------------------------------------

    /// Focused option index, `None` when closed or nothing is focusable.
    pub fn focused_index(&self) -> Option<usize> {
        self.inner.read().map(|guard| guard.focused).unwrap_or(None)
    }

    /// Move the focus to the next (or previous) enabled option, wrapping.
    pub fn move_focus(&self, forward: bool) {
        self.update_focus(|inner| item::step_enabled(&inner.options, inner.focused, forward));
    }

    /// Move the focus to the first enabled option.
    pub fn focus_first(&self) {
        self.update_focus(|inner| item::edge_enabled(&inner.options, true));
    }

    /// Move the focus to the last enabled option.
    pub fn focus_last(&self) {
        self.update_focus(|inner| item::edge_enabled(&inner.options, false));
    }

    /// Move the focus to `index` (pointer hover). Disabled options are
    /// skipped.
    pub fn hover_option(&self, index: usize) -> bool {
        let mut moved = false;
        self.update_focus(|inner| match inner.options.get(index) {
            Some(opt) if !opt.disabled => {
                moved = true;
                Some(index)
            }
            _ => inner.focused,
        });
        moved
    }

    /// Select the focused option. Disabled options are not selectable from the
    /// keyboard; with no focused option the list closes.
    pub(super) fn commit_focused(&self) {
        enum Commit<V> {
            Select(SelectOption<V>),
            Skip,
            Close,
        }

        let commit = match self.inner.read() {
            Ok(guard) => match guard.focused_option() {
                Some(opt) if opt.disabled => Commit::Skip,
                Some(opt) => Commit::Select(opt.clone()),
                None => Commit::Close,
            },
            Err(_) => return,
        };

        match commit {
            Commit::Select(option) => self.select_option(&option),
            Commit::Skip => {
                log::debug!("SelectControl::commit_focused id={} skipped disabled option", self.id)
            }
            Commit::Close => self.close(),
        }
    }

    fn update_focus<F>(&self, f: F)
    where
        F: FnOnce(&SelectInner<V>) -> Option<usize>,
    {
        if let Ok(mut guard) = self.inner.write() {
            if !guard.is_open || guard.disabled {
                return;
            }
            let focused = f(&*guard);
            if focused != guard.focused {
                guard.focused = focused;
                self.mark_dirty();
                log::trace!("SelectControl::focus id={} focused={:?}", self.id, focused);
            }
            self.schedule_scroll_into_view(&mut *guard);
        }
    }

    // -------------------------------------------------------------------------
    // Deferred scroll
    // -------------------------------------------------------------------------

    /// Current scroll offset of the option list.
    pub fn scroll_offset(&self) -> u16 {
        self.inner.read().map(|guard| guard.scroll.offset).unwrap_or(0)
    }

    /// Whether a scroll-into-view is waiting for the next render pass.
    pub fn has_pending_scroll(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.pending_scroll.as_ref().is_some_and(TaskHandle::is_pending))
            .unwrap_or(false)
    }

    /// Replace any pending scroll with a new one for the current focus.
    ///
    /// The task holds only a weak reference: it is a no-op once the control
    /// is dropped, closed, or its focus no longer points at a valid option.
    fn schedule_scroll_into_view(&self, inner: &mut SelectInner<V>) {
        inner.cancel_pending_scroll();

        let weak = Arc::downgrade(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        let id = self.id.clone();
        let handle = self.scheduler.schedule(move |layout| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = shared.write() else {
                return;
            };
            guard.pending_scroll = None;

            if !guard.is_open {
                return;
            }
            let len = guard.options.len();
            let Some(index) = guard.focused.filter(|i| *i < len) else {
                return;
            };
            let Some(listbox) = layout.get(&id.listbox_id()).copied() else {
                log::trace!("SelectControl::scroll id={} listbox not laid out", id);
                return;
            };
            let row_height = layout
                .get(&id.option_id(index))
                .map(|rect| rect.height.max(1))
                .unwrap_or(1);

            let content_height = scroll::rows_extent(len, row_height);
            guard.scroll.set_dimensions(listbox.height, content_height);
            let top = scroll::rows_extent(index, row_height);
            if guard.scroll.ensure_visible(top, row_height) {
                dirty.store(true, Ordering::SeqCst);
                log::trace!(
                    "SelectControl::scroll id={} index={} offset={}",
                    id,
                    index,
                    guard.scroll.offset
                );
            }
        });
        inner.pending_scroll = Some(handle);
    }

    // -------------------------------------------------------------------------
    // Options and flags
    // -------------------------------------------------------------------------

    /// Get a copy of the options.
    pub fn options(&self) -> Vec<SelectOption<V>> {
        self.inner
            .read()
            .map(|guard| guard.options.clone())
            .unwrap_or_default()
    }

    /// Replace the option list.
    ///
    /// Re-derives the selected label. While open, keeps the focus when it
    /// still points at an enabled option, otherwise re-clamps it to the
    /// nearest enabled option (or none).
    pub fn set_options<O>(&self, options: impl IntoIterator<Item = O>)
    where
        O: Into<SelectOption<V>>,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.options = options.into_iter().map(Into::into).collect();
            guard.selected_label = item::label_for(&guard.options, guard.value.as_ref());

            if guard.is_open {
                let len = guard.options.len();
                guard.focused = match guard.focused {
                    Some(i) if i < len && !guard.options[i].disabled => Some(i),
                    Some(i) if len > 0 => {
                        let clamped = i.min(len - 1);
                        if guard.options[clamped].disabled {
                            item::step_enabled(&guard.options, Some(clamped), false)
                                .filter(|j| !guard.options[*j].disabled)
                        } else {
                            Some(clamped)
                        }
                    }
                    _ => item::edge_enabled(&guard.options, true),
                };
                self.schedule_scroll_into_view(&mut *guard);
            } else {
                guard.scroll.reset();
            }
            self.mark_dirty();
        }
    }

    /// Get the number of options.
    pub fn option_count(&self) -> usize {
        self.inner.read().map(|guard| guard.options.len()).unwrap_or(0)
    }

    /// Check if the select is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.read().map(|guard| guard.disabled).unwrap_or(false)
    }

    /// Enable or disable. Disabling an open select closes it.
    pub fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.disabled == disabled {
                return;
            }
            guard.disabled = disabled;
            if disabled {
                guard.close();
            }
            self.mark_dirty();
            log::debug!("SelectControl::set_disabled id={} disabled={}", self.id, disabled);
        }
    }

    /// Check if the select is in the error state.
    pub fn has_error(&self) -> bool {
        self.inner.read().map(|guard| guard.error).unwrap_or(false)
    }

    /// Set the error state.
    pub fn set_error(&self, error: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.error != error
        {
            guard.error = error;
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

    /// Get the placeholder text.
    pub fn placeholder(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.placeholder.clone())
            .unwrap_or_default()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.placeholder = placeholder.into();
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the select changed since the last render.
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

    /// Read access for the render snapshot.
    pub(super) fn with_inner<R>(&self, f: impl FnOnce(RenderState<'_, V>) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| {
            f(RenderState {
                value: guard.value.as_ref(),
                selected_label: &guard.selected_label,
                is_open: guard.is_open,
                focused: guard.focused,
                disabled: guard.disabled,
                error: guard.error,
                options: &guard.options,
                label: &guard.label,
                placeholder: &guard.placeholder,
                scroll_offset: guard.scroll.offset,
            })
        })
    }
}

/// Borrowed view of the inner state used by `render`.
pub(super) struct RenderState<'a, V> {
    pub value: Option<&'a V>,
    pub selected_label: &'a str,
    pub is_open: bool,
    pub focused: Option<usize>,
    pub disabled: bool,
    pub error: bool,
    pub options: &'a [SelectOption<V>],
    pub label: &'a str,
    pub placeholder: &'a str,
    pub scroll_offset: u16,
}

impl<V> Clone for SelectControl<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            callbacks: Arc::clone(&self.callbacks),
            change: Arc::clone(&self.change),
            scheduler: self.scheduler.clone(),
        }
    }
}
