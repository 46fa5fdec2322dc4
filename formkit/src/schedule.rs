//! Deferred post-render callbacks.
//!
//! Some adjustments depend on geometry that only exists after the host has
//! rendered the latest state (e.g. scrolling the focused option into view right
//! after a dropdown opens). Controls schedule such work on a [`FrameQueue`];
//! the host calls [`FrameQueue::flush`] once per render pass with the fresh
//! layout.
//!
//! Tasks are single-shot. A [`TaskHandle`] cancels a task that has not run yet;
//! dropping the handle leaves the task scheduled.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use crate::layout::LayoutResult;

/// A deferred task, run with the layout of the render pass that flushed it.
pub type DeferredFn = Box<dyn FnOnce(&LayoutResult) + Send>;

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    tasks: Vec<(TaskId, DeferredFn)>,
}

/// Queue of callbacks to run after the next render pass.
///
/// Cheap to clone; clones share the same queue.
#[derive(Clone, Default)]
pub struct FrameQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `f` to run on the next [`flush`](Self::flush).
    pub fn schedule<F>(&self, f: F) -> TaskHandle
    where
        F: FnOnce(&LayoutResult) + Send + 'static,
    {
        let id = match self.inner.lock() {
            Ok(mut guard) => {
                let id = TaskId(guard.next_id);
                guard.next_id += 1;
                guard.tasks.push((id, Box::new(f)));
                id
            }
            Err(_) => {
                log::warn!("FrameQueue::schedule on poisoned queue, task dropped");
                TaskId(u64::MAX)
            }
        };
        log::trace!("FrameQueue::schedule task={:?}", id);
        TaskHandle {
            id,
            queue: Arc::downgrade(&self.inner),
        }
    }

    /// Number of tasks waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.inner.lock().map(|guard| guard.tasks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Run every task scheduled before this call, in scheduling order.
    ///
    /// Tasks scheduled while flushing wait for the next flush. Returns the
    /// number of tasks run.
    pub fn flush(&self, layout: &LayoutResult) -> usize {
        let tasks = match self.inner.lock() {
            Ok(mut guard) => std::mem::take(&mut guard.tasks),
            Err(_) => return 0,
        };
        let count = tasks.len();
        for (id, task) in tasks {
            log::trace!("FrameQueue::flush running task={:?}", id);
            task(layout);
        }
        count
    }

    /// Drop every pending task without running it.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.tasks.clear();
        }
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Handle to a scheduled task.
#[derive(Debug)]
pub struct TaskHandle {
    id: TaskId,
    queue: Weak<Mutex<QueueInner>>,
}

impl TaskHandle {
    /// Get the task id.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Whether the task is still waiting to run.
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .and_then(|queue| {
                queue
                    .lock()
                    .ok()
                    .map(|guard| guard.tasks.iter().any(|(id, _)| *id == self.id))
            })
            .unwrap_or(false)
    }

    /// Cancel the task. Returns true if it had not run yet.
    pub fn cancel(self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        let Ok(mut guard) = queue.lock() else {
            return false;
        };
        let before = guard.tasks.len();
        guard.tasks.retain(|(id, _)| *id != self.id);
        let cancelled = guard.tasks.len() != before;
        if cancelled {
            log::trace!("TaskHandle::cancel task={:?}", self.id);
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_flush_runs_in_order_once() {
        let queue = FrameQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let log = Arc::clone(&log);
            queue.schedule(move |_| log.lock().unwrap().push(n));
        }

        assert_eq!(queue.pending(), 3);
        assert_eq!(queue.flush(&LayoutResult::new()), 3);
        assert_eq!(queue.flush(&LayoutResult::new()), 0);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cancel_before_flush() {
        let queue = FrameQueue::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let handle = queue.schedule(move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });

        assert!(handle.is_pending());
        assert!(handle.cancel());
        queue.flush(&LayoutResult::new());
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_after_run_is_noop() {
        let queue = FrameQueue::new();
        let handle = queue.schedule(|_| {});
        queue.flush(&LayoutResult::new());
        assert!(!handle.is_pending());
        assert!(!handle.cancel());
    }

    #[test]
    fn test_task_scheduled_during_flush_waits() {
        let queue = FrameQueue::new();
        let inner = queue.clone();
        queue.schedule(move |_| {
            inner.schedule(|_| {});
        });

        assert_eq!(queue.flush(&LayoutResult::new()), 1);
        assert_eq!(queue.pending(), 1);
    }
}
