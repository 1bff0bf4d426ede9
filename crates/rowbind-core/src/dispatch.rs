//! The UI mutation queue.
//!
//! A [`UiDispatcher`] carries closures from arbitrary threads to the single
//! owner (UI) thread. It is the explicit replacement for implicit
//! "re-dispatch to the main queue" tricks inside property setters: callers
//! that find themselves off the owner thread post their mutation here once,
//! and the owner thread applies everything queued the next time it calls
//! [`UiDispatcher::process_pending`].
//!
//! # How It Works
//!
//! 1. Any thread calls [`UiDispatcher::post`] with a boxed closure. The call
//!    returns immediately; there is no completion notification and no way to
//!    cancel a posted task.
//!
//! 2. The owner thread periodically drains the queue. Tasks run in posting
//!    order, exactly once each.
//!
//! Because posted work cannot be invalidated, closures must tolerate their
//! target having disappeared in the meantime (capture `Weak`, not `Arc`).

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::error::{CoreError, Result};
use crate::thread_check::ThreadAffinity;

/// A queued unit of work destined for the owner thread.
type Task = Box<dyn FnOnce() + Send>;

/// A queue of deferred mutations drained on the thread that created it.
///
/// The dispatcher is cheap to clone through `Arc` and may be shared freely;
/// only [`process_pending`](Self::process_pending) is restricted to the
/// owner thread.
pub struct UiDispatcher {
    affinity: ThreadAffinity,
    sender: Sender<Task>,
    receiver: Receiver<Task>,
}

impl UiDispatcher {
    /// Creates a dispatcher owned by the current thread.
    pub fn new() -> Arc<Self> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Arc::new(Self {
            affinity: ThreadAffinity::current(),
            sender,
            receiver,
        })
    }

    /// Returns `true` if the calling thread is the dispatcher's owner.
    #[inline]
    pub fn is_owner_thread(&self) -> bool {
        self.affinity.is_current()
    }

    /// Returns the affinity token for the owner thread.
    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    /// Posts a task to be run on the owner thread.
    ///
    /// Fire-and-forget: the task always runs on the next
    /// [`process_pending`](Self::process_pending), and there is no way to
    /// withdraw it. Posting from the owner thread is allowed; the task is
    /// still deferred until the queue is drained.
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        tracing::trace!(target: "rowbind_core::dispatch", "task posted");
        // The receiver lives as long as self, so send cannot fail.
        let _ = self.sender.send(Box::new(task));
    }

    /// Runs `task` immediately when called on the owner thread, otherwise
    /// posts it.
    pub fn run_or_post<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_owner_thread() {
            task();
        } else {
            self.post(task);
        }
    }

    /// Drains the queue, running every pending task in posting order.
    ///
    /// Must be called on the owner thread. Returns the number of tasks run.
    /// Tasks posted *while* draining (by tasks themselves or by other
    /// threads) are picked up in the same drain.
    pub fn process_pending(&self) -> usize {
        self.affinity.debug_assert_same_thread();

        let mut processed = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(task) => {
                    task();
                    processed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if processed > 0 {
            tracing::trace!(
                target: "rowbind_core::dispatch",
                processed,
                "drained dispatcher queue"
            );
        }
        processed
    }

    /// Fallible variant of [`process_pending`](Self::process_pending) for
    /// hosts that prefer an error over a debug assertion.
    pub fn try_process_pending(&self) -> Result<usize> {
        if !self.is_owner_thread() {
            return Err(CoreError::WrongThread {
                operation: "process_pending",
            });
        }
        Ok(self.process_pending())
    }

    /// Returns the number of tasks currently waiting.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_post_and_drain() {
        let dispatcher = UiDispatcher::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        dispatcher.post(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(dispatcher.pending_count(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(dispatcher.process_pending(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.pending_count(), 0);
    }

    #[test]
    fn test_cross_thread_post() {
        let dispatcher = UiDispatcher::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let d = dispatcher.clone();
        let c = counter.clone();
        std::thread::spawn(move || {
            for _ in 0..10 {
                let c = c.clone();
                d.post(move || {
                    c.fetch_add(1, Ordering::SeqCst);
                });
            }
        })
        .join()
        .unwrap();

        assert_eq!(dispatcher.process_pending(), 10);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_run_or_post_on_owner_is_immediate() {
        let dispatcher = UiDispatcher::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        dispatcher.run_or_post(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.pending_count(), 0);
    }

    #[test]
    fn test_run_or_post_off_owner_is_deferred() {
        let dispatcher = UiDispatcher::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let d = dispatcher.clone();
        let c = counter.clone();
        std::thread::spawn(move || {
            d.run_or_post(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        })
        .join()
        .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.process_pending(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_try_process_pending_rejects_other_threads() {
        let dispatcher = UiDispatcher::new();
        assert_eq!(dispatcher.try_process_pending(), Ok(0));

        let d = dispatcher.clone();
        let result = std::thread::spawn(move || d.try_process_pending())
            .join()
            .unwrap();
        assert_eq!(
            result,
            Err(CoreError::WrongThread {
                operation: "process_pending"
            })
        );
    }

    #[test]
    fn test_tasks_run_in_posting_order() {
        let dispatcher = UiDispatcher::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for i in 0..5 {
            let order = order.clone();
            dispatcher.post(move || order.lock().push(i));
        }

        dispatcher.process_pending();
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }
}
