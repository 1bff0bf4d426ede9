//! Thread affinity verification utilities.
//!
//! UI-facing operations in rowbind must be performed on a single designated
//! owner thread. This module provides a small affinity token that records
//! which thread an object belongs to and lets callers verify it later.
//!
//! Two levels of checking are provided:
//!
//! - [`ThreadAffinity::debug_assert_same_thread`]: only active in debug
//!   builds. Use liberally in hot paths.
//! - [`ThreadAffinity::assert_same_thread`]: always active. Use where a
//!   violation must be caught even in release builds.
//!
//! ```
//! use rowbind_core::ThreadAffinity;
//!
//! struct Controller {
//!     affinity: ThreadAffinity,
//! }
//!
//! impl Controller {
//!     fn new() -> Self {
//!         Self { affinity: ThreadAffinity::current() }
//!     }
//!
//!     fn update(&self) {
//!         self.affinity.debug_assert_same_thread();
//!         // ... safe to touch UI state ...
//!     }
//! }
//! ```

use std::thread::ThreadId;

/// Records the thread an object was created on so later calls can verify
/// they are still on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl ThreadAffinity {
    /// Captures the current thread as the owning thread.
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Returns the owning thread's ID.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Returns `true` if the calling thread is the owning thread.
    #[inline]
    pub fn is_current(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panics if the calling thread is not the owning thread.
    ///
    /// Active in all build profiles.
    #[track_caller]
    pub fn assert_same_thread(&self) {
        if !self.is_current() {
            panic!(
                "operation performed on {:?}, but the owner thread is {:?}",
                std::thread::current().id(),
                self.thread_id
            );
        }
    }

    /// Panics in debug builds if the calling thread is not the owning thread.
    ///
    /// Compiles to nothing in release builds.
    #[track_caller]
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_thread() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_current());
        affinity.assert_same_thread();
    }

    #[test]
    fn test_other_thread() {
        let affinity = ThreadAffinity::current();
        let handle = std::thread::spawn(move || affinity.is_current());
        assert!(!handle.join().unwrap());
    }

    #[test]
    fn test_assert_panics_off_thread() {
        let affinity = ThreadAffinity::current();
        let handle = std::thread::spawn(move || {
            std::panic::catch_unwind(|| affinity.assert_same_thread()).is_err()
        });
        assert!(handle.join().unwrap());
    }
}
