//! Core systems for rowbind.
//!
//! This crate provides the foundational pieces shared by the rowbind
//! data-binding layer, with no knowledge of the table model itself:
//!
//! - **Thread Affinity**: tracking which thread owns the UI, with debug
//!   assertions for code that must only run there
//! - **UI Dispatcher**: an explicit mutation queue that lets any thread post
//!   work to be applied on the owner thread
//! - **Errors**: the core error type
//!
//! # Threading Model
//!
//! All widget interaction and all model mutation are expected to happen on a
//! single designated owner thread. There is exactly one sanctioned
//! cross-thread entry point: posting a closure to a [`UiDispatcher`]. The
//! owner thread drains the queue with [`UiDispatcher::process_pending`];
//! posted work is fire-and-forget and cannot be cancelled.
//!
//! ```
//! use rowbind_core::UiDispatcher;
//!
//! let dispatcher = UiDispatcher::new(); // adopts the current thread as owner
//!
//! let d = dispatcher.clone();
//! std::thread::spawn(move || {
//!     d.post(|| println!("applied on the owner thread"));
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(dispatcher.process_pending(), 1);
//! ```

pub mod dispatch;
pub mod error;
pub mod logging;
pub mod thread_check;

pub use dispatch::UiDispatcher;
pub use error::{CoreError, Result};
pub use thread_check::ThreadAffinity;
