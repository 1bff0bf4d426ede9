//! Error types for rowbind core systems.

use std::fmt;

/// The error type for core dispatch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A queue drain was attempted from a thread other than the owner.
    WrongThread {
        /// Description of the operation that was attempted.
        operation: &'static str,
    },
    /// The dispatcher's queue has been disconnected.
    QueueDisconnected,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongThread { operation } => {
                write!(f, "`{operation}` must be called on the owner thread")
            }
            Self::QueueDisconnected => {
                write!(f, "The dispatcher queue has been disconnected")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// A specialized Result type for rowbind core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
