//! Logging facilities for rowbind.
//!
//! rowbind uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the embedding application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Log volume is low by design: structural reconciliation logs at `debug`,
//! queue traffic and property pushes at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=rowbind::reconcile=debug`.
pub mod targets {
    /// Mutation queue traffic.
    pub const DISPATCH: &str = "rowbind_core::dispatch";
    /// Batch insert/delete/move reconciliation.
    pub const RECONCILE: &str = "rowbind::reconcile";
    /// Cell attach/detach and property pushes.
    pub const BINDING: &str = "rowbind::binding";
    /// Model CRUD on sections and items.
    pub const MODEL: &str = "rowbind::model";
}
