//! The view side: cell binding, the widget boundary, and reconciliation.
//!
//! [`TableCell`] and [`CellSlot`] define the binding protocol between items
//! and reusable cells. [`ListWidget`] is the full surface a platform list
//! view must implement; [`TableController`] drives one, and [`TableSource`]
//! is the query surface it answers the widget with.

mod adapter;
mod cell;
mod context;
mod controller;
mod widget;

#[cfg(test)]
pub(crate) mod mock;

pub use adapter::TableSource;
pub use cell::{
    CellSlot, HeaderFooterView, TableCell, DEFAULT_CELL_REUSE_ID, DEFAULT_HEADER_FOOTER_HEIGHT,
    DEFAULT_HEADER_FOOTER_REUSE_ID, DEFAULT_ROW_HEIGHT,
};
pub use context::SelectionContext;
pub use controller::TableController;
pub use widget::{ListWidget, RowAnimation};
