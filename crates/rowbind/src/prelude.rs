//! Prelude module for rowbind.
//!
//! Re-exports the types most table code touches:
//!
//! ```ignore
//! use rowbind::prelude::*;
//! ```

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    AccessoryType, CellProperty, Color, EditingStyle, ImageSource, IndexPath, Node, PropertyValue,
    RichText, SelectionStyle, TableData, TableItem, TableSection, TextSpan,
};

// ============================================================================
// Binding and widget boundary
// ============================================================================

pub use crate::view::{
    CellSlot, HeaderFooterView, ListWidget, RowAnimation, SelectionContext, TableCell,
    TableController, TableSource,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{Error, Result};
