//! Selection context passed to row selection callbacks.

use std::sync::Arc;

use crate::model::{AccessoryType, IndexPath, TableItem};
use crate::view::{ListWidget, TableCell};

/// Everything a selection callback needs about the selected row.
///
/// The context addresses the row by its path at selection time and reaches
/// the live cell through the widget, so callbacks observe current state
/// rather than a stale capture.
pub struct SelectionContext {
    index_path: IndexPath,
    widget: Arc<dyn ListWidget>,
}

impl SelectionContext {
    pub(crate) fn new(index_path: IndexPath, widget: Arc<dyn ListWidget>) -> Self {
        Self { index_path, widget }
    }

    /// The selected row's path.
    pub fn index_path(&self) -> IndexPath {
        self.index_path
    }

    /// The host widget.
    pub fn widget(&self) -> &Arc<dyn ListWidget> {
        &self.widget
    }

    /// The cell currently displaying the selected row, if on screen.
    pub fn cell(&self) -> Option<Arc<dyn TableCell>> {
        self.widget.cell_at(self.index_path)
    }

    /// The item bound to the selected row's cell, if the binding is live.
    pub fn item(&self) -> Option<Arc<TableItem>> {
        self.cell()?.slot().bound_item()
    }

    /// Clears the selection highlight.
    pub fn deselect(&self, animated: bool) {
        self.widget.deselect_row(self.index_path, animated);
    }

    /// Toggles the row's checkmark accessory.
    ///
    /// Only flips between [`AccessoryType::None`] and
    /// [`AccessoryType::Checkmark`]; rows using any other accessory are
    /// left alone.
    pub fn toggle_checkmark(&self) {
        let Some(item) = self.item() else {
            return;
        };
        match item.accessory() {
            AccessoryType::None => item.set_accessory(AccessoryType::Checkmark),
            AccessoryType::Checkmark => item.set_accessory(AccessoryType::None),
            _ => {}
        }
    }
}
