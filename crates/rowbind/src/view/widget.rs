//! The host-widget boundary.
//!
//! Everything the core needs from a platform list view is the [`ListWidget`]
//! trait: registration and dequeue of reusable views, batched structural
//! mutation, and a handful of state queries. The trait is object-safe so
//! callbacks can hold `Arc<dyn ListWidget>` without knowing the host type.

use std::sync::Arc;

use crate::model::IndexPath;
use crate::view::{HeaderFooterView, TableCell};

/// The transition hint for a structural row/section change.
///
/// Hosts map these onto whatever transitions they support; a host with no
/// animation machinery is free to ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RowAnimation {
    /// Let the host choose an appropriate transition.
    #[default]
    Automatic,
    /// No transition.
    None,
    Fade,
    Top,
    Bottom,
    Left,
    Right,
    Middle,
}

/// A platform table/list view, seen from the model side.
///
/// # Contract
///
/// - `dequeue_cell` is infallible: failure to produce a view for a
///   registered reuse identifier is a fatal host misconfiguration, and the
///   host should panic rather than return a placeholder.
/// - Structural mutation calls between `begin_updates` and `end_updates`
///   form one batch; indices within a batch refer to pre-batch state, the
///   usual batched-updates convention.
/// - All calls arrive on the owner thread.
pub trait ListWidget: Send + Sync {
    /// Whether the widget is attached to a live view hierarchy. When false,
    /// controllers mutate the model only and skip every view call.
    fn is_live(&self) -> bool;

    /// Number of sections the widget currently displays.
    fn section_count(&self) -> usize;

    /// Number of rows the widget currently displays in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Registers a reusable cell type under `reuse_id`. Repeat registration
    /// of the same identifier must be harmless.
    fn register_cell_type(&self, reuse_id: &str);

    /// Registers a reusable header/footer view type under `reuse_id`.
    fn register_header_footer_type(&self, reuse_id: &str);

    /// Produces a ready-to-configure cell of the given registered type.
    fn dequeue_cell(&self, reuse_id: &str, index_path: IndexPath) -> Arc<dyn TableCell>;

    /// Produces a ready-to-configure header/footer view of the given type.
    fn dequeue_header_footer(&self, reuse_id: &str) -> Arc<dyn HeaderFooterView>;

    /// Opens a batch of structural updates.
    fn begin_updates(&self);

    /// Closes the current batch and applies it.
    fn end_updates(&self);

    /// Inserts rows at the given paths with a transition hint.
    fn insert_rows(&self, paths: &[IndexPath], animation: RowAnimation);

    /// Removes the rows at the given paths.
    fn delete_rows(&self, paths: &[IndexPath], animation: RowAnimation);

    /// Inserts whole sections at the given indices. Rows belonging to a
    /// newly inserted section load with it and are not inserted separately.
    fn insert_sections(&self, sections: &[usize], animation: RowAnimation);

    /// Removes whole sections at the given indices.
    fn delete_sections(&self, sections: &[usize], animation: RowAnimation);

    /// The cell currently displaying `path`, if that row is on screen.
    fn cell_at(&self, path: IndexPath) -> Option<Arc<dyn TableCell>>;

    /// Clears the selection highlight on `path`.
    fn deselect_row(&self, path: IndexPath, animated: bool);

    /// Discards all displayed state and reloads from the data source.
    fn reload(&self);
}

/// RAII guard for one widget update batch.
///
/// Captures liveness once at construction: a detached widget receives no
/// calls at all, and the controller's model mutations proceed headless.
pub(crate) struct BatchUpdate<'a> {
    widget: &'a dyn ListWidget,
    live: bool,
}

impl<'a> BatchUpdate<'a> {
    pub(crate) fn begin(widget: &'a dyn ListWidget) -> Self {
        let live = widget.is_live();
        if live {
            widget.begin_updates();
        }
        Self { widget, live }
    }

    /// Whether view calls should be issued for this batch.
    pub(crate) fn is_live(&self) -> bool {
        self.live
    }
}

impl Drop for BatchUpdate<'_> {
    fn drop(&mut self) {
        if self.live {
            self.widget.end_updates();
        }
    }
}
