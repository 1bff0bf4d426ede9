//! The data-source/delegate surface.
//!
//! [`TableSource`] is everything a host widget asks the model side: counts,
//! cells, header/footer text and views, per-row behavior flags, and
//! interaction dispatch. [`TableController`] implements it by reading its
//! model, so a host needs exactly one object to drive its table.

use std::sync::Arc;

use crate::model::{EditingStyle, IndexPath};
use crate::view::{
    HeaderFooterView, ListWidget, RowAnimation, SelectionContext, TableCell, TableController,
    DEFAULT_CELL_REUSE_ID,
};

/// Answers the host widget's queries about table content.
///
/// # Absent rows
///
/// A host may query a path the model no longer covers (stale display state
/// during an update). Every method has a documented degraded answer for
/// that case rather than a panic: a default cell, `None`, `false`, `0`, or
/// `0.0`.
pub trait TableSource {
    /// Number of sections to display. Never 0: an empty model presents one
    /// empty section.
    fn number_of_sections(&self) -> usize;

    /// Number of rows in `section`; 0 when the section is absent.
    fn number_of_rows(&self, section: usize) -> usize;

    /// A fully configured cell for the row at `path`. An absent row yields
    /// a freshly dequeued, unconfigured default cell.
    fn cell_for_row(&self, path: IndexPath) -> Arc<dyn TableCell>;

    /// The plain header title, or `None` when the section is absent or uses
    /// a custom header view.
    fn title_for_header(&self, section: usize) -> Option<String>;

    /// The plain footer title, or `None` when absent or view-backed.
    fn title_for_footer(&self, section: usize) -> Option<String>;

    /// The configured custom header view, when one is in use.
    fn view_for_header(&self, section: usize) -> Option<Arc<dyn HeaderFooterView>>;

    /// The configured custom footer view, when one is in use.
    fn view_for_footer(&self, section: usize) -> Option<Arc<dyn HeaderFooterView>>;

    /// The header height; 0 when the section is absent or headerless.
    fn height_for_header(&self, section: usize) -> f32;

    /// The footer height; 0 when the section is absent or footerless.
    fn height_for_footer(&self, section: usize) -> f32;

    /// The row height; 0 when the row is absent.
    fn height_for_row(&self, path: IndexPath) -> f32;

    /// Whether the row participates in editing mode; `false` when absent.
    fn can_edit_row(&self, path: IndexPath) -> bool;

    /// The row's edit affordance; [`EditingStyle::None`] when absent.
    fn editing_style_for_row(&self, path: IndexPath) -> EditingStyle;

    /// Whether the row highlights on touch; `false` when absent.
    fn should_highlight_row(&self, path: IndexPath) -> bool;

    /// The row's indentation level; 0 when absent.
    fn indentation_for_row(&self, path: IndexPath) -> usize;

    /// Dispatches a row selection to the item's selection callback.
    fn did_select_row(&self, path: IndexPath);

    /// Commits an edit gesture the host finished on a row. A
    /// [`EditingStyle::Delete`] commit removes the row; other styles are
    /// ignored.
    fn commit_editing(&self, style: EditingStyle, path: IndexPath);

    /// Whether the row may be drag-reordered; `false` when absent.
    fn can_move_row(&self, path: IndexPath) -> bool;

    /// Records a reorder the host widget has already performed on screen.
    /// Updates the model only; no view calls are issued.
    fn did_move_row(&self, from: IndexPath, to: IndexPath);
}

impl<W: ListWidget + 'static> TableSource for TableController<W> {
    fn number_of_sections(&self) -> usize {
        self.data().number_of_sections()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.data().number_of_items_in(section)
    }

    fn cell_for_row(&self, path: IndexPath) -> Arc<dyn TableCell> {
        match self.data().item(path) {
            Some(item) => item.configured_cell(self.widget().as_ref(), path),
            None => {
                tracing::warn!(
                    target: "rowbind::binding",
                    ?path,
                    "cell requested for a path outside the model"
                );
                self.widget().dequeue_cell(DEFAULT_CELL_REUSE_ID, path)
            }
        }
    }

    fn title_for_header(&self, section: usize) -> Option<String> {
        self.data().section(section)?.header_title_for_widget()
    }

    fn title_for_footer(&self, section: usize) -> Option<String> {
        self.data().section(section)?.footer_title_for_widget()
    }

    fn view_for_header(&self, section: usize) -> Option<Arc<dyn HeaderFooterView>> {
        self.data()
            .section(section)?
            .header_view(self.widget().as_ref(), section)
    }

    fn view_for_footer(&self, section: usize) -> Option<Arc<dyn HeaderFooterView>> {
        self.data()
            .section(section)?
            .footer_view(self.widget().as_ref(), section)
    }

    fn height_for_header(&self, section: usize) -> f32 {
        self.data().section(section).map_or(0.0, |s| s.header_height())
    }

    fn height_for_footer(&self, section: usize) -> f32 {
        self.data().section(section).map_or(0.0, |s| s.footer_height())
    }

    fn height_for_row(&self, path: IndexPath) -> f32 {
        self.data().item(path).map_or(0.0, |item| item.row_height())
    }

    fn can_edit_row(&self, path: IndexPath) -> bool {
        self.data().item(path).is_some_and(|item| item.can_edit())
    }

    fn editing_style_for_row(&self, path: IndexPath) -> EditingStyle {
        self.data()
            .item(path)
            .map_or(EditingStyle::None, |item| item.editing_style())
    }

    fn should_highlight_row(&self, path: IndexPath) -> bool {
        self.data()
            .item(path)
            .is_some_and(|item| item.should_highlight())
    }

    fn indentation_for_row(&self, path: IndexPath) -> usize {
        self.data().item(path).map_or(0, |item| item.indentation_level())
    }

    fn did_select_row(&self, path: IndexPath) {
        let Some(item) = self.data().item(path) else {
            return;
        };
        let widget = self.widget().clone() as Arc<dyn ListWidget>;
        let context = SelectionContext::new(path, widget);
        item.handle_selection(&context);
    }

    fn commit_editing(&self, style: EditingStyle, path: IndexPath) {
        if style != EditingStyle::Delete {
            return;
        }
        if let Err(error) = self.delete_item(path, RowAnimation::Automatic) {
            tracing::warn!(
                target: "rowbind::reconcile",
                ?path,
                %error,
                "delete commit could not be applied"
            );
        }
    }

    fn can_move_row(&self, path: IndexPath) -> bool {
        self.data().item(path).is_some()
    }

    fn did_move_row(&self, from: IndexPath, to: IndexPath) {
        if let Err(error) = self.move_row(from, to) {
            tracing::warn!(
                target: "rowbind::reconcile",
                ?from,
                ?to,
                %error,
                "widget reorder could not be recorded"
            );
        }
    }
}
