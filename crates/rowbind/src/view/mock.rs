//! Test doubles for the widget boundary.
//!
//! `MockWidget` records every call a controller makes and mirrors the
//! section/row counts a real host would display, so reconciliation tests
//! can assert on the exact operation sequence. `RecordingCell` captures
//! property pushes for binding tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::{CellProperty, IndexPath, PropertyValue, RichText};
use crate::view::{CellSlot, HeaderFooterView, ListWidget, RowAnimation, TableCell};

/// A cell that records every property applied to it.
pub(crate) struct RecordingCell {
    slot: CellSlot,
    applied: Mutex<Vec<(CellProperty, Option<PropertyValue>)>>,
}

impl RecordingCell {
    pub(crate) fn new() -> Self {
        Self {
            slot: CellSlot::new(),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Every `(property, value)` applied so far, in order.
    pub(crate) fn applied(&self) -> Vec<(CellProperty, Option<PropertyValue>)> {
        self.applied.lock().clone()
    }

    pub(crate) fn clear_applied(&self) {
        self.applied.lock().clear();
    }
}

impl TableCell for RecordingCell {
    fn slot(&self) -> &CellSlot {
        &self.slot
    }

    fn apply(&self, property: CellProperty, value: Option<&PropertyValue>) {
        self.applied.lock().push((property, value.cloned()));
    }
}

/// A header/footer view that remembers the last text set on it.
pub(crate) struct RecordingHeaderFooter {
    pub(crate) title: Mutex<Option<String>>,
    pub(crate) rich_title: Mutex<Option<RichText>>,
    pub(crate) detail: Mutex<Option<String>>,
}

impl RecordingHeaderFooter {
    pub(crate) fn new() -> Self {
        Self {
            title: Mutex::new(None),
            rich_title: Mutex::new(None),
            detail: Mutex::new(None),
        }
    }
}

impl HeaderFooterView for RecordingHeaderFooter {
    fn set_title(&self, text: Option<&str>, rich: Option<&RichText>) {
        *self.title.lock() = text.map(str::to_string);
        *self.rich_title.lock() = rich.cloned();
    }

    fn set_detail(&self, text: Option<&str>, _rich: Option<&RichText>) {
        *self.detail.lock() = text.map(str::to_string);
    }
}

/// One recorded widget call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WidgetOp {
    BeginUpdates,
    EndUpdates,
    InsertRows(Vec<IndexPath>, RowAnimation),
    DeleteRows(Vec<IndexPath>, RowAnimation),
    InsertSections(Vec<usize>, RowAnimation),
    DeleteSections(Vec<usize>, RowAnimation),
    Reload,
    DeselectRow(IndexPath, bool),
}

/// An operation-recording [`ListWidget`].
///
/// Mirrors displayed section/row counts the way a real host would: it
/// starts out presenting one empty section (the data-source floor for an
/// empty model) and applies structural calls to its mirror.
pub(crate) struct MockWidget {
    live: AtomicBool,
    /// Row count per displayed section.
    sections: Mutex<Vec<usize>>,
    ops: Mutex<Vec<WidgetOp>>,
    registered_cells: Mutex<Vec<String>>,
    registered_header_footers: Mutex<Vec<String>>,
    visible: Mutex<HashMap<IndexPath, Arc<RecordingCell>>>,
}

impl MockWidget {
    /// A live widget presenting one empty section.
    pub(crate) fn new() -> Arc<Self> {
        Self::with_sections(vec![0])
    }

    /// A live widget presenting the given per-section row counts.
    pub(crate) fn with_sections(sections: Vec<usize>) -> Arc<Self> {
        Arc::new(Self {
            live: AtomicBool::new(true),
            sections: Mutex::new(sections),
            ops: Mutex::new(Vec::new()),
            registered_cells: Mutex::new(Vec::new()),
            registered_header_footers: Mutex::new(Vec::new()),
            visible: Mutex::new(HashMap::new()),
        })
    }

    /// A widget detached from any view hierarchy.
    pub(crate) fn detached() -> Arc<Self> {
        let widget = Self::new();
        widget.live.store(false, Ordering::Release);
        widget
    }

    pub(crate) fn ops(&self) -> Vec<WidgetOp> {
        self.ops.lock().clone()
    }

    pub(crate) fn clear_ops(&self) {
        self.ops.lock().clear();
    }

    pub(crate) fn registered_cells(&self) -> Vec<String> {
        self.registered_cells.lock().clone()
    }

    pub(crate) fn registered_header_footers(&self) -> Vec<String> {
        self.registered_header_footers.lock().clone()
    }

    /// The recording cell last dequeued for `path`.
    pub(crate) fn visible_cell(&self, path: IndexPath) -> Option<Arc<RecordingCell>> {
        self.visible.lock().get(&path).cloned()
    }

    fn record(&self, op: WidgetOp) {
        self.ops.lock().push(op);
    }
}

impl ListWidget for MockWidget {
    fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn section_count(&self) -> usize {
        self.sections.lock().len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.sections.lock().get(section).copied().unwrap_or(0)
    }

    fn register_cell_type(&self, reuse_id: &str) {
        let mut registered = self.registered_cells.lock();
        if !registered.iter().any(|r| r == reuse_id) {
            registered.push(reuse_id.to_string());
        }
    }

    fn register_header_footer_type(&self, reuse_id: &str) {
        let mut registered = self.registered_header_footers.lock();
        if !registered.iter().any(|r| r == reuse_id) {
            registered.push(reuse_id.to_string());
        }
    }

    fn dequeue_cell(&self, _reuse_id: &str, index_path: IndexPath) -> Arc<dyn TableCell> {
        let cell = Arc::new(RecordingCell::new());
        self.visible.lock().insert(index_path, cell.clone());
        cell
    }

    fn dequeue_header_footer(&self, _reuse_id: &str) -> Arc<dyn HeaderFooterView> {
        Arc::new(RecordingHeaderFooter::new())
    }

    fn begin_updates(&self) {
        self.record(WidgetOp::BeginUpdates);
    }

    fn end_updates(&self) {
        self.record(WidgetOp::EndUpdates);
    }

    fn insert_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        {
            let mut sections = self.sections.lock();
            for path in paths {
                if let Some(count) = sections.get_mut(path.section) {
                    *count += 1;
                }
            }
        }
        self.record(WidgetOp::InsertRows(paths.to_vec(), animation));
    }

    fn delete_rows(&self, paths: &[IndexPath], animation: RowAnimation) {
        {
            let mut sections = self.sections.lock();
            for path in paths {
                if let Some(count) = sections.get_mut(path.section) {
                    *count = count.saturating_sub(1);
                }
            }
        }
        self.record(WidgetOp::DeleteRows(paths.to_vec(), animation));
    }

    fn insert_sections(&self, indices: &[usize], animation: RowAnimation) {
        {
            let mut sections = self.sections.lock();
            let mut sorted = indices.to_vec();
            sorted.sort_unstable();
            for index in sorted {
                let index = index.min(sections.len());
                sections.insert(index, 0);
            }
        }
        self.record(WidgetOp::InsertSections(indices.to_vec(), animation));
    }

    fn delete_sections(&self, indices: &[usize], animation: RowAnimation) {
        {
            let mut sections = self.sections.lock();
            let mut sorted = indices.to_vec();
            sorted.sort_unstable();
            for index in sorted.into_iter().rev() {
                if index < sections.len() {
                    sections.remove(index);
                }
            }
        }
        self.record(WidgetOp::DeleteSections(indices.to_vec(), animation));
    }

    fn cell_at(&self, path: IndexPath) -> Option<Arc<dyn TableCell>> {
        self.visible
            .lock()
            .get(&path)
            .map(|cell| cell.clone() as Arc<dyn TableCell>)
    }

    fn deselect_row(&self, path: IndexPath, animated: bool) {
        self.record(WidgetOp::DeselectRow(path, animated));
    }

    fn reload(&self) {
        self.record(WidgetOp::Reload);
    }
}
