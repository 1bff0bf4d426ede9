//! The reconciling controller.
//!
//! A [`TableController`] pairs one [`TableData`] with one host widget and
//! keeps the two in lockstep: every structural mutation goes through the
//! controller, which applies it to the model and then issues the matching
//! batched widget operations. When the widget is not live, mutations apply
//! to the model only and the widget hears nothing.
//!
//! # Destinations
//!
//! Item insertion takes more destinations, fewer destinations, or no
//! destinations at all relative to the item count:
//!
//! - explicit destinations are consumed left-to-right, one per item;
//! - surplus destinations are ignored;
//! - surplus items spill contiguously after the last consumed destination
//!   (or from row 0 of section 0 when no destination was given);
//! - a destination past the last section appends exactly one new section.

use std::sync::Arc;

use parking_lot::RwLock;
use rowbind_core::UiDispatcher;

use crate::error::{Error, Result};
use crate::model::{IndexPath, Node, TableData, TableItem, TableSection};
use crate::view::widget::BatchUpdate;
use crate::view::{ListWidget, RowAnimation};

/// Owns the model/widget pairing and the owner-thread mutation queue.
///
/// Create the controller on the UI thread; that thread becomes the owner
/// thread for every structural mutation. Property setters on items remain
/// callable from anywhere; off-thread calls land on this controller's
/// queue and apply when [`process_pending`](Self::process_pending) runs.
pub struct TableController<W: ListWidget + 'static> {
    widget: Arc<W>,
    data: RwLock<Arc<TableData>>,
    dispatcher: Arc<UiDispatcher>,
}

impl<W: ListWidget + 'static> TableController<W> {
    /// Creates a controller, registers the model's view types with the
    /// widget, and reloads it if live.
    pub fn new(widget: Arc<W>, data: Arc<TableData>) -> Self {
        let dispatcher = UiDispatcher::new();
        data.attach_dispatcher(&dispatcher);
        if widget.is_live() {
            data.register(widget.as_ref());
            widget.reload();
        }
        Self {
            widget,
            data: RwLock::new(data),
            dispatcher,
        }
    }

    /// The current model.
    pub fn data(&self) -> Arc<TableData> {
        self.data.read().clone()
    }

    /// The host widget.
    pub fn widget(&self) -> &Arc<W> {
        &self.widget
    }

    /// The owner-thread mutation queue.
    pub fn dispatcher(&self) -> &Arc<UiDispatcher> {
        &self.dispatcher
    }

    /// Applies mutations queued from other threads. Call from the owner
    /// thread's event loop. Returns the number of mutations applied.
    pub fn process_pending(&self) -> usize {
        self.dispatcher.process_pending()
    }

    /// Replaces the whole model and reloads the widget.
    pub fn set_data(&self, data: Arc<TableData>) {
        self.dispatcher.affinity().debug_assert_same_thread();
        data.attach_dispatcher(&self.dispatcher);
        if self.widget.is_live() {
            data.register(self.widget.as_ref());
        }
        *self.data.write() = data;
        self.reload();
    }

    /// Reloads the widget from the model, if live.
    pub fn reload(&self) {
        if self.widget.is_live() {
            self.widget.reload();
        }
    }

    // ------------------------------------------------------------------
    // Item mutation
    // ------------------------------------------------------------------

    /// Inserts items at the given destinations (see the module docs for the
    /// consume-then-spill rules) and mirrors the change into the widget as
    /// one batch.
    #[tracing::instrument(
        level = "debug",
        target = "rowbind::reconcile",
        skip_all,
        fields(items = items.len(), paths = paths.len())
    )]
    pub fn insert_items(
        &self,
        items: &[Arc<TableItem>],
        paths: &[IndexPath],
        animation: RowAnimation,
    ) -> Result<()> {
        self.dispatcher.affinity().debug_assert_same_thread();
        if items.is_empty() {
            return Ok(());
        }
        let data = self.data();
        let batch = BatchUpdate::begin(self.widget.as_ref());
        // Sections the widget displayed before this batch. Destinations at
        // or past this index need a section insert, not a row insert.
        let displayed_sections = if batch.is_live() {
            self.widget.section_count()
        } else {
            usize::MAX
        };

        let consumed = items.len().min(paths.len());
        let mut inserted = Vec::with_capacity(items.len());
        for (item, &path) in items.iter().zip(paths) {
            inserted.push(data.insert_items(std::slice::from_ref(item), path)?);
        }
        let mut cursor = inserted
            .last()
            .map(|p| p.next_row())
            .unwrap_or(IndexPath::zero());
        for item in &items[consumed..] {
            let destination = data.insert_items(std::slice::from_ref(item), cursor)?;
            inserted.push(destination);
            cursor = destination.next_row();
        }

        for item in items {
            item.attach_dispatcher(self.dispatcher.clone());
        }

        if batch.is_live() {
            let mut new_sections: Vec<usize> = Vec::new();
            let mut row_paths: Vec<IndexPath> = Vec::new();
            for &destination in &inserted {
                if new_sections.contains(&destination.section) {
                    // Rows of a freshly inserted section load with it.
                    continue;
                }
                if destination.section >= displayed_sections {
                    new_sections.push(destination.section);
                } else {
                    row_paths.push(destination);
                }
            }
            for item in items {
                self.widget.register_cell_type(&item.reuse_id());
            }
            if !new_sections.is_empty() {
                self.widget.insert_sections(&new_sections, animation);
            }
            if !row_paths.is_empty() {
                self.widget.insert_rows(&row_paths, animation);
            }
            tracing::debug!(
                target: "rowbind::reconcile",
                rows = row_paths.len(),
                sections = new_sections.len(),
                "inserted items"
            );
        }
        Ok(())
    }

    /// Inserts one item at row 0 of section 0.
    pub fn insert_item(&self, item: Arc<TableItem>, animation: RowAnimation) -> Result<()> {
        self.insert_items(std::slice::from_ref(&item), &[], animation)
    }

    /// Appends items to the end of the last existing section.
    pub fn append_items(&self, items: &[Arc<TableItem>], animation: RowAnimation) -> Result<()> {
        let data = self.data();
        let section = data.section_count().saturating_sub(1);
        let row = data.number_of_items_in(section);
        self.insert_items(items, &[IndexPath::new(section, row)], animation)
    }

    /// Appends one item to the end of the last existing section.
    pub fn append_item(&self, item: Arc<TableItem>, animation: RowAnimation) -> Result<()> {
        self.append_items(std::slice::from_ref(&item), animation)
    }

    /// Removes the rows at the given paths as one batch.
    ///
    /// All paths address the model as it stands before any of the deletes
    /// apply; rows are resolved up front and removed by identity, so one
    /// path never shifts the meaning of the next. Paths with an
    /// out-of-range section are skipped; an out-of-range row within an
    /// existing section is an error and nothing is removed.
    #[tracing::instrument(
        level = "debug",
        target = "rowbind::reconcile",
        skip_all,
        fields(paths = paths.len())
    )]
    pub fn delete_items(&self, paths: &[IndexPath], animation: RowAnimation) -> Result<()> {
        self.dispatcher.affinity().debug_assert_same_thread();
        let data = self.data();
        let mut resolved = Vec::with_capacity(paths.len());
        let mut widget_paths = Vec::with_capacity(paths.len());
        for &path in paths {
            let Some(section) = data.section(path.section) else {
                continue;
            };
            let node = section
                .node(path.row)
                .ok_or_else(|| Error::row_out_of_bounds(path.row, section.item_count()))?;
            resolved.push((section, node));
            widget_paths.push(path);
        }
        if resolved.is_empty() {
            return Ok(());
        }

        let batch = BatchUpdate::begin(self.widget.as_ref());
        for (section, node) in &resolved {
            section.remove_node_by_identity(node);
        }
        if batch.is_live() {
            self.widget.delete_rows(&widget_paths, animation);
        }
        Ok(())
    }

    /// Removes one row.
    pub fn delete_item(&self, path: IndexPath, animation: RowAnimation) -> Result<()> {
        self.delete_items(std::slice::from_ref(&path), animation)
    }

    /// Moves one row, expressed to the widget as a delete plus an insert in
    /// the same batch. `to` addresses the model after the removal.
    pub fn move_item(&self, from: IndexPath, to: IndexPath, animation: RowAnimation) -> Result<()> {
        self.dispatcher.affinity().debug_assert_same_thread();
        let data = self.data();
        let destination = {
            let batch = BatchUpdate::begin(self.widget.as_ref());
            let destination = self.move_in_model(&data, from, to)?;
            if batch.is_live() {
                self.widget.delete_rows(&[from], animation);
                self.widget.insert_rows(&[destination], animation);
            }
            destination
        };
        tracing::debug!(
            target: "rowbind::reconcile",
            ?from,
            ?destination,
            "moved item"
        );
        Ok(())
    }

    /// Records a widget-driven reorder in the model. The widget has already
    /// moved the row, so no view calls are issued.
    pub fn move_row(&self, from: IndexPath, to: IndexPath) -> Result<()> {
        self.dispatcher.affinity().debug_assert_same_thread();
        let data = self.data();
        self.move_in_model(&data, from, to)?;
        Ok(())
    }

    fn move_in_model(&self, data: &TableData, from: IndexPath, to: IndexPath) -> Result<IndexPath> {
        let source = data
            .section(from.section)
            .ok_or_else(|| Error::section_out_of_bounds(from.section, data.section_count()))?;
        let node = source
            .node(from.row)
            .ok_or_else(|| Error::row_out_of_bounds(from.row, source.item_count()))?;
        source.remove_node_by_identity(&node);
        data.insert_node(node, to)
    }

    // ------------------------------------------------------------------
    // Section mutation
    // ------------------------------------------------------------------

    /// Inserts sections at the given indices with the same consume-then-
    /// spill rules as item insertion: surplus indices are ignored, surplus
    /// sections go contiguously after the last consumed index (or at 0).
    /// Only explicitly placed sections animate; spilled ones do not.
    #[tracing::instrument(
        level = "debug",
        target = "rowbind::reconcile",
        skip_all,
        fields(sections = sections.len(), indices = indices.len())
    )]
    pub fn insert_sections(
        &self,
        sections: &[Arc<TableSection>],
        indices: &[usize],
        animation: RowAnimation,
    ) -> Result<()> {
        self.dispatcher.affinity().debug_assert_same_thread();
        if sections.is_empty() {
            return Ok(());
        }
        let data = self.data();
        let had_sections = data.section_count() > 0;
        let batch = BatchUpdate::begin(self.widget.as_ref());

        let consumed = sections.len().min(indices.len());
        let mut inserted = Vec::with_capacity(sections.len());
        for (section, &index) in sections.iter().zip(indices) {
            data.insert_sections(std::slice::from_ref(section), index)?;
            inserted.push(index);
        }
        let mut cursor = inserted.last().map(|&i| i + 1).unwrap_or(0);
        for section in &sections[consumed..] {
            data.insert_sections(std::slice::from_ref(section), cursor)?;
            inserted.push(cursor);
            cursor += 1;
        }

        for section in sections {
            section.attach_dispatcher(&self.dispatcher);
        }

        if batch.is_live() {
            for section in sections {
                section.register(self.widget.as_ref());
            }
            if had_sections {
                let (placed, spilled) = inserted.split_at(consumed);
                if !placed.is_empty() {
                    self.widget.insert_sections(placed, animation);
                }
                if !spilled.is_empty() {
                    self.widget.insert_sections(spilled, RowAnimation::None);
                }
            } else {
                // The widget was displaying the empty-model placeholder
                // section; incremental inserts would double-count it.
                drop(batch);
                self.widget.reload();
            }
        }
        Ok(())
    }

    /// Appends one section after the last existing section.
    pub fn add_section(&self, section: Arc<TableSection>, animation: RowAnimation) -> Result<()> {
        let index = self.data().section_count();
        self.insert_sections(std::slice::from_ref(&section), &[index], animation)
    }

    /// Removes the section at `index`.
    pub fn delete_section(&self, index: usize, animation: RowAnimation) -> Result<()> {
        self.dispatcher.affinity().debug_assert_same_thread();
        let data = self.data();
        {
            let batch = BatchUpdate::begin(self.widget.as_ref());
            data.delete_section(index)?;
            if batch.is_live() {
                if data.section_count() == 0 {
                    // Back to the empty-model placeholder section.
                    drop(batch);
                    self.widget.reload();
                } else {
                    self.widget.delete_sections(&[index], animation);
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// The item at `path`, or `None` when out of range.
    pub fn item(&self, path: IndexPath) -> Option<Arc<TableItem>> {
        self.data().item(path)
    }

    /// The node at `path`, or `None` when out of range.
    pub fn node(&self, path: IndexPath) -> Option<Node> {
        self.data().node(path)
    }

    /// The item with the given ID, anywhere in the model.
    pub fn item_with_id(&self, id: &str) -> Option<Arc<TableItem>> {
        self.data().item_with_id(id)
    }
}
