//! The root model store.
//!
//! A [`TableData`] owns the ordered section sequence a table displays. Its
//! storage is sections-only by type; rows live inside their sections.
//! Out-of-range reads resolve to `None`, structural writes against a
//! known-invalid target are errors, and item insertion auto-extends the
//! section sequence by at most one section per call.

use std::sync::Arc;

use parking_lot::RwLock;
use rowbind_core::UiDispatcher;

use crate::error::{Error, Result};
use crate::model::{IndexPath, Node, TableItem, TableSection};
use crate::view::ListWidget;

/// The sectioned model behind one table.
///
/// `TableData` is `Arc`-shared between the caller and the controller.
/// Mutating it directly updates the model only; route mutations through a
/// [`TableController`](crate::view::TableController) to keep a live widget
/// in sync.
pub struct TableData {
    sections: RwLock<Vec<Arc<TableSection>>>,
}

impl Default for TableData {
    fn default() -> Self {
        Self {
            sections: RwLock::new(Vec::new()),
        }
    }
}

impl TableData {
    /// Creates an empty table model.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a model from an existing section sequence.
    pub fn with_sections(sections: impl IntoIterator<Item = Arc<TableSection>>) -> Arc<Self> {
        Arc::new(Self {
            sections: RwLock::new(sections.into_iter().collect()),
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Number of sections actually stored.
    pub fn section_count(&self) -> usize {
        self.sections.read().len()
    }

    /// The section count reported to the host widget: never less than 1,
    /// so an empty model still presents one empty section.
    pub fn number_of_sections(&self) -> usize {
        self.section_count().max(1)
    }

    /// Number of rows in `section`, or 0 when out of range.
    pub fn number_of_items_in(&self, section: usize) -> usize {
        self.section(section).map_or(0, |s| s.item_count())
    }

    /// The section at `index`, or `None` when out of range.
    pub fn section(&self, index: usize) -> Option<Arc<TableSection>> {
        self.sections.read().get(index).cloned()
    }

    /// The first section, if any.
    pub fn first_section(&self) -> Option<Arc<TableSection>> {
        self.sections.read().first().cloned()
    }

    /// The last section, if any.
    pub fn last_section(&self) -> Option<Arc<TableSection>> {
        self.sections.read().last().cloned()
    }

    /// The node at `path`, or `None` when out of range.
    pub fn node(&self, path: IndexPath) -> Option<Node> {
        self.section(path.section)?.node(path.row)
    }

    /// The item at `path` (a group's header item for nested sections), or
    /// `None` when out of range.
    pub fn item(&self, path: IndexPath) -> Option<Arc<TableItem>> {
        self.section(path.section)?.item(path.row)
    }

    /// Finds the item with the given ID anywhere in the model, recursing
    /// through nested groups. Section headers match through their section's
    /// ID. Duplicate IDs are fatal in debug builds; release builds log and
    /// return the first match.
    pub fn item_with_id(&self, id: &str) -> Option<Arc<TableItem>> {
        let sections = self.sections.read().clone();
        let mut matches = Vec::new();
        for section in &sections {
            if section.id().as_deref() == Some(id) {
                matches.push(section.header().clone());
            }
            section.collect_items_with_id(id, &mut matches);
        }
        debug_assert!(
            matches.len() <= 1,
            "duplicate item id {id:?} ({} matches)",
            matches.len()
        );
        if matches.len() > 1 {
            tracing::warn!(
                target: "rowbind::model",
                id,
                matches = matches.len(),
                "duplicate item id, returning first match"
            );
        }
        matches.into_iter().next()
    }

    /// Visits every section with its index, over a snapshot of the section
    /// sequence.
    pub fn for_each_section(&self, mut f: impl FnMut(usize, &Arc<TableSection>)) {
        let sections = self.sections.read().clone();
        for (index, section) in sections.iter().enumerate() {
            f(index, section);
        }
    }

    /// Visits every row with its path, over a snapshot. Nested groups are
    /// visited as rows through their header items (not descended into).
    pub fn for_each_item(&self, mut f: impl FnMut(IndexPath, &Arc<TableItem>)) {
        let sections = self.sections.read().clone();
        for (section_index, section) in sections.iter().enumerate() {
            for row in 0..section.item_count() {
                if let Some(item) = section.item(row) {
                    f(IndexPath::new(section_index, row), &item);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Structural writes
    // ------------------------------------------------------------------

    /// Appends one section.
    pub fn add_section(&self, section: Arc<TableSection>) {
        self.sections.write().push(section);
    }

    /// Inserts sections contiguously starting at `index`.
    ///
    /// `index == section_count()` appends; anything larger is an error.
    pub fn insert_sections(&self, sections: &[Arc<TableSection>], index: usize) -> Result<()> {
        let mut stored = self.sections.write();
        if index > stored.len() {
            return Err(Error::section_out_of_bounds(index, stored.len()));
        }
        for (offset, section) in sections.iter().enumerate() {
            stored.insert(index + offset, section.clone());
        }
        Ok(())
    }

    /// Removes and returns the section at `index`.
    pub fn delete_section(&self, index: usize) -> Result<Arc<TableSection>> {
        let mut stored = self.sections.write();
        if index >= stored.len() {
            return Err(Error::section_out_of_bounds(index, stored.len()));
        }
        Ok(stored.remove(index))
    }

    /// Removes every section.
    pub fn remove_all(&self) {
        self.sections.write().clear();
    }

    /// Inserts items contiguously at `path`, auto-extending the section
    /// sequence by at most one empty section when `path.section` is out of
    /// range. Returns the normalized destination of the first item.
    ///
    /// The row must lie within `0..=item_count` of the (normalized) target
    /// section.
    pub fn insert_items(&self, items: &[Arc<TableItem>], path: IndexPath) -> Result<IndexPath> {
        let destination = self.normalize(path);
        let section = self
            .section(destination.section)
            .expect("normalized section index is always valid");
        section.insert_items(items, destination.row)?;
        Ok(destination)
    }

    /// Inserts one node at `path`, with the same normalization as
    /// [`insert_items`](Self::insert_items). Returns the normalized
    /// destination.
    pub fn insert_node(&self, node: Node, path: IndexPath) -> Result<IndexPath> {
        let destination = self.normalize(path);
        let section = self
            .section(destination.section)
            .expect("normalized section index is always valid");
        section.insert_nodes([node], destination.row)?;
        Ok(destination)
    }

    /// Inserts one item at the conventional default destination, row 0 of
    /// section 0.
    pub fn insert_item(&self, item: Arc<TableItem>) -> Result<IndexPath> {
        self.insert_items(std::slice::from_ref(&item), IndexPath::zero())
    }

    /// Appends items to the end of the last existing section. With no
    /// sections stored, one is created. Returns the destination of the
    /// first appended item.
    pub fn append_items(&self, items: &[Arc<TableItem>]) -> Result<IndexPath> {
        let section = self.section_count().saturating_sub(1);
        let row = self.number_of_items_in(section);
        self.insert_items(items, IndexPath::new(section, row))
    }

    /// Removes the row at `path`.
    ///
    /// An out-of-range *section* is a no-op (the row is already gone as far
    /// as the caller can tell); an out-of-range row within an existing
    /// section is an error.
    pub fn delete_item(&self, path: IndexPath) -> Result<()> {
        let Some(section) = self.section(path.section) else {
            return Ok(());
        };
        section.remove_row(path.row)?;
        Ok(())
    }

    /// Clamps a destination into the stored section range, appending exactly
    /// one empty section when the destination lies past the end.
    fn normalize(&self, path: IndexPath) -> IndexPath {
        let mut sections = self.sections.write();
        if path.section >= sections.len() {
            sections.push(TableSection::new());
            tracing::debug!(
                target: "rowbind::model",
                requested = path.section,
                clamped = sections.len() - 1,
                "destination past end, auto-extended by one section"
            );
            return IndexPath::new(sections.len() - 1, path.row);
        }
        path
    }

    // ------------------------------------------------------------------
    // Wiring
    // ------------------------------------------------------------------

    /// Registers every section's and item's view types with the host widget.
    pub fn register(&self, widget: &dyn ListWidget) {
        let sections = self.sections.read().clone();
        for section in sections {
            section.register(widget);
        }
    }

    /// Hands the controller's mutation queue to every item in the model.
    pub(crate) fn attach_dispatcher(&self, dispatcher: &Arc<UiDispatcher>) {
        let sections = self.sections.read().clone();
        for section in sections {
            section.attach_dispatcher(dispatcher);
        }
    }
}

impl std::fmt::Debug for TableData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableData")
            .field("sections", &self.section_count())
            .finish()
    }
}
