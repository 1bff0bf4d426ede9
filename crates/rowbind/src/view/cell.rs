//! The cell binding protocol.
//!
//! A reusable cell and the [`TableItem`] it currently displays are linked
//! both ways, and neither side owns the other: the item holds a `Weak`
//! handle to the cell, the cell's [`CellSlot`] holds a `Weak` handle to the
//! item. The true lifetime owner of a cell is the host widget's reuse pool.
//!
//! # Reuse Safety
//!
//! Every slot carries a monotonically increasing generation counter, bumped
//! on each attach and on each reuse. An item records the generation it was
//! attached under; any later property push compares that captured generation
//! to the slot's current one and silently skips on mismatch. A stale binding
//! can therefore never write into a cell that has moved on to a different
//! item.
//!
//! [`TableItem`]: crate::model::TableItem

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::model::{CellProperty, PropertyValue, RichText, TableItem};

/// Row height used when an item does not specify one.
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

/// Header/footer height used when a section shows one.
pub const DEFAULT_HEADER_FOOTER_HEIGHT: f32 = 28.0;

/// Reuse identifier of the host's default cell type.
pub const DEFAULT_CELL_REUSE_ID: &str = "rowbind.cell.default";

/// Reuse identifier of the host's default header/footer view type.
pub const DEFAULT_HEADER_FOOTER_REUSE_ID: &str = "rowbind.header-footer.default";

/// The attachable model slot every reusable cell exposes.
///
/// Host cell implementations embed one `CellSlot` and return it from
/// [`TableCell::slot`]. All binding bookkeeping flows through it.
pub struct CellSlot {
    /// Bumped on every attach and every reuse. A push whose captured
    /// generation no longer matches is dropped.
    generation: AtomicU64,
    bound: Mutex<Weak<TableItem>>,
}

impl Default for CellSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl CellSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            bound: Mutex::new(Weak::new()),
        }
    }

    /// The slot's current binding generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// The item currently bound to this slot, if it is still alive.
    pub fn bound_item(&self) -> Option<Arc<TableItem>> {
        self.bound.lock().upgrade()
    }

    /// Clears the slot's model reference.
    ///
    /// Called from [`TableCell::prepare_for_reuse`]. Only the cell side of
    /// the link is cleared here; the item's back-reference is replaced on
    /// its next attach. Bumping the generation invalidates any push the
    /// stale item might still attempt in the meantime.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        *self.bound.lock() = Weak::new();
    }

    /// Starts an attach: bumps the generation and detaches the previous
    /// occupant. Returns the new generation and the previously bound item,
    /// if it is still alive.
    pub(crate) fn begin_attach(&self) -> (u64, Option<Arc<TableItem>>) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let previous = std::mem::replace(&mut *self.bound.lock(), Weak::new());
        (generation, previous.upgrade())
    }

    /// Completes an attach by storing the new occupant.
    pub(crate) fn complete_attach(&self, item: Weak<TableItem>) {
        *self.bound.lock() = item;
    }
}

/// A reusable row view provided by the host widget.
///
/// Implementations embed a [`CellSlot`] and translate [`apply`](Self::apply)
/// calls into whatever visual state the platform uses. Unknown properties
/// should be ignored; a `None` value means "reset this property" and is
/// pushed for absent entries during configuration so recycled cells do not
/// leak state between items.
pub trait TableCell: Send + Sync {
    /// The cell's binding slot.
    fn slot(&self) -> &CellSlot;

    /// Applies one display property. `None` clears it.
    fn apply(&self, property: CellProperty, value: Option<&PropertyValue>);

    /// Called by the host when the cell is reclaimed into the reuse pool.
    ///
    /// The default implementation clears the binding slot, which is all the
    /// protocol requires; override to additionally reset host-side state.
    fn prepare_for_reuse(&self) {
        self.slot().clear();
    }
}

/// A reusable section header or footer view provided by the host widget.
pub trait HeaderFooterView: Send + Sync {
    /// Sets the primary text. At most one of `text` / `rich` is `Some`.
    fn set_title(&self, text: Option<&str>, rich: Option<&RichText>);

    /// Sets the secondary text. At most one of `text` / `rich` is `Some`.
    fn set_detail(&self, text: Option<&str>, rich: Option<&RichText>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        let slot = CellSlot::new();
        assert!(slot.bound_item().is_none());
        assert_eq!(slot.generation(), 0);
    }

    #[test]
    fn test_attach_bumps_generation_and_reports_previous() {
        let slot = CellSlot::new();
        let first = TableItem::new();
        let second = TableItem::new();

        let (gen1, previous) = slot.begin_attach();
        assert_eq!(gen1, 1);
        assert!(previous.is_none());
        slot.complete_attach(Arc::downgrade(&first));
        assert!(Arc::ptr_eq(&slot.bound_item().unwrap(), &first));

        let (gen2, previous) = slot.begin_attach();
        assert_eq!(gen2, 2);
        assert!(Arc::ptr_eq(&previous.unwrap(), &first));
        slot.complete_attach(Arc::downgrade(&second));
        assert!(Arc::ptr_eq(&slot.bound_item().unwrap(), &second));
    }

    #[test]
    fn test_clear_invalidates_generation() {
        let slot = CellSlot::new();
        let item = TableItem::new();
        let (generation, _) = slot.begin_attach();
        slot.complete_attach(Arc::downgrade(&item));

        slot.clear();
        assert!(slot.bound_item().is_none());
        assert_ne!(slot.generation(), generation);
    }

    #[test]
    fn test_dead_item_reads_as_unbound() {
        let slot = CellSlot::new();
        {
            let item = TableItem::new();
            let (_, _) = slot.begin_attach();
            slot.complete_attach(Arc::downgrade(&item));
            assert!(slot.bound_item().is_some());
        }
        assert!(slot.bound_item().is_none());
    }
}
