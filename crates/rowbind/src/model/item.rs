//! The per-row view-model.
//!
//! A [`TableItem`] is not application data. It is the binding object that
//! carries one row's display properties, pushes them onto whatever cell is
//! currently showing the row, and responds to interactions with that cell.
//! Items are `Arc`-shared: the owning [`TableSection`] holds the `Arc`,
//! cells refer back only through `Weak` handles.
//!
//! [`TableSection`]: crate::model::TableSection

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rowbind_core::UiDispatcher;

use crate::model::{
    AccessoryType, CellProperty, Color, EditingStyle, ImageSource, IndexPath, PropertyValue,
    RichText, SelectionStyle,
};
use crate::view::{
    ListWidget, SelectionContext, TableCell, DEFAULT_CELL_REUSE_ID, DEFAULT_ROW_HEIGHT,
};

/// Callback invoked at the end of every cell configuration.
///
/// Note that this runs every time the row's cell is (re)configured: cells
/// are recycled, so it can run many times per item and against different
/// cell instances.
pub type ConfigureFn = dyn Fn(&Arc<TableItem>, IndexPath) + Send + Sync;

/// Callback invoked when the row is selected.
pub type SelectionFn = dyn Fn(&SelectionContext) + Send + Sync;

/// The item's half of a cell binding: which cell, and under which slot
/// generation the attach happened.
#[derive(Clone)]
struct CellBinding {
    cell: Weak<dyn TableCell>,
    generation: u64,
}

/// One row's view-model.
///
/// Display state lives in a name-keyed property map ([`CellProperty`] →
/// [`PropertyValue`]). While the row is visible the item is attached to a
/// cell; mutating a display property then pushes the new value straight
/// onto that cell. Mutating an unbound item just stores the value.
///
/// # Threading
///
/// All setters may be called from any thread. Once the item has been handed
/// to a [`TableController`](crate::view::TableController) (insertion or
/// `set_data`), off-owner-thread mutations are posted to the controller's
/// dispatcher queue and applied when the owner thread drains it
/// (fire-and-forget, exactly one hop). Items never attached to a dispatcher
/// apply synchronously under their own locks.
pub struct TableItem {
    /// Self-handle for deferred mutations and back-references; items are
    /// always `Arc`-allocated.
    this: Weak<TableItem>,
    data: RwLock<HashMap<CellProperty, PropertyValue>>,
    binding: Mutex<Option<CellBinding>>,
    dispatcher: RwLock<Option<Arc<UiDispatcher>>>,
    reuse_id: RwLock<Cow<'static, str>>,
    configure_callback: RwLock<Option<Arc<ConfigureFn>>>,
    selection_callback: RwLock<Option<Arc<SelectionFn>>>,
}

impl TableItem {
    /// Creates an empty item.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            data: RwLock::new(HashMap::new()),
            binding: Mutex::new(None),
            dispatcher: RwLock::new(None),
            reuse_id: RwLock::new(Cow::Borrowed(DEFAULT_CELL_REUSE_ID)),
            configure_callback: RwLock::new(None),
            selection_callback: RwLock::new(None),
        })
    }

    /// Creates an item with a title and optional detail text.
    pub fn with_text(title: impl Into<String>, detail: Option<&str>) -> Arc<Self> {
        let item = Self::new();
        item.set_title(Some(title.into()));
        if let Some(detail) = detail {
            item.set_detail(Some(detail.to_string()));
        }
        item
    }

    // ------------------------------------------------------------------
    // Property storage
    // ------------------------------------------------------------------

    /// Sets one property, pushing display properties to the bound cell.
    ///
    /// This is the single any-thread entry point: called off the owner
    /// thread of an attached dispatcher, the mutation is posted to that
    /// queue once and the call returns before it has applied.
    pub fn set(&self, property: CellProperty, value: Option<PropertyValue>) {
        self.route(move |item| item.apply_set(property, value, true));
    }

    fn set_with_redraw(&self, property: CellProperty, value: Option<PropertyValue>, redraw: bool) {
        self.route(move |item| item.apply_set(property, value, redraw));
    }

    /// Sets `property`, first clearing `alternate` when the new value is
    /// populated. Both halves apply atomically with respect to the queue:
    /// one setter call is one queued task.
    fn set_exclusive(
        &self,
        property: CellProperty,
        alternate: CellProperty,
        value: Option<PropertyValue>,
    ) {
        self.route(move |item| {
            if value.is_some() {
                item.apply_set(alternate, None, false);
            }
            item.apply_set(property, value, true);
        });
    }

    /// Runs `mutation` now when on the owner thread (or when no dispatcher
    /// is attached); otherwise posts it to the owner queue exactly once.
    fn route(&self, mutation: impl FnOnce(&TableItem) + Send + 'static) {
        let dispatcher = self.dispatcher.read().clone();
        if let Some(dispatcher) = dispatcher {
            if !dispatcher.is_owner_thread() {
                tracing::trace!(
                    target: "rowbind::binding",
                    "off-thread property set, posting to owner queue"
                );
                let weak = self.this.clone();
                dispatcher.post(move || {
                    // The item may have been dropped while queued.
                    if let Some(item) = weak.upgrade() {
                        mutation(&item);
                    }
                });
                return;
            }
        }
        mutation(self);
    }

    /// Applies a property mutation on the current thread.
    fn apply_set(&self, property: CellProperty, value: Option<PropertyValue>, redraw: bool) {
        {
            let mut data = self.data.write();
            match value {
                Some(value) => {
                    data.insert(property, value);
                }
                None => {
                    data.remove(&property);
                }
            }
        }
        if redraw && property.is_display() {
            self.push(property);
        }
    }

    /// Pushes one property's current value onto the bound cell, if the
    /// binding is still current.
    fn push(&self, property: CellProperty) {
        let Some(binding) = self.binding.lock().clone() else {
            return;
        };
        let Some(cell) = binding.cell.upgrade() else {
            return;
        };
        // The cell may have been reused for another item since we attached;
        // a generation mismatch means this push is stale.
        if cell.slot().generation() != binding.generation {
            tracing::trace!(
                target: "rowbind::binding",
                ?property,
                "skipping push, cell was rebound"
            );
            return;
        }
        let value = self.data.read().get(&property).cloned();
        cell.apply(property, value.as_ref());
    }

    /// Reads one property's stored value.
    pub fn get(&self, property: CellProperty) -> Option<PropertyValue> {
        self.data.read().get(&property).cloned()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Optional identifier for client use. Uniqueness is the caller's
    /// responsibility; duplicates are flagged by ID lookups in debug builds.
    pub fn id(&self) -> Option<String> {
        self.get(CellProperty::Id)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    /// Sets the identifier.
    pub fn set_id(&self, id: Option<String>) {
        self.set_with_redraw(CellProperty::Id, id.map(PropertyValue::Text), false);
    }

    /// The plain title text.
    pub fn title(&self) -> Option<String> {
        self.get(CellProperty::Title)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    /// Sets the plain title. A non-`None` value clears any rich title.
    pub fn set_title(&self, title: Option<String>) {
        self.set_exclusive(
            CellProperty::Title,
            CellProperty::AttributedTitle,
            title.map(PropertyValue::Text),
        );
    }

    /// The plain detail text.
    pub fn detail(&self) -> Option<String> {
        self.get(CellProperty::Detail)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    /// Sets the plain detail. A non-`None` value clears any rich detail.
    pub fn set_detail(&self, detail: Option<String>) {
        self.set_exclusive(
            CellProperty::Detail,
            CellProperty::AttributedDetail,
            detail.map(PropertyValue::Text),
        );
    }

    /// The rich title text.
    pub fn attributed_title(&self) -> Option<RichText> {
        self.get(CellProperty::AttributedTitle)
            .and_then(|v| v.as_rich().cloned())
    }

    /// Sets the rich title. A non-`None` value clears any plain title.
    pub fn set_attributed_title(&self, title: Option<RichText>) {
        self.set_exclusive(
            CellProperty::AttributedTitle,
            CellProperty::Title,
            title.map(PropertyValue::Rich),
        );
    }

    /// The rich detail text.
    pub fn attributed_detail(&self) -> Option<RichText> {
        self.get(CellProperty::AttributedDetail)
            .and_then(|v| v.as_rich().cloned())
    }

    /// Sets the rich detail. A non-`None` value clears any plain detail.
    pub fn set_attributed_detail(&self, detail: Option<RichText>) {
        self.set_exclusive(
            CellProperty::AttributedDetail,
            CellProperty::Detail,
            detail.map(PropertyValue::Rich),
        );
    }

    /// The primary text color.
    pub fn title_color(&self) -> Option<Color> {
        self.get(CellProperty::TitleColor).and_then(|v| v.as_color())
    }

    /// Sets the primary text color.
    pub fn set_title_color(&self, color: Option<Color>) {
        self.set(CellProperty::TitleColor, color.map(PropertyValue::Color));
    }

    /// The secondary text color.
    pub fn detail_color(&self) -> Option<Color> {
        self.get(CellProperty::DetailColor).and_then(|v| v.as_color())
    }

    /// Sets the secondary text color.
    pub fn set_detail_color(&self, color: Option<Color>) {
        self.set(CellProperty::DetailColor, color.map(PropertyValue::Color));
    }

    /// The leading image.
    pub fn image(&self) -> Option<ImageSource> {
        self.get(CellProperty::Image)
            .and_then(|v| v.as_image().cloned())
    }

    /// Sets the leading image.
    pub fn set_image(&self, image: Option<ImageSource>) {
        self.set(CellProperty::Image, image.map(PropertyValue::Image));
    }

    /// The accessory marker. Defaults to [`AccessoryType::None`].
    pub fn accessory(&self) -> AccessoryType {
        self.get(CellProperty::Accessory)
            .and_then(|v| v.as_accessory())
            .unwrap_or_default()
    }

    /// Sets the accessory marker.
    pub fn set_accessory(&self, accessory: AccessoryType) {
        self.set(
            CellProperty::Accessory,
            Some(PropertyValue::Accessory(accessory)),
        );
    }

    /// The selection style. Defaults to [`SelectionStyle::Default`].
    pub fn selection_style(&self) -> SelectionStyle {
        self.get(CellProperty::SelectionStyle)
            .and_then(|v| v.as_selection_style())
            .unwrap_or_default()
    }

    /// Sets the selection style.
    pub fn set_selection_style(&self, style: SelectionStyle) {
        self.set(
            CellProperty::SelectionStyle,
            Some(PropertyValue::Selection(style)),
        );
    }

    /// The edit affordance. Defaults to [`EditingStyle::None`].
    pub fn editing_style(&self) -> EditingStyle {
        self.get(CellProperty::EditingStyle)
            .and_then(|v| v.as_editing_style())
            .unwrap_or_default()
    }

    /// Sets the edit affordance.
    pub fn set_editing_style(&self, style: EditingStyle) {
        self.set_with_redraw(
            CellProperty::EditingStyle,
            Some(PropertyValue::Editing(style)),
            false,
        );
    }

    /// The indentation level. Defaults to 0.
    pub fn indentation_level(&self) -> usize {
        self.get(CellProperty::Indentation)
            .and_then(|v| v.as_int())
            .map(|n| n.max(0) as usize)
            .unwrap_or(0)
    }

    /// Sets the indentation level.
    pub fn set_indentation_level(&self, level: usize) {
        self.set(
            CellProperty::Indentation,
            Some(PropertyValue::Int(level as i64)),
        );
    }

    /// The preferred row height, or [`DEFAULT_ROW_HEIGHT`].
    pub fn row_height(&self) -> f32 {
        self.get(CellProperty::RowHeight)
            .and_then(|v| v.as_float())
            .map(|h| h as f32)
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Sets the preferred row height.
    pub fn set_row_height(&self, height: f32) {
        self.set_with_redraw(
            CellProperty::RowHeight,
            Some(PropertyValue::Float(height as f64)),
            false,
        );
    }

    /// `true` if the row participates in editing mode.
    pub fn can_edit(&self) -> bool {
        self.editing_style() != EditingStyle::None
    }

    /// `true` if the row highlights on touch.
    pub fn should_highlight(&self) -> bool {
        self.selection_style() != SelectionStyle::None
    }

    // ------------------------------------------------------------------
    // Cell type
    // ------------------------------------------------------------------

    /// The reuse identifier of the cell type displaying this item.
    pub fn reuse_id(&self) -> String {
        self.reuse_id.read().to_string()
    }

    /// Sets the cell type by reuse identifier.
    pub fn set_reuse_id(&self, reuse_id: impl Into<Cow<'static, str>>) {
        *self.reuse_id.write() = reuse_id.into();
    }

    // ------------------------------------------------------------------
    // Callbacks
    // ------------------------------------------------------------------

    /// Installs the per-configure callback.
    pub fn set_configure_callback<F>(&self, callback: F)
    where
        F: Fn(&Arc<TableItem>, IndexPath) + Send + Sync + 'static,
    {
        *self.configure_callback.write() = Some(Arc::new(callback));
    }

    /// Installs the selection callback.
    pub fn set_selection_callback<F>(&self, callback: F)
    where
        F: Fn(&SelectionContext) + Send + Sync + 'static,
    {
        *self.selection_callback.write() = Some(Arc::new(callback));
    }

    /// Responds to the row being selected.
    pub fn handle_selection(&self, context: &SelectionContext) {
        let callback = self.selection_callback.read().clone();
        if let Some(callback) = callback {
            callback(context);
        }
    }

    // ------------------------------------------------------------------
    // Binding
    // ------------------------------------------------------------------

    /// Attaches this item to a cell and pushes its display state onto it.
    ///
    /// The previous occupant of the cell's slot (if any) is detached first,
    /// then item and cell are linked both ways under a fresh slot
    /// generation, every display property is pushed (absent ones as `None`
    /// so recycled cells reset), and finally the configure callback runs.
    pub fn configure(&self, cell: &Arc<dyn TableCell>, index_path: IndexPath) {
        let slot = cell.slot();
        let (generation, previous) = slot.begin_attach();
        if let Some(previous) = previous {
            previous.clear_binding();
        }
        slot.complete_attach(self.this.clone());
        *self.binding.lock() = Some(CellBinding {
            cell: Arc::downgrade(cell),
            generation,
        });
        tracing::trace!(
            target: "rowbind::binding",
            section = index_path.section,
            row = index_path.row,
            generation,
            "attached item to cell"
        );

        let data = self.data.read().clone();
        for &property in CellProperty::DISPLAY {
            if Self::skip(property, &data) {
                continue;
            }
            cell.apply(property, data.get(&property));
        }

        let callback = self.configure_callback.read().clone();
        if let (Some(callback), Some(this)) = (callback, self.this.upgrade()) {
            callback(&this, index_path);
        }
    }

    /// Dequeues a cell of this item's type from the widget and configures it.
    pub fn configured_cell(
        &self,
        widget: &dyn ListWidget,
        index_path: IndexPath,
    ) -> Arc<dyn TableCell> {
        let cell = widget.dequeue_cell(&self.reuse_id(), index_path);
        self.configure(&cell, index_path);
        cell
    }

    /// `true` while this item is attached to a live, un-rebound cell.
    pub fn is_bound(&self) -> bool {
        self.bound_cell().is_some()
    }

    /// The cell currently displaying this item, if the binding is current.
    pub fn bound_cell(&self) -> Option<Arc<dyn TableCell>> {
        let binding = self.binding.lock().clone()?;
        let cell = binding.cell.upgrade()?;
        (cell.slot().generation() == binding.generation).then_some(cell)
    }

    /// Clears this item's forward reference to its cell.
    pub(crate) fn clear_binding(&self) {
        *self.binding.lock() = None;
    }

    /// Hands the item the controller's mutation queue. Subsequent setters
    /// called off the queue's owner thread are deferred onto it.
    pub(crate) fn attach_dispatcher(&self, dispatcher: Arc<UiDispatcher>) {
        *self.dispatcher.write() = Some(dispatcher);
    }

    /// Whether to omit `property` from a configure push because its
    /// alternate form is populated.
    fn skip(property: CellProperty, data: &HashMap<CellProperty, PropertyValue>) -> bool {
        match property {
            CellProperty::Title => data.contains_key(&CellProperty::AttributedTitle),
            CellProperty::AttributedTitle => data.contains_key(&CellProperty::Title),
            CellProperty::Detail => data.contains_key(&CellProperty::AttributedDetail),
            CellProperty::AttributedDetail => data.contains_key(&CellProperty::Detail),
            _ => false,
        }
    }
}

impl std::fmt::Debug for TableItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableItem")
            .field("id", &self.id())
            .field("title", &self.title())
            .field("detail", &self.detail())
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::mock::RecordingCell;
    use rowbind_core::UiDispatcher;

    #[test]
    fn test_title_detail_mutual_exclusivity() {
        let item = TableItem::new();

        item.set_title(Some("plain".into()));
        item.set_attributed_title(Some(RichText::plain("rich")));
        assert_eq!(item.title(), None);
        assert_eq!(
            item.attributed_title().map(|r| r.to_plain_string()),
            Some("rich".to_string())
        );

        item.set_title(Some("plain again".into()));
        assert_eq!(item.attributed_title(), None);
        assert_eq!(item.title(), Some("plain again".to_string()));

        item.set_detail(Some("plain detail".into()));
        item.set_attributed_detail(Some(RichText::plain("rich detail")));
        assert_eq!(item.detail(), None);
        item.set_detail(Some("back".into()));
        assert_eq!(item.attributed_detail(), None);
    }

    #[test]
    fn test_defaults() {
        let item = TableItem::new();
        assert_eq!(item.accessory(), AccessoryType::None);
        assert_eq!(item.selection_style(), SelectionStyle::Default);
        assert_eq!(item.editing_style(), EditingStyle::None);
        assert_eq!(item.indentation_level(), 0);
        assert!(!item.can_edit());
        assert!(item.should_highlight());
        assert_eq!(item.reuse_id(), DEFAULT_CELL_REUSE_ID);
    }

    #[test]
    fn test_color_accessors_push_to_the_bound_cell() {
        let item = TableItem::with_text("colored", None);
        assert_eq!(item.title_color(), None);
        assert_eq!(item.detail_color(), None);

        let recording = Arc::new(RecordingCell::new());
        let cell: Arc<dyn TableCell> = recording.clone();
        item.configure(&cell, IndexPath::zero());
        recording.clear_applied();

        item.set_title_color(Some(Color::rgb(200, 40, 40)));
        item.set_detail_color(Some(Color::rgba(0, 0, 0, 128)));
        assert_eq!(item.title_color(), Some(Color::rgb(200, 40, 40)));
        assert_eq!(item.detail_color(), Some(Color::rgba(0, 0, 0, 128)));

        let applied = recording.applied();
        assert!(applied
            .iter()
            .any(|(p, v)| *p == CellProperty::TitleColor && v.is_some()));
        assert!(applied
            .iter()
            .any(|(p, v)| *p == CellProperty::DetailColor && v.is_some()));

        item.set_title_color(None);
        assert_eq!(item.title_color(), None);
    }

    #[test]
    fn test_can_edit_follows_editing_style() {
        let item = TableItem::new();
        item.set_editing_style(EditingStyle::Delete);
        assert!(item.can_edit());
        item.set_editing_style(EditingStyle::None);
        assert!(!item.can_edit());
    }

    #[test]
    fn test_configure_pushes_properties_and_binds() {
        let item = TableItem::with_text("Title", Some("Detail"));
        let recording = Arc::new(RecordingCell::new());
        let cell: Arc<dyn TableCell> = recording.clone();

        item.configure(&cell, IndexPath::zero());

        assert!(item.is_bound());
        assert!(Arc::ptr_eq(&cell.slot().bound_item().unwrap(), &item));

        let recorded = recording.applied();
        let title = recorded
            .iter()
            .find(|(p, _)| *p == CellProperty::Title)
            .unwrap();
        assert_eq!(title.1.as_ref().and_then(|v| v.as_str()), Some("Title"));
        // Plain title populated, so the rich slot is either skipped or
        // reset, never pushed with a value.
        let rich = recorded
            .iter()
            .find(|(p, _)| *p == CellProperty::AttributedTitle);
        assert!(rich.is_none() || rich.unwrap().1.is_none());
    }

    #[test]
    fn test_reconfigure_detaches_previous_item() {
        let first = TableItem::with_text("one", None);
        let second = TableItem::with_text("two", None);
        let cell: Arc<dyn TableCell> = Arc::new(RecordingCell::new());

        first.configure(&cell, IndexPath::zero());
        assert!(first.is_bound());

        second.configure(&cell, IndexPath::new(0, 1));
        assert!(!first.is_bound());
        assert!(second.is_bound());
        assert!(Arc::ptr_eq(&cell.slot().bound_item().unwrap(), &second));
    }

    #[test]
    fn test_prepare_for_reuse_then_reconfigure() {
        let first = TableItem::with_text("one", None);
        let second = TableItem::with_text("two", None);
        let cell: Arc<dyn TableCell> = Arc::new(RecordingCell::new());

        first.configure(&cell, IndexPath::zero());
        cell.prepare_for_reuse();

        // The cell side is cleared immediately; the item's stale forward
        // reference is harmless because the generation no longer matches.
        assert!(cell.slot().bound_item().is_none());
        assert!(!first.is_bound());

        second.configure(&cell, IndexPath::zero());
        assert!(!first.is_bound());
        assert!(second.is_bound());
    }

    #[test]
    fn test_stale_push_is_skipped_after_rebind() {
        let first = TableItem::with_text("one", None);
        let second = TableItem::with_text("two", None);
        let recording = Arc::new(RecordingCell::new());
        let cell: Arc<dyn TableCell> = recording.clone();

        first.configure(&cell, IndexPath::zero());
        second.configure(&cell, IndexPath::zero());

        recording.clear_applied();

        // `first` still holds a binding handle, but its generation is stale.
        first.set_title(Some("updated".into()));
        assert!(recording.applied().is_empty());

        // The current occupant's pushes go through.
        second.set_title(Some("fresh".into()));
        assert_eq!(recording.applied().len(), 1);
    }

    #[test]
    fn test_unbound_set_stores_without_view_traffic() {
        let item = TableItem::new();
        item.set_title(Some("stored".into()));
        assert_eq!(item.title(), Some("stored".to_string()));
        assert!(!item.is_bound());
    }

    #[test]
    fn test_configure_callback_runs_each_attach() {
        let item = TableItem::with_text("cb", None);
        let runs = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counted = runs.clone();
        item.set_configure_callback(move |_item, _path| {
            counted.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        let cell: Arc<dyn TableCell> = Arc::new(RecordingCell::new());
        item.configure(&cell, IndexPath::zero());
        item.configure(&cell, IndexPath::zero());
        assert_eq!(runs.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_off_thread_set_applies_once_after_drain() {
        let dispatcher = UiDispatcher::new();
        let item = TableItem::with_text("before", None);
        item.attach_dispatcher(dispatcher.clone());

        let recording = Arc::new(RecordingCell::new());
        let cell: Arc<dyn TableCell> = recording.clone();
        item.configure(&cell, IndexPath::zero());

        recording.clear_applied();

        let worker_item = item.clone();
        std::thread::spawn(move || {
            worker_item.set_title(Some("after".into()));
        })
        .join()
        .unwrap();

        // Not yet applied: the mutation sits in the owner queue.
        assert_eq!(item.title(), Some("before".to_string()));
        assert!(recording.applied().is_empty());

        assert_eq!(dispatcher.process_pending(), 1);
        assert_eq!(item.title(), Some("after".to_string()));
        let applied = recording.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(
            applied[0].1.as_ref().and_then(|v| v.as_str()),
            Some("after")
        );

        // Draining again must not re-apply.
        assert_eq!(dispatcher.process_pending(), 0);
        assert_eq!(recording.applied().len(), 1);
    }

    #[test]
    fn test_queued_mutation_tolerates_dropped_item() {
        let dispatcher = UiDispatcher::new();
        {
            let item = TableItem::new();
            item.attach_dispatcher(dispatcher.clone());
            let worker_item = item.clone();
            std::thread::spawn(move || {
                worker_item.set_title(Some("never lands".into()));
            })
            .join()
            .unwrap();
        }
        // Item dropped before the drain; the queued task is a no-op.
        assert_eq!(dispatcher.process_pending(), 1);
    }
}
