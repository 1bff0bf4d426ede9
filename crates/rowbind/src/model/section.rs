//! The grouping view-model.
//!
//! A [`TableSection`] owns an ordered sequence of [`Node`]s and an embedded
//! header [`TableItem`] that carries its identity and header text. When a
//! section is nested inside another section as a [`Node::Group`], that
//! header item is also its row representation. Footer text lives in
//! dedicated fields rather than the header item's property map.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::RwLock;
use rowbind_core::UiDispatcher;

use crate::error::{Error, Result};
use crate::model::{Node, RichText, TableItem};
use crate::view::{
    HeaderFooterView, ListWidget, DEFAULT_HEADER_FOOTER_HEIGHT, DEFAULT_HEADER_FOOTER_REUSE_ID,
};

/// Callback invoked when a section's header or footer view is configured.
pub type HeaderFooterFn = dyn Fn(&Arc<dyn HeaderFooterView>, usize) + Send + Sync;

/// Plain/rich text for a footer. At most one of each pair is populated.
#[derive(Default)]
struct FooterText {
    title: Option<String>,
    rich_title: Option<RichText>,
    detail: Option<String>,
    rich_detail: Option<RichText>,
}

/// One section of a table: a header, an optional footer, and child nodes.
///
/// Sections are `Arc`-shared like items. The embedded header item provides
/// the section's ID, title, and detail; its setters follow the same
/// plain/rich mutual exclusivity as any item.
pub struct TableSection {
    header: Arc<TableItem>,
    footer: RwLock<FooterText>,
    children: RwLock<Vec<Node>>,
    header_reuse_id: RwLock<Cow<'static, str>>,
    footer_reuse_id: RwLock<Cow<'static, str>>,
    header_callback: RwLock<Option<Arc<HeaderFooterFn>>>,
    footer_callback: RwLock<Option<Arc<HeaderFooterFn>>>,
    header_height: RwLock<Option<f32>>,
    footer_height: RwLock<Option<f32>>,
}

impl Default for TableSection {
    fn default() -> Self {
        Self {
            header: TableItem::new(),
            footer: RwLock::new(FooterText::default()),
            children: RwLock::new(Vec::new()),
            header_reuse_id: RwLock::new(Cow::Borrowed(DEFAULT_HEADER_FOOTER_REUSE_ID)),
            footer_reuse_id: RwLock::new(Cow::Borrowed(DEFAULT_HEADER_FOOTER_REUSE_ID)),
            header_callback: RwLock::new(None),
            footer_callback: RwLock::new(None),
            header_height: RwLock::new(None),
            footer_height: RwLock::new(None),
        }
    }
}

impl TableSection {
    /// Creates an empty, untitled section.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a section with a header title.
    pub fn with_title(title: impl Into<String>) -> Arc<Self> {
        let section = Self::new();
        section.set_title(Some(title.into()));
        section
    }

    /// The embedded header item. Doubles as the section's row representation
    /// when the section is nested as a [`Node::Group`].
    pub fn header(&self) -> &Arc<TableItem> {
        &self.header
    }

    // ------------------------------------------------------------------
    // Identity and header text (delegated to the header item)
    // ------------------------------------------------------------------

    /// The section's identifier.
    pub fn id(&self) -> Option<String> {
        self.header.id()
    }

    /// Sets the section's identifier.
    pub fn set_id(&self, id: Option<String>) {
        self.header.set_id(id);
    }

    /// The plain header title.
    pub fn title(&self) -> Option<String> {
        self.header.title()
    }

    /// Sets the plain header title.
    pub fn set_title(&self, title: Option<String>) {
        self.header.set_title(title);
    }

    /// The rich header title.
    pub fn attributed_title(&self) -> Option<RichText> {
        self.header.attributed_title()
    }

    /// Sets the rich header title.
    pub fn set_attributed_title(&self, title: Option<RichText>) {
        self.header.set_attributed_title(title);
    }

    /// The plain header detail text.
    pub fn detail(&self) -> Option<String> {
        self.header.detail()
    }

    /// Sets the plain header detail text.
    pub fn set_detail(&self, detail: Option<String>) {
        self.header.set_detail(detail);
    }

    /// The rich header detail text.
    pub fn attributed_detail(&self) -> Option<RichText> {
        self.header.attributed_detail()
    }

    /// Sets the rich header detail text.
    pub fn set_attributed_detail(&self, detail: Option<RichText>) {
        self.header.set_attributed_detail(detail);
    }

    // ------------------------------------------------------------------
    // Footer text
    // ------------------------------------------------------------------

    /// The plain footer title.
    pub fn footer_title(&self) -> Option<String> {
        self.footer.read().title.clone()
    }

    /// Sets the plain footer title, clearing any rich footer title.
    pub fn set_footer_title(&self, title: Option<String>) {
        let mut footer = self.footer.write();
        if title.is_some() {
            footer.rich_title = None;
        }
        footer.title = title;
    }

    /// The rich footer title.
    pub fn attributed_footer_title(&self) -> Option<RichText> {
        self.footer.read().rich_title.clone()
    }

    /// Sets the rich footer title, clearing any plain footer title.
    pub fn set_attributed_footer_title(&self, title: Option<RichText>) {
        let mut footer = self.footer.write();
        if title.is_some() {
            footer.title = None;
        }
        footer.rich_title = title;
    }

    /// The plain footer detail text.
    pub fn footer_detail(&self) -> Option<String> {
        self.footer.read().detail.clone()
    }

    /// Sets the plain footer detail text, clearing any rich footer detail.
    pub fn set_footer_detail(&self, detail: Option<String>) {
        let mut footer = self.footer.write();
        if detail.is_some() {
            footer.rich_detail = None;
        }
        footer.detail = detail;
    }

    /// The rich footer detail text.
    pub fn attributed_footer_detail(&self) -> Option<RichText> {
        self.footer.read().rich_detail.clone()
    }

    /// Sets the rich footer detail text, clearing any plain footer detail.
    pub fn set_attributed_footer_detail(&self, detail: Option<RichText>) {
        let mut footer = self.footer.write();
        if detail.is_some() {
            footer.detail = None;
        }
        footer.rich_detail = detail;
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Number of rows in this section.
    pub fn item_count(&self) -> usize {
        self.children.read().len()
    }

    /// The node at `row`, or `None` when out of range.
    pub fn node(&self, row: usize) -> Option<Node> {
        self.children.read().get(row).cloned()
    }

    /// The item at `row` (a group's header item for nested sections), or
    /// `None` when out of range.
    pub fn item(&self, row: usize) -> Option<Arc<TableItem>> {
        self.children.read().get(row).map(|n| n.item().clone())
    }

    /// Appends one node.
    pub fn add_node(&self, node: impl Into<Node>) {
        self.children.write().push(node.into());
    }

    /// Appends one item row.
    pub fn add_item(&self, item: Arc<TableItem>) {
        self.add_node(Node::Leaf(item));
    }

    /// Inserts nodes contiguously starting at `row`.
    ///
    /// `row == item_count()` appends; anything larger is an error.
    pub fn insert_nodes(&self, nodes: impl IntoIterator<Item = Node>, row: usize) -> Result<()> {
        let mut children = self.children.write();
        if row > children.len() {
            return Err(Error::row_out_of_bounds(row, children.len()));
        }
        for (offset, node) in nodes.into_iter().enumerate() {
            children.insert(row + offset, node);
        }
        Ok(())
    }

    /// Inserts item rows contiguously starting at `row`.
    pub fn insert_items(&self, items: &[Arc<TableItem>], row: usize) -> Result<()> {
        self.insert_nodes(items.iter().cloned().map(Node::Leaf), row)
    }

    /// Removes and returns the node at `row`.
    pub fn remove_row(&self, row: usize) -> Result<Node> {
        let mut children = self.children.write();
        if row >= children.len() {
            return Err(Error::row_out_of_bounds(row, children.len()));
        }
        Ok(children.remove(row))
    }

    /// Removes the first node that is `node` by identity. Returns whether a
    /// node was removed.
    pub(crate) fn remove_node_by_identity(&self, node: &Node) -> bool {
        let mut children = self.children.write();
        let position = children.iter().position(|candidate| match (candidate, node) {
            (Node::Leaf(a), Node::Leaf(b)) => Arc::ptr_eq(a, b),
            (Node::Group(a), Node::Group(b)) => Arc::ptr_eq(a, b),
            _ => false,
        });
        match position {
            Some(position) => {
                children.remove(position);
                true
            }
            None => false,
        }
    }

    /// Removes all children.
    pub fn remove_all(&self) {
        self.children.write().clear();
    }

    /// Collects every item in this section (and nested groups) whose ID is
    /// `id` into `matches`.
    pub(crate) fn collect_items_with_id(&self, id: &str, matches: &mut Vec<Arc<TableItem>>) {
        let children = self.children.read().clone();
        for node in children {
            match node {
                Node::Leaf(item) => {
                    if item.id().as_deref() == Some(id) {
                        matches.push(item);
                    }
                }
                Node::Group(section) => {
                    if section.id().as_deref() == Some(id) {
                        matches.push(section.header().clone());
                    }
                    section.collect_items_with_id(id, matches);
                }
            }
        }
    }

    /// Finds the item with the given ID in this section, recursing through
    /// nested groups. Duplicate IDs are a model integrity violation: fatal
    /// in debug builds, first match wins in release.
    pub fn item_with_id(&self, id: &str) -> Option<Arc<TableItem>> {
        let mut matches = Vec::new();
        self.collect_items_with_id(id, &mut matches);
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

    // ------------------------------------------------------------------
    // Header / footer views
    // ------------------------------------------------------------------

    /// The header view's reuse identifier.
    pub fn header_reuse_id(&self) -> String {
        self.header_reuse_id.read().to_string()
    }

    /// Sets the header view type by reuse identifier.
    pub fn set_header_reuse_id(&self, reuse_id: impl Into<Cow<'static, str>>) {
        *self.header_reuse_id.write() = reuse_id.into();
    }

    /// The footer view's reuse identifier.
    pub fn footer_reuse_id(&self) -> String {
        self.footer_reuse_id.read().to_string()
    }

    /// Sets the footer view type by reuse identifier.
    pub fn set_footer_reuse_id(&self, reuse_id: impl Into<Cow<'static, str>>) {
        *self.footer_reuse_id.write() = reuse_id.into();
    }

    /// Installs a custom header configure callback. While installed, the
    /// plain header title is suppressed in favor of the configured view.
    pub fn set_header_callback<F>(&self, callback: F)
    where
        F: Fn(&Arc<dyn HeaderFooterView>, usize) + Send + Sync + 'static,
    {
        *self.header_callback.write() = Some(Arc::new(callback));
    }

    /// Installs a custom footer configure callback.
    pub fn set_footer_callback<F>(&self, callback: F)
    where
        F: Fn(&Arc<dyn HeaderFooterView>, usize) + Send + Sync + 'static,
    {
        *self.footer_callback.write() = Some(Arc::new(callback));
    }

    /// `true` when a custom header view is in use.
    pub fn has_header_view(&self) -> bool {
        self.header_callback.read().is_some()
    }

    /// `true` when a custom footer view is in use.
    pub fn has_footer_view(&self) -> bool {
        self.footer_callback.read().is_some()
    }

    /// Whether this section presents any header at all.
    pub fn shows_header(&self) -> bool {
        self.has_header_view()
            || self.title().is_some_and(|t| !t.is_empty())
            || self.attributed_title().is_some()
    }

    /// Whether this section presents any footer at all.
    pub fn shows_footer(&self) -> bool {
        let footer = self.footer.read();
        self.has_footer_view()
            || footer.title.as_ref().is_some_and(|t| !t.is_empty())
            || footer.rich_title.is_some()
    }

    /// The title the host widget should render as a plain text header, or
    /// `None` when a custom header view supplies the header instead.
    pub fn header_title_for_widget(&self) -> Option<String> {
        if self.has_header_view() {
            return None;
        }
        self.title()
    }

    /// The plain footer title for the host widget, suppressed while a custom
    /// footer view is installed.
    pub fn footer_title_for_widget(&self) -> Option<String> {
        if self.has_footer_view() {
            return None;
        }
        self.footer_title()
    }

    /// Dequeues and configures the custom header view, if one is in use.
    pub fn header_view(
        &self,
        widget: &dyn ListWidget,
        section_index: usize,
    ) -> Option<Arc<dyn HeaderFooterView>> {
        let callback = self.header_callback.read().clone()?;
        let view = widget.dequeue_header_footer(&self.header_reuse_id());
        view.set_title(self.title().as_deref(), self.attributed_title().as_ref());
        view.set_detail(self.detail().as_deref(), self.attributed_detail().as_ref());
        callback(&view, section_index);
        Some(view)
    }

    /// Dequeues and configures the custom footer view, if one is in use.
    pub fn footer_view(
        &self,
        widget: &dyn ListWidget,
        section_index: usize,
    ) -> Option<Arc<dyn HeaderFooterView>> {
        let callback = self.footer_callback.read().clone()?;
        let view = widget.dequeue_header_footer(&self.footer_reuse_id());
        {
            let footer = self.footer.read();
            view.set_title(footer.title.as_deref(), footer.rich_title.as_ref());
            view.set_detail(footer.detail.as_deref(), footer.rich_detail.as_ref());
        }
        callback(&view, section_index);
        Some(view)
    }

    /// Sets an explicit header height.
    pub fn set_header_height(&self, height: Option<f32>) {
        *self.header_height.write() = height;
    }

    /// Sets an explicit footer height.
    pub fn set_footer_height(&self, height: Option<f32>) {
        *self.footer_height.write() = height;
    }

    /// The header height: 0 when no header shows, otherwise the explicit
    /// height or [`DEFAULT_HEADER_FOOTER_HEIGHT`].
    pub fn header_height(&self) -> f32 {
        if !self.shows_header() {
            return 0.0;
        }
        self.header_height
            .read()
            .unwrap_or(DEFAULT_HEADER_FOOTER_HEIGHT)
    }

    /// The footer height: 0 when no footer shows, otherwise the explicit
    /// height or [`DEFAULT_HEADER_FOOTER_HEIGHT`].
    pub fn footer_height(&self) -> f32 {
        if !self.shows_footer() {
            return 0.0;
        }
        self.footer_height
            .read()
            .unwrap_or(DEFAULT_HEADER_FOOTER_HEIGHT)
    }

    // ------------------------------------------------------------------
    // Wiring
    // ------------------------------------------------------------------

    /// Registers this section's view types (and its children's, recursively)
    /// with the host widget.
    pub fn register(&self, widget: &dyn ListWidget) {
        widget.register_header_footer_type(&self.header_reuse_id());
        widget.register_header_footer_type(&self.footer_reuse_id());
        let children = self.children.read().clone();
        for node in children {
            match node {
                Node::Leaf(item) => widget.register_cell_type(&item.reuse_id()),
                Node::Group(section) => {
                    widget.register_cell_type(&section.header().reuse_id());
                    section.register(widget);
                }
            }
        }
    }

    /// Hands the controller's mutation queue to the header and every child,
    /// recursively.
    pub(crate) fn attach_dispatcher(&self, dispatcher: &Arc<UiDispatcher>) {
        self.header.attach_dispatcher(dispatcher.clone());
        let children = self.children.read().clone();
        for node in children {
            match node {
                Node::Leaf(item) => item.attach_dispatcher(dispatcher.clone()),
                Node::Group(section) => section.attach_dispatcher(dispatcher),
            }
        }
    }
}

impl std::fmt::Debug for TableSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSection")
            .field("id", &self.id())
            .field("title", &self.title())
            .field("items", &self.item_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Arc<TableItem> {
        let item = TableItem::new();
        item.set_id(Some(id.to_string()));
        item
    }

    #[test]
    fn test_insert_rows_and_bounds() {
        let section = TableSection::new();
        section.add_item(item("a"));
        section.add_item(item("c"));

        section.insert_items(&[item("b")], 1).unwrap();
        assert_eq!(section.item_count(), 3);
        assert_eq!(section.item(1).unwrap().id(), Some("b".to_string()));

        // Appending at the end is fine, one past the end is not.
        section.insert_items(&[item("d")], 3).unwrap();
        assert!(section.insert_items(&[item("e")], 5).is_err());
        assert!(section.item(10).is_none());
    }

    #[test]
    fn test_recursive_id_lookup() {
        let inner = TableSection::with_title("inner");
        inner.set_id(Some("inner".to_string()));
        inner.add_item(item("deep"));

        let outer = TableSection::with_title("outer");
        outer.add_item(item("shallow"));
        outer.add_node(Node::Group(inner.clone()));

        assert!(outer.item_with_id("shallow").is_some());
        let deep = outer.item_with_id("deep").unwrap();
        assert_eq!(deep.id(), Some("deep".to_string()));
        // A nested group is found through its header item.
        let found = outer.item_with_id("inner").unwrap();
        assert!(Arc::ptr_eq(&found, inner.header()));
        assert!(outer.item_with_id("missing").is_none());
    }

    #[test]
    fn test_footer_plain_rich_exclusivity() {
        let section = TableSection::new();
        section.set_footer_title(Some("plain".into()));
        section.set_attributed_footer_title(Some(RichText::plain("rich")));
        assert_eq!(section.footer_title(), None);
        section.set_footer_title(Some("back".into()));
        assert_eq!(section.attributed_footer_title(), None);
    }

    #[test]
    fn test_header_visibility_and_height() {
        let section = TableSection::new();
        assert!(!section.shows_header());
        assert_eq!(section.header_height(), 0.0);

        section.set_title(Some("Header".into()));
        assert!(section.shows_header());
        assert_eq!(section.header_height(), DEFAULT_HEADER_FOOTER_HEIGHT);

        section.set_header_height(Some(60.0));
        assert_eq!(section.header_height(), 60.0);

        // An empty title does not show a header.
        let blank = TableSection::with_title("");
        assert!(!blank.shows_header());
    }

    #[test]
    fn test_header_title_suppressed_by_custom_view() {
        let section = TableSection::with_title("Title");
        assert_eq!(section.header_title_for_widget(), Some("Title".to_string()));

        section.set_header_callback(|_view, _index| {});
        assert_eq!(section.header_title_for_widget(), None);
        assert!(section.shows_header());
    }

    #[test]
    fn test_nested_group_row_representation() {
        let nested = TableSection::with_title("Nested");
        let parent = TableSection::new();
        parent.add_node(Node::Group(nested.clone()));

        let row = parent.item(0).unwrap();
        assert!(Arc::ptr_eq(&row, nested.header()));
        assert_eq!(row.title(), Some("Nested".to_string()));
    }
}
