//! The section-content union.
//!
//! A section's children are [`Node`]s: either a plain row
//! ([`Node::Leaf`]) or a nested section ([`Node::Group`]). The root of a
//! [`TableData`] holds sections only; item/section confusion at the root is
//! unrepresentable rather than checked at runtime.
//!
//! [`TableData`]: crate::model::TableData

use std::sync::Arc;

use crate::model::{TableItem, TableSection};

/// One entry in a section's child sequence.
#[derive(Clone)]
pub enum Node {
    /// A plain row.
    Leaf(Arc<TableItem>),
    /// A nested section, rendered as a row through its header item.
    Group(Arc<TableSection>),
}

impl Node {
    /// The item representing this node as a row: the leaf item itself, or a
    /// group's header item.
    pub fn item(&self) -> &Arc<TableItem> {
        match self {
            Node::Leaf(item) => item,
            Node::Group(section) => section.header(),
        }
    }

    /// The nested section, if this node is a group.
    pub fn as_group(&self) -> Option<&Arc<TableSection>> {
        match self {
            Node::Leaf(_) => None,
            Node::Group(section) => Some(section),
        }
    }

    /// The node's identifier, if one was assigned.
    pub fn id(&self) -> Option<String> {
        self.item().id()
    }
}

impl From<Arc<TableItem>> for Node {
    fn from(item: Arc<TableItem>) -> Self {
        Node::Leaf(item)
    }
}

impl From<Arc<TableSection>> for Node {
    fn from(section: Arc<TableSection>) -> Self {
        Node::Group(section)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Leaf(item) => f.debug_tuple("Leaf").field(item).finish(),
            Node::Group(section) => f
                .debug_tuple("Group")
                .field(&section.header().id())
                .finish(),
        }
    }
}
