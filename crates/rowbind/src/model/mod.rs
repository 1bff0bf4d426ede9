//! The table data model.
//!
//! Three `Arc`-shared view-model types form a two-level tree:
//! [`TableData`] owns sections, [`TableSection`] owns [`Node`] children
//! (plain [`TableItem`] rows or nested sections), and every row addresses
//! as an [`IndexPath`]. Items carry their display state in a name-keyed
//! property map and push changes onto whatever cell currently shows them.

mod data;
mod index;
mod item;
mod node;
mod property;
mod section;

pub use data::TableData;
pub use index::IndexPath;
pub use item::{ConfigureFn, SelectionFn, TableItem};
pub use node::Node;
pub use property::{
    AccessoryType, CellProperty, Color, EditingStyle, ImageSource, PropertyValue, RichText,
    SelectionStyle, TextSpan,
};
pub use section::{HeaderFooterFn, TableSection};
