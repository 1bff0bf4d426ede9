//! Declarative data-binding for platform table/list views.
//!
//! rowbind replaces hand-written data-source plumbing with a small tree of
//! view-model objects and a reconciling controller:
//!
//! - **Model**: [`TableData`] → [`TableSection`] → [`TableItem`], addressed
//!   by [`IndexPath`]. Items carry display state in a name-keyed property
//!   map.
//! - **Binding**: a [`TableItem`] attached to a reusable cell pushes
//!   property changes straight onto it, with generation counters guarding
//!   against cell reuse races.
//! - **Reconciliation**: a [`TableController`] applies structural mutations
//!   to the model and mirrors them into the host widget as batched
//!   insert/delete operations, or model-only when no widget is live.
//! - **Adapter**: the controller implements [`TableSource`], the complete
//!   query surface a host widget needs.
//!
//! The host side is two traits: [`ListWidget`] for the platform view and
//! [`TableCell`] for its reusable cells.
//!
//! # Example
//!
//! ```
//! use rowbind::{TableData, TableItem, TableSection};
//!
//! let data = TableData::new();
//! let section = TableSection::with_title("Settings");
//! section.add_item(TableItem::with_text("Wi-Fi", Some("Connected")));
//! section.add_item(TableItem::with_text("Bluetooth", None));
//! data.add_section(section);
//!
//! assert_eq!(data.number_of_sections(), 1);
//! assert_eq!(data.number_of_items_in(0), 2);
//! assert_eq!(data.item((0, 1).into()).unwrap().title().as_deref(), Some("Bluetooth"));
//! ```

pub mod error;
pub mod model;
pub mod view;

pub mod prelude;

pub use error::{Error, Result};
pub use model::{
    AccessoryType, CellProperty, Color, EditingStyle, ImageSource, IndexPath, Node, PropertyValue,
    RichText, SelectionStyle, TableData, TableItem, TableSection, TextSpan,
};
pub use view::{
    CellSlot, HeaderFooterView, ListWidget, RowAnimation, SelectionContext, TableCell,
    TableController, TableSource,
};
