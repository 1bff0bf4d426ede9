//! The name-keyed property set for cell display data.
//!
//! A [`TableItem`] stores its display state as a map from [`CellProperty`]
//! to [`PropertyValue`]. Binding pushes each entry onto the cell by key; a
//! cell applies the keys it understands and ignores the rest. The value
//! types here (`Color`, `RichText`, `ImageSource`) are deliberately thin:
//! concrete rendering belongs to the host widget layer.
//!
//! [`TableItem`]: crate::model::TableItem

use std::sync::Arc;

/// Keys for the per-item property map.
///
/// Display properties are pushed to a bound cell whenever they change;
/// the remaining keys only affect model behavior and never generate view
/// traffic on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellProperty {
    /// Optional caller-supplied identifier (not pushed to cells).
    Id,
    /// Primary text.
    Title,
    /// Secondary text.
    Detail,
    /// Color of the primary text.
    TitleColor,
    /// Color of the secondary text.
    DetailColor,
    /// Rich-text override for the primary text. Mutually exclusive with
    /// [`CellProperty::Title`].
    AttributedTitle,
    /// Rich-text override for the secondary text. Mutually exclusive with
    /// [`CellProperty::Detail`].
    AttributedDetail,
    /// Leading image.
    Image,
    /// Accessory marker on the trailing edge.
    Accessory,
    /// Selection highlight style.
    SelectionStyle,
    /// Row indentation level.
    Indentation,
    /// Edit affordance shown in editing mode (not pushed to cells).
    EditingStyle,
    /// Preferred row height in points (not pushed to cells).
    RowHeight,
}

impl CellProperty {
    /// The properties pushed onto a cell during configuration, in push order.
    pub const DISPLAY: &'static [CellProperty] = &[
        CellProperty::Title,
        CellProperty::Detail,
        CellProperty::TitleColor,
        CellProperty::DetailColor,
        CellProperty::AttributedTitle,
        CellProperty::AttributedDetail,
        CellProperty::Image,
        CellProperty::Accessory,
        CellProperty::SelectionStyle,
        CellProperty::Indentation,
    ];

    /// Returns `true` if changes to this property are pushed to a bound cell.
    #[inline]
    pub fn is_display(self) -> bool {
        Self::DISPLAY.contains(&self)
    }
}

/// A type-erased property value.
///
/// Each variant carries one of the value kinds a cell can be asked to
/// display. Use the `as_*` accessors to extract a concrete value; they
/// return `None` on a kind mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Plain text.
    Text(String),
    /// Styled text.
    Rich(RichText),
    /// A color.
    Color(Color),
    /// An image reference.
    Image(ImageSource),
    /// An accessory marker.
    Accessory(AccessoryType),
    /// A selection highlight style.
    Selection(SelectionStyle),
    /// An edit affordance.
    Editing(EditingStyle),
    /// An integer (indentation levels and the like).
    Int(i64),
    /// A floating-point quantity (heights).
    Float(f64),
    /// A boolean flag.
    Bool(bool),
}

impl PropertyValue {
    /// Returns the contained text, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained rich text, if any.
    pub fn as_rich(&self) -> Option<&RichText> {
        match self {
            Self::Rich(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the contained color, if any.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the contained image reference, if any.
    pub fn as_image(&self) -> Option<&ImageSource> {
        match self {
            Self::Image(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the contained accessory marker, if any.
    pub fn as_accessory(&self) -> Option<AccessoryType> {
        match self {
            Self::Accessory(a) => Some(*a),
            _ => None,
        }
    }

    /// Returns the contained selection style, if any.
    pub fn as_selection_style(&self) -> Option<SelectionStyle> {
        match self {
            Self::Selection(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns the contained editing style, if any.
    pub fn as_editing_style(&self) -> Option<EditingStyle> {
        match self {
            Self::Editing(e) => Some(*e),
            _ => None,
        }
    }

    /// Returns the contained integer, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained float, if any.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the contained boolean, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<RichText> for PropertyValue {
    fn from(r: RichText) -> Self {
        Self::Rich(r)
    }
}

impl From<Color> for PropertyValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A reference to an image the host widget can resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A name looked up in the host's asset catalog.
    Named(String),
    /// Raw encoded image bytes.
    Bytes(Arc<[u8]>),
}

/// Styled text: a sequence of spans with per-span attributes.
///
/// This is the "attributed" counterpart to a plain `String`. Setting a
/// rich value on an item clears the plain one and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText {
    spans: Vec<TextSpan>,
}

/// One run of uniformly styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl RichText {
    /// Creates rich text consisting of a single unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![TextSpan {
                text: text.into(),
                color: None,
                bold: false,
                italic: false,
            }],
        }
    }

    /// Appends a styled span.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.spans.push(span);
        self
    }

    /// The spans making up this text.
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// Concatenates all span text into one plain string.
    pub fn to_plain_string(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// The accessory marker shown at a row's trailing edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccessoryType {
    #[default]
    None,
    Checkmark,
    DisclosureIndicator,
    DetailButton,
}

/// How a row highlights when selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionStyle {
    /// No highlight; the row does not respond visually to selection.
    None,
    /// The host widget's standard highlight.
    #[default]
    Default,
    Blue,
    Gray,
}

/// The edit affordance a row presents in editing mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditingStyle {
    #[default]
    None,
    Insert,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_kind_match() {
        let value = PropertyValue::from("hello");
        assert_eq!(value.as_str(), Some("hello"));
        assert_eq!(value.as_int(), None);

        let value = PropertyValue::from(7i64);
        assert_eq!(value.as_int(), Some(7));
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_display_properties_exclude_behavioral_keys() {
        assert!(CellProperty::Title.is_display());
        assert!(CellProperty::Accessory.is_display());
        assert!(!CellProperty::Id.is_display());
        assert!(!CellProperty::EditingStyle.is_display());
        assert!(!CellProperty::RowHeight.is_display());
    }

    #[test]
    fn test_rich_text_plain_round_trip() {
        let rich = RichText::plain("Hello, ").with_span(TextSpan {
            text: "world".into(),
            color: Some(Color::rgb(255, 0, 0)),
            bold: true,
            italic: false,
        });
        assert_eq!(rich.to_plain_string(), "Hello, world");
        assert_eq!(rich.spans().len(), 2);
    }
}
