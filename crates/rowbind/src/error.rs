//! Error types for the table model.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when structurally mutating the table model.
///
/// Reads never produce these; out-of-range reads resolve to `None`.
/// Structural writes against a known-invalid target are a caller contract
/// violation and are reported rather than silently clamped (the one
/// exception being the auto-extend normalization performed by
/// [`TableData::insert_items`](crate::model::TableData::insert_items)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A section index was outside the stored section sequence.
    #[error("section index {index} out of bounds (section count {count})")]
    SectionOutOfBounds { index: usize, count: usize },

    /// A row index was outside a section's item sequence.
    #[error("row index {row} out of bounds (item count {count})")]
    RowOutOfBounds { row: usize, count: usize },
}

impl Error {
    /// Creates a section bounds error.
    pub fn section_out_of_bounds(index: usize, count: usize) -> Self {
        Self::SectionOutOfBounds { index, count }
    }

    /// Creates a row bounds error.
    pub fn row_out_of_bounds(row: usize, count: usize) -> Self {
        Self::RowOutOfBounds { row, count }
    }
}
