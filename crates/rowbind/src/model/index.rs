//! Index paths for addressing rows in a sectioned table.
//!
//! An [`IndexPath`] is the universal address in rowbind: `section` indexes
//! into the table data's section sequence, `row` indexes within a section's
//! item sequence.

use std::fmt;

/// A `(section, row)` pair addressing one item in a [`TableData`].
///
/// # Index Validity
///
/// Index paths are plain positions, not stable identities. After model
/// modifications (insertions, deletions, moves), previously obtained paths
/// may address a different item or nothing at all. Use them immediately
/// rather than storing them.
///
/// [`TableData`]: crate::model::TableData
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndexPath {
    /// Index of the section within the table data.
    pub section: usize,
    /// Index of the row within the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates an index path for the given section and row.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// The conventional default destination: row 0 of section 0.
    #[inline]
    pub const fn zero() -> Self {
        Self { section: 0, row: 0 }
    }

    /// Returns the path for the next row in the same section.
    #[inline]
    pub const fn next_row(self) -> Self {
        Self {
            section: self.section,
            row: self.row + 1,
        }
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexPath({}, {})", self.section, self.row)
    }
}

impl PartialOrd for IndexPath {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexPath {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.section.cmp(&other.section) {
            std::cmp::Ordering::Equal => self.row.cmp(&other.row),
            ordering => ordering,
        }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self { section, row }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(IndexPath::new(0, 5) < IndexPath::new(1, 0));
        assert!(IndexPath::new(1, 0) < IndexPath::new(1, 1));
        assert_eq!(IndexPath::new(2, 3), IndexPath::from((2, 3)));
    }

    #[test]
    fn test_next_row() {
        let path = IndexPath::new(1, 4);
        assert_eq!(path.next_row(), IndexPath::new(1, 5));
    }

    #[test]
    fn test_zero() {
        assert_eq!(IndexPath::zero(), IndexPath::new(0, 0));
        assert_eq!(IndexPath::default(), IndexPath::zero());
    }
}
