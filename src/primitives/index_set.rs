//! Ordered coordinate collections produced by grid queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based `(row, col)` grid coordinate.
pub type Coord = (usize, usize);

/// Ordered sequence of grid coordinates.
///
/// Queries on [`DenseGrid`](super::DenseGrid) produce coordinates in row-major
/// order; the set keeps whatever order it was built with.
///
/// # Examples
///
/// ```
/// use gridmask::primitives::IndexSet;
///
/// let set: IndexSet = vec![(0, 1), (1, 0)].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.to_linear(2), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSet {
    coords: Vec<Coord>,
}

impl IndexSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing coordinate list.
    #[must_use]
    pub fn from_vec(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    /// Number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns true if the set holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterates coordinates in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.coords.iter()
    }

    /// Returns the coordinates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }

    /// Returns true if `coord` is in the set.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    /// Row-major linear offsets for a grid with `cols` columns.
    #[must_use]
    pub fn to_linear(&self, cols: usize) -> Vec<usize> {
        self.coords.iter().map(|&(r, c)| r * cols + c).collect()
    }

    /// Consumes the set, returning the coordinate list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Coord> {
        self.coords
    }

    /// Keeps at most `limit` coordinates from the front.
    pub(crate) fn keep_first(&mut self, limit: usize) {
        self.coords.truncate(limit);
    }

    /// Keeps at most `limit` coordinates from the back, preserving order.
    pub(crate) fn keep_last(&mut self, limit: usize) {
        let skip = self.coords.len().saturating_sub(limit);
        self.coords.drain(..skip);
    }
}

impl FromIterator<Coord> for IndexSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IndexSet {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (r, c)) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({r}, {c})")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = IndexSet::new();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "[]");
    }

    #[test]
    fn test_display_pairs() {
        let set = IndexSet::from_vec(vec![(0, 1), (1, 0)]);
        assert_eq!(set.to_string(), "[(0, 1), (1, 0)]");
    }

    #[test]
    fn test_keep_first_and_last() {
        let base = IndexSet::from_vec(vec![(0, 0), (0, 2), (1, 1), (2, 0)]);

        let mut head = base.clone();
        head.keep_first(2);
        assert_eq!(head.as_slice(), &[(0, 0), (0, 2)]);

        let mut tail = base.clone();
        tail.keep_last(2);
        assert_eq!(tail.as_slice(), &[(1, 1), (2, 0)]);

        let mut all = base.clone();
        all.keep_last(10);
        assert_eq!(all, base);
    }

    #[test]
    fn test_linear_offsets_row_major() {
        let set = IndexSet::from_vec(vec![(0, 2), (2, 1)]);
        assert_eq!(set.to_linear(5), vec![2, 11]);
    }

    #[test]
    fn test_serializes_as_pair_list() {
        let set = IndexSet::from_vec(vec![(0, 1)]);
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, "[[0,1]]");
    }
}
