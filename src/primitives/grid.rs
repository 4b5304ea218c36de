//! Dense grid type for 2D numeric data.

use super::{CmpOp, Coord, IndexSet, SelectMode};
use crate::error::{GridError, Result};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

const RENDER_DELIMITER: &str = " ";
const RENDER_WIDTH: usize = 7;
const RENDER_PRECISION: usize = 4;

/// A fixed-size 2D grid of `f64` values (row-major storage).
///
/// `data.len() == rows * cols` holds for every grid, including grids
/// produced by deserialization.
///
/// # Examples
///
/// ```
/// use gridmask::primitives::{CmpOp, DenseGrid, SelectMode};
///
/// let mut g = DenseGrid::from_vec(2, 2, vec![0.2, 0.6, 0.9, 0.1]).expect("2*2 = 4 values");
/// let hits = g.compare_to_scalar(0.5, CmpOp::Gt, None, SelectMode::First).expect("no limit");
/// assert_eq!(hits.as_slice(), &[(0, 1), (1, 0)]);
///
/// g.assign_at_indices(&hits, 1.0).expect("indices come from the grid");
/// assert_eq!(g.as_slice(), &[0.2, 1.0, 1.0, 0.1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct DenseGrid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawGrid> for DenseGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::from_vec(raw.rows, raw.cols, raw.data)
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(GridError::InvalidDimension {
            rows: rows as i128,
            cols: cols as i128,
        })
}

impl DenseGrid {
    /// Creates a zero-filled grid from signed dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is negative
    /// or `rows * cols` overflows.
    pub fn create(rows: isize, cols: isize) -> Result<Self> {
        if rows < 0 || cols < 0 {
            return Err(GridError::InvalidDimension {
                rows: rows as i128,
                cols: cols as i128,
            });
        }
        let (rows, cols) = (rows.unsigned_abs(), cols.unsigned_abs());
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    /// Creates a grid of zeros.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("grid dimension {rows}x{cols} overflows usize"));
        Self {
            rows,
            cols,
            data: vec![0.0; len],
        }
    }

    /// Creates a grid from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if data length doesn't match
    /// rows * cols, or [`GridError::InvalidDimension`] if that product overflows.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            return Err(GridError::invalid_argument(
                "data",
                format!("{} values", data.len()),
                &format!("rows * cols = {len} values"),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a grid filled with uniform random values in `[0, 1)`.
    ///
    /// See [`DenseGrid::fill_uniform_random`] for the seeding rules.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    #[must_use]
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut grid = Self::zeros(rows, cols);
        grid.fill_uniform_random(seed);
        grid
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the grid has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying row-major data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns one row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx >= rows`.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> &[f64] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        self.data[row * self.cols + col] = value;
    }

    /// Reads the element at a zero-based coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if either coordinate is negative
    /// or past the last row/column.
    pub fn at(&self, row: isize, col: isize) -> Result<f64> {
        let idx = self.offset(row, col)?;
        Ok(self.data[idx])
    }

    /// Writes the element at a zero-based coordinate.
    ///
    /// # Errors
    ///
    /// Same bounds rules as [`DenseGrid::at`].
    pub fn set_at(&mut self, row: isize, col: isize, value: f64) -> Result<()> {
        let idx = self.offset(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    fn offset(&self, row: isize, col: isize) -> Result<usize> {
        let out_of_range = || GridError::index_out_of_range(row as i128, col as i128, self.shape());
        let r = usize::try_from(row).map_err(|_| out_of_range())?;
        let c = usize::try_from(col).map_err(|_| out_of_range())?;
        if r >= self.rows || c >= self.cols {
            return Err(out_of_range());
        }
        Ok(r * self.cols + c)
    }

    /// Changes the shape, discarding all values.
    ///
    /// The data buffer is rebuilt zero-filled; no element survives a resize.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if `rows * cols` overflows.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        let len = checked_len(rows, cols)?;
        self.data = vec![0.0; len];
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Overwrites every element with an independent draw from `U[0, 1)`.
    ///
    /// With `Some(seed)` the sequence is reproducible across runs; with `None`
    /// the thread-local generator is used.
    pub fn fill_uniform_random(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.fill_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.fill_with_rng(&mut rand::thread_rng()),
        }
    }

    /// Overwrites every element with draws from `U[0, 1)` using `rng`.
    pub fn fill_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for value in &mut self.data {
            *value = rng.gen::<f64>();
        }
    }

    /// Coordinates where `op(self[i], other[i])` holds, in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the shapes differ.
    pub fn compare_elementwise(&self, other: &Self, op: CmpOp) -> Result<IndexSet> {
        if self.shape() != other.shape() {
            return Err(GridError::dimension_mismatch(self.shape(), other.shape()));
        }
        let rhs = &other.data;
        let matches = self.scan(|i, lhs| op.apply(lhs, rhs[i]));
        debug!(
            "compare_elementwise {op}: {} of {} cells matched",
            matches.len(),
            self.len()
        );
        Ok(matches)
    }

    /// Coordinates where `op(self[i], threshold)` holds, in row-major order.
    ///
    /// `limit` caps the result: [`SelectMode::First`] keeps the head of the
    /// match sequence, [`SelectMode::Last`] keeps the tail.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if `limit` is `Some(0)`.
    pub fn compare_to_scalar(
        &self,
        threshold: f64,
        op: CmpOp,
        limit: Option<usize>,
        mode: SelectMode,
    ) -> Result<IndexSet> {
        if limit == Some(0) {
            warn!("compare_to_scalar rejected limit 0");
            return Err(GridError::invalid_argument("limit", 0, "a positive integer"));
        }

        let mut matches = self.scan(|_, value| op.apply(value, threshold));
        let total = matches.len();
        if let Some(limit) = limit {
            match mode {
                SelectMode::First => matches.keep_first(limit),
                SelectMode::Last => matches.keep_last(limit),
            }
        }
        debug!(
            "compare_to_scalar {op} {threshold}: {total} matched, kept {} ({mode})",
            matches.len()
        );
        Ok(matches)
    }

    #[cfg(not(feature = "parallel"))]
    fn scan<F>(&self, pred: F) -> IndexSet
    where
        F: Fn(usize, f64) -> bool + Sync,
    {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(|&(i, &value)| pred(i, value))
            .map(|(i, _)| -> Coord { (i / cols, i % cols) })
            .collect()
    }

    // Rows are scanned independently and concatenated in row order, which
    // reproduces the sequential row-major result.
    #[cfg(feature = "parallel")]
    fn scan<F>(&self, pred: F) -> IndexSet
    where
        F: Fn(usize, f64) -> bool + Sync,
    {
        use rayon::prelude::*;

        if self.data.is_empty() {
            return IndexSet::new();
        }
        let cols = self.cols;
        let per_row: Vec<Vec<Coord>> = self
            .data
            .par_chunks(cols)
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(c, &value)| pred(r * cols + c, value))
                    .map(|(c, _)| (r, c))
                    .collect()
            })
            .collect();
        per_row.into_iter().flatten().collect()
    }

    /// Writes `value` at every coordinate of `indices`, in set order.
    ///
    /// All coordinates are bounds-checked before the first write, so a failed
    /// call leaves the grid untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] for the first coordinate outside
    /// the grid.
    pub fn assign_at_indices(&mut self, indices: &IndexSet, value: f64) -> Result<()> {
        if let Some(&(r, c)) = indices
            .iter()
            .find(|&&(r, c)| r >= self.rows || c >= self.cols)
        {
            warn!("assign_at_indices: ({r}, {c}) outside {}x{}", self.rows, self.cols);
            return Err(GridError::index_out_of_range(r as i128, c as i128, self.shape()));
        }

        for &(r, c) in indices {
            trace!("assign ({r}, {c}) = {value}");
            self.data[r * self.cols + c] = value;
        }
        debug!("assign_at_indices: wrote {value} to {} cells", indices.len());
        Ok(())
    }

    /// Sets every coordinate of `indices` to 1.0.
    ///
    /// # Errors
    ///
    /// Same as [`DenseGrid::assign_at_indices`].
    pub fn fill_ones_at(&mut self, indices: &IndexSet) -> Result<()> {
        self.assign_at_indices(indices, 1.0)
    }

    /// Human-readable rendering: one line per row, fixed-width values.
    ///
    /// Not a machine-parseable format.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DenseGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                f.write_str("\n")?;
            }
            for (c, value) in self.row(r).iter().enumerate() {
                if c > 0 {
                    f.write_str(RENDER_DELIMITER)?;
                }
                write!(f, "{value:>RENDER_WIDTH$.RENDER_PRECISION$}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_grid_contract.rs"]
mod tests_grid_contract;
