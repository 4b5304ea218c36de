//! gridmask: dense row-major grids with threshold queries and masked assignment.
//!
//! A [`DenseGrid`] is scanned once per query and answers with an explicit
//! [`IndexSet`] of coordinates; masked updates consume that set.
//!
//! # Quick Start
//!
//! ```
//! use gridmask::prelude::*;
//!
//! let mut grid = DenseGrid::random(5, 5, Some(42));
//! let above = grid
//!     .compare_to_scalar(0.5, CmpOp::Gt, None, SelectMode::First)
//!     .unwrap();
//!
//! grid.assign_at_indices(&above, 1.0).unwrap();
//! assert!(grid.as_slice().iter().all(|&x| x <= 0.5 || x == 1.0));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: `DenseGrid`, `IndexSet`, comparison operators
//! - [`demo`]: the threshold-mask demonstration driver used by the binary
//! - [`error`]: error kinds shared by every operation

pub mod demo;
pub mod error;
pub mod prelude;
pub mod primitives;

pub use error::{GridError, Result};
pub use primitives::{CmpOp, Coord, DenseGrid, IndexSet, SelectMode};
