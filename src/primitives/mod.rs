//! Core grid primitives (DenseGrid, IndexSet, comparison selectors).
//!
//! Queries scan a grid once in row-major order and return explicit
//! coordinate lists; mutations consume those lists.

mod compare;
mod grid;
mod index_set;

pub use compare::{CmpOp, SelectMode};
pub use grid::DenseGrid;
pub use index_set::{Coord, IndexSet};
