//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use gridmask::prelude::*;
//! ```

pub use crate::demo::{DemoConfig, DemoReport};
pub use crate::error::{GridError, Result};
pub use crate::primitives::{CmpOp, Coord, DenseGrid, IndexSet, SelectMode};
