//! Board model: clipped cells on a fixed square grid.
//!
//! - `Cell`: signed stability in `[-5, 5]`; the sign is the owner
//! - `Board`: `size × size` cells, coordinate validation, region analysis
//! - `Region`: a 4-connected set of same-owner cells

mod cell;
mod grid;

pub use cell::{Cell, MAX_STABILITY, MIN_STABILITY};
pub use grid::{Board, Region};
