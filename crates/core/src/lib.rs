//! fibext core: the n-th Fibonacci number, computed the slow way
//!
//! This crate is the computational half of the `fibext` native extension.
//! It has no dependencies and no state, so it can be linked into any host
//! binding or used directly.
//!
//! Key properties:
//! - Index and result are `i32`, the width of a host `int`
//! - Any `n <= 1` is returned unchanged, including negative indices
//! - Overflow wraps (two's complement), it never panics
//!
//! # Modules
//!
//! - `recursive`: the exported naive double recursion
//! - `iterative`: linear-time reference with identical semantics
//! - `bounds`: where `i32` stops holding exact Fibonacci values

pub mod bounds;
pub mod iterative;
pub mod recursive;

pub use bounds::{MAX_EXACT_INDEX, checked_nth_fibonacci, fits_exactly};
pub use iterative::nth_fibonacci_iterative;
pub use recursive::nth_fibonacci;
