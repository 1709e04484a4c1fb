//! C ABI entry points
//!
//! These are what a native host links against. The `_long` and `_f64`
//! variants take the host's own numeric width and convert it the way the
//! host would; on failure they record a runtime error (see [`crate::error`])
//! and return 0.

use crate::convert::{HostValue, int_from_host};
use crate::error::set_runtime_error;
use fibext_core::{MAX_EXACT_INDEX, nth_fibonacci};
use std::ffi::c_char;
use tracing::warn;

/// n-th Fibonacci number for a native `int` index
///
/// Never fails. Wraps on overflow; `n <= 1` returns `n`.
#[unsafe(no_mangle)]
pub extern "C" fn fibext_nth_fibonacci(n: i32) -> i32 {
    nth_fibonacci(n)
}

/// n-th Fibonacci number for a host `long` index
///
/// # Error Handling
/// - Index outside the `int` range: sets runtime error and returns 0
#[unsafe(no_mangle)]
pub extern "C" fn fibext_nth_fibonacci_long(n: i64) -> i32 {
    call_converted(HostValue::Integer(n))
}

/// n-th Fibonacci number for a host float index (truncated toward zero)
///
/// # Error Handling
/// - NaN, infinite, or out-of-range index: sets runtime error and returns 0
#[unsafe(no_mangle)]
pub extern "C" fn fibext_nth_fibonacci_f64(n: f64) -> i32 {
    call_converted(HostValue::Float(n))
}

/// Largest index whose result is exact (not wrapped)
#[unsafe(no_mangle)]
pub extern "C" fn fibext_max_exact_index() -> i32 {
    MAX_EXACT_INDEX
}

/// Crate version as a static NUL-terminated string
///
/// The pointer is valid for the life of the process; never free it.
#[unsafe(no_mangle)]
pub extern "C" fn fibext_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}

fn call_converted(value: HostValue) -> i32 {
    match int_from_host(&value) {
        Ok(n) => nth_fibonacci(n),
        Err(e) => {
            warn!(?value, error = %e, "nth_fibonacci: argument conversion failed");
            set_runtime_error(format!("nth_fibonacci: {}", e));
            0
        }
    }
}
