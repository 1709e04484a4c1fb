//! Rust-side entry point mirroring the host API
//!
//! Host code calls `Extension::Fibonacci.nth_fibonacci(n)`; Rust code that
//! wants the same entry point without going through FFI uses this.

use crate::convert::{ConversionError, HostValue};
use crate::registry::call_nth_fibonacci;

/// Delegates to the extension's implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct Fibonacci;

impl Fibonacci {
    pub fn nth_fibonacci(n: i32) -> i32 {
        fibext_core::nth_fibonacci(n)
    }

    /// Same call with host-style argument conversion
    pub fn call(value: HostValue) -> Result<HostValue, ConversionError> {
        call_nth_fibonacci(value)
    }
}
