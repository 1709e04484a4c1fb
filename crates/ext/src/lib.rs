//! fibext: host binding for the naive Fibonacci extension
//!
//! The computation lives in `fibext-core`; this crate is everything a host
//! runtime needs to call it:
//!
//! - `convert`: host numeric values to and from a native `int`
//! - `error`: thread-local error slot for C callers
//! - `ffi`: C ABI exports
//! - `config`: the names the binding registers under (TOML)
//! - `registry`: registration against any [`HostRuntime`]
//! - `facade`: `Fibonacci::nth_fibonacci` for Rust callers
//! - `ruby`: the `Init_fibonacci` entry point (feature `ruby`)

/// Crate version; Ruby sees it as `Extension::Fibonacci::VERSION`, C hosts
/// through `fibext_version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod convert;
pub mod error;
pub mod facade;
pub mod ffi;
pub mod registry;

#[cfg(feature = "ruby")]
pub mod ruby;

pub use config::{ConfigError, ExtensionConfig};
pub use convert::{ConversionError, HostValue, int_from_host, int_to_host};
pub use facade::Fibonacci;
pub use registry::{HostRuntime, NTH_FIBONACCI, NativeMethod, Registration, register};

// Error handling
pub use error::{
    clear_runtime_error, fibext_clear_error as clear_error, fibext_get_error as get_error,
    fibext_has_error as has_error, fibext_take_error as take_error, has_runtime_error,
    set_runtime_error, take_runtime_error,
};

// Extension entry points (exported for C hosts)
pub use ffi::{
    fibext_max_exact_index as max_exact_index,
    fibext_version as version, fibext_nth_fibonacci as nth_fibonacci,
    fibext_nth_fibonacci_f64 as nth_fibonacci_f64,
    fibext_nth_fibonacci_long as nth_fibonacci_long,
};
