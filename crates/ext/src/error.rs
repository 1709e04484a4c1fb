//! Runtime error slot for C callers
//!
//! C hosts cannot receive a Rust `Result`, so exported functions that can
//! fail record a message here and return a neutral value instead:
//! ```ignore
//! let n = fibext_nth_fibonacci_long(1 << 40);
//! if fibext_has_error() {
//!     let msg = fibext_take_error();
//!     // copy msg before the next error call...
//! }
//! ```
//!
//! State is per thread, so callers on different threads never see each
//! other's errors.

use std::cell::RefCell;
use std::ffi::{CString, c_char};
use std::ptr;

thread_local! {
    /// Last error message recorded on this thread
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };

    /// Owner of the last C string handed out, keeps the pointer alive
    static ERROR_CSTRING: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Record an error message, replacing any pending one
pub fn set_runtime_error(msg: impl Into<String>) {
    // A new message invalidates any pointer handed out for the old one
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg.into()));
}

/// Take (and clear) the pending error message
pub fn take_runtime_error() -> Option<String> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

pub fn has_runtime_error() -> bool {
    LAST_ERROR.with(|e| e.borrow().is_some())
}

pub fn clear_runtime_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
}

/// Store `msg` as a C string owned by this thread and return its pointer
///
/// Interior NUL bytes become '?' so the whole message survives.
fn cache_c_string(msg: &str) -> *const c_char {
    let safe_msg = msg.replace('\0', "?");
    let cstring = CString::new(safe_msg).unwrap_or_default();
    ERROR_CSTRING.with(|cs| {
        let ptr = cstring.as_ptr();
        *cs.borrow_mut() = Some(cstring);
        ptr
    })
}

/// Check for a pending error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn fibext_has_error() -> bool {
    has_runtime_error()
}

/// Get the pending error without clearing it (FFI-safe)
///
/// Returns null if no error is pending.
///
/// # Pointer Lifetime
/// Valid until the next `fibext_*_error` call or the next failing call on
/// this thread. Copy it immediately.
#[unsafe(no_mangle)]
pub extern "C" fn fibext_get_error() -> *const c_char {
    let msg = LAST_ERROR.with(|e| e.borrow().clone());
    match msg {
        Some(msg) => cache_c_string(&msg),
        None => ptr::null(),
    }
}

/// Take (and clear) the pending error (FFI-safe)
///
/// Returns null if no error is pending. Same pointer lifetime rules as
/// [`fibext_get_error`].
#[unsafe(no_mangle)]
pub extern "C" fn fibext_take_error() -> *const c_char {
    match take_runtime_error() {
        Some(msg) => cache_c_string(&msg),
        None => ptr::null(),
    }
}

/// Clear any pending error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn fibext_clear_error() {
    clear_runtime_error();
}
