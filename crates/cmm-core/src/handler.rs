//! Routing of lcms error messages.
//!
//! lcms reports errors through one process-wide callback. The binding installs
//! a trampoline that logs every message through `tracing` and forwards it to
//! the handler registered with [`set_log_error_handler`], if any.

use lcms2_sys as ffi;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::{Arc, Once, RwLock};

/// Callback receiving an lcms error code and message.
pub type ErrorHandler = Arc<dyn Fn(u32, &str) + Send + Sync>;

static HANDLER: RwLock<Option<ErrorHandler>> = RwLock::new(None);
static INSTALL: Once = Once::new();

unsafe extern "C" fn log_error_trampoline(
    _context: ffi::Context,
    error_code: u32,
    text: *const c_char,
) {
    let message = if text.is_null() {
        String::new()
    } else {
        // SAFETY: lcms passes a NUL-terminated buffer valid for this call.
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    };
    tracing::warn!(code = error_code, %message, "lcms error");

    // Clone out of the lock so the handler may re-register itself.
    let handler = match HANDLER.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    if let Some(handler) = handler {
        handler(error_code, &message);
    }
}

/// Makes sure lcms routes errors through the trampoline.
///
/// Called by every entry point that can reach lcms, so messages are logged
/// even when no handler was registered.
pub(crate) fn ensure_installed() {
    INSTALL.call_once(|| {
        // SAFETY: the trampoline is a plain `extern "C"` function with the
        // signature lcms expects and lives for the whole process.
        unsafe { ffi::cmsSetLogErrorHandler(Some(log_error_trampoline)) };
    });
}

/// Registers the handler that receives lcms error codes and messages.
///
/// Replaces any previously registered handler.
///
/// # Example
///
/// ```rust
/// use cmm_core::{set_log_error_handler, unset_log_error_handler};
///
/// set_log_error_handler(|code, msg| eprintln!("lcms error {code}: {msg}"));
/// unset_log_error_handler();
/// ```
pub fn set_log_error_handler<F>(handler: F)
where
    F: Fn(u32, &str) + Send + Sync + 'static,
{
    ensure_installed();
    let mut slot = HANDLER.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(Arc::new(handler));
}

/// Removes the registered handler. Errors are still logged.
pub fn unset_log_error_handler() {
    let mut slot = HANDLER.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// Returns true if a handler is registered.
pub fn has_log_error_handler() -> bool {
    HANDLER.read().map(|slot| slot.is_some()).unwrap_or(false)
}
