//! Python error handler registration.

use pyo3::prelude::*;

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(set_log_error_handler, m)?)?;
    m.add_function(wrap_pyfunction!(unset_log_error_handler, m)?)?;
    Ok(())
}

/// Sets the callable receiving lcms errors as `handler(code, message)`.
///
/// `code` is one of the `cmsERROR_*` constants. Exceptions raised by the
/// handler are printed and discarded.
#[pyfunction]
#[pyo3(signature = (handler))]
fn set_log_error_handler(handler: Bound<'_, PyAny>) -> PyResult<()> {
    if !handler.is_callable() {
        return Err(pyo3::exceptions::PyTypeError::new_err("handler must be callable"));
    }
    let handler: Py<PyAny> = handler.unbind();
    cmm_core::set_log_error_handler(move |code, message| {
        Python::with_gil(|py| {
            if let Err(err) = handler.call1(py, (code, message)) {
                err.print(py);
            }
        });
    });
    Ok(())
}

/// Removes the error handler set by `set_log_error_handler`.
#[pyfunction]
fn unset_log_error_handler() {
    cmm_core::unset_log_error_handler();
}
