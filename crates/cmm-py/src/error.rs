//! Mapping of binding errors onto Python results.
//!
//! Argument errors raise `ValueError`. lcms failures were already reported
//! through the log error handler, so they come back as `None` or `False`.

use cmm_core::{CmmError, CmmResult};
use numpy::BorrowError;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub(crate) fn value_error(err: CmmError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// An array that is read-only or already borrowed elsewhere in the call.
pub(crate) fn borrow_error(name: &str, err: BorrowError) -> PyErr {
    value_error(CmmError::InvalidArgument(format!("{name} cannot be borrowed: {err}")))
}

pub(crate) fn contiguous(name: &str) -> PyErr {
    value_error(CmmError::InvalidArgument(format!("{name} must be C-contiguous")))
}

pub(crate) trait NativeResultExt<T> {
    /// `Ok(None)` for lcms failures, `ValueError` for argument errors.
    fn or_none(self) -> PyResult<Option<T>>;
}

impl<T> NativeResultExt<T> for CmmResult<T> {
    fn or_none(self) -> PyResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_native() => Ok(None),
            Err(err) => Err(value_error(err)),
        }
    }
}

pub(crate) trait NativeStatusExt {
    /// `Ok(false)` for lcms failures, `ValueError` for argument errors.
    fn or_false(self) -> PyResult<bool>;
}

impl NativeStatusExt for CmmResult<()> {
    fn or_false(self) -> PyResult<bool> {
        self.or_none().map(|done| done.is_some())
    }
}
