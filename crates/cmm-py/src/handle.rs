//! Python handle objects.
//!
//! Each wraps a `cmm-core` value that is released on `close_profile` /
//! `delete_transform` or when the Python object is collected, whichever
//! comes first.

use cmm_core::{CmmError, CmmResult};
use pyo3::prelude::*;

/// Opaque profile handle.
///
/// Returned by `open_profile_from_mem`, `create_srgb_profile`,
/// `create_standard_profile` and `create_partial_profile`.
#[pyclass(module = "cmm", unsendable)]
pub struct Profile {
    inner: Option<cmm_core::Profile>,
}

impl Profile {
    pub(crate) fn new(inner: cmm_core::Profile) -> Self {
        Self { inner: Some(inner) }
    }

    pub(crate) fn get(&self) -> CmmResult<&cmm_core::Profile> {
        self.inner.as_ref().ok_or(CmmError::Closed("profile"))
    }

    pub(crate) fn get_mut(&mut self) -> CmmResult<&mut cmm_core::Profile> {
        self.inner.as_mut().ok_or(CmmError::Closed("profile"))
    }

    pub(crate) fn close(&mut self) {
        if let Some(profile) = self.inner.take() {
            profile.close();
        }
    }
}

#[pymethods]
impl Profile {
    /// True once the handle was closed.
    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_none()
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            Some(profile) => format!(
                "Profile(class='{}', space='{}')",
                cmm_core::consts::fourcc(profile.device_class()),
                cmm_core::consts::fourcc(profile.color_space())
            ),
            None => "Profile(closed)".to_string(),
        }
    }
}

/// Opaque transform handle.
///
/// Returned by `create_transform` and `create_proofing_transform`.
#[pyclass(module = "cmm", unsendable)]
pub struct Transform {
    inner: Option<cmm_core::Transform>,
}

impl Transform {
    pub(crate) fn new(inner: cmm_core::Transform) -> Self {
        Self { inner: Some(inner) }
    }

    pub(crate) fn get(&self) -> CmmResult<&cmm_core::Transform> {
        self.inner.as_ref().ok_or(CmmError::Closed("transform"))
    }

    pub(crate) fn delete(&mut self) {
        if let Some(transform) = self.inner.take() {
            transform.delete();
        }
    }
}

#[pymethods]
impl Transform {
    /// True once the handle was deleted.
    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_none()
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            Some(t) => format!(
                "Transform(input=0x{:x}, output=0x{:x})",
                t.input_format().raw(),
                t.output_format().raw()
            ),
            None => "Transform(deleted)".to_string(),
        }
    }
}
