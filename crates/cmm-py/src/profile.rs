//! Profile functions.

use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::error::{NativeResultExt, value_error};
use crate::handle::Profile;

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(open_profile_from_mem, m)?)?;
    m.add_function(wrap_pyfunction!(close_profile, m)?)?;
    m.add_function(wrap_pyfunction!(create_srgb_profile, m)?)?;
    m.add_function(wrap_pyfunction!(create_standard_profile, m)?)?;
    m.add_function(wrap_pyfunction!(get_device_class, m)?)?;
    m.add_function(wrap_pyfunction!(get_color_space, m)?)?;
    m.add_function(wrap_pyfunction!(get_profile_description, m)?)?;
    m.add_function(wrap_pyfunction!(get_available_b2an_list, m)?)?;
    m.add_function(wrap_pyfunction!(dump_profile, m)?)?;
    Ok(())
}

/// Opens an ICC profile from memory.
///
/// Returns None if lcms rejects the data; the reason goes to the log
/// error handler.
#[pyfunction]
#[pyo3(signature = (profile_content))]
fn open_profile_from_mem(profile_content: &[u8]) -> PyResult<Option<Profile>> {
    Ok(cmm_core::Profile::from_icc(profile_content).or_none()?.map(Profile::new))
}

/// Closes a profile. Closing twice is a no-op.
#[pyfunction]
#[pyo3(signature = (hprofile))]
fn close_profile(mut hprofile: PyRefMut<'_, Profile>) {
    hprofile.close();
}

/// Creates the built-in sRGB profile.
#[pyfunction]
fn create_srgb_profile() -> PyResult<Option<Profile>> {
    Ok(cmm_core::Profile::srgb().or_none()?.map(Profile::new))
}

/// Creates a standard RGB profile by name.
///
/// Names: srgb, linear-srgb, adobe-rgb, display-p3, dci-p3, rec709,
/// rec2020, aces-ap0, aces-ap1.
#[pyfunction]
#[pyo3(signature = (name))]
fn create_standard_profile(name: &str) -> PyResult<Option<Profile>> {
    let standard = name.parse::<cmm_core::StandardProfile>().map_err(value_error)?;
    Ok(standard.to_profile().or_none()?.map(Profile::new))
}

/// Device class signature, e.g. `cmsSigOutputClass`.
#[pyfunction]
#[pyo3(signature = (hprofile))]
fn get_device_class(hprofile: PyRef<'_, Profile>) -> PyResult<u32> {
    Ok(hprofile.get().map_err(value_error)?.device_class())
}

/// Color space signature, e.g. `cmsSigRgbData`.
#[pyfunction]
#[pyo3(signature = (hprofile))]
fn get_color_space(hprofile: PyRef<'_, Profile>) -> PyResult<u32> {
    Ok(hprofile.get().map_err(value_error)?.color_space())
}

/// Profile description, eng/USA only, printable ASCII only.
///
/// Returns None if the profile has no description.
#[pyfunction]
#[pyo3(signature = (hprofile))]
fn get_profile_description(hprofile: PyRef<'_, Profile>) -> PyResult<Option<String>> {
    Ok(hprofile.get().map_err(value_error)?.description())
}

/// Usable BToA tags: 'B2A1' first, then 'B2A0' and 'B2A2' unless they are
/// linked to 'B2A1'.
#[pyfunction]
#[pyo3(signature = (hprofile))]
fn get_available_b2an_list(hprofile: PyRef<'_, Profile>) -> PyResult<Vec<&'static str>> {
    let profile = hprofile.get().map_err(value_error)?;
    Ok(profile.available_b2a_tags().into_iter().map(|tag| tag.name()).collect())
}

/// Serialises a profile to ICC bytes.
#[pyfunction]
#[pyo3(signature = (hprofile))]
fn dump_profile<'py>(py: Python<'py>, hprofile: PyRef<'_, Profile>) -> PyResult<Option<Bound<'py, PyBytes>>> {
    let profile = hprofile.get().map_err(value_error)?;
    Ok(profile.to_icc().or_none()?.map(|data| PyBytes::new(py, &data)))
}
