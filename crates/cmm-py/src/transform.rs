//! Transform functions and numpy buffer application.

use cmm_core::{Format, Intent, Sample};
use numpy::{AllowTypeChange, Element, PyArrayDyn, PyArrayLikeDyn, PyArrayMethods, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::{NativeResultExt, borrow_error, contiguous, value_error};
use crate::handle::{Profile, Transform};

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_transform_formatter, m)?)?;
    m.add_function(wrap_pyfunction!(create_transform, m)?)?;
    m.add_function(wrap_pyfunction!(create_proofing_transform, m)?)?;
    m.add_function(wrap_pyfunction!(delete_transform, m)?)?;
    m.add_function(wrap_pyfunction!(set_alarm_codes, m)?)?;
    m.add_function(wrap_pyfunction!(do_transform_8_8, m)?)?;
    m.add_function(wrap_pyfunction!(do_transform_8_16, m)?)?;
    m.add_function(wrap_pyfunction!(do_transform_16_8, m)?)?;
    m.add_function(wrap_pyfunction!(do_transform_16_16, m)?)?;
    Ok(())
}

/// Packs an lcms pixel format.
///
/// # Arguments
/// * `is_float` - 0 or 1
/// * `pixel_type` - one of the `PT_*` constants
/// * `n_ch` - color channels, alpha excluded
/// * `n_byte` - bytes per channel (uint16 is 2)
/// * `swap` - 1 for BGR order
/// * `extra` - 1 if there is an alpha channel
#[pyfunction]
#[pyo3(signature = (is_float, pixel_type, n_ch, n_byte, swap, extra))]
fn get_transform_formatter(
    is_float: u32,
    pixel_type: u32,
    n_ch: u32,
    n_byte: u32,
    swap: u32,
    extra: u32,
) -> PyResult<u32> {
    let format = Format::new(
        flag("is_float", is_float)?,
        pixel_type,
        n_ch,
        n_byte,
        flag("swap", swap)?,
        extra,
    )
    .map_err(value_error)?;
    Ok(format.raw())
}

fn flag(name: &str, value: u32) -> PyResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(PyValueError::new_err(format!("{name} must be 0 or 1, got {value}"))),
    }
}

fn intent(raw: u32) -> PyResult<Intent> {
    Intent::from_raw(raw).map_err(value_error)
}

/// Creates a transform. Returns None if lcms cannot build it.
#[pyfunction]
#[pyo3(signature = (src_hp, src_format, trg_hp, trg_format, intent, flags))]
fn create_transform(
    src_hp: PyRef<'_, Profile>,
    src_format: u32,
    trg_hp: PyRef<'_, Profile>,
    trg_format: u32,
    intent: u32,
    flags: u32,
) -> PyResult<Option<Transform>> {
    let transform = cmm_core::Transform::new(
        src_hp.get().map_err(value_error)?,
        Format::from_raw(src_format),
        trg_hp.get().map_err(value_error)?,
        Format::from_raw(trg_format),
        self::intent(intent)?,
        flags,
    );
    Ok(transform.or_none()?.map(Transform::new))
}

/// Creates a soft-proofing transform. `cmsFLAGS_SOFTPROOFING` is always set.
///
/// Add `cmsFLAGS_GAMUTCHECK` to paint out-of-gamut colors with the alarm
/// codes from `set_alarm_codes`.
#[pyfunction]
#[pyo3(signature = (src_hp, src_format, trg_hp, trg_format, proof_hp, intent, proof_intent, flags))]
#[allow(clippy::too_many_arguments)]
fn create_proofing_transform(
    src_hp: PyRef<'_, Profile>,
    src_format: u32,
    trg_hp: PyRef<'_, Profile>,
    trg_format: u32,
    proof_hp: PyRef<'_, Profile>,
    intent: u32,
    proof_intent: u32,
    flags: u32,
) -> PyResult<Option<Transform>> {
    let transform = cmm_core::Transform::new_proofing(
        src_hp.get().map_err(value_error)?,
        Format::from_raw(src_format),
        trg_hp.get().map_err(value_error)?,
        Format::from_raw(trg_format),
        proof_hp.get().map_err(value_error)?,
        self::intent(intent)?,
        self::intent(proof_intent)?,
        flags,
    );
    Ok(transform.or_none()?.map(Transform::new))
}

/// Deletes a transform. Deleting twice is a no-op.
#[pyfunction]
#[pyo3(signature = (htransform))]
fn delete_transform(mut htransform: PyRefMut<'_, Transform>) {
    htransform.delete();
}

/// Sets the 16 uint16 codes painted over out-of-gamut pixels.
#[pyfunction]
#[pyo3(signature = (alarm_codes))]
fn set_alarm_codes(alarm_codes: PyArrayLikeDyn<'_, u16, AllowTypeChange>) -> PyResult<bool> {
    if alarm_codes.ndim() != 1 {
        return Err(PyValueError::new_err(format!(
            "alarm_codes must be 1-dimensional, got {} dimensions",
            alarm_codes.ndim()
        )));
    }
    let codes: Vec<u16> = alarm_codes.as_array().iter().copied().collect();
    cmm_core::set_alarm_codes(&codes).map_err(value_error)?;
    Ok(true)
}

/// Runs `htransform` from `input_buf` into `output_buf`.
///
/// Passing the same array twice transforms it in place.
fn do_transform<I, O>(
    htransform: &Transform,
    input_buf: &Bound<'_, PyArrayDyn<I>>,
    output_buf: &Bound<'_, PyArrayDyn<O>>,
    num_pixel: usize,
) -> PyResult<()>
where
    I: Element + Sample,
    O: Element + Sample,
{
    let transform = htransform.get().map_err(value_error)?;
    let mut output_guard = output_buf.try_readwrite().map_err(|err| borrow_error("output_buf", err))?;
    let output = output_guard.as_slice_mut().map_err(|_| contiguous("output_buf"))?;
    if input_buf.as_ptr() == output_buf.as_ptr() {
        return transform.apply_in_place(output, num_pixel).map_err(value_error);
    }

    let input_guard = input_buf.try_readonly().map_err(|err| borrow_error("input_buf", err))?;
    let input = input_guard.as_slice().map_err(|_| contiguous("input_buf"))?;
    transform.apply(input, output, num_pixel).map_err(value_error)
}

/// Transforms uint8 pixels into uint8 pixels.
#[pyfunction]
#[pyo3(signature = (htransform, input_buf, output_buf, num_pixel))]
fn do_transform_8_8(
    htransform: PyRef<'_, Transform>,
    input_buf: &Bound<'_, PyArrayDyn<u8>>,
    output_buf: &Bound<'_, PyArrayDyn<u8>>,
    num_pixel: usize,
) -> PyResult<()> {
    do_transform(&htransform, input_buf, output_buf, num_pixel)
}

/// Transforms uint8 pixels into uint16 pixels.
#[pyfunction]
#[pyo3(signature = (htransform, input_buf, output_buf, num_pixel))]
fn do_transform_8_16(
    htransform: PyRef<'_, Transform>,
    input_buf: &Bound<'_, PyArrayDyn<u8>>,
    output_buf: &Bound<'_, PyArrayDyn<u16>>,
    num_pixel: usize,
) -> PyResult<()> {
    do_transform(&htransform, input_buf, output_buf, num_pixel)
}

/// Transforms uint16 pixels into uint8 pixels.
#[pyfunction]
#[pyo3(signature = (htransform, input_buf, output_buf, num_pixel))]
fn do_transform_16_8(
    htransform: PyRef<'_, Transform>,
    input_buf: &Bound<'_, PyArrayDyn<u16>>,
    output_buf: &Bound<'_, PyArrayDyn<u8>>,
    num_pixel: usize,
) -> PyResult<()> {
    do_transform(&htransform, input_buf, output_buf, num_pixel)
}

/// Transforms uint16 pixels into uint16 pixels.
#[pyfunction]
#[pyo3(signature = (htransform, input_buf, output_buf, num_pixel))]
fn do_transform_16_16(
    htransform: PyRef<'_, Transform>,
    input_buf: &Bound<'_, PyArrayDyn<u16>>,
    output_buf: &Bound<'_, PyArrayDyn<u16>>,
    num_pixel: usize,
) -> PyResult<()> {
    do_transform(&htransform, input_buf, output_buf, num_pixel)
}
