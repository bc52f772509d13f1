//! Profile authoring functions.

use cmm_core::{CmmError, LUT16_INPUT_CHANNELS, Lut16, LutTag};
use numpy::ndarray::Axis;
use numpy::{
    AllowTypeChange, PyArrayDyn, PyArrayLikeDyn, PyArrayMethods, PyReadonlyArrayDyn, PyUntypedArrayMethods,
};
use pyo3::prelude::*;

use crate::error::{NativeResultExt, NativeStatusExt, borrow_error, contiguous, value_error};
use crate::handle::Profile;

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(create_partial_profile, m)?)?;
    m.add_function(wrap_pyfunction!(add_lut16, m)?)?;
    m.add_function(wrap_pyfunction!(link_tag, m)?)?;
    m.add_function(wrap_pyfunction!(eval_lut16, m)?)?;
    m.add_function(wrap_pyfunction!(eval_pre_table, m)?)?;
    Ok(())
}

fn invalid(msg: String) -> PyErr {
    value_error(CmmError::InvalidArgument(msg))
}

fn parse_tag(tag: &str) -> PyResult<LutTag> {
    tag.parse().map_err(value_error)
}

/// Checks a `(rows, columns)` table and returns its row count.
fn table_rows(name: &str, shape: &[usize], columns: usize) -> PyResult<usize> {
    match shape {
        [rows, cols] if *cols == columns => Ok(*rows),
        _ => Err(invalid(format!("{name} must have shape (n, {columns}), got {shape:?}"))),
    }
}

/// Splits a `(entries, channels)` table into one curve per channel.
fn columns(table: &PyReadonlyArrayDyn<'_, u16>, channels: usize) -> Vec<Vec<u16>> {
    let view = table.as_array();
    (0..channels).map(|c| view.index_axis(Axis(1), c).iter().copied().collect()).collect()
}

/// Creates a partial v2.4 output profile (RGB data, Lab PCS, creator 'ZYGO').
///
/// The profile must receive its lut16 tags before `dump_profile`.
///
/// # Arguments
/// * `desc` - description text
/// * `cprt` - copyright text
/// * `is_glossy` - glossy rather than matte media
/// * `wtpt` - XYZ of the media white point, shape (3,)
#[pyfunction]
#[pyo3(signature = (desc, cprt, is_glossy, wtpt))]
fn create_partial_profile(
    desc: &str,
    cprt: &str,
    is_glossy: bool,
    wtpt: PyArrayLikeDyn<'_, f64, AllowTypeChange>,
) -> PyResult<Option<Profile>> {
    let white: Vec<f64> = wtpt.as_array().iter().copied().collect();
    let white_point: [f64; 3] = match (wtpt.ndim(), white.as_slice()) {
        (1, &[x, y, z]) => [x, y, z],
        _ => return Err(invalid(format!("wtpt must have shape (3,), got {:?}", wtpt.shape()))),
    };
    let profile = cmm_core::Profile::partial(desc, cprt, is_glossy, white_point);
    Ok(profile.or_none()?.map(Profile::new))
}

/// Writes a lut16 into `tag` ('A2B0'..'A2B2', 'B2A0'..'B2A2' or 'gamt').
///
/// # Arguments
/// * `n_out_ch` - output channels
/// * `clut` - shape (g, g, g, n_out_ch)
/// * `pre_table` - shape (n, 3)
/// * `post_table` - shape (m, n_out_ch)
#[pyfunction]
#[pyo3(signature = (hprofile, tag, n_out_ch, clut, pre_table, post_table))]
fn add_lut16(
    mut hprofile: PyRefMut<'_, Profile>,
    tag: &str,
    n_out_ch: usize,
    clut: PyArrayLikeDyn<'_, u16, AllowTypeChange>,
    pre_table: PyArrayLikeDyn<'_, u16, AllowTypeChange>,
    post_table: PyArrayLikeDyn<'_, u16, AllowTypeChange>,
) -> PyResult<bool> {
    let tag = parse_tag(tag)?;
    let grid = match clut.shape() {
        [a, b, c, out] if a == b && b == c && *out == n_out_ch => *a,
        shape => {
            return Err(invalid(format!("clut must have shape (g, g, g, {n_out_ch}), got {shape:?}")));
        }
    };
    table_rows("pre_table", pre_table.shape(), LUT16_INPUT_CHANNELS)?;
    table_rows("post_table", post_table.shape(), n_out_ch)?;

    let samples: Vec<u16> = clut.as_array().iter().copied().collect();
    let pre = columns(&pre_table, LUT16_INPUT_CHANNELS);
    let post = columns(&post_table, n_out_ch);
    let lut = Lut16::new(grid, n_out_ch, samples, pre, post).map_err(value_error)?;
    hprofile.get_mut().map_err(value_error)?.write_lut16(tag, &lut).or_false()
}

/// Makes `link_tag` share the data of `dest_tag`.
#[pyfunction]
#[pyo3(signature = (hprofile, link_tag, dest_tag))]
fn link_tag(mut hprofile: PyRefMut<'_, Profile>, link_tag: &str, dest_tag: &str) -> PyResult<bool> {
    let (link, dest) = (parse_tag(link_tag)?, parse_tag(dest_tag)?);
    hprofile.get_mut().map_err(value_error)?.link_tag(link, dest).or_false()
}

/// Evaluates the lut in `tag` for each row of `input_array` into
/// `output_array`.
///
/// `input_array` has shape (n, in) and `output_array` shape (n, out).
/// Returns False if the tag holds no usable pipeline.
#[pyfunction]
#[pyo3(signature = (hprofile, tag, input_array, output_array))]
fn eval_lut16(
    hprofile: PyRef<'_, Profile>,
    tag: &str,
    input_array: PyArrayLikeDyn<'_, u16, AllowTypeChange>,
    output_array: &Bound<'_, PyArrayDyn<u16>>,
) -> PyResult<bool> {
    let tag = parse_tag(tag)?;
    let profile = hprofile.get().map_err(value_error)?;
    let Some((in_ch, out_ch)) = profile.lut_channels(tag).or_none()? else {
        return Ok(false);
    };
    with_rows(&input_array, in_ch, output_array, out_ch, |input, output| {
        profile.eval_lut16(tag, input, output).or_false()
    })
}

/// Evaluates only the pre-table curves of `tag`.
///
/// Both arrays have shape (n, channels of the pre-table). Returns False if
/// the tag does not start with curves.
#[pyfunction]
#[pyo3(signature = (hprofile, tag, input_array, output_array))]
fn eval_pre_table(
    hprofile: PyRef<'_, Profile>,
    tag: &str,
    input_array: PyArrayLikeDyn<'_, u16, AllowTypeChange>,
    output_array: &Bound<'_, PyArrayDyn<u16>>,
) -> PyResult<bool> {
    let tag = parse_tag(tag)?;
    let profile = hprofile.get().map_err(value_error)?;
    let Some(channels) = profile.pre_table_channels(tag).or_none()? else {
        return Ok(false);
    };
    with_rows(&input_array, channels, output_array, channels, |input, output| {
        profile.eval_pre_table(tag, input, output).or_false()
    })
}

/// Checks `(n, in_ch)` and `(n, out_ch)` shapes and hands both arrays to `eval`
/// as contiguous slices.
fn with_rows(
    input_array: &PyReadonlyArrayDyn<'_, u16>,
    in_ch: usize,
    output_array: &Bound<'_, PyArrayDyn<u16>>,
    out_ch: usize,
    eval: impl FnOnce(&[u16], &mut [u16]) -> PyResult<bool>,
) -> PyResult<bool> {
    let rows = table_rows("input_array", input_array.shape(), in_ch)?;
    if table_rows("output_array", output_array.shape(), out_ch)? != rows {
        return Err(invalid("input_array and output_array row counts differ".to_string()));
    }

    let mut output_guard = output_array
        .try_readwrite()
        .map_err(|err| borrow_error("output_array", err))?;
    let input = input_array.as_slice().map_err(|_| contiguous("input_array"))?;
    let output = output_guard.as_slice_mut().map_err(|_| contiguous("output_array"))?;
    eval(input, output)
}
