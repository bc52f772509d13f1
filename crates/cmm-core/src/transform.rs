//! Transform handles and pixel buffer application.

use crate::consts::{self, MAX_CHANNELS};
use crate::handler::ensure_installed;
use crate::{CmmError, CmmResult, Format, Intent, Profile};
use lcms2_sys as ffi;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// Sample types a pixel buffer may be made of.
pub trait Sample: sealed::Sealed + Copy {}
impl Sample for u8 {}
impl Sample for u16 {}

/// An lcms transform handle together with its buffer formats.
///
/// # Example
///
/// ```rust
/// use cmm_core::{Format, Intent, Profile, Transform, consts::flags};
///
/// let srgb = Profile::srgb().unwrap();
/// let transform = Transform::new(
///     &srgb, Format::RGB_8,
///     &srgb, Format::RGB_8,
///     Intent::RelativeColorimetric,
///     flags::BLACKPOINTCOMPENSATION,
/// ).unwrap();
///
/// let input = [255u8, 128, 0];
/// let mut output = [0u8; 3];
/// transform.apply(&input, &mut output, 1).unwrap();
/// ```
pub struct Transform {
    handle: ffi::HTRANSFORM,
    input: Format,
    output: Format,
}

impl Transform {
    /// Creates a transform from `source` to `dest`.
    ///
    /// # Arguments
    ///
    /// * `source` - Source profile
    /// * `input` - Layout of the input buffers
    /// * `dest` - Destination profile
    /// * `output` - Layout of the output buffers
    /// * `intent` - Rendering intent
    /// * `flags` - Bitwise OR of [`crate::consts::flags`]
    ///
    /// # Errors
    ///
    /// Returns [`CmmError::TransformFailed`] when lcms cannot build the
    /// transform, e.g. because a format does not match its profile.
    pub fn new(
        source: &Profile,
        input: Format,
        dest: &Profile,
        output: Format,
        intent: Intent,
        flags: u32,
    ) -> CmmResult<Self> {
        ensure_installed();
        // SAFETY: both profile handles are live for the duration of the call;
        // lcms does not keep references to them afterwards.
        let handle = unsafe {
            ffi::cmsCreateTransform(
                source.handle(),
                ffi::PixelFormat(input.raw()),
                dest.handle(),
                ffi::PixelFormat(output.raw()),
                intent.into(),
                flags,
            )
        };
        Self::from_handle(handle, input, output, "cmsCreateTransform")
    }

    /// Creates a soft-proofing transform simulating `proof` on `dest`.
    ///
    /// [`consts::flags::SOFTPROOFING`] is always added to `flags`. Add
    /// [`consts::flags::GAMUTCHECK`] to paint out-of-gamut colors with the codes set
    /// through [`set_alarm_codes`].
    #[allow(clippy::too_many_arguments)]
    pub fn new_proofing(
        source: &Profile,
        input: Format,
        dest: &Profile,
        output: Format,
        proof: &Profile,
        intent: Intent,
        proof_intent: Intent,
        flags: u32,
    ) -> CmmResult<Self> {
        ensure_installed();
        // SAFETY: all three profile handles are live for the duration of the call.
        let handle = unsafe {
            ffi::cmsCreateProofingTransform(
                source.handle(),
                ffi::PixelFormat(input.raw()),
                dest.handle(),
                ffi::PixelFormat(output.raw()),
                proof.handle(),
                intent.into(),
                proof_intent.into(),
                flags | consts::flags::SOFTPROOFING,
            )
        };
        Self::from_handle(handle, input, output, "cmsCreateProofingTransform")
    }

    fn from_handle(
        handle: ffi::HTRANSFORM,
        input: Format,
        output: Format,
        what: &str,
    ) -> CmmResult<Self> {
        if handle.is_null() {
            return Err(CmmError::TransformFailed(what.to_string()));
        }
        tracing::debug!(
            handle = ?handle,
            input = input.raw(),
            output = output.raw(),
            "transform created"
        );
        Ok(Self { handle, input, output })
    }

    /// Input buffer format.
    pub fn input_format(&self) -> Format {
        self.input
    }

    /// Output buffer format.
    pub fn output_format(&self) -> Format {
        self.output
    }

    /// Transforms `num_pixels` pixels from `input` into `output`.
    ///
    /// Sample types only fix the element width of the slices; the layout is
    /// taken from the formats the transform was built with. Both slices must
    /// hold at least `num_pixels` pixels of their format.
    pub fn apply<I: Sample, O: Sample>(
        &self,
        input: &[I],
        output: &mut [O],
        num_pixels: usize,
    ) -> CmmResult<()> {
        let count = self.checked_count(
            std::mem::size_of_val(input),
            std::mem::size_of_val(output),
            num_pixels,
        )?;
        if count == 0 {
            return Ok(());
        }

        // SAFETY: the capacity checks guarantee both buffers cover
        // `num_pixels` pixels of the transform's formats.
        unsafe {
            ffi::cmsDoTransform(
                self.handle,
                input.as_ptr().cast(),
                output.as_mut_ptr().cast(),
                count,
            )
        };
        Ok(())
    }

    /// Transforms `num_pixels` pixels of `buffer` in place.
    ///
    /// lcms reads each pixel before writing it, so this is valid whenever the
    /// output pixel is no larger than the input pixel. The buffer must hold
    /// `num_pixels` pixels of both formats.
    pub fn apply_in_place<T: Sample>(&self, buffer: &mut [T], num_pixels: usize) -> CmmResult<()> {
        if self.output.bytes_per_pixel() > self.input.bytes_per_pixel() {
            return Err(CmmError::InvalidArgument(format!(
                "in-place transform needs an output pixel no larger than the input ({} > {} bytes)",
                self.output.bytes_per_pixel(),
                self.input.bytes_per_pixel()
            )));
        }
        let bytes = std::mem::size_of_val(buffer);
        let count = self.checked_count(bytes, bytes, num_pixels)?;
        if count == 0 {
            return Ok(());
        }

        let data = buffer.as_mut_ptr();
        // SAFETY: the buffer covers `num_pixels` pixels of both formats and
        // lcms tolerates identical input and output pointers.
        unsafe { ffi::cmsDoTransform(self.handle, data.cast_const().cast(), data.cast(), count) };
        Ok(())
    }

    fn checked_count(&self, input_bytes: usize, output_bytes: usize, num_pixels: usize) -> CmmResult<u32> {
        let count = u32::try_from(num_pixels).map_err(|_| {
            CmmError::InvalidArgument(format!("num_pixels = {num_pixels} exceeds u32"))
        })?;
        check_capacity("input", self.input, input_bytes, num_pixels)?;
        check_capacity("output", self.output, output_bytes, num_pixels)?;
        Ok(count)
    }

    /// Releases the handle now rather than at drop.
    pub fn delete(self) {
        drop(self);
    }
}

fn check_capacity(which: &'static str, format: Format, actual: usize, pixels: usize) -> CmmResult<()> {
    let required = pixels
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(|| CmmError::InvalidArgument(format!("{pixels} pixels overflow")))?;
    if actual < required {
        return Err(CmmError::BufferTooSmall { which, required, actual });
    }
    Ok(())
}

impl Drop for Transform {
    fn drop(&mut self) {
        tracing::debug!(handle = ?self.handle, "transform deleted");
        // SAFETY: the handle is live and owned by this value.
        unsafe { ffi::cmsDeleteTransform(self.handle) };
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("input", &format_args!("{:#x}", self.input.raw()))
            .field("output", &format_args!("{:#x}", self.output.raw()))
            .finish()
    }
}

/// Sets the global codes painted over out-of-gamut pixels by gamut-checking
/// proofing transforms. Values are 16-bit encoded, one per channel.
pub fn set_alarm_codes(codes: &[u16]) -> CmmResult<()> {
    let codes: [u16; MAX_CHANNELS] = codes.try_into().map_err(|_| {
        CmmError::InvalidArgument(format!(
            "alarm codes need {MAX_CHANNELS} values, got {}",
            codes.len()
        ))
    })?;
    // SAFETY: lcms copies exactly MAX_CHANNELS values.
    unsafe { ffi::cmsSetAlarmCodes(codes.as_ptr()) };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srgb_identity() -> Transform {
        let srgb = Profile::srgb().unwrap();
        Transform::new(&srgb, Format::RGB_8, &srgb, Format::RGB_8, Intent::Perceptual, 0).unwrap()
    }

    #[test]
    fn test_identity() {
        let transform = srgb_identity();
        let input = [10u8, 128, 250, 0, 0, 0];
        let mut output = [0u8; 6];
        transform.apply(&input, &mut output, 2).unwrap();
        for (a, b) in input.iter().zip(output.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_short_buffers() {
        let transform = srgb_identity();
        let mut output = [0u8; 6];
        let err = transform.apply(&[0u8; 5], &mut output, 2).unwrap_err();
        assert!(matches!(err, CmmError::BufferTooSmall { which: "input", required: 6, actual: 5 }));

        let mut short = [0u8; 3];
        let err = transform.apply(&[0u8; 6], &mut short, 2).unwrap_err();
        assert!(matches!(err, CmmError::BufferTooSmall { which: "output", .. }));
    }

    #[test]
    fn test_zero_pixels() {
        let transform = srgb_identity();
        let mut output: [u8; 0] = [];
        transform.apply::<u8, u8>(&[], &mut output, 0).unwrap();
    }

    #[test]
    fn test_8_to_16() {
        let srgb = Profile::srgb().unwrap();
        let transform =
            Transform::new(&srgb, Format::RGB_8, &srgb, Format::RGB_16, Intent::Perceptual, 0)
                .unwrap();
        let mut output = [0u16; 3];
        transform.apply(&[255u8, 255, 255], &mut output, 1).unwrap();
        assert!(output.iter().all(|&v| v > 0xFF00));
        // u16 slices are sized in bytes, not elements
        let err = transform.apply(&[0u8; 6], &mut [0u16; 5], 2).unwrap_err();
        assert!(matches!(err, CmmError::BufferTooSmall { required: 12, actual: 10, .. }));
    }

    #[test]
    fn test_in_place() {
        let transform = srgb_identity();
        let mut buffer = [10u8, 128, 250, 0, 0, 0];
        transform.apply_in_place(&mut buffer, 2).unwrap();
        for (a, b) in [10u8, 128, 250, 0, 0, 0].iter().zip(buffer.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
        assert!(transform.apply_in_place(&mut [0u8; 5], 2).is_err());

        let srgb = Profile::srgb().unwrap();
        let widening =
            Transform::new(&srgb, Format::RGB_8, &srgb, Format::RGB_16, Intent::Perceptual, 0)
                .unwrap();
        let err = widening.apply_in_place(&mut [0u16; 3], 1).unwrap_err();
        assert!(matches!(err, CmmError::InvalidArgument(_)));
    }

    #[test]
    fn test_format_mismatch() {
        let srgb = Profile::srgb().unwrap();
        let err = Transform::new(&srgb, Format::CMYK_8, &srgb, Format::RGB_8, Intent::Perceptual, 0);
        assert!(err.is_err());
    }

    #[test]
    fn test_alarm_codes_length() {
        assert!(set_alarm_codes(&[0; 16]).is_ok());
        assert!(set_alarm_codes(&[0; 15]).is_err());
    }
}
