//! Packed pixel format words.
//!
//! lcms describes a buffer layout with a single 32-bit word built from
//! bitfields (the `TYPE_*` macros of `lcms2.h`). The binding packs the word on
//! the caller's behalf and decodes it again to size-check pixel buffers.

use crate::consts::pixel_type;
use crate::{CmmError, CmmResult};

const FLOAT_SHIFT: u32 = 22;
const COLORSPACE_SHIFT: u32 = 16;
const PLANAR_SHIFT: u32 = 12;
const DOSWAP_SHIFT: u32 = 10;
const EXTRA_SHIFT: u32 = 7;
const CHANNELS_SHIFT: u32 = 3;

const BYTES_MASK: u32 = 0x7;
const CHANNELS_MASK: u32 = 0xF;
const EXTRA_MASK: u32 = 0x7;
const COLORSPACE_MASK: u32 = 0x1F;

/// An lcms pixel format word.
///
/// # Example
///
/// ```rust
/// use cmm_core::{Format, consts::pixel_type};
///
/// let rgb8 = Format::new(false, pixel_type::RGB, 3, 1, false, 0).unwrap();
/// assert_eq!(rgb8, Format::RGB_8);
/// assert_eq!(rgb8.bytes_per_pixel(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format(u32);

impl Format {
    /// 8-bit RGB, `TYPE_RGB_8`.
    pub const RGB_8: Format = Format::pack(false, pixel_type::RGB, 3, 1, false, 0);
    /// 16-bit RGB, `TYPE_RGB_16`.
    pub const RGB_16: Format = Format::pack(false, pixel_type::RGB, 3, 2, false, 0);
    /// 8-bit RGB with alpha, `TYPE_RGBA_8`.
    pub const RGBA_8: Format = Format::pack(false, pixel_type::RGB, 3, 1, false, 1);
    /// 16-bit RGB with alpha, `TYPE_RGBA_16`.
    pub const RGBA_16: Format = Format::pack(false, pixel_type::RGB, 3, 2, false, 1);
    /// 8-bit CMYK, `TYPE_CMYK_8`.
    pub const CMYK_8: Format = Format::pack(false, pixel_type::CMYK, 4, 1, false, 0);

    const fn pack(float: bool, pt: u32, channels: u32, bytes: u32, swap: bool, extra: u32) -> Self {
        Format(
            ((float as u32) << FLOAT_SHIFT)
                | (pt << COLORSPACE_SHIFT)
                | ((swap as u32) << DOSWAP_SHIFT)
                | (extra << EXTRA_SHIFT)
                | (channels << CHANNELS_SHIFT)
                | bytes,
        )
    }

    /// Packs a format word, rejecting fields that overflow their bitfield.
    ///
    /// # Arguments
    ///
    /// * `float` - samples are floating point
    /// * `pixel_type` - one of [`crate::consts::pixel_type`]
    /// * `channels` - color channels, alpha excluded (0..=15)
    /// * `bytes` - bytes per sample (0..=7, 0 meaning 8-byte double)
    /// * `swap` - BGR instead of RGB order
    /// * `extra` - extra channels such as alpha (0..=7)
    pub fn new(
        float: bool,
        pixel_type: u32,
        channels: u32,
        bytes: u32,
        swap: bool,
        extra: u32,
    ) -> CmmResult<Self> {
        check_field("pixel_type", pixel_type, COLORSPACE_MASK)?;
        check_field("channels", channels, CHANNELS_MASK)?;
        check_field("bytes", bytes, BYTES_MASK)?;
        check_field("extra", extra, EXTRA_MASK)?;
        Ok(Self::pack(float, pixel_type, channels, bytes, swap, extra))
    }

    /// Wraps a raw word as produced by lcms' `TYPE_*` macros.
    pub const fn from_raw(raw: u32) -> Self {
        Format(raw)
    }

    /// Returns the raw word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Number of color channels.
    pub const fn channels(self) -> usize {
        ((self.0 >> CHANNELS_SHIFT) & CHANNELS_MASK) as usize
    }

    /// Number of extra (e.g. alpha) channels.
    pub const fn extra(self) -> usize {
        ((self.0 >> EXTRA_SHIFT) & EXTRA_MASK) as usize
    }

    /// Bytes per sample. A zero bytes field denotes doubles.
    pub const fn bytes_per_sample(self) -> usize {
        match self.0 & BYTES_MASK {
            0 => 8,
            n => n as usize,
        }
    }

    /// Bytes occupied by one pixel, planar or chunky alike.
    pub const fn bytes_per_pixel(self) -> usize {
        self.bytes_per_sample() * (self.channels() + self.extra())
    }

    /// Pixel type code.
    pub const fn pixel_type(self) -> u32 {
        (self.0 >> COLORSPACE_SHIFT) & COLORSPACE_MASK
    }

    /// True for floating point samples.
    pub const fn is_float(self) -> bool {
        (self.0 >> FLOAT_SHIFT) & 1 == 1
    }

    /// True for planar layouts.
    pub const fn is_planar(self) -> bool {
        (self.0 >> PLANAR_SHIFT) & 1 == 1
    }
}

fn check_field(name: &str, value: u32, mask: u32) -> CmmResult<()> {
    if value > mask {
        return Err(CmmError::InvalidArgument(format!(
            "{name} = {value} exceeds maximum {mask}"
        )));
    }
    Ok(())
}

impl From<Format> for u32 {
    fn from(format: Format) -> Self {
        format.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_lcms_macros() {
        // TYPE_RGB_8 = COLORSPACE_SH(PT_RGB)|CHANNELS_SH(3)|BYTES_SH(1)
        assert_eq!(Format::RGB_8.raw(), 0x4_0019);
        // TYPE_RGBA_16 adds EXTRA_SH(1) and BYTES_SH(2)
        assert_eq!(Format::RGBA_16.raw(), 0x4_009A);
        // TYPE_BGR_8 sets DOSWAP_SH(1)
        let bgr = Format::new(false, pixel_type::RGB, 3, 1, true, 0).unwrap();
        assert_eq!(bgr.raw(), 0x4_0419);
    }

    #[test]
    fn test_decode() {
        assert_eq!(Format::RGBA_8.channels(), 3);
        assert_eq!(Format::RGBA_8.extra(), 1);
        assert_eq!(Format::RGBA_8.bytes_per_pixel(), 4);
        assert_eq!(Format::RGB_16.bytes_per_pixel(), 6);
        assert_eq!(Format::CMYK_8.pixel_type(), pixel_type::CMYK);
        assert!(!Format::CMYK_8.is_float());

        let dbl = Format::new(true, pixel_type::LAB, 3, 0, false, 0).unwrap();
        assert!(dbl.is_float());
        assert_eq!(dbl.bytes_per_pixel(), 24);
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(Format::new(false, pixel_type::RGB, 16, 1, false, 0).is_err());
        assert!(Format::new(false, pixel_type::RGB, 3, 8, false, 0).is_err());
        assert!(Format::new(false, 32, 3, 1, false, 0).is_err());
        assert!(Format::new(false, pixel_type::RGB, 3, 1, false, 8).is_err());
    }
}
