//! # cmm-core
//!
//! Handle-level bindings to the Little CMS 2 color engine.
//!
//! This crate performs no color science of its own. It opens and closes
//! profile handles, builds transforms, checks pixel buffers against the
//! transform's formats, and forwards everything else to lcms.
//!
//! # Features
//!
//! - Open ICC profiles from memory, create sRGB and other standard profiles
//! - Plain and soft-proofing transforms with arbitrary lcms pixel formats
//! - 8 and 16-bit buffer application with size checks
//! - Routing of lcms error messages to a registered handler and to `tracing`
//! - Authoring of partial output profiles with lut16 tags
//!
//! # Example
//!
//! ```rust
//! use cmm_core::{Format, Intent, Profile, StandardProfile, Transform, consts::flags};
//!
//! let srgb = Profile::srgb().unwrap();
//! let p3 = Profile::from_standard(StandardProfile::DisplayP3).unwrap();
//!
//! let transform = Transform::new(
//!     &srgb, Format::RGB_8,
//!     &p3, Format::RGB_16,
//!     Intent::RelativeColorimetric,
//!     flags::BLACKPOINTCOMPENSATION,
//! ).unwrap();
//!
//! let input = [200u8, 30, 40, 10, 220, 90];
//! let mut output = [0u16; 6];
//! transform.apply(&input, &mut output, 2).unwrap();
//! ```
//!
//! # Thread Safety
//!
//! lcms handles are not thread-safe, so [`Profile`] and [`Transform`] are
//! neither `Send` nor `Sync`. The error handler registry is process-wide.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod consts;
mod error;
mod format;
mod handler;
mod lut;
mod profile;
mod standard;
mod tag;
mod transform;

pub use error::{CmmError, CmmResult};
pub use format::Format;
pub use handler::{ErrorHandler, has_log_error_handler, set_log_error_handler, unset_log_error_handler};
pub use lut::{LUT16_INPUT_CHANNELS, Lut16};
pub use profile::Profile;
pub use standard::StandardProfile;
pub use tag::LutTag;
pub use transform::{Sample, Transform, set_alarm_codes};

use lcms2_sys as ffi;

/// Rendering intent for color transformations.
///
/// Determines how out-of-gamut colors are handled during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Compresses the source gamut into the destination gamut.
    ///
    /// Best for photographic images.
    #[default]
    Perceptual = 0,

    /// Maps colors exactly, clipping what falls outside the destination
    /// gamut, with white mapped to white.
    RelativeColorimetric = 1,

    /// Maintains saturation at the expense of accuracy.
    ///
    /// Best for business graphics.
    Saturation = 2,

    /// Like relative colorimetric but without white point adaptation.
    ///
    /// Best for spot colors and proofing paper white.
    AbsoluteColorimetric = 3,
}

impl Intent {
    /// Converts a raw `INTENT_*` value.
    ///
    /// # Errors
    ///
    /// Returns [`CmmError::InvalidArgument`] for values other than 0..=3.
    pub fn from_raw(raw: u32) -> CmmResult<Self> {
        match raw {
            0 => Ok(Intent::Perceptual),
            1 => Ok(Intent::RelativeColorimetric),
            2 => Ok(Intent::Saturation),
            3 => Ok(Intent::AbsoluteColorimetric),
            _ => Err(CmmError::InvalidArgument(format!("unknown intent {raw}"))),
        }
    }
}

impl From<Intent> for ffi::Intent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Perceptual => ffi::Intent::Perceptual,
            Intent::RelativeColorimetric => ffi::Intent::RelativeColorimetric,
            Intent::Saturation => ffi::Intent::Saturation,
            Intent::AbsoluteColorimetric => ffi::Intent::AbsoluteColorimetric,
        }
    }
}

/// Encoded version of the linked lcms library, e.g. `2160` for 2.16.
pub fn lcms_version() -> u32 {
    // SAFETY: pure query without arguments.
    unsafe { ffi::cmsGetEncodedCMMversion() as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_from_raw() {
        assert_eq!(Intent::from_raw(1).unwrap(), Intent::RelativeColorimetric);
        assert_eq!(Intent::from_raw(3).unwrap() as u32, 3);
        assert!(Intent::from_raw(4).is_err());
    }

    #[test]
    fn test_lcms_version() {
        assert!(lcms_version() >= 2000);
    }
}
