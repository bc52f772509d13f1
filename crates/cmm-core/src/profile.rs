//! ICC profile handles.

use crate::handler::ensure_installed;
use crate::tag::LutTag;
use crate::{CmmError, CmmResult, StandardProfile};
use lcms2_sys as ffi;
use std::ffi::c_void;
use std::ptr;

/// Offset of the profile creator field in the ICC header.
const CREATOR_OFFSET: usize = 80;

// The sys crate returns these as enums, but lcms only validates the device
// class. Unknown color space and PCS signatures pass through, so the header
// words are read as plain integers.
unsafe extern "C" {
    fn cmsGetDeviceClass(profile: ffi::HPROFILE) -> u32;
    fn cmsGetColorSpace(profile: ffi::HPROFILE) -> u32;
    fn cmsGetPCS(profile: ffi::HPROFILE) -> u32;
}

/// An open lcms profile handle.
///
/// The handle is released when the profile is dropped or explicitly
/// [closed](Profile::close). lcms profiles are not thread-safe, so `Profile`
/// is neither `Send` nor `Sync`.
///
/// # Example
///
/// ```rust
/// use cmm_core::{Profile, consts};
///
/// let srgb = Profile::srgb().unwrap();
/// assert_eq!(srgb.color_space(), consts::space::RGB);
///
/// let data = srgb.to_icc().unwrap();
/// let reopened = Profile::from_icc(&data).unwrap();
/// assert_eq!(reopened.device_class(), srgb.device_class());
/// ```
pub struct Profile {
    handle: ffi::HPROFILE,
    /// Creator signature stamped into the header on serialisation.
    creator: Option<u32>,
}

impl Profile {
    /// Takes ownership of a handle returned by an lcms constructor.
    pub(crate) fn from_handle(handle: ffi::HPROFILE, what: &str) -> CmmResult<Self> {
        if handle.is_null() {
            return Err(CmmError::ProfileFailed(what.to_string()));
        }
        tracing::debug!(handle = ?handle, what, "profile opened");
        Ok(Self { handle, creator: None })
    }

    pub(crate) fn handle(&self) -> ffi::HPROFILE {
        self.handle
    }

    pub(crate) fn set_creator(&mut self, creator: u32) {
        self.creator = Some(creator);
    }

    /// Opens a profile from in-memory ICC data.
    ///
    /// lcms copies the data, so `data` need not outlive the profile.
    ///
    /// # Errors
    ///
    /// Returns [`CmmError::ProfileFailed`] when lcms rejects the data. The
    /// reason is delivered to the registered error handler.
    pub fn from_icc(data: &[u8]) -> CmmResult<Self> {
        ensure_installed();
        let len = u32::try_from(data.len())
            .map_err(|_| CmmError::InvalidArgument("profile larger than 4 GiB".into()))?;
        // SAFETY: pointer and length describe a live slice; lcms copies it.
        let handle = unsafe { ffi::cmsOpenProfileFromMem(data.as_ptr().cast(), len) };
        Self::from_handle(handle, "cmsOpenProfileFromMem")
    }

    /// Creates the built-in lcms sRGB profile.
    pub fn srgb() -> CmmResult<Self> {
        ensure_installed();
        // SAFETY: no arguments; the result is checked for null.
        let handle = unsafe { ffi::cmsCreate_sRGBProfile() };
        Self::from_handle(handle, "cmsCreate_sRGBProfile")
    }

    /// Creates a profile from a built-in standard.
    pub fn from_standard(standard: StandardProfile) -> CmmResult<Self> {
        standard.to_profile()
    }

    /// Raw ICC device class signature, see [`crate::consts::class`].
    pub fn device_class(&self) -> u32 {
        // SAFETY: `self.handle` is a live profile.
        unsafe { cmsGetDeviceClass(self.handle) }
    }

    /// Raw ICC color space signature, see [`crate::consts::space`].
    pub fn color_space(&self) -> u32 {
        // SAFETY: `self.handle` is a live profile.
        unsafe { cmsGetColorSpace(self.handle) }
    }

    /// Raw ICC connection space signature.
    pub fn pcs(&self) -> u32 {
        // SAFETY: `self.handle` is a live profile.
        unsafe { cmsGetPCS(self.handle) }
    }

    /// Returns the English (US) profile description.
    ///
    /// Characters outside printable ASCII are stripped. Returns `None` if the
    /// profile carries no description.
    pub fn description(&self) -> Option<String> {
        let lang = b"eng\0";
        let country = b"USA\0";
        // SAFETY: a null buffer asks lcms for the required size only.
        let len = unsafe {
            ffi::cmsGetProfileInfoASCII(
                self.handle,
                ffi::InfoType::Description,
                lang.as_ptr().cast(),
                country.as_ptr().cast(),
                ptr::null_mut(),
                0,
            )
        };
        if len == 0 {
            return None;
        }

        let mut buffer = vec![0u8; len as usize];
        // SAFETY: `buffer` holds exactly `len` bytes.
        let written = unsafe {
            ffi::cmsGetProfileInfoASCII(
                self.handle,
                ffi::InfoType::Description,
                lang.as_ptr().cast(),
                country.as_ptr().cast(),
                buffer.as_mut_ptr().cast(),
                len,
            )
        };
        if written == 0 {
            return None;
        }

        let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
        Some(
            buffer[..end]
                .iter()
                .filter(|&&b| (32..127).contains(&b))
                .map(|&b| b as char)
                .collect(),
        )
    }

    /// Returns true if the profile carries `tag`.
    pub fn has_tag(&self, tag: LutTag) -> bool {
        // SAFETY: `self.handle` is a live profile.
        unsafe { ffi::cmsIsTag(self.handle, tag.signature()) != 0 }
    }

    /// Pointer to the deserialised tag data, or null when the tag is absent.
    ///
    /// Linked tags resolve to the same pointer.
    pub(crate) fn tag_data(&self, tag: LutTag) -> *mut c_void {
        if !self.has_tag(tag) {
            return ptr::null_mut();
        }
        // SAFETY: the tag exists; lcms owns the returned data.
        unsafe { ffi::cmsReadTag(self.handle, tag.signature()) }
    }

    /// Lists the usable BToA tags.
    ///
    /// `B2A1` comes first when present. `B2A0` and `B2A2` follow when present
    /// and not linked to `B2A1`.
    pub fn available_b2a_tags(&self) -> Vec<LutTag> {
        let b2a0 = self.tag_data(LutTag::BToA0);
        let b2a1 = self.tag_data(LutTag::BToA1);
        let b2a2 = self.tag_data(LutTag::BToA2);

        let mut tags = Vec::with_capacity(3);
        if !b2a1.is_null() {
            tags.push(LutTag::BToA1);
        }
        if !b2a0.is_null() && b2a0 != b2a1 {
            tags.push(LutTag::BToA0);
        }
        if !b2a2.is_null() && b2a2 != b2a1 {
            tags.push(LutTag::BToA2);
        }
        tags
    }

    /// Makes `tag` share the data of `dest`.
    pub fn link_tag(&mut self, tag: LutTag, dest: LutTag) -> CmmResult<()> {
        // SAFETY: `self.handle` is a live profile.
        let ok = unsafe { ffi::cmsLinkTag(self.handle, tag.signature(), dest.signature()) };
        if ok == 0 {
            return Err(CmmError::TagFailed(format!("link {tag} -> {dest}")));
        }
        Ok(())
    }

    /// Serialises the profile to ICC data.
    pub fn to_icc(&self) -> CmmResult<Vec<u8>> {
        ensure_installed();
        let mut needed: u32 = 0;
        // SAFETY: a null buffer asks lcms for the required size only.
        let ok = unsafe { ffi::cmsSaveProfileToMem(self.handle, ptr::null_mut(), &mut needed) };
        if ok == 0 || needed == 0 {
            return Err(CmmError::ProfileFailed("cmsSaveProfileToMem".into()));
        }

        let mut data = vec![0u8; needed as usize];
        // SAFETY: `data` holds `needed` bytes.
        let ok = unsafe {
            ffi::cmsSaveProfileToMem(self.handle, data.as_mut_ptr().cast(), &mut needed)
        };
        if ok == 0 {
            return Err(CmmError::ProfileFailed("cmsSaveProfileToMem".into()));
        }
        data.truncate(needed as usize);

        if let Some(creator) = self.creator {
            if let Some(field) = data.get_mut(CREATOR_OFFSET..CREATOR_OFFSET + 4) {
                field.copy_from_slice(&creator.to_be_bytes());
            }
        }
        Ok(data)
    }

    /// Releases the handle now rather than at drop.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Profile {
    fn drop(&mut self) {
        tracing::debug!(handle = ?self.handle, "profile closed");
        // SAFETY: the handle is live and owned by this value.
        unsafe { ffi::cmsCloseProfile(self.handle) };
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &crate::consts::fourcc(self.color_space()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{class, space};

    #[test]
    fn test_srgb() {
        let profile = Profile::srgb().unwrap();
        assert_eq!(profile.color_space(), space::RGB);
        assert_eq!(profile.device_class(), class::DISPLAY);
        assert_eq!(profile.pcs(), space::XYZ);
        assert!(!profile.description().unwrap().is_empty());
    }

    #[test]
    fn test_srgb_has_no_b2a() {
        let profile = Profile::srgb().unwrap();
        assert!(profile.available_b2a_tags().is_empty());
        assert!(!profile.has_tag(LutTag::BToA0));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(Profile::from_icc(b"not a profile").is_err());
        assert!(Profile::from_icc(&[]).is_err());
    }

    #[test]
    fn test_to_icc() {
        let profile = Profile::srgb().unwrap();
        let data = profile.to_icc().unwrap();
        assert!(data.len() > 128);
        assert_eq!(&data[36..40], b"acsp");

        let reloaded = Profile::from_icc(&data).unwrap();
        assert_eq!(reloaded.color_space(), space::RGB);
        assert_eq!(reloaded.description(), profile.description());
    }

    #[test]
    fn test_unknown_signatures_pass_through() {
        let mut data = Profile::srgb().unwrap().to_icc().unwrap();
        data[16..20].copy_from_slice(b"ZZZZ");
        data[20..24].copy_from_slice(b"QQQQ");

        let profile = Profile::from_icc(&data).unwrap();
        assert_eq!(profile.device_class(), class::DISPLAY);
        assert_eq!(profile.color_space(), 0x5A5A_5A5A);
        assert_eq!(profile.pcs(), 0x5151_5151);
        assert_eq!(crate::consts::fourcc(profile.color_space()), "ZZZZ");
    }

    #[test]
    fn test_creator_stamped() {
        let mut profile = Profile::srgb().unwrap();
        profile.set_creator(0x5A59_474F);
        let data = profile.to_icc().unwrap();
        assert_eq!(&data[CREATOR_OFFSET..CREATOR_OFFSET + 4], b"ZYGO");
    }
}
