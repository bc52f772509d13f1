//! Profile authoring: partial output profiles and lut16 tags.

use crate::handler::ensure_installed;
use crate::tag::LutTag;
use crate::{CmmError, CmmResult, Profile};
use lcms2_sys as ffi;
use std::ffi::CString;
use std::ptr;

/// Input channels of every lut16 written by the binding (RGB or Lab).
pub const LUT16_INPUT_CHANNELS: usize = 3;

/// Creator signature of authored profiles, `'ZYGO'`.
const CREATOR: u32 = 0x5A59_474F;

/// ICC v2.4, the version authored profiles are stamped with.
const AUTHORED_VERSION: f64 = 2.4;

// Header attribute bits.
const ATTR_REFLECTIVE: u64 = 0;
const ATTR_GLOSSY: u64 = 0;
const ATTR_MATTE: u64 = 2;

/// lcms' "no language" / "no country" code.
const NO_LOCALE: &[u8; 3] = b"\0\0\0";

/// Stage type of a set of per-channel curves, `'cvst'`.
const CURVE_SET_STAGE: u32 = 0x6376_7374;

// Plugin stages may carry any signature, so the type is read as an integer.
unsafe extern "C" {
    fn cmsStageType(stage: *const ffi::Stage) -> u32;
}

/// A three-input lut16: pre-table curves, cubic CLUT, post-table curves.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut16 {
    grid_points: usize,
    output_channels: usize,
    clut: Vec<u16>,
    pre: Vec<Vec<u16>>,
    post: Vec<Vec<u16>>,
}

impl Lut16 {
    /// Builds and validates a lut16.
    ///
    /// # Arguments
    ///
    /// * `grid_points` - CLUT points per input axis
    /// * `output_channels` - channels produced by the CLUT and post-table
    /// * `clut` - `grid_points^3 * output_channels` samples, first axis slowest
    /// * `pre` - one curve per input channel
    /// * `post` - one curve per output channel
    pub fn new(
        grid_points: usize,
        output_channels: usize,
        clut: Vec<u16>,
        pre: Vec<Vec<u16>>,
        post: Vec<Vec<u16>>,
    ) -> CmmResult<Self> {
        if grid_points < 2 {
            return Err(invalid(format!("grid_points = {grid_points}, need at least 2")));
        }
        if output_channels == 0 || output_channels > crate::consts::MAX_CHANNELS {
            return Err(invalid(format!("output_channels = {output_channels} out of range")));
        }
        let expected = grid_points
            .checked_pow(LUT16_INPUT_CHANNELS as u32)
            .and_then(|n| n.checked_mul(output_channels))
            .ok_or_else(|| invalid("CLUT size overflows".to_string()))?;
        if clut.len() != expected {
            return Err(invalid(format!("CLUT has {} samples, expected {expected}", clut.len())));
        }
        check_curves("pre_table", &pre, LUT16_INPUT_CHANNELS)?;
        check_curves("post_table", &post, output_channels)?;

        Ok(Self { grid_points, output_channels, clut, pre, post })
    }

    /// CLUT points per input axis.
    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Output channel count.
    pub fn output_channels(&self) -> usize {
        self.output_channels
    }
}

fn check_curves(name: &str, curves: &[Vec<u16>], channels: usize) -> CmmResult<()> {
    if curves.len() != channels {
        return Err(invalid(format!("{name} has {} curves, expected {channels}", curves.len())));
    }
    if let Some(curve) = curves.iter().find(|c| c.len() < 2) {
        return Err(invalid(format!("{name} curve has {} entries, need at least 2", curve.len())));
    }
    Ok(())
}

fn invalid(msg: String) -> CmmError {
    CmmError::InvalidArgument(msg)
}

/// Owns a pipeline until it is handed to lcms or dropped.
struct PipelineGuard(*mut ffi::Pipeline);

impl PipelineGuard {
    fn alloc(input: usize, output: usize) -> CmmResult<Self> {
        // SAFETY: null context selects the global context.
        let pipeline = unsafe { ffi::cmsPipelineAlloc(ptr::null_mut(), input as u32, output as u32) };
        if pipeline.is_null() {
            return Err(CmmError::TagFailed("cmsPipelineAlloc".into()));
        }
        Ok(Self(pipeline))
    }

    /// Appends `stage`, taking ownership of it.
    fn push(&mut self, stage: *mut ffi::Stage, what: &str) -> CmmResult<()> {
        if stage.is_null() {
            return Err(CmmError::TagFailed(what.to_string()));
        }
        // SAFETY: both pointers are live; on success the pipeline owns the stage.
        let ok = unsafe { ffi::cmsPipelineInsertStage(self.0, ffi::StageLoc::AT_END, stage) };
        if ok == 0 {
            // SAFETY: insertion failed, so the stage is still ours.
            unsafe { ffi::cmsStageFree(stage) };
            return Err(CmmError::TagFailed(what.to_string()));
        }
        Ok(())
    }
}

impl Drop for PipelineGuard {
    fn drop(&mut self) {
        // SAFETY: the pipeline is owned by the guard.
        unsafe { ffi::cmsPipelineFree(self.0) };
    }
}

/// Builds a tone-curve stage from tabulated curves.
fn curve_stage(curves: &[Vec<u16>]) -> *mut ffi::Stage {
    let mut handles = Vec::with_capacity(curves.len());
    for values in curves {
        // SAFETY: `values` is a live slice of `values.len()` entries.
        let curve = unsafe {
            ffi::cmsBuildTabulatedToneCurve16(ptr::null_mut(), values.len() as u32, values.as_ptr())
        };
        if curve.is_null() {
            free_curves(&handles);
            return ptr::null_mut();
        }
        handles.push(curve);
    }
    // SAFETY: lcms duplicates the curves into the stage.
    let stage = unsafe {
        ffi::cmsStageAllocToneCurves(ptr::null_mut(), handles.len() as u32, handles.as_ptr().cast())
    };
    free_curves(&handles);
    stage
}

fn free_curves(curves: &[*mut ffi::ToneCurve]) {
    for &curve in curves {
        // SAFETY: each curve was built above and is owned here.
        unsafe { ffi::cmsFreeToneCurve(curve) };
    }
}

impl Profile {
    /// Creates a partial RGB output profile to be completed with lut16 tags.
    ///
    /// The profile is ICC v2.4, output class, RGB data with a Lab connection
    /// space, reflective, and carries description, copyright and media white
    /// point tags. It must receive its AToB/BToA tags before being dumped.
    pub fn partial(
        description: &str,
        copyright: &str,
        glossy: bool,
        white_point: [f64; 3],
    ) -> CmmResult<Self> {
        ensure_installed();
        let description = CString::new(description)
            .map_err(|_| invalid("description contains NUL".to_string()))?;
        let copyright = CString::new(copyright)
            .map_err(|_| invalid("copyright contains NUL".to_string()))?;

        // SAFETY: null context selects the global context.
        let handle = unsafe { ffi::cmsCreateProfilePlaceholder(ptr::null_mut()) };
        let mut profile = Profile::from_handle(handle, "cmsCreateProfilePlaceholder")?;
        let h = profile.handle();

        let attributes = ATTR_REFLECTIVE | if glossy { ATTR_GLOSSY } else { ATTR_MATTE };
        // SAFETY: `h` is the live placeholder owned by `profile`.
        unsafe {
            ffi::cmsSetProfileVersion(h, AUTHORED_VERSION);
            ffi::cmsSetDeviceClass(h, ffi::ProfileClassSignature::OutputClass);
            ffi::cmsSetColorSpace(h, ffi::ColorSpaceSignature::RgbData);
            ffi::cmsSetPCS(h, ffi::ColorSpaceSignature::LabData);
            ffi::cmsSetHeaderAttributes(h, attributes);
        }
        profile.set_creator(CREATOR);

        profile.write_text_tag(ffi::TagSignature::ProfileDescriptionTag, "desc", &description)?;
        profile.write_text_tag(ffi::TagSignature::CopyrightTag, "cprt", &copyright)?;

        let [x, y, z] = white_point;
        let xyz = ffi::CIEXYZ { X: x, Y: y, Z: z };
        // SAFETY: lcms copies the XYZ value.
        let ok = unsafe {
            ffi::cmsWriteTag(h, ffi::TagSignature::MediaWhitePointTag, (&xyz as *const ffi::CIEXYZ).cast())
        };
        if ok == 0 {
            return Err(CmmError::TagFailed("wtpt".into()));
        }
        Ok(profile)
    }

    fn write_text_tag(&mut self, sig: ffi::TagSignature, name: &str, text: &CString) -> CmmResult<()> {
        // SAFETY: null context selects the global context.
        let mlu = unsafe { ffi::cmsMLUalloc(ptr::null_mut(), 1) };
        if mlu.is_null() {
            return Err(CmmError::TagFailed("cmsMLUalloc".into()));
        }
        // SAFETY: `mlu` is live until freed below; lcms copies it into the tag.
        let ok = unsafe {
            ffi::cmsMLUsetASCII(mlu, NO_LOCALE.as_ptr().cast(), NO_LOCALE.as_ptr().cast(), text.as_ptr())
                != 0
                && ffi::cmsWriteTag(self.handle(), sig, mlu.cast()) != 0
        };
        // SAFETY: allocated above and no longer referenced.
        unsafe { ffi::cmsMLUfree(mlu) };
        if !ok {
            return Err(CmmError::TagFailed(name.to_string()));
        }
        Ok(())
    }

    /// Writes `lut` into `tag` as a pre-table, CLUT, post-table pipeline.
    pub fn write_lut16(&mut self, tag: LutTag, lut: &Lut16) -> CmmResult<()> {
        ensure_installed();
        let mut pipeline = PipelineGuard::alloc(LUT16_INPUT_CHANNELS, lut.output_channels)?;
        pipeline.push(curve_stage(&lut.pre), "pre_table stage")?;

        // SAFETY: `lut.clut` holds grid^3 * output_channels samples, validated in `Lut16::new`.
        let clut = unsafe {
            ffi::cmsStageAllocCLut16bit(
                ptr::null_mut(),
                lut.grid_points as u32,
                LUT16_INPUT_CHANNELS as u32,
                lut.output_channels as u32,
                lut.clut.as_ptr(),
            )
        };
        pipeline.push(clut, "CLUT stage")?;
        pipeline.push(curve_stage(&lut.post), "post_table stage")?;

        // SAFETY: lcms serialises a copy of the pipeline into the tag.
        let ok = unsafe { ffi::cmsWriteTag(self.handle(), tag.signature(), pipeline.0.cast()) };
        if ok == 0 {
            return Err(CmmError::TagFailed(format!("write {tag}")));
        }
        tracing::debug!(%tag, grid = lut.grid_points, out = lut.output_channels, "lut16 written");
        Ok(())
    }

    fn pipeline(&self, tag: LutTag) -> CmmResult<*mut ffi::Pipeline> {
        let data = self.tag_data(tag);
        if data.is_null() {
            return Err(CmmError::TagNotFound(tag.to_string()));
        }
        Ok(data.cast())
    }

    /// Input and output channel counts of the pipeline stored in `tag`.
    pub fn lut_channels(&self, tag: LutTag) -> CmmResult<(usize, usize)> {
        let pipeline = self.pipeline(tag)?;
        // SAFETY: `pipeline` is owned by the profile and outlives this call.
        unsafe {
            Ok((
                ffi::cmsPipelineInputChannels(pipeline) as usize,
                ffi::cmsPipelineOutputChannels(pipeline) as usize,
            ))
        }
    }

    /// Evaluates the pipeline in `tag` for each row of `input`.
    ///
    /// `input` holds rows of the pipeline's input channels and `output`
    /// receives the same number of rows of its output channels.
    pub fn eval_lut16(&self, tag: LutTag, input: &[u16], output: &mut [u16]) -> CmmResult<()> {
        let pipeline = self.pipeline(tag)?;
        let (in_ch, out_ch) = self.lut_channels(tag)?;
        check_rows(input.len(), in_ch, output.len(), out_ch)?;

        for (src, dst) in input.chunks_exact(in_ch).zip(output.chunks_exact_mut(out_ch)) {
            // SAFETY: `src` and `dst` hold exactly the pipeline's channel counts.
            unsafe { ffi::cmsPipelineEval16(src.as_ptr(), dst.as_mut_ptr(), pipeline) };
        }
        Ok(())
    }

    /// Channel count of the first (pre-table) stage of `tag`.
    pub fn pre_table_channels(&self, tag: LutTag) -> CmmResult<usize> {
        let pipeline = self.pipeline(tag)?;
        // SAFETY: `pipeline` is owned by the profile.
        let stage = unsafe { ffi::cmsPipelineGetPtrToFirstStage(pipeline) };
        if stage.is_null() {
            return Err(CmmError::TagFailed(format!("{tag} has no stages")));
        }
        // SAFETY: `stage` belongs to `pipeline`.
        let (kind, channels) = unsafe { (cmsStageType(stage), ffi::cmsStageInputChannels(stage)) };
        if kind != CURVE_SET_STAGE {
            return Err(CmmError::TagFailed(format!("{tag} does not start with curves")));
        }
        Ok(channels as usize)
    }

    /// Evaluates only the pre-table curves of `tag` for each row of `input`.
    pub fn eval_pre_table(&self, tag: LutTag, input: &[u16], output: &mut [u16]) -> CmmResult<()> {
        let channels = self.pre_table_channels(tag)?;
        check_rows(input.len(), channels, output.len(), channels)?;

        let pipeline = self.pipeline(tag)?;
        // SAFETY: `pipeline` is owned by the profile and has a first stage.
        let first = unsafe { ffi::cmsStageDup(ffi::cmsPipelineGetPtrToFirstStage(pipeline)) };
        let mut curves = PipelineGuard::alloc(channels, channels)?;
        curves.push(first, "pre_table copy")?;

        for (src, dst) in input.chunks_exact(channels).zip(output.chunks_exact_mut(channels)) {
            // SAFETY: rows hold exactly `channels` samples.
            unsafe { ffi::cmsPipelineEval16(src.as_ptr(), dst.as_mut_ptr(), curves.0) };
        }
        Ok(())
    }
}

fn check_rows(in_len: usize, in_ch: usize, out_len: usize, out_ch: usize) -> CmmResult<()> {
    if in_ch == 0 || out_ch == 0 || in_len % in_ch != 0 || out_len % out_ch != 0 {
        return Err(invalid(format!(
            "buffers of {in_len}/{out_len} samples do not split into rows of {in_ch}/{out_ch}"
        )));
    }
    if in_len / in_ch != out_len / out_ch {
        return Err(invalid(format!(
            "{} input rows but {} output rows",
            in_len / in_ch,
            out_len / out_ch
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<u16> {
        (0..n).map(|i| (i * 65535 / (n - 1)) as u16).collect()
    }

    #[test]
    fn test_lut16_validation() {
        let pre = vec![ramp(2); 3];
        let post = vec![ramp(2); 3];
        assert!(Lut16::new(2, 3, vec![0; 24], pre.clone(), post.clone()).is_ok());
        assert!(Lut16::new(2, 3, vec![0; 23], pre.clone(), post.clone()).is_err());
        assert!(Lut16::new(1, 3, vec![0; 3], pre.clone(), post.clone()).is_err());
        assert!(Lut16::new(2, 3, vec![0; 24], vec![ramp(2); 2], post.clone()).is_err());
        assert!(Lut16::new(2, 4, vec![0; 32], pre.clone(), post).is_err());
        assert!(Lut16::new(2, 3, vec![0; 24], vec![vec![0]; 3], pre).is_err());
    }

    #[test]
    fn test_check_rows() {
        assert!(check_rows(6, 3, 8, 4).is_ok());
        assert!(check_rows(6, 3, 4, 4).is_err());
        assert!(check_rows(5, 3, 4, 4).is_err());
    }

    #[test]
    fn test_partial_header() {
        let profile = Profile::partial("desc", "cprt", true, [0.9642, 1.0, 0.8249]).unwrap();
        assert_eq!(profile.device_class(), crate::consts::class::OUTPUT);
        assert_eq!(profile.color_space(), crate::consts::space::RGB);
        assert_eq!(profile.pcs(), crate::consts::space::LAB);
        assert_eq!(profile.description().as_deref(), Some("desc"));
    }

    #[test]
    fn test_nul_rejected() {
        assert!(Profile::partial("a\0b", "c", false, [0.9642, 1.0, 0.8249]).is_err());
    }

    #[test]
    fn test_clut_first_stage_is_not_a_pre_table() {
        let profile = Profile::partial("d", "c", false, [0.9642, 1.0, 0.8249]).unwrap();
        let identity: Vec<u16> = (0..8u16)
            .flat_map(|i| [(i >> 2) & 1, (i >> 1) & 1, i & 1].map(|bit| bit * 65535))
            .collect();
        let mut pipeline = PipelineGuard::alloc(3, 3).unwrap();
        // SAFETY: `identity` holds 2^3 * 3 samples.
        let clut = unsafe { ffi::cmsStageAllocCLut16bit(ptr::null_mut(), 2, 3, 3, identity.as_ptr()) };
        pipeline.push(clut, "CLUT stage").unwrap();
        // SAFETY: lcms copies the pipeline into the tag.
        let ok = unsafe {
            ffi::cmsWriteTag(profile.handle(), LutTag::AToB0.signature(), pipeline.0.cast())
        };
        assert_ne!(ok, 0);

        assert_eq!(profile.lut_channels(LutTag::AToB0).unwrap(), (3, 3));
        let err = profile.pre_table_channels(LutTag::AToB0).unwrap_err();
        assert!(matches!(err, CmmError::TagFailed(_)));
        assert!(profile.eval_pre_table(LutTag::AToB0, &[0; 3], &mut [0; 3]).is_err());
    }

    #[test]
    fn test_missing_tag() {
        let profile = Profile::partial("d", "c", false, [0.9642, 1.0, 0.8249]).unwrap();
        let err = profile.eval_lut16(LutTag::AToB0, &[0; 3], &mut [0; 3]).unwrap_err();
        assert!(matches!(err, CmmError::TagNotFound(_)));
    }
}
