//! PNG conversion between profiles.
//!
//! The output keeps the input's layout and bit depth. Alpha is carried as an
//! extra channel and copied through unchanged.

use crate::ConvertArgs;
use crate::image::{self, Image, Samples};
use anyhow::{Context, Result, bail};
use cmm_core::consts::flags;
use cmm_core::{Profile, Transform};

pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    let input = image::read(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        width = input.width,
        height = input.height,
        "image loaded"
    );

    let source = match (&args.src, &input.icc) {
        (Some(spec), _) => super::load_profile(spec)?,
        (None, Some(icc)) => {
            tracing::info!("using embedded ICC profile");
            Profile::from_icc(icc).context("Embedded ICC profile is unusable")?
        }
        (None, None) => Profile::srgb()?,
    };
    let dest = super::load_profile(&args.dst)?;

    let transform = build_transform(&args, &source, &input, &dest)?;
    let output = apply(&transform, &input)?;
    image::write(&args.output, &output)?;

    if verbose {
        println!(
            "Converted {} -> {} ({}x{})",
            args.input.display(),
            args.output.display(),
            input.width,
            input.height
        );
    }
    Ok(())
}

fn build_transform(args: &ConvertArgs, source: &Profile, input: &Image, dest: &Profile) -> Result<Transform> {
    let format = input.format();
    let mut bits = 0;
    if args.bpc {
        bits |= flags::BLACKPOINTCOMPENSATION;
    }
    if input.alpha {
        bits |= flags::COPY_ALPHA;
    }

    let Some(proof) = &args.proof else {
        return Transform::new(source, format, dest, format, args.intent.into(), bits)
            .context("Failed to create transform");
    };

    let proof = super::load_profile(proof)?;
    if args.gamut_check {
        bits |= flags::GAMUTCHECK;
        cmm_core::set_alarm_codes(&alarm_codes(&args.alarm)?)?;
    }
    Transform::new_proofing(
        source,
        format,
        dest,
        format,
        &proof,
        args.intent.into(),
        args.proof_intent.into(),
        bits,
    )
    .context("Failed to create proofing transform")
}

/// Expands an 8-bit RGB alarm color to the 16-bit codes lcms expects.
fn alarm_codes(rgb: &[u8]) -> Result<Vec<u16>> {
    if rgb.len() != 3 {
        bail!("--alarm needs three values, got {}", rgb.len());
    }
    let mut codes = vec![0u16; cmm_core::consts::MAX_CHANNELS];
    for (code, &v) in codes.iter_mut().zip(rgb) {
        *code = u16::from(v) * 257;
    }
    Ok(codes)
}

fn apply(transform: &Transform, input: &Image) -> Result<Image> {
    let pixels = input.pixel_count();
    let samples = match &input.samples {
        Samples::U8(src) => {
            let mut dst = vec![0u8; src.len()];
            transform.apply(src, &mut dst, pixels)?;
            Samples::U8(dst)
        }
        Samples::U16(src) => {
            let mut dst = vec![0u16; src.len()];
            transform.apply(src, &mut dst, pixels)?;
            Samples::U16(dst)
        }
    };
    Ok(Image { samples, icc: None, ..*input })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmm_core::{Format, Intent, StandardProfile};

    #[test]
    fn test_alarm_codes() {
        let codes = alarm_codes(&[255, 0, 128]).unwrap();
        assert_eq!(codes.len(), 16);
        assert_eq!(&codes[..4], &[65535, 0, 32896, 0]);
        assert!(alarm_codes(&[1, 2]).is_err());
    }

    #[test]
    fn test_apply_keeps_alpha() {
        let srgb = Profile::srgb().unwrap();
        let p3 = StandardProfile::DisplayP3.to_profile().unwrap();
        let transform =
            Transform::new(&srgb, Format::RGBA_8, &p3, Format::RGBA_8, Intent::Perceptual, flags::COPY_ALPHA)
                .unwrap();
        let input = Image {
            width: 2,
            height: 1,
            alpha: true,
            samples: Samples::U8(vec![255, 0, 0, 17, 10, 200, 30, 250]),
            icc: None,
        };
        let output = apply(&transform, &input).unwrap();
        let Samples::U8(data) = output.samples else { panic!("sample type changed") };
        assert_eq!(data[3], 17);
        assert_eq!(data[7], 250);
        assert_ne!(&data[..3], &[255, 0, 0]);
    }
}
