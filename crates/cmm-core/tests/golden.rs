//! Pixel output checked against the safe `lcms2` API as reference.
//!
//! Both paths end in the same engine, so any difference comes from the
//! binding: wrong formats, wrong flags, or misaligned buffers.

use cmm_core::consts::flags;
use cmm_core::{Format, Intent, Profile, StandardProfile, Transform};
use lcms2::{Flags, PixelFormat};

/// 8x8x8 RGB cube, 512 pixels.
fn rgb_cube_8() -> Vec<[u8; 3]> {
    let step = |i: u32| (i * 255 / 7) as u8;
    let mut cube = Vec::with_capacity(512);
    for r in 0..8 {
        for g in 0..8 {
            for b in 0..8 {
                cube.push([step(r), step(g), step(b)]);
            }
        }
    }
    cube
}

fn reference(
    src: StandardProfile,
    dst: StandardProfile,
    intent: lcms2::Intent,
    pixels: &[[u8; 3]],
) -> Vec<[u8; 3]> {
    let src = lcms2::Profile::new_icc(&src.to_icc().unwrap()).unwrap();
    let dst = lcms2::Profile::new_icc(&dst.to_icc().unwrap()).unwrap();
    let transform = lcms2::Transform::<[u8; 3], [u8; 3]>::new_flags(
        &src,
        PixelFormat::RGB_8,
        &dst,
        PixelFormat::RGB_8,
        intent,
        Flags::BLACKPOINT_COMPENSATION,
    )
    .unwrap();
    let mut out = vec![[0u8; 3]; pixels.len()];
    transform.transform_pixels(pixels, &mut out);
    out
}

fn binding(src: StandardProfile, dst: StandardProfile, intent: Intent, pixels: &[[u8; 3]]) -> Vec<u8> {
    let src = Profile::from_icc(&src.to_icc().unwrap()).unwrap();
    let dst = Profile::from_icc(&dst.to_icc().unwrap()).unwrap();
    let transform = Transform::new(
        &src,
        Format::RGB_8,
        &dst,
        Format::RGB_8,
        intent,
        flags::BLACKPOINTCOMPENSATION,
    )
    .unwrap();
    // Profiles may go away once the transform exists.
    drop(src);
    drop(dst);

    let input: Vec<u8> = pixels.iter().flatten().copied().collect();
    let mut output = vec![0u8; input.len()];
    transform.apply(&input, &mut output, pixels.len()).unwrap();
    output
}

#[test]
fn srgb_to_display_p3_matches_reference() {
    let cube = rgb_cube_8();
    let expected = reference(
        StandardProfile::Srgb,
        StandardProfile::DisplayP3,
        lcms2::Intent::RelativeColorimetric,
        &cube,
    );
    let actual = binding(
        StandardProfile::Srgb,
        StandardProfile::DisplayP3,
        Intent::RelativeColorimetric,
        &cube,
    );
    let expected: Vec<u8> = expected.into_iter().flatten().collect();
    assert_eq!(actual, expected);
}

#[test]
fn adobe_to_rec2020_matches_reference() {
    let cube = rgb_cube_8();
    let expected = reference(
        StandardProfile::AdobeRgb,
        StandardProfile::Rec2020,
        lcms2::Intent::Perceptual,
        &cube,
    );
    let actual = binding(StandardProfile::AdobeRgb, StandardProfile::Rec2020, Intent::Perceptual, &cube);
    let expected: Vec<u8> = expected.into_iter().flatten().collect();
    assert_eq!(actual, expected);
}

#[test]
fn rgba_alpha_is_carried() {
    let srgb = Profile::srgb().unwrap();
    let linear = StandardProfile::LinearSrgb.to_profile().unwrap();
    let transform = Transform::new(
        &srgb,
        Format::RGBA_8,
        &linear,
        Format::RGBA_8,
        Intent::Perceptual,
        flags::BLACKPOINTCOMPENSATION | flags::COPY_ALPHA,
    )
    .unwrap();

    let input = [128u8, 128, 128, 77, 255, 255, 255, 200];
    let mut output = [0u8; 8];
    transform.apply(&input, &mut output, 2).unwrap();

    // Mid gray darkens when linearised, white stays white.
    assert!(output[0] < 100);
    assert!(output[4] >= 254);
    assert_eq!(output[3], 77);
    assert_eq!(output[7], 200);
}

#[test]
fn sixteen_bit_output_tracks_eight_bit() {
    let srgb = Profile::srgb().unwrap();
    let p3 = StandardProfile::DisplayP3.to_profile().unwrap();
    let t8 = Transform::new(&srgb, Format::RGB_8, &p3, Format::RGB_8, Intent::Perceptual, 0).unwrap();
    let t16 = Transform::new(&srgb, Format::RGB_8, &p3, Format::RGB_16, Intent::Perceptual, 0).unwrap();

    let input: Vec<u8> = rgb_cube_8().into_iter().flatten().collect();
    let pixels = input.len() / 3;
    let mut out8 = vec![0u8; input.len()];
    let mut out16 = vec![0u16; input.len()];
    t8.apply(&input, &mut out8, pixels).unwrap();
    t16.apply(&input, &mut out16, pixels).unwrap();

    for (a, b) in out8.iter().zip(out16.iter()) {
        let scaled = (*b as f64 / 257.0).round();
        approx::assert_abs_diff_eq!(*a as f64, scaled, epsilon = 1.0);
    }
}

#[test]
fn proofing_with_gamut_check_paints_alarm() {
    let srgb = Profile::srgb().unwrap();
    let rec2020 = StandardProfile::Rec2020.to_profile().unwrap();
    cmm_core::set_alarm_codes(&[0xFFFF, 0, 0xFFFF, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();

    // Rec.2020 green is far outside sRGB.
    let transform = Transform::new_proofing(
        &rec2020,
        Format::RGB_8,
        &srgb,
        Format::RGB_8,
        &srgb,
        Intent::RelativeColorimetric,
        Intent::RelativeColorimetric,
        flags::GAMUTCHECK,
    )
    .unwrap();
    let mut output = [0u8; 6];
    transform.apply(&[0u8, 255, 0, 128, 128, 128], &mut output, 2).unwrap();
    assert_eq!(&output[..3], &[255, 0, 255]);
    assert_ne!(&output[3..], &[255, 0, 255]);
}
