//! Authoring partial profiles with lut16 tags and reading them back.

use approx::assert_abs_diff_eq;
use cmm_core::consts::{class, space};
use cmm_core::{Format, Intent, Lut16, LutTag, Profile, Transform};

const D50: [f64; 3] = [0.9642, 1.0, 0.8249];

fn ramp(n: usize) -> Vec<u16> {
    (0..n).map(|i| (i * 65535 / (n - 1)) as u16).collect()
}

/// Grid where every node maps to its own coordinates.
fn identity_lut(grid: usize) -> Lut16 {
    let axis = ramp(grid);
    let mut clut = Vec::with_capacity(grid * grid * grid * 3);
    for r in 0..grid {
        for g in 0..grid {
            for b in 0..grid {
                clut.extend_from_slice(&[axis[r], axis[g], axis[b]]);
            }
        }
    }
    Lut16::new(grid, 3, clut, vec![ramp(256); 3], vec![ramp(256); 3]).unwrap()
}

fn authored() -> Profile {
    let mut profile = Profile::partial("Test printer", "No copyright", true, D50).unwrap();
    let lut = identity_lut(9);
    profile.write_lut16(LutTag::AToB0, &lut).unwrap();
    profile.write_lut16(LutTag::BToA1, &lut).unwrap();
    profile.link_tag(LutTag::AToB1, LutTag::AToB0).unwrap();
    profile.link_tag(LutTag::AToB2, LutTag::AToB0).unwrap();
    profile.link_tag(LutTag::BToA0, LutTag::BToA1).unwrap();
    profile.link_tag(LutTag::BToA2, LutTag::BToA1).unwrap();
    profile.write_lut16(LutTag::Gamut, &Lut16::new(2, 1, vec![0; 8], vec![ramp(2); 3], vec![ramp(2)]).unwrap()).unwrap();
    profile
}

#[test]
fn identity_lut_evaluates_to_input() {
    let profile = authored();
    assert_eq!(profile.lut_channels(LutTag::AToB0).unwrap(), (3, 3));

    let input = [0u16, 0, 0, 65535, 65535, 65535, 8192, 32768, 49152, 1000, 60000, 30000];
    let mut output = [0u16; 12];
    profile.eval_lut16(LutTag::AToB0, &input, &mut output).unwrap();
    for (a, b) in input.iter().zip(output.iter()) {
        assert_abs_diff_eq!(*a as f64, *b as f64, epsilon = 2.0);
    }
}

#[test]
fn pre_table_is_evaluated_alone() {
    let mut profile = Profile::partial("pre", "c", false, D50).unwrap();
    // Inverting pre-table, identity everything else.
    let inverted: Vec<u16> = ramp(256).into_iter().rev().collect();
    let grid = 2;
    let axis = ramp(grid);
    let mut clut = Vec::new();
    for r in 0..grid {
        for g in 0..grid {
            for b in 0..grid {
                clut.extend_from_slice(&[axis[r], axis[g], axis[b]]);
            }
        }
    }
    let lut = Lut16::new(grid, 3, clut, vec![inverted; 3], vec![ramp(2); 3]).unwrap();
    profile.write_lut16(LutTag::AToB0, &lut).unwrap();

    assert_eq!(profile.pre_table_channels(LutTag::AToB0).unwrap(), 3);
    let mut output = [0u16; 3];
    profile.eval_pre_table(LutTag::AToB0, &[0, 65535, 0], &mut output).unwrap();
    assert_eq!(output, [65535, 0, 65535]);

    let err = profile.eval_pre_table(LutTag::AToB0, &[0, 0], &mut output);
    assert!(err.is_err());
}

#[test]
fn linked_b2a_tags_collapse() {
    let profile = authored();
    assert_eq!(profile.available_b2a_tags(), vec![LutTag::BToA1]);

    let mut separate = Profile::partial("sep", "c", false, D50).unwrap();
    separate.write_lut16(LutTag::BToA1, &identity_lut(2)).unwrap();
    separate.write_lut16(LutTag::BToA0, &identity_lut(2)).unwrap();
    assert_eq!(separate.available_b2a_tags(), vec![LutTag::BToA1, LutTag::BToA0]);

    let empty = Profile::partial("empty", "c", false, D50).unwrap();
    assert!(empty.available_b2a_tags().is_empty());
}

#[test]
fn dumped_profile_reopens() {
    let data = authored().to_icc().unwrap();
    assert_eq!(&data[80..84], b"ZYGO");
    assert_eq!(&data[36..40], b"acsp");

    let reopened = Profile::from_icc(&data).unwrap();
    assert_eq!(reopened.device_class(), class::OUTPUT);
    assert_eq!(reopened.color_space(), space::RGB);
    assert_eq!(reopened.pcs(), space::LAB);
    assert_eq!(reopened.description().as_deref(), Some("Test printer"));
    assert!(reopened.has_tag(LutTag::Gamut));
    assert_eq!(reopened.available_b2a_tags(), vec![LutTag::BToA1]);

    let mut output = [0u16; 3];
    reopened.eval_lut16(LutTag::AToB1, &[32768, 16384, 49152], &mut output).unwrap();
    assert_abs_diff_eq!(output[0] as f64, 32768.0, epsilon = 2.0);
}

#[test]
fn authored_profile_builds_transform() {
    let srgb = Profile::srgb().unwrap();
    let printer = Profile::from_icc(&authored().to_icc().unwrap()).unwrap();
    let transform =
        Transform::new(&srgb, Format::RGB_8, &printer, Format::RGB_8, Intent::RelativeColorimetric, 0);
    assert!(transform.is_ok());
}
