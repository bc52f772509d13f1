//! LUT-bearing tag names.

use crate::CmmError;
use lcms2_sys as ffi;
use std::fmt;
use std::str::FromStr;

/// A tag holding a pipeline (AToB, BToA or gamut).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutTag {
    /// `A2B0`, device to PCS, perceptual.
    AToB0,
    /// `A2B1`, device to PCS, colorimetric.
    AToB1,
    /// `A2B2`, device to PCS, saturation.
    AToB2,
    /// `B2A0`, PCS to device, perceptual.
    BToA0,
    /// `B2A1`, PCS to device, colorimetric.
    BToA1,
    /// `B2A2`, PCS to device, saturation.
    BToA2,
    /// `gamt`, out-of-gamut test.
    Gamut,
}

impl LutTag {
    /// All tags, in ICC order.
    pub const ALL: [LutTag; 7] = [
        LutTag::AToB0,
        LutTag::AToB1,
        LutTag::AToB2,
        LutTag::BToA0,
        LutTag::BToA1,
        LutTag::BToA2,
        LutTag::Gamut,
    ];

    /// The four-character name used on the Python side.
    pub fn name(self) -> &'static str {
        match self {
            LutTag::AToB0 => "A2B0",
            LutTag::AToB1 => "A2B1",
            LutTag::AToB2 => "A2B2",
            LutTag::BToA0 => "B2A0",
            LutTag::BToA1 => "B2A1",
            LutTag::BToA2 => "B2A2",
            LutTag::Gamut => "gamt",
        }
    }

    pub(crate) fn signature(self) -> ffi::TagSignature {
        match self {
            LutTag::AToB0 => ffi::TagSignature::AToB0Tag,
            LutTag::AToB1 => ffi::TagSignature::AToB1Tag,
            LutTag::AToB2 => ffi::TagSignature::AToB2Tag,
            LutTag::BToA0 => ffi::TagSignature::BToA0Tag,
            LutTag::BToA1 => ffi::TagSignature::BToA1Tag,
            LutTag::BToA2 => ffi::TagSignature::BToA2Tag,
            LutTag::Gamut => ffi::TagSignature::GamutTag,
        }
    }
}

impl fmt::Display for LutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LutTag {
    type Err = CmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LutTag::ALL
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| CmmError::UnknownName { kind: "tag", name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        for tag in LutTag::ALL {
            assert_eq!(tag.name().parse::<LutTag>().unwrap(), tag);
        }
        assert!("b2a0".parse::<LutTag>().is_err());
        assert!("GAMT".parse::<LutTag>().is_err());
    }
}
