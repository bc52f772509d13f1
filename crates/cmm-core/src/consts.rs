//! Numeric constants of the lcms API.
//!
//! These mirror the values of the C headers so callers can pass raw integers
//! across the binding without depending on `lcms2-sys` enums.

/// Error codes delivered to the log error handler.
#[allow(missing_docs)]
pub mod error_code {
    pub const UNDEFINED: u32 = 0;
    pub const FILE: u32 = 1;
    pub const RANGE: u32 = 2;
    pub const INTERNAL: u32 = 3;
    pub const NULL: u32 = 4;
    pub const READ: u32 = 5;
    pub const SEEK: u32 = 6;
    pub const WRITE: u32 = 7;
    pub const UNKNOWN_EXTENSION: u32 = 8;
    pub const COLORSPACE_CHECK: u32 = 9;
    pub const ALREADY_DEFINED: u32 = 10;
    pub const BAD_SIGNATURE: u32 = 11;
    pub const CORRUPTION_DETECTED: u32 = 12;
    pub const NOT_SUITABLE: u32 = 13;
}

/// Profile device class signatures.
#[allow(missing_docs)]
pub mod class {
    pub const INPUT: u32 = 0x7363_6E72; // 'scnr'
    pub const DISPLAY: u32 = 0x6D6E_7472; // 'mntr'
    pub const OUTPUT: u32 = 0x7072_7472; // 'prtr'
    pub const LINK: u32 = 0x6C69_6E6B; // 'link'
    pub const ABSTRACT: u32 = 0x6162_7374; // 'abst'
    pub const COLOR_SPACE: u32 = 0x7370_6163; // 'spac'
    pub const NAMED_COLOR: u32 = 0x6E6D_636C; // 'nmcl'
}

/// Color space signatures.
#[allow(missing_docs)]
pub mod space {
    pub const XYZ: u32 = 0x5859_5A20;
    pub const LAB: u32 = 0x4C61_6220;
    pub const LUV: u32 = 0x4C75_7620;
    pub const YCBCR: u32 = 0x5943_6272;
    pub const YXY: u32 = 0x5978_7920;
    pub const RGB: u32 = 0x5247_4220;
    pub const GRAY: u32 = 0x4752_4159;
    pub const HSV: u32 = 0x4853_5620;
    pub const HLS: u32 = 0x484C_5320;
    pub const CMYK: u32 = 0x434D_594B;
    pub const CMY: u32 = 0x434D_5920;
    pub const MCH1: u32 = 0x4D43_4831;
    pub const MCH2: u32 = 0x4D43_4832;
    pub const MCH3: u32 = 0x4D43_4833;
    pub const MCH4: u32 = 0x4D43_4834;
    pub const MCH5: u32 = 0x4D43_4835;
    pub const MCH6: u32 = 0x4D43_4836;
    pub const MCH7: u32 = 0x4D43_4837;
    pub const MCH8: u32 = 0x4D43_4838;
    pub const MCH9: u32 = 0x4D43_4839;
    pub const MCHA: u32 = 0x4D43_483A;
    pub const MCHB: u32 = 0x4D43_483B;
    pub const MCHC: u32 = 0x4D43_483C;
    pub const MCHD: u32 = 0x4D43_483D;
    pub const MCHE: u32 = 0x4D43_483E;
    pub const MCHF: u32 = 0x4D43_483F;
    pub const NAMED: u32 = 0x6E6D_636C;
    pub const COLOR1: u32 = 0x3143_4C52;
    pub const COLOR2: u32 = 0x3243_4C52;
    pub const COLOR3: u32 = 0x3343_4C52;
    pub const COLOR4: u32 = 0x3443_4C52;
    pub const COLOR5: u32 = 0x3543_4C52;
    pub const COLOR6: u32 = 0x3643_4C52;
    pub const COLOR7: u32 = 0x3743_4C52;
    pub const COLOR8: u32 = 0x3843_4C52;
    pub const COLOR9: u32 = 0x3943_4C52;
    pub const COLOR10: u32 = 0x4143_4C52;
    pub const COLOR11: u32 = 0x4243_4C52;
    pub const COLOR12: u32 = 0x4343_4C52;
    pub const COLOR13: u32 = 0x4443_4C52;
    pub const COLOR14: u32 = 0x4543_4C52;
    pub const COLOR15: u32 = 0x4643_4C52;
    pub const LUVK: u32 = 0x4C75_764B;
}

/// Transform creation flags.
#[allow(missing_docs)]
pub mod flags {
    pub const KEEP_SEQUENCE: u32 = 0x0080;
    pub const NOOPTIMIZE: u32 = 0x0100;
    pub const NULLTRANSFORM: u32 = 0x0200;
    pub const HIGHRESPRECALC: u32 = 0x0400;
    pub const GAMUTCHECK: u32 = 0x1000;
    pub const BLACKPOINTCOMPENSATION: u32 = 0x2000;
    pub const SOFTPROOFING: u32 = 0x4000;
    /// Copy extra channels (alpha) from input to output.
    pub const COPY_ALPHA: u32 = 0x0400_0000;
}

/// Pixel type codes used by [`crate::Format`].
#[allow(missing_docs)]
pub mod pixel_type {
    pub const ANY: u32 = 0;
    pub const GRAY: u32 = 3;
    pub const RGB: u32 = 4;
    pub const CMY: u32 = 5;
    pub const CMYK: u32 = 6;
    pub const YCBCR: u32 = 7;
    pub const YUV: u32 = 8;
    pub const XYZ: u32 = 9;
    pub const LAB: u32 = 10;
    pub const YUVK: u32 = 11;
    pub const HSV: u32 = 12;
    pub const HLS: u32 = 13;
    pub const YXY: u32 = 14;
}

/// Number of entries expected by [`crate::set_alarm_codes`].
pub const MAX_CHANNELS: usize = 16;

/// Renders a signature as its four-character code, e.g. `'RGB '`.
pub fn fourcc(sig: u32) -> String {
    sig.to_be_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc() {
        assert_eq!(fourcc(space::RGB), "RGB ");
        assert_eq!(fourcc(class::OUTPUT), "prtr");
        assert_eq!(fourcc(space::COLOR10), "ACLR");
        assert_eq!(fourcc(0x0000_0001), "????");
    }
}
