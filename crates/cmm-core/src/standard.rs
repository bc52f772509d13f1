//! Built-in RGB profiles.
//!
//! Profiles are synthesised with the safe `lcms2` API, serialised, and
//! reopened as native handles so they behave like any profile loaded from
//! memory.

use crate::{CmmError, CmmResult, Profile};
use lcms2::{CIExyY, CIExyYTRIPLE, Profile as LcmsProfile, ToneCurve};
use std::fmt;
use std::str::FromStr;

/// Standard RGB color spaces available without an ICC file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardProfile {
    /// IEC 61966-2-1 sRGB, the lcms built-in.
    Srgb,
    /// sRGB primaries with a linear transfer.
    LinearSrgb,
    /// Adobe RGB (1998).
    AdobeRgb,
    /// Display P3.
    DisplayP3,
    /// DCI-P3 with the DCI white.
    DciP3,
    /// ITU-R BT.709, gamma 2.4.
    Rec709,
    /// ITU-R BT.2020, gamma 2.4.
    Rec2020,
    /// ACES AP0, linear.
    AcesAp0,
    /// ACES AP1 / ACEScg, linear.
    AcesAp1,
}

impl StandardProfile {
    /// Every standard profile.
    pub const ALL: [StandardProfile; 9] = [
        StandardProfile::Srgb,
        StandardProfile::LinearSrgb,
        StandardProfile::AdobeRgb,
        StandardProfile::DisplayP3,
        StandardProfile::DciP3,
        StandardProfile::Rec709,
        StandardProfile::Rec2020,
        StandardProfile::AcesAp0,
        StandardProfile::AcesAp1,
    ];

    /// Lower-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            StandardProfile::Srgb => "srgb",
            StandardProfile::LinearSrgb => "linear-srgb",
            StandardProfile::AdobeRgb => "adobe-rgb",
            StandardProfile::DisplayP3 => "display-p3",
            StandardProfile::DciP3 => "dci-p3",
            StandardProfile::Rec709 => "rec709",
            StandardProfile::Rec2020 => "rec2020",
            StandardProfile::AcesAp0 => "aces-ap0",
            StandardProfile::AcesAp1 => "aces-ap1",
        }
    }

    /// White point, primaries and gamma; `None` for the lcms built-in sRGB.
    fn colorimetry(self) -> Option<(CIExyY, CIExyYTRIPLE, f64)> {
        let d65 = xy(0.3127, 0.3290);
        let aces = xy(0.32168, 0.33767);
        let srgb = triple((0.64, 0.33), (0.30, 0.60), (0.15, 0.06));
        let p3 = triple((0.680, 0.320), (0.265, 0.690), (0.150, 0.060));
        Some(match self {
            StandardProfile::Srgb => return None,
            StandardProfile::LinearSrgb => (d65, srgb, 1.0),
            StandardProfile::AdobeRgb => (d65, triple((0.64, 0.33), (0.21, 0.71), (0.15, 0.06)), 2.2),
            StandardProfile::DisplayP3 => (d65, p3, 2.2),
            StandardProfile::DciP3 => (xy(0.314, 0.351), p3, 2.6),
            StandardProfile::Rec709 => (d65, srgb, 2.4),
            StandardProfile::Rec2020 => {
                (d65, triple((0.708, 0.292), (0.170, 0.797), (0.131, 0.046)), 2.4)
            }
            StandardProfile::AcesAp0 => {
                (aces, triple((0.7347, 0.2653), (0.0, 1.0), (0.0001, -0.077)), 1.0)
            }
            StandardProfile::AcesAp1 => {
                (aces, triple((0.713, 0.293), (0.165, 0.830), (0.128, 0.044)), 1.0)
            }
        })
    }

    /// ICC data for this standard.
    pub fn to_icc(self) -> CmmResult<Vec<u8>> {
        let profile = match self.colorimetry() {
            None => LcmsProfile::new_srgb(),
            Some((white, primaries, gamma)) => {
                let curve = ToneCurve::new(gamma);
                let curves = [&curve, &curve, &curve];
                LcmsProfile::new_rgb(&white, &primaries, &curves)
                    .map_err(|e| CmmError::ProfileFailed(format!("{}: {}", self.name(), e)))?
            }
        };
        profile
            .icc()
            .map_err(|e| CmmError::ProfileFailed(format!("{}: {}", self.name(), e)))
    }

    /// Opens this standard as a native profile handle.
    pub fn to_profile(self) -> CmmResult<Profile> {
        match self {
            StandardProfile::Srgb => Profile::srgb(),
            _ => Profile::from_icc(&self.to_icc()?),
        }
    }
}

fn xy(x: f64, y: f64) -> CIExyY {
    CIExyY { x, y, Y: 1.0 }
}

fn triple(r: (f64, f64), g: (f64, f64), b: (f64, f64)) -> CIExyYTRIPLE {
    CIExyYTRIPLE { Red: xy(r.0, r.1), Green: xy(g.0, g.1), Blue: xy(b.0, b.1) }
}

impl fmt::Display for StandardProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardProfile {
    type Err = CmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase().replace('_', "-");
        StandardProfile::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| CmmError::UnknownName { kind: "standard profile", name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::space;

    #[test]
    fn test_all_standards() {
        for standard in StandardProfile::ALL {
            let profile = standard.to_profile().unwrap();
            assert_eq!(profile.color_space(), space::RGB, "{standard} should be RGB");
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Display_P3".parse::<StandardProfile>().unwrap(), StandardProfile::DisplayP3);
        assert_eq!("rec2020".parse::<StandardProfile>().unwrap(), StandardProfile::Rec2020);
        assert!("prophoto".parse::<StandardProfile>().is_err());
    }
}
