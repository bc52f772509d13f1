//! Module-level integer constants.

use cmm_core::consts::{class, error_code, flags, pixel_type, space};
use pyo3::prelude::*;

const ERROR_CODES: &[(&str, u32)] = &[
    ("cmsERROR_UNDEFINED", error_code::UNDEFINED),
    ("cmsERROR_FILE", error_code::FILE),
    ("cmsERROR_RANGE", error_code::RANGE),
    ("cmsERROR_INTERNAL", error_code::INTERNAL),
    ("cmsERROR_NULL", error_code::NULL),
    ("cmsERROR_READ", error_code::READ),
    ("cmsERROR_SEEK", error_code::SEEK),
    ("cmsERROR_WRITE", error_code::WRITE),
    ("cmsERROR_UNKNOWN_EXTENSION", error_code::UNKNOWN_EXTENSION),
    ("cmsERROR_COLORSPACE_CHECK", error_code::COLORSPACE_CHECK),
    ("cmsERROR_ALREADY_DEFINED", error_code::ALREADY_DEFINED),
    ("cmsERROR_BAD_SIGNATURE", error_code::BAD_SIGNATURE),
    ("cmsERROR_CORRUPTION_DETECTED", error_code::CORRUPTION_DETECTED),
    ("cmsERROR_NOT_SUITABLE", error_code::NOT_SUITABLE),
];

const CLASSES: &[(&str, u32)] = &[
    ("cmsSigInputClass", class::INPUT),
    ("cmsSigDisplayClass", class::DISPLAY),
    ("cmsSigOutputClass", class::OUTPUT),
    ("cmsSigLinkClass", class::LINK),
    ("cmsSigAbstractClass", class::ABSTRACT),
    ("cmsSigColorSpaceClass", class::COLOR_SPACE),
    ("cmsSigNamedColorClass", class::NAMED_COLOR),
];

const SPACES: &[(&str, u32)] = &[
    ("cmsSigXYZData", space::XYZ),
    ("cmsSigLabData", space::LAB),
    ("cmsSigLuvData", space::LUV),
    ("cmsSigYCbCrData", space::YCBCR),
    ("cmsSigYxyData", space::YXY),
    ("cmsSigRgbData", space::RGB),
    ("cmsSigGrayData", space::GRAY),
    ("cmsSigHsvData", space::HSV),
    ("cmsSigHlsData", space::HLS),
    ("cmsSigCmykData", space::CMYK),
    ("cmsSigCmyData", space::CMY),
    ("cmsSigMCH1Data", space::MCH1),
    ("cmsSigMCH2Data", space::MCH2),
    ("cmsSigMCH3Data", space::MCH3),
    ("cmsSigMCH4Data", space::MCH4),
    ("cmsSigMCH5Data", space::MCH5),
    ("cmsSigMCH6Data", space::MCH6),
    ("cmsSigMCH7Data", space::MCH7),
    ("cmsSigMCH8Data", space::MCH8),
    ("cmsSigMCH9Data", space::MCH9),
    ("cmsSigMCHAData", space::MCHA),
    ("cmsSigMCHBData", space::MCHB),
    ("cmsSigMCHCData", space::MCHC),
    ("cmsSigMCHDData", space::MCHD),
    ("cmsSigMCHEData", space::MCHE),
    ("cmsSigMCHFData", space::MCHF),
    ("cmsSigNamedData", space::NAMED),
    ("cmsSig1colorData", space::COLOR1),
    ("cmsSig2colorData", space::COLOR2),
    ("cmsSig3colorData", space::COLOR3),
    ("cmsSig4colorData", space::COLOR4),
    ("cmsSig5colorData", space::COLOR5),
    ("cmsSig6colorData", space::COLOR6),
    ("cmsSig7colorData", space::COLOR7),
    ("cmsSig8colorData", space::COLOR8),
    ("cmsSig9colorData", space::COLOR9),
    ("cmsSig10colorData", space::COLOR10),
    ("cmsSig11colorData", space::COLOR11),
    ("cmsSig12colorData", space::COLOR12),
    ("cmsSig13colorData", space::COLOR13),
    ("cmsSig14colorData", space::COLOR14),
    ("cmsSig15colorData", space::COLOR15),
    ("cmsSigLuvKData", space::LUVK),
];

const INTENTS: &[(&str, u32)] = &[
    ("INTENT_PERCEPTUAL", cmm_core::Intent::Perceptual as u32),
    ("INTENT_RELATIVE_COLORIMETRIC", cmm_core::Intent::RelativeColorimetric as u32),
    ("INTENT_SATURATION", cmm_core::Intent::Saturation as u32),
    ("INTENT_ABSOLUTE_COLORIMETRIC", cmm_core::Intent::AbsoluteColorimetric as u32),
];

const FLAGS: &[(&str, u32)] = &[
    ("cmsFLAGS_BLACKPOINTCOMPENSATION", flags::BLACKPOINTCOMPENSATION),
    ("cmsFLAGS_HIGHRESPRECALC", flags::HIGHRESPRECALC),
    ("cmsFLAGS_NULLTRANSFORM", flags::NULLTRANSFORM),
    ("cmsFLAGS_NOOPTIMIZE", flags::NOOPTIMIZE),
    ("cmsFLAGS_KEEP_SEQUENCE", flags::KEEP_SEQUENCE),
    ("cmsFLAGS_GAMUTCHECK", flags::GAMUTCHECK),
    ("cmsFLAGS_SOFTPROOFING", flags::SOFTPROOFING),
];

const PIXEL_TYPES: &[(&str, u32)] = &[
    ("PT_ANY", pixel_type::ANY),
    ("PT_GRAY", pixel_type::GRAY),
    ("PT_RGB", pixel_type::RGB),
    ("PT_CMY", pixel_type::CMY),
    ("PT_CMYK", pixel_type::CMYK),
    ("PT_YCbCr", pixel_type::YCBCR),
    ("PT_YUV", pixel_type::YUV),
    ("PT_XYZ", pixel_type::XYZ),
    ("PT_Lab", pixel_type::LAB),
    ("PT_YUVK", pixel_type::YUVK),
    ("PT_HSV", pixel_type::HSV),
    ("PT_HLS", pixel_type::HLS),
    ("PT_Yxy", pixel_type::YXY),
];

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    for table in [ERROR_CODES, CLASSES, SPACES, INTENTS, FLAGS, PIXEL_TYPES] {
        for &(name, value) in table {
            m.add(name, value)?;
        }
    }
    Ok(())
}
