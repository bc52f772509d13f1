//! Python bindings for cmm.
//!
//! Flat function surface over Little CMS 2: profiles and transforms are
//! opaque handles, pixel buffers are numpy arrays.
//!
//! # Example
//! ```python
//! import numpy as np
//! import cmm
//!
//! srgb = cmm.create_srgb_profile()
//! p3 = cmm.create_standard_profile("display-p3")
//! fmt = cmm.get_transform_formatter(0, cmm.PT_RGB, 3, 1, 0, 0)
//! tr = cmm.create_transform(srgb, fmt, p3, fmt,
//!                           cmm.INTENT_RELATIVE_COLORIMETRIC,
//!                           cmm.cmsFLAGS_BLACKPOINTCOMPENSATION)
//!
//! src = np.zeros((1080, 1920, 3), dtype=np.uint8)
//! dst = np.zeros_like(src)
//! cmm.do_transform_8_8(tr, src, dst, src.size // 3)
//! ```

use pyo3::prelude::*;

mod consts;
mod error;
mod handle;
mod handler;
mod lut;
mod profile;
mod transform;

pub use handle::{Profile, Transform};

/// cmm - Color management module
#[pymodule]
fn cmm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__lcms_version__", cmm_core::lcms_version())?;

    m.add_class::<Profile>()?;
    m.add_class::<Transform>()?;

    handler::register(m)?;
    profile::register(m)?;
    transform::register(m)?;
    lut::register(m)?;
    consts::register(m)?;

    Ok(())
}
