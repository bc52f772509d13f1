//! CLI command implementations

pub mod convert;
pub mod export;
pub mod info;

use anyhow::{Context, Result};
use cmm_core::{Profile, StandardProfile};
use std::path::Path;

/// Opens a profile from an ICC path, falling back to a standard name.
pub fn load_profile(spec: &str) -> Result<Profile> {
    let path = Path::new(spec);
    if path.is_file() {
        let data = std::fs::read(path).with_context(|| format!("Failed to read: {spec}"))?;
        return Profile::from_icc(&data).with_context(|| format!("Not a usable ICC profile: {spec}"));
    }
    let standard: StandardProfile = spec
        .parse()
        .with_context(|| format!("No such file and not a standard profile: {spec}"))?;
    Profile::from_standard(standard).with_context(|| format!("Failed to create {standard}"))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_standard_name() {
        let profile = load_profile("display-p3").unwrap();
        assert_eq!(profile.color_space(), cmm_core::consts::space::RGB);
        assert!(load_profile("no-such-profile").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.icc");
        std::fs::write(&path, StandardProfile::Rec2020.to_icc().unwrap()).unwrap();
        assert!(load_profile(path.to_str().unwrap()).is_ok());

        let bad = dir.path().join("bad.icc");
        std::fs::write(&bad, b"    ").unwrap();
        assert!(load_profile(bad.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(3 * 1024), "3.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024 / 2), "2.50 MB");
    }
}
