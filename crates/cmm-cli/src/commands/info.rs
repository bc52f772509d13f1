//! Profile info command.

use crate::InfoArgs;
use anyhow::Result;
use cmm_core::consts::fourcc;
use cmm_core::{LutTag, Profile};

/// Prints header fields, lut tags and size of each profile.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for (i, spec) in args.input.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let profile = super::load_profile(spec)?;
        print!("{}", describe(spec, &profile, verbose)?);
    }
    Ok(())
}

fn describe(spec: &str, profile: &Profile, verbose: bool) -> Result<String> {
    let size = profile.to_icc()?.len() as u64;
    let b2a: Vec<&str> = profile.available_b2a_tags().into_iter().map(LutTag::name).collect();

    let mut out = format!("{spec}\n");
    out += &format!(
        "  Description: {}\n",
        profile.description().as_deref().unwrap_or("(none)")
    );
    out += &format!("  Class:       {}\n", fourcc(profile.device_class()));
    out += &format!("  Color space: {}\n", fourcc(profile.color_space()));
    out += &format!("  PCS:         {}\n", fourcc(profile.pcs()));
    out += &format!(
        "  B2A tags:    {}\n",
        if b2a.is_empty() { "(none)".to_string() } else { b2a.join(", ") }
    );
    out += &format!("  Size:        {}\n", super::format_size(size));

    if verbose {
        let present: Vec<&str> =
            LutTag::ALL.into_iter().filter(|t| profile.has_tag(*t)).map(LutTag::name).collect();
        out += &format!("  Lut tags:    {}\n", present.join(" "));
    }
    Ok(out)
}
