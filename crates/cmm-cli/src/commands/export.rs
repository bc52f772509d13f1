//! Standard profile export.

use crate::ExportArgs;
use anyhow::{Context, Result};
use cmm_core::StandardProfile;

pub fn run(args: ExportArgs, verbose: bool) -> Result<()> {
    let standard: StandardProfile = args.name.parse()?;
    let data = standard.to_icc()?;
    std::fs::write(&args.output, &data)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    tracing::info!(profile = %standard, bytes = data.len(), "profile exported");
    if verbose {
        println!("Wrote {} ({}) to {}", standard, super::format_size(data.len() as u64), args.output.display());
    }
    Ok(())
}
