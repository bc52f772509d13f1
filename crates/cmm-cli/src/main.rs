//! cmm - ICC color conversion CLI
//!
//! Inspects profiles, converts PNG images between profiles and exports the
//! built-in standard profiles.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod image;

#[derive(Parser)]
#[command(name = "cmm")]
#[command(author, version, about = "ICC color conversion with Little CMS 2")]
#[command(long_about = "
Color management on the command line, backed by Little CMS 2.

Profiles are given as ICC file paths or as standard names:
srgb, linear-srgb, adobe-rgb, display-p3, dci-p3, rec709, rec2020,
aces-ap0, aces-ap1.

Examples:
  cmm info printer.icc                          # Show profile info
  cmm convert in.png out.png --dst display-p3   # Embedded or sRGB source
  cmm convert in.png out.png --src adobe-rgb --dst srgb --bpc
  cmm convert in.png proof.png --dst srgb --proof printer.icc --gamut-check
  cmm export rec2020 rec2020.icc                # Write a standard profile

Set CMM_LOG (e.g. CMM_LOG=debug) to control log output.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display profile information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert a PNG image between profiles
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Write a standard profile to an ICC file
    Export(ExportArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// ICC file(s) or standard profile name(s)
    #[arg(required = true)]
    input: Vec<String>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input PNG (RGB or RGBA, 8 or 16 bit)
    input: PathBuf,

    /// Output PNG, same layout as the input
    output: PathBuf,

    /// Source profile (default: embedded ICC, else sRGB)
    #[arg(short, long)]
    src: Option<String>,

    /// Destination profile
    #[arg(short, long)]
    dst: String,

    /// Soft-proof through this profile
    #[arg(short, long)]
    proof: Option<String>,

    /// Rendering intent
    #[arg(short, long, value_enum, default_value_t = IntentArg::Perceptual)]
    intent: IntentArg,

    /// Rendering intent for the proof profile
    #[arg(long, value_enum, default_value_t = IntentArg::Relative)]
    proof_intent: IntentArg,

    /// Black point compensation
    #[arg(long)]
    bpc: bool,

    /// Mark colors outside the proof gamut (requires --proof)
    #[arg(long, requires = "proof")]
    gamut_check: bool,

    /// Alarm color for --gamut-check as R,G,B in 0..255
    #[arg(long, value_delimiter = ',', num_args = 3, default_values_t = [255u8, 0, 255])]
    alarm: Vec<u8>,
}

#[derive(Args)]
struct ExportArgs {
    /// Standard profile name
    name: String,

    /// Output ICC file
    output: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IntentArg {
    Perceptual,
    Relative,
    Saturation,
    Absolute,
}

impl From<IntentArg> for cmm_core::Intent {
    fn from(arg: IntentArg) -> Self {
        match arg {
            IntentArg::Perceptual => cmm_core::Intent::Perceptual,
            IntentArg::Relative => cmm_core::Intent::RelativeColorimetric,
            IntentArg::Saturation => cmm_core::Intent::Saturation,
            IntentArg::Absolute => cmm_core::Intent::AbsoluteColorimetric,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CMM_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Export(args) => commands::export::run(args, cli.verbose),
    }
}
