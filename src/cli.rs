use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-attest",
    about = "Detect dependency licenses in a manifest and score policy compliance",
    version
)]
pub struct Cli {
    /// Manifest file, project directory, or `-` for stdin
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Manifest name used for format selection (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Skip package registry lookups
    #[arg(long)]
    pub offline: bool,

    /// Config file [default: ./.license-attest/config.toml, fallback ~/.config/license-attest/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print one summary line per manifest
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
