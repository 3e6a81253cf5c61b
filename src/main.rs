//! `license-attest` — detect the licenses a dependency manifest points to,
//! flag forbidden ones, and compute a compliance score.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Collect manifests: a file, stdin, or the known manifests in a directory ([`detector`]).
//! 4. Scan each manifest ([`engine::Engine::scan`]): format dispatch to an [`analyzer`],
//!    optional [`registry`] lookups, keyword fallback and policy ([`license`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (compliant) or `1` (at least one violation).

mod analyzer;
mod cli;
mod config;
mod detector;
mod engine;
mod license;
mod models;
mod registry;
mod report;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use config::load_config;
use detector::{detect_format, find_manifests};
use engine::Engine;
use models::{Manifest, ManifestReport};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manifests = collect_manifests(&cli)?;
    if manifests.is_empty() {
        eprintln!("No supported manifests found in {}", cli.path.display());
        std::process::exit(1);
    }

    let project_dir = project_dir(&cli.path);
    let config = load_config(&project_dir, cli.config.as_deref())?;
    let engine = Engine::from_config(&config, cli.offline)?;

    let mut reports = Vec::with_capacity(manifests.len());
    for manifest in &manifests {
        let result = engine.scan(&manifest.name, &manifest.content).await;
        reports.push(ManifestReport {
            manifest: manifest.name.clone(),
            format: detect_format(&manifest.name),
            result,
        });
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&reports, cli.quiet),
        ReportFormat::Json => {
            let json = match reports.as_slice() {
                [single] => serde_json::to_string_pretty(&single.result)?,
                all => serde_json::to_string_pretty(all)?,
            };
            println!("{}", json);
        }
    }

    if reports.iter().any(|r| !r.result.is_compliant()) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "license_attest=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Directory whose `.license-attest/config.toml` applies to this run.
fn project_dir(path: &Path) -> PathBuf {
    if path.as_os_str() == "-" {
        return PathBuf::from(".");
    }
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if path.is_dir() {
        path
    } else {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn collect_manifests(cli: &Cli) -> Result<Vec<Manifest>> {
    if cli.path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read manifest from stdin")?;
        let name = cli.name.clone().unwrap_or_default();
        return Ok(vec![Manifest { name, content }]);
    }

    if cli.path.is_dir() {
        return find_manifests(&cli.path)
            .into_iter()
            .map(|path| read_manifest(&path, None))
            .collect();
    }

    Ok(vec![read_manifest(&cli.path, cli.name.as_deref())?])
}

/// Read a manifest from disk. The file name selects the format unless `name` overrides it.
fn read_manifest(path: &Path, name: Option<&str>) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    Ok(Manifest { name, content })
}
