//! Scan orchestration: format dispatch, violation classification and scoring.

use anyhow::Result;

use crate::analyzer::generic::GenericAnalyzer;
use crate::analyzer::go::GoAnalyzer;
use crate::analyzer::java::JavaAnalyzer;
use crate::analyzer::node::NodeAnalyzer;
use crate::analyzer::python::PythonAnalyzer;
use crate::analyzer::rust::RustAnalyzer;
use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::detector::detect_format;
use crate::license::keywords::KeywordTables;
use crate::license::policy::Policy;
use crate::models::{DetectedLicenses, ManifestFormat, ScanResult};
use crate::registry::RegistryClient;

/// Points deducted from the compliance score per violation.
const VIOLATION_PENALTY: u32 = 20;
const MAX_SCORE: u32 = 100;

/// Read-only state shared by every scan: keyword tables, the forbidden list,
/// and an optional registry client.
pub struct Engine {
    keywords: KeywordTables,
    policy: Policy,
    registry: Option<RegistryClient>,
    include_dev: bool,
}

impl Engine {
    /// `include_dev` also looks up `devDependencies` of npm manifests.
    pub fn new(
        keywords: KeywordTables,
        policy: Policy,
        registry: Option<RegistryClient>,
        include_dev: bool,
    ) -> Self {
        Self {
            keywords,
            policy,
            registry,
            include_dev,
        }
    }

    /// Build an engine from configuration. `offline` disables registry lookups
    /// regardless of `registry.enabled`.
    pub fn from_config(config: &Config, offline: bool) -> Result<Self> {
        let registry = if config.registry.enabled && !offline {
            Some(RegistryClient::new(&config.registry)?)
        } else {
            None
        };

        Ok(Self::new(
            KeywordTables::standard()?,
            Policy::new(config.policy.forbidden.iter().cloned()),
            registry,
            config.registry.include_dev_dependencies,
        ))
    }

    /// Scan one manifest. Never fails; the worst case is an `Unknown`
    /// detection with a perfect score.
    pub async fn scan(&self, name: &str, content: &str) -> ScanResult {
        let format = detect_format(name);
        let detected = self.detect(format, content).await;
        if detected.is_unknown() {
            tracing::debug!("no license signal in {:?}", name);
        }
        let violations = self.policy.violations(&detected);
        let compliance_score = compliance_score(violations.len());

        tracing::info!(
            "{} ({}): {} license(s), {} violation(s), score {}",
            if name.is_empty() { "<unnamed>" } else { name },
            format,
            detected.len(),
            violations.len(),
            compliance_score
        );

        ScanResult {
            detected,
            violations,
            compliance_score,
        }
    }

    async fn detect(&self, format: ManifestFormat, content: &str) -> DetectedLicenses {
        let registry = self.registry.as_ref();
        match format {
            ManifestFormat::Npm => {
                NodeAnalyzer::new(&self.keywords.fallback, registry, self.include_dev)
                    .analyze(content)
                    .await
            }
            ManifestFormat::Python => {
                PythonAnalyzer::new(&self.keywords.fallback, registry)
                    .analyze(content)
                    .await
            }
            ManifestFormat::Maven => JavaAnalyzer::new(&self.keywords.fallback).analyze(content).await,
            ManifestFormat::GoMod => GoAnalyzer::new(&self.keywords.gomod).analyze(content).await,
            ManifestFormat::Cargo => RustAnalyzer::new(&self.keywords.fallback).analyze(content).await,
            ManifestFormat::Generic => {
                GenericAnalyzer::new(&self.keywords.generic)
                    .analyze(content)
                    .await
            }
        }
    }
}

/// `max(0, 100 - 20 * violations)`.
pub fn compliance_score(violations: usize) -> u32 {
    let violations = u32::try_from(violations).unwrap_or(u32::MAX);
    MAX_SCORE.saturating_sub(violations.saturating_mul(VIOLATION_PENALTY))
}
