use serde_json::Value;

use crate::license::keywords::KeywordTable;
use crate::models::{DetectedLicenses, LicenseHits};
use crate::registry::{Ecosystem, Lookup, RegistryClient};

/// Analyzer for npm `package.json` manifests.
///
/// Collects the project's own `license` field, registry licenses for each
/// declared dependency, and keyword hits over the raw text. Content that is
/// not valid JSON yields `Unknown` without a keyword scan.
pub struct NodeAnalyzer<'a> {
    keywords: &'a KeywordTable,
    registry: Option<&'a RegistryClient>,
    include_dev: bool,
}

impl<'a> NodeAnalyzer<'a> {
    pub fn new(
        keywords: &'a KeywordTable,
        registry: Option<&'a RegistryClient>,
        include_dev: bool,
    ) -> Self {
        Self {
            keywords,
            registry,
            include_dev,
        }
    }
}

impl super::Analyzer for NodeAnalyzer<'_> {
    async fn analyze(&self, content: &str) -> DetectedLicenses {
        let json: Value = match serde_json::from_str(content) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("package.json is not valid JSON ({}), reporting Unknown", e);
                return DetectedLicenses::unknown();
            }
        };

        let mut hits = LicenseHits::new();

        if let Some(license) = declared_license(&json) {
            hits.insert(license);
        }

        if let Some(registry) = self.registry {
            let names = dependency_names(&json, self.include_dev);
            let lookups = registry.lookup_all(Ecosystem::Npm, &names).await;
            let mut found = 0;
            for license in lookups.into_iter().filter_map(Lookup::license) {
                hits.insert(license);
                found += 1;
            }
            tracing::debug!("npm registry resolved {}/{} dependencies", found, names.len());
        }

        self.keywords.scan_into(content, &mut hits);
        hits.into_detected()
    }
}

/// Top-level `license`, as a string or as a legacy `{ "type": ... }` object.
fn declared_license(json: &Value) -> Option<&str> {
    match json.get("license")? {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("type").and_then(Value::as_str),
        _ => None,
    }
}

/// Package names under `dependencies` (and `devDependencies` when requested).
fn dependency_names(json: &Value, include_dev: bool) -> Vec<String> {
    let sections: &[&str] = if include_dev {
        &["dependencies", "devDependencies"]
    } else {
        &["dependencies"]
    };

    let mut names: Vec<String> = Vec::new();
    for section in sections {
        if let Some(pkgs) = json.get(section).and_then(Value::as_object) {
            for name in pkgs.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
    }
    names
}
