use crate::license::keywords::KeywordTable;
use crate::models::{DetectedLicenses, LicenseHits};
use crate::registry::{Ecosystem, Lookup, RegistryClient};

/// Registry licenses at or above this length are license bodies, not identifiers.
const MAX_LICENSE_LEN: usize = 100;

/// Analyzer for `requirements.txt`-style manifests.
///
/// Each requirement is looked up on PyPI; the raw text is then keyword-scanned.
pub struct PythonAnalyzer<'a> {
    keywords: &'a KeywordTable,
    registry: Option<&'a RegistryClient>,
}

impl<'a> PythonAnalyzer<'a> {
    pub fn new(keywords: &'a KeywordTable, registry: Option<&'a RegistryClient>) -> Self {
        Self { keywords, registry }
    }
}

impl super::Analyzer for PythonAnalyzer<'_> {
    async fn analyze(&self, content: &str) -> DetectedLicenses {
        let mut hits = LicenseHits::new();

        if let Some(registry) = self.registry {
            let names = requirement_names(content);
            let lookups = registry.lookup_all(Ecosystem::PyPi, &names).await;
            for license in lookups.into_iter().filter_map(Lookup::license) {
                let length = license.chars().count();
                if length < MAX_LICENSE_LEN {
                    hits.insert(license);
                } else {
                    tracing::debug!("discarding {}-character PyPI license text", length);
                }
            }
        }

        self.keywords.scan_into(content, &mut hits);
        hits.into_detected()
    }
}

/// Package names from a requirements list: the text before the first `=`, `<`
/// or `>` on each non-blank, non-comment line.
fn requirement_names(content: &str) -> Vec<String> {
    let mut names = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let name = line
            .split(['=', '<', '>'])
            .next()
            .unwrap_or(line)
            .trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    names
}
