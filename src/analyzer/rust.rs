use crate::license::keywords::KeywordTable;
use crate::models::{DetectedLicenses, LicenseHits};

/// Analyzer for `Cargo.toml` manifests.
///
/// A single line-oriented pass rather than a TOML parse: any line whose key
/// starts with `license` contributes its quoted value. This also picks up
/// `license-file` paths.
pub struct RustAnalyzer<'a> {
    keywords: &'a KeywordTable,
}

impl<'a> RustAnalyzer<'a> {
    pub fn new(keywords: &'a KeywordTable) -> Self {
        Self { keywords }
    }
}

impl super::Analyzer for RustAnalyzer<'_> {
    async fn analyze(&self, content: &str) -> DetectedLicenses {
        let mut hits = LicenseHits::new();

        for line in content.lines() {
            if let Some(value) = license_value(line) {
                hits.insert(value);
            }
        }

        self.keywords.scan_into(content, &mut hits);
        hits.into_detected()
    }
}

/// Right-hand side of a `license... = "value"` line, quotes stripped.
fn license_value(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let prefix = trimmed.get(..7)?;
    if !prefix.eq_ignore_ascii_case("license") {
        return None;
    }

    let (_, value) = trimmed.split_once('=')?;
    let value = value.trim().trim_matches('"');
    (!value.is_empty()).then_some(value)
}
