use crate::license::keywords::KeywordTable;
use crate::models::{DetectedLicenses, LicenseHits};

/// Fallback analyzer for unrecognized manifests: keyword scan only.
pub struct GenericAnalyzer<'a> {
    keywords: &'a KeywordTable,
}

impl<'a> GenericAnalyzer<'a> {
    pub fn new(keywords: &'a KeywordTable) -> Self {
        Self { keywords }
    }
}

impl super::Analyzer for GenericAnalyzer<'_> {
    async fn analyze(&self, content: &str) -> DetectedLicenses {
        let mut hits = LicenseHits::new();
        self.keywords.scan_into(content, &mut hits);
        hits.into_detected()
    }
}
