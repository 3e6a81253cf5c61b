use std::collections::BTreeSet;

use serde::Serialize;

/// Sentinel reported when a manifest yields no license signal at all.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// Manifest formats the engine knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    Npm,
    Python,
    Maven,
    GoMod,
    Cargo,
    Generic,
}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestFormat::Npm => write!(f, "npm"),
            ManifestFormat::Python => write!(f, "python"),
            ManifestFormat::Maven => write!(f, "maven"),
            ManifestFormat::GoMod => write!(f, "gomod"),
            ManifestFormat::Cargo => write!(f, "cargo"),
            ManifestFormat::Generic => write!(f, "generic"),
        }
    }
}

/// A manifest as handed to the engine: a name used only for format
/// selection, and its decoded text.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub name: String,
    pub content: String,
}

/// Accumulator for license identifiers found while analyzing one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseHits(BTreeSet<String>);

impl LicenseHits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a license identifier. Blank values are ignored.
    pub fn insert(&mut self, license: impl AsRef<str>) {
        let license = license.as_ref().trim();
        if !license.is_empty() {
            self.0.insert(license.to_string());
        }
    }

    /// Close the accumulator, substituting [`UNKNOWN_LICENSE`] when nothing was found.
    pub fn into_detected(self) -> DetectedLicenses {
        if self.0.is_empty() {
            DetectedLicenses::unknown()
        } else {
            DetectedLicenses(self.0)
        }
    }
}

impl<S: AsRef<str>> Extend<S> for LicenseHits {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for license in iter {
            self.insert(license);
        }
    }
}

/// Deduplicated license identifiers detected in a manifest. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DetectedLicenses(BTreeSet<String>);

impl DetectedLicenses {
    pub fn unknown() -> Self {
        DetectedLicenses(BTreeSet::from([UNKNOWN_LICENSE.to_string()]))
    }

    pub fn is_unknown(&self) -> bool {
        self.0.len() == 1 && self.0.contains(UNKNOWN_LICENSE)
    }

    pub fn contains(&self, license: &str) -> bool {
        self.0.contains(license)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Outcome of a single scan: `{ detected, violations, compliance_score }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub detected: DetectedLicenses,
    pub violations: BTreeSet<String>,
    pub compliance_score: u32,
}

impl ScanResult {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A scan result tagged with the manifest it came from, for multi-manifest runs.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestReport {
    pub manifest: String,
    pub format: ManifestFormat,
    #[serde(flatten)]
    pub result: ScanResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hits_become_unknown() {
        let detected = LicenseHits::new().into_detected();
        assert!(detected.is_unknown());
        assert_eq!(detected.iter().collect::<Vec<_>>(), vec!["Unknown"]);
    }

    #[test]
    fn test_hits_are_trimmed_and_deduplicated() {
        let mut hits = LicenseHits::new();
        hits.insert(" MIT ");
        hits.insert("MIT");
        hits.insert("   ");
        hits.extend(["Apache-2.0", "MIT"]);
        let detected = hits.into_detected();
        assert_eq!(detected.len(), 2);
        assert!(detected.contains("MIT"));
        assert!(!detected.is_unknown());
    }

    #[test]
    fn test_scan_result_serializes_to_output_contract() {
        let mut hits = LicenseHits::new();
        hits.extend(["MIT", "GPL-3.0"]);
        let result = ScanResult {
            detected: hits.into_detected(),
            violations: BTreeSet::from(["GPL-3.0".to_string()]),
            compliance_score: 80,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "detected": ["GPL-3.0", "MIT"],
                "violations": ["GPL-3.0"],
                "compliance_score": 80
            })
        );
    }

    #[test]
    fn test_manifest_report_flattens_result() {
        let report = ManifestReport {
            manifest: "go.mod".to_string(),
            format: ManifestFormat::GoMod,
            result: ScanResult {
                detected: DetectedLicenses::unknown(),
                violations: BTreeSet::new(),
                compliance_score: 100,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["format"], "gomod");
        assert_eq!(json["detected"], serde_json::json!(["Unknown"]));
        assert_eq!(json["compliance_score"], 100);
    }
}
