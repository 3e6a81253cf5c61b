use std::collections::BTreeSet;

use crate::models::DetectedLicenses;

/// Licenses that count as violations when no configuration overrides them.
pub const DEFAULT_FORBIDDEN: [&str; 2] = ["GPL-3.0", "AGPL-3.0"];

/// Read-only forbidden-license list applied to every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    forbidden: BTreeSet<String>,
}

impl Policy {
    pub fn new<I, S>(forbidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            forbidden: forbidden.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_forbidden(&self, license: &str) -> bool {
        self.forbidden.contains(license)
    }

    /// Detected licenses that appear in the forbidden list (exact string match).
    pub fn violations(&self, detected: &DetectedLicenses) -> BTreeSet<String> {
        detected
            .iter()
            .filter(|license| self.is_forbidden(license))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LicenseHits;

    fn detected(licenses: &[&str]) -> DetectedLicenses {
        let mut hits = LicenseHits::new();
        hits.extend(licenses);
        hits.into_detected()
    }

    #[test]
    fn test_default_forbidden_list() {
        let policy = Policy::default();
        let found = policy.violations(&detected(&["MIT", "GPL-3.0", "AGPL-3.0", "GPL"]));
        assert_eq!(
            found,
            BTreeSet::from(["AGPL-3.0".to_string(), "GPL-3.0".to_string()])
        );
    }

    #[test]
    fn test_no_partial_matching() {
        // Only exact identifiers count; keyword hits like "GPL" do not.
        let policy = Policy::default();
        assert!(policy
            .violations(&detected(&["GPL", "LGPL", "GPL-3.0-only"]))
            .is_empty());
    }

    #[test]
    fn test_unknown_is_never_a_violation() {
        let policy = Policy::default();
        assert!(policy.violations(&DetectedLicenses::unknown()).is_empty());
    }

    #[test]
    fn test_custom_forbidden_list() {
        let policy = Policy::new(["MIT"]);
        let found = policy.violations(&detected(&["MIT", "GPL-3.0"]));
        assert_eq!(found, BTreeSet::from(["MIT".to_string()]));
    }
}
