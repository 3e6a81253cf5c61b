use std::path::{Path, PathBuf};

use crate::models::ManifestFormat;

/// Manifest file names, in format-selection priority order.
pub const MANIFEST_NAMES: [(&str, ManifestFormat); 5] = [
    ("package.json", ManifestFormat::Npm),
    ("requirements.txt", ManifestFormat::Python),
    ("pom.xml", ManifestFormat::Maven),
    ("go.mod", ManifestFormat::GoMod),
    ("Cargo.toml", ManifestFormat::Cargo),
];

/// Select a manifest format from its file name by suffix match.
///
/// Content is never consulted; anything unrecognized (including an empty
/// name) falls back to [`ManifestFormat::Generic`].
pub fn detect_format(name: &str) -> ManifestFormat {
    MANIFEST_NAMES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, format)| *format)
        .unwrap_or(ManifestFormat::Generic)
}

/// List the known manifests present directly inside `dir`.
pub fn find_manifests(dir: &Path) -> Vec<PathBuf> {
    MANIFEST_NAMES
        .iter()
        .map(|(name, _)| dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_formats() {
        assert_eq!(detect_format("package.json"), ManifestFormat::Npm);
        assert_eq!(detect_format("requirements.txt"), ManifestFormat::Python);
        assert_eq!(detect_format("pom.xml"), ManifestFormat::Maven);
        assert_eq!(detect_format("go.mod"), ManifestFormat::GoMod);
        assert_eq!(detect_format("Cargo.toml"), ManifestFormat::Cargo);
    }

    #[test]
    fn test_detect_matches_suffix_only() {
        assert_eq!(detect_format("frontend/package.json"), ManifestFormat::Npm);
        assert_eq!(detect_format("dev-requirements.txt"), ManifestFormat::Python);
        assert_eq!(detect_format("package.json.bak"), ManifestFormat::Generic);
        // Suffix match is case-sensitive.
        assert_eq!(detect_format("cargo.toml"), ManifestFormat::Generic);
    }

    #[test]
    fn test_detect_fallback_to_generic() {
        assert_eq!(detect_format(""), ManifestFormat::Generic);
        assert_eq!(detect_format("unknown.txt"), ManifestFormat::Generic);
        assert_eq!(detect_format("LICENSE"), ManifestFormat::Generic);
    }

    #[test]
    fn test_find_manifests_in_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(dir.path().join("README.md"), "hello").unwrap();

        let found = find_manifests(dir.path());
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["package.json", "Cargo.toml"]);
    }
}
