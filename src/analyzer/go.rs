use crate::license::keywords::KeywordTable;
use crate::models::{DetectedLicenses, LicenseHits};

/// Analyzer for `go.mod` manifests.
///
/// Combines a keyword table over non-comment lines with a publisher-domain
/// heuristic on `require` / `replace` lines, including the lines of
/// parenthesized `require ( ... )` blocks.
pub struct GoAnalyzer<'a> {
    keywords: &'a KeywordTable,
}

impl<'a> GoAnalyzer<'a> {
    pub fn new(keywords: &'a KeywordTable) -> Self {
        Self { keywords }
    }
}

impl super::Analyzer for GoAnalyzer<'_> {
    async fn analyze(&self, content: &str) -> DetectedLicenses {
        let mut hits = LicenseHits::new();
        let mut in_block = false;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }

            self.keywords.scan_into(line, &mut hits);

            let directive = trimmed.contains("require") || trimmed.contains("replace");
            if directive || in_block {
                if let Some(license) = license_by_publisher(trimmed) {
                    hits.insert(license);
                }
            }

            if directive && trimmed.ends_with('(') {
                in_block = true;
            } else if in_block && trimmed.starts_with(')') {
                in_block = false;
            }
        }

        hits.into_detected()
    }
}

/// Guess a module's license from its publisher domain. First match wins.
fn license_by_publisher(line: &str) -> Option<&'static str> {
    if line.contains("golang.org") {
        Some("BSD")
    } else if line.contains("google") {
        Some("Apache-2.0")
    } else if line.contains("github.com") {
        Some("MIT")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::license::keywords::KeywordTables;

    async fn analyze(content: &str) -> Vec<String> {
        let tables = KeywordTables::standard().unwrap();
        let detected = GoAnalyzer::new(&tables.gomod).analyze(content).await;
        detected.iter().map(str::to_string).collect()
    }

    #[test]
    fn test_publisher_priority() {
        assert_eq!(license_by_publisher("require golang.org/x/net v0.1.0"), Some("BSD"));
        assert_eq!(
            license_by_publisher("require google.golang.org/grpc v1.60.0"),
            Some("BSD")
        );
        assert_eq!(
            license_by_publisher("require cloud.google.com/go v0.110.0"),
            Some("Apache-2.0")
        );
        assert_eq!(
            license_by_publisher("require github.com/google/uuid v1.6.0"),
            Some("Apache-2.0")
        );
        assert_eq!(
            license_by_publisher("require github.com/spf13/cobra v1.8.0"),
            Some("MIT")
        );
        assert_eq!(license_by_publisher("require gopkg.in/yaml.v3 v3.0.1"), None);
    }

    #[tokio::test]
    async fn test_single_line_require() {
        assert_eq!(analyze("require golang.org/x/net v0.1.0").await, vec!["BSD"]);
    }

    #[tokio::test]
    async fn test_require_block() {
        let content = "module acme.dev/app\n\ngo 1.22\n\nrequire (\n\tgithub.com/spf13/cobra v1.8.0\n\tcloud.google.com/go v0.110.0\n)\n\nrequire gopkg.in/yaml.v3 v3.0.1\n";
        assert_eq!(analyze(content).await, vec!["Apache-2.0", "MIT"]);
    }

    #[tokio::test]
    async fn test_lines_outside_directives_get_no_heuristic() {
        assert_eq!(analyze("module github.com/acme/tool\n").await, vec!["Unknown"]);
    }

    #[tokio::test]
    async fn test_comments_are_skipped() {
        let content = "// Licensed MIT, see github.com/acme\n// require github.com/x/y v1\nmodule acme.dev/tool\n";
        assert_eq!(analyze(content).await, vec!["Unknown"]);
    }

    #[tokio::test]
    async fn test_keyword_table_is_additive() {
        let content = "require github.com/hashicorp/go-version v1.6.0 // MPL licensed\n";
        assert_eq!(analyze(content).await, vec!["MIT", "MPL-2.0"]);
    }
}
