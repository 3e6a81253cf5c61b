use quick_xml::events::Event;
use quick_xml::Reader;

use crate::license::keywords::KeywordTable;
use crate::models::{DetectedLicenses, LicenseHits};

/// Analyzer for Maven `pom.xml` manifests.
///
/// Reads every `<license><name>` element wherever it is nested, then
/// keyword-scans the raw text. Malformed XML contributes no structured
/// matches but the keyword scan still runs.
pub struct JavaAnalyzer<'a> {
    keywords: &'a KeywordTable,
}

impl<'a> JavaAnalyzer<'a> {
    pub fn new(keywords: &'a KeywordTable) -> Self {
        Self { keywords }
    }
}

impl super::Analyzer for JavaAnalyzer<'_> {
    async fn analyze(&self, content: &str) -> DetectedLicenses {
        let mut hits = LicenseHits::new();

        match license_names(content) {
            Ok(names) => {
                tracing::debug!("pom.xml declares {} license name(s)", names.len());
                hits.extend(names);
            }
            Err(e) => tracing::debug!("pom.xml is not well-formed XML: {}", e),
        }

        self.keywords.scan_into(content, &mut hits);
        hits.into_detected()
    }
}

/// Text of every `name` element whose parent is a `license` element.
///
/// Elements are compared by local name so namespaced POMs match too. Any
/// reader error, or elements left open at end of input, fails the whole parse.
fn license_names(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut names = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                if in_license_name(&path) {
                    current.clear();
                }
            }
            Ok(Event::End(_)) => {
                if in_license_name(&path) && !current.is_empty() {
                    names.push(std::mem::take(&mut current));
                }
                path.pop();
            }
            Ok(Event::Text(e)) if in_license_name(&path) => {
                let text = e.unescape().map_err(|e| e.to_string())?;
                current.push_str(&text);
            }
            Ok(Event::CData(e)) if in_license_name(&path) => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(format!("unclosed element <{}>", path.join("><")));
    }

    Ok(names)
}

fn in_license_name(path: &[String]) -> bool {
    matches!(path, [.., parent, leaf] if parent == "license" && leaf == "name")
}
