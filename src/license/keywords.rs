use anyhow::Result;
use regex::{Regex, RegexBuilder};

use crate::models::LicenseHits;

/// Keyword → identifier pairs shared by the npm, Python, Maven and Cargo analyzers.
const FALLBACK_KEYWORDS: &[(&str, &str)] = &[
    ("MIT", "MIT"),
    ("Apache", "Apache"),
    ("BSD", "BSD"),
    ("ISC", "ISC"),
    ("GPL", "GPL"),
    ("MPL", "MPL"),
    ("LGPL", "LGPL"),
];

const GOMOD_KEYWORDS: &[(&str, &str)] = &[
    ("MIT", "MIT"),
    ("Apache", "Apache-2.0"),
    ("BSD", "BSD"),
    ("MPL", "MPL-2.0"),
    ("ISC", "ISC"),
    ("GPL", "GPL-3.0"),
];

const GENERIC_KEYWORDS: &[(&str, &str)] = &[
    ("MIT", "MIT"),
    ("Apache-2.0", "Apache-2.0"),
    ("GPL-3.0", "GPL-3.0"),
    ("BSD", "BSD"),
    ("ISC", "ISC"),
    ("MPL", "MPL"),
    ("LGPL", "LGPL"),
    ("Unlicense", "Unlicense"),
    ("CC0-1.0", "CC0-1.0"),
];

struct KeywordRule {
    pattern: Regex,
    license: String,
}

/// Case-insensitive substring matcher mapping license keywords to identifiers.
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl KeywordTable {
    pub fn new(pairs: &[(&str, &str)]) -> Result<Self> {
        let rules = pairs
            .iter()
            .map(|(keyword, license)| -> Result<KeywordRule> {
                let pattern = RegexBuilder::new(&regex::escape(keyword))
                    .case_insensitive(true)
                    .build()?;
                Ok(KeywordRule {
                    pattern,
                    license: (*license).to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Identifiers whose keyword occurs anywhere in `text`.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.pattern.is_match(text))
            .map(|rule| rule.license.as_str())
    }

    pub fn scan_into(&self, text: &str, hits: &mut LicenseHits) {
        hits.extend(self.matches(text));
    }
}

/// The keyword tables used by the analyzers, built once per engine.
pub struct KeywordTables {
    pub fallback: KeywordTable,
    pub gomod: KeywordTable,
    pub generic: KeywordTable,
}

impl KeywordTables {
    pub fn standard() -> Result<Self> {
        Ok(Self {
            fallback: KeywordTable::new(FALLBACK_KEYWORDS)?,
            gomod: KeywordTable::new(GOMOD_KEYWORDS)?,
            generic: KeywordTable::new(GENERIC_KEYWORDS)?,
        })
    }
}
