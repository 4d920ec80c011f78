//! Catalog filtering
//!
//! Both derivations are pure and recomputed from the current catalog and
//! criteria on every read.

use super::Voice;
use std::collections::BTreeSet;
use std::fmt;

/// Language restriction for the voice list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguageFilter {
    /// Every language
    #[default]
    All,
    /// Only voices with exactly this locale tag
    Only(String),
}

impl LanguageFilter {
    /// Parse a config or picker value; `all` (any case) selects every language
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            LanguageFilter::All
        } else {
            LanguageFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, lang: &str) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(only) => only == lang,
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str("All Languages"),
            LanguageFilter::Only(lang) => f.write_str(lang),
        }
    }
}

/// Search text and language selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against voice names
    pub search: String,
    pub lang: LanguageFilter,
}

impl FilterCriteria {
    pub fn new(search: impl Into<String>, lang: LanguageFilter) -> Self {
        Self {
            search: search.into(),
            lang,
        }
    }

    /// Whether a voice passes both the search and the language filter
    pub fn matches(&self, voice: &Voice) -> bool {
        contains_ignore_case(&voice.name, &self.search) && self.lang.matches(&voice.lang)
    }
}

/// Distinct languages in the catalog, sorted ascending
pub fn languages(voices: &[Voice]) -> Vec<String> {
    voices
        .iter()
        .map(|v| v.lang.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Voices matching the criteria, in catalog order
pub fn filtered<'a>(voices: &'a [Voice], criteria: &FilterCriteria) -> Vec<&'a Voice> {
    voices.iter().filter(|v| criteria.matches(v)).collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
