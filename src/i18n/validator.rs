//! Translation coverage validation.
//!
//! Every language should carry the same key set. Drift is not fatal at
//! runtime (elements with a missing key simply keep their text), but it is
//! what `portfolio-lang check` exists to catch before a deploy.

use crate::i18n::{Language, TranslationTable};
use regex::Regex;
use std::sync::OnceLock;

/// Coverage report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Keys present in some languages but missing in others
    pub errors: Vec<String>,

    /// Suspicious entries that still render (empty text, odd key names)
    pub warnings: Vec<String>,
}

impl CoverageReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for CoverageReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation tables.
pub struct TableValidator;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Validate key coverage and entry quality of a table.
    ///
    /// This function checks that:
    /// - every key appears in every language
    /// - no display string is blank
    /// - keys are lowercase kebab-case, as used in `data-i18n` attributes
    pub fn validate(table: &TranslationTable) -> CoverageReport {
        let mut report = CoverageReport::new();

        for language in Language::ALL {
            for other in Language::ALL.iter().filter(|l| **l != language) {
                let missing = Self::missing_keys(table, language, *other);
                if !missing.is_empty() {
                    report.errors.push(format!(
                        "{} keys present in '{}' are missing in '{}': {:?}",
                        missing.len(),
                        other,
                        language,
                        missing
                    ));
                }
            }
        }

        for language in Language::ALL {
            for (key, text) in table.dictionary(language).iter() {
                if text.trim().is_empty() {
                    report
                        .warnings
                        .push(format!("Blank text for '{}' in '{}'", key, language));
                }
            }
        }

        let mut malformed: Vec<&str> = Language::ALL
            .iter()
            .flat_map(|language| table.dictionary(*language).keys())
            .filter(|key| !Self::is_well_formed_key(key))
            .collect();
        malformed.sort_unstable();
        malformed.dedup();
        for key in malformed {
            report
                .warnings
                .push(format!("Key '{}' is not lowercase kebab-case", key));
        }

        report
    }

    /// Keys of `source` that `target` lacks, in sorted order.
    pub fn missing_keys(
        table: &TranslationTable,
        target: Language,
        source: Language,
    ) -> Vec<String> {
        let target_dictionary = table.dictionary(target);
        table
            .dictionary(source)
            .keys()
            .filter(|key| !target_dictionary.contains_key(key))
            .map(str::to_string)
            .collect()
    }

    fn is_well_formed_key(key: &str) -> bool {
        let regex =
            KEY_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
        regex.is_match(key)
    }
}
