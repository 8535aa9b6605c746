//! Language type: the closed set of languages the site is published in.
//!
//! Vietnamese is the site's default language and English is the only
//! alternative, so switching is always a flip between the two.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Vietnamese (`vi`), the default language
    #[serde(rename = "vi")]
    Vietnamese,

    /// English (`en`)
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Every supported language, default first.
    pub const ALL: [Language; 2] = [Language::Vietnamese, Language::English];

    /// Create a Language from a language code string.
    ///
    /// Codes are matched after trimming and lowercasing, so `" EN "` is
    /// accepted as English.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code names a supported language
    /// * `Err` if the code is empty or unknown
    pub fn from_code(code: &str) -> Result<Language> {
        let normalized = code.trim().to_lowercase();
        if normalized.is_empty() {
            bail!("Empty language code");
        }

        match LanguageRegistry::get().get_by_code(&normalized) {
            Some(config) => Ok(config.language),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The site's default language (Vietnamese).
    pub fn default_language() -> Language {
        LanguageRegistry::get().default_language().language
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Vietnamese => "vi",
            Language::English => "en",
        }
    }

    /// The language a toggle switches to.
    pub fn other(&self) -> Language {
        match self {
            Language::Vietnamese => Language::English,
            Language::English => Language::Vietnamese,
        }
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the registry has no entry for this variant, which means the
    /// registry table and the enum have drifted apart.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code())
            .expect("Every Language variant is registered")
    }

    /// English name of the language (e.g. "Vietnamese").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g. "Tiếng Việt").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default language.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}
