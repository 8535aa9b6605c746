//! Translation table: one dictionary of display strings per language.
//!
//! The site's strings live in a single JSON resource shaped as
//! `{ "vi": { key: text, .. }, "en": { key: text, .. } }`. A copy of
//! `data/translations.json` is embedded at compile time so the controller
//! works without touching the filesystem.

use crate::i18n::{Language, LanguageRegistry};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_TRANSLATIONS: &str = include_str!("../../data/translations.json");

/// Errors raised while loading a translation table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read translations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid translation JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown language code '{0}' in translation table")]
    UnknownLanguage(String),

    #[error("translation table has no dictionary for '{0}'")]
    MissingLanguage(Language),

    #[error("translation table has more than one dictionary for '{0}'")]
    DuplicateLanguage(Language),
}

/// Key to display string mapping for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(BTreeMap<String, String>);

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.0.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dictionary(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Top-level entries of the JSON document in source order, duplicates kept.
struct RawTable(Vec<(String, Dictionary)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawTableVisitor;

        impl<'de> Visitor<'de> for RawTableVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of language code to dictionary")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawTable, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, Dictionary>()? {
                    entries.push(entry);
                }
                Ok(RawTable(entries))
            }
        }

        deserializer.deserialize_map(RawTableVisitor)
    }
}

/// Dictionaries for every supported language.
///
/// Construction guarantees a dictionary exists for each [`Language`], so
/// lookups never hit an unrecognized language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    dictionaries: BTreeMap<Language, Dictionary>,
}

impl TranslationTable {
    /// Build a table from per-language dictionaries.
    ///
    /// # Errors
    /// Returns [`TableError::MissingLanguage`] if any supported language has
    /// no dictionary.
    pub fn new(dictionaries: BTreeMap<Language, Dictionary>) -> Result<Self, TableError> {
        if let Some(missing) = Language::ALL
            .iter()
            .find(|language| !dictionaries.contains_key(language))
        {
            return Err(TableError::MissingLanguage(*missing));
        }

        Ok(Self { dictionaries })
    }

    /// The table embedded from `data/translations.json`.
    pub fn bundled() -> Result<Self, TableError> {
        Self::from_json_str(BUNDLED_TRANSLATIONS)
    }

    /// Parse a table from its JSON form.
    ///
    /// Language codes must match a registered code exactly; `"EN"` or
    /// `"en "` are rejected rather than merged into `en`.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let RawTable(entries) = serde_json::from_str(json)?;

        let mut dictionaries = BTreeMap::new();
        for (code, dictionary) in entries {
            let language = LanguageRegistry::get()
                .get_by_code(&code)
                .map(|config| config.language)
                .ok_or(TableError::UnknownLanguage(code))?;
            if dictionaries.insert(language, dictionary).is_some() {
                return Err(TableError::DuplicateLanguage(language));
            }
        }

        Self::new(dictionaries)
    }

    /// Read and parse a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&json)
    }

    /// Look up the display string for `key` in `language`.
    pub fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.dictionary(language).get(key)
    }

    /// The dictionary for one language.
    pub fn dictionary(&self, language: Language) -> &Dictionary {
        // Presence of every language is checked in `new`.
        &self.dictionaries[&language]
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.dictionaries.keys().copied()
    }
}
