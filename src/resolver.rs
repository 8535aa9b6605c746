//! Initial language resolution at page load.

use crate::config::Config;
use crate::host::{Document, Location, Page, PreferenceStore};
use crate::i18n::Language;
use crate::routing::PathConvention;
use tracing::{debug, warn};

/// Which signal decided the initial language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The URL names an English variant
    Url,
    /// The body declares the page as English
    PageAttribute,
    /// The reader's saved preference
    StoredPreference,
    /// Nothing else applied
    Default,
}

/// Determine the language to show when a page loads.
///
/// Priority, highest first:
/// 1. English-variant URL, or a body language attribute equal to `en`
/// 2. The stored preference, when it parses as a supported language
/// 3. The configured default language
pub fn resolve_initial_language<D, S, L>(
    page: &Page<D, S, L>,
    convention: &PathConvention,
    config: &Config,
) -> (Language, ResolutionSource)
where
    D: Document,
    S: PreferenceStore,
    L: Location,
{
    let path = page.location.pathname();
    if convention.is_english_variant(&path) {
        debug!("Resolved English from URL {}", path);
        return (Language::English, ResolutionSource::Url);
    }

    let declared = page.document.body_attribute(&config.body_lang_attribute);
    if declared.as_deref() == Some(Language::English.code()) {
        debug!("Resolved English from page attribute");
        return (Language::English, ResolutionSource::PageAttribute);
    }

    if let Some(stored) = page.store.load(&config.storage_key) {
        match Language::from_code(&stored) {
            Ok(language) => {
                debug!("Resolved {} from stored preference", language);
                return (language, ResolutionSource::StoredPreference);
            }
            Err(e) => warn!("Ignoring stored language preference: {}", e),
        }
    }

    (config.default_language, ResolutionSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryDocument, MemoryLocation, MemoryStore};

    fn resolve(path: &str, doc: MemoryDocument, store: MemoryStore) -> (Language, ResolutionSource) {
        let config = Config::default();
        let page = Page::new(doc, store, MemoryLocation::new(path));
        resolve_initial_language(&page, &PathConvention::from_config(&config), &config)
    }

    #[test]
    fn test_default_without_signals() {
        assert_eq!(
            resolve("/", MemoryDocument::new(), MemoryStore::new()),
            (Language::Vietnamese, ResolutionSource::Default)
        );
    }

    #[test]
    fn test_stored_preference() {
        let store = MemoryStore::new().with_entry("language", "en");
        assert_eq!(
            resolve("/about/", MemoryDocument::new(), store),
            (Language::English, ResolutionSource::StoredPreference)
        );
    }

    #[test]
    fn test_url_beats_stored_preference() {
        let store = MemoryStore::new().with_entry("language", "vi");
        assert_eq!(
            resolve("/posts/example.en.html", MemoryDocument::new(), store),
            (Language::English, ResolutionSource::Url)
        );
    }

    #[test]
    fn test_page_attribute_beats_stored_preference() {
        let doc = MemoryDocument::new().with_body_attribute("data-lang", "en");
        let store = MemoryStore::new().with_entry("language", "vi");
        assert_eq!(
            resolve("/posts/index.html", doc, store),
            (Language::English, ResolutionSource::PageAttribute)
        );
    }

    #[test]
    fn test_vietnamese_page_attribute_does_not_override_preference() {
        let doc = MemoryDocument::new().with_body_attribute("data-lang", "vi");
        let store = MemoryStore::new().with_entry("language", "en");
        assert_eq!(
            resolve("/", doc, store),
            (Language::English, ResolutionSource::StoredPreference)
        );
    }

    #[test]
    fn test_vietnamese_url_does_not_override_preference() {
        let store = MemoryStore::new().with_entry("language", "en");
        assert_eq!(
            resolve("/posts/example.html", MemoryDocument::new(), store).0,
            Language::English
        );
    }

    #[test]
    fn test_unparseable_preference_falls_back_to_default() {
        let store = MemoryStore::new().with_entry("language", "klingon");
        assert_eq!(
            resolve("/", MemoryDocument::new(), store),
            (Language::Vietnamese, ResolutionSource::Default)
        );
    }

    #[test]
    fn test_configured_default() {
        let config = Config {
            default_language: Language::English,
            ..Config::default()
        };
        let page = Page::new(MemoryDocument::new(), MemoryStore::new(), MemoryLocation::new("/"));
        let (language, source) =
            resolve_initial_language(&page, &PathConvention::from_config(&config), &config);
        assert_eq!(language, Language::English);
        assert_eq!(source, ResolutionSource::Default);
    }
}
