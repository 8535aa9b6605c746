use crate::i18n::Language;
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_file: Option<String>,
    pub default_language: Language,

    // Persistence
    pub storage_key: String,
    pub preferences_file: String,

    // URL convention
    pub posts_prefix: String,
    pub english_suffix: String,

    // DOM contract
    pub translate_attribute: String,
    pub body_lang_attribute: String,
    pub switch_id: String,
    pub slider_class: String,
    pub transitioning_class: String,
    pub ripple_class: String,
    pub dragging_class: String,

    // Timing
    pub pre_update_delay: Duration,
    pub cleanup_delay: Duration,
    pub ripple_duration: Duration,

    // Gestures
    pub drag_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_file: None,
            default_language: Language::Vietnamese,

            storage_key: "language".to_string(),
            preferences_file: "data/preferences.json".to_string(),

            posts_prefix: "/posts/".to_string(),
            english_suffix: ".en.html".to_string(),

            translate_attribute: "data-i18n".to_string(),
            body_lang_attribute: "data-lang".to_string(),
            switch_id: "lang-switch".to_string(),
            slider_class: "lang-switch-slider".to_string(),
            transitioning_class: "lang-transitioning".to_string(),
            ripple_class: "ripple".to_string(),
            dragging_class: "dragging".to_string(),

            pre_update_delay: Duration::from_millis(100),
            cleanup_delay: Duration::from_millis(50),
            ripple_duration: Duration::from_millis(600),

            drag_threshold: 20.0,
        }
    }
}

impl Config {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Only `LANG_DEFAULT` is validated strictly; an unknown code is an error
    /// rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let default_language = match std::env::var("LANG_DEFAULT") {
            Ok(code) => Language::from_code(&code).context("LANG_DEFAULT is not a supported language")?,
            Err(_) => defaults.default_language,
        };

        Ok(Self {
            // Translations
            translations_file: std::env::var("TRANSLATIONS_FILE").ok(),
            default_language,

            // Persistence
            storage_key: std::env::var("LANG_STORAGE_KEY").unwrap_or(defaults.storage_key),
            preferences_file: std::env::var("LANG_PREFERENCES_FILE")
                .unwrap_or(defaults.preferences_file),

            // URL convention
            posts_prefix: std::env::var("LANG_POSTS_PREFIX").unwrap_or(defaults.posts_prefix),
            english_suffix: std::env::var("LANG_ENGLISH_SUFFIX")
                .unwrap_or(defaults.english_suffix),

            // Timing
            pre_update_delay: env_millis("LANG_PRE_UPDATE_DELAY_MS")
                .unwrap_or(defaults.pre_update_delay),
            cleanup_delay: env_millis("LANG_CLEANUP_DELAY_MS").unwrap_or(defaults.cleanup_delay),
            ripple_duration: env_millis("LANG_RIPPLE_MS").unwrap_or(defaults.ripple_duration),

            // Gestures
            drag_threshold: std::env::var("LANG_DRAG_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.drag_threshold),

            ..defaults
        })
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}
