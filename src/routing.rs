//! URL convention for language variants of blog pages.
//!
//! Posts are published twice: `name.html` in the default language and
//! `name.en.html` in English. The posts index is `/posts/` (or
//! `/posts/index.html`) in the default language and `/posts/index.en.html`
//! in English. Pages outside the posts section have a single URL and switch
//! language in place.

use crate::config::Config;
use crate::i18n::Language;
use regex::Regex;

/// What a path points at, as far as language variants are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Not inside the posts section; never redirected
    Standalone,

    /// The posts index; `root` is the section path with a trailing slash
    SectionIndex { root: String },

    /// An individual post page with `.html` variants
    Post,

    /// Inside the posts section but not an HTML page (e.g. a directory)
    Unversioned,
}

/// The naming convention that ties language variants together.
#[derive(Debug, Clone)]
pub struct PathConvention {
    posts_prefix: String,
    /// English marker inserted before the extension (e.g. ".en")
    marker: String,
    /// Page extension (e.g. ".html")
    extension: String,
    english_filename: Regex,
}

impl PathConvention {
    /// Build a convention from a section prefix (`/posts/`) and the full
    /// English suffix (`.en.html`).
    pub fn new(posts_prefix: &str, english_suffix: &str) -> Self {
        let mut posts_prefix = posts_prefix.to_string();
        if !posts_prefix.ends_with('/') {
            posts_prefix.push('/');
        }

        let (marker, extension) = match english_suffix.rfind('.') {
            Some(idx) if idx > 0 => (
                english_suffix[..idx].to_string(),
                english_suffix[idx..].to_string(),
            ),
            _ => (english_suffix.to_string(), String::new()),
        };

        // Repeated markers ("a.en.en.html") still count as one English page.
        let pattern = format!(
            "(?:{})+{}$",
            regex::escape(&marker),
            regex::escape(&extension)
        );
        let english_filename = Regex::new(&pattern).expect("Escaped pattern is always valid");

        Self {
            posts_prefix,
            marker,
            extension,
            english_filename,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.posts_prefix, &config.english_suffix)
    }

    /// True if the final path segment carries the English suffix.
    pub fn is_english_variant(&self, path: &str) -> bool {
        let filename = filename(path);
        self.english_filename
            .find(filename)
            .is_some_and(|m| m.start() > 0)
    }

    /// The language a path is published in according to its filename.
    pub fn language_of(&self, path: &str) -> Language {
        if self.is_english_variant(path) {
            Language::English
        } else {
            Language::Vietnamese
        }
    }

    /// Classify a path.
    pub fn classify(&self, path: &str) -> PageKind {
        let section_root = match self.section_root(path) {
            Some(root) => root,
            None => return PageKind::Standalone,
        };

        let rest = &path[section_root.len().min(path.len())..];
        let is_index = rest.is_empty()
            || rest == format!("index{}", self.extension)
            || self.is_english_index(rest);
        if is_index {
            return PageKind::SectionIndex { root: section_root };
        }

        if !self.extension.is_empty() && rest.ends_with(&self.extension) {
            PageKind::Post
        } else {
            PageKind::Unversioned
        }
    }

    /// Path of the `language` variant of the page at `path`, if the page
    /// has variants at all.
    pub fn variant_path(&self, path: &str, language: Language) -> Option<String> {
        match self.classify(path) {
            PageKind::Standalone | PageKind::Unversioned => None,
            PageKind::SectionIndex { root } => Some(match language {
                Language::Vietnamese => root,
                Language::English => format!("{}index{}{}", root, self.marker, self.extension),
            }),
            PageKind::Post => {
                let base = self.strip_language(path);
                Some(match language {
                    Language::Vietnamese => format!("{}{}", base, self.extension),
                    Language::English => {
                        format!("{}{}{}", base, self.marker, self.extension)
                    }
                })
            }
        }
    }

    /// Where to navigate when the reader switches to `language` on `path`.
    ///
    /// Returns `None` when the page has no variants or is already published
    /// in `language`.
    pub fn redirect_target(&self, path: &str, language: Language) -> Option<String> {
        if self.language_of(path) == language {
            return None;
        }

        self.variant_path(path, language)
            .filter(|target| target != path)
    }

    /// Section root (with trailing slash) for paths inside the posts section.
    fn section_root(&self, path: &str) -> Option<String> {
        if let Some(idx) = path.find(&self.posts_prefix) {
            return Some(path[..idx + self.posts_prefix.len()].to_string());
        }

        // "/posts" without the trailing slash is the index itself.
        let bare = self.posts_prefix.trim_end_matches('/');
        if !bare.is_empty() && path == bare {
            return Some(self.posts_prefix.clone());
        }

        None
    }

    fn is_english_index(&self, rest: &str) -> bool {
        rest.strip_prefix("index").is_some_and(|tail| {
            self.english_filename
                .find(tail)
                .is_some_and(|m| m.start() == 0)
        })
    }

    /// Path without extension and without any English markers.
    fn strip_language<'a>(&self, path: &'a str) -> &'a str {
        let mut base = path.strip_suffix(self.extension.as_str()).unwrap_or(path);
        while !self.marker.is_empty() {
            match base.strip_suffix(self.marker.as_str()) {
                Some(stripped) if !stripped.ends_with('/') => base = stripped,
                _ => break,
            }
        }
        base
    }
}

impl Default for PathConvention {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
