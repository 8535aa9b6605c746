//! Internationalization (i18n) module for the Vietnamese/English site.
//!
//! # Architecture
//!
//! - `registry`: Metadata for the supported languages
//! - `language`: The closed `Language` enum
//! - `table`: Translation dictionaries loaded from one JSON resource
//! - `validator`: Key coverage checks across languages
//! - `metrics`: Per-controller switching counters
//!
//! # Example
//!
//! ```rust,ignore
//! use portfolio_lang::i18n::{Language, TranslationTable};
//!
//! let table = TranslationTable::bundled()?;
//! assert_eq!(table.lookup(Language::English, "home"), Some("Home"));
//! ```

mod language;
mod metrics;
mod registry;
mod table;
mod validator;

pub use language::Language;
pub use metrics::{MetricsReport, SwitchMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use table::{Dictionary, TableError, TranslationTable};
pub use validator::{CoverageReport, TableValidator};
