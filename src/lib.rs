//! Vietnamese/English language switching for the portfolio blog.
//!
//! The controller swaps the text of every `data-i18n` element, remembers
//! the reader's choice and moves between the `.html` / `.en.html` variants
//! of blog posts. Everything it needs from a page goes through the ports in
//! [`host`].

pub mod config;
pub mod controller;
pub mod gesture;
pub mod host;
pub mod i18n;
pub mod resolver;
pub mod routing;
pub mod transition;

pub use controller::LanguageController;
pub use i18n::{Language, TranslationTable};
