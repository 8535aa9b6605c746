//! Command-line companion for the site's language switching.
//!
//! Usage:
//!   portfolio-lang check [FILE]        # Validate key coverage of a translation table
//!   portfolio-lang route PATH LANG     # Where switching PATH to LANG navigates
//!   portfolio-lang toggle PATH         # Simulate clicking the switch on PATH
//!
//! Optional environment variables: see `Config::from_env`.

use anyhow::{bail, Context, Result};
use portfolio_lang::config::Config;
use portfolio_lang::host::{Document, JsonFileStore, MemoryDocument, MemoryLocation, Page};
use portfolio_lang::i18n::{Language, LanguageRegistry, TableValidator, TranslationTable};
use portfolio_lang::routing::PathConvention;
use portfolio_lang::LanguageController;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_lang=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("check") => check(&config, args.get(1).map(String::as_str)),
        Some("route") => {
            let (path, code) = match (args.get(1), args.get(2)) {
                (Some(path), Some(code)) => (path, code),
                _ => bail!("Usage: portfolio-lang route PATH LANG"),
            };
            route(&config, path, code)
        }
        Some("toggle") => {
            let path = args.get(1).context("Usage: portfolio-lang toggle PATH")?;
            toggle(config, path).await
        }
        _ => bail!("Usage: portfolio-lang <check [FILE] | route PATH LANG | toggle PATH>"),
    }
}

fn load_table(config: &Config, file: Option<&str>) -> Result<TranslationTable> {
    match file.or(config.translations_file.as_deref()) {
        Some(path) => TranslationTable::from_path(path)
            .with_context(|| format!("Failed to load translations from {}", path)),
        None => TranslationTable::bundled().context("Bundled translations are invalid"),
    }
}

fn check(config: &Config, file: Option<&str>) -> Result<()> {
    let table = load_table(config, file)?;
    let report = TableValidator::validate(&table);

    for entry in LanguageRegistry::get().list_all() {
        let language = entry.language;
        info!(
            "{} / {} ({}{}): {} keys",
            language.name(),
            language.native_name(),
            language,
            if language.is_default() { ", default" } else { "" },
            table.dictionary(language).len()
        );
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    if report.has_errors() {
        bail!("Translation table has {} coverage errors", report.errors.len());
    }
    println!("✓ Translation table is consistent");
    Ok(())
}

fn route(config: &Config, path: &str, code: &str) -> Result<()> {
    let language = Language::from_code(code)?;
    let convention = PathConvention::from_config(config);

    match convention.redirect_target(path, language) {
        Some(target) => println!("{}", target),
        None => println!("(no redirect)"),
    }
    Ok(())
}

async fn toggle(config: Config, path: &str) -> Result<()> {
    let table = load_table(&config, None)?;

    // A page carrying every key, showing the default-language text.
    let mut document = MemoryDocument::new();
    for (key, text) in table.dictionary(config.default_language).iter() {
        document.push_translatable(&config.translate_attribute, key, text);
    }
    document.push_switch(&config.switch_id, &config.slider_class);

    let store = JsonFileStore::new(&config.preferences_file);
    let settle = config.pre_update_delay + config.cleanup_delay;
    let attribute = config.translate_attribute.clone();

    let page = Page::new(document, store, MemoryLocation::new(path));
    let mut controller = LanguageController::new(config, table, page);

    let initial = controller.initialize().await;
    tokio::time::sleep(settle).await;
    let switched = controller.toggle_language().await;
    tokio::time::sleep(settle).await;

    println!("{} -> {}", initial, switched);
    controller
        .with_page(|page| {
            match page.location.navigations().last() {
                Some(target) => println!("navigate: {}", target),
                None => println!("navigate: (stays on {})", path),
            }
            let translated = page.document.translatable_elements(&attribute).len();
            println!("elements: {}", translated);
        })
        .await;

    let metrics = controller.metrics();
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
