//! Staged content application.
//!
//! Switching language fades the page: the body gets a transitioning class,
//! the text is swapped after a short delay, and the class is cleared a
//! moment later. The stages run in a spawned task held in a [`TaskSlot`];
//! scheduling a new transition aborts the pending one, so a rapid double
//! toggle can never have a stale cleanup clear the marker of the newer one.

use crate::config::Config;
use crate::host::{Document, Location, Page, PreferenceStore};
use crate::i18n::{Language, SwitchMetrics, TranslationTable};
use crate::routing::PathConvention;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

/// Where the page is in a language transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No language has been applied yet
    Idle,
    /// Marker set; text swap or cleanup still pending
    Transitioning,
    /// Text swapped and marker cleared
    Settled,
    /// Navigated to another language variant; this page is done
    Navigating,
}

/// Page state shared between a controller and its scheduled tasks.
#[derive(Debug)]
pub struct Shared<D, S, L> {
    pub page: Page<D, S, L>,
    pub phase: TransitionPhase,
}

/// Immutable inputs every stage needs.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub table: TranslationTable,
    pub convention: PathConvention,
    pub metrics: SwitchMetrics,
}

/// Slot holding at most one cancellable scheduled task.
#[derive(Debug, Default)]
pub struct TaskSlot {
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle`, aborting the previous task.
    ///
    /// Returns `true` if the previous task had not finished yet.
    pub fn replace(&mut self, handle: JoinHandle<()>) -> bool {
        let cancelled = self.cancel();
        self.handle = Some(handle);
        cancelled
    }

    /// Abort the stored task. Returns `true` if it was still pending.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Replace the text of every translatable element that has an entry for
/// `language`. Elements whose key is missing keep their text.
///
/// Returns the number of elements left untouched.
pub fn apply_translations<D: Document>(
    document: &mut D,
    table: &TranslationTable,
    language: Language,
    attribute: &str,
) -> usize {
    let mut missed = 0;
    for element in document.translatable_elements(attribute) {
        match table.lookup(language, &element.key) {
            Some(text) => document.set_text(element.node, text),
            None => {
                debug!("No '{}' text for key '{}'", language, element.key);
                missed += 1;
            }
        }
    }
    missed
}

/// Run the swap and cleanup stages of one transition.
///
/// The transitioning marker must already be set by the caller.
pub async fn run_transition<D, S, L>(
    shared: Arc<Mutex<Shared<D, S, L>>>,
    ctx: Arc<Context>,
    language: Language,
    allow_redirect: bool,
) where
    D: Document,
    S: PreferenceStore,
    L: Location,
{
    sleep(ctx.config.pre_update_delay).await;

    {
        let mut state = shared.lock().await;
        let page = &mut state.page;

        let missed = apply_translations(
            &mut page.document,
            &ctx.table,
            language,
            &ctx.config.translate_attribute,
        );
        ctx.metrics.record_missed_lookups(missed);

        page.document.set_document_language(language.code());
        page.document
            .set_body_attribute(&ctx.config.body_lang_attribute, language.code());

        if allow_redirect {
            let path = page.location.pathname();
            if let Some(target) = ctx.convention.redirect_target(&path, language) {
                info!("Redirecting {} -> {}", path, target);
                page.location.navigate(&target);
                ctx.metrics.record_redirect();
                state.phase = TransitionPhase::Navigating;
                return;
            }
        }
    }

    sleep(ctx.config.cleanup_delay).await;

    let mut state = shared.lock().await;
    state
        .page
        .document
        .remove_body_class(&ctx.config.transitioning_class);
    state.phase = TransitionPhase::Settled;
}

/// Remove the switch's ripple class once the ripple duration has passed.
pub async fn run_ripple<D, S, L>(shared: Arc<Mutex<Shared<D, S, L>>>, ctx: Arc<Context>)
where
    D: Document,
    S: PreferenceStore,
    L: Location,
{
    sleep(ctx.config.ripple_duration).await;

    let mut state = shared.lock().await;
    state
        .page
        .document
        .remove_element_class(&ctx.config.switch_id, &ctx.config.ripple_class);
}
