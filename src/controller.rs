//! The language controller: one owned instance per page.
//!
//! Holds the current language, applies it to the page, persists it, drives
//! the switch widget and turns switch gestures into language changes.

use crate::config::Config;
use crate::gesture::{DragGesture, PointerRelease};
use crate::host::{Document, Location, Page, PreferenceStore};
use crate::i18n::{Language, MetricsReport, SwitchMetrics, TranslationTable};
use crate::resolver::resolve_initial_language;
use crate::routing::PathConvention;
use crate::transition::{run_ripple, run_transition, Context, Shared, TaskSlot, TransitionPhase};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct LanguageController<D, S, L> {
    ctx: Arc<Context>,
    shared: Arc<Mutex<Shared<D, S, L>>>,
    current: Language,
    gesture: DragGesture,
    switch_mounted: bool,
    transition: TaskSlot,
    ripple: TaskSlot,
}

impl<D, S, L> LanguageController<D, S, L>
where
    D: Document,
    S: PreferenceStore,
    L: Location,
{
    /// Create a controller for `page`. Nothing is read or written until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(config: Config, table: TranslationTable, page: Page<D, S, L>) -> Self {
        let convention = PathConvention::from_config(&config);
        let gesture = DragGesture::new(config.drag_threshold);
        let current = config.default_language;

        Self {
            ctx: Arc::new(Context {
                config,
                table,
                convention,
                metrics: SwitchMetrics::new(),
            }),
            shared: Arc::new(Mutex::new(Shared {
                page,
                phase: TransitionPhase::Idle,
            })),
            current,
            gesture,
            switch_mounted: false,
            transition: TaskSlot::new(),
            ripple: TaskSlot::new(),
        }
    }

    /// Page-load entry point: resolve the initial language, apply it
    /// without redirecting, and sync the switch widget.
    pub async fn initialize(&mut self) -> Language {
        let (language, source) = {
            let state = self.shared.lock().await;
            self.switch_mounted = state.page.document.has_element(&self.ctx.config.switch_id)
                && state
                    .page
                    .document
                    .has_child_with_class(&self.ctx.config.switch_id, &self.ctx.config.slider_class);
            resolve_initial_language(&state.page, &self.ctx.convention, &self.ctx.config)
        };

        info!("Initial language {} (from {:?})", language, source);
        self.current = language;
        self.apply_language(language, false).await;
        self.update_switch().await;
        language
    }

    pub fn current_language(&self) -> Language {
        self.current
    }

    /// Switch to `language`.
    ///
    /// Returns `false` without touching storage or the page if `language`
    /// is already current.
    pub async fn set_language(&mut self, language: Language) -> bool {
        if language == self.current {
            debug!("Language {} already active", language);
            return false;
        }

        info!("Switching language {} -> {}", self.current, language);
        self.current = language;
        self.ctx.metrics.record_switch();

        {
            let mut state = self.shared.lock().await;
            if let Err(e) = state.page.store.save(&self.ctx.config.storage_key, language.code()) {
                warn!("Could not persist language preference: {}", e);
            }
        }

        self.apply_language(language, true).await;
        self.update_switch().await;
        true
    }

    /// Switch to the other language. Returns the new language.
    pub async fn toggle_language(&mut self) -> Language {
        self.set_language(self.current.other()).await;
        self.current
    }

    /// Show `language` on the page.
    ///
    /// Sets the transitioning marker now and schedules the text swap,
    /// optional redirect and cleanup. A transition still pending from an
    /// earlier call is cancelled.
    pub async fn apply_language(&mut self, language: Language, allow_redirect: bool) {
        {
            let mut state = self.shared.lock().await;
            state
                .page
                .document
                .add_body_class(&self.ctx.config.transitioning_class);
            state.phase = TransitionPhase::Transitioning;
        }

        let handle = tokio::spawn(run_transition(
            Arc::clone(&self.shared),
            Arc::clone(&self.ctx),
            language,
            allow_redirect,
        ));
        if self.transition.replace(handle) {
            debug!("Cancelled pending transition");
            self.ctx.metrics.record_cancelled_transition();
        }
    }

    pub async fn phase(&self) -> TransitionPhase {
        self.shared.lock().await.phase
    }

    /// Whether a transition task is still scheduled.
    pub fn is_transition_pending(&self) -> bool {
        self.transition.is_pending()
    }

    /// Run `f` against the page.
    pub async fn with_page<R>(&self, f: impl FnOnce(&Page<D, S, L>) -> R) -> R {
        let state = self.shared.lock().await;
        f(&state.page)
    }

    pub fn metrics(&self) -> MetricsReport {
        self.ctx.metrics.report()
    }

    /// Whether the switch widget (with its slider) was found at
    /// initialization. Gestures are ignored without it.
    pub fn is_switch_mounted(&self) -> bool {
        self.switch_mounted
    }

    // ==================== Gestures ====================

    /// Mouse down / touch start on the slider.
    pub async fn pointer_down(&mut self, x: f64) {
        if !self.switch_mounted {
            return;
        }
        self.gesture.pointer_down(x);
        let mut state = self.shared.lock().await;
        state
            .page
            .document
            .add_element_class(&self.ctx.config.switch_id, &self.ctx.config.dragging_class);
    }

    /// Mouse / touch move. Returns `true` if the move switched language.
    pub async fn pointer_move(&mut self, x: f64) -> bool {
        if !self.switch_mounted {
            return false;
        }
        match self.gesture.pointer_move(x, self.current) {
            Some(target) => self.set_language(target).await,
            None => false,
        }
    }

    /// Mouse up / touch end.
    pub async fn pointer_up(&mut self, release: PointerRelease) {
        if !self.switch_mounted || !self.gesture.pointer_up(release) {
            return;
        }
        let mut state = self.shared.lock().await;
        state
            .page
            .document
            .remove_element_class(&self.ctx.config.switch_id, &self.ctx.config.dragging_class);
    }

    /// Click on the switch. Returns `true` if it toggled the language.
    pub async fn click(&mut self) -> bool {
        if !self.switch_mounted || !self.gesture.click() {
            return false;
        }
        self.toggle_language().await;
        true
    }

    /// Reflect the current language on the switch and play the ripple.
    async fn update_switch(&mut self) {
        let config = &self.ctx.config;
        {
            let mut state = self.shared.lock().await;
            let document = &mut state.page.document;
            if !document.set_element_attribute(
                &config.switch_id,
                &config.body_lang_attribute,
                self.current.code(),
            ) {
                return;
            }
            document.add_element_class(&config.switch_id, &config.ripple_class);
        }

        let handle = tokio::spawn(run_ripple(Arc::clone(&self.shared), Arc::clone(&self.ctx)));
        self.ripple.replace(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryDocument, MemoryLocation, MemoryStore, NodeId};
    use std::time::Duration;
    use tokio::time::sleep;

    type TestController = LanguageController<MemoryDocument, MemoryStore, MemoryLocation>;

    fn table() -> TranslationTable {
        TranslationTable::from_json_str(
            r#"{
                "vi": { "home": "Trang chủ", "about": "Giới thiệu", "certificates": "Chứng chỉ" },
                "en": { "home": "Home", "about": "About" }
            }"#,
        )
        .expect("valid table")
    }

    /// Page with three translatable elements and the switch widget.
    fn page_doc() -> (MemoryDocument, [NodeId; 3]) {
        let mut doc = MemoryDocument::new();
        let home = doc.push_translatable("data-i18n", "home", "Home");
        let about = doc.push_translatable("data-i18n", "about", "About");
        let certs = doc.push_translatable("data-i18n", "certificates", "Certificates");
        doc.push_switch("lang-switch", "lang-switch-slider");
        (doc, [home, about, certs])
    }

    fn controller(path: &str, store: MemoryStore) -> (TestController, [NodeId; 3]) {
        let (doc, nodes) = page_doc();
        let page = Page::new(doc, store, MemoryLocation::new(path));
        (LanguageController::new(Config::default(), table(), page), nodes)
    }

    async fn texts(controller: &TestController, nodes: [NodeId; 3]) -> Vec<String> {
        controller
            .with_page(|page| {
                nodes
                    .iter()
                    .map(|node| page.document.text(*node).unwrap_or_default().to_string())
                    .collect()
            })
            .await
    }

    async fn settle() {
        sleep(Duration::from_millis(200)).await;
    }

    // ==================== Initialization Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_initialize_defaults_to_vietnamese() {
        let (mut c, nodes) = controller("/", MemoryStore::new());

        assert_eq!(c.initialize().await, Language::Vietnamese);
        assert_eq!(c.phase().await, TransitionPhase::Transitioning);
        settle().await;

        assert_eq!(c.phase().await, TransitionPhase::Settled);
        assert_eq!(texts(&c, nodes).await, vec!["Trang chủ", "Giới thiệu", "Chứng chỉ"]);
        c.with_page(|page| {
            assert_eq!(page.document.document_language(), Some("vi"));
            assert_eq!(page.document.body_attribute("data-lang").as_deref(), Some("vi"));
            assert_eq!(page.document.element_attribute("lang-switch", "data-lang"), Some("vi"));
            assert!(!page.document.body_has_class("lang-transitioning"));
            assert_eq!(page.store.writes(), 0);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_on_english_post_never_redirects() {
        let store = MemoryStore::new().with_entry("language", "vi");
        let (mut c, _) = controller("/posts/example.en.html", store);

        assert_eq!(c.initialize().await, Language::English);
        settle().await;

        assert_eq!(c.phase().await, TransitionPhase::Settled);
        c.with_page(|page| assert!(page.location.navigations().is_empty()))
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_detects_switch() {
        let (mut c, _) = controller("/", MemoryStore::new());
        assert!(!c.is_switch_mounted());
        c.initialize().await;
        assert!(c.is_switch_mounted());
    }

    // ==================== Switching Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_toggle_to_english() {
        let (mut c, nodes) = controller("/", MemoryStore::new());
        c.initialize().await;
        settle().await;

        assert_eq!(c.toggle_language().await, Language::English);
        settle().await;

        // Key without an English entry keeps the Vietnamese text.
        assert_eq!(texts(&c, nodes).await, vec!["Home", "About", "Chứng chỉ"]);
        c.with_page(|page| {
            assert_eq!(page.store.load("language").as_deref(), Some("en"));
            assert_eq!(page.document.document_language(), Some("en"));
            assert_eq!(page.document.element_attribute("lang-switch", "data-lang"), Some("en"));
            assert!(page.document.element_has_class("lang-switch", "ripple"));
        })
        .await;

        sleep(Duration::from_millis(500)).await;
        c.with_page(|page| assert!(!page.document.element_has_class("lang-switch", "ripple")))
            .await;

        let metrics = c.metrics();
        assert_eq!(metrics.switches, 1);
        assert_eq!(metrics.missed_lookups, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_twice_restores_text() {
        let (mut c, nodes) = controller("/about/", MemoryStore::new());
        c.initialize().await;
        settle().await;
        let before = texts(&c, nodes).await;

        c.toggle_language().await;
        settle().await;
        c.toggle_language().await;
        settle().await;

        assert_eq!(c.current_language(), Language::Vietnamese);
        assert_eq!(texts(&c, nodes).await, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_current_language_is_noop() {
        let (mut c, _) = controller("/", MemoryStore::new());
        c.initialize().await;
        settle().await;
        sleep(Duration::from_millis(600)).await;

        let (mutations, writes) = c
            .with_page(|page| (page.document.mutations(), page.store.writes()))
            .await;

        assert!(!c.set_language(Language::Vietnamese).await);
        settle().await;

        let after = c
            .with_page(|page| (page.document.mutations(), page.store.writes()))
            .await;
        assert_eq!(after, (mutations, writes));
        assert!(!c.is_transition_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_language_twice_is_idempotent() {
        let (mut c, nodes) = controller("/", MemoryStore::new());
        c.apply_language(Language::English, false).await;
        settle().await;
        let once = texts(&c, nodes).await;

        c.apply_language(Language::English, false).await;
        settle().await;

        assert_eq!(texts(&c, nodes).await, once);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_is_tolerated() {
        let (mut c, nodes) = controller("/", MemoryStore::unavailable());
        c.initialize().await;

        assert!(c.set_language(Language::English).await);
        settle().await;

        assert_eq!(c.current_language(), Language::English);
        assert_eq!(texts(&c, nodes).await[0], "Home");
    }

    // ==================== Redirect Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_switch_on_post_redirects() {
        let (mut c, _) = controller("/posts/example.html", MemoryStore::new());
        c.initialize().await;
        settle().await;

        c.set_language(Language::English).await;
        settle().await;

        assert_eq!(c.phase().await, TransitionPhase::Navigating);
        c.with_page(|page| {
            assert_eq!(page.location.navigations(), ["/posts/example.en.html".to_string()]);
            assert!(page.document.body_has_class("lang-transitioning"));
        })
        .await;
        assert_eq!(c.metrics().redirects, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_on_english_index_redirects_to_root() {
        let (mut c, _) = controller("/posts/index.en.html", MemoryStore::new());
        c.initialize().await;
        settle().await;

        c.set_language(Language::Vietnamese).await;
        settle().await;

        c.with_page(|page| assert_eq!(page.location.navigations(), ["/posts/".to_string()]))
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_toggle_cancels_pending_transition() {
        let (mut c, nodes) = controller("/", MemoryStore::new());
        c.initialize().await;
        settle().await;

        c.toggle_language().await;
        sleep(Duration::from_millis(10)).await;
        c.toggle_language().await;

        // The first transition's cleanup must not clear the second's marker.
        sleep(Duration::from_millis(145)).await;
        c.with_page(|page| assert!(page.document.body_has_class("lang-transitioning")))
            .await;

        settle().await;
        assert_eq!(c.phase().await, TransitionPhase::Settled);
        assert_eq!(texts(&c, nodes).await, vec!["Trang chủ", "Giới thiệu", "Chứng chỉ"]);
        assert_eq!(c.metrics().cancelled_transitions, 1);
        c.with_page(|page| assert_eq!(page.document.document_language(), Some("vi")))
            .await;
    }

    // ==================== Gesture Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_drag_right_switches_once() {
        let (mut c, _) = controller("/", MemoryStore::new());
        c.initialize().await;
        settle().await;

        c.pointer_down(100.0).await;
        c.with_page(|page| assert!(page.document.element_has_class("lang-switch", "dragging")))
            .await;

        assert!(c.pointer_move(125.0).await);
        assert!(!c.pointer_move(160.0).await);
        assert!(!c.pointer_move(40.0).await);
        c.pointer_up(PointerRelease::MouseOnSwitch).await;
        assert!(!c.click().await);

        assert_eq!(c.current_language(), Language::English);
        assert_eq!(c.metrics().switches, 1);
        c.with_page(|page| {
            assert!(!page.document.element_has_class("lang-switch", "dragging"));
            assert_eq!(page.store.writes(), 1);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_after_touch_drag_toggles() {
        let (mut c, _) = controller("/", MemoryStore::new());
        c.initialize().await;

        c.pointer_down(0.0).await;
        assert!(c.pointer_move(30.0).await);
        c.pointer_up(PointerRelease::Touch).await;
        assert_eq!(c.current_language(), Language::English);

        // No click follows a touch drag, so the next one is the reader's.
        assert!(c.click().await);
        assert_eq!(c.current_language(), Language::Vietnamese);
        assert_eq!(c.metrics().switches, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_toggles() {
        let (mut c, _) = controller("/", MemoryStore::new());
        c.initialize().await;

        assert!(c.click().await);
        assert_eq!(c.current_language(), Language::English);
        assert!(c.click().await);
        assert_eq!(c.current_language(), Language::Vietnamese);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gestures_ignored_without_switch() {
        let mut doc = MemoryDocument::new();
        doc.push_translatable("data-i18n", "home", "Home");
        let page = Page::new(doc, MemoryStore::new(), MemoryLocation::new("/"));
        let mut c = LanguageController::new(Config::default(), table(), page);
        c.initialize().await;

        c.pointer_down(0.0).await;
        assert!(!c.pointer_move(50.0).await);
        c.pointer_up(PointerRelease::MouseOnSwitch).await;
        assert!(!c.click().await);
        assert_eq!(c.current_language(), Language::Vietnamese);

        // Programmatic switching still works.
        assert!(c.set_language(Language::English).await);
    }
}
