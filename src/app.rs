use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::source::{Article, ArticlePage, ArticleSource, PageQuery, SourceError};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Message shown in place of the article list when a fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "An error occurred while fetching articles.";

/// Label of the "no filter" entry in the category selector.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// How long a transient status message stays in the hint bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// View and Focus Enums
// ============================================================================

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filter,
    Articles,
}

/// The three mutually exclusive states of the main content area.
///
/// The category selector is drawn next to every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView<'a> {
    Loading,
    Error(&'a str),
    Articles { articles: &'a [Article], page: u32 },
}

// ============================================================================
// Fetch and Event Types
// ============================================================================

/// A fetch the controller has committed to.
///
/// `generation` identifies the request; only a settlement carrying the latest
/// generation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: PageQuery,
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A fetch settled.
    ///
    /// Fields:
    /// - `generation`: The generation counter when this fetch was spawned
    /// - `result`: The page or the reason the source rejected the call
    PageLoaded {
        generation: u64,
        result: Result<ArticlePage, SourceError>,
    },
}

/// Map a selector value to a category filter. The empty string means "no filter".
pub fn category_from_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Page controller: owns the fetch lifecycle and every piece of UI state.
pub struct App {
    pub source: Arc<dyn ArticleSource>,
    /// Upper bound on a single fetch. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Keybindings
    pub keybindings: KeybindingRegistry,

    // Page state
    /// Articles from the last successful fetch, in source order.
    pub articles: Vec<Article>,
    /// Category labels from the last successful fetch, in source order.
    pub categories: Vec<String>,
    /// Applied filter, or None for "All Categories".
    pub selected_category: Option<String>,
    /// 1-based page number; never 0.
    pub current_page: u32,
    /// True while a fetch is outstanding.
    pub loading: bool,
    pub error: Option<String>,

    // UI State
    pub focus: Focus,
    /// Highlighted row in the category selector. Row 0 is "All Categories".
    pub filter_cursor: usize,
    /// Index of the first article card drawn.
    pub article_scroll: usize,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,

    /// Generation counter for fetches to handle out-of-order settlement.
    ///
    /// Incremented each time a fetch is issued. A settlement whose generation
    /// doesn't match is discarded, so a slow response for an old filter can
    /// never overwrite the page the user asked for last.
    pub fetch_generation: u64,

    /// Handle to the in-flight fetch task.
    ///
    /// Aborted when a newer fetch is spawned and when the controller is disposed.
    pub fetch_handle: Option<tokio::task::JoinHandle<()>>,

    /// Set once the view is torn down; later settlements are ignored.
    pub disposed: bool,
}

impl App {
    pub fn new(source: Arc<dyn ArticleSource>, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        let warnings = keybindings.apply_overrides(&config.keybindings);
        for warning in &warnings {
            tracing::warn!(warning = %warning, "Keybinding override rejected");
        }

        let mut app = Self {
            source,
            fetch_timeout: config.fetch_timeout(),
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            articles: Vec::new(),
            categories: Vec::new(),
            selected_category: None,
            current_page: 1,
            loading: true,
            error: None,
            focus: Focus::Filter,
            filter_cursor: 0,
            article_scroll: 0,
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            fetch_generation: 0,
            fetch_handle: None,
            disposed: false,
        };

        if let Some(first) = warnings.first() {
            app.set_status(format!("Config: {}", first));
        }

        app
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    /// Issue the initial fetch for the default filter and page.
    pub fn mount(&mut self) -> FetchTicket {
        tracing::info!("Mounting article page");
        self.begin_fetch()
    }

    /// Enter the loading state and commit to a fetch of the current filter/page.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.error = None;
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.needs_redraw = true;

        let query = PageQuery::new(self.selected_category.clone(), self.current_page);
        tracing::debug!(
            generation = self.fetch_generation,
            category = query.category.as_deref().unwrap_or(""),
            page = query.page,
            "Issuing fetch"
        );

        FetchTicket {
            generation: self.fetch_generation,
            query,
        }
    }

    /// Apply a settled fetch.
    ///
    /// Returns false when the settlement was discarded (stale generation or
    /// disposed controller).
    pub fn apply_page_loaded(
        &mut self,
        generation: u64,
        result: Result<ArticlePage, SourceError>,
    ) -> bool {
        if self.disposed {
            tracing::debug!(generation, "Ignoring fetch settled after dispose");
            return false;
        }

        if generation != self.fetch_generation {
            tracing::debug!(
                expected = self.fetch_generation,
                got = generation,
                "Ignoring stale fetch (generation mismatch)"
            );
            return false;
        }

        self.fetch_handle = None;
        self.loading = false;
        self.needs_redraw = true;

        match result {
            Ok(page) => {
                tracing::debug!(
                    generation,
                    articles = page.articles.len(),
                    categories = page.categories.len(),
                    "Fetch applied"
                );
                self.articles = page.articles;
                self.categories = page.categories;
                self.error = None;
                self.clamp_selections();
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Failed to load articles");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }

        true
    }

    /// Tear the controller down: abort any in-flight fetch and refuse later results.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted in-flight fetch on dispose");
        }
        self.disposed = true;
    }

    // ========================================================================
    // User-initiated changes
    // ========================================================================

    /// Apply a value chosen in the category selector.
    ///
    /// `""` selects "All Categories". The page always resets to 1. Returns a
    /// ticket when the filter or page actually changed and a reload is due.
    pub fn handle_category_change(&mut self, value: &str) -> Option<FetchTicket> {
        let category = category_from_value(value);
        let changed = category != self.selected_category || self.current_page != 1;

        self.selected_category = category;
        self.current_page = 1;

        if changed {
            tracing::info!(category = value, "Category changed");
            self.article_scroll = 0;
            Some(self.begin_fetch())
        } else {
            None
        }
    }

    /// Move to the given page. Page 0 is rejected; there is no upper bound.
    pub fn handle_page_change(&mut self, page: u32) -> Option<FetchTicket> {
        if page == 0 {
            tracing::warn!("Rejected page change to 0");
            return None;
        }
        if page == self.current_page {
            return None;
        }

        tracing::info!(from = self.current_page, to = page, "Page changed");
        self.current_page = page;
        self.article_scroll = 0;
        Some(self.begin_fetch())
    }

    // ========================================================================
    // Rendering policy
    // ========================================================================

    /// Select what the main content area shows.
    pub fn content_view(&self) -> ContentView<'_> {
        if self.loading {
            ContentView::Loading
        } else if let Some(msg) = &self.error {
            ContentView::Error(msg)
        } else {
            ContentView::Articles {
                articles: &self.articles,
                page: self.current_page,
            }
        }
    }

    // ========================================================================
    // Category selector navigation
    // ========================================================================

    /// Number of selector rows, including "All Categories".
    pub fn filter_len(&self) -> usize {
        self.categories.len() + 1
    }

    /// Selector value under the cursor (`""` for "All Categories").
    pub fn filter_value_at_cursor(&self) -> &str {
        match self.filter_cursor.checked_sub(1) {
            Some(idx) => self.categories.get(idx).map(String::as_str).unwrap_or(""),
            None => "",
        }
    }

    /// Selector row of the applied filter, if it is still offered.
    pub fn applied_filter_index(&self) -> Option<usize> {
        match &self.selected_category {
            None => Some(0),
            Some(cat) => self.categories.iter().position(|c| c == cat).map(|i| i + 1),
        }
    }

    pub fn filter_cursor_down(&mut self) {
        if self.filter_cursor + 1 < self.filter_len() {
            self.filter_cursor += 1;
        }
    }

    pub fn filter_cursor_up(&mut self) {
        self.filter_cursor = self.filter_cursor.saturating_sub(1);
    }

    // ========================================================================
    // Article list navigation
    // ========================================================================

    pub fn scroll_articles_down(&mut self) {
        if self.article_scroll + 1 < self.articles.len() {
            self.article_scroll += 1;
        }
    }

    pub fn scroll_articles_up(&mut self) {
        self.article_scroll = self.article_scroll.saturating_sub(1);
    }

    /// Keep cursor and scroll inside the current collections.
    pub fn clamp_selections(&mut self) {
        self.filter_cursor = self.filter_cursor.min(self.filter_len().saturating_sub(1));
        self.article_scroll = self
            .article_scroll
            .min(self.articles.len().saturating_sub(1));
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Filter => Focus::Articles,
            Focus::Articles => Focus::Filter,
        };
    }

    // ========================================================================
    // Theme
    // ========================================================================

    /// Resolve a semantic style role.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    pub fn cycle_theme(&mut self) {
        let next = self.theme_variant.next();
        self.set_theme(next);
        self.set_status(format!("Theme: {}", next.name()));
    }

    // ========================================================================
    // Status messages
    // ========================================================================

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::{Action, Context};
    use crate::source::StubSource;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tokio::time;

    fn test_app() -> App {
        let source = Arc::new(StubSource::new(Duration::ZERO));
        App::new(source, &Config::default())
    }

    fn loaded_app() -> App {
        let mut app = test_app();
        let ticket = app.mount();
        app.apply_page_loaded(ticket.generation, Ok(StubSource::fixed_page()));
        app
    }

    // Initial state
    #[test]
    fn test_new_app_is_loading_with_empty_state() {
        let app = test_app();
        assert!(app.loading);
        assert!(app.error.is_none());
        assert!(app.articles.is_empty());
        assert!(app.categories.is_empty());
        assert_eq!(app.current_page, 1);
        assert_eq!(app.selected_category, None);
        assert_eq!(app.content_view(), ContentView::Loading);
    }

    #[test]
    fn test_mount_issues_default_query() {
        let mut app = test_app();
        let ticket = app.mount();
        assert_eq!(ticket.generation, 1);
        assert_eq!(ticket.query, PageQuery::new(None, 1));
        assert!(app.loading);
    }

    // Fetch settlement
    #[test]
    fn test_success_replaces_articles_and_categories() {
        let mut app = loaded_app();
        assert!(!app.loading);
        assert!(app.error.is_none());
        assert_eq!(app.articles.len(), 4);
        assert_eq!(
            app.categories,
            ["Business", "Technology", "Entertainment"]
        );

        // A second page fully replaces the first
        let ticket = app.handle_page_change(2).unwrap();
        let replacement = ArticlePage {
            articles: vec![Article {
                id: 9,
                title: "Only".to_string(),
                summary: "One".to_string(),
                image: "only.png".to_string(),
            }],
            categories: vec!["Sports".to_string()],
        };
        assert!(app.apply_page_loaded(ticket.generation, Ok(replacement.clone())));
        assert_eq!(app.articles, replacement.articles);
        assert_eq!(app.categories, replacement.categories);
    }

    #[test]
    fn test_failure_sets_generic_error_and_keeps_previous_data() {
        let mut app = loaded_app();
        let ticket = app.handle_page_change(2).unwrap();

        let applied = app.apply_page_loaded(
            ticket.generation,
            Err(SourceError::Unavailable("connection refused".to_string())),
        );

        assert!(applied);
        assert!(!app.loading);
        assert_eq!(app.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
        // Previous data is retained in state but not displayed
        assert_eq!(app.articles.len(), 4);
        assert_eq!(app.content_view(), ContentView::Error(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_begin_fetch_clears_error() {
        let mut app = test_app();
        let ticket = app.mount();
        app.apply_page_loaded(ticket.generation, Err(SourceError::Malformed("x".into())));
        assert!(app.error.is_some());

        app.handle_category_change("Business");
        assert!(app.error.is_none());
        assert!(app.loading);
        assert_eq!(app.content_view(), ContentView::Loading);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut app = test_app();
        let first = app.mount();
        let second = app.handle_category_change("Technology").unwrap();

        let stale = ArticlePage {
            articles: Vec::new(),
            categories: vec!["Stale".to_string()],
        };
        assert!(!app.apply_page_loaded(first.generation, Ok(stale)));
        assert!(app.loading, "stale settlement must not end the newer fetch");
        assert!(app.categories.is_empty());

        assert!(app.apply_page_loaded(second.generation, Ok(StubSource::fixed_page())));
        assert!(!app.loading);
        assert_eq!(app.articles.len(), 4);
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let mut app = test_app();
        let first = app.mount();
        let second = app.handle_page_change(3).unwrap();

        app.apply_page_loaded(second.generation, Ok(StubSource::fixed_page()));
        app.apply_page_loaded(first.generation, Err(SourceError::Timeout(Duration::from_secs(1))));

        assert!(app.error.is_none());
        assert_eq!(app.current_page, 3);
    }

    #[test]
    fn test_settlement_after_dispose_is_ignored() {
        let mut app = test_app();
        let ticket = app.mount();
        app.dispose();

        assert!(!app.apply_page_loaded(ticket.generation, Ok(StubSource::fixed_page())));
        assert!(app.articles.is_empty());
        assert!(app.disposed);
    }

    // Category changes
    #[test]
    fn test_category_change_resets_page() {
        let mut app = loaded_app();
        let ticket = app.handle_page_change(5).unwrap();
        app.apply_page_loaded(ticket.generation, Ok(StubSource::fixed_page()));

        let ticket = app.handle_category_change("Technology").unwrap();
        assert_eq!(app.current_page, 1);
        assert_eq!(app.selected_category.as_deref(), Some("Technology"));
        assert_eq!(
            ticket.query,
            PageQuery::new(Some("Technology".to_string()), 1)
        );
    }

    #[test]
    fn test_empty_value_means_all_categories() {
        let mut app = loaded_app();
        app.handle_category_change("Business");
        let ticket = app.handle_category_change("").unwrap();
        assert_eq!(app.selected_category, None);
        assert_eq!(ticket.query.category, None);
    }

    #[test]
    fn test_reselecting_same_filter_on_first_page_does_not_reload() {
        let mut app = loaded_app();
        assert!(app.handle_category_change("").is_none());
        assert!(!app.loading);
    }

    #[test]
    fn test_reselecting_same_filter_on_later_page_reloads_first_page() {
        let mut app = loaded_app();
        app.handle_page_change(4);
        let ticket = app.handle_category_change("").unwrap();
        assert_eq!(ticket.query.page, 1);
    }

    // Page changes
    #[test]
    fn test_page_zero_rejected() {
        let mut app = loaded_app();
        assert!(app.handle_page_change(0).is_none());
        assert_eq!(app.current_page, 1);
        assert!(!app.loading);
    }

    #[test]
    fn test_page_change_issues_reload() {
        let mut app = loaded_app();
        let ticket = app.handle_page_change(2).unwrap();
        assert_eq!(ticket.query.page, 2);
        assert_eq!(ticket.generation, 2);
        assert!(app.loading);
    }

    #[test]
    fn test_same_page_is_noop() {
        let mut app = loaded_app();
        assert!(app.handle_page_change(1).is_none());
    }

    // Selector navigation
    #[test]
    fn test_filter_cursor_bounds() {
        let mut app = loaded_app();
        app.filter_cursor_up();
        assert_eq!(app.filter_cursor, 0);
        assert_eq!(app.filter_value_at_cursor(), "");

        for _ in 0..10 {
            app.filter_cursor_down();
        }
        assert_eq!(app.filter_cursor, 3);
        assert_eq!(app.filter_value_at_cursor(), "Entertainment");
    }

    #[test]
    fn test_applied_filter_index() {
        let mut app = loaded_app();
        assert_eq!(app.applied_filter_index(), Some(0));
        app.handle_category_change("Technology");
        assert_eq!(app.applied_filter_index(), Some(2));
        app.selected_category = Some("Gone".to_string());
        assert_eq!(app.applied_filter_index(), None);
    }

    #[test]
    fn test_clamp_after_shorter_category_list() {
        let mut app = loaded_app();
        app.filter_cursor = 3;
        app.article_scroll = 3;
        let ticket = app.handle_page_change(2).unwrap();
        app.apply_page_loaded(
            ticket.generation,
            Ok(ArticlePage {
                articles: Vec::new(),
                categories: vec!["Solo".to_string()],
            }),
        );
        assert_eq!(app.filter_cursor, 1);
        assert_eq!(app.article_scroll, 0);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = test_app();
        assert_eq!(app.focus, Focus::Filter);
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Articles);
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Filter);
    }

    #[test]
    fn test_cycle_theme_sets_status() {
        let mut app = test_app();
        app.cycle_theme();
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_bad_keybinding_override_surfaces_status() {
        let mut config = Config::default();
        config
            .keybindings
            .insert("not_an_action".to_string(), "x".to_string());
        let app = App::new(Arc::new(StubSource::default()), &config);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_override_onto_quit_key_surfaces_status_and_keeps_quit() {
        let mut config = Config::default();
        config
            .keybindings
            .insert("next_page".to_string(), "q".to_string());
        let app = App::new(Arc::new(StubSource::default()), &config);

        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("already bound"));
        assert_eq!(
            app.keybindings
                .action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Filter),
            Some(Action::Quit)
        );
    }

    // Status message expiry with time control
    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        time::pause();
        let mut app = test_app();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    proptest! {
        #[test]
        fn prop_category_change_always_resets_page(
            prior_page in 1u32..10_000,
            category in "[A-Za-z]{0,12}",
        ) {
            let mut app = loaded_app();
            app.handle_page_change(prior_page);
            app.handle_category_change(&category);
            prop_assert_eq!(app.current_page, 1);
        }

        #[test]
        fn prop_success_always_ends_loading(
            page in 1u32..10_000,
            n_articles in 0usize..20,
        ) {
            let mut app = loaded_app();
            let ticket = app.handle_page_change(page).unwrap_or_else(|| app.begin_fetch());
            let articles: Vec<Article> = (0..n_articles as u64)
                .map(|id| Article {
                    id,
                    title: format!("T{}", id),
                    summary: String::new(),
                    image: String::new(),
                })
                .collect();
            let page_data = ArticlePage { articles: articles.clone(), categories: Vec::new() };
            app.apply_page_loaded(ticket.generation, Ok(page_data));
            prop_assert!(!app.loading);
            prop_assert_eq!(&app.articles, &articles);
            prop_assert!(app.categories.is_empty());
        }
    }
}
