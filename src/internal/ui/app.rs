use anyhow::Result;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use jiff::Timestamp;
use strum_macros::Display;

use crate::api::ApiService;
use crate::config::AppConfig;
use crate::internal::debounce::Debouncer;
use crate::internal::filters::{FilterOption, FilterState, cycle_option, cycle_window};
use crate::internal::models::Article;
use crate::internal::notification::Notification;
use crate::internal::preferences::{DARK_MODE_KEY, Preferences};
use crate::internal::render::{ArticleCard, ArticleListView, LOAD_ERROR_MESSAGE, render_articles};
use crate::utils::theme_loader::TuiTheme;

use ratatui::Frame;
use ratatui::widgets::ListState;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Input modes for the UI.
#[derive(Debug, PartialEq, Clone, Copy, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum InputMode {
    Normal,
    Search,
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    OpenSelected,
    /// Load filter options, then the first article list.
    Initialize,
    FilterOptionsLoaded {
        categories: Vec<String>,
        sources: Vec<String>,
    },
    LoadArticles,
    ArticlesLoaded(Vec<Article>),
    ArticlesFailed(String),
    CycleCategory { forward: bool },
    CycleSource { forward: bool },
    CycleWindow { forward: bool },
    ToggleDarkMode,
    ToggleBookmarksMode,
    ToggleBookmark,
    Refresh,
}

/// The page controller: filter state, mode flags and the rendered list.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub config: AppConfig,
    pub api_service: Arc<ApiService>,
    pub filters: FilterState,
    pub categories: Vec<FilterOption>,
    pub sources: Vec<FilterOption>,
    pub listing: ArticleListView,
    pub list_state: ListState,
    /// Busy flag: an article load is in flight.
    pub loading: bool,
    pub bookmarks_mode: bool,
    pub dark_mode: bool,
    pub theme: TuiTheme,
    pub preferences: Preferences,
    pub notification: Option<Notification>,
    pub input_mode: InputMode,
    pub search_debouncer: Debouncer,
    pub spinner_state: usize,
    pub last_spinner_update: Option<tokio::time::Instant>,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    #[tracing::instrument(skip(config))]
    pub fn new(config: AppConfig) -> Self {
        let api_service = ApiService::new(config.api_base_url.clone());
        let preferences = match Preferences::load_or_create() {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to load preferences: {:#}", e);
                Preferences::new()
            }
        };
        Self::with_services(config, api_service, preferences)
    }

    /// Build the controller around explicit collaborators.
    ///
    /// The dark-mode preference is applied here, before anything is drawn.
    pub fn with_services(
        config: AppConfig,
        api_service: ApiService,
        preferences: Preferences,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let dark_mode = preferences.get_bool(DARK_MODE_KEY);
        let theme = TuiTheme::resolve(config.theme_file.as_deref(), dark_mode);

        tracing::info!(
            api_base_url = %api_service.base_url(),
            dark_mode,
            "App initialized"
        );

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            filters: FilterState::new(config.default_window_days),
            categories: Vec::new(),
            sources: Vec::new(),
            listing: ArticleListView::default(),
            list_state: ListState::default(),
            loading: false,
            bookmarks_mode: false,
            dark_mode,
            theme,
            preferences,
            notification: None,
            input_mode: InputMode::Normal,
            search_debouncer: Debouncer::new(config.search_debounce()),
            spinner_state: 0,
            last_spinner_update: None,
            api_service: Arc::new(api_service),
            config,
            action_tx,
            action_rx,
        }
    }

    fn dispatch(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Show the article-load error banner
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(
            Notification::error(message).with_timeout(self.config.error_banner_timeout()),
        );
    }

    /// Show a short note unless an error banner is still up.
    pub fn notify_info(&mut self, message: impl Into<String>) {
        if self.notification.as_ref().is_some_and(Notification::is_error) {
            return;
        }
        self.notification = Some(Notification::info(message));
    }

    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    pub fn dark_mode_icon(&self) -> &'static str {
        if self.dark_mode { "☀" } else { "☾" }
    }

    pub fn get_spinner_char(&self) -> &'static str {
        SPINNER[self.spinner_state % SPINNER.len()]
    }

    pub fn selected_card(&self) -> Option<&ArticleCard> {
        self.list_state
            .selected()
            .and_then(|i| self.listing.cards().get(i))
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        self.dispatch(Action::Initialize);

        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Update spinner animation every 100ms
            let now = tokio::time::Instant::now();
            match self.last_spinner_update {
                Some(last_update) if now.duration_since(last_update).as_millis() >= 100 => {
                    self.spinner_state = self.spinner_state.wrapping_add(1);
                    self.last_spinner_update = Some(now);
                }
                Some(_) => {}
                None => self.last_spinner_update = Some(now),
            }

            // Auto-dismiss expired notifications
            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.clear_notification();
            }

            tui.draw(|f| self.ui(f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.dispatch(Action::Quit);
            return;
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.filters.search_text.push(c);
                self.schedule_search();
            }
            KeyCode::Backspace => {
                if self.filters.search_text.pop().is_some() {
                    self.schedule_search();
                }
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn schedule_search(&mut self) {
        self.search_debouncer
            .schedule(self.action_tx.clone(), Action::LoadArticles);
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                return;
            }
            KeyCode::Char('j') | KeyCode::Down => Action::NavigateDown,
            KeyCode::Char('k') | KeyCode::Up => Action::NavigateUp,
            KeyCode::Char('o') | KeyCode::Enter => Action::OpenSelected,
            KeyCode::Char('c') => Action::CycleCategory { forward: true },
            KeyCode::Char('C') => Action::CycleCategory { forward: false },
            KeyCode::Char('s') => Action::CycleSource { forward: true },
            KeyCode::Char('S') => Action::CycleSource { forward: false },
            KeyCode::Char('t') => Action::CycleWindow { forward: true },
            KeyCode::Char('T') => Action::CycleWindow { forward: false },
            KeyCode::Char('d') => Action::ToggleDarkMode,
            KeyCode::Char('b') => Action::ToggleBookmarksMode,
            KeyCode::Char(' ') => Action::ToggleBookmark,
            KeyCode::Char('r') => Action::Refresh,
            _ => return,
        };
        self.dispatch(action);
    }

    /// Central update function: apply one action to the controller state.
    #[tracing::instrument(skip(self, action))]
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp => self.select_prev(),
            Action::NavigateDown => self.select_next(),
            Action::OpenSelected => {
                if let Some(card) = self.selected_card()
                    && let Err(e) = open::that(&card.url)
                {
                    tracing::error!(%e, url = %card.url, "Failed to open article");
                }
            }
            Action::Initialize => self.initialize(),
            Action::FilterOptionsLoaded {
                categories,
                sources,
            } => {
                self.categories = categories.into_iter().map(FilterOption::category).collect();
                self.sources = sources.into_iter().map(FilterOption::source).collect();
            }
            Action::LoadArticles => self.load_articles(),
            Action::ArticlesLoaded(articles) => {
                self.listing = render_articles(Some(articles.as_slice()), Timestamp::now());
                let first = if self.listing.cards().is_empty() {
                    None
                } else {
                    Some(0)
                };
                self.list_state.select(first);
                self.loading = false;
            }
            Action::ArticlesFailed(detail) => {
                tracing::error!("Error fetching articles: {}", detail);
                self.notify_error(LOAD_ERROR_MESSAGE);
                self.listing = ArticleListView::LoadFailed;
                self.list_state.select(None);
                self.loading = false;
            }
            Action::CycleCategory { forward } => {
                self.filters.category = cycle_option(&self.categories, &self.filters.category, forward);
                self.dispatch(Action::LoadArticles);
            }
            Action::CycleSource { forward } => {
                self.filters.source = cycle_option(&self.sources, &self.filters.source, forward);
                self.dispatch(Action::LoadArticles);
            }
            Action::CycleWindow { forward } => {
                self.filters.window_days =
                    cycle_window(&self.config.window_options, self.filters.window_days, forward);
                self.dispatch(Action::LoadArticles);
            }
            Action::ToggleDarkMode => self.toggle_dark_mode(),
            Action::ToggleBookmarksMode => {
                self.bookmarks_mode = !self.bookmarks_mode;
                tracing::info!(bookmarks_mode = self.bookmarks_mode, "Toggled bookmarks mode");
                self.dispatch(Action::LoadArticles);
            }
            Action::ToggleBookmark => self.toggle_bookmark(),
            Action::Refresh => {
                self.search_debouncer.cancel();
                self.filters.reset();
                self.dispatch(Action::LoadArticles);
            }
        }
    }

    /// Filter options first, then the article list, in that order.
    fn initialize(&mut self) {
        let api = self.api_service.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let categories = api.fetch_categories().await.unwrap_or_else(|e| {
                tracing::error!(%e, "Error fetching categories");
                Vec::new()
            });
            let sources = api.fetch_sources().await.unwrap_or_else(|e| {
                tracing::error!(%e, "Error fetching sources");
                Vec::new()
            });
            let _ = tx.send(Action::FilterOptionsLoaded {
                categories,
                sources,
            });
            let _ = tx.send(Action::LoadArticles);
        });
    }

    fn load_articles(&mut self) {
        if self.loading {
            tracing::info!("Already loading articles, skipping fetch");
            return;
        }

        self.loading = true;
        if self.notification.as_ref().is_some_and(Notification::is_error) {
            self.clear_notification();
        }

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();
        let filters = self.filters.clone();
        let bookmarks_mode = self.bookmarks_mode;
        tracing::info!(?filters, bookmarks_mode, "Fetching articles");

        tokio::spawn(async move {
            let action = match api.load_articles(&filters, bookmarks_mode).await {
                Ok(articles) => Action::ArticlesLoaded(articles),
                Err(e) => Action::ArticlesFailed(e.to_string()),
            };
            let _ = tx.send(action);
        });
    }

    fn toggle_bookmark(&mut self) {
        let Some((article_id, bookmarked)) = self.selected_card().map(|c| (c.id, c.bookmarked))
        else {
            return;
        };

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = api.toggle_bookmark(article_id, bookmarked).await {
                tracing::error!(%e, article_id, "Error toggling bookmark");
            }
            let _ = tx.send(Action::LoadArticles);
        });
    }

    fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme = TuiTheme::resolve(self.config.theme_file.as_deref(), self.dark_mode);
        self.preferences.set_bool(DARK_MODE_KEY, self.dark_mode);
        if let Err(e) = self.preferences.save() {
            tracing::error!("Failed to save dark mode preference: {:#}", e);
        }
        self.notify_info(if self.dark_mode {
            "Dark mode on"
        } else {
            "Dark mode off"
        });
    }

    fn select_next(&mut self) {
        let len = self.listing.cards().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.listing.cards().is_empty() {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.list_state.select(Some(i));
    }

    pub fn ui(&mut self, f: &mut Frame) {
        crate::internal::ui::view::draw(self, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::render::{LOAD_FAILED, UNKNOWN_SOURCE};
    use mockito::Matcher;
    use std::time::Duration;

    const TWO_ARTICLES: &str = r#"[
        {"id": 1, "title": "Bookmarked one", "url": "https://n.example/1", "source": "Wire",
         "published_at": "2024-05-01T10:00:00", "is_bookmarked": true},
        {"id": 2, "title": "Sourceless", "url": "https://n.example/2",
         "published_at": "2024-05-01T09:00:00", "is_bookmarked": false}
    ]"#;

    fn test_app(base_url: &str) -> App {
        App::with_services(
            AppConfig::default(),
            ApiService::new(base_url),
            Preferences::new(),
        )
    }

    async fn next_action(app: &mut App) -> Action {
        tokio::time::timeout(Duration::from_secs(5), app.action_rx.recv())
            .await
            .expect("timed out waiting for action")
            .expect("action channel closed")
    }

    fn press(app: &mut App, c: char) {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn second_load_while_busy_is_dropped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/articles")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(TWO_ARTICLES)
            .expect(1)
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.handle_action(Action::LoadArticles);
        assert!(app.loading);
        app.handle_action(Action::LoadArticles);

        let action = next_action(&mut app).await;
        assert!(matches!(action, Action::ArticlesLoaded(_)));
        app.handle_action(action);

        assert!(!app.loading);
        mock.assert_async().await;

        let cards = app.listing.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Bookmarked one");
        assert_eq!(cards[1].source_label, UNKNOWN_SOURCE);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn bookmarks_mode_switches_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let bookmarks = server
            .mock("GET", "/api/bookmarks")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        let articles = server
            .mock("GET", "/api/articles")
            .match_query(Matcher::UrlEncoded("q".into(), "rust".into()))
            .with_status(200)
            .with_body(TWO_ARTICLES)
            .expect(1)
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.filters.search_text = "rust".to_string();

        app.handle_action(Action::ToggleBookmarksMode);
        assert!(app.bookmarks_mode);
        assert_eq!(next_action(&mut app).await, Action::LoadArticles);
        app.handle_action(Action::LoadArticles);
        let loaded = next_action(&mut app).await;
        app.handle_action(loaded);
        assert_eq!(app.listing, ArticleListView::NoResults);

        app.handle_action(Action::ToggleBookmarksMode);
        assert!(!app.bookmarks_mode);
        assert_eq!(next_action(&mut app).await, Action::LoadArticles);
        app.handle_action(Action::LoadArticles);
        let loaded = next_action(&mut app).await;
        app.handle_action(loaded);
        assert_eq!(app.listing.cards().len(), 2);

        bookmarks.assert_async().await;
        articles.assert_async().await;
    }

    #[tokio::test]
    async fn failed_loads_show_banner_and_placeholder() {
        for (status, body) in [(500, "[]"), (200, r#"{"error": "oops"}"#), (200, "<html>")] {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("GET", "/api/articles")
                .match_query(Matcher::Any)
                .with_status(status)
                .with_body(body)
                .create_async()
                .await;

            let mut app = test_app(&server.url());
            app.handle_action(Action::LoadArticles);
            let action = next_action(&mut app).await;
            assert!(matches!(action, Action::ArticlesFailed(_)), "{status} {body}");
            app.handle_action(action);

            assert!(!app.loading);
            assert_eq!(app.listing, ArticleListView::LoadFailed);
            assert_eq!(app.listing.placeholder(), Some(LOAD_FAILED));
            let banner = app.notification.as_ref().expect("error banner");
            assert!(banner.is_error());
            assert_eq!(banner.message, LOAD_ERROR_MESSAGE);
            assert_eq!(banner.timeout, Duration::from_secs(5));
        }
    }

    #[tokio::test]
    async fn unreachable_backend_clears_busy_flag() {
        let mut app = test_app("http://localhost:1");
        app.handle_action(Action::LoadArticles);
        let action = next_action(&mut app).await;
        app.handle_action(action);
        assert!(!app.loading);
        assert_eq!(app.listing, ArticleListView::LoadFailed);
    }

    #[tokio::test]
    async fn new_load_clears_error_banner() {
        let mut app = test_app("http://localhost:1");
        app.notify_error(LOAD_ERROR_MESSAGE);
        app.handle_action(Action::LoadArticles);
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn search_keystrokes_coalesce_into_one_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/articles")
            .match_query(Matcher::UrlEncoded("q".into(), "rust".into()))
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let config = AppConfig {
            search_debounce_ms: 50,
            ..AppConfig::default()
        };
        let mut app = App::with_services(config, ApiService::new(server.url()), Preferences::new());

        press(&mut app, '/');
        assert_eq!(app.input_mode, InputMode::Search);
        for c in "rust".chars() {
            press(&mut app, c);
        }
        assert_eq!(app.filters.search_text, "rust");
        assert!(app.action_rx.try_recv().is_err());

        assert_eq!(next_action(&mut app).await, Action::LoadArticles);
        let quiet = tokio::time::timeout(Duration::from_millis(200), app.action_rx.recv()).await;
        assert!(quiet.is_err(), "only one debounced load expected");

        app.handle_action(Action::LoadArticles);
        let loaded = next_action(&mut app).await;
        app.handle_action(loaded);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn refresh_resets_filters_and_reloads() {
        let mut app = test_app("http://localhost:1");
        app.filters.search_text = "election".to_string();
        app.filters.category = "politics".to_string();
        app.filters.source = "Reuters".to_string();
        app.filters.window_days = 30;

        app.handle_action(Action::Refresh);

        assert_eq!(app.filters, FilterState::default());
        assert_eq!(app.action_rx.try_recv().ok(), Some(Action::LoadArticles));
    }

    #[tokio::test]
    async fn selector_changes_reload_immediately() {
        let mut app = test_app("http://localhost:1");
        app.handle_action(Action::FilterOptionsLoaded {
            categories: vec!["business".to_string(), "science".to_string()],
            sources: vec!["BBC News".to_string()],
        });
        assert_eq!(app.categories[0].label, "Business");
        assert_eq!(app.sources[0].label, "BBC News");

        app.handle_action(Action::CycleCategory { forward: true });
        assert_eq!(app.filters.category, "business");
        assert_eq!(app.action_rx.try_recv().ok(), Some(Action::LoadArticles));

        app.handle_action(Action::CycleSource { forward: false });
        assert_eq!(app.filters.source, "BBC News");
        assert_eq!(app.action_rx.try_recv().ok(), Some(Action::LoadArticles));

        app.handle_action(Action::CycleWindow { forward: true });
        assert_eq!(app.filters.window_days, 30);
        assert_eq!(app.action_rx.try_recv().ok(), Some(Action::LoadArticles));
    }

    #[tokio::test]
    async fn initialize_loads_options_before_articles() {
        let mut server = mockito::Server::new_async().await;
        let _categories = server
            .mock("GET", "/api/categories")
            .with_status(500)
            .create_async()
            .await;
        let _sources = server
            .mock("GET", "/api/sources")
            .with_status(200)
            .with_body(r#"["BBC News", "The Verge"]"#)
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.handle_action(Action::Initialize);

        let options = next_action(&mut app).await;
        assert!(matches!(options, Action::FilterOptionsLoaded { .. }));
        app.handle_action(options);
        assert!(app.categories.is_empty());
        assert_eq!(app.sources.len(), 2);
        assert_eq!(app.sources[1].label, "The Verge");

        assert_eq!(next_action(&mut app).await, Action::LoadArticles);
    }

    #[tokio::test]
    async fn toggling_bookmark_always_reloads() {
        let mut server = mockito::Server::new_async().await;
        let delete = server
            .mock("DELETE", "/api/bookmarks")
            .match_body(Matcher::Json(serde_json::json!({"article_id": 1})))
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        let articles: Vec<Article> = serde_json::from_str(TWO_ARTICLES).unwrap();
        app.handle_action(Action::ArticlesLoaded(articles));
        assert!(app.selected_card().unwrap().bookmarked);

        app.handle_action(Action::ToggleBookmark);
        assert_eq!(next_action(&mut app).await, Action::LoadArticles);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn toggle_bookmark_without_selection_is_noop() {
        let mut app = test_app("http://localhost:1");
        app.handle_action(Action::ToggleBookmark);
        tokio::task::yield_now().await;
        assert!(app.action_rx.try_recv().is_err());
    }

    #[test]
    fn dark_mode_toggle_persists_preference() {
        let path = std::env::temp_dir().join(format!(
            "tui-news-app-app-dark-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let prefs = Preferences::load_from(path.clone()).unwrap();

        let mut app = App::with_services(
            AppConfig::default(),
            ApiService::new("http://localhost:1"),
            prefs,
        );
        assert!(!app.dark_mode);
        assert_eq!(app.dark_mode_icon(), "☾");

        app.handle_action(Action::ToggleDarkMode);
        assert!(app.dark_mode);
        assert_eq!(app.dark_mode_icon(), "☀");
        assert_eq!(app.theme, TuiTheme::dark());

        // A fresh app reads the preference before its first frame
        let reloaded = Preferences::load_from(path.clone()).unwrap();
        let restarted = App::with_services(
            AppConfig::default(),
            ApiService::new("http://localhost:1"),
            reloaded,
        );
        assert!(restarted.dark_mode);
        assert_eq!(restarted.theme, TuiTheme::dark());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn dark_mode_toggle_keeps_error_banner() {
        let mut app = test_app("http://localhost:1");
        app.handle_action(Action::ArticlesFailed("HTTP error 500".to_string()));

        app.handle_action(Action::ToggleDarkMode);
        let banner = app.notification.as_ref().unwrap();
        assert!(banner.is_error());
        assert_eq!(banner.message, LOAD_ERROR_MESSAGE);
        assert_eq!(app.dark_mode_icon(), "☀");

        app.clear_notification();
        app.handle_action(Action::ToggleDarkMode);
        let note = app.notification.as_ref().unwrap();
        assert!(!note.is_error());
        assert_eq!(note.message, "Dark mode off");
    }

    #[test]
    fn keys_map_to_actions() {
        let mut app = test_app("http://localhost:1");
        for (c, expected) in [
            ('b', Action::ToggleBookmarksMode),
            ('d', Action::ToggleDarkMode),
            ('r', Action::Refresh),
            (' ', Action::ToggleBookmark),
            ('c', Action::CycleCategory { forward: true }),
            ('T', Action::CycleWindow { forward: false }),
            ('q', Action::Quit),
        ] {
            press(&mut app, c);
            assert_eq!(app.action_rx.try_recv().ok(), Some(expected));
        }
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut app = test_app("http://localhost:1");
        app.handle_action(Action::NavigateDown);
        assert_eq!(app.list_state.selected(), None);

        let articles: Vec<Article> = serde_json::from_str(TWO_ARTICLES).unwrap();
        app.handle_action(Action::ArticlesLoaded(articles));
        app.handle_action(Action::NavigateDown);
        app.handle_action(Action::NavigateDown);
        assert_eq!(app.list_state.selected(), Some(1));
        app.handle_action(Action::NavigateUp);
        app.handle_action(Action::NavigateUp);
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
