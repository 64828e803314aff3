//! # Browse Engine
//!
//! This module coordinates the whole browse flow:
//! 1. User actions mutate `BrowseState` (filters, page, window)
//! 2. The sync controller turns state changes into fetch requests
//! 3. Requests run against the store on spawned tasks (remote mode) or are
//!    answered synchronously from an in-memory list (local mode)
//! 4. Completions come back as `EngineEvent`s and are applied one at a time
//!
//! The engine is owned by a single task. Spawned tasks never touch engine
//! state; they only post events, so no locking is needed.
//!
//! ```ignore
//! let mut engine = BrowseEngine::new(store, &BrowseConfig::default());
//! engine.start();
//! engine.set_filter_field(FilterField::Gender(Some("men".into())));
//! engine.settle().await;
//! for perfume in engine.visible_items() { /* ... */ }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use catalog::{FilterCriteria, FilterField, Perfume, ResultPage};
use catalog_store::{CatalogStore, StoreError};
use matcher::filter_collection;

use crate::config::BrowseConfig;
use crate::error::BrowseError;
use crate::event::EngineEvent;
use crate::navigation::NavKey;
use crate::pagination::PaginationSummary;
use crate::state::BrowseState;
use crate::suggestions::{KeyAction, SuggestionController, SuggestionRequest};
use crate::sync::{CountRequest, FetchRequest, PageRequest, SyncController};

/// Where page and count requests are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Through the `CatalogStore`, asynchronously
    Remote,
    /// From an in-memory list, synchronously
    Local,
}

/// In-memory item list for local mode, with the last filter result cached.
struct LocalResults {
    perfumes: Vec<Perfume>,
    filtered: Vec<Perfume>,
    filtered_for: Option<FilterCriteria>,
}

impl LocalResults {
    fn new(perfumes: Vec<Perfume>) -> Self {
        Self {
            perfumes,
            filtered: Vec::new(),
            filtered_for: None,
        }
    }

    fn matching(&mut self, criteria: &FilterCriteria) -> &[Perfume] {
        if self.filtered_for.as_ref() != Some(criteria) {
            self.filtered = filter_collection(&self.perfumes, criteria);
            self.filtered_for = Some(criteria.clone());
        }
        &self.filtered
    }

    fn page(&mut self, request: &PageRequest) -> ResultPage {
        let per_page = request.items_per_page as usize;
        let start = (request.page_number as usize)
            .saturating_sub(1)
            .saturating_mul(per_page);
        let items = self
            .matching(&request.criteria)
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();
        ResultPage::new(request.page_number, items)
    }

    fn count(&mut self, request: &CountRequest) -> u64 {
        self.matching(&request.criteria).len() as u64
    }
}

pub struct BrowseEngine<S: CatalogStore> {
    store: Arc<S>,
    state: BrowseState,
    sync: SyncController,
    suggestions: SuggestionController,
    local: Option<LocalResults>,
    events_tx: mpsc::UnboundedSender<EngineEvent>,
    events_rx: mpsc::UnboundedReceiver<EngineEvent>,
    in_flight: usize,
}

impl<S: CatalogStore> BrowseEngine<S> {
    /// Create an engine that serves pages and counts from `store`.
    ///
    /// # Arguments
    /// * `store` - Shared store, also used for suggestions
    /// * `config` - Page size, window increment and timer delays
    pub fn new(store: Arc<S>, config: &BrowseConfig) -> Self {
        let mut state = BrowseState::new(config);
        let sync = SyncController::new(&mut state, config.collection.clone());
        let suggestions = SuggestionController::new(
            config.debounce_delay(),
            config.blur_grace(),
            config.suggestion_limit,
        );
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            store,
            state,
            sync,
            suggestions,
            local: None,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    /// Create an engine that filters and paginates `perfumes` in memory.
    /// Suggestions still go through `store`.
    pub fn with_local_catalog(store: Arc<S>, config: &BrowseConfig, perfumes: Vec<Perfume>) -> Self {
        let mut engine = Self::new(store, config);
        engine.local = Some(LocalResults::new(perfumes));
        engine
    }

    pub fn mode(&self) -> SearchMode {
        if self.local.is_some() {
            SearchMode::Local
        } else {
            SearchMode::Remote
        }
    }

    /// Initial load: the first page and the total count.
    pub fn start(&mut self) {
        info!("Starting browse engine in {:?} mode", self.mode());
        let requests = self.sync.initial_requests(&self.state);
        self.execute(requests);
        self.dispatch();
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    pub fn set_filter_field(&mut self, field: FilterField) {
        self.state.set_filter_field(field);
        self.dispatch();
    }

    pub fn clear_filters(&mut self) {
        self.state.clear_filters();
        self.dispatch();
    }

    /// Go to page `n`. Out-of-range pages leave everything unchanged.
    pub fn set_page(&mut self, n: u32) -> Result<(), BrowseError> {
        self.state.set_page(n)?;
        self.dispatch();
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), BrowseError> {
        self.state.next_page()?;
        self.dispatch();
        Ok(())
    }

    pub fn prev_page(&mut self) -> Result<(), BrowseError> {
        self.state.prev_page()?;
        self.dispatch();
        Ok(())
    }

    /// Input text changed; suggestions are fetched once typing pauses.
    pub fn on_text_changed(&mut self, text: &str) {
        self.suggestions.on_text_changed(text, &self.events_tx);
    }

    /// Commit `name` as the search query.
    pub fn select_suggestion(&mut self, name: &str) {
        self.suggestions.select(name);
        self.set_filter_field(FilterField::SearchQuery(name.to_string()));
    }

    pub fn on_key(&mut self, key: NavKey) {
        if let KeyAction::Commit(text) = self.suggestions.on_key(key) {
            self.set_filter_field(FilterField::SearchQuery(text));
        }
    }

    pub fn on_focus(&mut self) {
        self.suggestions.on_focus();
    }

    pub fn on_blur(&mut self) {
        self.suggestions.on_blur(&self.events_tx);
    }

    /// Scroll sentinel reached: show more of the current results.
    pub fn grow_window(&mut self) -> bool {
        let len = self.sync.items().len();
        self.state.grow_window(len)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn visible_items(&self) -> &[Perfume] {
        self.state.window().slice(self.sync.items())
    }

    /// Size of the infinite-scroll window.
    pub fn loaded_count(&self) -> usize {
        self.state.window().loaded_count()
    }

    pub fn pagination_summary(&self) -> PaginationSummary {
        self.state.summary()
    }

    pub fn suggestions(&self) -> &[String] {
        self.suggestions.results()
    }

    pub fn suggestions_open(&self) -> bool {
        self.suggestions.state().open
    }

    pub fn selected_suggestion(&self) -> Option<usize> {
        self.suggestions.state().selected
    }

    pub fn input_text(&self) -> &str {
        &self.suggestions.state().input_text
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.state.criteria()
    }

    /// Error from the latest page fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&BrowseError> {
        self.sync.last_error()
    }

    pub fn is_loading(&self) -> bool {
        self.sync.is_loading()
    }

    /// True when no fetch is in flight and no timer is armed.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && !self.suggestions.has_armed_timers()
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Wait for the next completion. Returns `None` when idle.
    pub async fn next_event(&mut self) -> Option<EngineEvent> {
        if self.is_idle() {
            return None;
        }
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        if event.is_fetch_completion() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        match event {
            EngineEvent::DebounceElapsed { generation } => {
                if let Some(request) = self.suggestions.on_debounce_elapsed(generation) {
                    self.spawn_suggestions(request);
                }
            }
            EngineEvent::BlurGraceElapsed { generation } => {
                self.suggestions.on_blur_elapsed(generation);
            }
            EngineEvent::PageLoaded { token, result } => {
                let applied = self.sync.apply_page(token, result);
                self.page_applied(applied);
            }
            EngineEvent::CountLoaded { token, result } => {
                let applied = self.sync.apply_count(token, result, &mut self.state);
                log_outcome("count", applied);
                self.dispatch();
            }
            EngineEvent::SuggestionsLoaded { token, result } => {
                let applied = self.suggestions.apply(token, result);
                log_outcome("suggestions", applied);
            }
        }
    }

    /// Process events until the engine is idle.
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_event().await {
            self.handle_event(event);
        }
    }

    /// Turn pending state changes into requests until none are left.
    /// Local requests can change state again (a count may clamp the page).
    fn dispatch(&mut self) {
        loop {
            let requests = self.sync.poll_changes(&self.state);
            if requests.is_empty() {
                break;
            }
            self.execute(requests);
        }
    }

    fn execute(&mut self, requests: Vec<FetchRequest>) {
        for request in requests {
            if self.local.is_some() {
                self.serve_locally(request);
            } else {
                self.spawn_fetch(request);
            }
        }
    }

    fn serve_locally(&mut self, request: FetchRequest) {
        let Some(local) = self.local.as_mut() else {
            return;
        };
        match request {
            FetchRequest::Page(page) => {
                let result = local.page(&page);
                let applied = self.sync.apply_page(page.token, Ok(result));
                self.page_applied(applied);
            }
            FetchRequest::Count(count) => {
                let total = local.count(&count);
                let applied = self.sync.apply_count(count.token, Ok(total), &mut self.state);
                log_outcome("count", applied);
            }
        }
    }

    fn page_applied(&mut self, applied: Result<(), BrowseError>) {
        if applied.is_ok() {
            self.state.reset_window();
        }
        log_outcome("page", applied);
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        self.in_flight += 1;
        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();

        match request {
            FetchRequest::Page(page) => {
                debug!("Fetching page {} ({})", page.page_number, page.token);
                let token = page.token;
                spawn_completion(
                    tx,
                    async move {
                        store
                            .query_page(&page.criteria, page.page_number, page.items_per_page)
                            .await
                    },
                    move |result| EngineEvent::PageLoaded { token, result },
                );
            }
            FetchRequest::Count(count) => {
                debug!("Fetching count for {} ({})", count.collection, count.token);
                let token = count.token;
                spawn_completion(
                    tx,
                    async move { store.query_count(&count.collection, &count.criteria).await },
                    move |result| EngineEvent::CountLoaded { token, result },
                );
            }
        }
    }

    fn spawn_suggestions(&mut self, request: SuggestionRequest) {
        self.in_flight += 1;
        let store = Arc::clone(&self.store);
        let token = request.token;

        spawn_completion(
            self.events_tx.clone(),
            async move { store.query_suggestions(&request.prefix).await },
            move |result| EngineEvent::SuggestionsLoaded { token, result },
        );
    }
}

/// Run `fetch` on its own task and always post exactly one completion.
///
/// A panicking store call is reported as a failed fetch, so `in_flight`
/// still drops back to zero and `settle` returns.
fn spawn_completion<T, F, E>(tx: mpsc::UnboundedSender<EngineEvent>, fetch: F, into_event: E)
where
    T: Send + 'static,
    F: Future<Output = Result<T, StoreError>> + Send + 'static,
    E: FnOnce(Result<T, StoreError>) -> EngineEvent + Send + 'static,
{
    tokio::spawn(async move {
        let result = match tokio::spawn(fetch).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Fetch task ended abnormally: {}", e);
                Err(StoreError::Unavailable(format!("fetch task failed: {e}")))
            }
        };
        let _ = tx.send(into_event(result));
    });
}

fn log_outcome(what: &str, outcome: Result<(), BrowseError>) {
    match outcome {
        Ok(()) => {}
        Err(e) if e.is_benign() => debug!("{} response ignored: {}", what, e),
        Err(e) => warn!("{} response failed: {}", what, e),
    }
}
