//! Integration tests for the browse engine in remote mode.
//!
//! All tests run on a paused clock, so store latency and debounce timers
//! are deterministic.

use std::sync::Arc;
use std::time::Duration;

use browse::{BrowseConfig, BrowseEngine, BrowseError, Concern, NavKey, PaginationSummary};
use catalog::{CatalogIndex, FilterCriteria, FilterField, Perfume, ResultPage};
use catalog_store::{CatalogStore, InMemoryStore, StoreError};

fn catalog_of(size: usize) -> Vec<Perfume> {
    (1..=size)
        .map(|i| {
            let brand = if i % 5 == 0 { "Dior" } else { "Chanel" };
            Perfume::new(format!("Perfume {i:02}")).with_brand(brand)
        })
        .collect()
}

fn store_over(perfumes: Vec<Perfume>) -> InMemoryStore {
    InMemoryStore::new(Arc::new(CatalogIndex::new(perfumes)))
}

fn names(engine: &BrowseEngine<InMemoryStore>) -> Vec<String> {
    engine.visible_items().iter().map(|p| p.name.clone()).collect()
}

/// Handle events until `duration` has passed on the paused clock.
async fn pump_for<S: CatalogStore>(engine: &mut BrowseEngine<S>, duration: Duration) {
    let deadline = tokio::time::Instant::now() + duration;
    while let Ok(Some(event)) = tokio::time::timeout_at(deadline, engine.next_event()).await {
        engine.handle_event(event);
    }
}

async fn started(store: Arc<InMemoryStore>) -> BrowseEngine<InMemoryStore> {
    let mut engine = BrowseEngine::new(store, &BrowseConfig::default());
    engine.start();
    engine.settle().await;
    engine
}

// ============================================================================
// Initial load and pagination
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_start_loads_first_page_and_count() {
    let store = Arc::new(store_over(catalog_of(45)));
    let engine = started(Arc::clone(&store)).await;

    assert_eq!(engine.visible_items().len(), 20);
    assert_eq!(
        engine.pagination_summary(),
        PaginationSummary {
            page_number: 1,
            total_pages: 3,
            has_next: true,
            has_prev: false
        }
    );
    assert_eq!(store.requested_pages(), vec![1]);
    assert_eq!(store.count_calls(), 1);
    assert!(!engine.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_pagination_clamp() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = started(Arc::clone(&store)).await;

    let err = engine.set_page(4).unwrap_err();
    assert!(matches!(err, BrowseError::InvalidPageRequest { requested: 4, total_pages: 3 }));
    engine.settle().await;
    assert_eq!(store.requested_pages(), vec![1], "Out-of-range page must not fetch");

    engine.set_page(3).unwrap();
    engine.settle().await;
    assert_eq!(engine.visible_items().len(), 5);
    assert_eq!(engine.visible_items()[0].name, "Perfume 41");
    assert!(!engine.pagination_summary().has_next);
}

#[tokio::test(start_paused = true)]
async fn test_next_and_prev_page() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = started(Arc::clone(&store)).await;

    assert!(engine.prev_page().is_err());
    engine.next_page().unwrap();
    engine.settle().await;
    assert_eq!(engine.visible_items()[0].name, "Perfume 21");

    engine.prev_page().unwrap();
    engine.settle().await;
    assert_eq!(engine.visible_items()[0].name, "Perfume 01");
    assert_eq!(store.requested_pages(), vec![1, 2, 1]);
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_has_a_single_page() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = started(Arc::clone(&store)).await;

    engine.set_filter_field(FilterField::Brand(Some("Nobody".to_string())));
    engine.settle().await;
    assert!(engine.visible_items().is_empty());

    let err = engine.next_page().unwrap_err();
    assert!(matches!(err, BrowseError::InvalidPageRequest { requested: 2, total_pages: 0 }));
    assert!(engine.set_page(3).is_err());
    engine.settle().await;

    assert_eq!(
        engine.pagination_summary(),
        PaginationSummary {
            page_number: 1,
            total_pages: 0,
            has_next: false,
            has_prev: false
        }
    );
    assert_eq!(store.requested_pages(), vec![1, 1], "Rejected pages must not fetch");
}

#[tokio::test(start_paused = true)]
async fn test_stale_page_response_is_discarded() {
    let store = Arc::new(
        store_over(catalog_of(45)).with_page_latency(1, Duration::from_millis(500)),
    );
    let mut engine = BrowseEngine::new(Arc::clone(&store), &BrowseConfig::default());

    // Fetch A: page 1, slow
    engine.start();
    assert!(engine.is_loading());

    // Fetch B: page 2, fast; the count is not known yet so page 2 is accepted
    engine.set_page(2).unwrap();
    engine.settle().await;

    let mut requested = store.requested_pages();
    requested.sort_unstable();
    assert_eq!(requested, vec![1, 2]);
    assert_eq!(engine.visible_items()[0].name, "Perfume 21");
    assert_eq!(engine.pagination_summary().page_number, 2);
    assert!(!engine.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_resets_page_and_window() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = started(Arc::clone(&store)).await;
    engine.set_page(3).unwrap();
    engine.settle().await;

    engine.set_filter_field(FilterField::Brand(Some("Dior".to_string())));
    assert_eq!(engine.pagination_summary().page_number, 1);
    engine.settle().await;

    assert_eq!(
        engine.visible_items().iter().map(|p| p.brand.as_str()).collect::<Vec<_>>(),
        vec!["Dior"; 9]
    );
    assert_eq!(engine.pagination_summary().total_pages, 1);
    assert_eq!(store.count_calls(), 2, "Filter change re-issues the count");
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_resets_window() {
    let store = Arc::new(store_over(catalog_of(45)));
    let config = BrowseConfig {
        window_increment: 5,
        ..BrowseConfig::default()
    };
    let mut engine = BrowseEngine::new(Arc::clone(&store), &config);
    engine.start();
    engine.settle().await;

    assert!(engine.grow_window());
    assert!(engine.grow_window());
    assert_eq!(engine.visible_items().len(), 15);

    engine.set_filter_field(FilterField::Brand(Some("Chanel".to_string())));
    assert_eq!(engine.loaded_count(), 5);
    engine.settle().await;
    assert_eq!(engine.visible_items().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_count_shrink_clamps_page_and_refetches() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = BrowseEngine::new(Arc::clone(&store), &BrowseConfig::default());

    // Before the count is known any page is accepted
    engine.start();
    engine.set_page(9).unwrap();
    engine.settle().await;

    assert_eq!(engine.pagination_summary().page_number, 3);
    assert_eq!(store.requested_pages(), vec![1, 9, 3]);
    assert_eq!(engine.visible_items()[0].name, "Perfume 41");
}

// ============================================================================
// Failure policies
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failed_page_keeps_displayed_results() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = started(Arc::clone(&store)).await;
    let before = names(&engine);

    store.set_fail_pages(true);
    engine.set_page(2).unwrap();
    engine.settle().await;

    assert_eq!(names(&engine), before);
    assert!(matches!(
        engine.last_error(),
        Some(BrowseError::FetchFailed { concern: Concern::Page, .. })
    ));

    // Retrying is safe and clears the error
    store.set_fail_pages(false);
    engine.set_page(3).unwrap();
    engine.settle().await;
    assert!(engine.last_error().is_none());
    assert_eq!(engine.visible_items()[0].name, "Perfume 41");
}

#[tokio::test(start_paused = true)]
async fn test_failed_count_keeps_total_pages() {
    let store = Arc::new(store_over(catalog_of(45)));
    let mut engine = started(Arc::clone(&store)).await;

    store.set_fail_counts(true);
    engine.set_filter_field(FilterField::Brand(Some("Dior".to_string())));
    engine.settle().await;

    assert_eq!(engine.pagination_summary().total_pages, 3);
    assert_eq!(engine.visible_items().len(), 9);
    assert!(engine.last_error().is_none(), "Count failures do not flag the page");
}

// ============================================================================
// Suggestions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_debounce_collapses_keystrokes() {
    let mut perfumes = catalog_of(3);
    perfumes.push(Perfume::new("Perfume Rose"));
    let store = Arc::new(store_over(perfumes));
    let mut engine = started(Arc::clone(&store)).await;

    for text in ["p", "pe", "per", "perf", "perfu"] {
        engine.on_text_changed(text);
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
    engine.settle().await;

    assert_eq!(store.suggestion_prefixes(), vec!["perfu"]);
    assert_eq!(
        engine.suggestions(),
        ["Perfume 01", "Perfume 02", "Perfume 03", "Perfume Rose"]
    );
    assert!(engine.suggestions_open());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_text_drops_pending_suggestions() {
    let store = Arc::new(store_over(catalog_of(3)).with_latency(Duration::from_millis(100)));
    let mut engine = started(Arc::clone(&store)).await;

    engine.on_text_changed("perf");
    // Let the debounce fire so the request is in flight
    tokio::time::sleep(Duration::from_millis(260)).await;
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_millis(1), engine.next_event()).await
    {
        engine.handle_event(event);
    }

    engine.on_text_changed("");
    engine.settle().await;

    assert_eq!(store.suggestion_prefixes(), vec!["perf"]);
    assert!(engine.suggestions().is_empty());
    assert!(!engine.suggestions_open());
}

#[tokio::test(start_paused = true)]
async fn test_slow_suggestions_for_older_text_are_discarded() {
    let mut perfumes = catalog_of(3);
    perfumes.push(Perfume::new("Pepper Noir"));
    let store = Arc::new(
        store_over(perfumes).with_prefix_latency("pe", Duration::from_millis(800)),
    );
    let mut engine = started(Arc::clone(&store)).await;

    // "pe" is issued and stays in flight
    engine.on_text_changed("pe");
    pump_for(&mut engine, Duration::from_millis(300)).await;
    assert_eq!(store.suggestion_prefixes(), vec!["pe"]);

    // "perf" is issued later but answers first
    engine.on_text_changed("perf");
    engine.settle().await;

    assert_eq!(store.suggestion_prefixes(), vec!["pe", "perf"]);
    assert_eq!(
        engine.suggestions(),
        ["Perfume 01", "Perfume 02", "Perfume 03"]
    );
    assert!(engine.is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_failed_suggestions_yield_empty_list() {
    let store = Arc::new(store_over(catalog_of(3)));
    let mut engine = started(Arc::clone(&store)).await;

    store.set_fail_suggestions(true);
    engine.on_text_changed("perf");
    engine.settle().await;

    assert!(engine.suggestions().is_empty());
    assert!(engine.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_keyboard_selection_commits_search() {
    let store = Arc::new(store_over(catalog_of(12)));
    let mut engine = started(Arc::clone(&store)).await;

    engine.on_text_changed("perfume 1");
    engine.settle().await;
    assert_eq!(engine.suggestions().len(), 3);

    engine.on_key(NavKey::ArrowDown);
    engine.on_key(NavKey::ArrowDown);
    assert_eq!(engine.selected_suggestion(), Some(1));

    engine.on_key(NavKey::Enter);
    engine.settle().await;

    assert_eq!(engine.input_text(), "Perfume 11");
    assert_eq!(engine.criteria().search_query, "Perfume 11");
    assert!(!engine.suggestions_open());
    assert_eq!(names(&engine), vec!["Perfume 11"]);
}

#[tokio::test(start_paused = true)]
async fn test_escape_closes_without_searching() {
    let store = Arc::new(store_over(catalog_of(12)));
    let mut engine = started(Arc::clone(&store)).await;

    engine.on_text_changed("perfume 1");
    engine.settle().await;
    engine.on_key(NavKey::ArrowDown);
    engine.on_key(NavKey::Escape);

    assert!(!engine.suggestions_open());
    assert_eq!(engine.selected_suggestion(), None);
    assert!(engine.criteria().search_query.is_empty());
    assert_eq!(engine.input_text(), "perfume 1");
}

#[tokio::test(start_paused = true)]
async fn test_click_during_blur_grace_commits() {
    let store = Arc::new(store_over(catalog_of(12)));
    let mut engine = started(Arc::clone(&store)).await;

    engine.on_text_changed("perfume 1");
    engine.settle().await;

    engine.on_blur();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(engine.suggestions_open(), "List stays open during the grace period");

    engine.select_suggestion("Perfume 12");
    engine.settle().await;

    assert_eq!(names(&engine), vec!["Perfume 12"]);
    assert!(!engine.suggestions_open());
}

#[tokio::test(start_paused = true)]
async fn test_blur_closes_list_after_grace() {
    let store = Arc::new(store_over(catalog_of(12)));
    let mut engine = started(Arc::clone(&store)).await;

    engine.on_text_changed("perfume 1");
    engine.settle().await;

    engine.on_blur();
    engine.settle().await;
    assert!(!engine.suggestions_open());

    engine.on_focus();
    assert!(engine.suggestions_open(), "Focus reopens the remaining suggestions");
}

// ============================================================================
// Misbehaving stores
// ============================================================================

/// Pages panic; counts and suggestions answer normally.
struct PanickingPageStore;

impl CatalogStore for PanickingPageStore {
    async fn query_page(
        &self,
        _criteria: &FilterCriteria,
        _page_number: u32,
        _items_per_page: u32,
    ) -> Result<ResultPage, StoreError> {
        panic!("page backend crashed")
    }

    async fn query_count(
        &self,
        _collection: &str,
        _criteria: &FilterCriteria,
    ) -> Result<u64, StoreError> {
        Ok(45)
    }

    async fn query_suggestions(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn test_panicking_fetch_still_settles() {
    let mut engine = BrowseEngine::new(Arc::new(PanickingPageStore), &BrowseConfig::default());
    engine.start();

    tokio::time::timeout(Duration::from_secs(5), engine.settle())
        .await
        .expect("settle must return after a panicked fetch");

    assert!(engine.is_idle());
    assert!(!engine.is_loading());
    assert_eq!(engine.pagination_summary().total_pages, 3);
    assert!(matches!(
        engine.last_error(),
        Some(BrowseError::FetchFailed { concern: Concern::Page, .. })
    ));
}
