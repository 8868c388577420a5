//! Search orchestration for standard and vibe-based (AI-assisted) queries.
//!
//! At most one search runs at a time. Each accepted search bumps a generation
//! counter; continuations compare the generation they were started with
//! against the current one before touching state, so results from superseded
//! work are dropped silently.

mod state;

use std::fmt;
use std::sync::{Arc, Weak};

use cinevibe_contracts::{
    CatalogClient, RecommendationClient, UpstreamError, UpstreamResult,
};
use cinevibe_model::{MoviePage, SearchMode, SearchResults};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::observable::Observable;

use self::state::{PageCursor, SessionState};

/// Outcome of [`SearchOrchestrator::search`] and friends.
#[derive(Debug)]
pub enum SearchSubmission {
    /// Work was dispatched under a new (or, for pagination, the current)
    /// generation.
    Accepted(SearchHandle),
    /// Another search is in flight, or there is nothing to load.
    Rejected,
}

impl SearchSubmission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Accepted(handle) => Some(handle.generation),
            Self::Rejected => None,
        }
    }

    pub fn into_handle(self) -> Option<SearchHandle> {
        match self {
            Self::Accepted(handle) => Some(handle),
            Self::Rejected => None,
        }
    }

    /// Wait for accepted work to settle. Returns immediately when rejected.
    pub async fn finished(self) {
        if let Self::Accepted(handle) = self {
            handle.finished().await;
        }
    }
}

/// Join handle for one dispatched search. Dropping it does not cancel the
/// search; use [`SearchOrchestrator::cancel`].
#[derive(Debug)]
pub struct SearchHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl SearchHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolves once the search task has applied (or discarded) its outcome,
    /// or was aborted.
    pub async fn finished(self) {
        if let Err(err) = self.task.await
            && err.is_panic()
        {
            warn!(generation = self.generation, "search task panicked");
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Accumulation {
    Replace,
    Append,
}

struct Inner {
    catalog: Arc<dyn CatalogClient>,
    recommender: Arc<dyn RecommendationClient>,
    state: Mutex<SessionState>,
    mode: Observable<SearchMode>,
    results: Observable<Option<SearchResults>>,
    is_loading: Observable<bool>,
    last_error: Observable<Option<UpstreamError>>,
}

impl Inner {
    fn publish_results(&self, state: &SessionState) {
        self.results.set(Some(SearchResults::new(
            state.results_mode,
            state.accumulated.clone(),
        )));
    }

    fn publish_status(&self, state: &SessionState) {
        self.is_loading.set_if_changed(state.is_loading);
        self.last_error.set_if_changed(state.last_error.clone());
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.lock().is_current(generation)
    }

    fn track(&self, generation: u64, task: &JoinHandle<()>) {
        let mut state = self.state.lock();
        if state.is_current(generation) && state.is_loading {
            state.in_flight = Some(task.abort_handle());
        }
    }

    fn complete_catalog(
        &self,
        generation: u64,
        query: String,
        requested: u32,
        outcome: UpstreamResult<MoviePage>,
        accumulation: Accumulation,
    ) {
        let mut state = self.state.lock();
        if !state.is_current(generation) {
            debug!(
                generation,
                current = state.generation,
                "discarding stale search result"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                let cursor = PageCursor::after(query, requested, &page);
                let fetched = page.len();
                match accumulation {
                    Accumulation::Replace => {
                        state.accumulated = page.into_results()
                    }
                    Accumulation::Append => {
                        state.accumulated.extend(page.into_results())
                    }
                }
                info!(
                    generation,
                    page = requested,
                    fetched,
                    total = state.accumulated.len(),
                    has_more = cursor.has_more,
                    "catalog search completed"
                );
                state.cursor = Some(cursor);
                state.settle();
                self.publish_results(&state);
            }
            Err(err) => {
                warn!(
                    generation,
                    page = requested,
                    error = %err,
                    "catalog search failed"
                );
                state.fail(err);
            }
        }
        self.publish_status(&state);
    }

    fn complete_recommended(
        &self,
        generation: u64,
        outcome: UpstreamResult<MoviePage>,
    ) {
        let mut state = self.state.lock();
        if !state.is_current(generation) {
            debug!(
                generation,
                current = state.generation,
                "discarding stale recommendation result"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                let matches = page.len();
                state.accumulated =
                    page.into_results().into_iter().take(1).collect();
                info!(
                    generation,
                    matches,
                    found = !state.accumulated.is_empty(),
                    "recommended title lookup completed"
                );
                state.settle();
                self.publish_results(&state);
            }
            Err(err) => {
                warn!(
                    generation,
                    error = %err,
                    "recommended title lookup failed"
                );
                state.fail(err);
            }
        }
        self.publish_status(&state);
    }

    fn fail(&self, generation: u64, err: UpstreamError) {
        let mut state = self.state.lock();
        if !state.is_current(generation) {
            debug!(generation, "discarding stale recommendation failure");
            return;
        }
        warn!(generation, error = %err, "recommendation failed");
        state.fail(err);
        self.publish_status(&state);
    }
}

/// Runs searches against the catalog, optionally through a recommendation
/// step, and publishes results, loading and error state.
///
/// Must be used from within a Tokio runtime; upstream calls run on spawned
/// tasks.
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

impl SearchOrchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        recommender: Arc<dyn RecommendationClient>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                recommender,
                state: Mutex::new(SessionState::default()),
                mode: Observable::new(SearchMode::default()),
                results: Observable::new(None),
                is_loading: Observable::new(false),
                last_error: Observable::new(None),
            }),
        }
    }

    /// Start a search for `query` in `mode`.
    ///
    /// Rejected without any state change while another search is loading.
    /// Otherwise results are reset to an empty snapshot tagged with `mode`
    /// before any upstream call is made. `mode` also becomes the stored mode.
    pub fn search(
        &self,
        query: impl Into<String>,
        mode: SearchMode,
    ) -> SearchSubmission {
        let query = query.into();
        let generation = {
            let mut state = self.inner.state.lock();
            if state.is_loading {
                debug!(%mode, "search rejected while another is in flight");
                return SearchSubmission::Rejected;
            }
            state.mode = mode;
            let generation = state.begin(mode);
            self.inner.mode.set_if_changed(mode);
            self.inner.publish_results(&state);
            self.inner.publish_status(&state);
            generation
        };

        debug!(generation, %mode, query = %query, "dispatching search");
        let weak = Arc::downgrade(&self.inner);
        let task = match mode {
            SearchMode::Standard => tokio::spawn(run_catalog_search(
                weak,
                Arc::clone(&self.inner.catalog),
                generation,
                query,
                1,
                Accumulation::Replace,
            )),
            SearchMode::AiAssisted => tokio::spawn(run_recommended_search(
                weak,
                Arc::clone(&self.inner.recommender),
                Arc::clone(&self.inner.catalog),
                generation,
                query,
            )),
        };
        self.inner.track(generation, &task);

        SearchSubmission::Accepted(SearchHandle { generation, task })
    }

    /// Search using the stored mode.
    pub fn submit(&self, query: impl Into<String>) -> SearchSubmission {
        let mode = self.inner.state.lock().mode;
        self.search(query, mode)
    }

    /// Change the stored mode. Does not fetch or touch current results.
    pub fn set_mode(&self, mode: SearchMode) {
        let mut state = self.inner.state.lock();
        state.mode = mode;
        self.inner.mode.set_if_changed(mode);
    }

    /// Append the next catalog page to a settled Standard search.
    ///
    /// Runs under the current generation, so a later `search` or `cancel`
    /// still supersedes it. Rejected in AI-assisted mode, while loading, before
    /// any successful Standard search, or when the catalog reported no more
    /// pages.
    pub fn load_next_page(&self) -> SearchSubmission {
        let (generation, query, page) = {
            let mut state = self.inner.state.lock();
            let Some((query, page)) = state.next_page() else {
                debug!("no further page to load");
                return SearchSubmission::Rejected;
            };
            state.is_loading = true;
            state.last_error = None;
            self.inner.publish_status(&state);
            (state.generation, query, page)
        };

        debug!(generation, page, query = %query, "dispatching next page");
        let task = tokio::spawn(run_catalog_search(
            Arc::downgrade(&self.inner),
            Arc::clone(&self.inner.catalog),
            generation,
            query,
            page,
            Accumulation::Append,
        ));
        self.inner.track(generation, &task);

        SearchSubmission::Accepted(SearchHandle { generation, task })
    }

    /// Supersede in-flight work. The current snapshot stays published and the
    /// orchestrator becomes ready for a new search. Returns `false` when
    /// nothing was loading.
    pub fn cancel(&self) -> bool {
        let mut state = self.inner.state.lock();
        if !state.is_loading {
            return false;
        }
        state.generation += 1;
        if let Some(task) = state.in_flight.take() {
            task.abort();
        }
        state.is_loading = false;
        self.inner.publish_status(&state);
        debug!(generation = state.generation, "search cancelled");
        true
    }

    pub fn mode(&self) -> SearchMode {
        self.inner.mode.get()
    }

    /// Generation of the most recent search or cancellation.
    pub fn generation(&self) -> u64 {
        self.inner.state.lock().generation
    }

    /// `None` until the first search is accepted.
    pub fn results(&self) -> Option<SearchResults> {
        self.inner.results.get()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.is_loading.get()
    }

    pub fn last_error(&self) -> Option<UpstreamError> {
        self.inner.last_error.get()
    }

    pub fn subscribe_mode(&self) -> watch::Receiver<SearchMode> {
        self.inner.mode.subscribe()
    }

    /// Do not hold a `borrow()` of the receiver while calling back into the
    /// orchestrator; see [`Observable::subscribe`].
    pub fn subscribe_results(&self) -> watch::Receiver<Option<SearchResults>> {
        self.inner.results.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.inner.is_loading.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<UpstreamError>> {
        self.inner.last_error.subscribe()
    }

    pub fn results_stream(&self) -> WatchStream<Option<SearchResults>> {
        self.inner.results.stream()
    }

    pub fn loading_stream(&self) -> WatchStream<bool> {
        self.inner.is_loading.stream()
    }

    pub fn error_stream(&self) -> WatchStream<Option<UpstreamError>> {
        self.inner.last_error.stream()
    }
}

impl fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("SearchOrchestrator")
            .field("mode", &state.mode)
            .field("generation", &state.generation)
            .field("is_loading", &state.is_loading)
            .field("results", &state.accumulated.len())
            .field("last_error", &state.last_error)
            .finish()
    }
}

async fn run_catalog_search(
    inner: Weak<Inner>,
    catalog: Arc<dyn CatalogClient>,
    generation: u64,
    query: String,
    page: u32,
    accumulation: Accumulation,
) {
    let outcome = catalog.search_movies(&query, page).await;
    if let Some(inner) = inner.upgrade() {
        inner.complete_catalog(generation, query, page, outcome, accumulation);
    }
}

async fn run_recommended_search(
    inner: Weak<Inner>,
    recommender: Arc<dyn RecommendationClient>,
    catalog: Arc<dyn CatalogClient>,
    generation: u64,
    vibe: String,
) {
    let title = match recommender.suggest_title(&vibe).await {
        Ok(title) => title,
        Err(err) => {
            if let Some(inner) = inner.upgrade() {
                inner.fail(generation, err);
            }
            return;
        }
    };

    match inner.upgrade() {
        Some(inner) if inner.is_current(generation) => {}
        _ => {
            debug!(
                generation,
                "skipping catalog lookup for superseded recommendation"
            );
            return;
        }
    }

    debug!(generation, title = %title, "looking up recommended title");
    let outcome = catalog.search_movies(&title, 1).await;
    if let Some(inner) = inner.upgrade() {
        inner.complete_recommended(generation, outcome);
    }
}
