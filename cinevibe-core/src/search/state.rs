use cinevibe_contracts::UpstreamError;
use cinevibe_model::{Movie, MoviePage, SearchMode};
use tokio::task::AbortHandle;

/// Mutable session state, only ever touched under the orchestrator's lock.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// Mode used by `submit` and shown to the UI.
    pub mode: SearchMode,
    /// Mode of the search that produced `accumulated`.
    pub results_mode: SearchMode,
    pub generation: u64,
    pub is_loading: bool,
    pub accumulated: Vec<Movie>,
    pub last_error: Option<UpstreamError>,
    pub cursor: Option<PageCursor>,
    pub in_flight: Option<AbortHandle>,
}

/// Where a Standard search left off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageCursor {
    pub query: String,
    pub page: u32,
    pub has_more: bool,
}

impl PageCursor {
    /// Cursor after `requested` came back as `page`. The requested number is
    /// kept rather than the echoed one.
    pub fn after(query: String, requested: u32, page: &MoviePage) -> Self {
        Self {
            query,
            page: requested,
            has_more: page
                .total_pages
                .is_some_and(|total_pages| requested < total_pages),
        }
    }
}

impl SessionState {
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Start a new search: bump the generation and reset results.
    pub fn begin(&mut self, mode: SearchMode) -> u64 {
        self.generation += 1;
        self.results_mode = mode;
        self.is_loading = true;
        self.last_error = None;
        self.accumulated.clear();
        self.cursor = None;
        self.generation
    }

    /// Next page to request, if the last Standard search can be extended.
    pub fn next_page(&self) -> Option<(String, u32)> {
        if self.is_loading
            || self.mode.is_ai_assisted()
            || self.results_mode.is_ai_assisted()
        {
            return None;
        }
        self.cursor
            .as_ref()
            .filter(|cursor| cursor.has_more)
            .map(|cursor| (cursor.query.clone(), cursor.page + 1))
    }

    pub fn settle(&mut self) {
        self.is_loading = false;
        self.in_flight = None;
    }

    pub fn fail(&mut self, error: UpstreamError) {
        self.last_error = Some(error);
        self.settle();
    }
}
