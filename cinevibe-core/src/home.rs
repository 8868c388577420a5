//! Home feed: the four curated catalog lists, loaded in parallel.

use std::fmt;
use std::sync::{Arc, Weak};

use cinevibe_contracts::{CatalogClient, UpstreamError, UpstreamResult};
use cinevibe_model::{Movie, MovieListType, MoviePage};
use futures::future::join_all;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::observable::Observable;

#[derive(Debug, Default)]
struct FeedState {
    generation: u64,
    in_flight: Vec<AbortHandle>,
}

struct Inner {
    catalog: Arc<dyn CatalogClient>,
    state: Mutex<FeedState>,
    /// Indexed by [`MovieListType::index`].
    lists: [Observable<Vec<Movie>>; 4],
    error: Observable<Option<UpstreamError>>,
}

impl Inner {
    fn list(&self, category: MovieListType) -> &Observable<Vec<Movie>> {
        &self.lists[category.index()]
    }

    fn apply(
        &self,
        generation: u64,
        category: MovieListType,
        outcome: UpstreamResult<MoviePage>,
    ) {
        let state = self.state.lock();
        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                %category,
                "discarding stale home list"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                info!(
                    generation,
                    %category,
                    count = page.len(),
                    "home list loaded"
                );
                self.list(category).set(page.into_results());
            }
            Err(err) => {
                warn!(
                    generation,
                    %category,
                    error = %err,
                    "home list failed"
                );
                self.error.set(Some(err));
            }
        }
    }
}

/// Fetches the now-playing, popular, top-rated and upcoming lists and
/// publishes each one independently as soon as it arrives.
///
/// A failed category keeps whatever it showed before (empty until its first
/// success) and reports on [`HomeAggregator::subscribe_error`].
pub struct HomeAggregator {
    inner: Arc<Inner>,
}

impl HomeAggregator {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                state: Mutex::new(FeedState::default()),
                lists: std::array::from_fn(|_| Observable::new(Vec::new())),
                error: Observable::new(None),
            }),
        }
    }

    /// Fetch page 1 of every category. Fetches still running from a previous
    /// call are aborted and their results ignored.
    pub fn load(&self) -> LoadHandle {
        let generation = {
            let mut state = self.inner.state.lock();
            for task in state.in_flight.drain(..) {
                task.abort();
            }
            state.generation += 1;
            self.inner.error.set_if_changed(None);
            state.generation
        };
        info!(generation, "loading home feed");

        let tasks: Vec<JoinHandle<()>> = MovieListType::ALL
            .into_iter()
            .map(|category| {
                tokio::spawn(fetch_category(
                    Arc::downgrade(&self.inner),
                    Arc::clone(&self.inner.catalog),
                    generation,
                    category,
                ))
            })
            .collect();

        {
            let mut state = self.inner.state.lock();
            if state.generation == generation {
                state.in_flight =
                    tasks.iter().map(JoinHandle::abort_handle).collect();
            }
        }

        LoadHandle { generation, tasks }
    }

    /// Current contents of `category`.
    pub fn movies(&self, category: MovieListType) -> Vec<Movie> {
        self.inner.list(category).get()
    }

    pub fn subscribe(
        &self,
        category: MovieListType,
    ) -> watch::Receiver<Vec<Movie>> {
        self.inner.list(category).subscribe()
    }

    pub fn stream(&self, category: MovieListType) -> WatchStream<Vec<Movie>> {
        self.inner.list(category).stream()
    }

    /// Most recent failure of the current load, if any.
    pub fn error(&self) -> Option<UpstreamError> {
        self.inner.error.get()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<UpstreamError>> {
        self.inner.error.subscribe()
    }

    pub fn error_stream(&self) -> WatchStream<Option<UpstreamError>> {
        self.inner.error.stream()
    }
}

impl fmt::Debug for HomeAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("HomeAggregator");
        debug.field("generation", &self.inner.state.lock().generation);
        for category in MovieListType::ALL {
            debug.field(
                category.as_str(),
                &self.inner.list(category).with(Vec::len),
            );
        }
        debug.field("error", &self.inner.error.get()).finish()
    }
}

/// Tasks started by one [`HomeAggregator::load`]. Dropping it does not cancel
/// them.
#[derive(Debug)]
pub struct LoadHandle {
    generation: u64,
    tasks: Vec<JoinHandle<()>>,
}

impl LoadHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolves once every category of this load has been applied, discarded
    /// or aborted.
    pub async fn finished(self) {
        for result in join_all(self.tasks).await {
            if let Err(err) = result
                && err.is_panic()
            {
                warn!(generation = self.generation, "home list task panicked");
            }
        }
    }
}

async fn fetch_category(
    inner: Weak<Inner>,
    catalog: Arc<dyn CatalogClient>,
    generation: u64,
    category: MovieListType,
) {
    debug!(generation, %category, "fetching home list");
    let outcome = catalog.fetch_list(category, 1).await;
    if let Some(inner) = inner.upgrade() {
        inner.apply(generation, category, outcome);
    }
}
