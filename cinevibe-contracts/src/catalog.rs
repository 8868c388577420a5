use async_trait::async_trait;
use cinevibe_model::{MovieListType, MoviePage};

use crate::error::UpstreamResult;

/// Listing and searching against the movie catalog.
///
/// Pages are 1-based. Implementations perform no retries.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of a curated list.
    async fn fetch_list(
        &self,
        category: MovieListType,
        page: u32,
    ) -> UpstreamResult<MoviePage>;

    /// Free-text title search.
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> UpstreamResult<MoviePage>;
}
