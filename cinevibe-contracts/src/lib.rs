//! Capability traits the CineVibe core calls through to reach its upstream
//! services, plus the error taxonomy those calls share.
//!
//! Concrete HTTP clients live in `cinevibe-core::providers`; orchestration code
//! only ever sees `dyn CatalogClient` and `dyn RecommendationClient`.
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod recommendation;

pub use catalog::CatalogClient;
pub use error::{UpstreamError, UpstreamResult};
pub use recommendation::RecommendationClient;

#[cfg(feature = "mock")]
pub use catalog::MockCatalogClient;
#[cfg(feature = "mock")]
pub use recommendation::MockRecommendationClient;

/// Frequently used items for orchestration crates.
pub mod prelude {
    pub use super::catalog::CatalogClient;
    pub use super::error::{UpstreamError, UpstreamResult};
    pub use super::recommendation::RecommendationClient;
    pub use cinevibe_model::{
        Movie, MovieId, MovieListType, MoviePage, SearchMode, SearchResults,
    };
}
