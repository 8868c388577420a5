//! # CineVibe Core
//!
//! Orchestration layer for the CineVibe movie discovery client.
//!
//! ## Overview
//!
//! - **Home feed**: [`HomeAggregator`] fetches the four curated catalog lists
//!   in parallel and republishes each one as it arrives.
//! - **Search**: [`SearchOrchestrator`] runs literal catalog searches, or turns
//!   a mood description into a single title through a recommendation service
//!   and looks that title up. Superseded work is discarded by generation.
//! - **Providers**: [`providers::TmdbClient`] and
//!   [`providers::ChatCompletionsClient`] implement the capability traits from
//!   `cinevibe-contracts` over HTTP.
//! - **State**: every published property is an [`Observable`] with last-value
//!   replay, so late subscribers immediately see the current state.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cinevibe_config::ConfigLoader;
//! use cinevibe_core::providers::{ChatCompletionsClient, TmdbClient};
//! use cinevibe_core::{SearchMode, SearchOrchestrator};
//!
//! async fn vibe_search() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load()?.config;
//!     let catalog = Arc::new(TmdbClient::from_config(&config)?);
//!     let recommender = Arc::new(ChatCompletionsClient::from_config(&config)?);
//!
//!     let search = SearchOrchestrator::new(catalog, recommender);
//!     if let Some(handle) = search
//!         .search("cozy rainy afternoon", SearchMode::AiAssisted)
//!         .into_handle()
//!     {
//!         handle.finished().await;
//!     }
//!
//!     if let Some(results) = search.results() {
//!         for movie in &results.movies {
//!             println!("{} ({:?})", movie.title, movie.release_year());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
#![allow(missing_docs)]

pub mod error;
pub mod home;
pub mod observable;
pub mod providers;
pub mod search;
pub mod telemetry;

pub use cinevibe_contracts::{
    CatalogClient, RecommendationClient, UpstreamError, UpstreamResult,
};
pub use cinevibe_model::{
    Movie, MovieId, MovieListType, MoviePage, SearchMode, SearchResults,
};
pub use error::ClientBuildError;
pub use home::{HomeAggregator, LoadHandle};
pub use observable::Observable;
pub use search::{SearchHandle, SearchOrchestrator, SearchSubmission};
