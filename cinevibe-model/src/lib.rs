//! Core data model definitions shared across CineVibe crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod image;
pub mod list_type;
pub mod movie;
pub mod page;
pub mod search_mode;

#[cfg(feature = "serde")]
mod serde_helpers;

pub use error::{ModelError, Result as ModelResult};
pub use ids::MovieId;
pub use image::{BackdropSize, PosterSize, TMDB_IMAGE_BASE};
pub use list_type::MovieListType;
pub use movie::Movie;
pub use page::MoviePage;
pub use search_mode::{SearchMode, SearchResults};
