use std::fmt::{self, Display};

use crate::movie::Movie;

/// How a query is turned into catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SearchMode {
    /// Literal catalog search; every match on the page is kept.
    #[default]
    Standard,
    /// The query is a mood description. A recommendation service turns it into
    /// one title and only the catalog's top hit for that title is kept.
    AiAssisted,
}

impl SearchMode {
    pub const fn is_ai_assisted(&self) -> bool {
        matches!(self, Self::AiAssisted)
    }
}

impl Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::AiAssisted => f.write_str("ai-assisted"),
        }
    }
}

/// Result snapshot published by the search orchestrator, tagged with the mode
/// that produced it so the UI can pick a layout before any data arrives.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResults {
    pub mode: SearchMode,
    pub movies: Vec<Movie>,
}

impl SearchResults {
    pub fn empty(mode: SearchMode) -> Self {
        Self {
            mode,
            movies: Vec::new(),
        }
    }

    pub fn new(mode: SearchMode, movies: Vec<Movie>) -> Self {
        Self { mode, movies }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }
}
