use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ModelError;

/// Curated catalog lists shown on the home feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MovieListType {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
}

impl MovieListType {
    /// Home feed order.
    pub const ALL: [MovieListType; 4] = [
        Self::NowPlaying,
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
    ];

    /// Path segment used by the catalog's `/movie/{list}` endpoint.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
        }
    }

    /// Section heading for the home feed.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Self::NowPlaying => 0,
            Self::Popular => 1,
            Self::TopRated => 2,
            Self::Upcoming => 3,
        }
    }
}

impl Display for MovieListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieListType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|list| list.as_str() == s)
            .ok_or_else(|| ModelError::UnknownListType(s.to_string()))
    }
}
