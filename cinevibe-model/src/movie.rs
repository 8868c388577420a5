use chrono::{Datelike, NaiveDate};
use url::Url;

use crate::ids::MovieId;
use crate::image::{BackdropSize, PosterSize, image_url};

/// A single catalog movie as returned in list and search pages.
///
/// Equality covers every field so that list consumers can tell a content
/// change from an identity change; use [`Movie::id`] for identity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: String,
    pub original_language: String,
    /// `None` when the catalog has no date for the title yet.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::serde_helpers::optional_date")
    )]
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub adult: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub video: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn poster_url(&self, size: PosterSize) -> Option<Url> {
        self.poster_path
            .as_deref()
            .and_then(|path| image_url(size.as_str(), path))
    }

    pub fn backdrop_url(&self, size: BackdropSize) -> Option<Url> {
        self.backdrop_path
            .as_deref()
            .and_then(|path| image_url(size.as_str(), path))
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }

    /// Medium-style release date, e.g. `Dec 15, 2021`.
    pub fn release_date_formatted(&self) -> Option<String> {
        self.release_date
            .map(|date| date.format("%b %-d, %Y").to_string())
    }

    /// Average rating clamped to the catalog's 0–10 scale.
    pub fn rating(&self) -> f64 {
        self.vote_average.clamp(0.0, 10.0)
    }
}
