use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use url::Url;

use crate::error::ModelError;

/// Base for TMDB-hosted artwork; the size segment and image path are appended.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Poster sizes served by the TMDB image CDN (2:3 aspect ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    W92,
    W154,
    W185,
    W342,
    /// Size used by list cells and the detail header.
    #[default]
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub const ALL: [PosterSize; 7] = [
        Self::W92,
        Self::W154,
        Self::W185,
        Self::W342,
        Self::W500,
        Self::W780,
        Self::Original,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }

    /// Width in pixels, `None` for the original upload.
    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W92 => Some(92),
            Self::W154 => Some(154),
            Self::W185 => Some(185),
            Self::W342 => Some(342),
            Self::W500 => Some(500),
            Self::W780 => Some(780),
            Self::Original => None,
        }
    }
}

impl FromStr for PosterSize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ModelError::UnknownImageSize(s.to_string()))
    }
}

impl Display for PosterSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 16:9 backdrop sizes served by the TMDB image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackdropSize {
    W300,
    W780,
    W1280,
    /// Full-bleed header artwork uses the original upload.
    #[default]
    Original,
}

impl BackdropSize {
    pub const ALL: [BackdropSize; 4] =
        [Self::W300, Self::W780, Self::W1280, Self::Original];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W300 => Some(300),
            Self::W780 => Some(780),
            Self::W1280 => Some(1280),
            Self::Original => None,
        }
    }
}

impl FromStr for BackdropSize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ModelError::UnknownImageSize(s.to_string()))
    }
}

impl Display for BackdropSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join a size segment and a TMDB image path (`/abc.jpg`) into an absolute URL.
pub(crate) fn image_url(size: &str, path: &str) -> Option<Url> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let separator = if path.starts_with('/') { "" } else { "/" };
    Url::parse(&format!("{TMDB_IMAGE_BASE}/{size}{separator}{path}")).ok()
}
