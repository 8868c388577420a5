use async_trait::async_trait;

use crate::error::UpstreamResult;

/// Turns a mood or "vibe" description into a single movie title.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Suggest one title for `prompt`. The returned string is the bare title,
    /// ready to be used as a catalog query.
    async fn suggest_title(&self, prompt: &str) -> UpstreamResult<String>;
}
