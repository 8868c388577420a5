pub mod sources;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_GENAI_BASE_URL, DEFAULT_GENAI_MODEL, DEFAULT_GENAI_SYSTEM_PROMPT,
    DEFAULT_GENAI_USER_PROMPT_PREFIX, DEFAULT_HTTP_TIMEOUT,
    DEFAULT_TMDB_BASE_URL, DEFAULT_USER_AGENT,
};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub genai: GenAiConfig,
    pub http: HttpConfig,
    pub metadata: ConfigMetadata,
}

/// Movie catalog (TMDB v3) access.
#[derive(Clone)]
pub struct TmdbConfig {
    pub base_url: Url,
    /// v4 read access token, sent as a bearer token.
    pub api_key: Option<String>,
    /// Optional `language` query parameter (e.g. `en-US`).
    pub language: Option<String>,
}

impl TmdbConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_url(DEFAULT_TMDB_BASE_URL),
            api_key: None,
            language: None,
        }
    }
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.has_api_key())
            .field("language", &self.language)
            .finish()
    }
}

/// Chat-completions endpoint used for vibe-to-title recommendations.
#[derive(Clone)]
pub struct GenAiConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt_prefix: String,
}

impl GenAiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_url(DEFAULT_GENAI_BASE_URL),
            api_key: None,
            model: DEFAULT_GENAI_MODEL.to_string(),
            system_prompt: DEFAULT_GENAI_SYSTEM_PROMPT.to_string(),
            user_prompt_prefix: DEFAULT_GENAI_USER_PROMPT_PREFIX.to_string(),
        }
    }
}

impl fmt::Debug for GenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenAiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.has_api_key())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout applied by both upstream clients.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

fn default_url(raw: &str) -> Url {
    // Compile-time constants; covered by `defaults_are_valid_urls`.
    Url::parse(raw).unwrap_or_else(|err| {
        unreachable!("built-in URL {raw} failed to parse: {err}")
    })
}
