use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{non_empty_var, path_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub genai: FileGenAiConfig,
    #[serde(default)]
    pub http: FileHttpConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileGenAiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prompt_prefix: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHttpConfig {
    /// Human-readable duration, e.g. `"30s"` or `"1m 30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_api_key_file: Option<PathBuf>,
    pub tmdb_language: Option<String>,
    pub openai_base_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_api_key_file: Option<PathBuf>,
    pub openai_model: Option<String>,
    pub http_timeout: Option<String>,
    pub http_user_agent: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: path_var("CINEVIBE_CONFIG_PATH"),
            tmdb_base_url: non_empty_var("TMDB_BASE_URL"),
            tmdb_api_key: non_empty_var("TMDB_API_KEY"),
            tmdb_api_key_file: path_var("TMDB_API_KEY_FILE"),
            tmdb_language: non_empty_var("TMDB_LANGUAGE"),
            openai_base_url: non_empty_var("OPENAI_BASE_URL"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_api_key_file: path_var("OPENAI_API_KEY_FILE"),
            openai_model: non_empty_var("OPENAI_MODEL"),
            http_timeout: non_empty_var("HTTP_TIMEOUT"),
            http_user_agent: non_empty_var("HTTP_USER_AGENT"),
        }
    }
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("config_path", &self.config_path)
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("has_tmdb_api_key", &self.tmdb_api_key.is_some())
            .field("tmdb_api_key_file", &self.tmdb_api_key_file)
            .field("tmdb_language", &self.tmdb_language)
            .field("openai_base_url", &self.openai_base_url)
            .field("has_openai_api_key", &self.openai_api_key.is_some())
            .field("openai_api_key_file", &self.openai_api_key_file)
            .field("openai_model", &self.openai_model)
            .field("http_timeout", &self.http_timeout)
            .field("http_user_agent", &self.http_user_agent)
            .finish()
    }
}
