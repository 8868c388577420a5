pub mod error;
pub mod secrets;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use self::error::ConfigLoadError;
use self::secrets::read_secret_file;
use crate::constants::DEFAULT_CONFIG_LOCATIONS;
use crate::models::sources::{
    EnvConfig, FileConfig, FileGenAiConfig, FileHttpConfig, FileTmdbConfig,
};
use crate::models::{
    Config, ConfigMetadata, GenAiConfig, HttpConfig, TmdbConfig,
};
use crate::util::{parse_bool_var, parse_duration};
use crate::validation::{self, ConfigWarnings};

/// Result of a successful load: the effective configuration plus anything the
/// caller should surface to the user.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Skip `.env` handling entirely. Also enabled by `CINEVIBE_SKIP_DOTENV`.
    pub skip_env_file: bool,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.options.skip_env_file = true;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let env_config = EnvConfig::gather();
        debug!(?env_config, env_file_loaded, "gathered environment config");

        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No cinevibe.toml detected; using environment variables and defaults",
                "Set CINEVIBE_CONFIG_PATH to point at a config file",
            );
        }

        let config = compose_config(
            file_config.unwrap_or_default(),
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;
        warnings.extend(validation::collect_warnings(&config));

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        if self.options.skip_env_file
            || parse_bool_var("CINEVIBE_SKIP_DOTENV").unwrap_or(false)
        {
            return Ok(false);
        }

        match &self.options.env_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingEnvFile {
                        path: path.clone(),
                    });
                }
                dotenvy::from_path(path)?;
                Ok(true)
            }
            None => match dotenvy::dotenv() {
                Ok(_) => Ok(true),
                Err(err) if err.not_found() => Ok(false),
                Err(err) => Err(err.into()),
            },
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = if let Some(path) = &self.options.config_path {
            (Some(path.clone()), true)
        } else if let Some(path) = &env_config.config_path {
            (Some(path.clone()), true)
        } else {
            let found = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists());
            (found, false)
        };

        let Some(path) = path else {
            return Ok((None, None));
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        debug!(path = %path.display(), "loaded config file");
        Ok((Some(file_config), Some(path)))
    }
}

/// Environment values win over file values, which win over defaults.
fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<Config, ConfigLoadError> {
    let FileConfig {
        tmdb: file_tmdb,
        genai: file_genai,
        http: file_http,
    } = file;

    let tmdb = compose_tmdb(&env, file_tmdb)?;
    let genai = compose_genai(&env, file_genai)?;
    let http = compose_http(&env, file_http)?;

    Ok(Config {
        tmdb,
        genai,
        http,
        metadata,
    })
}

fn compose_tmdb(
    env: &EnvConfig,
    file: FileTmdbConfig,
) -> Result<TmdbConfig, ConfigLoadError> {
    let defaults = TmdbConfig::default();

    let base_url = match env.tmdb_base_url.clone().or(file.base_url) {
        Some(raw) => parse_base_url("tmdb", &raw)?,
        None => defaults.base_url,
    };

    let api_key = resolve_secret(
        env.tmdb_api_key.clone(),
        env.tmdb_api_key_file.as_deref(),
        file.api_key,
        file.api_key_file.as_deref(),
    )?;

    Ok(TmdbConfig {
        base_url,
        api_key,
        language: env.tmdb_language.clone().or(file.language),
    })
}

fn compose_genai(
    env: &EnvConfig,
    file: FileGenAiConfig,
) -> Result<GenAiConfig, ConfigLoadError> {
    let defaults = GenAiConfig::default();

    let base_url = match env.openai_base_url.clone().or(file.base_url) {
        Some(raw) => parse_base_url("genai", &raw)?,
        None => defaults.base_url,
    };

    let api_key = resolve_secret(
        env.openai_api_key.clone(),
        env.openai_api_key_file.as_deref(),
        file.api_key,
        file.api_key_file.as_deref(),
    )?;

    Ok(GenAiConfig {
        base_url,
        api_key,
        model: env
            .openai_model
            .clone()
            .or(file.model)
            .unwrap_or(defaults.model),
        system_prompt: file.system_prompt.unwrap_or(defaults.system_prompt),
        user_prompt_prefix: file
            .user_prompt_prefix
            .unwrap_or(defaults.user_prompt_prefix),
    })
}

fn compose_http(
    env: &EnvConfig,
    file: FileHttpConfig,
) -> Result<HttpConfig, ConfigLoadError> {
    let defaults = HttpConfig::default();

    let timeout = match env.http_timeout.clone().or(file.timeout) {
        Some(raw) => {
            let timeout = parse_duration(&raw).map_err(|source| {
                ConfigLoadError::InvalidTimeout { value: raw, source }
            })?;
            if timeout.is_zero() {
                return Err(ConfigLoadError::ZeroTimeout);
            }
            timeout
        }
        None => defaults.timeout,
    };

    Ok(HttpConfig {
        timeout,
        user_agent: env
            .http_user_agent
            .clone()
            .or(file.user_agent)
            .unwrap_or(defaults.user_agent),
    })
}

fn parse_base_url(
    field: &'static str,
    raw: &str,
) -> Result<Url, ConfigLoadError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url =
        Url::parse(trimmed).map_err(|source| ConfigLoadError::InvalidUrl {
            field,
            value: raw.to_string(),
            source,
        })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigLoadError::UnsupportedScheme {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Inline values win over secret files; environment wins over the file config.
fn resolve_secret(
    env_value: Option<String>,
    env_file: Option<&Path>,
    file_value: Option<String>,
    file_path: Option<&Path>,
) -> Result<Option<String>, ConfigLoadError> {
    if let Some(value) = env_value {
        return Ok(Some(value));
    }
    if let Some(path) = env_file
        && let Some(secret) = read_secret_file(path)?
    {
        return Ok(Some(secret));
    }
    if let Some(value) = file_value.filter(|value| !value.trim().is_empty()) {
        return Ok(Some(value.trim().to_string()));
    }
    if let Some(path) = file_path {
        return read_secret_file(path);
    }
    Ok(None)
}
