//! Shared configuration library for CineVibe.
//!
//! Composes built-in defaults, an optional `cinevibe.toml`, a `.env` file and
//! the process environment into one [`Config`] describing how to reach the
//! movie catalog (TMDB) and the recommendation service (an OpenAI-compatible
//! chat-completions API).
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    Config, ConfigMetadata, GenAiConfig, HttpConfig, TmdbConfig,
    sources::{EnvConfig, FileConfig},
};
pub use validation::{ConfigWarning, ConfigWarnings};
