//! Built-in defaults used when neither the config file nor the environment
//! provides a value.

use std::time::Duration;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

pub const DEFAULT_GENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_GENAI_MODEL: &str = "gpt-4o";

pub const DEFAULT_GENAI_SYSTEM_PROMPT: &str = "You are a helpful movie recommendation assistant. \
The user will describe a mood, vibe, or feeling. \
Respond with only the name of one well-known movie that best matches that description. \
DO NOT include quotes, explanations, dates, or any other information; respond with the movie name alone, without punctuation.";

/// Prepended to the user's vibe description.
pub const DEFAULT_GENAI_USER_PROMPT_PREFIX: &str =
    "I want to watch a movie that fits this vibe: ";

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_USER_AGENT: &str =
    concat!("cinevibe/", env!("CARGO_PKG_VERSION"));

/// Searched in order when no explicit path or `CINEVIBE_CONFIG_PATH` is set.
pub const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["cinevibe.toml", "config/cinevibe.toml"];
