use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|item| item.message.contains(needle))
    }
}

/// Non-fatal checks on a composed configuration. Missing credentials only
/// warn so the core can run against fakes or a local proxy.
pub fn collect_warnings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if !config.tmdb.has_api_key() {
        warnings.push_with_hint(
            "TMDB API key is not set; catalog requests will be rejected",
            "Set TMDB_API_KEY (or TMDB_API_KEY_FILE) to a TMDB read access token",
        );
    }

    if !config.genai.has_api_key() {
        warnings.push_with_hint(
            "Recommendation API key is not set; vibe search will fail",
            "Set OPENAI_API_KEY (or OPENAI_API_KEY_FILE)",
        );
    }

    if config.tmdb.base_url.scheme() != "https" {
        warnings.push(format!(
            "TMDB base URL {} is not using https",
            config.tmdb.base_url
        ));
    }

    if config.genai.base_url.scheme() != "https" {
        warnings.push(format!(
            "Recommendation base URL {} is not using https",
            config.genai.base_url
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_warns_about_missing_keys_only() {
        let warnings = collect_warnings(&Config::default());
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains("TMDB API key"));
        assert!(warnings.contains("Recommendation API key"));
    }
}
