use std::fmt;

use async_trait::async_trait;
use cinevibe_config::{Config, HttpConfig, TmdbConfig};
use cinevibe_contracts::{CatalogClient, UpstreamResult};
use cinevibe_model::{MovieListType, MoviePage};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{build_client, endpoint, json_headers, send_json};
use crate::error::Result;

/// Movie catalog client for the TMDB v3 API.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, http: &HttpConfig) -> Result<Self> {
        let headers = json_headers(config.api_key.as_deref())?;
        Ok(Self {
            client: build_client(http, headers)?,
            config: config.clone(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.tmdb, &config.http)
    }

    async fn get_page(
        &self,
        path: &str,
        query: Option<&str>,
        page: u32,
    ) -> UpstreamResult<MoviePage> {
        let url = endpoint(&self.config.base_url, path);
        debug!(%url, page, "tmdb request");

        let mut params: Vec<(&str, String)> = Vec::with_capacity(3);
        if let Some(query) = query {
            params.push(("query", query.to_string()));
        }
        params.push(("page", page.to_string()));
        if let Some(language) = &self.config.language {
            params.push(("language", language.clone()));
        }

        send_json(self.client.get(url).query(&params), status_message).await
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn fetch_list(
        &self,
        category: MovieListType,
        page: u32,
    ) -> UpstreamResult<MoviePage> {
        self.get_page(&format!("/movie/{}", category.as_str()), None, page)
            .await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> UpstreamResult<MoviePage> {
        self.get_page("/search/movie", Some(query), page).await
    }
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// TMDB error envelope, e.g.
/// `{"status_code": 7, "status_message": "Invalid API key", "success": false}`.
#[derive(Deserialize)]
struct TmdbErrorBody {
    status_message: String,
}

fn status_message(body: &str) -> Option<String> {
    serde_json::from_str::<TmdbErrorBody>(body)
        .ok()
        .map(|error| error.status_message)
        .filter(|message| !message.trim().is_empty())
}
