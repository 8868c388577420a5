//! HTTP implementations of the upstream capability traits.
//!
//! Both clients share one error mapping: failures before a response arrives
//! are [`UpstreamError::Transport`], non-2xx answers are
//! [`UpstreamError::Rejection`] and bodies that do not decode are
//! [`UpstreamError::Decoding`]. Nothing is retried.

mod chat_completions;
mod tmdb;

pub use chat_completions::ChatCompletionsClient;
pub use tmdb::TmdbClient;

use cinevibe_config::HttpConfig;
use cinevibe_contracts::{UpstreamError, UpstreamResult};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ClientBuildError, Result};

fn build_client(http: &HttpConfig, headers: HeaderMap) -> Result<Client> {
    Ok(Client::builder()
        .timeout(http.timeout)
        .user_agent(http.user_agent.as_str())
        .default_headers(headers)
        .build()?)
}

fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
        .map_err(|source| ClientBuildError::InvalidHeader {
            name: "authorization",
            source,
        })?;
    value.set_sensitive(true);
    Ok(value)
}

fn json_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
        headers.insert(header::AUTHORIZATION, bearer(token)?);
    }
    Ok(headers)
}

/// Send `request` and decode a JSON body of type `T`.
///
/// `error_message` pulls a human-readable message out of an error body; the
/// raw body (or the status reason) is used when it returns `None`.
async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    error_message: fn(&str) -> Option<String>,
) -> UpstreamResult<T> {
    let response = request
        .send()
        .await
        .map_err(|err| UpstreamError::transport(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            }
        });
        return Err(UpstreamError::rejection(status.as_u16(), message));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| UpstreamError::transport(err.to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| UpstreamError::decoding(err.to_string()))
}

/// `{base}{path}` with `base` already stripped of its trailing slash.
fn endpoint(base: &url::Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}
