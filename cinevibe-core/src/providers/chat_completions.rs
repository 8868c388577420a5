use std::fmt;

use async_trait::async_trait;
use cinevibe_config::{Config, GenAiConfig, HttpConfig};
use cinevibe_contracts::{RecommendationClient, UpstreamError, UpstreamResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_client, endpoint, json_headers, send_json};
use crate::error::Result;

/// Recommendation client for OpenAI-compatible `/chat/completions` APIs.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    config: GenAiConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: &GenAiConfig, http: &HttpConfig) -> Result<Self> {
        let headers = json_headers(config.api_key.as_deref())?;
        Ok(Self {
            client: build_client(http, headers)?,
            config: config.clone(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.genai, &config.http)
    }

    fn request_body<'a>(
        &'a self,
        user_prompt: &'a str,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        }
    }
}

#[async_trait]
impl RecommendationClient for ChatCompletionsClient {
    async fn suggest_title(&self, prompt: &str) -> UpstreamResult<String> {
        let user_prompt =
            format!("{}{}", self.config.user_prompt_prefix, prompt);
        let url = endpoint(&self.config.base_url, "/chat/completions");
        debug!(%url, model = %self.config.model, "chat completion request");

        let response: ChatCompletionResponse = send_json(
            self.client.post(url).json(&self.request_body(&user_prompt)),
            api_error_message,
        )
        .await?;

        let title = extract_title(response)?;
        debug!(title = %title, "chat completion suggested a title");
        Ok(title)
    }
}

impl fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|wrapper| wrapper.error.message)
}

fn extract_title(response: ChatCompletionResponse) -> UpstreamResult<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            UpstreamError::decoding("chat completion returned no message")
        })?;

    let title = clean_title(&content);
    if title.is_empty() {
        return Err(UpstreamError::decoding(
            "chat completion returned an empty title",
        ));
    }
    Ok(title)
}

/// Trim whitespace and any quotes wrapped around the title.
fn clean_title(raw: &str) -> String {
    const QUOTES: [(char, char); 4] =
        [('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

    let mut title = raw.trim();
    while let Some(inner) = QUOTES.iter().find_map(|(open, close)| {
        title.strip_prefix(*open)?.strip_suffix(*close)
    }) {
        title = inner.trim();
    }
    title.to_string()
}
