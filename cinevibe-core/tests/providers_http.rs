use std::collections::HashMap;
use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cinevibe_config::{GenAiConfig, HttpConfig, TmdbConfig};
use cinevibe_core::providers::{ChatCompletionsClient, TmdbClient};
use cinevibe_core::{
    CatalogClient, MovieId, MovieListType, RecommendationClient,
};
use serde_json::{Value, json};
use url::Url;

const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-token")
}

fn tmdb_unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key.",
            "success": false
        })),
    )
        .into_response()
}

fn movie_json(id: u64, title: &str) -> Value {
    json!({
        "adult": false,
        "backdrop_path": null,
        "genre_ids": [18],
        "id": id,
        "original_language": "en",
        "original_title": title,
        "overview": "",
        "popularity": 12.5,
        "poster_path": "/poster.jpg",
        "release_date": "",
        "title": title,
        "video": false,
        "vote_average": 7.1,
        "vote_count": 321
    })
}

async fn movie_list(
    Path(list): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return tmdb_unauthorized();
    }
    if headers.get(header::ACCEPT).and_then(|v| v.to_str().ok())
        != Some("application/json")
    {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }
    if list == "upcoming" {
        return (StatusCode::OK, "{\"page\": \"one\"}").into_response();
    }

    let page: u32 = params
        .get("page")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);
    let language = params.get("language").cloned().unwrap_or_default();
    Json(json!({
        "page": page,
        "results": [
            movie_json(u64::from(page), &format!("{list} {language}"))
        ],
        "total_pages": 1,
        "total_results": 1,
        "dates": { "maximum": "2025-05-20", "minimum": "2025-04-08" }
    }))
    .into_response()
}

async fn search_movie(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return tmdb_unauthorized();
    }
    let query = params.get("query").cloned().unwrap_or_default();
    let page: u32 = params
        .get("page")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);
    Json(json!({
        "page": page,
        "results": [movie_json(238, &query)],
        "total_pages": 3,
        "total_results": 41
    }))
    .into_response()
}

async fn chat_completions(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })),
        )
            .into_response();
    }

    let system = &body["messages"][0];
    let user = body["messages"][1]["content"].as_str().unwrap_or_default();
    if body["model"] != "gpt-4o"
        || system["role"] != "system"
        || !user.starts_with("I want to watch a movie that fits this vibe: ")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let content = if user.ends_with("say nothing") {
        "   "
    } else {
        "\"Amélie\""
    };

    Json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn spawn_upstream() -> Result<SocketAddr> {
    let app = Router::new()
        .route("/3/movie/{list}", get(movie_list))
        .route("/3/search/movie", get(search_movie))
        .route("/v1/chat/completions", post(chat_completions));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn tmdb_client(addr: SocketAddr, api_key: Option<&str>) -> Result<TmdbClient> {
    let config = TmdbConfig {
        base_url: Url::parse(&format!("http://{addr}/3"))?,
        api_key: api_key.map(str::to_string),
        language: Some("en-US".to_string()),
    };
    Ok(TmdbClient::new(&config, &HttpConfig::default())?)
}

fn chat_client(
    addr: SocketAddr,
    api_key: Option<&str>,
) -> Result<ChatCompletionsClient> {
    let config = GenAiConfig {
        base_url: Url::parse(&format!("http://{addr}/v1"))?,
        api_key: api_key.map(str::to_string),
        ..GenAiConfig::default()
    };
    Ok(ChatCompletionsClient::new(&config, &HttpConfig::default())?)
}

#[tokio::test]
async fn tmdb_lists_send_category_page_and_language() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = tmdb_client(addr, Some(TOKEN))?;

    let page = client.fetch_list(MovieListType::NowPlaying, 2).await?;

    assert_eq!(page.page, 2);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].title, "now_playing en-US");
    assert!(page.results[0].release_date.is_none());
    assert!(!page.has_next_page());
    Ok(())
}

#[tokio::test]
async fn tmdb_search_sends_the_query() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = tmdb_client(addr, Some(TOKEN))?;

    let page = client.search_movies("The Godfather", 1).await?;

    assert_eq!(page.page, 1);
    assert_eq!(page.results[0].id, MovieId(238));
    assert_eq!(page.results[0].title, "The Godfather");
    assert_eq!(page.total_results, Some(41));
    assert!(page.has_next_page());
    Ok(())
}

#[tokio::test]
async fn tmdb_rejection_carries_status_message() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = tmdb_client(addr, None)?;

    let err = client
        .fetch_list(MovieListType::Popular, 1)
        .await
        .expect_err("missing token is rejected");

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
    Ok(())
}

#[tokio::test]
async fn tmdb_malformed_body_is_a_decoding_error() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = tmdb_client(addr, Some(TOKEN))?;

    let err = client
        .fetch_list(MovieListType::Upcoming, 1)
        .await
        .expect_err("page is not a number");

    assert!(err.is_decoding(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = tmdb_client(addr, Some(TOKEN))?;
    let err = client
        .search_movies("Heat", 1)
        .await
        .expect_err("nothing is listening");

    assert!(err.is_transport(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn chat_completions_returns_the_unquoted_title() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = chat_client(addr, Some(TOKEN))?;

    let title = client.suggest_title("cozy rainy afternoon").await?;

    assert_eq!(title, "Amélie");
    Ok(())
}

#[tokio::test]
async fn chat_completions_blank_answer_is_a_decoding_error() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = chat_client(addr, Some(TOKEN))?;

    let err = client
        .suggest_title("say nothing")
        .await
        .expect_err("blank answer");

    assert!(err.is_decoding(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn chat_completions_rejection_uses_the_api_error_message() -> Result<()> {
    let addr = spawn_upstream().await?;
    let client = chat_client(addr, Some("wrong"))?;

    let err = client
        .suggest_title("cozy rainy afternoon")
        .await
        .expect_err("bad key");

    assert_eq!(
        err,
        cinevibe_core::UpstreamError::rejection(
            401,
            "Incorrect API key provided"
        )
    );
    Ok(())
}
