#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use cinevibe_contracts::{
    CatalogClient, RecommendationClient, UpstreamError, UpstreamResult,
};
use cinevibe_model::{Movie, MovieId, MovieListType, MoviePage};
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

pub fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id: MovieId(id),
        title: title.to_string(),
        original_title: title.to_string(),
        overview: format!("Overview of {title}"),
        original_language: "en".to_string(),
        release_date: NaiveDate::from_ymd_opt(2001, 4, 25),
        poster_path: Some(format!("/poster-{id}.jpg")),
        backdrop_path: None,
        vote_average: 7.5,
        vote_count: 1_000,
        popularity: 42.0,
        adult: false,
        video: false,
        genre_ids: vec![18],
    }
}

pub fn godfather() -> Movie {
    Movie {
        release_date: NaiveDate::from_ymd_opt(1972, 3, 14),
        vote_average: 8.7,
        genre_ids: vec![18, 80],
        ..movie(238, "The Godfather")
    }
}

pub fn page(number: u32, results: Vec<Movie>) -> MoviePage {
    MoviePage::new(number, results)
}

/// A catalog request observed by a gated fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    List(MovieListType),
    Search(String),
}

/// One pending call; the fake blocks until the test responds.
#[derive(Debug)]
pub struct Pending<Req, Resp> {
    pub request: Req,
    pub page: u32,
    reply: oneshot::Sender<UpstreamResult<Resp>>,
}

impl<Req, Resp> Pending<Req, Resp> {
    /// Deliver the outcome. Ignored when the waiting task was aborted.
    pub fn respond(self, outcome: UpstreamResult<Resp>) {
        let _ = self.reply.send(outcome);
    }
}

pub type CatalogCall = Pending<CatalogRequest, MoviePage>;
pub type RecommendationCall = Pending<String, String>;

async fn wait_for_reply<Req, Resp>(
    calls: &mpsc::UnboundedSender<Pending<Req, Resp>>,
    request: Req,
    page: u32,
) -> UpstreamResult<Resp> {
    let (reply, outcome) = oneshot::channel();
    calls
        .send(Pending {
            request,
            page,
            reply,
        })
        .map_err(|_| UpstreamError::transport("test harness went away"))?;
    outcome
        .await
        .unwrap_or_else(|_| Err(UpstreamError::transport("call abandoned")))
}

/// Catalog fake whose responses are released by the test, used to control
/// completion order.
#[derive(Debug)]
pub struct GatedCatalog {
    calls: mpsc::UnboundedSender<CatalogCall>,
}

pub fn gated_catalog()
-> (Arc<GatedCatalog>, mpsc::UnboundedReceiver<CatalogCall>) {
    let (calls, rx) = mpsc::unbounded_channel();
    (Arc::new(GatedCatalog { calls }), rx)
}

#[async_trait]
impl CatalogClient for GatedCatalog {
    async fn fetch_list(
        &self,
        category: MovieListType,
        page: u32,
    ) -> UpstreamResult<MoviePage> {
        wait_for_reply(&self.calls, CatalogRequest::List(category), page).await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> UpstreamResult<MoviePage> {
        wait_for_reply(
            &self.calls,
            CatalogRequest::Search(query.to_string()),
            page,
        )
        .await
    }
}

#[derive(Debug)]
pub struct GatedRecommender {
    calls: mpsc::UnboundedSender<RecommendationCall>,
}

pub fn gated_recommender()
-> (Arc<GatedRecommender>, mpsc::UnboundedReceiver<RecommendationCall>) {
    let (calls, rx) = mpsc::unbounded_channel();
    (Arc::new(GatedRecommender { calls }), rx)
}

#[async_trait]
impl RecommendationClient for GatedRecommender {
    async fn suggest_title(&self, prompt: &str) -> UpstreamResult<String> {
        wait_for_reply(&self.calls, prompt.to_string(), 0).await
    }
}

/// Home-feed fake answering each category from a per-category script, in
/// order. An exhausted script yields an empty page.
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    scripts: Mutex<HashMap<MovieListType, VecDeque<UpstreamResult<MoviePage>>>>,
    calls: Mutex<Vec<(MovieListType, u32)>>,
}

impl ScriptedCatalog {
    pub fn script(
        self,
        category: MovieListType,
        outcome: UpstreamResult<MoviePage>,
    ) -> Self {
        self.scripts
            .lock()
            .entry(category)
            .or_default()
            .push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<(MovieListType, u32)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalog {
    async fn fetch_list(
        &self,
        category: MovieListType,
        page: u32,
    ) -> UpstreamResult<MoviePage> {
        self.calls.lock().push((category, page));
        self.scripts
            .lock()
            .get_mut(&category)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(MoviePage::new(page, Vec::new())))
    }

    async fn search_movies(
        &self,
        query: &str,
        _page: u32,
    ) -> UpstreamResult<MoviePage> {
        Err(UpstreamError::rejection(
            500,
            format!("unexpected search for {query}"),
        ))
    }
}
