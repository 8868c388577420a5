mod support;

use std::collections::HashMap;
use std::sync::Arc;

use cinevibe_contracts::{MockCatalogClient, UpstreamError};
use cinevibe_core::{HomeAggregator, MovieListType};
use cinevibe_model::Movie;

use support::{
    CatalogCall, CatalogRequest, ScriptedCatalog, gated_catalog, movie, page,
};

fn feed_for(category: MovieListType) -> Vec<Movie> {
    let base = 100 * (category.index() as u64 + 1);
    vec![
        movie(base + 1, &format!("{} #1", category.display_name())),
        movie(base + 2, &format!("{} #2", category.display_name())),
    ]
}

async fn take_calls(
    calls: &mut tokio::sync::mpsc::UnboundedReceiver<CatalogCall>,
) -> HashMap<MovieListType, CatalogCall> {
    let mut by_category = HashMap::new();
    while by_category.len() < MovieListType::ALL.len() {
        let call = calls.recv().await.expect("home list call");
        let CatalogRequest::List(category) = call.request else {
            panic!("unexpected request {:?}", call.request);
        };
        assert_eq!(call.page, 1);
        by_category.insert(category, call);
    }
    by_category
}

#[tokio::test]
async fn each_category_is_published_as_it_arrives() {
    let (catalog, mut calls) = gated_catalog();
    let home = HomeAggregator::new(catalog);
    let mut popular = home.subscribe(MovieListType::Popular);
    assert!(popular.borrow_and_update().is_empty());

    let handle = home.load();
    let mut pending = take_calls(&mut calls).await;

    pending
        .remove(&MovieListType::Popular)
        .expect("popular call")
        .respond(Ok(page(1, feed_for(MovieListType::Popular))));
    popular.changed().await.expect("popular published");

    assert_eq!(*popular.borrow(), feed_for(MovieListType::Popular));
    assert!(home.movies(MovieListType::NowPlaying).is_empty());
    assert!(home.movies(MovieListType::TopRated).is_empty());
    assert!(home.movies(MovieListType::Upcoming).is_empty());

    for (category, call) in pending {
        call.respond(Ok(page(1, feed_for(category))));
    }
    handle.finished().await;

    for category in MovieListType::ALL {
        assert_eq!(home.movies(category), feed_for(category), "{category}");
    }
    assert_eq!(home.error(), None);
}

#[tokio::test]
async fn one_failing_category_leaves_the_others_untouched() {
    let mut catalog = MockCatalogClient::new();
    catalog
        .expect_fetch_list()
        .withf(|category, page| {
            *category == MovieListType::TopRated && *page == 1
        })
        .times(1)
        .returning(|_, _| Err(UpstreamError::rejection(503, "Service offline")));
    catalog
        .expect_fetch_list()
        .withf(|category, page| {
            *category != MovieListType::TopRated && *page == 1
        })
        .times(3)
        .returning(|category, _| Ok(page(1, feed_for(category))));
    catalog.expect_search_movies().never();

    let home = HomeAggregator::new(Arc::new(catalog));
    home.load().finished().await;

    assert_eq!(
        home.error(),
        Some(UpstreamError::rejection(503, "Service offline"))
    );
    assert!(home.movies(MovieListType::TopRated).is_empty());
    for category in [
        MovieListType::NowPlaying,
        MovieListType::Popular,
        MovieListType::Upcoming,
    ] {
        assert_eq!(home.movies(category), feed_for(category));
    }
}

#[tokio::test]
async fn second_load_supersedes_the_first_without_duplicates() {
    let (catalog, mut calls) = gated_catalog();
    let home = HomeAggregator::new(catalog);

    let first = home.load();
    let first_calls = take_calls(&mut calls).await;

    let second = home.load();
    assert_eq!(second.generation(), first.generation() + 1);
    let second_calls = take_calls(&mut calls).await;

    for (category, call) in second_calls {
        call.respond(Ok(page(1, feed_for(category))));
    }
    second.finished().await;

    for call in first_calls.into_values() {
        call.respond(Ok(page(1, vec![movie(9_999, "Stale")])));
    }
    first.finished().await;

    for category in MovieListType::ALL {
        assert_eq!(home.movies(category), feed_for(category));
    }
}

#[tokio::test]
async fn failed_category_keeps_its_previous_contents() {
    let catalog = Arc::new(
        ScriptedCatalog::default()
            .script(
                MovieListType::Popular,
                Ok(page(1, feed_for(MovieListType::Popular))),
            )
            .script(
                MovieListType::Popular,
                Err(UpstreamError::transport("timed out")),
            ),
    );
    let home = HomeAggregator::new(catalog.clone());

    home.load().finished().await;
    assert_eq!(
        home.movies(MovieListType::Popular),
        feed_for(MovieListType::Popular)
    );
    assert_eq!(home.error(), None);

    home.load().finished().await;
    assert_eq!(
        home.movies(MovieListType::Popular),
        feed_for(MovieListType::Popular)
    );
    assert_eq!(home.error(), Some(UpstreamError::transport("timed out")));
    assert_eq!(catalog.calls().len(), 8);
}

#[tokio::test]
async fn new_load_clears_the_previous_error() {
    let catalog = Arc::new(ScriptedCatalog::default().script(
        MovieListType::Upcoming,
        Err(UpstreamError::decoding("missing field `results`")),
    ));
    let home = HomeAggregator::new(catalog);
    let mut errors = home.subscribe_error();

    home.load().finished().await;
    assert!(errors.borrow_and_update().is_some());

    let handle = home.load();
    assert_eq!(*errors.borrow_and_update(), None);
    handle.finished().await;
    assert_eq!(home.error(), None);
}

#[tokio::test]
async fn dropping_the_aggregator_makes_pending_loads_a_no_op() {
    let (catalog, mut calls) = gated_catalog();
    let home = HomeAggregator::new(catalog);
    let popular = home.subscribe(MovieListType::Popular);

    let handle = home.load();
    let pending = take_calls(&mut calls).await;
    drop(home);

    for (category, call) in pending {
        call.respond(Ok(page(1, feed_for(category))));
    }
    handle.finished().await;

    assert!(popular.has_changed().is_err(), "publisher is gone");
    assert!(popular.borrow().is_empty());
}
