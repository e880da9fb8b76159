//! Search page running in a `Store`

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use reservation::mocks::FakeMovieApi;
use reservation::view::MovieCard;
use reservation::{
    ApiError, Genre, HistoryNavigator, MovieSummary, ProductionEnvironment, SearchAction,
    SearchReducer, SearchState, SearchView, render_search,
};
use showtime_runtime::Store;
use std::sync::Arc;

fn store(api: &FakeMovieApi) -> Store<SearchState, SearchAction, ProductionEnvironment, SearchReducer> {
    let env = ProductionEnvironment::new(Arc::new(api.clone()), Arc::new(HistoryNavigator::new()));
    Store::new(SearchState::new(), SearchReducer::new(), env)
}

async fn load(store: &Store<SearchState, SearchAction, ProductionEnvironment, SearchReducer>, query: &str) -> SearchView {
    store
        .send(SearchAction::Load {
            query: query.to_string(),
        })
        .await
        .unwrap()
        .wait()
        .await;
    render_search(&store.state(Clone::clone).await)
}

#[tokio::test]
async fn empty_results_render_notice() {
    let api = FakeMovieApi::new();
    let view = load(&store(&api), "zzz").await;

    assert_eq!(
        view,
        SearchView::Results {
            cards: Vec::new(),
            notice: Some("No results found")
        }
    );
}

#[tokio::test]
async fn cards_show_genre_names() {
    let api = FakeMovieApi::new()
        .with_search_results(vec![MovieSummary::new(1, "Dune").with_genres([12, 878])])
        .with_genres(vec![
            Genre {
                id: 12,
                name: "Adventure".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ]);

    let view = load(&store(&api), "dune").await;

    assert_eq!(
        view,
        SearchView::Results {
            cards: vec![MovieCard {
                title: "Dune".to_string(),
                genres: vec!["Adventure".to_string(), "Science Fiction".to_string()],
                overview: None,
                poster_path: None,
            }],
            notice: None,
        }
    );
}

#[tokio::test]
async fn failed_search_renders_generic_error() {
    let api = FakeMovieApi::new().failing_search(ApiError::Status {
        status: 502,
        body: String::new(),
    });

    let view = load(&store(&api), "dune").await;

    assert_eq!(view, SearchView::Error("Something is wrong!"));
    assert_eq!(view.to_string(), "Something is wrong!");
}

#[tokio::test]
async fn new_query_replaces_results_and_reuses_genres() {
    let api = FakeMovieApi::new().with_search_results(vec![MovieSummary::new(1, "Heat")]);
    let store = store(&api);

    load(&store, "").await;
    let view = load(&store, "heat").await;

    assert!(matches!(view, SearchView::Results { ref cards, .. } if cards.len() == 1));
    assert_eq!(store.state(|s| s.query.clone()).await, "heat");
    assert_eq!(api.genre_calls(), 1);
}
