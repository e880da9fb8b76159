//! Search results page
//!
//! Loading a query fetches matching movies and, the first time only, the
//! genre list used to label them. The two requests settle independently;
//! the page state only depends on the search results.

use crate::catalog::QueryState;
use crate::environment::{ProductionEnvironment, ReservationEnvironment};
use crate::types::{Genre, MovieSummary};
use showtime_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};

/// State of the search page
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Query currently shown
    pub query: String,
    /// Movies matching [`Self::query`]
    pub results: QueryState<Vec<MovieSummary>>,
    /// Genre id to name mapping
    pub genres: QueryState<Vec<Genre>>,
    genres_requested: bool,
}

impl SearchState {
    /// Page before any query was loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Actions of the search page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchAction {
    /// Show results for `query` (empty lists everything)
    Load {
        /// Free-text query
        query: String,
    },
    /// Results for `query` arrived
    ResultsLoaded {
        /// Query the results belong to
        query: String,
        /// Matching movies
        movies: Vec<MovieSummary>,
    },
    /// Search for `query` failed
    ResultsFailed {
        /// Query that failed
        query: String,
        /// Technical reason
        error: String,
    },
    /// Genre list arrived
    GenresLoaded {
        /// All genres
        genres: Vec<Genre>,
    },
    /// Genre list could not be fetched
    GenresFailed {
        /// Technical reason
        error: String,
    },
}

/// Reducer for the search page
#[derive(Clone, Debug, Default)]
pub struct SearchReducer;

impl SearchReducer {
    /// Create a new search reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SearchReducer {
    type State = SearchState;
    type Action = SearchAction;
    type Environment = ProductionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SearchAction::Load { query } => {
                tracing::debug!(%query, "Loading search results");
                state.query.clone_from(&query);
                state.results = QueryState::Pending;

                let api = env.api();
                let search = async_effect! {
                    match api.search_movies(&query).await {
                        Ok(movies) => Some(SearchAction::ResultsLoaded { query, movies }),
                        Err(error) => Some(SearchAction::ResultsFailed { query, error: error.to_string() }),
                    }
                };

                if state.genres_requested {
                    return smallvec![search];
                }
                state.genres_requested = true;

                let api = env.api();
                let genres = async_effect! {
                    match api.list_genres().await {
                        Ok(genres) => Some(SearchAction::GenresLoaded { genres }),
                        Err(error) => Some(SearchAction::GenresFailed { error: error.to_string() }),
                    }
                };

                smallvec![Effect::Parallel(vec![search, genres])]
            },

            SearchAction::ResultsLoaded { query, movies } => {
                if query == state.query {
                    state.results = QueryState::Success(movies);
                } else {
                    tracing::debug!(%query, current = %state.query, "Dropping stale search results");
                }
                smallvec![Effect::None]
            },

            SearchAction::ResultsFailed { query, error } => {
                if query == state.query {
                    tracing::warn!(%query, %error, "Search failed");
                    state.results = QueryState::Error(error);
                }
                smallvec![Effect::None]
            },

            SearchAction::GenresLoaded { genres } => {
                state.genres = QueryState::Success(genres);
                smallvec![Effect::None]
            },

            SearchAction::GenresFailed { error } => {
                tracing::warn!(%error, "Genre list failed");
                state.genres = QueryState::Error(error);
                smallvec![Effect::None]
            },
        }
    }
}

/// Names of the genres in `ids`, in the same order
///
/// Ids missing from `genres` are skipped; nothing is returned until the genre
/// list has loaded.
#[must_use]
pub fn genre_names(ids: &[u64], genres: &QueryState<Vec<Genre>>) -> Vec<String> {
    let Some(genres) = genres.data() else {
        return Vec::new();
    };

    ids.iter()
        .filter_map(|id| genres.iter().find(|genre| genre.id == *id))
        .map(|genre| genre.name.clone())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::mocks::FakeMovieApi;
    use crate::navigation::HistoryNavigator;
    use showtime_testing::{ReducerTest, assertions, effects::collect_actions};
    use std::sync::Arc;

    fn env(api: &FakeMovieApi) -> ProductionEnvironment {
        ProductionEnvironment::new(Arc::new(api.clone()), Arc::new(HistoryNavigator::new()))
    }

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: 28,
                name: "Action".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn first_load_fetches_results_and_genres() {
        let api = FakeMovieApi::new()
            .with_search_results(vec![MovieSummary::new(1, "Dune").with_genres([878])])
            .with_genres(genres());
        let env = env(&api);
        let reducer = SearchReducer::new();
        let mut state = SearchState::new();

        let effects = reducer.reduce(&mut state, SearchAction::Load { query: "dune".to_string() }, &env);
        assertions::assert_future_count(&effects, 2);
        assert!(state.results.is_pending());

        for action in collect_actions(effects).await {
            reducer.reduce(&mut state, action, &env);
        }

        let movies = state.results.data().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(genre_names(&movies[0].genre_ids, &state.genres), vec!["Science Fiction"]);
        assert_eq!(api.searches(), vec!["dune".to_string()]);
    }

    #[tokio::test]
    async fn genres_are_fetched_once() {
        let api = FakeMovieApi::new().with_genres(genres());
        let env = env(&api);
        let reducer = SearchReducer::new();
        let mut state = SearchState::new();

        let effects = reducer.reduce(&mut state, SearchAction::Load { query: String::new() }, &env);
        collect_actions(effects).await;

        let effects = reducer.reduce(&mut state, SearchAction::Load { query: "heat".to_string() }, &env);
        assertions::assert_future_count(&effects, 1);
        collect_actions(effects).await;

        assert_eq!(api.genre_calls(), 1);
        assert_eq!(api.searches(), vec![String::new(), "heat".to_string()]);
    }

    #[test]
    fn stale_results_are_dropped() {
        ReducerTest::new(SearchReducer::new())
            .with_env(env(&FakeMovieApi::new()))
            .given_state(SearchState::new())
            .when_action(SearchAction::Load { query: "heat".to_string() })
            .when_action(SearchAction::ResultsLoaded {
                query: "dune".to_string(),
                movies: vec![MovieSummary::new(1, "Dune")],
            })
            .then_state(|state| assert!(state.results.is_pending()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn search_failure_marks_results() {
        let api = FakeMovieApi::new().failing_search(ApiError::RequestFailed("connection refused".to_string()));
        let env = env(&api);
        let reducer = SearchReducer::new();
        let mut state = SearchState::new();

        let effects = reducer.reduce(&mut state, SearchAction::Load { query: "x".to_string() }, &env);
        for action in collect_actions(effects).await {
            reducer.reduce(&mut state, action, &env);
        }

        assert!(state.results.is_error());
        // Genres settle on their own
        assert!(state.genres.data().is_some());
    }

    #[test]
    fn genre_names_skip_unknown_ids() {
        let loaded = QueryState::Success(genres());
        assert_eq!(genre_names(&[28, 12, 878], &loaded), vec!["Action", "Science Fiction"]);
        assert!(genre_names(&[28], &QueryState::Pending).is_empty());
    }
}
