//! In-memory backend for tests and offline demos
//!
//! [`FakeMovieApi`] answers from canned data and records every reservation
//! it receives. Submissions can be held open with [`FakeMovieApi::hold_submissions`]
//! to observe the form while a request is in flight.

use crate::api::{ApiFuture, MovieApi};
use crate::error::ApiError;
use crate::types::{Genre, MovieSummary, ReservationReceipt, ReservationRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;

#[derive(Debug)]
struct Inner {
    movies: Result<Vec<MovieSummary>, ApiError>,
    search: Result<Vec<MovieSummary>, ApiError>,
    genres: Result<Vec<Genre>, ApiError>,
    submission: Result<ReservationReceipt, ApiError>,
    reservations: Vec<ReservationRequest>,
    searches: Vec<String>,
}

/// Canned [`MovieApi`]
///
/// Clones share state, so a test can keep one handle while the store owns
/// another.
#[derive(Clone, Debug)]
pub struct FakeMovieApi {
    inner: Arc<Mutex<Inner>>,
    catalog_calls: Arc<AtomicUsize>,
    genre_calls: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
}

impl Default for FakeMovieApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeMovieApi {
    /// Empty catalog, accepting every reservation
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                movies: Ok(Vec::new()),
                search: Ok(Vec::new()),
                genres: Ok(Vec::new()),
                submission: Ok(ReservationReceipt(serde_json::json!({ "id": 1 }))),
                reservations: Vec::new(),
                searches: Vec::new(),
            })),
            catalog_calls: Arc::new(AtomicUsize::new(0)),
            genre_calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Serve `movies` from the catalog endpoint
    #[must_use]
    pub fn with_movies(self, movies: Vec<MovieSummary>) -> Self {
        self.lock().movies = Ok(movies);
        self
    }

    /// Fail the catalog endpoint
    #[must_use]
    pub fn failing_catalog(self, error: ApiError) -> Self {
        self.lock().movies = Err(error);
        self
    }

    /// Serve `movies` from the search endpoint, whatever the query
    #[must_use]
    pub fn with_search_results(self, movies: Vec<MovieSummary>) -> Self {
        self.lock().search = Ok(movies);
        self
    }

    /// Fail the search endpoint
    #[must_use]
    pub fn failing_search(self, error: ApiError) -> Self {
        self.lock().search = Err(error);
        self
    }

    /// Serve `genres` from the genre endpoint
    #[must_use]
    pub fn with_genres(self, genres: Vec<Genre>) -> Self {
        self.lock().genres = Ok(genres);
        self
    }

    /// Reject every reservation with `error`
    #[must_use]
    pub fn rejecting_submissions(self, error: ApiError) -> Self {
        self.lock().submission = Err(error);
        self
    }

    /// Keep reservations pending until [`Self::release_submission`]
    #[must_use]
    pub fn hold_submissions(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let one held reservation complete
    pub fn release_submission(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Reservations received so far, including rejected ones
    #[must_use]
    pub fn reservations(&self) -> Vec<ReservationRequest> {
        self.lock().reservations.clone()
    }

    /// Queries received by the search endpoint
    #[must_use]
    pub fn searches(&self) -> Vec<String> {
        self.lock().searches.clone()
    }

    /// Number of catalog fetches
    #[must_use]
    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    /// Number of genre fetches
    #[must_use]
    pub fn genre_calls(&self) -> usize {
        self.genre_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MovieApi for FakeMovieApi {
    fn list_movies(&self) -> ApiFuture<Vec<MovieSummary>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.lock().movies.clone();
        Box::pin(async move { result })
    }

    fn search_movies(&self, query: &str) -> ApiFuture<Vec<MovieSummary>> {
        let result = {
            let mut inner = self.lock();
            inner.searches.push(query.to_string());
            inner.search.clone()
        };
        Box::pin(async move { result })
    }

    fn list_genres(&self) -> ApiFuture<Vec<Genre>> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.lock().genres.clone();
        Box::pin(async move { result })
    }

    fn create_reservation(&self, request: ReservationRequest) -> ApiFuture<ReservationReceipt> {
        let result = {
            let mut inner = self.lock();
            inner.reservations.push(request);
            inner.submission.clone()
        };
        let gate = self.gate.clone();

        Box::pin(async move {
            if let Some(gate) = gate {
                gate.acquire()
                    .await
                    .map_err(|e| ApiError::RequestFailed(e.to_string()))?
                    .forget();
            }
            result
        })
    }
}
