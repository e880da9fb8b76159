//! Query state for data fetched from the backend
//!
//! [`QueryState`] is the three-way status every fetch goes through.
//! [`CatalogQuery`] adds the fetch-once rule used by the reservation form's
//! movie selector.

use crate::types::MovieSummary;

/// Message shown in place of data when a query failed
pub const GENERIC_FAILURE: &str = "Something is wrong!";

/// Status of an asynchronous query
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum QueryState<T> {
    /// Not settled yet
    #[default]
    Pending,
    /// Failed; holds the technical reason (never shown to users)
    Error(String),
    /// Settled with data
    Success(T),
}

impl<T> QueryState<T> {
    /// True until the query settles
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True when the query failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Data, once the query succeeded
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Failure reason, if the query failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

/// The movie list behind the form's movie selector
///
/// The list is fetched at most once per form: the first [`begin`] returns
/// `true`, every later call returns `false` whatever the outcome was.
///
/// [`begin`]: CatalogQuery::begin
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    state: QueryState<Vec<MovieSummary>>,
    requested: bool,
}

impl CatalogQuery {
    /// Mark the query as started; `false` if it already was
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.requested, true)
    }

    /// Settle with a fresh snapshot
    pub fn resolve(&mut self, movies: Vec<MovieSummary>) {
        self.state = QueryState::Success(movies);
    }

    /// Settle with a failure
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = QueryState::Error(reason.into());
    }

    /// Whether a fetch was ever started
    #[must_use]
    pub const fn is_requested(&self) -> bool {
        self.requested
    }

    /// Current status
    #[must_use]
    pub const fn state(&self) -> &QueryState<Vec<MovieSummary>> {
        &self.state
    }

    /// Loaded snapshot, if any
    #[must_use]
    pub fn movies(&self) -> Option<&[MovieSummary]> {
        self.state.data().map(Vec::as_slice)
    }
}
