//! Page routes and the navigator that moves between them

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A page of the client
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page, `/`
    Home,
    /// Reservation form, `/reservation`
    Reservation,
    /// Reservation confirmation, `/ticket`
    Ticket,
    /// Search results, `/search/<query>`
    Search {
        /// Free-text query
        query: String,
    },
}

impl Route {
    /// URL path of the route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Reservation => "/reservation".to_string(),
            Self::Ticket => "/ticket".to_string(),
            Self::Search { query } => format!("/search/{query}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the client to another page
pub trait Navigator: Send + Sync {
    /// Leave the current page for `route`
    fn navigate(&self, route: Route);
}

/// Navigator that keeps the visited routes in memory
///
/// Clones share the same history.
#[derive(Clone, Debug, Default)]
pub struct HistoryNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl HistoryNavigator {
    /// Empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last route navigated to
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.lock().last().cloned()
    }

    /// Every route navigated to, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = %route, "Navigating");
        self.lock().push(route);
    }
}
