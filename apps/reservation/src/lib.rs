//! Showtime reservation client
//!
//! Headless client for a movie backend: browse the catalog, search movies by
//! title with genre labels, and book a theater through a validated form.
//!
//! # Architecture
//!
//! ```text
//! MovieApi (HTTP) ──► CatalogQuery ──► movie selector options
//!                                          │
//! FieldChanged ──► FormReducer ──► schema (per field)
//!                       │
//! Submit ──► schema (all fields) ──► create_reservation ──► Navigator(/ticket)
//!                       │
//!                  FormState ──► Store::subscribe_state ──► render_form
//! ```
//!
//! Pages are reducers driven by a `showtime_runtime::Store`. All I/O happens
//! in effects built from the injected [`environment::ReservationEnvironment`],
//! so every page can be tested without a network.
//!
//! # Example
//!
//! ```ignore
//! let env = ProductionEnvironment::new(Arc::new(HttpMovieApi::new(url)), Arc::new(HistoryNavigator::new()));
//! let store = Store::new(FormState::new(&SessionContext::from_env()), FormReducer::new(), env);
//!
//! store.send(FormAction::Mount).await?.wait().await;
//! store.send(FormAction::FieldChanged(FieldValue::Name("Ada".into()))).await?;
//! println!("{}", render_form(&store.state(Clone::clone).await));
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod environment;
pub mod error;
pub mod fields;
pub mod form;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
pub mod navigation;
pub mod schema;
pub mod search;
pub mod session;
pub mod types;
pub mod view;

pub use api::{HttpMovieApi, MovieApi};
pub use catalog::{CatalogQuery, QueryState};
pub use config::Config;
pub use environment::{ProductionEnvironment, ReservationEnvironment};
pub use error::{ApiError, ConfigError};
pub use fields::{FieldId, FieldValue};
pub use form::{FormAction, FormReducer, FormState, SubmitPhase};
pub use navigation::{HistoryNavigator, Navigator, Route};
pub use schema::{FieldError, SchemaOptions, ValidationResult};
pub use search::{SearchAction, SearchReducer, SearchState};
pub use session::SessionContext;
pub use types::{
    Genre, MovieSummary, ReservationDraft, ReservationReceipt, ReservationRequest, Theater,
};
pub use view::{FOOTER, FormView, SearchView, render_form, render_search};
