//! Dependencies injected into the form and search reducers.

use crate::api::MovieApi;
use crate::navigation::Navigator;
use crate::schema::SchemaOptions;
use std::sync::Arc;

/// What the reducers need from the outside world.
///
/// Production wires the HTTP client and a real navigator; tests swap in
/// in-memory fakes.
pub trait ReservationEnvironment: Send + Sync {
    /// Movie backend.
    fn api(&self) -> Arc<dyn MovieApi>;

    /// Page navigation.
    fn navigator(&self) -> Arc<dyn Navigator>;

    /// Optional validation rules.
    fn schema_options(&self) -> SchemaOptions;
}

/// Environment backed by concrete collaborators.
#[derive(Clone)]
pub struct ProductionEnvironment {
    api: Arc<dyn MovieApi>,
    navigator: Arc<dyn Navigator>,
    schema_options: SchemaOptions,
}

impl ProductionEnvironment {
    /// Create a new environment.
    #[must_use]
    pub fn new(api: Arc<dyn MovieApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            schema_options: SchemaOptions::default(),
        }
    }

    /// Override the validation options.
    #[must_use]
    pub fn with_schema_options(mut self, options: SchemaOptions) -> Self {
        self.schema_options = options;
        self
    }
}

impl ReservationEnvironment for ProductionEnvironment {
    fn api(&self) -> Arc<dyn MovieApi> {
        Arc::clone(&self.api)
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    fn schema_options(&self) -> SchemaOptions {
        self.schema_options
    }
}
