//! Reducer for the reservation form.

use crate::environment::{ProductionEnvironment, ReservationEnvironment};
use crate::fields::{FieldId, FieldValue};
use crate::form::{FormAction, FormState, SubmitPhase};
use crate::navigation::Route;
use crate::schema::{self, build_request};
use crate::types::ReservationReceipt;
use showtime_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};

/// Reducer for the reservation form.
///
/// Handles field edits with eager per-field validation, the catalog query
/// and the submit workflow (validate, post, navigate).
#[derive(Clone, Debug, Default)]
pub struct FormReducer;

impl FormReducer {
    /// Create a new form reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // ========== Intents ==========

    fn mount(state: &mut FormState, env: &ProductionEnvironment) -> Effect<FormAction> {
        if !state.catalog.begin() {
            tracing::debug!("Catalog already requested, not refetching");
            return Effect::None;
        }

        let api = env.api();
        async_effect! {
            match api.list_movies().await {
                Ok(movies) => Some(FormAction::CatalogLoaded { movies }),
                Err(error) => Some(FormAction::CatalogFailed { error: error.to_string() }),
            }
        }
    }

    fn change_field(state: &mut FormState, value: FieldValue, env: &ProductionEnvironment) {
        let field = value.field();

        if !state.is_editable() {
            tracing::warn!(%field, phase = ?state.phase, "Ignoring edit while the form is locked");
            return;
        }

        // The selector has no options until the listing arrives
        if field == FieldId::MovieTitle && state.catalog.movies().is_none() {
            tracing::warn!("Ignoring movie selection before the catalog loaded");
            return;
        }

        value.apply(&mut state.draft);
        state.touched.insert(field);
        Self::revalidate(state, field, env);
    }

    fn touch_field(state: &mut FormState, field: FieldId, env: &ProductionEnvironment) {
        if !state.is_editable() {
            return;
        }

        state.touched.insert(field);
        Self::revalidate(state, field, env);
    }

    fn submit(state: &mut FormState, env: &ProductionEnvironment) -> Effect<FormAction> {
        if !state.can_submit() {
            tracing::warn!(phase = ?state.phase, "Ignoring submit");
            return Effect::None;
        }

        state.phase = SubmitPhase::Validating;
        state.touched.extend(FieldId::ALL);

        let ctx = state.validation_context(env.schema_options());
        let request = match build_request(&state.draft, &ctx) {
            Ok(request) => request,
            Err(errors) => {
                tracing::debug!(invalid_fields = errors.len(), "Submit blocked by validation");
                state.errors = errors;
                state.phase = SubmitPhase::Idle;
                return Effect::None;
            },
        };

        state.errors.clear();
        state.last_failure = None;
        state.phase = SubmitPhase::Submitting;

        tracing::info!(
            movie = %request.movie_title,
            theater = %request.theater,
            date = %request.date,
            "Submitting reservation"
        );

        let api = env.api();
        async_effect! {
            match api.create_reservation(request).await {
                Ok(receipt) => Some(FormAction::SubmissionSucceeded { receipt }),
                Err(error) => Some(FormAction::SubmissionFailed { error: error.to_string() }),
            }
        }
    }

    fn cancel(state: &FormState, env: &ProductionEnvironment) -> Effect<FormAction> {
        if !state.can_submit() {
            tracing::warn!(phase = ?state.phase, "Ignoring cancel");
            return Effect::None;
        }

        Self::navigate(env, Route::Home)
    }

    // ========== Effect results ==========

    fn submission_succeeded(
        state: &mut FormState,
        receipt: ReservationReceipt,
        env: &ProductionEnvironment,
    ) -> Effect<FormAction> {
        if state.phase != SubmitPhase::Submitting {
            tracing::warn!(phase = ?state.phase, "Unexpected submission result");
            return Effect::None;
        }

        tracing::info!("Reservation accepted");
        state.phase = SubmitPhase::Succeeded;
        state.receipt = Some(receipt);

        Self::navigate(env, Route::Ticket)
    }

    fn submission_failed(state: &mut FormState, error: String) {
        if state.phase != SubmitPhase::Submitting {
            tracing::warn!(phase = ?state.phase, "Unexpected submission failure");
            return;
        }

        // Not surfaced in the view; the form just becomes usable again
        tracing::error!(%error, "Reservation submission failed");
        state.last_failure = Some(error);
        state.phase = SubmitPhase::Idle;
    }

    // ========== Helpers ==========

    fn revalidate(state: &mut FormState, field: FieldId, env: &ProductionEnvironment) {
        let outcome = {
            let ctx = state.validation_context(env.schema_options());
            schema::validate_field(field, &state.draft, &ctx)
        };
        state.errors.set(field, outcome);
    }

    fn navigate(env: &ProductionEnvironment, route: Route) -> Effect<FormAction> {
        let navigator = env.navigator();
        async_effect! {
            navigator.navigate(route.clone());
            Some(FormAction::Navigated { route })
        }
    }
}

impl Reducer for FormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = ProductionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::Mount => smallvec![Self::mount(state, env)],

            FormAction::FieldChanged(value) => {
                Self::change_field(state, value, env);
                smallvec![Effect::None]
            },

            FormAction::FieldTouched(field) => {
                Self::touch_field(state, field, env);
                smallvec![Effect::None]
            },

            FormAction::Submit => smallvec![Self::submit(state, env)],

            FormAction::Cancel => smallvec![Self::cancel(state, env)],

            FormAction::CatalogLoaded { movies } => {
                tracing::debug!(count = movies.len(), "Catalog loaded");
                state.catalog.resolve(movies);
                if !state.draft.movie_title.is_empty() {
                    Self::revalidate(state, FieldId::MovieTitle, env);
                }
                smallvec![Effect::None]
            },

            FormAction::CatalogFailed { error } => {
                tracing::warn!(%error, "Catalog query failed");
                state.catalog.fail(error);
                smallvec![Effect::None]
            },

            FormAction::SubmissionSucceeded { receipt } => {
                smallvec![Self::submission_succeeded(state, receipt, env)]
            },

            FormAction::SubmissionFailed { error } => {
                Self::submission_failed(state, error);
                smallvec![Effect::None]
            },

            FormAction::Navigated { route } => {
                state.phase = SubmitPhase::Navigated;
                state.route = Some(route);
                smallvec![Effect::None]
            },
        }
    }
}
