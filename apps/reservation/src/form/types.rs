//! State of the reservation form.

use crate::catalog::CatalogQuery;
use crate::fields::FieldId;
use crate::navigation::Route;
use crate::schema::{FieldError, SchemaOptions, ValidationContext, ValidationResult};
use crate::session::SessionContext;
use crate::types::{ReservationDraft, ReservationReceipt};
use std::collections::BTreeSet;

/// Where the form is in the submit workflow.
///
/// ```text
/// Idle → Validating → Submitting → Succeeded → Navigated
///            ↓            ↓
///          Idle         Idle
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    /// Editable, nothing in flight
    #[default]
    Idle,
    /// Running the full schema (only ever seen inside the reducer)
    Validating,
    /// Reservation posted, waiting for the backend
    Submitting,
    /// Backend accepted, navigation requested
    Succeeded,
    /// The form has been left
    Navigated,
}

/// The reservation form.
///
/// Built once per visit from the session; the user id never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub(crate) draft: ReservationDraft,
    pub(crate) errors: ValidationResult,
    pub(crate) catalog: CatalogQuery,
    pub(crate) phase: SubmitPhase,
    pub(crate) touched: BTreeSet<FieldId>,
    pub(crate) last_failure: Option<String>,
    pub(crate) receipt: Option<ReservationReceipt>,
    pub(crate) route: Option<Route>,
}

impl FormState {
    /// Fresh form for the session's user.
    #[must_use]
    pub fn new(session: &SessionContext) -> Self {
        Self {
            draft: ReservationDraft::for_user(session.draft_user_id()),
            errors: ValidationResult::default(),
            catalog: CatalogQuery::default(),
            phase: SubmitPhase::Idle,
            touched: BTreeSet::new(),
            last_failure: None,
            receipt: None,
            route: None,
        }
    }

    /// Current field values.
    #[must_use]
    pub const fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    /// Errors found so far.
    #[must_use]
    pub const fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Error of one field.
    #[must_use]
    pub fn error(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Movie list backing the selector.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogQuery {
        &self.catalog
    }

    /// Submit workflow phase.
    #[must_use]
    pub const fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Whether the user has interacted with `field`.
    #[must_use]
    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched.contains(&field)
    }

    /// Last submission failure; kept for diagnostics, never rendered.
    #[must_use]
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Backend answer to the accepted reservation.
    #[must_use]
    pub const fn receipt(&self) -> Option<&ReservationReceipt> {
        self.receipt.as_ref()
    }

    /// Route the form navigated to, once it has been left.
    #[must_use]
    pub const fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// No field currently has an error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }

    /// True from the moment a submit is accepted until the form navigates
    /// away or recovers from a failure.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(
            self.phase,
            SubmitPhase::Validating | SubmitPhase::Submitting | SubmitPhase::Succeeded
        )
    }

    /// The form has been left.
    #[must_use]
    pub const fn is_navigated(&self) -> bool {
        matches!(self.phase, SubmitPhase::Navigated)
    }

    /// Submit control enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.is_navigated()
    }

    /// Fields accept edits.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.can_submit()
    }

    pub(crate) fn validation_context(&self, options: SchemaOptions) -> ValidationContext<'_> {
        ValidationContext::new(options).with_catalog(self.catalog.movies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_takes_user_from_session() {
        let state = FormState::new(&SessionContext::signed_in("u-9"));

        assert_eq!(state.draft().user_id, "u-9");
        assert_eq!(state.phase(), SubmitPhase::Idle);
        assert!(state.is_valid());
        assert!(state.can_submit());
        assert!(state.catalog().state().is_pending());
    }

    #[test]
    fn submitting_window_covers_success_until_navigation() {
        let mut state = FormState::new(&SessionContext::anonymous());

        for (phase, submitting) in [
            (SubmitPhase::Idle, false),
            (SubmitPhase::Submitting, true),
            (SubmitPhase::Succeeded, true),
            (SubmitPhase::Navigated, false),
        ] {
            state.phase = phase;
            assert_eq!(state.is_submitting(), submitting, "{phase:?}");
        }
        assert!(!state.can_submit());
    }
}
