//! Actions of the reservation form.

use crate::fields::{FieldId, FieldValue};
use crate::navigation::Route;
use crate::types::{MovieSummary, ReservationReceipt};

/// Everything that can happen to the reservation form.
///
/// User intents (`Mount`, `FieldChanged`, `FieldTouched`, `Submit`,
/// `Cancel`) come from the view. The rest are fed back by effects.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    // ========== Intents ==========
    /// The form was opened; loads the movie catalog once.
    Mount,

    /// A field was edited.
    FieldChanged(FieldValue),

    /// A field lost focus.
    FieldTouched(FieldId),

    /// The submit control was pressed.
    Submit,

    /// The cancel link was pressed.
    Cancel,

    // ========== Effect results ==========
    /// The movie catalog arrived.
    CatalogLoaded {
        /// Snapshot of the listing
        movies: Vec<MovieSummary>,
    },

    /// The movie catalog could not be fetched.
    CatalogFailed {
        /// Technical reason
        error: String,
    },

    /// The backend accepted the reservation.
    SubmissionSucceeded {
        /// Backend answer
        receipt: ReservationReceipt,
    },

    /// The backend rejected the reservation or could not be reached.
    SubmissionFailed {
        /// Technical reason
        error: String,
    },

    /// The navigator moved to another page.
    Navigated {
        /// Destination
        route: Route,
    },
}
