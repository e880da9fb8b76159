//! The reservation form.
//!
//! # Flow
//!
//! ```text
//! Mount ──► list_movies ──► CatalogLoaded / CatalogFailed
//!
//! FieldChanged / FieldTouched ──► field rule ──► errors
//!
//! Submit ──► full schema ──┬─► invalid: errors, back to Idle
//!                          └─► create_reservation
//!                                 ├─► SubmissionSucceeded ──► navigate(/ticket) ──► Navigated
//!                                 └─► SubmissionFailed ──► logged, back to Idle
//! ```
//!
//! The user id comes from the session the form was built with and is never
//! edited. Field edits are ignored while a submission is in flight and once
//! the form has been left.

pub mod actions;
pub mod reducer;
pub mod types;

pub use actions::FormAction;
pub use reducer::FormReducer;
pub use types::{FormState, SubmitPhase};
