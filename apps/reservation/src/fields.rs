//! Field table of the reservation form
//!
//! One [`FieldDescriptor`] per field binds its label, the control used to
//! edit it and its validation rule. Views and the validator both iterate
//! [`FORM_FIELDS`] instead of addressing fields by string key.

use crate::schema::{self, FieldError, ValidationContext};
use crate::types::ReservationDraft;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one field of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    /// Current user (read-only)
    UserId,
    /// Name on the reservation
    Name,
    /// Contact email
    Email,
    /// Movie selector
    MovieTitle,
    /// Date picker
    Date,
    /// Time picker
    Time,
    /// Theater selector
    Theater,
    /// Terms checkbox
    TermsAndConditions,
}

impl FieldId {
    /// Every field in form order
    pub const ALL: [Self; 8] = [
        Self::UserId,
        Self::Name,
        Self::Email,
        Self::MovieTitle,
        Self::Date,
        Self::Time,
        Self::Theater,
        Self::TermsAndConditions,
    ];

    /// Key used for this field in the posted JSON
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::Name => "name",
            Self::Email => "email",
            Self::MovieTitle => "movieTitle",
            Self::Date => "date",
            Self::Time => "time",
            Self::Theater => "theater",
            Self::TermsAndConditions => "termsAndConditions",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a field is edited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Shown but never editable
    ReadOnlyText,
    /// Single-line text input
    Text,
    /// Email input
    Email,
    /// Dropdown fed by the movie catalog
    MovieSelect,
    /// Date picker
    Date,
    /// Time picker
    Time,
    /// Dropdown over the fixed theater list
    TheaterSelect,
    /// Checkbox
    Checkbox,
}

/// Validation rule of a single field
pub type Validator = fn(&ReservationDraft, &ValidationContext<'_>) -> Option<FieldError>;

/// Everything the form knows about one field
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    /// Which field
    pub id: FieldId,
    /// Label shown next to the control
    pub label: &'static str,
    /// Control used to edit it
    pub control: ControlKind,
    /// Rule run on change, on blur and on submit
    pub validator: Validator,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

/// The form, in display order
pub static FORM_FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor {
        id: FieldId::UserId,
        label: "User_ID",
        control: ControlKind::ReadOnlyText,
        validator: schema::check_user_id,
    },
    FieldDescriptor {
        id: FieldId::Name,
        label: "Name",
        control: ControlKind::Text,
        validator: schema::check_name,
    },
    FieldDescriptor {
        id: FieldId::Email,
        label: "Email",
        control: ControlKind::Email,
        validator: schema::check_email,
    },
    FieldDescriptor {
        id: FieldId::MovieTitle,
        label: "Movie Title",
        control: ControlKind::MovieSelect,
        validator: schema::check_movie_title,
    },
    FieldDescriptor {
        id: FieldId::Date,
        label: "Date",
        control: ControlKind::Date,
        validator: schema::check_date,
    },
    FieldDescriptor {
        id: FieldId::Time,
        label: "Time",
        control: ControlKind::Time,
        validator: schema::check_time,
    },
    FieldDescriptor {
        id: FieldId::Theater,
        label: "Theater",
        control: ControlKind::TheaterSelect,
        validator: schema::check_theater,
    },
    FieldDescriptor {
        id: FieldId::TermsAndConditions,
        label: "Accept terms and conditions",
        control: ControlKind::Checkbox,
        validator: schema::check_terms,
    },
];

/// Descriptor of `field`
#[must_use]
pub fn descriptor(field: FieldId) -> &'static FieldDescriptor {
    &FORM_FIELDS[field as usize]
}

/// A typed edit of one field
///
/// There is no variant for the user id; it cannot be edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// New name
    Name(String),
    /// New email
    Email(String),
    /// New movie selection
    MovieTitle(String),
    /// New date input
    Date(String),
    /// New time input
    Time(String),
    /// New theater selection
    Theater(String),
    /// Checkbox toggled
    TermsAndConditions(bool),
}

impl FieldValue {
    /// Field this value belongs to
    #[must_use]
    pub const fn field(&self) -> FieldId {
        match self {
            Self::Name(_) => FieldId::Name,
            Self::Email(_) => FieldId::Email,
            Self::MovieTitle(_) => FieldId::MovieTitle,
            Self::Date(_) => FieldId::Date,
            Self::Time(_) => FieldId::Time,
            Self::Theater(_) => FieldId::Theater,
            Self::TermsAndConditions(_) => FieldId::TermsAndConditions,
        }
    }

    /// Write the value into the draft
    pub fn apply(self, draft: &mut ReservationDraft) {
        match self {
            Self::Name(value) => draft.name = value,
            Self::Email(value) => draft.email = value,
            Self::MovieTitle(value) => draft.movie_title = value,
            Self::Date(value) => draft.date = value,
            Self::Time(value) => draft.time = value,
            Self::Theater(value) => draft.theater = value,
            Self::TermsAndConditions(value) => draft.terms_and_conditions = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_field_id() {
        for field in FieldId::ALL {
            assert_eq!(descriptor(field).id, field);
        }
    }

    #[test]
    fn apply_only_touches_its_field() {
        let mut draft = ReservationDraft::for_user("u-1");
        FieldValue::Theater("Theater-2".to_string()).apply(&mut draft);

        assert_eq!(draft.theater, "Theater-2");
        assert_eq!(draft.user_id, "u-1");
        assert!(draft.name.is_empty());
    }

    #[test]
    fn value_knows_its_field() {
        assert_eq!(FieldValue::TermsAndConditions(true).field(), FieldId::TermsAndConditions);
        assert_eq!(FieldValue::MovieTitle(String::new()).field(), FieldId::MovieTitle);
    }
}
