//! Reservation validation schema
//!
//! Each field has one rule, evaluated independently of the others. Rules are
//! plain functions so the field table in [`crate::fields`] can point at them;
//! [`validate_field`] and [`validate_draft`] go through that table.
//!
//! The date field is also transformed: whatever the user typed is parsed and
//! re-emitted in display form (`May-1st-24`) before it is sent.

use crate::fields::{FORM_FIELDS, FieldId, descriptor};
use crate::types::{MovieSummary, ReservationDraft, ReservationRequest, Theater};
use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveTime};
use regex::Regex;
use showtime_core::environment::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum length of the name field, in characters
pub const MIN_NAME_LEN: usize = 2;

#[allow(clippy::expect_used)] // hardcoded pattern
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern should always compile")
});

/// Why a single field is invalid
///
/// The `Display` text is what the form shows under the field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Text shorter than `min` characters
    #[error("Name has to be at least {min} characters")]
    TooShort {
        /// Minimum character count
        min: usize,
    },

    /// Not an email address
    #[error("Not a valid email")]
    InvalidFormat,

    /// A selection is missing
    #[error("{}", required_message(.field))]
    Required {
        /// Field left empty
        field: FieldId,
    },

    /// A selection outside the available options
    #[error("{}", unknown_option_message(.field))]
    UnknownOption {
        /// Field holding the stale or foreign value
        field: FieldId,
    },

    /// The date cannot be parsed
    #[error("Not a valid date")]
    InvalidDate,

    /// The time is neither empty nor `HH:MM`
    #[error("Not a valid time")]
    InvalidTime,

    /// Terms must be accepted (only when enabled in [`SchemaOptions`])
    #[error("You have to accept the terms and conditions")]
    TermsNotAccepted,
}

const fn required_message(field: &FieldId) -> &'static str {
    match field {
        FieldId::MovieTitle => "You have to select the movie",
        FieldId::Theater => "You have to select a theater",
        _ => "This field is required",
    }
}

const fn unknown_option_message(field: &FieldId) -> &'static str {
    match field {
        FieldId::MovieTitle => "This movie is not in the current listing",
        FieldId::Theater => "Not a valid theater",
        _ => "Not a valid option",
    }
}

/// Switches for rules that are off by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Reject submission unless the terms checkbox is ticked
    pub require_terms: bool,
}

/// What a rule may look at besides the draft itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// Most recent catalog snapshot, if one has loaded
    pub catalog: Option<&'a [MovieSummary]>,
    /// Optional rules
    pub options: SchemaOptions,
}

impl<'a> ValidationContext<'a> {
    /// Context with the given options and no catalog snapshot
    #[must_use]
    pub const fn new(options: SchemaOptions) -> Self {
        Self {
            catalog: None,
            options,
        }
    }

    /// Attach a catalog snapshot
    #[must_use]
    pub const fn with_catalog(mut self, catalog: Option<&'a [MovieSummary]>) -> Self {
        self.catalog = catalog;
        self
    }
}

/// Field to error map
///
/// A missing entry means the field is valid or has not been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<FieldId, FieldError>,
}

impl ValidationResult {
    /// Error recorded for `field`
    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Record the outcome of validating `field`, clearing any earlier error
    pub fn set(&mut self, field: FieldId, outcome: Option<FieldError>) {
        match outcome {
            Some(error) => {
                self.errors.insert(field, error);
            },
            None => {
                self.errors.remove(&field);
            },
        }
    }

    /// True when no field has an error
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Same as [`Self::is_valid`]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Drop every error
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Errors in field order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

/// Run the rule of one field
#[must_use]
pub fn validate_field(
    field: FieldId,
    draft: &ReservationDraft,
    ctx: &ValidationContext<'_>,
) -> Option<FieldError> {
    (descriptor(field).validator)(draft, ctx)
}

/// Run every rule
#[must_use]
pub fn validate_draft(draft: &ReservationDraft, ctx: &ValidationContext<'_>) -> ValidationResult {
    let mut result = ValidationResult::default();
    for field in &FORM_FIELDS {
        result.set(field.id, (field.validator)(draft, ctx));
    }
    result
}

/// Validate the whole draft and build the request that gets posted
///
/// # Errors
///
/// Returns every field error when any rule fails; nothing is built then.
pub fn build_request(
    draft: &ReservationDraft,
    ctx: &ValidationContext<'_>,
) -> Result<ReservationRequest, ValidationResult> {
    let result = validate_draft(draft, ctx);
    if !result.is_valid() {
        return Err(result);
    }

    let Some(date) = parse_date(&draft.date) else {
        let mut result = ValidationResult::default();
        result.set(FieldId::Date, Some(FieldError::InvalidDate));
        return Err(result);
    };

    Ok(ReservationRequest {
        user_id: draft.user_id.clone(),
        name: draft.name.clone(),
        email: draft.email.clone(),
        movie_title: draft.movie_title.clone(),
        date: format_display_date(date),
        time: draft.time.clone(),
        theater: draft.theater.clone(),
        terms_and_conditions: draft.terms_and_conditions,
    })
}

// ========== Rules ==========

/// The user id only has to be a string, which the type already guarantees
#[must_use]
pub const fn check_user_id(_draft: &ReservationDraft, _ctx: &ValidationContext<'_>) -> Option<FieldError> {
    None
}

/// Name must have at least [`MIN_NAME_LEN`] characters
#[must_use]
pub fn check_name(draft: &ReservationDraft, _ctx: &ValidationContext<'_>) -> Option<FieldError> {
    (draft.name.chars().count() < MIN_NAME_LEN).then_some(FieldError::TooShort { min: MIN_NAME_LEN })
}

/// Email must look like an address
#[must_use]
pub fn check_email(draft: &ReservationDraft, _ctx: &ValidationContext<'_>) -> Option<FieldError> {
    (!is_valid_email(&draft.email)).then_some(FieldError::InvalidFormat)
}

/// A movie must be selected, and it must be in the loaded listing
#[must_use]
pub fn check_movie_title(draft: &ReservationDraft, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    if draft.movie_title.is_empty() {
        return Some(FieldError::Required {
            field: FieldId::MovieTitle,
        });
    }

    match ctx.catalog {
        Some(movies) if !movies.iter().any(|movie| movie.title == draft.movie_title) => {
            Some(FieldError::UnknownOption {
                field: FieldId::MovieTitle,
            })
        },
        _ => None,
    }
}

/// The date must parse; see [`parse_date`]
#[must_use]
pub fn check_date(draft: &ReservationDraft, _ctx: &ValidationContext<'_>) -> Option<FieldError> {
    parse_date(&draft.date).is_none().then_some(FieldError::InvalidDate)
}

/// Time is optional; when present it must be a time of day
#[must_use]
pub fn check_time(draft: &ReservationDraft, _ctx: &ValidationContext<'_>) -> Option<FieldError> {
    (!is_valid_time(&draft.time)).then_some(FieldError::InvalidTime)
}

/// A theater must be selected from [`Theater::ALL`]
#[must_use]
pub fn check_theater(draft: &ReservationDraft, _ctx: &ValidationContext<'_>) -> Option<FieldError> {
    if draft.theater.is_empty() {
        return Some(FieldError::Required {
            field: FieldId::Theater,
        });
    }

    draft
        .theater
        .parse::<Theater>()
        .is_err()
        .then_some(FieldError::UnknownOption {
            field: FieldId::Theater,
        })
}

/// Terms only matter when [`SchemaOptions::require_terms`] is set
#[must_use]
pub const fn check_terms(draft: &ReservationDraft, ctx: &ValidationContext<'_>) -> Option<FieldError> {
    if ctx.options.require_terms && !draft.terms_and_conditions {
        Some(FieldError::TermsNotAccepted)
    } else {
        None
    }
}

// ========== Formats ==========

/// Email shape check
#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    EMAIL.is_match(input)
}

/// Empty, `HH:MM` or `HH:MM:SS`
#[must_use]
pub fn is_valid_time(input: &str) -> bool {
    input.is_empty()
        || NaiveTime::parse_from_str(input, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(input, "%H:%M:%S").is_ok()
}

/// Parse a date as a user or a date picker would provide it
///
/// Accepts `2024-05-01`, `2024/05/01`, `05/01/2024`, RFC 3339 timestamps and
/// the display form produced by [`format_display_date`].
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
        .or_else(|| parse_display_date(input))
}

/// Render a date as `Mon-Dth-YY`, e.g. `May-1st-24`
#[must_use]
pub fn format_display_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{}-{day}{}-{}",
        date.format("%b"),
        ordinal_suffix(day),
        date.format("%y")
    )
}

/// Parse then re-render a date string
///
/// # Errors
///
/// Returns [`FieldError::InvalidDate`] when the input does not parse.
pub fn transform_date(input: &str) -> Result<String, FieldError> {
    parse_date(input)
        .map(format_display_date)
        .ok_or(FieldError::InvalidDate)
}

/// Today's date as a date input would hold it (`YYYY-MM-DD`)
#[must_use]
pub fn today_input(clock: &dyn Clock) -> String {
    clock.now().date_naive().format("%Y-%m-%d").to_string()
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn parse_display_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('-');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month = month.parse::<Month>().ok()?;

    let digits = day.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &day[digits.len()..];
    let day: u32 = digits.parse().ok()?;
    if !suffix.is_empty() && suffix != ordinal_suffix(day) {
        return None;
    }

    if year.len() != 2 {
        return None;
    }
    let short: i32 = year.parse().ok()?;
    // Two-digit years pivot at 68, same as %y
    let year = if short <= 68 { 2000 + short } else { 1900 + short };

    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_draft() -> ReservationDraft {
        ReservationDraft {
            user_id: "u-42".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            movie_title: "Dune".to_string(),
            date: "2024-05-01".to_string(),
            time: "19:30".to_string(),
            theater: "Theater-1".to_string(),
            terms_and_conditions: false,
        }
    }

    fn ctx() -> ValidationContext<'static> {
        ValidationContext::default()
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate_draft(&valid_draft(), &ctx()).is_valid());
    }

    #[test]
    fn short_name_is_rejected() {
        let draft = ReservationDraft {
            name: "A".to_string(),
            ..valid_draft()
        };

        let error = validate_field(FieldId::Name, &draft, &ctx()).unwrap();
        assert_eq!(error, FieldError::TooShort { min: 2 });
        assert_eq!(error.to_string(), "Name has to be at least 2 characters");
    }

    #[test]
    fn name_counts_characters_not_bytes() {
        let draft = ReservationDraft {
            name: "Zoë".to_string(),
            ..valid_draft()
        };
        assert_eq!(validate_field(FieldId::Name, &draft, &ctx()), None);

        let draft = ReservationDraft {
            name: "é".to_string(),
            ..valid_draft()
        };
        assert!(validate_field(FieldId::Name, &draft, &ctx()).is_some());
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["abc", "abc@", "@example.com", "a b@example.com", "ada@example", ""] {
            let draft = ReservationDraft {
                email: email.to_string(),
                ..valid_draft()
            };
            assert_eq!(
                validate_field(FieldId::Email, &draft, &ctx()),
                Some(FieldError::InvalidFormat),
                "{email:?} should be rejected"
            );
        }
        assert_eq!(FieldError::InvalidFormat.to_string(), "Not a valid email");
    }

    #[test]
    fn plausible_emails_are_accepted() {
        for email in ["ada@example.com", "first.last+tag@mail.example.co.uk", "o'neil@x.io"] {
            assert!(is_valid_email(email), "{email:?} should be accepted");
        }
    }

    #[test]
    fn empty_selections_are_required() {
        let draft = ReservationDraft {
            movie_title: String::new(),
            theater: String::new(),
            ..valid_draft()
        };

        let result = validate_draft(&draft, &ctx());
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.get(FieldId::MovieTitle).unwrap().to_string(),
            "You have to select the movie"
        );
        assert_eq!(
            result.get(FieldId::Theater).unwrap().to_string(),
            "You have to select a theater"
        );
        assert!(build_request(&draft, &ctx()).is_err());
    }

    #[test]
    fn movie_title_must_be_in_loaded_catalog() {
        let catalog = vec![MovieSummary::new(1, "Dune")];
        let ctx = ctx().with_catalog(Some(&catalog));

        assert_eq!(validate_field(FieldId::MovieTitle, &valid_draft(), &ctx), None);

        let draft = ReservationDraft {
            movie_title: "Heat".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate_field(FieldId::MovieTitle, &draft, &ctx),
            Some(FieldError::UnknownOption {
                field: FieldId::MovieTitle
            })
        );
    }

    #[test]
    fn unknown_theater_is_rejected() {
        let draft = ReservationDraft {
            theater: "Theater-9".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate_field(FieldId::Theater, &draft, &ctx()),
            Some(FieldError::UnknownOption {
                field: FieldId::Theater
            })
        );
    }

    #[test]
    fn time_is_optional() {
        for (time, ok) in [("", true), ("07:05", true), ("23:59:59", true), ("25:00", false), ("noon", false)] {
            let draft = ReservationDraft {
                time: time.to_string(),
                ..valid_draft()
            };
            assert_eq!(validate_field(FieldId::Time, &draft, &ctx()).is_none(), ok, "{time:?}");
        }
    }

    #[test]
    fn terms_are_type_only_unless_required() {
        let draft = valid_draft();
        assert_eq!(validate_field(FieldId::TermsAndConditions, &draft, &ctx()), None);

        let strict = ValidationContext::new(SchemaOptions { require_terms: true });
        assert_eq!(
            validate_field(FieldId::TermsAndConditions, &draft, &strict),
            Some(FieldError::TermsNotAccepted)
        );

        let accepted = ReservationDraft {
            terms_and_conditions: true,
            ..draft
        };
        assert_eq!(validate_field(FieldId::TermsAndConditions, &accepted, &strict), None);
    }

    #[test]
    fn iso_date_is_rendered_for_display() {
        assert_eq!(transform_date("2024-05-01").unwrap(), "May-1st-24");
        assert_eq!(transform_date("2024-05-02").unwrap(), "May-2nd-24");
        assert_eq!(transform_date("2024-05-03").unwrap(), "May-3rd-24");
        assert_eq!(transform_date("2024-05-11").unwrap(), "May-11th-24");
        assert_eq!(transform_date("2024-05-22").unwrap(), "May-22nd-24");
        assert_eq!(transform_date("2023-12-31T18:00:00Z").unwrap(), "Dec-31st-23");
    }

    #[test]
    fn display_date_is_idempotent() {
        let once = transform_date("2024-05-01").unwrap();
        assert_eq!(transform_date(&once).unwrap(), once);
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        for input in ["", "   ", "tomorrow", "2024-13-01", "Feb-30th-24", "May-1nd-24"] {
            assert_eq!(transform_date(input), Err(FieldError::InvalidDate), "{input:?}");
        }
    }

    #[test]
    fn build_request_transforms_date_only() {
        let draft = valid_draft();
        let request = build_request(&draft, &ctx()).unwrap();

        assert_eq!(request.date, "May-1st-24");
        assert_eq!(request.name, draft.name);
        assert_eq!(request.email, draft.email);
        assert_eq!(request.movie_title, draft.movie_title);
        assert_eq!(request.time, draft.time);
        assert_eq!(request.theater, draft.theater);
        assert_eq!(request.user_id, draft.user_id);
    }

    #[test]
    fn today_is_a_valid_date_input() {
        let today = today_input(&showtime_testing::test_clock());
        assert_eq!(today, "2025-01-01");
        assert_eq!(transform_date(&today).unwrap(), "Jan-1st-25");
    }

    proptest! {
        #[test]
        fn short_names_never_pass(name in "\\PC{0,1}") {
            let draft = ReservationDraft { name, ..valid_draft() };
            prop_assert_eq!(
                validate_field(FieldId::Name, &draft, &ctx()),
                Some(FieldError::TooShort { min: 2 })
            );
        }

        #[test]
        fn long_enough_names_pass(name in "\\PC{2,40}") {
            let draft = ReservationDraft { name, ..valid_draft() };
            prop_assert_eq!(validate_field(FieldId::Name, &draft, &ctx()), None);
        }

        #[test]
        fn strings_without_at_are_not_emails(email in "[^@]{0,30}") {
            prop_assert!(!is_valid_email(&email));
        }

        #[test]
        fn every_calendar_date_round_trips(days in 0i64..36_500) {
            let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days);
            let shown = format_display_date(date);
            // Two-digit years only round-trip inside the pivot window
            if (1969..=2068).contains(&date.year()) {
                prop_assert_eq!(parse_date(&shown), Some(date));
            }
            prop_assert_eq!(transform_date(&date.format("%Y-%m-%d").to_string()).unwrap(), shown);
        }

        #[test]
        fn a_rejected_draft_never_builds_a_request(name in "\\PC{0,1}", theater in "[a-z]{0,5}") {
            let draft = ReservationDraft { name, theater, ..valid_draft() };
            prop_assert!(build_request(&draft, &ctx()).is_err());
        }
    }
}
