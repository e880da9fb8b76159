//! Render-ready descriptions of the pages
//!
//! Views are plain data derived from state; nothing here mutates anything.
//! `Display` impls give a text rendering for the terminal demo.

use crate::catalog::{GENERIC_FAILURE, QueryState};
use crate::fields::{ControlKind, FORM_FIELDS, FieldDescriptor, FieldId};
use crate::form::FormState;
use crate::navigation::Route;
use crate::search::{SearchState, genre_names};
use crate::types::Theater;
use std::fmt;

/// Label of the submit control while idle
pub const SUBMIT_LABEL: &str = "Submit";
/// Label of the submit control while a reservation is in flight
pub const SUBMITTING_LABEL: &str = "Loading..";
/// Shown while search results are pending
pub const LOADING_MESSAGE: &str = "loading";
/// Shown for a successful search without matches
pub const NO_RESULTS_MESSAGE: &str = "No results found";

// ========== Reservation form ==========

/// One choice of a selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// Value written into the draft
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

/// Current input of a control
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldInput {
    /// Text-like controls and selectors
    Text(String),
    /// Checkbox
    Checked(bool),
}

/// One rendered field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    /// Which field
    pub id: FieldId,
    /// Label
    pub label: &'static str,
    /// Control kind
    pub control: ControlKind,
    /// Current input
    pub input: FieldInput,
    /// Helper text under the control (the field's error, if any)
    pub helper_text: Option<String>,
    /// Control cannot be used
    pub disabled: bool,
    /// Choices, for selectors
    pub options: Vec<SelectOption>,
}

/// The submit control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitButtonView {
    /// `Submit` or `Loading..`
    pub label: &'static str,
    /// Disabled while a submission is in flight
    pub disabled: bool,
}

/// The reservation page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    /// Page heading
    pub title: &'static str,
    /// Fields in display order
    pub fields: Vec<FieldView>,
    /// Submit control
    pub submit: SubmitButtonView,
    /// Where the cancel link leads
    pub cancel: Route,
    /// Message standing in for the movie selector's options
    pub catalog_notice: Option<&'static str>,
}

impl FormView {
    /// Rendered field
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Describe the reservation page for `state`
#[must_use]
pub fn render_form(state: &FormState) -> FormView {
    let fields = FORM_FIELDS.iter().map(|descriptor| render_field(state, descriptor)).collect();

    let submitting = state.is_submitting();
    let catalog_notice = match state.catalog().state() {
        QueryState::Error(_) => Some(GENERIC_FAILURE),
        QueryState::Pending => Some(LOADING_MESSAGE),
        QueryState::Success(_) => None,
    };

    FormView {
        title: "Reservation",
        fields,
        submit: SubmitButtonView {
            label: if submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            disabled: !state.can_submit(),
        },
        cancel: Route::Home,
        catalog_notice,
    }
}

fn render_field(state: &FormState, descriptor: &FieldDescriptor) -> FieldView {
    let draft = state.draft();
    let text = |value: &str| FieldInput::Text(value.to_string());

    let (input, options, disabled) = match descriptor.id {
        FieldId::UserId => (text(&draft.user_id), Vec::new(), true),
        FieldId::Name => (text(&draft.name), Vec::new(), false),
        FieldId::Email => (text(&draft.email), Vec::new(), false),
        FieldId::Date => (text(&draft.date), Vec::new(), false),
        FieldId::Time => (text(&draft.time), Vec::new(), false),
        FieldId::MovieTitle => {
            let options: Vec<_> = state
                .catalog()
                .movies()
                .unwrap_or_default()
                .iter()
                .map(|movie| SelectOption {
                    value: movie.title.clone(),
                    label: movie.title.clone(),
                })
                .collect();
            let disabled = state.catalog().movies().is_none();
            (text(&draft.movie_title), options, disabled)
        },
        FieldId::Theater => {
            let options = Theater::ALL
                .iter()
                .map(|theater| SelectOption {
                    value: theater.as_str().to_string(),
                    label: theater.label().to_string(),
                })
                .collect();
            (text(&draft.theater), options, false)
        },
        FieldId::TermsAndConditions => (FieldInput::Checked(draft.terms_and_conditions), Vec::new(), false),
    };

    FieldView {
        id: descriptor.id,
        label: descriptor.label,
        control: descriptor.control,
        input,
        helper_text: state
            .is_touched(descriptor.id)
            .then(|| state.error(descriptor.id))
            .flatten()
            .map(ToString::to_string),
        disabled: disabled || !state.is_editable(),
        options,
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for field in &self.fields {
            let value = match &field.input {
                FieldInput::Text(text) => text.clone(),
                FieldInput::Checked(checked) => (if *checked { "[x]" } else { "[ ]" }).to_string(),
            };
            let lock = if field.disabled { " (disabled)" } else { "" };
            writeln!(f, "{:<28} {value}{lock}", field.label)?;

            if !field.options.is_empty() {
                let labels: Vec<_> = field.options.iter().map(|o| o.label.as_str()).collect();
                writeln!(f, "{:<28} options: {}", "", labels.join(", "))?;
            }
            if let Some(helper) = &field.helper_text {
                writeln!(f, "{:<28} ! {helper}", "")?;
            }
        }
        if let Some(notice) = self.catalog_notice {
            writeln!(f, "movies: {notice}")?;
        }
        write!(
            f,
            "[{}]{}  Cancel -> {}",
            self.submit.label,
            if self.submit.disabled { " (disabled)" } else { "" },
            self.cancel
        )
    }
}

// ========== Search ==========

/// One movie of the results grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieCard {
    /// Title
    pub title: String,
    /// Genre names, possibly empty
    pub genres: Vec<String>,
    /// Synopsis
    pub overview: Option<String>,
    /// Poster image path
    pub poster_path: Option<String>,
}

/// The search page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchView {
    /// Search failed
    Error(&'static str),
    /// Waiting for results
    Loading(&'static str),
    /// Results, with a notice when there are none
    Results {
        /// One card per movie
        cards: Vec<MovieCard>,
        /// `No results found` for an empty list
        notice: Option<&'static str>,
    },
}

/// Describe the search page for `state`
#[must_use]
pub fn render_search(state: &SearchState) -> SearchView {
    match &state.results {
        QueryState::Error(_) => SearchView::Error(GENERIC_FAILURE),
        QueryState::Pending => SearchView::Loading(LOADING_MESSAGE),
        QueryState::Success(movies) => SearchView::Results {
            cards: movies
                .iter()
                .map(|movie| MovieCard {
                    title: movie.title.clone(),
                    genres: genre_names(&movie.genre_ids, &state.genres),
                    overview: movie.overview.clone(),
                    poster_path: movie.poster_path.clone(),
                })
                .collect(),
            notice: movies.is_empty().then_some(NO_RESULTS_MESSAGE),
        },
    }
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(message) | Self::Loading(message) => write!(f, "{message}"),
            Self::Results { cards, notice } => {
                for card in cards {
                    write!(f, "* {}", card.title)?;
                    if !card.genres.is_empty() {
                        write!(f, " [{}]", card.genres.join(", "))?;
                    }
                    writeln!(f)?;
                    if let Some(overview) = &card.overview {
                        writeln!(f, "  {overview}")?;
                    }
                }
                if let Some(notice) = notice {
                    write!(f, "{notice}")?;
                }
                Ok(())
            },
        }
    }
}

// ========== Footer ==========

/// A titled list of footer entries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FooterSection {
    /// Heading
    pub heading: &'static str,
    /// Entries
    pub items: &'static [&'static str],
}

/// The static site footer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FooterView {
    /// Sections, left to right
    pub sections: &'static [FooterSection],
}

/// Footer shown under every page
pub const FOOTER: FooterView = FooterView {
    sections: &[
        FooterSection {
            heading: "Movies",
            items: &["Trending", "Coming soon"],
        },
        FooterSection {
            heading: "Location",
            items: &["Tirane"],
        },
        FooterSection {
            heading: "Using tech",
            items: &["3D", "8D", "16D"],
        },
        FooterSection {
            heading: "Follow us",
            items: &["Instagram", "Facebook"],
        },
    ],
};

impl fmt::Display for FooterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections: Vec<_> = self
            .sections
            .iter()
            .map(|section| format!("{}: {}", section.heading, section.items.join(", ")))
            .collect();
        write!(f, "{}", sections.join(" | "))
    }
}
