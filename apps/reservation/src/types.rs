//! Domain types for the reservation client.
//!
//! Catalog types mirror what the movie backend returns. The draft is the
//! editable form state; the request is what actually goes over the wire.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend identifier of a movie
///
/// The backend has emitted both numeric and string ids over time, so both
/// are accepted and kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Creates a `MovieId` from any displayable value
    #[must_use]
    pub fn new(id: impl fmt::Display) -> Self {
        Self(id.to_string())
    }

    /// Returns the id as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// One movie as listed by the catalog and search endpoints
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Backend identifier
    pub id: MovieId,
    /// Display title, also the value submitted with a reservation
    pub title: String,
    /// Genres of the movie (the backend spells this key several ways)
    #[serde(
        default,
        alias = "genreId",
        alias = "genre_id",
        alias = "genere_id",
        deserialize_with = "one_or_many"
    )]
    pub genre_ids: Vec<u64>,
    /// Short synopsis shown on cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Poster image path shown on cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

impl MovieSummary {
    /// Creates a summary with only the fields the form needs
    #[must_use]
    pub fn new(id: impl fmt::Display, title: impl Into<String>) -> Self {
        Self {
            id: MovieId::new(id),
            title: title.into(),
            genre_ids: Vec::new(),
            overview: None,
            poster_path: None,
        }
    }

    /// Sets the genre ids
    #[must_use]
    pub fn with_genres(mut self, genre_ids: impl Into<Vec<u64>>) -> Self {
        self.genre_ids = genre_ids.into();
        self
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(u64),
        Many(Vec<u64>),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::One(id) => vec![id],
        Raw::Many(ids) => ids,
        Raw::Missing(()) => Vec::new(),
    })
}

/// Genre id to name mapping entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre identifier referenced by [`MovieSummary::genre_ids`]
    pub id: u64,
    /// Display name
    pub name: String,
}

/// The theaters a reservation can be made for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theater {
    /// Theater 1
    #[serde(rename = "Theater-1")]
    One,
    /// Theater 2
    #[serde(rename = "Theater-2")]
    Two,
    /// Theater 3
    #[serde(rename = "Theater-3")]
    Three,
}

impl Theater {
    /// Every theater, in display order
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// Value stored in the draft and sent to the backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "Theater-1",
            Self::Two => "Theater-2",
            Self::Three => "Theater-3",
        }
    }

    /// Label shown in the selector
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "Theater 1",
            Self::Two => "Theater 2",
            Self::Three => "Theater 3",
        }
    }
}

impl FromStr for Theater {
    type Err = UnknownTheater;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theater| theater.as_str() == s)
            .ok_or_else(|| UnknownTheater(s.to_string()))
    }
}

impl fmt::Display for Theater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A theater value outside [`Theater::ALL`]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown theater: {0}")]
pub struct UnknownTheater(pub String);

/// The in-progress reservation form
///
/// Every field holds raw user input; nothing here is validated. See
/// [`crate::schema`] for the rules and the date transform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservationDraft {
    /// Current user, taken from the session when the form is created
    pub user_id: String,
    /// Name on the reservation
    pub name: String,
    /// Contact email
    pub email: String,
    /// Selected movie title
    pub movie_title: String,
    /// Date as typed or picked
    pub date: String,
    /// Optional time of day
    pub time: String,
    /// Selected theater value (`Theater-1` ...)
    pub theater: String,
    /// Terms and conditions checkbox
    pub terms_and_conditions: bool,
}

impl ReservationDraft {
    /// Creates an empty draft for the given user
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}

/// The JSON document posted to the reservations endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Current user id (may be empty)
    pub user_id: String,
    /// Name on the reservation
    pub name: String,
    /// Contact email
    pub email: String,
    /// Selected movie title
    #[serde(rename = "movieTitle")]
    pub movie_title: String,
    /// Date in display form, e.g. `May-1st-24`
    pub date: String,
    /// Time of day as entered, possibly empty
    pub time: String,
    /// Theater value
    pub theater: String,
    /// Terms and conditions flag as entered
    #[serde(rename = "termsAndConditions")]
    pub terms_and_conditions: bool,
}

/// Whatever the backend answered to a successful reservation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationReceipt(pub serde_json::Value);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn movie_summary_accepts_numeric_and_text_ids() {
        let numeric: MovieSummary = serde_json::from_str(r#"{"id":1,"title":"Dune"}"#).unwrap();
        let text: MovieSummary = serde_json::from_str(r#"{"id":"a1f","title":"Heat"}"#).unwrap();

        assert_eq!(numeric.id.as_str(), "1");
        assert_eq!(text.id.as_str(), "a1f");
        assert!(numeric.genre_ids.is_empty());
    }

    #[test]
    fn movie_summary_genre_key_variants() {
        let single: MovieSummary =
            serde_json::from_str(r#"{"id":1,"title":"Dune","genreId":878}"#).unwrap();
        let list: MovieSummary =
            serde_json::from_str(r#"{"id":2,"title":"Heat","genere_id":[28,80]}"#).unwrap();
        let null: MovieSummary =
            serde_json::from_str(r#"{"id":3,"title":"Up","genre_ids":null}"#).unwrap();

        assert_eq!(single.genre_ids, vec![878]);
        assert_eq!(list.genre_ids, vec![28, 80]);
        assert!(null.genre_ids.is_empty());
    }

    #[test]
    fn theater_round_trips_through_its_value() {
        for theater in Theater::ALL {
            assert_eq!(theater.as_str().parse::<Theater>(), Ok(theater));
        }
        assert!("Theater 1".parse::<Theater>().is_err());
    }

    #[test]
    fn request_uses_backend_keys() {
        let request = ReservationRequest {
            user_id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            movie_title: "Dune".to_string(),
            date: "May-1st-24".to_string(),
            time: String::new(),
            theater: "Theater-2".to_string(),
            terms_and_conditions: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["movieTitle"], "Dune");
        assert_eq!(json["termsAndConditions"], false);
        assert_eq!(json["user_id"], "u-1");
        assert_eq!(json["time"], "");
    }
}
