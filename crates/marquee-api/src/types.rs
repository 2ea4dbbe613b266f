// Wire types for the REST API.
//
// Field names follow the backend's camelCase JSON. Optional fields are
// `Option` so that an absent value and an empty string stay distinct.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ── Enumerations ─────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    // The backend stores single-letter codes and may echo them back.
    #[serde(alias = "M")]
    Male,
    #[serde(alias = "F")]
    Female,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    ActionAndAdventure,
    Animation,
    Comedy,
    Documentary,
    Drama,
    Historical,
    Horror,
    Noir,
    SciFi,
    Western,
}

impl From<Gender> for serde_json::Value {
    fn from(gender: Gender) -> Self {
        Self::String(gender.to_string())
    }
}

impl From<Genre> for serde_json::Value {
    fn from(genre: Genre) -> Self {
        Self::String(genre.to_string())
    }
}

// ── Entities ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub movies: Vec<MovieSummary>,
}

/// An actor as embedded in a movie (no back-references).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSummary {
    pub id: i64,
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub genre: Genre,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub actors: Vec<ActorSummary>,
}

/// A movie as embedded in an actor (no back-references).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub genre: Genre,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

// ── Response envelopes ───────────────────────────────────────────────

/// `GET /movies?page=&search=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub total_movies: u64,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub offset: u64,
}

/// `GET /actors?page=&search=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorPage {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub total_actors: u64,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub offset: u64,
}

/// `GET /movies/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieEnvelope {
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub success: bool,
}

/// `GET /actors/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorEnvelope {
    #[serde(default)]
    pub actor: Option<Actor>,
    #[serde(default)]
    pub success: bool,
}

/// `POST /movies` and `POST /actors` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    #[serde(default)]
    pub success: bool,
    pub id: i64,
}

/// `POST /casts` on success. The id is synthetic: `movie-{m}-actor-{a}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastCreated {
    #[serde(default)]
    pub success: bool,
    pub id: String,
}

// ── Request bodies ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActor {
    pub name: String,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub genre: Genre,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// `POST /casts` body. The backend expects snake_case keys here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCast {
    pub movie_id: i64,
    pub actor_id: i64,
}

// ── JSON Patch ───────────────────────────────────────────────────────

/// The subset of RFC 6902 operations the backend accepts.
///
/// `replace` is deliberately absent: the backend treats `add` as an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
}

/// A single JSON-Patch instruction against a flat `/fieldName` path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl PatchOperation {
    /// Upsert `field` with `value`.
    pub fn add(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            op: PatchOp::Add,
            path: format!("/{field}"),
            value: Some(value.into()),
        }
    }

    /// Remove `field`. Carries no value.
    pub fn remove(field: &str) -> Self {
        Self {
            op: PatchOp::Remove,
            path: format!("/{field}"),
            value: None,
        }
    }

    /// The field name without the leading slash.
    pub fn field(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

// ── Response status ──────────────────────────────────────────────────

/// HTTP status code plus its canonical reason phrase.
///
/// Rendered as `"{code}: {reason}"`, which is what users see verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: u16,
    pub reason: String,
}

impl Status {
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Anything below 400 counts as success.
    pub fn is_success(&self) -> bool {
        self.code < 400
    }
}

impl From<reqwest::StatusCode> for Status {
    fn from(status: reqwest::StatusCode) -> Self {
        Self {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.reason)
    }
}

/// A successful write: status line plus decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: Status,
    pub body: T,
}
