// ── Edit forms ──
//
// Raw text as the user typed it, plus the checks that turn it into typed
// request bodies. Nothing here talks to the network: a form that fails
// validation never produces a request.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use marquee_api::{Actor, Gender, Genre, Movie, NewActor, NewMovie, PatchOperation};
use url::Url;

use crate::patch::{diff_actor, diff_movie};

/// Date format for `releaseDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Field errors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field (e.g. `photoUrl`).
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in one form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, Self> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

// ── Field checks ─────────────────────────────────────────────────────

fn required_text(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, "is required");
        None
    } else {
        Some(value.to_owned())
    }
}

fn optional_url(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match Url::parse(value) {
        Ok(_) => Some(value.to_owned()),
        Err(e) => {
            errors.push(field, format!("must be an absolute URL ({e})"));
            None
        }
    }
}

/// Parse an enum by its SCREAMING_SNAKE_CASE name, ignoring case.
fn parse_enum<E: FromStr>(raw: &str) -> Option<E> {
    raw.trim().to_ascii_uppercase().parse().ok()
}

fn enum_names<E: strum::IntoEnumIterator + fmt::Display>() -> String {
    E::iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

// ── Actor form ───────────────────────────────────────────────────────

/// Raw input for creating or editing an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorForm {
    pub name: String,
    /// `MALE`, `FEMALE`, or empty.
    pub gender: String,
    pub photo_url: String,
    pub age: String,
}

impl ActorForm {
    /// Prefill from an actor as loaded.
    pub fn from_snapshot(actor: &Actor) -> Self {
        Self {
            name: actor.name.clone(),
            gender: actor.gender.map(|g| g.to_string()).unwrap_or_default(),
            photo_url: actor.photo_url.clone().unwrap_or_default(),
            age: actor.age.to_string(),
        }
    }

    /// Check every field and coerce into a request body.
    pub fn validate(&self) -> Result<NewActor, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = required_text(&mut errors, "name", &self.name);

        let gender = match self.gender.trim() {
            "" => Some(None),
            raw => match parse_enum::<Gender>(raw) {
                Some(g) => Some(Some(g)),
                None => {
                    errors.push(
                        "gender",
                        format!("must be one of {}", enum_names::<Gender>()),
                    );
                    None
                }
            },
        };

        let photo_url = optional_url(&mut errors, "photoUrl", &self.photo_url);

        let age = match self.age.trim().parse::<u32>() {
            Ok(age) if age >= 1 => Some(age),
            _ => {
                errors.push("age", "must be a whole number of at least 1");
                None
            }
        };

        let draft = match (name, gender, age) {
            (Some(name), Some(gender), Some(age)) => Some(NewActor {
                name,
                age,
                gender,
                photo_url,
            }),
            _ => None,
        };
        errors.into_result(draft)
    }

    /// Validate, then diff against the snapshot the form was loaded from.
    pub fn diff(&self, snapshot: &Actor) -> Result<Vec<PatchOperation>, FieldErrors> {
        self.validate().map(|draft| diff_actor(snapshot, &draft))
    }
}

// ── Movie form ───────────────────────────────────────────────────────

/// Raw input for creating or editing a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub genre: String,
    pub poster_url: String,
    /// `YYYY-MM-DD`, or empty.
    pub release_date: String,
}

impl MovieForm {
    pub fn from_snapshot(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.to_string(),
            poster_url: movie.poster_url.clone().unwrap_or_default(),
            release_date: movie.release_date.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewMovie, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = required_text(&mut errors, "title", &self.title);

        let genre = if self.genre.trim().is_empty() {
            errors.push("genre", "is required");
            None
        } else {
            let parsed = parse_enum::<Genre>(&self.genre);
            if parsed.is_none() {
                errors.push("genre", format!("must be one of {}", enum_names::<Genre>()));
            }
            parsed
        };

        let poster_url = optional_url(&mut errors, "posterUrl", &self.poster_url);

        let release_date = match self.release_date.trim() {
            "" => None,
            raw => {
                if NaiveDate::parse_from_str(raw, DATE_FORMAT).is_err() {
                    errors.push("releaseDate", "must be a date like 1927-01-10");
                }
                Some(raw.to_owned())
            }
        };

        let draft = match (title, genre) {
            (Some(title), Some(genre)) => Some(NewMovie {
                title,
                genre,
                poster_url,
                release_date,
            }),
            _ => None,
        };
        errors.into_result(draft)
    }

    pub fn diff(&self, snapshot: &Movie) -> Result<Vec<PatchOperation>, FieldErrors> {
        self.validate().map(|draft| diff_movie(snapshot, &draft))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn john() -> ActorForm {
        ActorForm {
            name: "John".into(),
            gender: "MALE".into(),
            photo_url: String::new(),
            age: "30".into(),
        }
    }

    #[test]
    fn valid_actor_form_becomes_request_body() {
        assert_eq!(
            john().validate().unwrap(),
            NewActor {
                name: "John".into(),
                age: 30,
                gender: Some(Gender::Male),
                photo_url: None,
            }
        );
    }

    #[test]
    fn gender_is_case_insensitive_and_optional() {
        let lower = ActorForm {
            gender: "female".into(),
            ..john()
        };
        assert_eq!(lower.validate().unwrap().gender, Some(Gender::Female));

        let blank = ActorForm {
            gender: "  ".into(),
            ..john()
        };
        assert_eq!(blank.validate().unwrap().gender, None);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let form = ActorForm {
            name: " ".into(),
            gender: "other".into(),
            photo_url: "not a url".into(),
            age: "0".into(),
        };
        let errors = form.validate().unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "gender", "photoUrl", "age"]);
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.get("gender"), Some("must be one of MALE, FEMALE"));
    }

    #[test]
    fn age_must_be_a_number() {
        let form = ActorForm {
            age: "thirty".into(),
            ..john()
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "age: must be a whole number of at least 1"
        );
    }

    #[test]
    fn snapshot_round_trips_through_form() {
        let actor = Actor {
            id: 4,
            name: "Jane".into(),
            age: 52,
            gender: Some(Gender::Female),
            photo_url: Some("https://img.test/jane.png".into()),
            movies: Vec::new(),
        };
        let form = ActorForm::from_snapshot(&actor);
        assert_eq!(form.age, "52");
        assert!(form.diff(&actor).unwrap().is_empty());
    }

    #[test]
    fn edited_age_diffs_to_one_add() {
        let actor = Actor {
            id: 4,
            name: "A".into(),
            age: 30,
            gender: None,
            photo_url: None,
            movies: Vec::new(),
        };
        let form = ActorForm {
            age: " 31 ".into(),
            ..ActorForm::from_snapshot(&actor)
        };
        assert_eq!(form.diff(&actor).unwrap(), vec![PatchOperation::add("age", 31)]);
    }

    #[test]
    fn cleared_photo_diffs_to_one_remove() {
        let actor = Actor {
            id: 4,
            name: "A".into(),
            age: 30,
            gender: None,
            photo_url: Some("http://x".into()),
            movies: Vec::new(),
        };
        let form = ActorForm {
            photo_url: String::new(),
            ..ActorForm::from_snapshot(&actor)
        };
        let ops = form.diff(&actor).unwrap();
        assert_eq!(
            serde_json::to_value(&ops).unwrap(),
            serde_json::json!([{ "op": "remove", "path": "/photoUrl" }])
        );
    }

    #[test]
    fn movie_form_checks_genre_and_date() {
        let form = MovieForm {
            title: "Metropolis".into(),
            genre: "space opera".into(),
            poster_url: String::new(),
            release_date: "10/01/1927".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("genre").unwrap().contains("SCI_FI"));
        assert_eq!(
            errors.get("releaseDate"),
            Some("must be a date like 1927-01-10")
        );

        let fixed = MovieForm {
            genre: "sci_fi".into(),
            release_date: "1927-01-10".into(),
            ..form
        };
        let movie = fixed.validate().unwrap();
        assert_eq!(movie.genre, Genre::SciFi);
        assert_eq!(movie.release_date.as_deref(), Some("1927-01-10"));
    }

    #[test]
    fn movie_genre_is_required() {
        let errors = MovieForm {
            title: "Untitled".into(),
            ..MovieForm::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("genre"), Some("is required"));
    }
}
