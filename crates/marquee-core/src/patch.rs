// ── JSON-Patch diffing ──
//
// Turns "snapshot as loaded" + "values as edited" into the minimal list of
// `add` / `remove` operations the backend accepts. Fields are visited in
// the order the caller names them, which is the order operations appear.

use marquee_api::{Actor, Movie, NewActor, NewMovie, PatchOperation};
use serde_json::Value;

use crate::error::CoreError;

/// Accumulates patch operations one field at a time.
#[derive(Debug, Default)]
pub struct PatchBuilder {
    ops: Vec<PatchOperation>,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field that always has a value. Never removed; `add`ed when changed.
    pub fn required(
        mut self,
        field: &str,
        original: impl Into<Value>,
        current: impl Into<Value>,
    ) -> Self {
        let current = current.into();
        if original.into() != current {
            self.ops.push(PatchOperation::add(field, current));
        }
        self
    }

    /// A free-text field that may be absent.
    ///
    /// `current` is raw input: it is trimmed, and empty means "absent".
    /// An original empty string also counts as absent.
    pub fn optional_text(mut self, field: &str, original: Option<&str>, current: &str) -> Self {
        let original = original.map(str::trim).filter(|s| !s.is_empty());
        let current = current.trim();

        match (original, current.is_empty()) {
            (Some(_), true) => self.ops.push(PatchOperation::remove(field)),
            (original, false) if original != Some(current) => {
                self.ops.push(PatchOperation::add(field, current));
            }
            _ => {}
        }
        self
    }

    /// A typed field that may be absent (e.g. an enum picked from a list).
    pub fn optional<V: Into<Value>>(
        mut self,
        field: &str,
        original: Option<V>,
        current: Option<V>,
    ) -> Self {
        let original = original.map(Into::into);
        match (original, current.map(Into::into)) {
            (Some(_), None) => self.ops.push(PatchOperation::remove(field)),
            (original, Some(current)) if original.as_ref() != Some(&current) => {
                self.ops.push(PatchOperation::add(field, current));
            }
            _ => {}
        }
        self
    }

    pub fn build(self) -> Vec<PatchOperation> {
        self.ops
    }
}

// ── Entity diffs ─────────────────────────────────────────────────────

/// Operations that turn `original` into `edited`.
///
/// Order: name, gender, photoUrl, age.
pub fn diff_actor(original: &Actor, edited: &NewActor) -> Vec<PatchOperation> {
    PatchBuilder::new()
        .required("name", original.name.trim(), edited.name.trim())
        .optional("gender", original.gender, edited.gender)
        .optional_text(
            "photoUrl",
            original.photo_url.as_deref(),
            edited.photo_url.as_deref().unwrap_or_default(),
        )
        .required("age", original.age, edited.age)
        .build()
}

/// Operations that turn `original` into `edited`.
///
/// Order: title, genre, posterUrl, releaseDate.
pub fn diff_movie(original: &Movie, edited: &NewMovie) -> Vec<PatchOperation> {
    PatchBuilder::new()
        .required("title", original.title.trim(), edited.title.trim())
        .required("genre", original.genre, edited.genre)
        .optional_text(
            "posterUrl",
            original.poster_url.as_deref(),
            edited.poster_url.as_deref().unwrap_or_default(),
        )
        .optional_text(
            "releaseDate",
            original.release_date.as_deref(),
            edited.release_date.as_deref().unwrap_or_default(),
        )
        .build()
}

// ── Application ──────────────────────────────────────────────────────

/// Apply `ops` to `document` in place (RFC 6902 semantics).
///
/// Used for `--dry-run` previews and to check that a diff reproduces the
/// edited values. On error the document is left unchanged.
pub fn apply_patch(document: &mut Value, ops: &[PatchOperation]) -> Result<(), CoreError> {
    let encoded = serde_json::to_value(ops).map_err(|e| CoreError::Patch {
        message: e.to_string(),
    })?;
    let patch: json_patch::Patch = serde_json::from_value(encoded).map_err(|e| CoreError::Patch {
        message: e.to_string(),
    })?;
    json_patch::patch(document, &patch).map_err(|e| CoreError::Patch {
        message: e.to_string(),
    })
}
