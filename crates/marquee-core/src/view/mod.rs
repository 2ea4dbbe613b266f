// ── Views ──
//
// A view owns one loader for the lifetime of a screen (or one CLI
// invocation) and knows which writes it can issue. The traits below let
// one implementation serve both movies and actors.

pub mod detail;
pub mod edit;
pub mod list;

pub use detail::DetailView;
pub use edit::EditSession;
pub use list::{ListQuery, ListView};

use marquee_api::{
    Actor, ActorEnvelope, ActorPage, Movie, MovieEnvelope, MoviePage, NewCast, PatchOperation,
};
use serde::de::DeserializeOwned;

use crate::command::{Command, Route};
use crate::form::{ActorForm, FieldErrors, MovieForm};

/// Rows per page on the list endpoints.
pub const PAGE_SIZE: u64 = 10;

/// Last page for `total` rows. Never less than 1.
pub fn page_max(total: u64) -> u32 {
    u32::try_from(total.div_ceil(PAGE_SIZE).max(1)).unwrap_or(u32::MAX)
}

// ── Lists ────────────────────────────────────────────────────────────

/// A paginated list envelope.
pub trait Listing: DeserializeOwned + Clone + Default + Send + Sync + 'static {
    type Item: Clone;

    /// Path segment of the collection (`movies`, `actors`).
    const RESOURCE: &'static str;

    fn items(&self) -> &[Self::Item];
    fn total(&self) -> u64;
    fn delete_command(id: i64) -> Command;
}

impl Listing for MoviePage {
    type Item = Movie;
    const RESOURCE: &'static str = "movies";

    fn items(&self) -> &[Movie] {
        &self.movies
    }

    fn total(&self) -> u64 {
        self.total_movies
    }

    fn delete_command(id: i64) -> Command {
        Command::DeleteMovie { id }
    }
}

impl Listing for ActorPage {
    type Item = Actor;
    const RESOURCE: &'static str = "actors";

    fn items(&self) -> &[Actor] {
        &self.actors
    }

    fn total(&self) -> u64 {
        self.total_actors
    }

    fn delete_command(id: i64) -> Command {
        Command::DeleteActor { id }
    }
}

// ── Details ──────────────────────────────────────────────────────────

/// A single-entity envelope.
pub trait Detail: DeserializeOwned + Clone + Default + Send + Sync + 'static {
    type Entity: Clone;

    const RESOURCE: &'static str;
    /// Where to go after the entity is deleted.
    const LIST_ROUTE: Route;

    fn entity(&self) -> Option<&Self::Entity>;
    fn delete_command(id: i64) -> Command;

    /// The cast link between entity `id` and `other_id` on the other side.
    fn cast(id: i64, other_id: i64) -> NewCast;
}

impl Detail for MovieEnvelope {
    type Entity = Movie;
    const RESOURCE: &'static str = "movies";
    const LIST_ROUTE: Route = Route::Movies;

    fn entity(&self) -> Option<&Movie> {
        self.movie.as_ref()
    }

    fn delete_command(id: i64) -> Command {
        Command::DeleteMovie { id }
    }

    fn cast(id: i64, other_id: i64) -> NewCast {
        NewCast {
            movie_id: id,
            actor_id: other_id,
        }
    }
}

impl Detail for ActorEnvelope {
    type Entity = Actor;
    const RESOURCE: &'static str = "actors";
    const LIST_ROUTE: Route = Route::Actors;

    fn entity(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    fn delete_command(id: i64) -> Command {
        Command::DeleteActor { id }
    }

    fn cast(id: i64, other_id: i64) -> NewCast {
        NewCast {
            movie_id: other_id,
            actor_id: id,
        }
    }
}

// ── Editing ──────────────────────────────────────────────────────────

/// A detail envelope whose entity can be edited through a form.
pub trait Editable: Detail {
    type Form: Clone;

    fn form(entity: &Self::Entity) -> Self::Form;
    fn diff(entity: &Self::Entity, form: &Self::Form) -> Result<Vec<PatchOperation>, FieldErrors>;
    fn patch_command(id: i64, ops: Vec<PatchOperation>) -> Command;
}

impl Editable for MovieEnvelope {
    type Form = MovieForm;

    fn form(movie: &Movie) -> MovieForm {
        MovieForm::from_snapshot(movie)
    }

    fn diff(movie: &Movie, form: &MovieForm) -> Result<Vec<PatchOperation>, FieldErrors> {
        form.diff(movie)
    }

    fn patch_command(id: i64, ops: Vec<PatchOperation>) -> Command {
        Command::PatchMovie { id, ops }
    }
}

impl Editable for ActorEnvelope {
    type Form = ActorForm;

    fn form(actor: &Actor) -> ActorForm {
        ActorForm::from_snapshot(actor)
    }

    fn diff(actor: &Actor, form: &ActorForm) -> Result<Vec<PatchOperation>, FieldErrors> {
        form.diff(actor)
    }

    fn patch_command(id: i64, ops: Vec<PatchOperation>) -> Command {
        Command::PatchActor { id, ops }
    }
}
