// ── Command API ──
//
// All write operations flow through one `Command` enum. `Catalog::execute`
// routes each variant to its endpoint; `Catalog::submit` wraps the result
// in a notification and a navigation target.

use marquee_api::{NewActor, NewCast, NewMovie, PatchOperation, Status};

/// All possible writes against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ── Movies ───────────────────────────────────────────────────────
    CreateMovie(NewMovie),
    PatchMovie {
        id: i64,
        ops: Vec<PatchOperation>,
    },
    DeleteMovie {
        id: i64,
    },

    // ── Actors ───────────────────────────────────────────────────────
    CreateActor(NewActor),
    PatchActor {
        id: i64,
        ops: Vec<PatchOperation>,
    },
    DeleteActor {
        id: i64,
    },

    // ── Casts ────────────────────────────────────────────────────────
    AssignCast(NewCast),
    RemoveCast {
        movie_id: i64,
        actor_id: i64,
    },
}

impl Command {
    /// Short verb phrase for logs and spinners.
    pub fn describe(&self) -> String {
        match self {
            Self::CreateMovie(movie) => format!("create movie '{}'", movie.title),
            Self::PatchMovie { id, ops } => format!("patch movie {id} ({} ops)", ops.len()),
            Self::DeleteMovie { id } => format!("delete movie {id}"),
            Self::CreateActor(actor) => format!("create actor '{}'", actor.name),
            Self::PatchActor { id, ops } => format!("patch actor {id} ({} ops)", ops.len()),
            Self::DeleteActor { id } => format!("delete actor {id}"),
            Self::AssignCast(cast) => {
                format!("assign actor {} to movie {}", cast.actor_id, cast.movie_id)
            }
            Self::RemoveCast { movie_id, actor_id } => {
                format!("remove actor {actor_id} from movie {movie_id}")
            }
        }
    }
}

/// What a successful command returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// A movie or actor was created with this id.
    Created { status: Status, id: i64 },
    /// A cast link was created (`movie-{m}-actor-{a}`).
    CastCreated { status: Status, id: String },
    /// Patch or delete; only the status line matters.
    Done { status: Status },
}

impl CommandResult {
    pub fn status(&self) -> &Status {
        match self {
            Self::Created { status, .. }
            | Self::CastCreated { status, .. }
            | Self::Done { status } => status,
        }
    }
}

/// Where a view should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Movies,
    Actors,
    MovieDetail(i64),
    ActorDetail(i64),
    NotFound,
}
