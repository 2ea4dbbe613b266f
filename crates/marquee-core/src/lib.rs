//! Data layer between `marquee-api` and front ends.
//!
//! - **[`ResourceLoader`]**: fetches one remote document for the lifetime of
//!   a view, publishes `data` / `error` / `is_loading` through a `watch`
//!   channel, and never has more than one request outstanding.
//!
//! - **[`PatchBuilder`]**: diffs a loaded snapshot against edited values
//!   into JSON-Patch `add` / `remove` operations.
//!
//! - **[`Catalog`]**: facade that vends list, detail and edit views and
//!   routes typed [`Command`]s. [`Catalog::submit`] folds every outcome
//!   into a [`Notification`] and an optional [`Route`].
//!
//! - **Forms** ([`ActorForm`], [`MovieForm`]): raw input, validated into
//!   request bodies before anything is sent.

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod form;
pub mod loader;
pub mod notify;
pub mod patch;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Catalog, Submission};
pub use command::{Command, CommandResult, Route};
pub use config::{ClientConfig, DEFAULT_BASE_URL, TlsVerification};
pub use error::{CoreError, RETRY_MESSAGE};
pub use form::{ActorForm, FieldError, FieldErrors, MovieForm};
pub use loader::{Fetch, LoadError, RefreshOutcome, ResourceLoader, ResourceState};
pub use notify::{AUTO_HIDE, Notification, NotificationSlot, Severity};
pub use patch::{PatchBuilder, apply_patch, diff_actor, diff_movie};
pub use view::{DetailView, EditSession, ListQuery, ListView, PAGE_SIZE, page_max};

// Wire types consumers need alongside the views.
pub use marquee_api::{
    Actor, ActorEnvelope, ActorPage, ActorSummary, Credentials, Gender, Genre, Movie,
    MovieEnvelope, MoviePage, MovieSummary, NewActor, NewCast, NewMovie, PatchOp,
    PatchOperation, Permissions, Status,
};
