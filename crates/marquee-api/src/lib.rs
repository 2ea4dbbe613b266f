// marquee-api: Async Rust client for the movie/actor/cast REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::{Credentials, Permissions};
pub use client::{ApiClient, JSON_PATCH_CONTENT_TYPE};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    Actor, ActorEnvelope, ActorPage, ActorSummary, CastCreated, Created, Gender, Genre, Movie,
    MovieEnvelope, MoviePage, MovieSummary, NewActor, NewCast, NewMovie, PatchOp, PatchOperation,
    Reply, Status,
};
