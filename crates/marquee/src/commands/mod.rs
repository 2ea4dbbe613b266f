//! Command dispatch: bridges CLI args -> core views and commands -> output.

pub mod actors;
pub mod casts;
pub mod config_cmd;
pub mod movies;
pub mod permissions;
pub mod util;

use marquee_core::Catalog;

use crate::cli::{ActorsArgs, CastArgs, GlobalOpts, MoviesArgs};
use crate::error::CliError;

/// Commands that talk to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    Movies(MoviesArgs),
    Actors(ActorsArgs),
    Cast(CastArgs),
    Permissions,
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: BackendCommand,
    catalog: &Catalog,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        BackendCommand::Movies(args) => movies::handle(catalog, args, global).await,
        BackendCommand::Actors(args) => actors::handle(catalog, args, global).await,
        BackendCommand::Cast(args) => casts::handle(catalog, args, global).await,
        BackendCommand::Permissions => permissions::handle(catalog, global),
    }
}
