//! Cast command handlers.
//!
//! Both writes go through the movie's detail view, which reloads the
//! movie afterwards so the printed cast is what the backend now holds.

use tabled::Tabled;

use marquee_core::{ActorSummary, Catalog};

use crate::cli::{CastArgs, CastCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Actor ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
}

impl From<&ActorSummary> for MemberRow {
    fn from(a: &ActorSummary) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            age: a.age,
        }
    }
}

pub async fn handle(catalog: &Catalog, args: CastArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (movie_id, actor_id, assign) = match args.command {
        CastCommand::Assign { movie, actor } => (movie, actor, true),
        CastCommand::Remove { movie, actor } => (movie, actor, false),
    };

    let view = util::with_spinner("Loading movie", global, catalog.movie(movie_id)).await?;
    if let Some(err) = view.error() {
        return Err(CliError::from_load(err, "movie", Some(movie_id)));
    }

    let submission = if assign {
        util::with_spinner("Assigning actor", global, view.assign_cast(actor_id)).await
    } else {
        if !util::confirm(
            &format!("Remove actor {actor_id} from movie {movie_id}?"),
            "cast remove",
            global.yes,
        )? {
            return Ok(());
        }
        util::with_spinner("Removing actor", global, view.remove_cast(actor_id)).await
    };
    util::report(submission, global)?;

    let cast = view.entity().map(|movie| movie.actors).unwrap_or_default();
    let out = output::render_list(
        &global.output,
        &cast,
        |a| MemberRow::from(a),
        |a| a.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
