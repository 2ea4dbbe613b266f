//! Movie command handlers.

use std::fmt::Write;

use tabled::Tabled;

use marquee_core::{
    ActorSummary, Catalog, Command as CoreCommand, CoreError, ListQuery, Movie, MovieForm, Route,
    apply_patch,
};

use crate::cli::{GlobalOpts, MoviesArgs, MoviesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct MovieRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Genre")]
    genre: String,
    #[tabled(rename = "Released")]
    release_date: String,
    #[tabled(rename = "Cast")]
    cast: usize,
}

impl From<&Movie> for MovieRow {
    fn from(m: &Movie) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            genre: m.genre.to_string(),
            release_date: m.release_date.clone().unwrap_or_default(),
            cast: m.actors.len(),
        }
    }
}

#[derive(Tabled)]
struct CastRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Gender")]
    gender: String,
}

impl From<&ActorSummary> for CastRow {
    fn from(a: &ActorSummary) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            age: a.age,
            gender: a.gender.map(|g| g.to_string()).unwrap_or_default(),
        }
    }
}

/// Key/value block followed by the cast table.
fn detail(m: &Movie) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:        {}", m.id);
    let _ = writeln!(out, "Title:     {}", m.title);
    let _ = writeln!(out, "Genre:     {}", m.genre);
    let _ = writeln!(
        out,
        "Released:  {}",
        m.release_date.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Poster:    {}", m.poster_url.as_deref().unwrap_or("-"));
    if m.actors.is_empty() {
        let _ = write!(out, "Cast:      (none)");
    } else {
        let rows: Vec<CastRow> = m.actors.iter().map(CastRow::from).collect();
        let _ = writeln!(out, "Cast:");
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    catalog: &Catalog,
    args: MoviesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MoviesCommand::List(list) => {
            let query = ListQuery::new(list.page, list.search.unwrap_or_default());
            let mut view =
                util::with_spinner("Loading movies", global, catalog.movies(query)).await?;
            let movies = util::collect_pages(&mut view, list.all, "movie").await?;

            let out = output::render_list(
                &global.output,
                &movies,
                |m| MovieRow::from(m),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                eprintln!("{}", util::page_footer(&view));
            }
            Ok(())
        }

        MoviesCommand::Get { id } => {
            let view = util::with_spinner("Loading movie", global, catalog.movie(id)).await?;
            if let Some(err) = view.error() {
                return Err(CliError::from_load(err, "movie", Some(id)));
            }
            let movie = view.entity().ok_or(CliError::NotFound {
                resource_type: "movie".into(),
                id,
            })?;

            let out = output::render_single(&global.output, &movie, detail, |m| {
                m.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MoviesCommand::Add {
            title,
            genre,
            poster_url,
            release_date,
        } => {
            let form = MovieForm {
                title,
                genre,
                poster_url: poster_url.unwrap_or_default(),
                release_date: release_date.unwrap_or_default(),
            };
            let movie = form.validate().map_err(CoreError::Validation)?;

            let submission = util::with_spinner(
                "Creating movie",
                global,
                catalog.submit(CoreCommand::CreateMovie(movie)),
            )
            .await;
            let created = submission.navigate.clone();
            util::report(submission, global)?;

            if let Some(Route::MovieDetail(id)) = created {
                output::print_output(&id.to_string(), global.quiet);
            }
            Ok(())
        }

        MoviesCommand::Edit {
            id,
            title,
            genre,
            poster_url,
            release_date,
            dry_run,
        } => {
            let session =
                util::with_spinner("Loading movie", global, catalog.edit_movie(id)).await?;
            if let Some(err) = session.view().error() {
                return Err(CliError::from_load(err, "movie", Some(id)));
            }
            let (Some(snapshot), Some(mut form)) = (session.snapshot(), session.form()) else {
                return Err(CliError::NotFound {
                    resource_type: "movie".into(),
                    id,
                });
            };

            util::overlay(&mut form.title, title);
            util::overlay(&mut form.genre, genre);
            util::overlay(&mut form.poster_url, poster_url);
            util::overlay(&mut form.release_date, release_date);

            if dry_run {
                let ops = session.preview(&form)?;
                let mut document = serde_json::to_value(&snapshot)?;
                apply_patch(&mut document, &ops)?;
                util::print_dry_run(&ops, &document, global);
                return Ok(());
            }

            let Some(submission) =
                util::with_spinner("Saving movie", global, session.submit(&form)).await
            else {
                return Ok(());
            };
            util::report(submission, global)?;

            if let Some(movie) = session.snapshot() {
                let out = output::render_single(&global.output, &movie, detail, |m| {
                    m.id.to_string()
                });
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        MoviesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete movie {id}? Its cast links go with it."),
                "movies delete",
                global.yes,
            )? {
                return Ok(());
            }
            let submission = util::with_spinner(
                "Deleting movie",
                global,
                catalog.submit(CoreCommand::DeleteMovie { id }),
            )
            .await;
            util::report(submission, global)
        }
    }
}
