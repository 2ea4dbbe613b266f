//! Actor command handlers.

use std::fmt::Write;

use tabled::Tabled;

use marquee_core::{
    Actor, ActorForm, Catalog, Command as CoreCommand, CoreError, ListQuery, MovieSummary, Route,
    apply_patch,
};

use crate::cli::{ActorsArgs, ActorsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ActorRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Movies")]
    movies: usize,
}

impl From<&Actor> for ActorRow {
    fn from(a: &Actor) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            age: a.age,
            gender: a.gender.map(|g| g.to_string()).unwrap_or_default(),
            movies: a.movies.len(),
        }
    }
}

#[derive(Tabled)]
struct FilmographyRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Genre")]
    genre: String,
    #[tabled(rename = "Released")]
    release_date: String,
}

impl From<&MovieSummary> for FilmographyRow {
    fn from(m: &MovieSummary) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            genre: m.genre.to_string(),
            release_date: m.release_date.clone().unwrap_or_default(),
        }
    }
}

fn detail(a: &Actor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:      {}", a.id);
    let _ = writeln!(out, "Name:    {}", a.name);
    let _ = writeln!(out, "Age:     {}", a.age);
    let _ = writeln!(
        out,
        "Gender:  {}",
        a.gender.map_or_else(|| "-".to_owned(), |g| g.to_string())
    );
    let _ = writeln!(out, "Photo:   {}", a.photo_url.as_deref().unwrap_or("-"));
    if a.movies.is_empty() {
        let _ = write!(out, "Movies:  (none)");
    } else {
        let rows: Vec<FilmographyRow> = a.movies.iter().map(FilmographyRow::from).collect();
        let _ = writeln!(out, "Movies:");
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    catalog: &Catalog,
    args: ActorsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ActorsCommand::List(list) => {
            let query = ListQuery::new(list.page, list.search.unwrap_or_default());
            let mut view =
                util::with_spinner("Loading actors", global, catalog.actors(query)).await?;
            let actors = util::collect_pages(&mut view, list.all, "actor").await?;

            let out = output::render_list(
                &global.output,
                &actors,
                |a| ActorRow::from(a),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                eprintln!("{}", util::page_footer(&view));
            }
            Ok(())
        }

        ActorsCommand::Get { id } => {
            let view = util::with_spinner("Loading actor", global, catalog.actor(id)).await?;
            if let Some(err) = view.error() {
                return Err(CliError::from_load(err, "actor", Some(id)));
            }
            let actor = view.entity().ok_or(CliError::NotFound {
                resource_type: "actor".into(),
                id,
            })?;

            let out = output::render_single(&global.output, &actor, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ActorsCommand::Add {
            name,
            age,
            gender,
            photo_url,
        } => {
            let form = ActorForm {
                name,
                gender: gender.unwrap_or_default(),
                photo_url: photo_url.unwrap_or_default(),
                age,
            };
            let actor = form.validate().map_err(CoreError::Validation)?;

            let submission = util::with_spinner(
                "Creating actor",
                global,
                catalog.submit(CoreCommand::CreateActor(actor)),
            )
            .await;
            let created = submission.navigate.clone();
            util::report(submission, global)?;

            if let Some(Route::ActorDetail(id)) = created {
                output::print_output(&id.to_string(), global.quiet);
            }
            Ok(())
        }

        ActorsCommand::Edit {
            id,
            name,
            age,
            gender,
            photo_url,
            dry_run,
        } => {
            let session =
                util::with_spinner("Loading actor", global, catalog.edit_actor(id)).await?;
            if let Some(err) = session.view().error() {
                return Err(CliError::from_load(err, "actor", Some(id)));
            }
            let (Some(snapshot), Some(mut form)) = (session.snapshot(), session.form()) else {
                return Err(CliError::NotFound {
                    resource_type: "actor".into(),
                    id,
                });
            };

            util::overlay(&mut form.name, name);
            util::overlay(&mut form.age, age);
            util::overlay(&mut form.gender, gender);
            util::overlay(&mut form.photo_url, photo_url);

            if dry_run {
                let ops = session.preview(&form)?;
                let mut document = serde_json::to_value(&snapshot)?;
                apply_patch(&mut document, &ops)?;
                util::print_dry_run(&ops, &document, global);
                return Ok(());
            }

            let Some(submission) =
                util::with_spinner("Saving actor", global, session.submit(&form)).await
            else {
                return Ok(());
            };
            util::report(submission, global)?;

            if let Some(actor) = session.snapshot() {
                let out =
                    output::render_single(&global.output, &actor, detail, |a| a.id.to_string());
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        ActorsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete actor {id}? They are removed from every cast."),
                "actors delete",
                global.yes,
            )? {
                return Ok(());
            }
            let submission = util::with_spinner(
                "Deleting actor",
                global,
                catalog.submit(CoreCommand::DeleteActor { id }),
            )
            .await;
            util::report(submission, global)
        }
    }
}
