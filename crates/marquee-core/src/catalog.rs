// ── Catalog facade ──
//
// Entry point for consumers. Owns the configured API client, vends views
// (which own their loaders) and routes write commands.

use std::sync::Arc;

use marquee_api::{
    ActorEnvelope, ActorPage, ApiClient, Credentials, MovieEnvelope, MoviePage, Permissions,
    Status,
};
use tracing::{debug, warn};

use crate::command::{Command, CommandResult, Route};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::notify::Notification;
use crate::view::{DetailView, EditSession, ListQuery, ListView};

// ── Submission ───────────────────────────────────────────────────────

/// Outcome of a write as a view presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Response status, when the backend answered.
    pub status: Option<Status>,
    pub notification: Notification,
    /// Where to go next, if anywhere.
    pub navigate: Option<Route>,
}

impl Submission {
    pub fn is_success(&self) -> bool {
        self.status.as_ref().is_some_and(Status::is_success)
    }

    pub(crate) fn failed(err: &CoreError) -> Self {
        let status = match err {
            CoreError::Http { status, reason } => Some(Status::new(*status, reason.clone())),
            _ => None,
        };
        Self {
            status,
            notification: Notification::from_error(err),
            navigate: None,
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────

/// Cheaply cloneable handle to one backend.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    config: ClientConfig,
    client: ApiClient,
}

impl Catalog {
    /// Build the HTTP client for `config`. Does not touch the network.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(
            config.base_url.as_str(),
            &config.credentials,
            &config.transport(),
        )?;
        Ok(Self {
            inner: Arc::new(CatalogInner { config, client }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Permissions carried by the configured token. Anonymous has none.
    pub fn permissions(&self) -> Result<Permissions, CoreError> {
        match &self.inner.config.credentials {
            Credentials::Anonymous => Ok(Permissions::default()),
            Credentials::Bearer { token } => Ok(Permissions::from_token(token)?),
        }
    }

    // ── Views ────────────────────────────────────────────────────────

    pub async fn movies(&self, query: ListQuery) -> Result<ListView<MoviePage>, CoreError> {
        ListView::open(self.clone(), query).await
    }

    pub async fn actors(&self, query: ListQuery) -> Result<ListView<ActorPage>, CoreError> {
        ListView::open(self.clone(), query).await
    }

    pub async fn movie(&self, id: i64) -> Result<DetailView<MovieEnvelope>, CoreError> {
        DetailView::open(self.clone(), id).await
    }

    pub async fn actor(&self, id: i64) -> Result<DetailView<ActorEnvelope>, CoreError> {
        DetailView::open(self.clone(), id).await
    }

    pub async fn edit_movie(&self, id: i64) -> Result<EditSession<MovieEnvelope>, CoreError> {
        EditSession::open(self.clone(), id).await
    }

    pub async fn edit_actor(&self, id: i64) -> Result<EditSession<ActorEnvelope>, CoreError> {
        EditSession::open(self.clone(), id).await
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Run one write against the backend.
    ///
    /// Any status >= 400 comes back as `CoreError::Http`.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        debug!(command = %command.describe(), "executing command");
        route_command(&self.inner.client, command).await
    }

    /// Run one write and fold the outcome into a notification.
    ///
    /// Never fails. A successful create navigates to the new entity.
    pub async fn submit(&self, command: Command) -> Submission {
        let detail_route: Option<fn(i64) -> Route> = match &command {
            Command::CreateMovie(_) => Some(Route::MovieDetail),
            Command::CreateActor(_) => Some(Route::ActorDetail),
            _ => None,
        };
        let description = command.describe();

        match self.execute(command).await {
            Ok(result) => {
                let navigate = match (&result, detail_route) {
                    (CommandResult::Created { id, .. }, Some(route)) => Some(route(*id)),
                    _ => None,
                };
                Submission {
                    notification: Notification::from_status(result.status()),
                    status: Some(result.status().clone()),
                    navigate,
                }
            }
            Err(err) => {
                warn!(command = %description, error = %err, "command failed");
                Submission::failed(&err)
            }
        }
    }
}

async fn route_command(client: &ApiClient, command: Command) -> Result<CommandResult, CoreError> {
    match command {
        // ── Movies ───────────────────────────────────────────────

        Command::CreateMovie(movie) => {
            let reply = client.create_movie(&movie).await?;
            Ok(CommandResult::Created {
                status: reply.status,
                id: reply.body.id,
            })
        }

        Command::PatchMovie { id, ops } => Ok(CommandResult::Done {
            status: client.update_movie(id, &ops).await?,
        }),

        Command::DeleteMovie { id } => Ok(CommandResult::Done {
            status: client.delete_movie(id).await?,
        }),

        // ── Actors ───────────────────────────────────────────────

        Command::CreateActor(actor) => {
            let reply = client.create_actor(&actor).await?;
            Ok(CommandResult::Created {
                status: reply.status,
                id: reply.body.id,
            })
        }

        Command::PatchActor { id, ops } => Ok(CommandResult::Done {
            status: client.update_actor(id, &ops).await?,
        }),

        Command::DeleteActor { id } => Ok(CommandResult::Done {
            status: client.delete_actor(id).await?,
        }),

        // ── Casts ────────────────────────────────────────────────

        Command::AssignCast(cast) => {
            let reply = client.create_cast(&cast).await?;
            Ok(CommandResult::CastCreated {
                status: reply.status,
                id: reply.body.id,
            })
        }

        Command::RemoveCast { movie_id, actor_id } => Ok(CommandResult::Done {
            status: client.delete_cast(movie_id, actor_id).await?,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn http_failure_keeps_status_line() {
        let submission = Submission::failed(&CoreError::Http {
            status: 409,
            reason: "Conflict".into(),
        });
        assert_eq!(submission.status, Some(Status::new(409, "Conflict")));
        assert_eq!(submission.notification.message, "409: Conflict");
        assert!(!submission.is_success());
    }

    #[test]
    fn transport_failure_has_no_status() {
        let submission = Submission::failed(&CoreError::Timeout);
        assert_eq!(submission.status, None);
        assert_eq!(
            submission.notification.message,
            crate::error::RETRY_MESSAGE
        );
    }

    #[test]
    fn anonymous_has_no_permissions() {
        let catalog = Catalog::new(ClientConfig::new(
            url::Url::parse(crate::DEFAULT_BASE_URL).unwrap(),
        ))
        .unwrap();
        assert!(catalog.permissions().unwrap().permissions.is_empty());
    }
}
