use super::Detail;
use crate::catalog::{Catalog, Submission};
use crate::command::{Command, Route};
use crate::error::CoreError;
use crate::loader::{LoadError, RefreshOutcome, ResourceLoader, ResourceState};

/// One movie or actor, with its cast.
pub struct DetailView<D> {
    catalog: Catalog,
    id: i64,
    loader: ResourceLoader<D>,
}

impl<D: Detail> DetailView<D> {
    pub(crate) async fn open(catalog: Catalog, id: i64) -> Result<Self, CoreError> {
        let url = catalog.client().url(&format!("{}/{id}", D::RESOURCE))?;
        let loader = ResourceLoader::load(catalog.client().clone(), url, D::default()).await;
        Ok(Self {
            catalog,
            id,
            loader,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn entity(&self) -> Option<D::Entity> {
        self.loader.with_data(|envelope| envelope.entity().cloned())
    }

    pub fn error(&self) -> Option<LoadError> {
        self.loader.error()
    }

    pub fn state(&self) -> ResourceState<D> {
        self.loader.state()
    }

    pub fn loader(&self) -> &ResourceLoader<D> {
        &self.loader
    }

    /// `Some(Route::NotFound)` once the backend has answered 404.
    pub fn route(&self) -> Option<Route> {
        self.loader
            .error()
            .filter(LoadError::is_not_found)
            .map(|_| Route::NotFound)
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.loader.refresh().await
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// DELETE this entity; on success navigate back to the list.
    pub async fn delete(&self) -> Submission {
        let submission = self.catalog.submit(D::delete_command(self.id)).await;
        if submission.is_success() {
            Submission {
                navigate: Some(D::LIST_ROUTE),
                ..submission
            }
        } else {
            submission
        }
    }

    /// Link `other_id` (an actor for a movie, a movie for an actor).
    pub async fn assign_cast(&self, other_id: i64) -> Submission {
        self.write(Command::AssignCast(D::cast(self.id, other_id)))
            .await
    }

    pub async fn remove_cast(&self, other_id: i64) -> Submission {
        let cast = D::cast(self.id, other_id);
        self.write(Command::RemoveCast {
            movie_id: cast.movie_id,
            actor_id: cast.actor_id,
        })
        .await
    }

    async fn write(&self, command: Command) -> Submission {
        let submission = self.catalog.submit(command).await;
        if submission.is_success() {
            self.loader.refresh().await;
        }
        submission
    }
}
