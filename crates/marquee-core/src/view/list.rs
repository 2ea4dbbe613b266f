use tracing::debug;

use super::{Listing, page_max};
use crate::catalog::{Catalog, Submission};
use crate::error::CoreError;
use crate::loader::{RefreshOutcome, ResourceLoader, ResourceState};

/// Page and search term of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based.
    pub page: u32,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search: search.into().trim().to_owned(),
        }
    }
}

/// A paginated, searchable list of movies or actors.
pub struct ListView<P> {
    catalog: Catalog,
    loader: ResourceLoader<P>,
    query: ListQuery,
}

impl<P: Listing> ListView<P> {
    pub(crate) async fn open(catalog: Catalog, query: ListQuery) -> Result<Self, CoreError> {
        let query = ListQuery::new(query.page, query.search);
        let url = catalog
            .client()
            .list_url(P::RESOURCE, query.page, &query.search)?;
        let loader = ResourceLoader::load(catalog.client().clone(), url, P::default()).await;
        Ok(Self {
            catalog,
            loader,
            query,
        })
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn page_max(&self) -> u32 {
        page_max(self.loader.with_data(Listing::total))
    }

    pub fn total(&self) -> u64 {
        self.loader.with_data(Listing::total)
    }

    pub fn items(&self) -> Vec<P::Item> {
        self.loader.with_data(|page| page.items().to_vec())
    }

    pub fn state(&self) -> ResourceState<P> {
        self.loader.state()
    }

    pub fn loader(&self) -> &ResourceLoader<P> {
        &self.loader
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub async fn refresh(&self) -> RefreshOutcome {
        self.loader.refresh().await
    }

    /// Jump to `page`, clamped to `1..=page_max`.
    pub async fn go_to(&mut self, page: u32) -> Result<RefreshOutcome, CoreError> {
        let page = page.clamp(1, self.page_max());
        if page == self.query.page {
            return Ok(RefreshOutcome::Skipped);
        }
        self.query.page = page;
        self.reload().await
    }

    pub async fn next_page(&mut self) -> Result<RefreshOutcome, CoreError> {
        self.go_to(self.query.page.saturating_add(1)).await
    }

    pub async fn prev_page(&mut self) -> Result<RefreshOutcome, CoreError> {
        self.go_to(self.query.page.saturating_sub(1)).await
    }

    /// Search from the first page.
    pub async fn search(&mut self, term: &str) -> Result<RefreshOutcome, CoreError> {
        self.query = ListQuery::new(1, term);
        self.reload().await
    }

    async fn reload(&self) -> Result<RefreshOutcome, CoreError> {
        let url = self
            .catalog
            .client()
            .list_url(P::RESOURCE, self.query.page, &self.query.search)?;
        debug!(resource = P::RESOURCE, page = self.query.page, "list query changed");
        Ok(self.loader.set_url(url).await)
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// DELETE one row, then reload the current page once on success.
    pub async fn delete(&self, id: i64) -> Submission {
        let submission = self.catalog.submit(P::delete_command(id)).await;
        if submission.is_success() {
            self.loader.refresh().await;
        }
        submission
    }
}
