use std::sync::atomic::{AtomicBool, Ordering};

use marquee_api::PatchOperation;
use tracing::debug;

use super::{DetailView, Editable};
use crate::catalog::{Catalog, Submission};
use crate::command::Route;
use crate::error::CoreError;

/// Edit form state for one movie or actor.
///
/// The loaded entity is the diff baseline. After a successful PATCH the
/// baseline is reloaded so the next diff starts from the saved values.
pub struct EditSession<D> {
    view: DetailView<D>,
    submitting: AtomicBool,
}

impl<D: Editable> EditSession<D> {
    pub(crate) async fn open(catalog: Catalog, id: i64) -> Result<Self, CoreError> {
        Ok(Self {
            view: DetailView::open(catalog, id).await?,
            submitting: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> i64 {
        self.view.id()
    }

    pub fn snapshot(&self) -> Option<D::Entity> {
        self.view.entity()
    }

    /// A form prefilled from the snapshot.
    pub fn form(&self) -> Option<D::Form> {
        self.snapshot().map(|entity| D::form(&entity))
    }

    pub fn route(&self) -> Option<Route> {
        self.view.route()
    }

    pub fn view(&self) -> &DetailView<D> {
        &self.view
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// The operations `submit` would send, without sending them.
    pub fn preview(&self, form: &D::Form) -> Result<Vec<PatchOperation>, CoreError> {
        let snapshot = self.snapshot().ok_or(CoreError::NotFound {
            entity_type: D::RESOURCE,
            id: self.id(),
        })?;
        D::diff(&snapshot, form).map_err(CoreError::Validation)
    }

    /// Validate, diff and PATCH.
    ///
    /// Returns `None` when another submit from this session is still
    /// outstanding; nothing is sent in that case.
    pub async fn submit(&self, form: &D::Form) -> Option<Submission> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(id = self.id(), "submit ignored: already submitting");
            return None;
        }
        let _guard = SubmitGuard(&self.submitting);

        let ops = match self.preview(form) {
            Ok(ops) => ops,
            Err(err) => return Some(Submission::failed(&err)),
        };

        let submission = self
            .view
            .catalog()
            .submit(D::patch_command(self.id(), ops))
            .await;
        if submission.is_success() {
            self.view.refresh().await;
        }
        Some(submission)
    }
}

struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

