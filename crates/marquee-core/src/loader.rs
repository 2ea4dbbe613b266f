// ── Resource loader ──
//
// Fetches one remote document and holds it for the lifetime of a view.
// State is published through a `watch` channel so renderers can observe
// `data`, `error` and `is_loading` without polling.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use marquee_api::ApiClient;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::RETRY_MESSAGE;

// ── Fetch seam ───────────────────────────────────────────────────────

/// Something that can GET a URL and return the JSON body.
///
/// Implemented by [`ApiClient`]; tests substitute scripted fetchers.
pub trait Fetch: Send + Sync + 'static {
    fn fetch_json(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<serde_json::Value, marquee_api::Error>> + Send;
}

impl Fetch for ApiClient {
    fn fetch_json(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<serde_json::Value, marquee_api::Error>> + Send {
        self.get_json(url.clone())
    }
}

// ── State ────────────────────────────────────────────────────────────

/// Why the last fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// `"{status}: {reason}"`, or the generic retry message.
    pub message: String,
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl From<&marquee_api::Error> for LoadError {
    fn from(err: &marquee_api::Error) -> Self {
        match err {
            marquee_api::Error::Http { status, reason, .. } => Self {
                status: Some(*status),
                message: format!("{status}: {reason}"),
            },
            _ => Self {
                status: None,
                message: RETRY_MESSAGE.into(),
            },
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Snapshot of a loader, as seen by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: T,
    pub error: Option<LoadError>,
    pub is_loading: bool,
}

/// What a call to [`ResourceLoader::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fetch ran and its result was applied.
    Completed,
    /// Another fetch was already outstanding; nothing was sent.
    Skipped,
}

// ── Loader ───────────────────────────────────────────────────────────

/// Holds one remote resource of type `T`.
///
/// Cheaply cloneable; clones share the same state and latch. At most one
/// request is outstanding per loader: a `refresh()` that arrives while a
/// fetch is running returns [`RefreshOutcome::Skipped`] without touching
/// the network.
pub struct ResourceLoader<T, F = ApiClient> {
    inner: Arc<LoaderInner<T, F>>,
}

impl<T, F> Clone for ResourceLoader<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct LoaderInner<T, F> {
    fetcher: F,
    url: Mutex<Url>,
    /// Bumped on every URL change. A response fetched under an older
    /// generation is discarded.
    generation: AtomicU64,
    /// Re-entrancy latch. Independent of the published `is_loading`.
    in_flight: AtomicBool,
    state: watch::Sender<ResourceState<T>>,
}

impl<T, F> ResourceLoader<T, F>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    F: Fetch,
{
    /// Create a loader without fetching.
    pub fn new(fetcher: F, url: Url, initial: T) -> Self {
        let (state, _) = watch::channel(ResourceState {
            data: initial,
            error: None,
            is_loading: false,
        });
        Self {
            inner: Arc::new(LoaderInner {
                fetcher,
                url: Mutex::new(url),
                generation: AtomicU64::new(0),
                in_flight: AtomicBool::new(false),
                state,
            }),
        }
    }

    /// Create a loader and await its first fetch.
    pub async fn load(fetcher: F, url: Url, initial: T) -> Self {
        let loader = Self::new(fetcher, url, initial);
        loader.refresh().await;
        loader
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn data(&self) -> T {
        self.inner.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<LoadError> {
        self.inner.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// Read the current data without cloning it.
    pub fn with_data<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.state.borrow().data)
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    pub fn url(&self) -> Url {
        self.inner.current_url()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Point the loader at a new URL and fetch it.
    ///
    /// Setting the URL it already has does nothing and reports `Skipped`.
    pub async fn set_url(&self, url: Url) -> RefreshOutcome {
        {
            let mut current = self.inner.url.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == url {
                return RefreshOutcome::Skipped;
            }
            *current = url;
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
        }
        self.refresh().await
    }

    /// Re-fetch the current URL.
    ///
    /// Clears `error` and raises `is_loading` before the request goes out.
    /// On success `data` is replaced and `error` stays `None`; on failure
    /// `data` is kept and `error` describes what went wrong.
    pub async fn refresh(&self) -> RefreshOutcome {
        let inner = &*self.inner;
        if !inner.try_acquire() {
            trace!("refresh skipped: request outstanding");
            return RefreshOutcome::Skipped;
        }

        loop {
            let applied = {
                let _guard = InFlightGuard { inner };
                inner.state.send_modify(|s| {
                    s.error = None;
                    s.is_loading = true;
                });
                inner.fetch_current().await
            };

            // A URL change that raced the latch release was skipped by its
            // own refresh; pick it up here.
            if inner.generation.load(Ordering::SeqCst) == applied || !inner.try_acquire() {
                return RefreshOutcome::Completed;
            }
        }
    }
}

impl<T, F> LoaderInner<T, F>
where
    T: DeserializeOwned + Send + Sync + 'static,
    F: Fetch,
{
    fn current_url(&self) -> Url {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn try_acquire(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Fetch until a response for the current generation arrives, apply
    /// it, and return that generation.
    async fn fetch_current(&self) -> u64 {
        loop {
            let generation = self.generation.load(Ordering::SeqCst);
            let url = self.current_url();
            debug!(%url, "loading resource");

            let result = self.fetcher.fetch_json(&url).await;
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(%url, "discarding response for superseded url");
                continue;
            }

            self.apply(&url, result);
            return generation;
        }
    }

    fn apply(&self, url: &Url, result: Result<serde_json::Value, marquee_api::Error>) {
        let decoded = result.and_then(|value| {
            serde_json::from_value::<T>(value).map_err(|e| marquee_api::Error::Deserialization {
                message: e.to_string(),
                body: String::new(),
            })
        });

        match decoded {
            Ok(data) => self.state.send_modify(|s| {
                s.data = data;
                s.error = None;
                s.is_loading = false;
            }),
            Err(err) => {
                warn!(%url, error = %err, "failed to load resource");
                let error = LoadError::from(&err);
                self.state.send_modify(|s| {
                    s.error = Some(error);
                    s.is_loading = false;
                });
            }
        }
    }
}

/// Releases the latch and drops `is_loading` even if the fetch future is
/// cancelled mid-flight.
struct InFlightGuard<'a, T, F> {
    inner: &'a LoaderInner<T, F>,
}

impl<T, F> Drop for InFlightGuard<'_, T, F> {
    fn drop(&mut self) {
        self.inner
            .state
            .send_if_modified(|s| std::mem::replace(&mut s.is_loading, false));
        self.inner.in_flight.store(false, Ordering::SeqCst);
    }
}
