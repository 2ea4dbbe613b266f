// Async HTTP client for the movie/actor/cast REST API.
//
// Base path: configurable (default http://127.0.0.1:5000/)
// Auth: Authorization: Bearer <token> (optional)

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    ActorEnvelope, ActorPage, CastCreated, Created, MovieEnvelope, MoviePage, NewActor, NewCast,
    NewMovie, PatchOperation, Reply, Status,
};

/// Content type the backend requires on PATCH requests.
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// Longest slice of an error body kept for diagnostics.
const ERROR_BODY_PREVIEW: usize = 200;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the REST backend.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally, so
/// every view can own a handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, credentials and transport config.
    ///
    /// Bearer credentials become a sensitive default header on every request.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = credentials.default_headers()?;
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Force a trailing slash so relative joins append instead of replace.
    ///
    /// `http://host/api` -> `http://host/api/`
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative path (e.g. `"actors/7"`) onto the base URL.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// `{base}{resource}?page={page}&search={search}`
    pub fn list_url(&self, resource: &str, page: u32, search: &str) -> Result<Url, Error> {
        let mut url = self.url(resource)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("search", search);
        Ok(url)
    }

    pub fn movies_url(&self, page: u32, search: &str) -> Result<Url, Error> {
        self.list_url("movies", page, search)
    }

    pub fn movie_url(&self, id: i64) -> Result<Url, Error> {
        self.url(&format!("movies/{id}"))
    }

    pub fn actors_url(&self, page: u32, search: &str) -> Result<Url, Error> {
        self.list_url("actors", page, search)
    }

    pub fn actor_url(&self, id: i64) -> Result<Url, Error> {
        self.url(&format!("actors/{id}"))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// GET an arbitrary URL and return the decoded JSON document.
    ///
    /// This is the primitive the resource loader builds on.
    pub async fn get_json(&self, url: Url) -> Result<serde_json::Value, Error> {
        self.get(url).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Ok(self.handle_response(resp).await?.body)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Reply<T>, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn patch(&self, url: Url, operations: &[PatchOperation]) -> Result<Status, Error> {
        debug!("PATCH {url} ops={}", operations.len());

        let body = serde_json::to_vec(operations).map_err(|e| Error::Deserialization {
            message: format!("failed to encode patch: {e}"),
            body: String::new(),
        })?;
        let resp = self
            .http
            .patch(url)
            .header(CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, url: Url) -> Result<Status, Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Reply<T>, Error> {
        let status = resp.status();
        if status.as_u16() >= 400 {
            return Err(self.http_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(status = status.as_u16(), bytes = body.len(), "response body received");
        let decoded = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Ok(Reply {
            status: status.into(),
            body: decoded,
        })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<Status, Error> {
        let status = resp.status();
        if status.as_u16() >= 400 {
            Err(self.http_error(status, resp).await)
        } else {
            Ok(status.into())
        }
    }

    async fn http_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let body: String = raw.chars().take(ERROR_BODY_PREVIEW).collect();
        debug!(status = status.as_u16(), "request rejected");

        Error::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Movies ───────────────────────────────────────────────────────

    pub async fn list_movies(&self, page: u32, search: &str) -> Result<MoviePage, Error> {
        self.get(self.movies_url(page, search)?).await
    }

    pub async fn get_movie(&self, id: i64) -> Result<MovieEnvelope, Error> {
        self.get(self.movie_url(id)?).await
    }

    pub async fn create_movie(&self, movie: &NewMovie) -> Result<Reply<Created>, Error> {
        self.post(self.url("movies")?, movie).await
    }

    /// Apply patch operations. The backend answers 204 when nothing changed.
    pub async fn update_movie(
        &self,
        id: i64,
        operations: &[PatchOperation],
    ) -> Result<Status, Error> {
        self.patch(self.movie_url(id)?, operations).await
    }

    pub async fn delete_movie(&self, id: i64) -> Result<Status, Error> {
        self.delete(self.movie_url(id)?).await
    }

    // ── Actors ───────────────────────────────────────────────────────

    pub async fn list_actors(&self, page: u32, search: &str) -> Result<ActorPage, Error> {
        self.get(self.actors_url(page, search)?).await
    }

    pub async fn get_actor(&self, id: i64) -> Result<ActorEnvelope, Error> {
        self.get(self.actor_url(id)?).await
    }

    pub async fn create_actor(&self, actor: &NewActor) -> Result<Reply<Created>, Error> {
        self.post(self.url("actors")?, actor).await
    }

    pub async fn update_actor(
        &self,
        id: i64,
        operations: &[PatchOperation],
    ) -> Result<Status, Error> {
        self.patch(self.actor_url(id)?, operations).await
    }

    pub async fn delete_actor(&self, id: i64) -> Result<Status, Error> {
        self.delete(self.actor_url(id)?).await
    }

    // ── Casts ────────────────────────────────────────────────────────

    pub async fn create_cast(&self, cast: &NewCast) -> Result<Reply<CastCreated>, Error> {
        self.post(self.url("casts")?, cast).await
    }

    pub async fn delete_cast(&self, movie_id: i64, actor_id: i64) -> Result<Status, Error> {
        self.delete(self.url(&format!("casts/movies/{movie_id}/actors/{actor_id}"))?)
            .await
    }
}
