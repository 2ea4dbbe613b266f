#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marquee_api::{
    ApiClient, Credentials, Error, Gender, Genre, NewActor, NewCast, PatchOperation,
    TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_actors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/actors"))
        .and(query_param("page", "1"))
        .and(query_param("search", "jo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "actors": [
                { "id": 1, "name": "John Doe", "age": 30, "gender": "MALE", "photoUrl": null }
            ],
            "totalActors": 11,
            "offset": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_actors(1, "jo").await.unwrap();

    assert_eq!(page.total_actors, 11);
    assert_eq!(page.actors.len(), 1);
    assert_eq!(page.actors[0].name, "John Doe");
    assert_eq!(page.actors[0].gender, Some(Gender::Male));
    assert_eq!(page.actors[0].photo_url, None);
}

#[tokio::test]
async fn test_get_movie_with_cast() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/movies/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "movie": {
                "id": 3,
                "title": "Metropolis",
                "genre": "SCI_FI",
                "releaseDate": "1927-01-10",
                "actors": [{ "id": 9, "name": "Brigitte Helm", "age": 18, "gender": "F" }]
            }
        })))
        .mount(&server)
        .await;

    let movie = client.get_movie(3).await.unwrap().movie.unwrap();

    assert_eq!(movie.genre, Genre::SciFi);
    assert_eq!(movie.release_date.as_deref(), Some("1927-01-10"));
    assert_eq!(movie.actors[0].gender, Some(Gender::Female));
}

#[tokio::test]
async fn test_error_status_carries_reason() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/actors/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let err = client.get_actor(404).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "404: Not Found");
}

#[tokio::test]
async fn test_unauthorized_is_a_plain_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.list_movies(1, "").await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 401, .. }));
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/movies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client.get_movie(1).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_garbage_body_preview_respects_char_boundaries() {
    let (server, client) = setup().await;

    // The multi-byte 'é' straddles the preview cut-off.
    let body = format!("<{}é trailing", "a".repeat(198));
    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let err = client
        .get_json(client.url("movies").unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Deserialization { message, body: raw } => {
            assert_eq!(raw, body);
            assert!(message.contains("body preview"));
            assert!(!message.contains("trailing"));
        }
        other => panic!("expected deserialization error, got {other:?}"),
    }
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_actor_returns_status_and_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/actors"))
        .and(body_json(json!({ "name": "John", "gender": "MALE", "age": 30 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true, "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client
        .create_actor(&NewActor {
            name: "John".into(),
            age: 30,
            gender: Some(Gender::Male),
            photo_url: None,
        })
        .await
        .unwrap();

    assert_eq!(reply.status.to_string(), "201: Created");
    assert_eq!(reply.body.id, 7);
}

#[tokio::test]
async fn test_patch_sends_json_patch_content_type() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/actors/7"))
        .and(header("content-type", "application/json-patch+json"))
        .and(body_json(json!([
            { "op": "add", "path": "/age", "value": 31 },
            { "op": "remove", "path": "/photoUrl" }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client
        .update_actor(
            7,
            &[
                PatchOperation::add("age", 31),
                PatchOperation::remove("photoUrl"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(status.code, 200);
}

#[tokio::test]
async fn test_patch_without_changes_is_204() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/movies/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let status = client.update_movie(2, &[]).await.unwrap();
    assert_eq!(status.to_string(), "204: No Content");
}

#[tokio::test]
async fn test_cast_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/casts"))
        .and(body_json(json!({ "movie_id": 2, "actor_id": 5 })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "success": true, "id": "movie-2-actor-5" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/casts/movies/2/actors/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "id": "movie-2-actor-5" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_cast(&NewCast {
            movie_id: 2,
            actor_id: 5,
        })
        .await
        .unwrap();
    assert_eq!(created.body.id, "movie-2-actor-5");

    let status = client.delete_cast(2, 5).await.unwrap();
    assert!(status.is_success());
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_sent_on_every_request() {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        &Credentials::bearer("tok-123"),
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("DELETE"))
        .and(path("/actors/3"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_actor(3).await.unwrap();
}
