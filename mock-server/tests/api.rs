use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Character, Envelope, Page};
use serde_json::json;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn rick_and_morty() -> Vec<Character> {
    serde_json::from_value(json!([{"id": 1, "name": "Rick"}, {"id": 2, "name": "Morty"}])).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_characters_empty() {
    let resp = app().oneshot(empty_request("GET", "/character")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page = body_json(resp).await;
    assert!(page.results.is_empty());
    assert_eq!(page.info.count, 0);
}

#[tokio::test]
async fn list_characters_nests_results() {
    let resp = app_with(rick_and_morty())
        .oneshot(empty_request("GET", "/character"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["info"]["count"], 2);
    assert_eq!(
        body["results"],
        json!([{"id": 1, "name": "Rick"}, {"id": 2, "name": "Morty"}])
    );
}

// --- create ---

#[tokio::test]
async fn create_character_returns_201_with_server_id() {
    let resp = app_with(rick_and_morty())
        .oneshot(json_request("POST", "/character", r#"{"character":{"name":"Summer"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Envelope<Character> = body_json(resp).await;
    assert_eq!(created.character.id, 3);
    assert_eq!(created.character.fields["name"], "Summer");
}

#[tokio::test]
async fn create_character_ignores_client_id() {
    let resp = app()
        .oneshot(json_request("POST", "/character", r#"{"character":{"id":999,"name":"Summer"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, json!({"character": {"id": 1, "name": "Summer"}}));
}

#[tokio::test]
async fn create_character_without_envelope_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/character", r#"{"name":"Summer"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_character_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/character", r#"{"character":{"id":99,"name":"Nope"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_character_merges_fields() {
    let seed = serde_json::from_value(json!([{"id": 1, "name": "Rick", "status": "Alive"}])).unwrap();
    let resp = app_with(seed)
        .oneshot(json_request("PUT", "/character", r#"{"character":{"id":1,"name":"Rick Sanchez"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"character": {"id": 1, "name": "Rick Sanchez", "status": "Alive"}})
    );
}

// --- delete ---

#[tokio::test]
async fn delete_character_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/character/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_character_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/character/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/character", r#"{"character":{"name":"Squanchy"}}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Envelope<Character> = body_json(resp).await;
    let id = created.character.id;

    // list — should contain the one character
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/character"))
        .await
        .unwrap();
    let page: Page = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].id, id);

    // update
    let body = format!(r#"{{"character":{{"id":{id},"species":"Cat"}}}}"#);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/character", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Envelope<Character> = body_json(resp).await;
    assert_eq!(updated.character.fields["name"], "Squanchy"); // unchanged
    assert_eq!(updated.character.fields["species"], "Cat");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/character/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/character/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/character"))
        .await
        .unwrap();
    let page: Page = body_json(resp).await;
    assert!(page.results.is_empty());
}
