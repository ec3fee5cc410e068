use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, "Bearer test-key")
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    authed(method, uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\nContent-Type: text/plain\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    authed(method, uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    authed(method, uri).body(Body::empty()).unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_gets_error_envelope() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/v1/user").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["data"]["code"], 401);
}

#[tokio::test]
async fn empty_bearer_token_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/projects")
                .header(http::header::AUTHORIZATION, "Bearer ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- projects ---

#[tokio::test]
async fn list_projects_empty() {
    let resp = app().oneshot(empty("GET", "/api/v1/projects")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["data"], serde_json::json!([]));
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn create_project_returns_201() {
    let resp = app()
        .oneshot(form_request(
            "POST",
            "/api/v1/projects",
            &[("project_name", "demo"), ("sitemap_path", "https://example.com/sitemap.xml")],
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["project_name"], "demo");
    assert_eq!(body["data"]["type"], "SITEMAP");
}

#[tokio::test]
async fn create_project_without_name_returns_400() {
    let resp = app()
        .oneshot(form_request("POST", "/api/v1/projects", &[("sitemap_path", "https://x")]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["data"]["code"], 400);
}

#[tokio::test]
async fn get_missing_project_returns_404() {
    let resp = app().oneshot(empty("GET", "/api/v1/projects/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["message"], "Project with id 99 not found");
}

#[tokio::test]
async fn project_lifecycle_on_one_router() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(form_request("POST", "/api/v1/projects", &[("project_name", "a"), ("sitemap_path", "https://x")]))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(form_request("POST", &format!("/api/v1/projects/{id}"), &[("project_name", "b"), ("is_shared", "true")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["project_name"], "b");
    assert_eq!(body["data"]["is_shared"], true);

    let resp = app.clone().oneshot(empty("GET", &format!("/api/v1/projects/{id}/stats"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(empty("DELETE", &format!("/api/v1/projects/{id}"))).await.unwrap();
    assert_eq!(body_json(resp).await["data"]["deleted"], true);

    let resp = app.oneshot(empty("GET", &format!("/api/v1/projects/{id}"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- conversations ---

async fn project_with_conversation(app: &axum::Router) -> (i64, String) {
    let resp = app
        .clone()
        .oneshot(form_request("POST", "/api/v1/projects", &[("project_name", "chat"), ("sitemap_path", "https://x")]))
        .await
        .unwrap();
    let project_id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/projects/{project_id}/conversations"),
            r#"{"name":"first"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session_id = body_json(resp).await["data"]["session_id"].as_str().unwrap().to_string();
    (project_id, session_id)
}

#[tokio::test]
async fn send_message_returns_json_answer() {
    let app = app();
    let (project_id, session_id) = project_with_conversation(&app).await;

    let uri = format!("/api/v1/projects/{project_id}/conversations/{session_id}/messages?stream=0&lang=en");
    let resp = app.clone().oneshot(json_request("POST", &uri, r#"{"prompt":"hello"}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["openai_response"], "You said: hello");

    let uri = format!("/api/v1/projects/{project_id}/conversations/{session_id}/messages");
    let resp = app.oneshot(empty("GET", &uri)).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["messages"]["total"], 1);
    assert_eq!(body["data"]["conversation"]["name"], "first");
}

#[tokio::test]
async fn send_message_streams_events() {
    let app = app();
    let (project_id, session_id) = project_with_conversation(&app).await;

    let uri = format!("/api/v1/projects/{project_id}/conversations/{session_id}/messages?stream=1");
    let resp = app.oneshot(json_request("POST", &uri, r#"{"prompt":"hi there"}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap(),
        "text/event-stream"
    );
    let text = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
    let frames: Vec<&str> = text.split("\n\n").filter(|f| !f.is_empty()).collect();
    assert!(frames[0].contains(r#""status":"progress""#));
    assert!(frames.last().unwrap().contains(r#""status":"finish""#));
}

#[tokio::test]
async fn send_to_unknown_conversation_returns_404() {
    let app = app();
    let (project_id, _) = project_with_conversation(&app).await;
    let uri = format!("/api/v1/projects/{project_id}/conversations/nope/messages");
    let resp = app.oneshot(json_request("POST", &uri, r#"{"prompt":"x"}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- preview & user ---

#[tokio::test]
async fn preview_serves_raw_text() {
    let resp = app().oneshot(empty("GET", "/api/v1/preview/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"preview of abc");
}

#[tokio::test]
async fn user_is_fixed() {
    let resp = app().oneshot(empty("GET", "/api/v1/user")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["email"], "mock@example.com");
}
