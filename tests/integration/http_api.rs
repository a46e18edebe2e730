//! HTTP facade: routes, status codes and bodies.

use crate::common::*;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use backend_resources::http::{CreatedUser, REQUEST_ID_HEADER};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn create(env: &TestEnv, token: Option<&str>, body: Value) -> Response {
    env.app
        .clone()
        .oneshot(api_request(Method::POST, "/api/users", token, Some(body)))
        .await
        .unwrap()
}

async fn get(env: &TestEnv, uri: &str, token: Option<&str>) -> Response {
    env.app
        .clone()
        .oneshot(api_request(Method::GET, uri, token, None))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let mut env = TestEnv::new().await;

    let response = create(&env, Some(MODERATOR_TOKEN), UserRequestBuilder::new().json()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: CreatedUser = serde_json::from_value(body_json(response).await).unwrap();
    env.track(created.id);

    let response = get(&env, &format!("/api/users/{}", created.id), Some(MODERATOR_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["firstName"], "firstName");
    assert_eq!(body["lastName"], "lastName");
    assert_eq!(body["email"], "email_@example.com");
    assert_eq!(body["roles"], json!(["default-roles-itm"]));
    assert_eq!(body["groups"], json!([]));
    assert!(body.get("password").is_none());

    env.cleanup().await;
}

#[tokio::test]
async fn test_alice_is_created_once_then_conflicts() {
    let mut env = TestEnv::new().await;
    let alice = json!({
        "username": "alice",
        "email": "a@example.com",
        "password": "secret1",
        "firstName": "A",
        "lastName": "B"
    });

    let response = create(&env, Some(MODERATOR_TOKEN), alice.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: CreatedUser = serde_json::from_value(body_json(response).await).unwrap();
    env.track(created.id);

    let response = create(&env, Some(MODERATOR_TOKEN), alice).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["status"], 409);
    assert_eq!(body["code"], "USER_ALREADY_EXISTS");
    assert_eq!(env.identity_count().await, 1);

    env.cleanup().await;
}

#[tokio::test]
async fn test_validation_failures_return_field_messages() {
    let env = TestEnv::new().await;

    let body = UserRequestBuilder::new()
        .with_username("")
        .with_email("invalid-email")
        .with_password("1234")
        .json();
    let response = create(&env, Some(MODERATOR_TOKEN), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "username": "Username should not be blank",
            "email": "Email should be valid",
            "password": "Password should be greater than 4 characters long"
        })
    );
    assert_eq!(env.identity_count().await, 0);
    env.cleanup().await;
}

#[tokio::test]
async fn test_missing_fields_are_field_violations() {
    let env = TestEnv::new().await;

    let response = create(&env, Some(MODERATOR_TOKEN), json!({"username": "only"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["email"], "Email should be valid");
    assert_eq!(body["firstName"], "must not be blank");
    assert!(body.get("username").is_none());
    env.cleanup().await;
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let env = TestEnv::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::AUTHORIZATION, format!("Bearer {}", MODERATOR_TOKEN))
        .body(Body::from("username=alice"))
        .unwrap();
    let response = env.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MALFORMED_BODY");
    assert_eq!(env.identity_count().await, 0);
    env.cleanup().await;
}

#[tokio::test]
async fn test_positional_array_body_is_bad_request() {
    let env = TestEnv::new().await;

    let response = create(
        &env,
        Some(MODERATOR_TOKEN),
        json!(["alice", "alice@example.com", "secret1", "Alice", "Smith"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MALFORMED_BODY");
    assert_eq!(env.identity_count().await, 0);
    env.cleanup().await;
}

#[tokio::test]
async fn test_plain_user_is_forbidden_regardless_of_body() {
    let env = TestEnv::new().await;

    for body in [
        UserRequestBuilder::new().json(),
        UserRequestBuilder::new().with_email("broken").json(),
        json!("not an object"),
    ] {
        let response = create(&env, Some(USER_TOKEN), body).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let response = get(&env, "/api/users/not-a-uuid", Some(USER_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(env.identity_count().await, 0);
    env.cleanup().await;
}

#[tokio::test]
async fn test_anonymous_calls_are_unauthorized() {
    let env = TestEnv::new().await;

    let response = create(&env, None, UserRequestBuilder::new().json()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["error"], "Unauthorized");

    let response = get(&env, &format!("/api/users/{}", uuid::Uuid::new_v4()), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&env, "/api/users/hello", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    env.cleanup().await;
}

#[tokio::test]
async fn test_unknown_or_malformed_tokens_are_unauthorized() {
    let env = TestEnv::new().await;

    let response = get(&env, "/api/users/hello", Some("no-such-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/users/hello")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = env.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    env.cleanup().await;
}

#[tokio::test]
async fn test_hello_echoes_username_for_any_role() {
    let env = TestEnv::new().await;

    for (token, expected) in [(MODERATOR_TOKEN, "moderator"), (USER_TOKEN, "bob")] {
        let response = get(&env, "/api/users/hello", Some(token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(expected));
    }
    env.cleanup().await;
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let env = TestEnv::new().await;

    let response = get(&env, "/api/users/12345", Some(MODERATOR_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"id": "Invalid user id format"}));
    env.cleanup().await;
}

#[tokio::test]
async fn test_urn_id_is_bad_request() {
    let env = TestEnv::new().await;

    let uri = format!("/api/users/{}", uuid::Uuid::new_v4().urn());
    let response = get(&env, &uri, Some(MODERATOR_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"id": "Invalid user id format"}));
    env.cleanup().await;
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let env = TestEnv::new().await;

    let response = get(
        &env,
        &format!("/api/users/{}", uuid::Uuid::new_v4()),
        Some(MODERATOR_TOKEN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "USER_NOT_FOUND");
    env.cleanup().await;
}

#[tokio::test]
async fn test_provider_outage_is_server_error() {
    let env = TestEnv::new().await;
    env.realm.set_available(false);

    let response = create(&env, Some(MODERATOR_TOKEN), UserRequestBuilder::new().json()).await;
    assert!(response.status().is_server_error());
    let body = body_json(response).await;
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));

    env.realm.set_available(true);
    env.cleanup().await;
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let env = TestEnv::new().await;

    let request = Request::builder()
        .uri("/api/users/hello")
        .header(header::AUTHORIZATION, format!("Bearer {}", USER_TOKEN))
        .header(REQUEST_ID_HEADER, "trace-42")
        .body(Body::empty())
        .unwrap();
    let response = env.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-42");

    // Rejected requests carry one too
    let response = get(&env, "/api/users/hello", Some("bogus")).await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    env.cleanup().await;
}
