//! Fluent builders and the per-test environment.

use super::fixtures::{MODERATOR_TOKEN, REALM, USER_TOKEN, moderator, plain_user};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use backend_resources::auth::AuthenticationValidator;
use backend_resources::gateway::IdentityGateway;
use backend_resources::http::{AppState, router};
use backend_resources::{InMemoryRealm, UserCreateRequest, UserService};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Builder for user creation payloads, starting from a valid request.
#[derive(Debug, Clone)]
pub struct UserRequestBuilder {
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl UserRequestBuilder {
    pub fn new() -> Self {
        Self {
            username: "username_".to_string(),
            email: "email_@example.com".to_string(),
            password: "password".to_string(),
            first_name: "firstName".to_string(),
            last_name: "lastName".to_string(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn build(self) -> UserCreateRequest {
        UserCreateRequest::new(
            self.username,
            self.email,
            self.password,
            self.first_name,
            self.last_name,
        )
    }

    pub fn json(self) -> Value {
        json!({
            "username": self.username,
            "email": self.email,
            "password": self.password,
            "firstName": self.first_name,
            "lastName": self.last_name,
        })
    }
}

impl Default for UserRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one test needs: its own realm, service and router.
///
/// Each test builds a fresh environment, so no state leaks between tests.
/// Identities created through [`TestEnv::track`] are removed by
/// [`TestEnv::cleanup`].
pub struct TestEnv {
    pub realm: InMemoryRealm,
    pub service: Arc<UserService<InMemoryRealm>>,
    pub app: Router,
    created: Vec<Uuid>,
}

impl TestEnv {
    pub async fn new() -> Self {
        super::init_logging();

        let realm = InMemoryRealm::new().with_default_roles(["default-roles-itm"]);
        let service = UserService::builder(realm.clone())
            .with_realm(REALM)
            .build()
            .expect("Failed to build service");

        let authenticator = AuthenticationValidator::new();
        authenticator
            .register_credential(MODERATOR_TOKEN, moderator())
            .await;
        authenticator.register_credential(USER_TOKEN, plain_user()).await;

        let state = AppState::new(service, authenticator);
        let service = Arc::clone(&state.service);
        Self {
            realm,
            service,
            app: router(state),
            created: Vec::new(),
        }
    }

    pub fn track(&mut self, id: Uuid) {
        self.created.push(id);
    }

    pub async fn identity_count(&self) -> usize {
        self.realm.count(REALM).await
    }

    /// Delete every tracked identity and check the realm is empty again.
    pub async fn cleanup(self) {
        for id in &self.created {
            self.realm
                .delete_by_id(REALM, *id)
                .await
                .expect("Tracked identity vanished before cleanup");
        }
        assert_eq!(self.realm.count(REALM).await, 0, "Untracked identities left behind");
    }
}

/// Build a request with an optional bearer token and JSON body.
pub fn api_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build request")
}
