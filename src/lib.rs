//! User management REST facade over an external identity provider.
//!
//! Validates user creation requests, enforces a role gate on every
//! operation and maps identity provider outcomes to HTTP status codes. The
//! identity provider stays the system of record; nothing is cached here.
//!
//! # Core Components
//!
//! - [`UserService`] - validation, authorization and provider orchestration
//! - [`IdentityGateway`] - trait for identity provider backends
//! - [`InMemoryRealm`] - in-memory gateway for tests and the demo server
//! - [`http::router`] - axum routes under `/api/users`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use backend_resources::auth::{AuthenticationValidator, Principal};
//! use backend_resources::http::{AppState, router};
//! use backend_resources::{InMemoryRealm, UserService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let authenticator = AuthenticationValidator::new();
//! authenticator
//!     .register_credential("mod-token", Principal::new("mod", ["MODERATOR"]))
//!     .await;
//!
//! let service = UserService::new(InMemoryRealm::new());
//! let app = router(AppState::new(service, authenticator));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod resource;
pub mod user_service;

// Re-export commonly used types for convenience
pub use auth::{Operation, Principal, Role};
pub use config::ServerConfig;
pub use error::{ConfigError, FieldErrors, UserServiceError, UserServiceResult, ValidationError};
pub use gateway::{GatewayError, IdentityGateway, IdentityRecord, InMemoryRealm};
pub use resource::{RequestContext, UserCreateRequest, UserView, ValidationPolicy};
pub use user_service::{UserService, UserServiceBuilder};
