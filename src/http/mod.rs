//! HTTP facade over [`UserService`].
//!
//! Routes:
//! - `POST /api/users` - create a user (moderator)
//! - `GET /api/users/hello` - echo the caller's username (any authenticated caller)
//! - `GET /api/users/{id}` - fetch a user (moderator)
//!
//! The [`middleware::authenticate`] layer resolves the bearer token into a
//! [`RequestContext`](crate::resource::RequestContext) extension and echoes
//! `x-request-id`. Handlers never map statuses themselves; every failure goes
//! through [`ApiError`].

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use error::{ApiError, ErrorBody};
pub use handlers::CreatedUser;
pub use middleware::REQUEST_ID_HEADER;
pub use router::router;

use crate::auth::AuthenticationValidator;
use crate::gateway::IdentityGateway;
use crate::user_service::UserService;
use std::sync::Arc;

/// Shared state handed to every handler.
pub struct AppState<G> {
    pub service: Arc<UserService<G>>,
    pub authenticator: AuthenticationValidator,
}

impl<G: IdentityGateway> AppState<G> {
    pub fn new(service: UserService<G>, authenticator: AuthenticationValidator) -> Self {
        Self {
            service: Arc::new(service),
            authenticator,
        }
    }
}

// Manual impl: `G` itself need not be `Clone`.
impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            authenticator: self.authenticator.clone(),
        }
    }
}
