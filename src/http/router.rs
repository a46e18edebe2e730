//! Router assembly.

use super::AppState;
use super::handlers::{create_user, get_user, hello};
use super::middleware::authenticate;
use crate::gateway::IdentityGateway;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

/// Build the user management router.
///
/// The authentication layer wraps every route; unmatched paths still get a
/// request id.
pub fn router<G: IdentityGateway + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/api/users", post(create_user::<G>))
        .route("/api/users/hello", get(hello::<G>))
        .route("/api/users/{id}", get(get_user::<G>))
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.authenticator.clone(),
            authenticate,
        ))
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
