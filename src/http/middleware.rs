//! Request authentication and correlation middleware.

use super::error::ApiError;
use crate::auth::{AuthenticationError, AuthenticationValidator, LinearCredential, Principal};
use crate::resource::RequestContext;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::debug;

/// Header carrying the correlation id, echoed on every response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolve the caller and attach a [`RequestContext`] to the request.
///
/// - No `Authorization` header: anonymous context; the operation gate decides.
/// - Malformed header or unknown token: 401 before any handler runs.
///
/// ```rust,ignore
/// let router = Router::new()
///     .route("/api/users/hello", get(hello))
///     .layer(axum::middleware::from_fn_with_state(authenticator, authenticate));
/// ```
pub async fn authenticate(
    State(authenticator): State<AuthenticationValidator>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = request_id(request.headers());
    debug!(
        "{} {} (request: '{}')",
        request.method(),
        request.uri().path(),
        request_id
    );

    let resolved = resolve_principal(&authenticator, request.headers()).await;
    let mut response = match resolved {
        Ok(principal) => {
            let mut context = RequestContext::new(request_id.clone());
            if let Some(principal) = principal {
                context = context.with_principal(principal);
            }
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => {
            debug!("Rejected credentials (request: '{}'): {}", request_id, e);
            e.into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn resolve_principal(
    authenticator: &AuthenticationValidator,
    headers: &HeaderMap,
) -> Result<Option<Principal>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AuthenticationError::MalformedAuthorization)?;

    let credential = LinearCredential::from_authorization_header(value)?;
    let witness = authenticator.authenticate(credential).await?;
    Ok(Some(witness.into_principal()))
}

/// Inbound id when usable, otherwise a fresh UUID.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
