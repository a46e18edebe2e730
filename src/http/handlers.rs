//! Route handlers.
//!
//! Handlers run the operation gate before reading their input, so a caller
//! without the required role gets 403 whatever the body or path contains.

use super::AppState;
use super::error::ApiError;
use crate::auth::Operation;
use crate::gateway::IdentityGateway;
use crate::resource::{RequestContext, UserCreateRequest, UserView};
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Response body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: Uuid,
}

/// `POST /api/users`
pub async fn create_user<G: IdentityGateway + 'static>(
    State(state): State<AppState<G>>,
    Extension(context): Extension<RequestContext>,
    body: Bytes,
) -> Result<Json<CreatedUser>, ApiError> {
    state.service.authorize(&context, Operation::CreateUser)?;

    let request = decode_create_request(&body)?;

    let id = state.service.create_user(&context, &request).await?;
    Ok(Json(CreatedUser { id }))
}

/// Decode a create body, accepting only a JSON object.
///
/// serde's derived struct visitor also takes a positional array, which is not
/// a valid payload here.
fn decode_create_request(body: &[u8]) -> Result<UserCreateRequest, ApiError> {
    let fields: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// `GET /api/users/{id}`
pub async fn get_user<G: IdentityGateway + 'static>(
    State(state): State<AppState<G>>,
    Extension(context): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.service.get_user_by_id(&context, &id).await?;
    Ok(Json(user))
}

/// `GET /api/users/hello`
pub async fn hello<G: IdentityGateway + 'static>(
    State(state): State<AppState<G>>,
    Extension(context): Extension<RequestContext>,
) -> Result<Json<String>, ApiError> {
    Ok(Json(state.service.current_identity_name(&context)?))
}
