//! Common test utilities.

pub mod builders;
pub mod fixtures;

pub use builders::{TestEnv, UserRequestBuilder, api_request};
pub use fixtures::*;

use axum::body::{Body, to_bytes};
use axum::http::Response;
use serde_json::Value;

/// Route `log` output through the test harness; `RUST_LOG` picks the level.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
