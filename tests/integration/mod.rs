//! End-to-end tests.
//!
//! - `user_service` - service operations and provider outcome mapping
//! - `http_api` - HTTP status codes and bodies for every route
//! - `concurrency` - racing creates of one username

pub mod concurrency;
pub mod http_api;
