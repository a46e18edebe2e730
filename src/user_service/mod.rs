//! User service: validation, authorization and provider orchestration.
//!
//! # Module Organization
//!
//! * [`core`] - `UserService` struct, builder and the authorization entry point
//! * [`operations`] - create, read, search and identity echo operations
//! * `tests` - scripted gateway and unit tests for outcome mapping

pub mod core;
pub mod operations;


pub use self::core::{DEFAULT_REALM, UserService, UserServiceBuilder};
