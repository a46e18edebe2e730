//! User resource model: requests, views, validation and request context.
//!
//! # Key Components
//!
//! * [`UserCreateRequest`] - Raw creation payload as received from callers
//! * [`UserValidator`] - Collects every field violation of a request
//! * [`UserView`] - Read-only projection of a provider record
//! * [`RequestContext`] - Per-request id and authenticated principal
//! * [`value_objects`] - Validated field primitives

pub mod context;
pub mod request;
pub mod validation;
pub mod value_objects;
pub mod view;

pub use context::RequestContext;
pub use request::{UserCreateRequest, ValidatedUserRequest};
pub use validation::{UserValidator, ValidationPolicy};
pub use value_objects::{EmailAddress, Password, PersonName, UserName};
pub use view::UserView;
