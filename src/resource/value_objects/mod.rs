//! Value objects for the fields of a user creation request.
//!
//! Each value object enforces its invariant at construction time, so a
//! [`UserName`], [`EmailAddress`], [`Password`] or [`PersonName`] that exists
//! is valid by definition.
//!
//! ```rust
//! use backend_resources::resource::value_objects::{EmailAddress, UserName};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let username = UserName::new("alice")?;
//!     let email = EmailAddress::new("alice@example.com")?;
//!     assert_eq!(username.as_str(), "alice");
//!     assert_eq!(email.domain(), "example.com");
//!
//!     assert!(UserName::new("   ").is_err());
//!     Ok(())
//! }
//! ```

mod email_address;
mod password;
mod person_name;
mod user_name;

pub use email_address::EmailAddress;
pub use password::Password;
pub use person_name::PersonName;
pub use user_name::UserName;

/// Blank means empty or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
