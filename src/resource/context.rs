//! Request context for user operations.
//!
//! Carries a request id for log correlation and the authenticated principal,
//! if any. Built once per request by the HTTP facade.

use crate::auth::Principal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
    principal: Option<Principal>,
}

impl RequestContext {
    /// Create an anonymous context with a specific request ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
        }
    }

    /// Create an anonymous context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Create a context for `principal` with a generated request ID.
    pub fn authenticated(principal: Principal) -> Self {
        Self::with_generated_id().with_principal(principal)
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.principal.as_ref().map(Principal::username)
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
