//! User operations.
//!
//! Each operation runs the authorization gate first, then its own input
//! checks, then at most one provider call. Provider outcomes are mapped to
//! typed failures here; HTTP statuses are the facade's concern.

use super::core::UserService;
use crate::auth::Operation;
use crate::error::{UserServiceError, UserServiceResult, ValidationError};
use crate::gateway::{GatewayError, IdentityGateway, IdentityRecord, NewIdentity};
use crate::resource::{RequestContext, UserCreateRequest, UserView};
use log::{debug, error, info, warn};
use uuid::Uuid;
use uuid::fmt::Hyphenated;

impl<G: IdentityGateway> UserService<G> {
    /// Create a user in the identity provider.
    ///
    /// Returns the provider-assigned id of the new identity.
    ///
    /// # Errors
    ///
    /// * `Unauthenticated` / `Forbidden` - caller fails the moderator gate
    /// * `Validation` - one message per offending field; nothing is created
    /// * `Conflict` - the username is already taken
    /// * `Unknown` - any other provider failure
    pub async fn create_user(
        &self,
        context: &RequestContext,
        request: &UserCreateRequest,
    ) -> UserServiceResult<Uuid> {
        let caller = self.authorize(context, Operation::CreateUser)?;

        info!(
            "Creating user '{}' in realm '{}' (request: '{}', by: '{}')",
            request.username,
            self.realm,
            context.request_id,
            caller.username()
        );

        let validated = self.validator.validate(request).map_err(|errors| {
            debug!(
                "Rejected create request '{}': {}",
                context.request_id, errors
            );
            UserServiceError::Validation(errors)
        })?;

        let identity = NewIdentity::new(
            validated.username.into_string(),
            validated.email.into_string(),
            validated.password.expose(),
            validated.first_name.into_string(),
            validated.last_name.into_string(),
        );

        match self.gateway.create(&self.realm, identity).await {
            Ok(id) => {
                info!(
                    "Created user '{}' with id {} (request: '{}')",
                    request.username, id, context.request_id
                );
                Ok(id)
            }
            Err(GatewayError::Duplicate { username, .. }) => {
                warn!(
                    "User '{}' already exists in realm '{}' (request: '{}')",
                    username, self.realm, context.request_id
                );
                Err(UserServiceError::Conflict { username })
            }
            Err(other) => Err(self.provider_failure("create_user", context, other)),
        }
    }

    /// Fetch a user by id and project it to a [`UserView`].
    ///
    /// # Errors
    ///
    /// * `Unauthenticated` / `Forbidden` - caller fails the moderator gate
    /// * `Validation` - `id` is not a UUID
    /// * `NotFound` - no identity with this id
    /// * `Unknown` - any other provider failure
    pub async fn get_user_by_id(
        &self,
        context: &RequestContext,
        id: &str,
    ) -> UserServiceResult<UserView> {
        self.authorize(context, Operation::GetUserById)?;

        let user_id = parse_user_id(id)?;

        debug!(
            "Fetching user {} from realm '{}' (request: '{}')",
            user_id, self.realm, context.request_id
        );

        match self.gateway.fetch_by_id(&self.realm, user_id).await {
            Ok(record) => Ok(UserView::from(record)),
            Err(GatewayError::NotFound { id, .. }) => {
                debug!("User {} not found (request: '{}')", id, context.request_id);
                Err(UserServiceError::NotFound { id })
            }
            Err(other) => Err(self.provider_failure("get_user_by_id", context, other)),
        }
    }

    /// Username of the authenticated caller.
    ///
    /// Requires authentication only; any role will do.
    pub fn current_identity_name(&self, context: &RequestContext) -> UserServiceResult<String> {
        let caller = self.authorize(context, Operation::Hello)?;
        Ok(caller.username().to_string())
    }

    /// Find identities whose username contains `username`.
    ///
    /// Used by cleanup tooling to resolve the id of a user created through
    /// [`create_user`](Self::create_user).
    pub async fn find_by_username(
        &self,
        context: &RequestContext,
        username: &str,
    ) -> UserServiceResult<Vec<IdentityRecord>> {
        self.authorize(context, Operation::SearchUsers)?;

        self.gateway
            .search_by_username(&self.realm, username)
            .await
            .map_err(|e| self.provider_failure("find_by_username", context, e))
    }

    fn provider_failure(
        &self,
        operation: &str,
        context: &RequestContext,
        cause: GatewayError,
    ) -> UserServiceError {
        error!(
            "Identity provider failure during {} in realm '{}' (request: '{}'): {}",
            operation, self.realm, context.request_id, cause
        );
        UserServiceError::Unknown(cause)
    }
}

/// Parse a path id, accepting only the hyphenated form.
///
/// `Uuid::try_parse` also takes the simple, braced and `urn:uuid:` forms.
fn parse_user_id(id: &str) -> Result<Uuid, ValidationError> {
    let invalid = || ValidationError::InvalidId {
        value: id.to_string(),
    };
    if id.len() != Hyphenated::LENGTH {
        return Err(invalid());
    }
    Uuid::try_parse(id).map_err(|_| invalid())
}
