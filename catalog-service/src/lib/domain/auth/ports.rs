use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::RefreshTokenError;
use crate::domain::auth::models::RefreshToken;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Source of truth for a user's current role.
#[async_trait]
pub trait RoleLookup: Send + Sync + 'static {
    /// Current role of `user_id`.
    ///
    /// # Returns
    /// `None` if the user does not exist
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    /// * `InvalidRole` - Stored role is not a known role
    async fn lookup_role(&self, user_id: &UserId) -> Result<Option<Role>, UserError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new refresh token record and return it as stored.
    ///
    /// # Errors
    /// * `PersistenceFailure` - Database operation failed
    async fn create(&self, token: &RefreshToken) -> Result<RefreshToken, RefreshTokenError>;

    /// Retrieve a refresh token record by its token value.
    ///
    /// # Errors
    /// * `PersistenceFailure` - Database operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;

    /// Mark a token revoked at `revoked_at`, unless it already is.
    ///
    /// Must be a single atomic update that leaves already-revoked records
    /// untouched.
    ///
    /// # Returns
    /// `true` if this call revoked the token, `false` if nothing changed
    ///
    /// # Errors
    /// * `PersistenceFailure` - Database operation failed
    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, RefreshTokenError>;
}
