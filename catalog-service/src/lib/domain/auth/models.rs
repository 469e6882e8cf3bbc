use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::RefreshTokenError;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// The authenticated caller of one request.
///
/// Built by the auth gate after every check passed and placed in the request
/// extensions. Never stored, never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    /// Role as read from the record store while handling this request
    pub role: Role,
    /// Bearer token the request was authenticated with
    pub raw_token: String,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role, raw_token: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            raw_token: raw_token.into(),
        }
    }
}

/// Persisted refresh credential.
///
/// Only `revoked_at` (and `updated_at` alongside it) ever changes after
/// insertion; records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// A fresh, unrevoked record created at `now`.
    pub fn new(
        token: String,
        user_id: UserId,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        }
    }

    /// Owner of the token if it is usable at `now`.
    ///
    /// Revocation wins over expiry so a revoked token always reports `Revoked`.
    pub fn check_usable_at(&self, now: DateTime<Utc>) -> Result<UserId, RefreshTokenError> {
        if self.revoked_at.is_some() {
            return Err(RefreshTokenError::Revoked);
        }
        if now >= self.expires_at {
            return Err(RefreshTokenError::Expired);
        }
        Ok(self.user_id)
    }
}
