use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with the `user` role.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify credentials, then issue and record an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TokenIssuance` - Token minting failed
    /// * `RefreshToken` - Refresh token could not be recorded
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &EmailAddress, password: &str)
        -> Result<LoginOutcome, UserError>;

    /// Exchange a valid refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshToken` - Token unknown, expired or revoked
    /// * `TokenIssuance` - Token minting failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError>;

    /// Revoke a refresh token. Revoking twice is not an error.
    ///
    /// # Errors
    /// * `RefreshToken` - Token unknown or store failure
    async fn logout(&self, refresh_token: &str) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
