use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::ledger::RefreshTokenLedger;
use crate::domain::auth::ports::RefreshTokenRepository;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns registration and the login/refresh/logout credential lifecycle.
pub struct UserService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    repository: Arc<UR>,
    ledger: RefreshTokenLedger<RR>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<UR, RR> UserService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `refresh_tokens` - Refresh token persistence implementation
    /// * `authenticator` - Password hashing and token minting
    /// * `refresh_token_ttl` - Lifetime of refresh tokens issued at login
    pub fn new(
        repository: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            ledger: RefreshTokenLedger::new(refresh_tokens),
            authenticator,
            refresh_token_ttl,
        }
    }
}

#[async_trait]
impl<UR, RR> UserServicePort for UserService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if command.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<LoginOutcome, UserError> {
        let user = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let tokens = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => UserError::Hashing(err.to_string()),
                AuthenticationError::JwtError(err) => UserError::TokenIssuance(err.to_string()),
                AuthenticationError::RefreshTokenError(err) => {
                    UserError::TokenIssuance(err.to_string())
                }
            })?;

        let expires_at = Utc::now() + self.refresh_token_ttl;
        let record = self
            .ledger
            .create(&tokens.refresh_token, user.id, expires_at)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            refresh_token_expires_at: record.expires_at,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError> {
        let user_id = self.ledger.validate(refresh_token).await?;

        self.authenticator
            .issue_access_token(user_id)
            .map_err(|e| UserError::TokenIssuance(e.to_string()))
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), UserError> {
        self.ledger.revoke(refresh_token).await?;
        Ok(())
    }
}
