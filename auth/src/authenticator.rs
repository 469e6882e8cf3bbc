use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::generate_refresh_token;
use crate::refresh::RefreshTokenError;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
}

/// Credentials minted by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed, short-lived access token
    pub access_token: String,
    /// Opaque refresh token; the caller is responsible for persisting it
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Refresh token error: {0}")]
    RefreshTokenError(#[from] RefreshTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    /// * `access_token_ttl` - Lifetime of every access token issued
    pub fn new(jwt_secret: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            access_token_ttl,
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint an access/refresh token pair for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest is unusable
    /// * `JwtError` - Access token signing failed
    /// * `RefreshTokenError` - No entropy for the refresh token
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_access_token(subject)?;
        let refresh_token = generate_refresh_token()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Mint an access token without password verification.
    ///
    /// Used by the refresh flow, once the refresh token has been validated.
    pub fn issue_access_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.access_token_ttl)
    }

    /// Validate and decode an access token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key_at_least_32_bytes!", Duration::hours(1))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("my_password", &hash, "user123")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.refresh_token.len(), 64);
        assert!(!result.access_token.contains(&result.refresh_token));

        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, Some("user123".to_string()));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 60 * 60);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_access_token() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_access_token("user123")
            .expect("Failed to issue token");
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.sub, Some("user123".to_string()));
    }

    #[test]
    fn test_secrets_are_isolated() {
        let first = authenticator();
        let second = Authenticator::new(b"another_secret_key_of_32_bytes_!!", Duration::hours(1));

        let token = first.issue_access_token("user123").unwrap();
        assert_eq!(
            second.validate_token(&token),
            Err(JwtError::InvalidSignature)
        );
    }
}
