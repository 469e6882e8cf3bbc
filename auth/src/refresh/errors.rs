use thiserror::Error;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}
