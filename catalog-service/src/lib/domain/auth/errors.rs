use thiserror::Error;

/// Rejections produced by the auth gate, one per step of its state machine.
///
/// Messages stay generic: they are shown to the client as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Malformed credential. Expected: Bearer <token>")]
    MalformedCredential,

    #[error("Invalid token")]
    InvalidSignature,

    #[error("Token has expired")]
    ExpiredCredential,

    /// Token verified but its subject is not a user id. Points at an
    /// issuer/verifier mismatch rather than a client mistake.
    #[error("Token subject is not a valid user id: {0}")]
    MalformedSubject(String),

    #[error("Unable to resolve role: {0}")]
    RoleLookupFailure(String),
}

/// Refusal from the resource authorizer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Not allowed to modify a resource owned by another user")]
    OwnershipDenied,
}

/// Refresh token ledger failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token has expired")]
    Expired,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Refresh token persistence failed: {0}")]
    PersistenceFailure(String),
}
