use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;

/// Number of random bytes behind every refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token.
///
/// 32 bytes from the operating system CSPRNG, hex encoded. Nothing about the
/// value depends on the access token signing key.
///
/// # Errors
/// * `EntropyUnavailable` - the OS random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}
