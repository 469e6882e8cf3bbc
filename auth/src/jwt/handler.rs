use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs and verifies access tokens with a symmetric key (HS256).
///
/// The key is supplied at construction, so several handlers with different
/// secrets can coexist in one process.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - It must not be reused for anything else (refresh tokens are random,
    ///   not derived from it)
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Mint an access token for `subject` valid for `ttl` from now.
    pub fn issue(&self, subject: impl ToString, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject, ttl))
    }

    /// Verify a token against the current time.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `current_timestamp`.
    ///
    /// Checks run in order and stop at the first failure: signature and
    /// structure, presence of `exp`, then expiry. A forged token therefore
    /// reports `InvalidSignature` even when it is also expired.
    ///
    /// # Errors
    /// * `InvalidSignature` - signed with another key
    /// * `InvalidToken` - not a well-formed HS256 JWT
    /// * `MissingClaim` - no `exp` claim
    /// * `TokenExpired` - `current_timestamp >= exp`
    pub fn decode_at(&self, token: &str, current_timestamp: i64) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below without leeway; presence of exp too.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            })?
            .claims;

        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }

        if claims.is_expired(current_timestamp) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_decode() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue("user123", Duration::hours(1))
            .expect("Failed to issue token");
        let claims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.sub, Some("user123".to_string()));
        assert!(claims.exp.unwrap() > Utc::now().timestamp());
    }

    #[test]
    fn test_decode_garbage() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("user123", Duration::hours(1)).unwrap();

        assert_eq!(verifier.decode(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::new()
            .with_subject("user123")
            .with_issued_at(1_000)
            .with_expiration(2_000);
        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode_at(&token, 2_000), Err(JwtError::TokenExpired));
        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
        assert_eq!(handler.decode_at(&token, 1_999).unwrap(), claims);
    }

    #[test]
    fn test_forged_expired_token_reports_signature() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");
        let token = issuer
            .encode(&Claims::new().with_subject("user123").with_expiration(10))
            .unwrap();

        assert_eq!(verifier.decode(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_token_without_expiration_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.encode(&Claims::new().with_subject("user123")).unwrap();

        assert_eq!(
            handler.decode(&token),
            Err(JwtError::MissingClaim("exp".to_string()))
        );
    }
}
