use std::sync::Arc;

use auth::JwtError;
use auth::JwtHandler;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::ports::RoleLookup;
use crate::domain::user::models::UserId;

const BEARER_SCHEME: &str = "Bearer";

/// Turns an `Authorization` header into an [`Identity`].
///
/// The signing key and the role source are injected, nothing is read from
/// globals. The role is fetched from the store on every call so a demotion
/// takes effect on the very next request.
pub struct AuthGate<RL>
where
    RL: RoleLookup,
{
    jwt_handler: JwtHandler,
    role_lookup: Arc<RL>,
}

impl<RL> AuthGate<RL>
where
    RL: RoleLookup,
{
    pub fn new(jwt_handler: JwtHandler, role_lookup: Arc<RL>) -> Self {
        Self {
            jwt_handler,
            role_lookup,
        }
    }

    /// Run the gate against the raw header value, `None` if the header is absent.
    ///
    /// Steps stop at the first failure:
    /// 1. header present
    /// 2. `Bearer <token>` shape
    /// 3. signature and structure
    /// 4. `exp` present and in the future
    /// 5. subject is a user id
    /// 6. role resolvable
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, AuthError> {
        self.authenticate_at(authorization, Utc::now().timestamp())
            .await
    }

    pub async fn authenticate_at(
        &self,
        authorization: Option<&str>,
        current_timestamp: i64,
    ) -> Result<Identity, AuthError> {
        let header = authorization.ok_or(AuthError::MissingCredential)?;
        let token = parse_bearer(header)?;

        let claims = self
            .jwt_handler
            .decode_at(token, current_timestamp)
            .map_err(|e| match e {
                JwtError::TokenExpired => AuthError::ExpiredCredential,
                JwtError::MissingClaim(_) => AuthError::MalformedCredential,
                JwtError::InvalidSignature
                | JwtError::InvalidToken(_)
                | JwtError::EncodingFailed(_) => AuthError::InvalidSignature,
            })?;

        let subject = claims.sub.unwrap_or_default();
        let user_id = UserId::from_string(&subject)
            .map_err(|e| AuthError::MalformedSubject(e.to_string()))?;

        let role = self
            .role_lookup
            .lookup_role(&user_id)
            .await
            .map_err(|e| AuthError::RoleLookupFailure(e.to_string()))?
            .ok_or_else(|| AuthError::RoleLookupFailure(format!("no user {}", user_id)))?;

        Ok(Identity::new(user_id, role, token))
    }
}

/// Split `Bearer <token>` into its token.
///
/// Exactly two space separated parts, the first being the literal scheme.
fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::Claims;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::Role;

    const SECRET: &[u8] = b"gate-test-secret-at-least-32-bytes!!";

    mock! {
        pub TestRoleLookup {}

        #[async_trait]
        impl RoleLookup for TestRoleLookup {
            async fn lookup_role(&self, user_id: &UserId) -> Result<Option<Role>, UserError>;
        }
    }

    fn gate(lookup: MockTestRoleLookup) -> AuthGate<MockTestRoleLookup> {
        AuthGate::new(JwtHandler::new(SECRET), Arc::new(lookup))
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    fn no_lookup() -> MockTestRoleLookup {
        let mut lookup = MockTestRoleLookup::new();
        lookup.expect_lookup_role().times(0);
        lookup
    }

    #[tokio::test]
    async fn test_valid_token_yields_identity_with_current_role() {
        let user_id = UserId::new();
        let mut lookup = MockTestRoleLookup::new();
        lookup
            .expect_lookup_role()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(Some(Role::Admin)));

        let token = JwtHandler::new(SECRET)
            .issue(user_id, Duration::hours(1))
            .unwrap();
        let identity = gate(lookup)
            .authenticate(Some(bearer(&token).as_str()))
            .await
            .expect("Gate rejected a valid token");

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.raw_token, token);
    }

    #[tokio::test]
    async fn test_role_is_looked_up_on_every_request() {
        let user_id = UserId::new();
        let mut lookup = MockTestRoleLookup::new();
        let mut seq = mockall::Sequence::new();
        lookup
            .expect_lookup_role()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(Role::Admin)));
        lookup
            .expect_lookup_role()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(Role::User)));

        let header = bearer(
            &JwtHandler::new(SECRET)
                .issue(user_id, Duration::hours(1))
                .unwrap(),
        );
        let gate = gate(lookup);

        assert_eq!(gate.authenticate(Some(header.as_str())).await.unwrap().role, Role::Admin);
        assert_eq!(gate.authenticate(Some(header.as_str())).await.unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let result = gate(no_lookup()).authenticate(None).await;
        assert_eq!(result, Err(AuthError::MissingCredential));
    }

    #[tokio::test]
    async fn test_malformed_headers() {
        let gate = gate(no_lookup());

        for header in [
            "",
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer abc def",
            "Bearer  abc",
            "Token abc",
        ] {
            assert_eq!(
                gate.authenticate(Some(header)).await,
                Err(AuthError::MalformedCredential),
                "header {:?}",
                header
            );
        }
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let token = JwtHandler::new(b"some-other-secret-of-at-least-32-bytes")
            .issue(UserId::new(), Duration::hours(1))
            .unwrap();

        let result = gate(no_lookup()).authenticate(Some(bearer(&token).as_str())).await;
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let result = gate(no_lookup())
            .authenticate(Some("Bearer not.a.jwt"))
            .await;
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let claims = Claims::new()
            .with_subject(UserId::new())
            .with_issued_at(1_000)
            .with_expiration(4_600);
        let token = JwtHandler::new(SECRET).encode(&claims).unwrap();
        let gate = gate(no_lookup());

        assert_eq!(
            gate.authenticate_at(Some(bearer(&token).as_str()), 4_600).await,
            Err(AuthError::ExpiredCredential)
        );
        assert_eq!(
            gate.authenticate(Some(bearer(&token).as_str())).await,
            Err(AuthError::ExpiredCredential)
        );
    }

    #[tokio::test]
    async fn test_token_without_expiry_is_malformed() {
        let token = JwtHandler::new(SECRET)
            .encode(&Claims::new().with_subject(UserId::new()))
            .unwrap();

        let result = gate(no_lookup()).authenticate(Some(bearer(&token).as_str())).await;
        assert_eq!(result, Err(AuthError::MalformedCredential));
    }

    #[tokio::test]
    async fn test_subject_not_a_user_id() {
        let token = JwtHandler::new(SECRET)
            .issue("alice", Duration::hours(1))
            .unwrap();

        let result = gate(no_lookup()).authenticate(Some(bearer(&token).as_str())).await;
        assert!(matches!(result, Err(AuthError::MalformedSubject(_))));
    }

    #[tokio::test]
    async fn test_missing_subject() {
        let claims = Claims::new().with_expiration(Utc::now().timestamp() + 3600);
        let token = JwtHandler::new(SECRET).encode(&claims).unwrap();

        let result = gate(no_lookup()).authenticate(Some(bearer(&token).as_str())).await;
        assert!(matches!(result, Err(AuthError::MalformedSubject(_))));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let mut lookup = MockTestRoleLookup::new();
        lookup.expect_lookup_role().times(1).returning(|_| Ok(None));

        let token = JwtHandler::new(SECRET)
            .issue(UserId::new(), Duration::hours(1))
            .unwrap();
        let result = gate(lookup).authenticate(Some(bearer(&token).as_str())).await;

        assert!(matches!(result, Err(AuthError::RoleLookupFailure(_))));
    }

    #[tokio::test]
    async fn test_role_store_failure() {
        let mut lookup = MockTestRoleLookup::new();
        lookup
            .expect_lookup_role()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let token = JwtHandler::new(SECRET)
            .issue(UserId::new(), Duration::hours(1))
            .unwrap();
        let result = gate(lookup).authenticate(Some(bearer(&token).as_str())).await;

        assert!(matches!(result, Err(AuthError::RoleLookupFailure(_))));
    }
}
