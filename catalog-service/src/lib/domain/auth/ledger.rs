use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::RefreshTokenError;
use crate::domain::auth::models::RefreshToken;
use crate::domain::auth::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

/// Server-side lifecycle of refresh tokens: create, validate, revoke.
pub struct RefreshTokenLedger<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
}

impl<RR> RefreshTokenLedger<RR>
where
    RR: RefreshTokenRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    /// Record a newly issued refresh token.
    ///
    /// # Errors
    /// * `PersistenceFailure` - Database operation failed
    pub async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, RefreshTokenError> {
        let record = RefreshToken::new(token.to_string(), user_id, Utc::now(), expires_at);
        let stored = self.repository.create(&record).await?;

        tracing::debug!(user_id = %user_id, expires_at = %stored.expires_at, "Refresh token recorded");
        Ok(stored)
    }

    /// Resolve the owner of a usable refresh token.
    ///
    /// # Errors
    /// * `NotFound` - Token was never issued
    /// * `Revoked` - Token was revoked
    /// * `Expired` - Token is past its expiry
    /// * `PersistenceFailure` - Database operation failed
    pub async fn validate(&self, token: &str) -> Result<UserId, RefreshTokenError> {
        self.validate_at(token, Utc::now()).await
    }

    pub async fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<UserId, RefreshTokenError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or(RefreshTokenError::NotFound)?
            .check_usable_at(now)
    }

    /// Revoke a token. Revoking an already revoked token changes nothing.
    ///
    /// # Errors
    /// * `NotFound` - Token was never issued
    /// * `PersistenceFailure` - Database operation failed
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        let record = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or(RefreshTokenError::NotFound)?;

        if record.revoked_at.is_some() {
            return Ok(());
        }

        if self.repository.revoke(token, Utc::now()).await? {
            tracing::info!(user_id = %record.user_id, "Refresh token revoked");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;

    use super::*;

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn create(&self, token: &RefreshToken) -> Result<RefreshToken, RefreshTokenError>;
            async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;
            async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, RefreshTokenError>;
        }
    }

    /// Minimal store with the same conditional-update semantics as Postgres.
    #[derive(Default)]
    struct InMemoryRefreshTokens {
        records: Mutex<Vec<RefreshToken>>,
    }

    #[async_trait]
    impl RefreshTokenRepository for InMemoryRefreshTokens {
        async fn create(&self, token: &RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
            self.records.lock().unwrap().push(token.clone());
            Ok(token.clone())
        }

        async fn find_by_token(
            &self,
            token: &str,
        ) -> Result<Option<RefreshToken>, RefreshTokenError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.token == token)
                .cloned())
        }

        async fn revoke(
            &self,
            token: &str,
            revoked_at: DateTime<Utc>,
        ) -> Result<bool, RefreshTokenError> {
            let mut records = self.records.lock().unwrap();
            match records
                .iter_mut()
                .find(|r| r.token == token && r.revoked_at.is_none())
            {
                Some(record) => {
                    record.revoked_at = Some(revoked_at);
                    record.updated_at = revoked_at;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    #[tokio::test]
    async fn test_validate_after_create_returns_owner() {
        let ledger = RefreshTokenLedger::new(Arc::new(InMemoryRefreshTokens::default()));
        let user_id = UserId::new();

        let record = ledger
            .create("r1", user_id, Utc::now() + Duration::days(30))
            .await
            .expect("Failed to create refresh token");

        assert!(record.revoked_at.is_none());
        assert_eq!(ledger.validate("r1").await, Ok(user_id));
    }

    #[tokio::test]
    async fn test_validate_unknown_token() {
        let ledger = RefreshTokenLedger::new(Arc::new(InMemoryRefreshTokens::default()));

        assert_eq!(
            ledger.validate("missing").await,
            Err(RefreshTokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_validate_expired_token() {
        let ledger = RefreshTokenLedger::new(Arc::new(InMemoryRefreshTokens::default()));
        let expires_at = Utc::now() + Duration::days(30);
        ledger.create("r1", UserId::new(), expires_at).await.unwrap();

        assert_eq!(
            ledger.validate_at("r1", expires_at + Duration::seconds(1)).await,
            Err(RefreshTokenError::Expired)
        );
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let repository = Arc::new(InMemoryRefreshTokens::default());
        let ledger = RefreshTokenLedger::new(Arc::clone(&repository));
        ledger
            .create("r1", UserId::new(), Utc::now() + Duration::days(30))
            .await
            .unwrap();

        ledger.revoke("r1").await.expect("First revoke failed");
        let after_first = repository.find_by_token("r1").await.unwrap();

        ledger.revoke("r1").await.expect("Second revoke failed");
        let after_second = repository.find_by_token("r1").await.unwrap();

        assert!(after_first.as_ref().unwrap().revoked_at.is_some());
        assert_eq!(after_first, after_second);
        assert_eq!(ledger.validate("r1").await, Err(RefreshTokenError::Revoked));
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let ledger = RefreshTokenLedger::new(Arc::new(InMemoryRefreshTokens::default()));

        assert_eq!(ledger.revoke("missing").await, Err(RefreshTokenError::NotFound));
    }

    #[tokio::test]
    async fn test_revoke_skips_store_update_when_already_revoked() {
        let mut repository = MockTestRefreshTokenRepository::new();
        let now = Utc::now();
        let mut record = RefreshToken::new(
            "r1".to_string(),
            UserId::new(),
            now,
            now + Duration::days(30),
        );
        record.revoked_at = Some(now);

        repository
            .expect_find_by_token()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository.expect_revoke().times(0);

        let ledger = RefreshTokenLedger::new(Arc::new(repository));
        assert!(ledger.revoke("r1").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_surfaces_persistence_failure() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(RefreshTokenError::PersistenceFailure("down".to_string())));

        let ledger = RefreshTokenLedger::new(Arc::new(repository));
        let result = ledger
            .create("r1", UserId::new(), Utc::now() + Duration::days(30))
            .await;

        assert!(matches!(
            result,
            Err(RefreshTokenError::PersistenceFailure(_))
        ));
    }
}
