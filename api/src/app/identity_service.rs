//! Identity service
//!
//! Handles sign-up, sign-in and user lookups.

use std::sync::Arc;

use crate::domain::entities::{SignIn, SignUp, User, UserId};
use crate::domain::ports::{
    ChangeSet, PasswordHasher, TokenClaims, TokenService, UnitOfWork, UserRepository,
};
use crate::error::{AppError, DomainError};

/// Service for user accounts and credentials
pub struct IdentityService<UR, UW, PH, TS>
where
    UR: UserRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
    PH: PasswordHasher + ?Sized,
    TS: TokenService + ?Sized,
{
    users: Arc<UR>,
    unit_of_work: Arc<UW>,
    hasher: Arc<PH>,
    tokens: Arc<TS>,
}

impl<UR, UW, PH, TS> IdentityService<UR, UW, PH, TS>
where
    UR: UserRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
    PH: PasswordHasher + ?Sized,
    TS: TokenService + ?Sized,
{
    pub fn new(users: Arc<UR>, unit_of_work: Arc<UW>, hasher: Arc<PH>, tokens: Arc<TS>) -> Self {
        Self {
            users,
            unit_of_work,
            hasher,
            tokens,
        }
    }

    /// Register a new user
    ///
    /// Fails with `AlreadyExists` when the username is taken. A failed commit
    /// surfaces as an internal error naming the cause.
    pub async fn sign_up(&self, command: SignUp) -> Result<User, AppError> {
        command.validate()?;

        if self.users.exists_by_username(&command.username).await? {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Username {} is already taken",
                command.username
            ))));
        }

        let password_hash = self.hasher.hash(&command.password)?;
        let id = self.users.next_id().await?;
        let user = User::new(id, &command.username, password_hash, command.role);

        let mut changes = ChangeSet::new();
        changes.save(user.clone());
        self.unit_of_work.complete(changes).await.map_err(|e| {
            DomainError::Internal(format!("An error occurred while creating the user: {}", e))
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User signed up");
        Ok(user)
    }

    /// Check credentials and issue an access token
    pub async fn sign_in(&self, command: SignIn) -> Result<(User, String), AppError> {
        let user = self
            .users
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", command.username)))?;

        if !self.hasher.verify(&command.password, &user.password_hash) {
            tracing::debug!(username = %user.username, "Rejected sign-in");
            return Err(AppError::Domain(DomainError::Unauthorized(
                "Invalid password".to_string(),
            )));
        }

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_id(id).await?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_username(username).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.list().await?)
    }

    /// Validate a previously issued token
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        Ok(self.tokens.verify(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::security::{HmacPasswordHasher, HmacTokenService};
    use crate::domain::entities::Role;
    use crate::domain::ports::{MockPasswordHasher, MockTokenService};
    use crate::test_utils::sign_up;

    type Service = IdentityService<InMemoryStore, InMemoryStore, dyn PasswordHasher, dyn TokenService>;

    fn service_on(store: Arc<InMemoryStore>) -> Service {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(HmacPasswordHasher::new());
        let tokens: Arc<dyn TokenService> = Arc::new(HmacTokenService::new("test-secret", 60));
        IdentityService::new(store.clone(), store, hasher, tokens)
    }

    fn service() -> Service {
        service_on(Arc::new(InMemoryStore::new()))
    }

    fn credentials(username: &str, password: &str) -> SignIn {
        SignIn {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_find_by_username() {
        let service = service();

        let user = service.sign_up(sign_up("ana")).await.unwrap();
        let found = service.get_user_by_username("ana").await.unwrap().unwrap();

        assert_eq!(found, user);
        assert_eq!(found.role, Role::Producer);
        assert_ne!(found.password_hash, "s3cret-pass");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let service = service();
        service.sign_up(sign_up("ana")).await.unwrap();

        let result = service.sign_up(sign_up("ana")).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::AlreadyExists(_)))
        ));
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_sign_up_is_rejected_before_hashing() {
        let store = Arc::new(InMemoryStore::new());
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();
        let tokens: Arc<dyn TokenService> = Arc::new(MockTokenService::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(hasher);
        let service = IdentityService::new(store.clone(), store, hasher, tokens);

        let mut command = sign_up("ana");
        command.password = String::new();

        assert!(matches!(
            service.sign_up(command).await,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn failed_commit_is_reported_as_internal() {
        let service = service_on(Arc::new(InMemoryStore::new().failing_commits()));

        let err = service.sign_up(sign_up("ana")).await.unwrap_err();

        match err {
            AppError::Domain(DomainError::Internal(msg)) => {
                assert!(msg.starts_with("An error occurred while creating the user"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn sign_in_issues_verifiable_token() {
        let service = service();
        let user = service.sign_up(sign_up("ana")).await.unwrap();

        let (signed_in, token) = service
            .sign_in(credentials("ana", "s3cret-pass"))
            .await
            .unwrap();

        assert_eq!(signed_in.id, user.id);
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "ana");
    }

    #[tokio::test]
    async fn wrong_password_never_issues_token() {
        let store = Arc::new(InMemoryStore::new());
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("stored".to_string()));
        hasher.expect_verify().returning(|_, _| false);
        let mut tokens = MockTokenService::new();
        tokens.expect_issue().never();

        let hasher: Arc<dyn PasswordHasher> = Arc::new(hasher);
        let tokens: Arc<dyn TokenService> = Arc::new(tokens);
        let service = IdentityService::new(store.clone(), store, hasher, tokens);
        service.sign_up(sign_up("ana")).await.unwrap();

        let result = service.sign_in(credentials("ana", "nope")).await;

        match result {
            Err(AppError::Domain(DomainError::Unauthorized(msg))) => {
                assert_eq!(msg, "Invalid password")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_user_cannot_sign_in() {
        let service = service();
        let result = service.sign_in(credentials("ghost", "pw")).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn get_user_by_id() {
        let service = service();
        let user = service.sign_up(sign_up("ana")).await.unwrap();

        assert_eq!(service.get_user(&user.id).await.unwrap(), Some(user));
        assert_eq!(service.get_user(&UserId(999)).await.unwrap(), None);
    }
}
