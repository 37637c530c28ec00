//! Account registration and login.

use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::domain::entities::{Credentials, NewUser, User, UserSession};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{Verification, hash_password_blocking, verify_password_blocking};

/// Message returned for every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Service for registering users and establishing sessions.
///
/// Passwords are stored as salted Argon2id hashes. Legacy cleartext rows are
/// accepted once and re-hashed on the spot.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or password is empty.
    /// Returns [`AppError::Conflict`] if the username is already taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, credentials: Credentials) -> Result<User, AppError> {
        credentials.validate()?;

        let Credentials { username, password } = credentials;
        let password_hash = hash_password_blocking(password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: username.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { details, .. } => {
                    AppError::conflict("Username already exists", details)
                }
                other => other,
            })?;

        tracing::info!(username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies credentials and returns a session bound to the username.
    ///
    /// Unknown users and wrong passwords are deliberately indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, credentials: Credentials) -> Result<UserSession, AppError> {
        let Credentials { username, password } = credentials;

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(%username, "Login for unknown user");
            return Err(invalid_credentials());
        };

        match verify_password_blocking(password.clone(), user.password_hash).await? {
            Verification::Match => {}
            Verification::LegacyMatch => self.upgrade_legacy_password(&username, password).await,
            Verification::Mismatch => {
                tracing::debug!(%username, "Login with wrong password");
                return Err(invalid_credentials());
            }
        }

        tracing::info!(%username, "User logged in");

        Ok(UserSession::for_user(username))
    }

    /// Ends a session. Safe to call on a session that was never authenticated.
    pub fn logout(&self, session: &mut UserSession) {
        if let Some(username) = session.username() {
            tracing::info!(%username, "User logged out");
        }
        session.clear();
    }

    /// Lists all registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn user_count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Replaces a cleartext password with its hash.
    ///
    /// Failure only costs the upgrade; the login itself already succeeded.
    async fn upgrade_legacy_password(&self, username: &str, password: String) {
        let result = match hash_password_blocking(password).await {
            Ok(hash) => self.repository.update_password_hash(username, &hash).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::info!(%username, "Upgraded legacy cleartext password"),
            Err(e) => tracing::warn!(%username, error = %e, "Failed to upgrade legacy password"),
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS, json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::hash_password;

    fn stored_user(username: &str, password: &str) -> User {
        User::new(1, username.to_string(), hash_password(password).unwrap())
    }

    #[tokio::test]
    async fn test_register_success_stores_hash() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.username == "alice"
                    && new_user.password_hash != "pw1"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| Ok(User::new(1, new_user.username, new_user.password_hash)));

        let service = AuthService::new(Arc::new(mock_repo));

        let user = service
            .register(Credentials::new("alice", "pw1"))
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_register_empty_fields() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().times(0);

        let service = AuthService::new(Arc::new(mock_repo));

        let result = service.register(Credentials::new("", "pw1")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = service.register(Credentials::new("alice", "")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo));

        let err = service
            .register(Credentials::new("alice", "pw1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mock_repo = MockUserRepository::new();

        let user = stored_user("alice", "pw1");
        mock_repo
            .expect_find_by_username()
            .withf(|name| name == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo.expect_update_password_hash().times(0);

        let service = AuthService::new(Arc::new(mock_repo));

        let session = service
            .login(Credentials::new("alice", "pw1"))
            .await
            .unwrap();

        assert_eq!(session.username(), Some("alice"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user_are_indistinguishable() {
        let mut mock_repo = MockUserRepository::new();

        let user = stored_user("alice", "pw1");
        mock_repo
            .expect_find_by_username()
            .returning(move |name| {
                if name == "alice" {
                    Ok(Some(user.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = AuthService::new(Arc::new(mock_repo));

        let wrong_password = service
            .login(Credentials::new("alice", "nope"))
            .await
            .unwrap_err();
        let unknown_user = service
            .login(Credentials::new("bob", "pw1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::Unauthorized { .. }));
        assert!(matches!(unknown_user, AppError::Unauthorized { .. }));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_login_upgrades_legacy_cleartext() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(User::new(1, "alice".to_string(), "pw1".to_string()))));

        mock_repo
            .expect_update_password_hash()
            .withf(|name, hash| name == "alice" && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo));

        let session = service
            .login(Credentials::new("alice", "pw1"))
            .await
            .unwrap();

        assert_eq!(session.username(), Some("alice"));
    }

    #[tokio::test]
    async fn test_login_survives_failed_legacy_upgrade() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .returning(|_| Ok(Some(User::new(1, "alice".to_string(), "pw1".to_string()))));
        mock_repo
            .expect_update_password_hash()
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo));

        let result = service.login(Credentials::new("alice", "pw1")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()));

        let mut session = UserSession::for_user("alice");
        service.logout(&mut session);
        assert!(!session.is_authenticated());

        service.logout(&mut session);
        assert_eq!(session, UserSession::anonymous());
    }
}
