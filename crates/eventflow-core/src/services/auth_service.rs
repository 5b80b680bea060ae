// ============================================================================
// EventFlow Core - Authentication Service
// File: crates/eventflow-core/src/services/auth_service.rs
// ============================================================================
//! Registration and login flows issuing bearer access tokens

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use eventflow_security::jwt::JwtService;
use eventflow_security::password::PasswordService;
use eventflow_shared::utils::mask_email;

use crate::domain::{ProfileUpdate, User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Fields accepted at registration. `email`, `password`, and `full_name`
/// are required; `role` defaults to vendor.
#[derive(Debug, Clone, Default)]
pub struct RegisterDraft {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub business_type: Option<String>,
}

/// Profile update; `password`, when present and non-empty, is re-hashed.
#[derive(Debug, Clone, Default)]
pub struct ProfileChange {
    pub full_name: Option<String>,
    pub phone: Option<Option<String>>,
    pub company_name: Option<Option<String>>,
    pub business_type: Option<Option<String>>,
    pub password: Option<String>,
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub access_token: String,
}

pub struct AuthService<R: UserRepository> {
    user_repo: Arc<R>,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repo: Arc<R>, jwt: JwtService) -> Self {
        Self { user_repo, jwt }
    }

    /// Register a new user (vendor or admin) and issue an access token.
    pub async fn register(&self, draft: RegisterDraft) -> Result<AuthResult, DomainError> {
        let email = draft.email.ok_or(DomainError::MissingField("email"))?;
        let password = draft.password.ok_or(DomainError::MissingField("password"))?;
        let full_name = draft
            .full_name
            .ok_or(DomainError::MissingField("full_name"))?;

        info!("Registration attempt for {}", mask_email(&email));

        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("Registration failed: email already registered");
            return Err(DomainError::EmailAlreadyRegistered);
        }

        let role = match draft.role.as_deref() {
            None => UserRole::Vendor,
            Some(raw) => UserRole::from_str(raw).ok_or(DomainError::InvalidRole)?,
        };

        let password_hash = PasswordService::hash(&password)
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?;

        let user = User::new(
            email,
            password_hash,
            full_name,
            role,
            draft.phone,
            draft.company_name,
            draft.business_type,
        )
        .map_err(|e| DomainError::Validation(e.to_string()))?;

        let created = self.user_repo.create(&user).await?;
        let access_token = self.issue_token(&created.id)?;

        info!("Registration successful for {}", mask_email(&created.email));
        Ok(AuthResult {
            user: created,
            access_token,
        })
    }

    /// Login with email and password. An optional role hint must match the
    /// stored role, so a vendor credential cannot be used on the admin
    /// login form.
    pub async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
        role_hint: Option<String>,
    ) -> Result<AuthResult, DomainError> {
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or(DomainError::CredentialsRequired)?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(DomainError::CredentialsRequired)?;

        info!("Login attempt for {}", mask_email(&email));

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email {}", mask_email(&email));
                DomainError::InvalidCredentials
            })?;

        let password_valid = PasswordService::verify(&password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        if !user.is_active {
            warn!("Login failed: account deactivated {}", mask_email(&email));
            return Err(DomainError::AccountDeactivated);
        }

        if let Some(role) = role_hint {
            if user.role.as_str() != role {
                warn!("Login failed: role mismatch for {}", mask_email(&email));
                return Err(DomainError::RoleMismatch(role));
            }
        }

        let access_token = self.issue_token(&user.id)?;

        info!("Login successful for {}", mask_email(&email));
        Ok(AuthResult { user, access_token })
    }

    pub async fn current_user(&self, user_id: &Uuid) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    pub async fn update_profile(
        &self,
        user_id: &Uuid,
        change: ProfileChange,
    ) -> Result<User, DomainError> {
        let mut user = self.current_user(user_id).await?;

        let password_hash = match change.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(
                PasswordService::hash(&password)
                    .map_err(|e| DomainError::PasswordHash(e.to_string()))?,
            ),
            None => None,
        };

        user.apply_profile(ProfileUpdate {
            full_name: change.full_name,
            phone: change.phone,
            company_name: change.company_name,
            business_type: change.business_type,
            password_hash,
        });

        self.user_repo.update(&user).await
    }

    fn issue_token(&self, user_id: &Uuid) -> Result<String, DomainError> {
        self.jwt
            .generate_access_token(user_id)
            .map_err(|e| DomainError::TokenGeneration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo), JwtService::new("test-secret".into(), 3600))
    }

    fn stored_user(password: &str, role: UserRole) -> User {
        User::new(
            "vendor1@example.com".into(),
            PasswordService::hash(password).unwrap(),
            "John Smith".into(),
            role,
            None,
            None,
            None,
        )
        .unwrap()
    }

    fn register_draft() -> RegisterDraft {
        RegisterDraft {
            email: Some("vendor1@example.com".into()),
            password: Some("vendor123".into()),
            full_name: Some("John Smith".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        let existing = stored_user("vendor123", UserRole::Vendor);
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let err = service(repo).register(register_draft()).await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyRegistered));
    }

    #[tokio::test]
    async fn register_rejects_unknown_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let mut draft = register_draft();
        draft.role = Some("superuser".into());

        let err = service(repo).register(draft).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRole));
    }

    #[tokio::test]
    async fn register_defaults_role_to_vendor_and_issues_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|user| Ok(user.clone()));

        let result = service(repo).register(register_draft()).await.unwrap();
        assert_eq!(result.user.role, UserRole::Vendor);
        assert!(!result.access_token.is_empty());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let mut repo = MockUserRepository::new();
        let user = stored_user("vendor123", UserRole::Vendor);
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo)
            .login(
                Some("vendor1@example.com".into()),
                Some("wrong-password".into()),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_deactivated_account() {
        let mut repo = MockUserRepository::new();
        let mut user = stored_user("vendor123", UserRole::Vendor);
        user.is_active = false;
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo)
            .login(
                Some("vendor1@example.com".into()),
                Some("vendor123".into()),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AccountDeactivated));
    }

    #[tokio::test]
    async fn login_rejects_role_hint_mismatch() {
        let mut repo = MockUserRepository::new();
        let user = stored_user("vendor123", UserRole::Vendor);
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo)
            .login(
                Some("vendor1@example.com".into()),
                Some("vendor123".into()),
                Some("admin".into()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoleMismatch(_)));
    }

    #[tokio::test]
    async fn login_requires_credentials() {
        let repo = MockUserRepository::new();
        let err = service(repo)
            .login(Some("vendor1@example.com".into()), Some(String::new()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CredentialsRequired));
    }

    #[tokio::test]
    async fn update_profile_rehashes_password() {
        let mut repo = MockUserRepository::new();
        let user = stored_user("vendor123", UserRole::Vendor);
        let old_hash = user.password_hash.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update().returning(|user| Ok(user.clone()));

        let updated = service(repo)
            .update_profile(
                &Uuid::new_v4(),
                ProfileChange {
                    password: Some("new-password".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_ne!(updated.password_hash, old_hash);
        assert!(PasswordService::verify("new-password", &updated.password_hash).unwrap());
    }
}
