//! Vendor account management (admin surface)

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct UserService<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    pub async fn list_vendors(&self) -> Result<Vec<User>, DomainError> {
        self.users.list_vendors().await
    }

    pub async fn get_vendor(&self, vendor_id: &Uuid) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_id(vendor_id)
            .await?
            .ok_or(DomainError::VendorNotFound)?;
        if user.role != UserRole::Vendor {
            return Err(DomainError::VendorNotFound);
        }
        Ok(user)
    }

    /// Flip a vendor account between active and deactivated. Deactivation
    /// only blocks new logins; existing tokens expire on their own.
    pub async fn toggle_vendor_status(&self, vendor_id: &Uuid) -> Result<User, DomainError> {
        let mut vendor = self.get_vendor(vendor_id).await?;
        vendor.toggle_active();
        let updated = self.users.update(&vendor).await?;

        info!(
            vendor_id = %updated.id,
            is_active = updated.is_active,
            "Vendor status toggled"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn vendor() -> User {
        User::new(
            "vendor2@example.com".into(),
            "hash".into(),
            "Sarah Johnson".into(),
            UserRole::Vendor,
            None,
            Some("Artisan Crafts".into()),
            None,
        )
        .unwrap()
    }

    fn admin() -> User {
        User::new(
            "admin@eventflow.com".into(),
            "hash".into(),
            "System Administrator".into(),
            UserRole::Admin,
            None,
            None,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn get_vendor_rejects_admin_accounts() {
        let mut repo = MockUserRepository::new();
        let user = admin();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let err = UserService::new(Arc::new(repo))
            .get_vendor(&Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::VendorNotFound));
    }

    #[tokio::test]
    async fn toggle_flips_active_flag() {
        let mut repo = MockUserRepository::new();
        let user = vendor();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update().returning(|user| Ok(user.clone()));

        let service = UserService::new(Arc::new(repo));
        let toggled = service.toggle_vendor_status(&Uuid::new_v4()).await.unwrap();
        assert!(!toggled.is_active);
    }
}
