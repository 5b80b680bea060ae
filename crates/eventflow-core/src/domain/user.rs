//! User domain entity (vendors and admins)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use eventflow_shared::types::new_id;

/// Account role. Immutable after creation; no endpoint changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Vendor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Vendor => "vendor",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vendor" => Some(UserRole::Vendor),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Vendor
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(email)]
    pub email: String,
    pub password_hash: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    pub full_name: String,
    pub role: UserRole,

    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub business_type: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update: only provided fields are applied. A field set
/// to `Some(None)` was explicitly sent as null and clears the value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<Option<String>>,
    pub company_name: Option<Option<String>>,
    pub business_type: Option<Option<String>>,
    pub password_hash: Option<String>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        full_name: String,
        role: UserRole,
        phone: Option<String>,
        company_name: Option<String>,
        business_type: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: new_id(),
            email: email.trim().to_string(),
            password_hash,
            full_name: full_name.trim().to_string(),
            role,
            phone,
            company_name,
            business_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(company_name) = update.company_name {
            self.company_name = company_name;
        }
        if let Some(business_type) = update.business_type {
            self.business_type = business_type;
        }
        if let Some(password_hash) = update.password_hash {
            self.password_hash = password_hash;
        }
        self.updated_at = Utc::now();
    }

    pub fn toggle_active(&mut self) {
        self.is_active = !self.is_active;
        self.updated_at = Utc::now();
    }
}
