//! Users and roles
//!
//! Identity and authentication live outside the engine; the engine
//! only consumes role facts through [`UserDirectory`]. Ownership
//! facts come from `Homestay::owner_id` and `Booking::guest_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::DomainResult;

/// Role granted to a user, as reported by the identity directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Guest,
    Host,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::Host => "Host",
            Self::Admin => "Admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Host" => Self::Host,
            "Admin" => Self::Admin,
            _ => Self::Guest,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal user record the engine needs.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Read-only directory of users and their roles.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [UserRole::Guest, UserRole::Host, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_guest() {
        assert_eq!(UserRole::from_str("Superuser"), UserRole::Guest);
    }
}
