//! User Entity
//!
//! Core user profile entity containing non-sensitive user data.
//!
//! The password hash is deliberately not a field here: it lives only in
//! the persistence layer and is surfaced through one dedicated
//! credentials query. Every projection built from this entity is
//! therefore hash-free by construction.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    about::About, avatar_url::AvatarUrl, email::Email, user_name::UserName,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email, unique (case-sensitive exact match)
    pub email: Email,
    /// Display name
    pub name: UserName,
    /// Self description
    pub about: About,
    /// Avatar image URL
    pub avatar_url: AvatarUrl,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, applying profile defaults for omitted fields
    pub fn new(
        email: Email,
        name: Option<UserName>,
        about: Option<About>,
        avatar_url: Option<AvatarUrl>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            name: name.unwrap_or_default(),
            about: about.unwrap_or_default(),
            avatar_url: avatar_url.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}
