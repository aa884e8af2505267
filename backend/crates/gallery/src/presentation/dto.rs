//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{card::CardDetails, user::User};

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Sign up request
///
/// Presence of `email`/`password` is validated by the use case so that
/// all constraint messages can be reported together.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in response (the token itself travels in the cookie)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
}

// ============================================================================
// Users
// ============================================================================

/// Public profile projection
///
/// There is no password-hash field on this type, so no serialization
/// path can leak it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub about: String,
    pub avatar_url: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            name: user.name.as_str().to_string(),
            about: user.about.as_str().to_string(),
            avatar_url: user.avatar_url.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

/// Profile update request (both fields required together)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub about: Option<String>,
}

/// Avatar update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvatarRequest {
    pub avatar_url: Option<String>,
}

// ============================================================================
// Cards
// ============================================================================

/// Card creation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub name: Option<String>,
    pub link: Option<String>,
}

/// Card response with owner and likes resolved to public profiles
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub link: String,
    pub owner: UserResponse,
    pub likes: Vec<UserResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<CardDetails> for CardResponse {
    fn from(details: CardDetails) -> Self {
        Self {
            id: details.card.card_id.into_uuid(),
            name: details.card.name.as_str().to_string(),
            link: details.card.link.as_str().to_string(),
            owner: UserResponse::from(details.owner),
            likes: details.likes.into_iter().map(UserResponse::from).collect(),
            created_at: details.card.created_at,
        }
    }
}

/// Deletion confirmation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResponse {
    pub message: String,
}
