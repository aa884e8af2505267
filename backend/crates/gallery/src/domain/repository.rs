//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use platform::password::HashedPassword;

use crate::domain::entity::{
    card::{Card, CardDetails},
    user::User,
};
use crate::domain::value_object::{about::About, avatar_url::AvatarUrl, user_name::UserName};
use crate::error::GalleryResult;
use kernel::id::{CardId, UserId};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user together with their credentials.
    ///
    /// Email uniqueness is enforced here (unique index); a duplicate
    /// surfaces as `GalleryError::EmailTaken`.
    async fn create(&self, user: &User, password_hash: &HashedPassword) -> GalleryResult<()>;

    /// Find user by ID (never includes credentials)
    async fn find_by_id(&self, user_id: &UserId) -> GalleryResult<Option<User>>;

    /// Credentials lookup for sign-in: exact email match, hash included.
    ///
    /// This is the only read path that can observe the password hash.
    async fn find_by_email_with_hash(
        &self,
        email: &str,
    ) -> GalleryResult<Option<(User, HashedPassword)>>;

    /// List all users
    async fn list(&self) -> GalleryResult<Vec<User>>;

    /// Update name and about; `None` when the user no longer exists
    async fn update_profile(
        &self,
        user_id: &UserId,
        name: &UserName,
        about: &About,
    ) -> GalleryResult<Option<User>>;

    /// Update avatar; `None` when the user no longer exists
    async fn update_avatar(
        &self,
        user_id: &UserId,
        avatar_url: &AvatarUrl,
    ) -> GalleryResult<Option<User>>;
}

/// Card repository trait
#[trait_variant::make(CardRepository: Send)]
pub trait LocalCardRepository {
    /// Persist a new card
    async fn create(&self, card: &Card) -> GalleryResult<()>;

    /// Find a card by ID (relations unresolved)
    async fn find_by_id(&self, card_id: &CardId) -> GalleryResult<Option<Card>>;

    /// Find a card with owner and likes resolved
    async fn find_details(&self, card_id: &CardId) -> GalleryResult<Option<CardDetails>>;

    /// List all cards with owner and likes resolved
    async fn list(&self) -> GalleryResult<Vec<CardDetails>>;

    /// Delete a card permanently (likes go with it)
    async fn delete(&self, card_id: &CardId) -> GalleryResult<()>;

    /// Add `user_id` to the card's like set.
    ///
    /// Atomic and idempotent: concurrent or repeated calls leave a single
    /// membership. A missing card surfaces as `GalleryError::CardNotFound`.
    async fn add_like(&self, card_id: &CardId, user_id: &UserId) -> GalleryResult<()>;

    /// Remove `user_id` from the card's like set.
    ///
    /// Idempotent: removing an absent membership is a no-op.
    async fn remove_like(&self, card_id: &CardId, user_id: &UserId) -> GalleryResult<()>;
}
