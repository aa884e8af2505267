//! Profile Use Case
//!
//! Reads and owner-scoped updates of user profiles.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{about::About, avatar_url::AvatarUrl, user_name::UserName};
use crate::error::{GalleryError, GalleryResult};

/// Profile update input (both fields required together)
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub about: Option<String>,
}

/// Avatar update input
pub struct UpdateAvatarInput {
    pub avatar_url: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// The authenticated caller's own profile
    ///
    /// The identity comes from a verified token, but the user may have
    /// been removed out-of-band since issuance.
    pub async fn get_self(&self, user_id: &UserId) -> GalleryResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(GalleryError::UserNotFound)
    }

    /// Any user's public profile
    pub async fn get_by_id(&self, user_id: &UserId) -> GalleryResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(GalleryError::UserNotFound)
    }

    /// All profiles
    pub async fn list(&self) -> GalleryResult<Vec<User>> {
        self.user_repo.list().await
    }

    /// Update name and about together
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        input: UpdateProfileInput,
    ) -> GalleryResult<User> {
        let mut problems: Vec<String> = Vec::new();

        let name = match input.name {
            None => {
                problems.push("name is required".to_string());
                None
            }
            Some(raw) => match UserName::new(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    problems.push(e.message().to_string());
                    None
                }
            },
        };

        let about = match input.about {
            None => {
                problems.push("about is required".to_string());
                None
            }
            Some(raw) => match About::new(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    problems.push(e.message().to_string());
                    None
                }
            },
        };

        let (Some(name), Some(about)) = (name, about) else {
            return Err(GalleryError::Validation(problems));
        };

        self.user_repo
            .update_profile(user_id, &name, &about)
            .await?
            .ok_or(GalleryError::UserNotFound)
    }

    /// Update the avatar URL
    pub async fn update_avatar(
        &self,
        user_id: &UserId,
        input: UpdateAvatarInput,
    ) -> GalleryResult<User> {
        let avatar_url = match input.avatar_url {
            None => {
                return Err(GalleryError::Validation(vec![
                    "avatarUrl is required".to_string(),
                ]));
            }
            Some(raw) => AvatarUrl::new(raw)
                .map_err(|e| GalleryError::Validation(vec![e.message().to_string()]))?,
        };

        self.user_repo
            .update_avatar(user_id, &avatar_url)
            .await?
            .ok_or(GalleryError::UserNotFound)
    }
}
