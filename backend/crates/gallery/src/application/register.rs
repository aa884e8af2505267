//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AppConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    about::About, avatar_url::AvatarUrl, email::Email, user_name::UserName,
};
use crate::error::{GalleryError, GalleryResult};

/// Register input
pub struct RegisterInput {
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AppConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AppConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Validate, hash, persist. Returns the stored user (hash-free).
    ///
    /// All constraint violations are collected and reported together.
    pub async fn execute(&self, input: RegisterInput) -> GalleryResult<User> {
        let mut problems: Vec<String> = Vec::new();

        let email = match input.email.as_deref() {
            None => {
                problems.push("email is required".to_string());
                None
            }
            Some(raw) => collect(Email::new(raw), &mut problems),
        };

        let password = match input.password {
            None => {
                problems.push("password is required".to_string());
                None
            }
            Some(raw) => match ClearTextPassword::new(raw) {
                Ok(p) => Some(p),
                Err(e) => {
                    problems.push(e.to_string());
                    None
                }
            },
        };

        // Optional fields: validated when present, defaulted when absent
        let name = match input.name {
            None => None,
            Some(raw) => collect(UserName::new(raw), &mut problems),
        };
        let about = match input.about {
            None => None,
            Some(raw) => collect(About::new(raw), &mut problems),
        };
        let avatar_url = match input.avatar_url {
            None => None,
            Some(raw) => collect(AvatarUrl::new(raw), &mut problems),
        };

        if !problems.is_empty() {
            return Err(GalleryError::Validation(problems));
        }

        // Both are Some here: a missing field pushed a problem above
        let (email, password) = match (email, password) {
            (Some(e), Some(p)) => (e, p),
            _ => return Err(GalleryError::Internal("validated input missing".to_string())),
        };

        let password_hash = password.hash(self.config.pepper())?;

        let user = User::new(email, name, about, avatar_url);

        self.user_repo.create(&user, &password_hash).await?;

        tracing::info!(user_id = %user.user_id, "user registered");

        Ok(user)
    }
}

/// Push the constraint message on failure, pass the value through on success
fn collect<T>(result: kernel::error::app_error::AppResult<T>, problems: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            problems.push(e.message().to_string());
            None
        }
    }
}
