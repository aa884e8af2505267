//! Login Use Case
//!
//! Authenticates a user and issues a session token.
//!
//! Every authentication failure past input validation maps to the same
//! `InvalidCredentials` error, so a caller cannot tell an unknown email
//! from a wrong password.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token;

use crate::application::config::AppConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{GalleryError, GalleryResult};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed session token for the cookie
    pub token: String,
    /// The authenticated user's profile
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AppConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AppConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> GalleryResult<LoginOutput> {
        let mut problems: Vec<String> = Vec::new();
        if input.email.as_deref().is_none_or(str::is_empty) {
            problems.push("email is required".to_string());
        }
        if input.password.as_deref().is_none_or(str::is_empty) {
            problems.push("password is required".to_string());
        }
        if !problems.is_empty() {
            return Err(GalleryError::Validation(problems));
        }

        let email = input.email.unwrap_or_default();
        let raw_password = input.password.unwrap_or_default();

        // From here on every failure is the same error
        let password = ClearTextPassword::new(raw_password)
            .map_err(|_| GalleryError::InvalidCredentials)?;

        let (user, password_hash) = self
            .user_repo
            .find_by_email_with_hash(email.trim())
            .await?
            .ok_or(GalleryError::InvalidCredentials)?;

        if !password_hash.verify(&password, self.config.pepper()) {
            return Err(GalleryError::InvalidCredentials);
        }

        let token = token::issue(
            user.user_id.as_uuid(),
            self.config.token_ttl,
            &self.config.token_secret,
        );

        tracing::info!(user_id = %user.user_id, "user signed in");

        Ok(LoginOutput { token, user })
    }
}
