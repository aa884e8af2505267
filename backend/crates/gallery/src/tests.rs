//! Unit tests for the gallery crate
//!
//! Aggregate behavior runs against an in-memory repository implementing
//! the repository traits, so the use-case contracts (idempotent likes,
//! owner-only deletion, enumeration resistance, uniqueness conflicts)
//! are exercised without a database.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use platform::password::HashedPassword;

use crate::application::config::AppConfig;
use crate::application::{
    CardsUseCase, CreateCardInput, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase, UpdateAvatarInput, UpdateProfileInput,
};
use crate::domain::entity::{
    card::{Card, CardDetails},
    user::User,
};
use crate::domain::repository::{CardRepository, UserRepository};
use crate::domain::value_object::{about::About, avatar_url::AvatarUrl, user_name::UserName};
use crate::error::{GalleryError, GalleryResult};
use kernel::id::{CardId, UserId};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct MemoryState {
    users: Vec<(User, String)>,
    cards: Vec<Card>,
    likes: Vec<(Uuid, Uuid)>,
}

#[derive(Clone, Default)]
struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    fn user_by_id(&self, user_id: &UserId) -> Option<User> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|(u, _)| u.user_id == *user_id)
            .map(|(u, _)| u.clone())
    }
}

impl UserRepository for MemoryRepository {
    async fn create(&self, user: &User, password_hash: &HashedPassword) -> GalleryResult<()> {
        let mut state = self.state.lock().unwrap();

        // Mirrors the unique index on users.email (exact match)
        if state
            .users
            .iter()
            .any(|(u, _)| u.email.as_str() == user.email.as_str())
        {
            return Err(GalleryError::EmailTaken);
        }

        state
            .users
            .push((user.clone(), password_hash.as_phc_string().to_string()));
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> GalleryResult<Option<User>> {
        Ok(self.user_by_id(user_id))
    }

    async fn find_by_email_with_hash(
        &self,
        email: &str,
    ) -> GalleryResult<Option<(User, HashedPassword)>> {
        let state = self.state.lock().unwrap();

        state
            .users
            .iter()
            .find(|(u, _)| u.email.as_str() == email)
            .map(|(u, hash)| {
                let hash = HashedPassword::from_phc_string(hash.clone())
                    .map_err(|e| GalleryError::Internal(e.to_string()))?;
                Ok((u.clone(), hash))
            })
            .transpose()
    }

    async fn list(&self) -> GalleryResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().map(|(u, _)| u.clone()).collect())
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        name: &UserName,
        about: &About,
    ) -> GalleryResult<Option<User>> {
        let mut state = self.state.lock().unwrap();

        Ok(state
            .users
            .iter_mut()
            .find(|(u, _)| u.user_id == *user_id)
            .map(|(u, _)| {
                u.name = name.clone();
                u.about = about.clone();
                u.updated_at = chrono::Utc::now();
                u.clone()
            }))
    }

    async fn update_avatar(
        &self,
        user_id: &UserId,
        avatar_url: &AvatarUrl,
    ) -> GalleryResult<Option<User>> {
        let mut state = self.state.lock().unwrap();

        Ok(state
            .users
            .iter_mut()
            .find(|(u, _)| u.user_id == *user_id)
            .map(|(u, _)| {
                u.avatar_url = avatar_url.clone();
                u.updated_at = chrono::Utc::now();
                u.clone()
            }))
    }
}

impl CardRepository for MemoryRepository {
    async fn create(&self, card: &Card) -> GalleryResult<()> {
        self.state.lock().unwrap().cards.push(card.clone());
        Ok(())
    }

    async fn find_by_id(&self, card_id: &CardId) -> GalleryResult<Option<Card>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .cards
            .iter()
            .find(|c| c.card_id == *card_id)
            .cloned())
    }

    async fn find_details(&self, card_id: &CardId) -> GalleryResult<Option<CardDetails>> {
        let state = self.state.lock().unwrap();

        let Some(card) = state.cards.iter().find(|c| c.card_id == *card_id).cloned() else {
            return Ok(None);
        };

        let owner = state
            .users
            .iter()
            .find(|(u, _)| u.user_id == card.owner_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| GalleryError::Internal("card owner missing".to_string()))?;

        let likes = state
            .likes
            .iter()
            .filter(|(c, _)| *c == *card.card_id.as_uuid())
            .filter_map(|(_, liker)| {
                state
                    .users
                    .iter()
                    .find(|(u, _)| u.user_id.as_uuid() == liker)
                    .map(|(u, _)| u.clone())
            })
            .collect();

        Ok(Some(CardDetails { card, owner, likes }))
    }

    async fn list(&self) -> GalleryResult<Vec<CardDetails>> {
        let ids: Vec<CardId> = {
            let state = self.state.lock().unwrap();
            state.cards.iter().map(|c| c.card_id).collect()
        };

        let mut all = Vec::new();
        for id in ids {
            if let Some(details) = self.find_details(&id).await? {
                all.push(details);
            }
        }
        Ok(all)
    }

    async fn delete(&self, card_id: &CardId) -> GalleryResult<()> {
        let mut state = self.state.lock().unwrap();
        state.cards.retain(|c| c.card_id != *card_id);
        state.likes.retain(|(c, _)| *c != *card_id.as_uuid());
        Ok(())
    }

    async fn add_like(&self, card_id: &CardId, user_id: &UserId) -> GalleryResult<()> {
        let mut state = self.state.lock().unwrap();

        // Mirrors the foreign key from card_likes to cards
        if !state.cards.iter().any(|c| c.card_id == *card_id) {
            return Err(GalleryError::CardNotFound);
        }

        let membership = (*card_id.as_uuid(), *user_id.as_uuid());
        if !state.likes.contains(&membership) {
            state.likes.push(membership);
        }
        Ok(())
    }

    async fn remove_like(&self, card_id: &CardId, user_id: &UserId) -> GalleryResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .likes
            .retain(|(c, u)| !(*c == *card_id.as_uuid() && *u == *user_id.as_uuid()));
        Ok(())
    }
}

// ============================================================================
// Test helpers
// ============================================================================

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig::development())
}

fn register_input(email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: None,
        about: None,
        avatar_url: None,
        email: Some(email.to_string()),
        password: Some(password.to_string()),
    }
}

async fn register_user(
    repo: &Arc<MemoryRepository>,
    config: &Arc<AppConfig>,
    email: &str,
    password: &str,
) -> User {
    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input(email, password))
        .await
        .expect("registration should succeed")
}

async fn create_card(repo: &Arc<MemoryRepository>, owner: &User) -> CardDetails {
    CardsUseCase::new(repo.clone())
        .create(
            owner.user_id,
            CreateCardInput {
                name: Some("Cat".to_string()),
                link: Some("https://x.com/cat.jpg".to_string()),
            },
        )
        .await
        .expect("card creation should succeed")
}

// ============================================================================
// Registration
// ============================================================================

mod register_tests {
    use super::*;
    use crate::domain::value_object::{
        about::DEFAULT_ABOUT, avatar_url::DEFAULT_AVATAR_URL, user_name::DEFAULT_USER_NAME,
    };

    #[tokio::test]
    async fn applies_profile_defaults() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();

        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        assert_eq!(user.name.as_str(), DEFAULT_USER_NAME);
        assert_eq!(user.about.as_str(), DEFAULT_ABOUT);
        assert_eq!(user.avatar_url.as_str(), DEFAULT_AVATAR_URL);
        assert_eq!(user.email.as_str(), "a@b.com");
    }

    #[tokio::test]
    async fn reports_all_constraint_violations_together() {
        let repo = Arc::new(MemoryRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), test_config());

        let result = use_case
            .execute(RegisterInput {
                name: Some("x".to_string()),
                about: None,
                avatar_url: Some("not-a-url".to_string()),
                email: None,
                password: Some("123".to_string()),
            })
            .await;

        match result {
            Err(GalleryError::Validation(messages)) => {
                assert_eq!(messages.len(), 4);
                assert!(messages.iter().any(|m| m.contains("email is required")));
                assert!(messages.iter().any(|m| m.contains("at least 6")));
                assert!(messages.iter().any(|m| m.contains("name must be")));
                assert!(messages.iter().any(|m| m.contains("valid URL")));
            }
            other => panic!("expected validation error, got {:?}", other.map(|u| u.user_id)),
        }

        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_creates_nothing() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();

        register_user(&repo, &config, "a@b.com", "secret1").await;

        let second = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("a@b.com", "other-password"))
            .await;

        assert!(matches!(second, Err(GalleryError::EmailTaken)));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();

        register_user(&repo, &config, "a@b.com", "secret1").await;

        // Different case is a different email, not a conflict
        register_user(&repo, &config, "A@b.com", "secret1").await;
        assert_eq!(repo.user_count(), 2);
    }
}

// ============================================================================
// Login
// ============================================================================

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn issues_a_verifiable_token() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();

        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: Some("a@b.com".to_string()),
                password: Some("secret1".to_string()),
            })
            .await
            .unwrap();

        let claims = platform::token::verify(&output.token, &config.token_secret).unwrap();
        assert_eq!(claims.user_id, *user.user_id.as_uuid());
        assert_eq!(output.user.email.as_str(), "a@b.com");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();

        register_user(&repo, &config, "a@b.com", "secret1").await;
        let use_case = LoginUseCase::new(repo.clone(), config.clone());

        let wrong_password = use_case
            .execute(LoginInput {
                email: Some("a@b.com".to_string()),
                password: Some("wrong-password".to_string()),
            })
            .await
            .unwrap_err();

        let unknown_email = use_case
            .execute(LoginInput {
                email: Some("nobody@b.com".to_string()),
                password: Some("secret1".to_string()),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.status_code(), unknown_email.status_code());
        assert_eq!(wrong_password.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn missing_fields_are_a_validation_error() {
        let repo = Arc::new(MemoryRepository::default());
        let use_case = LoginUseCase::new(repo, test_config());

        let err = use_case
            .execute(LoginInput {
                email: None,
                password: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::Validation(ref m) if m.len() == 2));
    }
}

// ============================================================================
// Profile
// ============================================================================

mod profile_tests {
    use super::*;

    #[tokio::test]
    async fn update_requires_both_fields_together() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        let err = ProfileUseCase::new(repo.clone())
            .update_profile(
                &user.user_id,
                UpdateProfileInput {
                    name: Some("Ada".to_string()),
                    about: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::Validation(_)));
    }

    #[tokio::test]
    async fn update_of_vanished_user_is_not_found() {
        let repo = Arc::new(MemoryRepository::default());
        let use_case = ProfileUseCase::new(repo);

        let err = use_case
            .update_profile(
                &UserId::new(),
                UpdateProfileInput {
                    name: Some("Ada".to_string()),
                    about: Some("Mathematician".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::UserNotFound));
    }

    #[tokio::test]
    async fn avatar_update_validates_url() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        let use_case = ProfileUseCase::new(repo.clone());

        let err = use_case
            .update_avatar(
                &user.user_id,
                UpdateAvatarInput {
                    avatar_url: Some("nope".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::Validation(_)));

        let updated = use_case
            .update_avatar(
                &user.user_id,
                UpdateAvatarInput {
                    avatar_url: Some("https://example.com/new.png".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.avatar_url.as_str(), "https://example.com/new.png");
    }
}

// ============================================================================
// Cards
// ============================================================================

mod card_tests {
    use super::*;

    #[tokio::test]
    async fn create_sets_owner_and_empty_likes() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let owner = register_user(&repo, &config, "a@b.com", "secret1").await;

        let details = create_card(&repo, &owner).await;

        assert_eq!(details.card.owner_id, owner.user_id);
        assert_eq!(details.owner.user_id, owner.user_id);
        assert!(details.likes.is_empty());
    }

    #[tokio::test]
    async fn create_requires_name_and_link() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let owner = register_user(&repo, &config, "a@b.com", "secret1").await;

        let err = CardsUseCase::new(repo.clone())
            .create(
                owner.user_id,
                CreateCardInput {
                    name: None,
                    link: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::Validation(ref m) if m.len() == 2));
    }

    #[tokio::test]
    async fn like_is_idempotent() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let owner = register_user(&repo, &config, "a@b.com", "secret1").await;
        let liker = register_user(&repo, &config, "c@d.com", "secret2").await;
        let card_id = create_card(&repo, &owner).await.card.card_id;

        let use_case = CardsUseCase::new(repo.clone());

        let first = use_case.like(&liker.user_id, &card_id).await.unwrap();
        assert_eq!(first.likes.len(), 1);

        let second = use_case.like(&liker.user_id, &card_id).await.unwrap();
        assert_eq!(second.likes.len(), 1);
        assert_eq!(second.likes[0].user_id, liker.user_id);
    }

    #[tokio::test]
    async fn unlike_is_idempotent() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let owner = register_user(&repo, &config, "a@b.com", "secret1").await;
        let liker = register_user(&repo, &config, "c@d.com", "secret2").await;
        let card_id = create_card(&repo, &owner).await.card.card_id;

        let use_case = CardsUseCase::new(repo.clone());

        use_case.like(&liker.user_id, &card_id).await.unwrap();

        let after_unlike = use_case.unlike(&liker.user_id, &card_id).await.unwrap();
        assert!(after_unlike.likes.is_empty());

        // Removing an absent membership is not an error
        let again = use_case.unlike(&liker.user_id, &card_id).await.unwrap();
        assert!(again.likes.is_empty());
    }

    #[tokio::test]
    async fn like_and_unlike_of_missing_card_are_not_found() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        let use_case = CardsUseCase::new(repo.clone());
        let missing = CardId::new();

        assert!(matches!(
            use_case.like(&user.user_id, &missing).await,
            Err(GalleryError::CardNotFound)
        ));
        assert!(matches!(
            use_case.unlike(&user.user_id, &missing).await,
            Err(GalleryError::CardNotFound)
        ));
    }

    #[tokio::test]
    async fn only_the_owner_may_delete() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let owner = register_user(&repo, &config, "a@b.com", "secret1").await;
        let other = register_user(&repo, &config, "c@d.com", "secret2").await;
        let card_id = create_card(&repo, &owner).await.card.card_id;

        let use_case = CardsUseCase::new(repo.clone());

        let err = use_case.delete(&other.user_id, &card_id).await.unwrap_err();
        assert!(matches!(err, GalleryError::NotOwner));

        // The card survived the forbidden attempt
        assert!(use_case.list().await.unwrap().iter().any(|d| d.card.card_id == card_id));

        use_case.delete(&owner.user_id, &card_id).await.unwrap();
        assert!(use_case.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_card_is_not_found_before_forbidden() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        let err = CardsUseCase::new(repo.clone())
            .delete(&user.user_id, &CardId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::CardNotFound));
    }
}

// ============================================================================
// DTO serialization
// ============================================================================

mod dto_tests {
    use super::*;
    use crate::presentation::dto::{CardResponse, UserResponse};

    #[tokio::test]
    async fn public_profile_never_contains_the_password_hash() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let user = register_user(&repo, &config, "a@b.com", "secret1").await;

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.to_lowercase().contains("password"));
        assert!(!json.contains("secret1"));
        assert!(!json.contains("argon2"));
        assert!(json.contains(r#""_id""#));
        assert!(json.contains(r#""avatarUrl""#));
        assert!(json.contains(r#""email":"a@b.com""#));
    }

    #[tokio::test]
    async fn card_response_resolves_owner_and_likes() {
        let repo = Arc::new(MemoryRepository::default());
        let config = test_config();
        let owner = register_user(&repo, &config, "a@b.com", "secret1").await;
        let liker = register_user(&repo, &config, "c@d.com", "secret2").await;
        let card_id = create_card(&repo, &owner).await.card.card_id;

        let details = CardsUseCase::new(repo.clone())
            .like(&liker.user_id, &card_id)
            .await
            .unwrap();

        let json = serde_json::to_string(&CardResponse::from(details)).unwrap();

        assert!(json.contains(r#""owner""#));
        assert!(json.contains(r#""likes""#));
        assert!(json.contains(r#""createdAt""#));
        assert!(json.contains(r#""email":"c@d.com""#));
        assert!(!json.to_lowercase().contains("password"));
    }
}

// ============================================================================
// Error mapping
// ============================================================================

mod error_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases: Vec<(GalleryError, StatusCode)> = vec![
            (
                GalleryError::Validation(vec!["x".to_string()]),
                StatusCode::BAD_REQUEST,
            ),
            (GalleryError::MalformedId, StatusCode::BAD_REQUEST),
            (GalleryError::AuthRequired, StatusCode::UNAUTHORIZED),
            (GalleryError::InvalidToken, StatusCode::UNAUTHORIZED),
            (GalleryError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (GalleryError::NotOwner, StatusCode::FORBIDDEN),
            (GalleryError::UserNotFound, StatusCode::NOT_FOUND),
            (GalleryError::CardNotFound, StatusCode::NOT_FOUND),
            (GalleryError::EmailTaken, StatusCode::CONFLICT),
            (
                GalleryError::Internal("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn validation_messages_reach_the_normalized_error() {
        let err = GalleryError::Validation(vec![
            "email is required".to_string(),
            "password is required".to_string(),
        ]);

        let app_err = err.to_app_error();
        assert_eq!(app_err.status_code(), 400);
        assert_eq!(app_err.validation_errors().map(|v| v.len()), Some(2));
    }

    #[test]
    fn internal_detail_stays_out_of_the_external_message() {
        let err = GalleryError::Internal("connection string leaked?".to_string());
        let app_err = err.to_app_error();

        assert_eq!(app_err.message(), "internal server error");
    }
}

// ============================================================================
// Config
// ============================================================================

mod config_tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config_matches_session_contract() {
        let config = AppConfig::default();

        assert_eq!(config.cookie_name, "jwt");
        assert_eq!(config.token_ttl, Duration::from_secs(7 * 24 * 3600));
        assert!(config.cookie_secure);
        assert!(config.password_pepper.is_none());
    }

    #[test]
    fn random_secrets_differ() {
        let a = AppConfig::with_random_secret();
        let b = AppConfig::with_random_secret();

        assert_ne!(a.token_secret, b.token_secret);
        assert!(a.token_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn development_config_relaxes_cookie_security() {
        let config = AppConfig::development();
        assert!(!config.cookie_secure);
        assert!(config.token_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn session_cookie_is_http_only() {
        let config = AppConfig::development();
        let cookie = config.session_cookie();

        assert_eq!(cookie.name, "jwt");
        assert!(cookie.http_only);
        assert!(
            cookie
                .build_set_cookie("token", config.token_ttl_secs())
                .contains("HttpOnly")
        );
    }
}
