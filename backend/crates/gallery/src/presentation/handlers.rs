//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::id::{CardId, UserId};

use crate::application::{
    CardsUseCase, CreateCardInput, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase, UpdateAvatarInput, UpdateProfileInput, config::AppConfig,
};
use crate::domain::repository::{CardRepository, UserRepository};
use crate::error::{GalleryError, GalleryResult};
use crate::presentation::dto::{
    CardResponse, ConfirmationResponse, CreateCardRequest, LoginRequest, LoginResponse,
    RegisterRequest, UpdateAvatarRequest, UpdateProfileRequest, UserResponse,
};
use crate::presentation::middleware::Identity;

/// Shared state for gallery handlers
#[derive(Clone)]
pub struct GalleryAppState<R>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AppConfig>,
}

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<GalleryAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> GalleryResult<impl IntoResponse>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            name: req.name,
            about: req.about,
            avatar_url: req.avatar_url,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /signin
pub async fn sign_in<R>(
    State(state): State<GalleryAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> GalleryResult<impl IntoResponse>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    // Session travels as an http-only cookie, expiring with the token
    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.token, state.config.token_ttl_secs());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "login successful".to_string(),
            user: UserResponse::from(output.user),
        }),
    ))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn get_users<R>(
    State(state): State<GalleryAppState<R>>,
) -> GalleryResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let users = use_case.list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/me
pub async fn get_me<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
) -> GalleryResult<Json<UserResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get_self(&identity.user_id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /users/{userId}
pub async fn get_user_by_id<R>(
    State(state): State<GalleryAppState<R>>,
    Path(user_id): Path<String>,
) -> GalleryResult<Json<UserResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;

    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get_by_id(&user_id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/me
pub async fn update_profile<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateProfileRequest>,
) -> GalleryResult<Json<UserResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case
        .update_profile(
            &identity.user_id,
            UpdateProfileInput {
                name: req.name,
                about: req.about,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/me/avatar
pub async fn update_avatar<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateAvatarRequest>,
) -> GalleryResult<Json<UserResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case
        .update_avatar(
            &identity.user_id,
            UpdateAvatarInput {
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

// ============================================================================
// Cards
// ============================================================================

/// GET /cards
pub async fn get_cards<R>(
    State(state): State<GalleryAppState<R>>,
) -> GalleryResult<Json<Vec<CardResponse>>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = CardsUseCase::new(state.repo.clone());
    let cards = use_case.list().await?;

    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// POST /cards
pub async fn create_card<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateCardRequest>,
) -> GalleryResult<impl IntoResponse>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = CardsUseCase::new(state.repo.clone());
    let details = use_case
        .create(
            identity.user_id,
            CreateCardInput {
                name: req.name,
                link: req.link,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CardResponse::from(details))))
}

/// DELETE /cards/{cardId}
pub async fn delete_card<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
    Path(card_id): Path<String>,
) -> GalleryResult<Json<ConfirmationResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let card_id = parse_card_id(&card_id)?;

    let use_case = CardsUseCase::new(state.repo.clone());
    use_case.delete(&identity.user_id, &card_id).await?;

    Ok(Json(ConfirmationResponse {
        message: "card deleted".to_string(),
    }))
}

/// PUT /cards/{cardId}/likes
pub async fn like_card<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
    Path(card_id): Path<String>,
) -> GalleryResult<Json<CardResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let card_id = parse_card_id(&card_id)?;

    let use_case = CardsUseCase::new(state.repo.clone());
    let details = use_case.like(&identity.user_id, &card_id).await?;

    Ok(Json(CardResponse::from(details)))
}

/// DELETE /cards/{cardId}/likes
pub async fn unlike_card<R>(
    State(state): State<GalleryAppState<R>>,
    Extension(identity): Extension<Identity>,
    Path(card_id): Path<String>,
) -> GalleryResult<Json<CardResponse>>
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let card_id = parse_card_id(&card_id)?;

    let use_case = CardsUseCase::new(state.repo.clone());
    let details = use_case.unlike(&identity.user_id, &card_id).await?;

    Ok(Json(CardResponse::from(details)))
}

// ============================================================================
// Fallback
// ============================================================================

/// Catch-all: unmatched routes share the resource-not-found shape
pub async fn not_found() -> Response {
    AppError::not_found("resource not found").into_response()
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_user_id(raw: &str) -> GalleryResult<UserId> {
    UserId::parse(raw).map_err(|_| GalleryError::MalformedId)
}

fn parse_card_id(raw: &str) -> GalleryResult<CardId> {
    CardId::parse(raw).map_err(|_| GalleryError::MalformedId)
}
