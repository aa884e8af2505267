//! Gallery Router

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;

use crate::application::config::AppConfig;
use crate::domain::repository::{CardRepository, UserRepository};
use crate::infra::postgres::PgGalleryRepository;
use crate::presentation::handlers::{self, GalleryAppState};
use crate::presentation::middleware::{AuthState, require_auth};

/// Create the gallery router with PostgreSQL repository
pub fn gallery_router(repo: PgGalleryRepository, config: AppConfig) -> Router {
    gallery_router_generic(repo, config)
}

/// Create a generic gallery router for any repository implementation
pub fn gallery_router_generic<R>(repo: R, config: AppConfig) -> Router
where
    R: UserRepository + CardRepository + Clone + Send + Sync + 'static,
{
    let state = GalleryAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let auth_state = AuthState {
        config: state.config.clone(),
    };

    // Everything except signup/signin sits behind the auth middleware
    let protected = Router::new()
        .route("/users", get(handlers::get_users::<R>))
        .route(
            "/users/me",
            get(handlers::get_me::<R>).patch(handlers::update_profile::<R>),
        )
        .route("/users/me/avatar", patch(handlers::update_avatar::<R>))
        .route("/users/{userId}", get(handlers::get_user_by_id::<R>))
        .route(
            "/cards",
            get(handlers::get_cards::<R>).post(handlers::create_card::<R>),
        )
        .route("/cards/{cardId}", delete(handlers::delete_card::<R>))
        .route(
            "/cards/{cardId}/likes",
            put(handlers::like_card::<R>).delete(handlers::unlike_card::<R>),
        )
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(auth_state.clone(), req, next)
        }));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .merge(protected)
        .fallback(handlers::not_found)
        .with_state(state)
}
