//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.
//!
//! Token verification is a pure signature check against the configured
//! secret; the middleware performs no persistence I/O and rejects the
//! request before any aggregate logic runs.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::id::UserId;
use platform::{cookie, token};

use crate::application::config::AppConfig;
use crate::error::GalleryError;

/// Middleware state
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
}

/// Authenticated identity stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: UserId,
}

/// Middleware that requires a valid session token
pub async fn require_auth(
    state: AuthState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = cookie::extract_cookie(req.headers(), &state.config.cookie_name);

    let Some(token) = token else {
        return Err(GalleryError::AuthRequired.into_response());
    };

    let claims = match token::verify(&token, &state.config.token_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "session token rejected");
            return Err(GalleryError::InvalidToken.into_response());
        }
    };

    req.extensions_mut().insert(Identity {
        user_id: UserId::from_uuid(claims.user_id),
    });

    Ok(next.run(req).await)
}
