//! Gallery Backend Module
//!
//! Photo-card sharing domain: users, cards, likes.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - User signup/signin with email + password
//! - Stateless cookie sessions (HMAC-signed tokens, 7-day expiry)
//! - Profile and avatar updates (owner only, via the session identity)
//! - Cards with owner-restricted deletion and idempotent like/unlike
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never serialized outward
//! - Sign-in failures are enumeration-resistant (single error message)
//! - Ownership checked after existence, so 404 and 403 stay distinct

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AppConfig;
pub use error::{GalleryError, GalleryResult};
pub use infra::postgres::PgGalleryRepository;
pub use presentation::router::gallery_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
