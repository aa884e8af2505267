//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::GalleryAppState;
pub use middleware::{AuthState, Identity, require_auth};
pub use router::{gallery_router, gallery_router_generic};
