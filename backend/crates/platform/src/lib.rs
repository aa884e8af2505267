//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, memory-hard)
//! - Stateless signed access tokens (HMAC-SHA256)
//! - Cookie management

pub mod cookie;
pub mod password;
pub mod token;
