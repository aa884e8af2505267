//! Avatar URL Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

use super::url::is_http_url;

/// Default avatar applied when registration omits the field
pub const DEFAULT_AVATAR_URL: &str =
    "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png";

/// Avatar URL value object (absolute http/https URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Create a new avatar URL with validation
    pub fn new(url: impl Into<String>) -> AppResult<Self> {
        let url = url.into();

        if !is_http_url(&url) {
            return Err(AppError::bad_request("avatar must be a valid URL"));
        }

        Ok(Self(url))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the URL as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AvatarUrl {
    fn default() -> Self {
        Self(DEFAULT_AVATAR_URL.to_string())
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
