//! About Value Object
//!
//! Free-form self description shown on the profile.

use serde::{Deserialize, Serialize};
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Minimum length for the about text (in characters)
pub const ABOUT_MIN_LENGTH: usize = 2;

/// Maximum length for the about text (in characters)
pub const ABOUT_MAX_LENGTH: usize = 200;

/// Default about text applied when registration omits the field
pub const DEFAULT_ABOUT: &str = "Explorer";

/// Profile "about" value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About(String);

impl About {
    /// Create a new about text with validation
    pub fn new(about: impl Into<String>) -> AppResult<Self> {
        let about = about.into();
        let char_count = about.chars().count();

        if char_count < ABOUT_MIN_LENGTH || char_count > ABOUT_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "about must be {} to {} characters",
                ABOUT_MIN_LENGTH, ABOUT_MAX_LENGTH
            )));
        }

        Ok(Self(about))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(about: impl Into<String>) -> Self {
        Self(about.into())
    }

    /// Get the text as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for About {
    fn default() -> Self {
        Self(DEFAULT_ABOUT.to_string())
    }
}

impl fmt::Display for About {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_valid() {
        assert!(About::new("Marine researcher").is_ok());
        assert!(About::new("ok").is_ok());
        assert!(About::new("a".repeat(200)).is_ok());
    }

    #[test]
    fn test_about_length_bounds() {
        assert!(About::new("").is_err());
        assert!(About::new("a").is_err());
        assert!(About::new("a".repeat(201)).is_err());
    }

    #[test]
    fn test_default_about() {
        assert_eq!(About::default().as_str(), DEFAULT_ABOUT);
    }
}
