//! Card Link Value Object
//!
//! The image URL a card points at.

use serde::{Deserialize, Serialize};
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

use super::url::is_http_url;

/// Card image link value object (absolute http/https URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLink(String);

impl CardLink {
    /// Create a new card link with validation
    pub fn new(link: impl Into<String>) -> AppResult<Self> {
        let link = link.into();

        if !is_http_url(&link) {
            return Err(AppError::bad_request("link must be a valid URL"));
        }

        Ok(Self(link))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    /// Get the link as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_link_valid() {
        assert!(CardLink::new("https://x.com/cat.jpg").is_ok());
        assert!(CardLink::new("http://images.example.com/1.png").is_ok());
    }

    #[test]
    fn test_card_link_invalid() {
        assert!(CardLink::new("").is_err());
        assert!(CardLink::new("cat.jpg").is_err());
        assert!(CardLink::new("file:///etc/passwd").is_err());
    }
}
