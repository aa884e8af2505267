//! Card Name Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Minimum length for a card name (in characters)
pub const CARD_NAME_MIN_LENGTH: usize = 2;

/// Maximum length for a card name (in characters)
pub const CARD_NAME_MAX_LENGTH: usize = 30;

/// Card title value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    /// Create a new card name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        let char_count = name.chars().count();

        if char_count < CARD_NAME_MIN_LENGTH || char_count > CARD_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "name must be {} to {} characters",
                CARD_NAME_MIN_LENGTH, CARD_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
