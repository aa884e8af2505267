//! User Name Value Object
//!
//! 表示名。ログイン識別子ではないため一意性は要求しない。
//!
//! ## 不変条件
//! - 長さ: 2〜30文字（コードポイント単位）
//! - 省略時は既定値を適用（構築時に明示的に適用する）

use serde::{Deserialize, Serialize};
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 2;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Default display name applied when registration omits the field
pub const DEFAULT_USER_NAME: &str = "Jacques-Yves Cousteau";

/// User display name value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        let char_count = name.chars().count();

        if char_count < USER_NAME_MIN_LENGTH || char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "name must be {} to {} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
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

impl Default for UserName {
    fn default() -> Self {
        Self(DEFAULT_USER_NAME.to_string())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        assert!(UserName::new("Jo").is_ok());
        assert!(UserName::new("Marie Curie").is_ok());
        assert!(UserName::new("a".repeat(30)).is_ok());
    }

    #[test]
    fn test_user_name_length_bounds() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new("J").is_err());
        assert!(UserName::new("a".repeat(31)).is_err());
    }

    #[test]
    fn test_user_name_counts_characters_not_bytes() {
        // 2 characters, 6 bytes
        assert!(UserName::new("日本").is_ok());
    }

    #[test]
    fn test_default_user_name() {
        let name = UserName::default();
        assert_eq!(name.as_str(), DEFAULT_USER_NAME);
    }
}
