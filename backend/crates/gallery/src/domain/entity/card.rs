//! Card Entity
//!
//! A photo card: a named image link owned by the user who created it,
//! carrying a set of likes.

use chrono::{DateTime, Utc};
use kernel::id::{CardId, UserId};

use crate::domain::entity::user::User;
use crate::domain::value_object::{card_link::CardLink, card_name::CardName};

/// Card entity
#[derive(Debug, Clone)]
pub struct Card {
    /// Internal UUID identifier
    pub card_id: CardId,
    /// Card title
    pub name: CardName,
    /// Image URL
    pub link: CardLink,
    /// Owner reference, set at creation, immutable thereafter
    pub owner_id: UserId,
    /// Created timestamp, set once
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Create a new card owned by `owner_id`
    pub fn new(owner_id: UserId, name: CardName, link: CardLink) -> Self {
        Self {
            card_id: CardId::new(),
            name,
            link,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Ownership check for owner-restricted operations
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }
}

/// Card with its relations resolved for client views
///
/// `likes` is a set: membership is unique regardless of how often the
/// same user liked the card.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub card: Card,
    pub owner: User,
    pub likes: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card(owner_id: UserId) -> Card {
        Card::new(
            owner_id,
            CardName::new("Cat").unwrap(),
            CardLink::new("https://x.com/cat.jpg").unwrap(),
        )
    }

    #[test]
    fn test_new_card_belongs_to_owner() {
        let owner_id = UserId::new();
        let card = sample_card(owner_id);

        assert!(card.is_owned_by(&owner_id));
        assert_eq!(card.owner_id, owner_id);
    }

    #[test]
    fn test_ownership_check_rejects_other_user() {
        let card = sample_card(UserId::new());
        assert!(!card.is_owned_by(&UserId::new()));
    }
}
