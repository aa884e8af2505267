//! Cards Use Case
//!
//! Card creation, listing, deletion, and like-set mutation.

use std::sync::Arc;

use kernel::id::{CardId, UserId};

use crate::domain::entity::card::{Card, CardDetails};
use crate::domain::repository::CardRepository;
use crate::domain::value_object::{card_link::CardLink, card_name::CardName};
use crate::error::{GalleryError, GalleryResult};

/// Card creation input
pub struct CreateCardInput {
    pub name: Option<String>,
    pub link: Option<String>,
}

/// Cards use case
pub struct CardsUseCase<C>
where
    C: CardRepository,
{
    card_repo: Arc<C>,
}

impl<C> CardsUseCase<C>
where
    C: CardRepository,
{
    pub fn new(card_repo: Arc<C>) -> Self {
        Self { card_repo }
    }

    /// Create a card owned by the caller, with an empty like set
    pub async fn create(
        &self,
        owner_id: UserId,
        input: CreateCardInput,
    ) -> GalleryResult<CardDetails> {
        let mut problems: Vec<String> = Vec::new();

        let name = match input.name {
            None => {
                problems.push("name is required".to_string());
                None
            }
            Some(raw) => match CardName::new(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    problems.push(e.message().to_string());
                    None
                }
            },
        };

        let link = match input.link {
            None => {
                problems.push("link is required".to_string());
                None
            }
            Some(raw) => match CardLink::new(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    problems.push(e.message().to_string());
                    None
                }
            },
        };

        let (Some(name), Some(link)) = (name, link) else {
            return Err(GalleryError::Validation(problems));
        };

        let card = Card::new(owner_id, name, link);
        self.card_repo.create(&card).await?;

        tracing::info!(card_id = %card.card_id, owner_id = %owner_id, "card created");

        self.card_repo
            .find_details(&card.card_id)
            .await?
            .ok_or_else(|| GalleryError::Internal("created card not readable".to_string()))
    }

    /// All cards with owner and likes resolved
    pub async fn list(&self) -> GalleryResult<Vec<CardDetails>> {
        self.card_repo.list().await
    }

    /// Delete a card: existence first (404), then ownership (403)
    pub async fn delete(&self, caller: &UserId, card_id: &CardId) -> GalleryResult<()> {
        let card = self
            .card_repo
            .find_by_id(card_id)
            .await?
            .ok_or(GalleryError::CardNotFound)?;

        if !card.is_owned_by(caller) {
            return Err(GalleryError::NotOwner);
        }

        self.card_repo.delete(card_id).await?;

        tracing::info!(card_id = %card_id, owner_id = %caller, "card deleted");

        Ok(())
    }

    /// Add the caller to the card's like set (idempotent)
    pub async fn like(&self, caller: &UserId, card_id: &CardId) -> GalleryResult<CardDetails> {
        self.card_repo.add_like(card_id, caller).await?;

        self.card_repo
            .find_details(card_id)
            .await?
            .ok_or(GalleryError::CardNotFound)
    }

    /// Remove the caller from the card's like set (idempotent)
    ///
    /// Absence of the membership is not an error; absence of the card is.
    pub async fn unlike(&self, caller: &UserId, card_id: &CardId) -> GalleryResult<CardDetails> {
        self.card_repo.remove_like(card_id, caller).await?;

        self.card_repo
            .find_details(card_id)
            .await?
            .ok_or(GalleryError::CardNotFound)
    }
}
