//! PostgreSQL Repository Implementations
//!
//! The database is the sole source of truth and the sole point of
//! serialization: like-set mutation is delegated to atomic SQL so that
//! concurrent requests cannot double-count.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use platform::password::HashedPassword;

use crate::domain::entity::{
    card::{Card, CardDetails},
    user::User,
};
use crate::domain::repository::{CardRepository, UserRepository};
use crate::domain::value_object::{
    about::About, avatar_url::AvatarUrl, card_link::CardLink, card_name::CardName, email::Email,
    user_name::UserName,
};
use crate::error::{GalleryError, GalleryResult};
use kernel::id::{CardId, UserId};

/// Columns of the hash-free user projection
const USER_COLUMNS: &str = "user_id, email, name, about, avatar_url, created_at, updated_at";

/// PostgreSQL-backed gallery repository
#[derive(Clone)]
pub struct PgGalleryRepository {
    pool: PgPool,
}

impl PgGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Likes of one card, membership order
    async fn likes_of(&self, card_id: &CardId) -> GalleryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {}
            FROM card_likes cl
            JOIN users u ON u.user_id = cl.user_id
            WHERE cl.card_id = $1
            ORDER BY cl.liked_at
            "#,
            qualified_user_columns("u")
        ))
        .bind(card_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }
}

fn qualified_user_columns(alias: &str) -> String {
    USER_COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgGalleryRepository {
    async fn create(&self, user: &User, password_hash: &HashedPassword) -> GalleryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                name,
                about,
                avatar_url,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(password_hash.as_phc_string())
        .bind(user.name.as_str())
        .bind(user.about.as_str())
        .bind(user.avatar_url.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // users_email_key: uniqueness is enforced here, not pre-checked
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                GalleryError::EmailTaken
            }
            _ => GalleryError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> GalleryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email_with_hash(
        &self,
        email: &str,
    ) -> GalleryResult<Option<(User, HashedPassword)>> {
        let row = sqlx::query_as::<_, UserWithHashRow>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserWithHashRow::into_user_and_hash).transpose()
    }

    async fn list(&self) -> GalleryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        name: &UserName,
        about: &About,
    ) -> GalleryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                name = $2,
                about = $3,
                updated_at = $4
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(name.as_str())
        .bind(about.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn update_avatar(
        &self,
        user_id: &UserId,
        avatar_url: &AvatarUrl,
    ) -> GalleryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                avatar_url = $2,
                updated_at = $3
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(avatar_url.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }
}

// ============================================================================
// Card Repository Implementation
// ============================================================================

impl CardRepository for PgGalleryRepository {
    async fn create(&self, card: &Card) -> GalleryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cards (
                card_id,
                name,
                link,
                owner_id,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(card.card_id.as_uuid())
        .bind(card.name.as_str())
        .bind(card.link.as_str())
        .bind(card.owner_id.as_uuid())
        .bind(card.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, card_id: &CardId) -> GalleryResult<Option<Card>> {
        let row = sqlx::query_as::<_, CardRow>(
            "SELECT card_id, name, link, owner_id, created_at FROM cards WHERE card_id = $1",
        )
        .bind(card_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CardRow::into_card))
    }

    async fn find_details(&self, card_id: &CardId) -> GalleryResult<Option<CardDetails>> {
        let row = sqlx::query_as::<_, CardWithOwnerRow>(&format!(
            r#"
            SELECT
                c.card_id, c.name AS card_name, c.link, c.owner_id, c.created_at AS card_created_at,
                {}
            FROM cards c
            JOIN users u ON u.user_id = c.owner_id
            WHERE c.card_id = $1
            "#,
            owner_user_columns()
        ))
        .bind(card_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let likes = self.likes_of(card_id).await?;

        Ok(Some(row.into_details(likes)))
    }

    async fn list(&self) -> GalleryResult<Vec<CardDetails>> {
        let card_rows = sqlx::query_as::<_, CardWithOwnerRow>(&format!(
            r#"
            SELECT
                c.card_id, c.name AS card_name, c.link, c.owner_id, c.created_at AS card_created_at,
                {}
            FROM cards c
            JOIN users u ON u.user_id = c.owner_id
            ORDER BY c.created_at
            "#,
            owner_user_columns()
        ))
        .fetch_all(&self.pool)
        .await?;

        let like_rows = sqlx::query_as::<_, LikeRow>(&format!(
            r#"
            SELECT cl.card_id AS liked_card_id, {}
            FROM card_likes cl
            JOIN users u ON u.user_id = cl.user_id
            ORDER BY cl.liked_at
            "#,
            qualified_user_columns("u")
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut likes_by_card: HashMap<Uuid, Vec<User>> = HashMap::new();
        for row in like_rows {
            likes_by_card
                .entry(row.liked_card_id)
                .or_default()
                .push(row.into_user());
        }

        Ok(card_rows
            .into_iter()
            .map(|row| {
                let likes = likes_by_card.remove(&row.card_id).unwrap_or_default();
                row.into_details(likes)
            })
            .collect())
    }

    async fn delete(&self, card_id: &CardId) -> GalleryResult<()> {
        sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_like(&self, card_id: &CardId, user_id: &UserId) -> GalleryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO card_likes (card_id, user_id, liked_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // FK violation: the card vanished or never existed
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                GalleryError::CardNotFound
            }
            _ => GalleryError::Database(e),
        })?;

        Ok(())
    }

    async fn remove_like(&self, card_id: &CardId, user_id: &UserId) -> GalleryResult<()> {
        sqlx::query("DELETE FROM card_likes WHERE card_id = $1 AND user_id = $2")
            .bind(card_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    name: String,
    about: String,
    avatar_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            name: UserName::from_db(self.name),
            about: About::from_db(self.about),
            avatar_url: AvatarUrl::from_db(self.avatar_url),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    user_id: Uuid,
    email: String,
    name: String,
    about: String,
    avatar_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    password_hash: String,
}

impl UserWithHashRow {
    fn into_user_and_hash(self) -> GalleryResult<(User, HashedPassword)> {
        let hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| GalleryError::Internal(format!("stored hash unreadable: {e}")))?;

        let user = UserRow {
            user_id: self.user_id,
            email: self.email,
            name: self.name,
            about: self.about,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user();

        Ok((user, hash))
    }
}

#[derive(sqlx::FromRow)]
struct CardRow {
    card_id: Uuid,
    name: String,
    link: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl CardRow {
    fn into_card(self) -> Card {
        Card {
            card_id: CardId::from_uuid(self.card_id),
            name: CardName::from_db(self.name),
            link: CardLink::from_db(self.link),
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
        }
    }
}

fn owner_user_columns() -> String {
    USER_COLUMNS
        .split(", ")
        .map(|c| format!("u.{c} AS owner_{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(sqlx::FromRow)]
struct CardWithOwnerRow {
    card_id: Uuid,
    card_name: String,
    link: String,
    owner_id: Uuid,
    card_created_at: DateTime<Utc>,
    owner_user_id: Uuid,
    owner_email: String,
    owner_name: String,
    owner_about: String,
    owner_avatar_url: String,
    owner_created_at: DateTime<Utc>,
    owner_updated_at: DateTime<Utc>,
}

impl CardWithOwnerRow {
    fn into_details(self, likes: Vec<User>) -> CardDetails {
        let card = Card {
            card_id: CardId::from_uuid(self.card_id),
            name: CardName::from_db(self.card_name),
            link: CardLink::from_db(self.link),
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.card_created_at,
        };

        let owner = UserRow {
            user_id: self.owner_user_id,
            email: self.owner_email,
            name: self.owner_name,
            about: self.owner_about,
            avatar_url: self.owner_avatar_url,
            created_at: self.owner_created_at,
            updated_at: self.owner_updated_at,
        }
        .into_user();

        CardDetails { card, owner, likes }
    }
}

#[derive(sqlx::FromRow)]
struct LikeRow {
    liked_card_id: Uuid,
    user_id: Uuid,
    email: String,
    name: String,
    about: String,
    avatar_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LikeRow {
    fn into_user(self) -> User {
        UserRow {
            user_id: self.user_id,
            email: self.email,
            name: self.name,
            about: self.about,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user()
    }
}
