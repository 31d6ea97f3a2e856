//! Database repository for users.

use crate::types::{UserId, abbrev_uuid};
use crate::db::{
    errors::Result,
    models::users::{UserCreateDBRequest, UserDBResponse},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDBResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        }
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a new user. A taken email surfaces as [`crate::db::errors::DbError::UniqueViolation`].
    #[instrument(skip(self, request), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.email)
        .bind(&request.password_hash)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user.into())
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(Into::into))
    }

    #[instrument(skip(self, email), err)]
    pub async fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash, created_at FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(Into::into))
    }
}
