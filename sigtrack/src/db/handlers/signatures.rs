//! Database repository for signatures.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::signatures::{SignatureCreateDBRequest, SignatureDBResponse},
};
use crate::types::{SignatureId, UserId, abbrev_uuid};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{Connection, FromRow, PgConnection, types::Json};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Filter for listing signatures
#[derive(Debug, Clone)]
pub struct SignatureFilter {
    pub user_id: UserId,
}

impl SignatureFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self { user_id }
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Signature {
    pub id: SignatureId,
    pub user_id: UserId,
    pub template_data: Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
}

impl From<Signature> for SignatureDBResponse {
    fn from(signature: Signature) -> Self {
        Self {
            id: signature.id,
            user_id: signature.user_id,
            template_data: signature.template_data.0,
            created_at: signature.created_at,
        }
    }
}

pub struct Signatures<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Signatures<'c> {
    type CreateRequest = SignatureCreateDBRequest;
    type Response = SignatureDBResponse;
    type Id = SignatureId;
    type Filter = SignatureFilter;

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let signature = sqlx::query_as::<_, Signature>(
            r#"
            INSERT INTO signatures (id, user_id, template_data)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, template_data, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(Json(&request.template_data))
        .fetch_one(&mut *self.db)
        .await?;

        Ok(signature.into())
    }

    #[instrument(skip(self), fields(signature_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let signature =
            sqlx::query_as::<_, Signature>("SELECT id, user_id, template_data, created_at FROM signatures WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(signature.map(Into::into))
    }

    #[instrument(skip(self, filter), fields(user_id = %abbrev_uuid(&filter.user_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let signatures = sqlx::query_as::<_, Signature>(
            r#"
            SELECT id, user_id, template_data, created_at
            FROM signatures
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(signatures.into_iter().map(Into::into).collect())
    }
}

impl<'c> Signatures<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch a signature only if `user_id` owns it.
    #[instrument(skip(self), fields(signature_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_owned(&mut self, id: SignatureId, user_id: UserId) -> Result<Option<SignatureDBResponse>> {
        let signature = sqlx::query_as::<_, Signature>(
            "SELECT id, user_id, template_data, created_at FROM signatures WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(signature.map(Into::into))
    }

    #[instrument(skip(self), fields(signature_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn is_owned_by(&mut self, id: SignatureId, user_id: UserId) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM signatures WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count > 0)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn count_for_user(&mut self, user_id: UserId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM signatures WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    /// Delete a signature together with its links, atomically.
    ///
    /// Links go first, then the signature row filtered by id AND owner. If no signature row was
    /// removed (unknown id, or owned by someone else) the transaction is rolled back, so the links
    /// survive, and `false` is returned. Clicks are left in place.
    #[instrument(skip(self), fields(signature_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn delete_owned(&mut self, id: SignatureId, user_id: UserId) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let links = sqlx::query("DELETE FROM links WHERE signature_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let signatures = sqlx::query("DELETE FROM signatures WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if signatures.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        debug!("Deleted signature and {} link(s)", links.rows_affected());
        Ok(true)
    }
}
