//! Database repository for links.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::links::{LinkCreateDBRequest, LinkDBResponse},
};
use crate::types::{LinkId, SignatureId, abbrev_uuid};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing links
#[derive(Debug, Clone)]
pub struct LinkFilter {
    pub signature_id: SignatureId,
}

impl LinkFilter {
    pub fn for_signature(signature_id: SignatureId) -> Self {
        Self { signature_id }
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Link {
    pub id: LinkId,
    pub signature_id: SignatureId,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkDBResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            signature_id: link.signature_id,
            url: link.url,
            created_at: link.created_at,
        }
    }
}

pub struct Links<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Links<'c> {
    type CreateRequest = LinkCreateDBRequest;
    type Response = LinkDBResponse;
    type Id = LinkId;
    type Filter = LinkFilter;

    #[instrument(skip(self, request), fields(signature_id = %abbrev_uuid(&request.signature_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (id, signature_id, url)
            VALUES ($1, $2, $3)
            RETURNING id, signature_id, url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.signature_id)
        .bind(&request.url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(link.into())
    }

    #[instrument(skip(self), fields(link_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let link = sqlx::query_as::<_, Link>("SELECT id, signature_id, url, created_at FROM links WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(link.map(Into::into))
    }

    #[instrument(skip(self, filter), fields(signature_id = %abbrev_uuid(&filter.signature_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, signature_id, url, created_at
            FROM links
            WHERE signature_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.signature_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(links.into_iter().map(Into::into).collect())
    }
}

impl<'c> Links<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Total number of links across all users.
    #[instrument(skip(self), err)]
    pub async fn count_all(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}
