//! Database repository for click events.

use crate::db::{
    errors::Result,
    models::clicks::{ClickCreateDBRequest, ClickDBResponse},
};
use crate::types::{ClickId, LinkId, abbrev_uuid};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Click {
    pub id: ClickId,
    pub link_id: LinkId,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Click> for ClickDBResponse {
    fn from(click: Click) -> Self {
        Self {
            id: click.id,
            link_id: click.link_id,
            ip_address: click.ip_address,
            timestamp: click.timestamp,
        }
    }
}

pub struct Clicks<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Clicks<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Record a click. The link id is not checked against `links`.
    #[instrument(skip(self, request), fields(link_id = %abbrev_uuid(&request.link_id)), err)]
    pub async fn create(&mut self, request: &ClickCreateDBRequest) -> Result<ClickDBResponse> {
        let click = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO clicks (id, link_id, ip_address)
            VALUES ($1, $2, $3)
            RETURNING id, link_id, ip_address, timestamp
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.link_id)
        .bind(&request.ip_address)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(click.into())
    }

    /// Clicks for one link, newest first.
    #[instrument(skip(self), fields(link_id = %abbrev_uuid(&link_id)), err)]
    pub async fn list_for_link(&mut self, link_id: LinkId) -> Result<Vec<ClickDBResponse>> {
        let clicks = sqlx::query_as::<_, Click>(
            r#"
            SELECT id, link_id, ip_address, timestamp
            FROM clicks
            WHERE link_id = $1
            ORDER BY timestamp DESC, id
            "#,
        )
        .bind(link_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(clicks.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn count_all(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}
