//! Database queries for click analytics and aggregation.

use crate::db::{errors::Result, models::analytics::LinkClickStats};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Analytics<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Analytics<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// One row per link on any of the user's signatures, with its click total.
    ///
    /// Links without clicks are included with a total of zero. Clicks whose link id matches no
    /// link never appear.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn link_stats_for_user(&mut self, user_id: UserId) -> Result<Vec<LinkClickStats>> {
        let stats = sqlx::query_as::<_, LinkClickStats>(
            r#"
            SELECT
                l.id AS link_id,
                l.signature_id,
                l.url,
                COUNT(c.id) AS total_clicks,
                MAX(c.timestamp) AS last_clicked
            FROM links l
            JOIN signatures s ON s.id = l.signature_id
            LEFT JOIN clicks c ON c.link_id = l.id
            WHERE s.user_id = $1
            GROUP BY l.id, l.signature_id, l.url, l.created_at
            ORDER BY l.created_at, l.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::{Clicks, Links, Repository, Signatures, Users};
    use crate::db::models::{
        clicks::ClickCreateDBRequest, links::LinkCreateDBRequest, signatures::SignatureCreateDBRequest,
        users::UserCreateDBRequest,
    };
    use serde_json::Map;
    use sqlx::PgPool;
    use uuid::Uuid;

    async fn create_user(conn: &mut PgConnection, email: &str) -> UserId {
        Users::new(conn)
            .create(&UserCreateDBRequest {
                email: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_link_stats_counts_clicks_per_link(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let alice = create_user(&mut conn, "alice@example.com").await;
        let bob = create_user(&mut conn, "bob@example.com").await;

        let signature = Signatures::new(&mut conn)
            .create(&SignatureCreateDBRequest {
                user_id: alice,
                template_data: Map::new(),
            })
            .await
            .unwrap();
        let clicked = Links::new(&mut conn)
            .create(&LinkCreateDBRequest {
                signature_id: signature.id,
                url: "https://clicked.example".to_string(),
            })
            .await
            .unwrap();
        let quiet = Links::new(&mut conn)
            .create(&LinkCreateDBRequest {
                signature_id: signature.id,
                url: "https://quiet.example".to_string(),
            })
            .await
            .unwrap();

        for link_id in [clicked.id, clicked.id, Uuid::new_v4()] {
            Clicks::new(&mut conn)
                .create(&ClickCreateDBRequest {
                    link_id,
                    ip_address: "1.2.3.4".to_string(),
                })
                .await
                .unwrap();
        }

        let stats = Analytics::new(&mut conn).link_stats_for_user(alice).await.unwrap();
        assert_eq!(stats.len(), 2);

        let clicked_stats = stats.iter().find(|s| s.link_id == clicked.id).unwrap();
        assert_eq!(clicked_stats.total_clicks, 2);
        assert!(clicked_stats.last_clicked.is_some());

        let quiet_stats = stats.iter().find(|s| s.link_id == quiet.id).unwrap();
        assert_eq!(quiet_stats.total_clicks, 0);
        assert!(quiet_stats.last_clicked.is_none());

        assert!(Analytics::new(&mut conn).link_stats_for_user(bob).await.unwrap().is_empty());
    }
}
