//! Site config repository for database operations.

use serde_json::Value;
use sqlx::PgPool;

use crate::entities::SiteConfigEntity;
use crate::metrics::QueryTimer;

/// Repository for client website configurations.
#[derive(Clone)]
pub struct SiteConfigRepository {
    pool: PgPool,
}

impl SiteConfigRepository {
    /// Creates a new SiteConfigRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a config by client id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<SiteConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_site_config");
        let result = sqlx::query_as::<_, SiteConfigEntity>(
            r#"
            SELECT id, template_type, data, created_at, updated_at
            FROM site_configs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new config. Fails with a unique violation if the id is taken.
    pub async fn create(
        &self,
        id: &str,
        template_type: &str,
        data: &Value,
    ) -> Result<SiteConfigEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_site_config");
        let result = sqlx::query_as::<_, SiteConfigEntity>(
            r#"
            INSERT INTO site_configs (id, template_type, data)
            VALUES ($1, $2, $3)
            RETURNING id, template_type, data, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(template_type)
        .bind(data)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Shallow merge: top-level keys of `patch` replace stored keys.
    ///
    /// Returns `None` when no config has this id.
    pub async fn merge(
        &self,
        id: &str,
        patch: &Value,
    ) -> Result<Option<SiteConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("merge_site_config");
        let result = sqlx::query_as::<_, SiteConfigEntity>(
            r#"
            UPDATE site_configs
            SET data = data || $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, template_type, data, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count stored configs.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_site_configs");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM site_configs")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }
}
