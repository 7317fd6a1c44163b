//! General template repository for database operations.

use serde_json::Value;
use sqlx::PgPool;

use crate::entities::SiteTemplateEntity;
use crate::metrics::QueryTimer;

/// Repository for documents saved by the general template editor.
#[derive(Clone)]
pub struct SiteTemplateRepository {
    pool: PgPool,
}

impl SiteTemplateRepository {
    /// Creates a new SiteTemplateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Save a template document under a new id.
    pub async fn create(&self, id: &str, data: &Value) -> Result<SiteTemplateEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_site_template");
        let result = sqlx::query_as::<_, SiteTemplateEntity>(
            r#"
            INSERT INTO site_templates (id, data)
            VALUES ($1, $2)
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a template by id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<SiteTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_site_template");
        let result = sqlx::query_as::<_, SiteTemplateEntity>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM site_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All templates, newest first.
    pub async fn list(&self) -> Result<Vec<SiteTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_site_templates");
        let result = sqlx::query_as::<_, SiteTemplateEntity>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM site_templates
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
