//! General template routes: save, list, fetch and static-site generation.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use domain::models::{GenerateSiteResponse, SaveTemplateResponse};
use persistence::repositories::SiteTemplateRepository;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_site_generated;

/// Keys added by the listing; never stored in the document.
const LISTING_KEYS: [&str; 3] = ["templateId", "createdAt", "lastModified"];

/// POST /api/templates
pub async fn save_template(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Value::Object(mut document) = body else {
        return Err(ApiError::Validation(
            "Template body must be a JSON object".to_string(),
        ));
    };
    for key in LISTING_KEYS {
        document.remove(key);
    }

    let template_id = Uuid::new_v4().to_string();
    let repo = SiteTemplateRepository::new(state.pool.clone());
    repo.create(&template_id, &Value::Object(document)).await?;

    info!(template_id = %template_id, "Template saved");

    Ok(Json(SaveTemplateResponse {
        success: true,
        template_id,
        message: "Template saved successfully".to_string(),
    }))
}

/// GET /api/templates
///
/// Every saved template, newest first.
pub async fn list_templates(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = SiteTemplateRepository::new(state.pool.clone());
    let templates: Vec<Value> = repo
        .list()
        .await?
        .into_iter()
        .map(|entity| entity.into_record())
        .collect();
    Ok(Json(templates))
}

/// GET /api/templates/:template_id
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SiteTemplateRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(&template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;
    Ok(Json(entity.into_record()))
}

/// POST /api/templates/:template_id/generate
pub async fn generate_site(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SiteTemplateRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(&template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    let site = state.generator.generate(&entity.id, &entity.data).await?;
    record_site_generated(site.template_type.as_str());

    Ok(Json(GenerateSiteResponse {
        success: true,
        template_id: Some(entity.id),
        output_path: Some(site.output_path),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_listing_keys_match_entity_record() {
        let entity = persistence::entities::SiteTemplateEntity {
            id: "t".to_string(),
            data: Value::Object(Map::new()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let record = entity.into_record();
        for key in LISTING_KEYS {
            assert!(record.get(key).is_some(), "{} missing from listing", key);
        }
    }
}
