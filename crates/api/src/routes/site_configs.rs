//! Client config routes.
//!
//! The store keeps one flat JSON record per client. Editors read it with
//! `GET`, save partial or full records with `PUT` and create new clients with
//! `POST`. Records are stored as sent; normalization is the editors' job.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateSiteConfigRequest, TemplateType};
use persistence::entities::site_config::storable_data;
use persistence::repositories::SiteConfigRepository;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_config_saved;

const MAX_SLUG_LENGTH: usize = 40;

/// GET /api/config/:client_id
///
/// Returns the stored record with its `id`. Query strings such as the
/// editors' `_t` cache buster are ignored.
pub async fn get_config(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_client_id(&client_id)?;

    let repo = SiteConfigRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(&client_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Configuration not found".to_string()))?;

    Ok(Json(entity.into_record()))
}

/// PUT /api/config/:client_id
///
/// Shallow merge of the body into the stored record. A missing record is
/// created when the body names its `templateType`. The template type of an
/// existing record never changes.
pub async fn put_config(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    validate_client_id(&client_id)?;
    let body = into_object(body)?;
    let requested_type = template_type_of(&body)?;

    let repo = SiteConfigRepository::new(state.pool.clone());

    let Some(existing) = repo.find_by_id(&client_id).await? else {
        let template_type = requested_type
            .ok_or_else(|| ApiError::NotFound("Configuration not found".to_string()))?;
        let entity = repo
            .create(&client_id, template_type.as_str(), &storable_data(body))
            .await?;
        record_config_saved(template_type.as_str(), "create");
        info!(client_id = %client_id, template_type = %template_type, "Created config on save");
        return Ok(Json(entity.into_record()));
    };

    if let Some(requested) = requested_type {
        if requested.as_str() != existing.template_type {
            warn!(
                client_id = %client_id,
                stored = %existing.template_type,
                requested = %requested,
                "Rejected template type change"
            );
            return Err(ApiError::Conflict(format!(
                "Template type is fixed at creation (stored: {}, received: {})",
                existing.template_type, requested
            )));
        }
    }

    let key_count = body.len();
    let entity = repo
        .merge(&client_id, &storable_data(body))
        .await?
        .ok_or_else(|| ApiError::NotFound("Configuration not found".to_string()))?;

    record_config_saved(&entity.template_type, "merge");
    info!(client_id = %client_id, keys = key_count, "Config saved");

    Ok(Json(entity.into_record()))
}

/// POST /api/config
///
/// "Generate Client": validates the request and stores it under a fresh
/// client id derived from the business name.
pub async fn create_config(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request: CreateSiteConfigRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Invalid configuration data: {}", e)))?;
    request.validate()?;

    let template_type = request.template_type;
    let client_id = new_client_id(&request.business_name);
    let record = request.into_record();

    let repo = SiteConfigRepository::new(state.pool.clone());
    let entity = repo
        .create(&client_id, template_type.as_str(), &storable_data(record))
        .await?;

    record_config_saved(template_type.as_str(), "create");
    info!(client_id = %client_id, template_type = %template_type, "Client config created");

    Ok((StatusCode::CREATED, Json(entity.into_record())))
}

fn validate_client_id(client_id: &str) -> Result<(), ApiError> {
    shared::validation::validate_record_id(client_id).map_err(|e| {
        ApiError::Validation(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid client id".to_string()),
        )
    })
}

fn into_object(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::Validation(
            "Configuration body must be a JSON object".to_string(),
        )),
    }
}

/// `templateType` of a body: absent is fine, anything else must name a
/// known vertical.
fn template_type_of(body: &Map<String, Value>) -> Result<Option<TemplateType>, ApiError> {
    match body.get("templateType") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => s
            .parse::<TemplateType>()
            .map(Some)
            .map_err(ApiError::Validation),
        Some(_) => Err(ApiError::Validation(
            "templateType must be a string".to_string(),
        )),
    }
}

/// Readable, unique client id: `<slug of business name>-<8 hex chars>`.
pub fn new_client_id(business_name: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", slugify(business_name), &suffix[..8])
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        };
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
        if slug.len() >= MAX_SLUG_LENGTH {
            break;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "client".to_string()
    } else {
        slug.to_string()
    }
}
