//! Request and response bodies of the config store API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::template::TemplateType;

/// Body of `POST /api/config` ("Generate Client").
///
/// Besides the three required keys the body carries the full serialized site
/// configuration, kept verbatim in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteConfigRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Business name must be 1-200 characters"
    ))]
    pub business_name: String,

    pub template_type: TemplateType,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CreateSiteConfigRequest {
    /// Builds a create request from a serialized config, using `name` for both
    /// the record name and the business name.
    pub fn from_wire(name: impl Into<String>, template_type: TemplateType, wire: Value) -> Self {
        let mut fields = match wire {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for key in ["name", "businessName", "templateType", "id"] {
            fields.remove(key);
        }
        let name = name.into();
        Self {
            business_name: name.clone(),
            name,
            template_type,
            fields,
        }
    }

    /// The full record to store: `fields` plus the three required keys.
    pub fn into_record(self) -> Map<String, Value> {
        let mut record = self.fields;
        record.insert("name".into(), Value::String(self.name));
        record.insert("businessName".into(), Value::String(self.business_name));
        record.insert(
            "templateType".into(),
            Value::String(self.template_type.as_str().to_string()),
        );
        record
    }
}

/// Response of `POST /api/templates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateResponse {
    pub success: bool,
    pub template_id: String,
    pub message: String,
}

/// Response of `POST /api/templates/:id/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSiteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}
