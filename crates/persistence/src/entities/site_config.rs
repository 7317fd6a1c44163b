//! Site config entity (database row mapping).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Keys owned by the row itself. They are never stored inside `data`.
pub const RESERVED_KEYS: [&str; 4] = ["id", "templateType", "createdAt", "updatedAt"];

/// Database row mapping for the site_configs table.
#[derive(Debug, Clone, FromRow)]
pub struct SiteConfigEntity {
    pub id: String,
    pub template_type: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteConfigEntity {
    /// The flat record served to editors: stored fields plus the row's own
    /// columns.
    pub fn into_record(self) -> Value {
        let mut record = match self.data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        record.insert("id".to_string(), Value::String(self.id));
        record.insert("templateType".to_string(), Value::String(self.template_type));
        record.insert(
            "createdAt".to_string(),
            Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert(
            "updatedAt".to_string(),
            Value::String(self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(record)
    }
}

/// Drops row-owned keys from an incoming body before it is written to `data`.
pub fn storable_data(mut body: Map<String, Value>) -> Value {
    for key in RESERVED_KEYS {
        body.remove(key);
    }
    Value::Object(body)
}
