//! General template entity (database row mapping).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Database row mapping for the site_templates table.
#[derive(Debug, Clone, FromRow)]
pub struct SiteTemplateEntity {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteTemplateEntity {
    /// Listing shape: the saved document with `templateId`, `createdAt` and
    /// `lastModified` set from the row.
    pub fn into_record(self) -> Value {
        let mut record = match self.data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        record.insert("templateId".to_string(), Value::String(self.id));
        record.insert(
            "createdAt".to_string(),
            Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert(
            "lastModified".to_string(),
            Value::String(self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_record_adds_listing_keys() {
        let entity = SiteTemplateEntity {
            id: "t-1".to_string(),
            data: json!({"businessName": "Clínica"}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let record = entity.into_record();
        assert_eq!(record["templateId"], "t-1");
        assert_eq!(record["businessName"], "Clínica");
        assert!(record.get("lastModified").is_some());
    }
}
