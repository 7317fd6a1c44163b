//! Converts a [`SiteConfig`] to the flat record layout of the config store.
//!
//! The store holds one flat object per client. Which fields are written as
//! JSON strings depends on the template (see [`FIELDS`]): the general
//! template has always saved `address`, `bannerText` and the chatbot texts
//! through `JSON.stringify`, the verticals save structured objects. Existing
//! records rely on that, so [`serialize`] keeps doing it.

use serde_json::{Map, Value};

use super::schema::{LegacyEncoding, FIELDS};
use crate::models::SiteConfig;

/// Store record for a save, with legacy encodings applied.
pub fn serialize(config: &SiteConfig) -> Result<Value, serde_json::Error> {
    encode(config, true)
}

/// Store record with every field structured. Used for exports and generated
/// sites.
pub fn serialize_structured(config: &SiteConfig) -> Result<Value, serde_json::Error> {
    encode(config, false)
}

fn encode(config: &SiteConfig, legacy: bool) -> Result<Value, serde_json::Error> {
    let template = config.template_type;
    let canonical = serde_json::to_value(config)?;

    let mut wire = Map::new();
    wire.insert(
        "templateType".to_string(),
        Value::String(template.as_str().to_string()),
    );

    for field in FIELDS {
        if field.path == "approval" && !template.supports_approval() {
            continue;
        }
        let Some(value) = lookup(&canonical, field.path) else {
            continue;
        };

        let mut value = value.clone();
        if field.path == "catalog" {
            rename_image_key(&mut value, template.catalog_image_key());
        }
        if legacy {
            value = apply_encoding(value, field.save_encoding(template))?;
        }
        wire.insert(field.wire.resolve(template).to_string(), value);
    }

    Ok(Value::Object(wire))
}

fn lookup<'a>(canonical: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = canonical;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    (!current.is_null()).then_some(current)
}

fn rename_image_key(catalog: &mut Value, image_key: &str) {
    if image_key == "image" {
        return;
    }
    let Some(items) = catalog.as_array_mut() else {
        return;
    };
    for item in items {
        if let Some(object) = item.as_object_mut() {
            if let Some(image) = object.remove("image") {
                object.insert(image_key.to_string(), image);
            }
        }
    }
}

fn apply_encoding(value: Value, encoding: LegacyEncoding) -> Result<Value, serde_json::Error> {
    match encoding {
        LegacyEncoding::None => Ok(value),
        LegacyEncoding::JsonString => Ok(Value::String(serde_json::to_string(&value)?)),
        LegacyEncoding::SingleLangString => match value.get("es").and_then(Value::as_str) {
            Some(es) => Ok(Value::String(es.to_string())),
            None => Ok(value),
        },
    }
}
