//! Reconciles stored records with the canonical [`SiteConfig`] model.
//!
//! Stored records are flat, loosely typed and carry years of drift: bilingual
//! fields saved as plain strings or as `JSON.stringify` output, numbers saved
//! as strings, partial list elements, missing optional sections. [`normalize`]
//! never fails; anything it cannot use falls back to the editor defaults.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::schema::{self, LegacyEncoding, Member, Shape, FIELDS, ROOT};
use crate::models::{SiteConfig, TemplateType};

/// Builds a complete `SiteConfig` from a stored record and the defaults of the
/// editor's template.
///
/// `raw` may be missing, `null`, an object, or an object encoded as a JSON
/// string. The template type always comes from `defaults`.
pub fn normalize(raw: Option<&Value>, defaults: &SiteConfig) -> SiteConfig {
    let template = defaults.template_type;

    let decoded;
    let record = match raw {
        Some(Value::Object(record)) => record,
        Some(Value::String(encoded)) => {
            decoded = parse_encoded(encoded);
            match decoded.as_ref().and_then(Value::as_object) {
                Some(record) => record,
                None => return defaults.clone(),
            }
        }
        _ => return defaults.clone(),
    };

    if let Some(stored) = record.get("templateType").and_then(Value::as_str) {
        if stored != template.as_str() {
            warn!(
                stored_template = stored,
                template = %template,
                "Stored template type differs from the editor template, keeping the editor template"
            );
        }
    }

    let mut canonical = match serde_json::to_value(defaults) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Failed to encode default config");
            return defaults.clone();
        }
    };

    if is_canonical_shape(record) {
        debug!(template = %template, "Record is in canonical shape");
        canonical = merge_canonical(record, &canonical);
    } else {
        merge_wire(record, template, &mut canonical);
    }

    if !template.supports_approval() {
        if let Some(object) = canonical.as_object_mut() {
            object.remove("approval");
        }
    }

    match serde_json::from_value(canonical) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, template = %template, "Normalized record does not fit the model, using defaults");
            defaults.clone()
        }
    }
}

/// Sections of a serialized `SiteConfig` that never appear as flat store keys.
const CANONICAL_SECTIONS: [&str; 4] = ["identity", "branding", "hero", "chatbot"];

/// A record holding a whole serialized `SiteConfig` (an export of the model
/// rather than a flat store record).
fn is_canonical_shape(record: &Map<String, Value>) -> bool {
    CANONICAL_SECTIONS
        .iter()
        .any(|section| record.get(*section).is_some_and(Value::is_object))
}

/// Repairs a canonical-shape record against the root schema, member by member.
fn merge_canonical(record: &Map<String, Value>, canonical: &Value) -> Value {
    let mut merged = repair_record(ROOT, record, canonical);
    if let (Some(object), Some(template)) = (merged.as_object_mut(), canonical.get("templateType")) {
        object.insert("templateType".to_string(), template.clone());
    }
    merged
}

/// Applies every usable flat store key to `canonical`.
fn merge_wire(record: &Map<String, Value>, template: TemplateType, canonical: &mut Value) {
    for field in FIELDS {
        let key = field.wire.resolve(template);
        let Some(value) = record.get(key).filter(|v| !v.is_null()) else {
            continue;
        };
        if field.path == "approval" && !template.supports_approval() {
            debug!(template = %template, "Ignoring approval state for template without approvals");
            continue;
        }
        let Some(shape) = field.shape() else {
            continue;
        };
        let fallback = lookup(canonical, field.path).cloned().unwrap_or(Value::Null);
        let Some(repaired) = try_repair(&shape, value, &fallback, field.legacy) else {
            debug!(key = key, "Unusable stored value, keeping default");
            continue;
        };
        if let Some(slot) = slot_mut(canonical, field.path) {
            *slot = repaired;
        }
    }
}

/// Repairs one value against `shape`.
///
/// `fallback` is the value to keep when `raw` is unusable; `Value::Null` means
/// there is none and the blank value of the shape is used instead. `legacy`
/// tells whether a string in place of a record or list should be decoded.
pub(crate) fn repair(shape: &Shape, raw: &Value, fallback: &Value, legacy: LegacyEncoding) -> Value {
    try_repair(shape, raw, fallback, legacy).unwrap_or_else(|| or_blank(shape, fallback))
}

/// Like [`repair`], but `None` when `raw` is unusable for `shape`.
fn try_repair(
    shape: &Shape,
    raw: &Value,
    fallback: &Value,
    legacy: LegacyEncoding,
) -> Option<Value> {
    let repaired = match *shape {
        Shape::Text => match raw {
            Value::String(s) => Value::String(s.clone()),
            Value::Number(n) => Value::String(n.to_string()),
            _ => return None,
        },
        Shape::Flag => match raw {
            Value::Bool(b) => Value::Bool(*b),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Value::Bool(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Value::Bool(false),
            _ => return None,
        },
        Shape::Unit => Value::from(number(raw)?.clamp(0.0, 1.0)),
        Shape::Rating => Value::from(number(raw)?.round().clamp(1.0, 5.0) as u64),
        Shape::Choice(options) => match raw {
            Value::String(s) if options.iter().any(|option| option == s) => Value::String(s.clone()),
            _ => return None,
        },
        Shape::Bilingual => return repair_bilingual(raw),
        Shape::Record(members) => match raw {
            Value::Object(object) => repair_record(members, object, fallback),
            Value::String(s) if legacy == LegacyEncoding::JsonString => match parse_encoded(s) {
                Some(parsed @ Value::Object(_)) => {
                    return try_repair(shape, &parsed, fallback, LegacyEncoding::None)
                }
                _ => return None,
            },
            _ => return None,
        },
        Shape::List(members) => match raw {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| repair_element(members, item))
                    .collect(),
            ),
            Value::String(s) if legacy == LegacyEncoding::JsonString => match parse_encoded(s) {
                Some(parsed @ Value::Array(_)) => {
                    return try_repair(shape, &parsed, fallback, LegacyEncoding::None)
                }
                _ => return None,
            },
            _ => return None,
        },
        Shape::Map(members) => match raw {
            Value::Object(entries) => {
                let mut merged = fallback.as_object().cloned().unwrap_or_default();
                for (key, entry) in entries {
                    let previous = merged.get(key).cloned().unwrap_or(Value::Null);
                    let repaired =
                        repair(&Shape::Record(members), entry, &previous, LegacyEncoding::None);
                    merged.insert(key.clone(), repaired);
                }
                Value::Object(merged)
            }
            _ => return None,
        },
    };
    Some(repaired)
}

/// Repairs a list element independently of its neighbours, starting from a
/// blank element.
pub(crate) fn repair_element(members: &'static [Member], item: &Value) -> Value {
    repair(&Shape::Record(members), item, &Value::Null, LegacyEncoding::None)
}

fn repair_bilingual(raw: &Value) -> Option<Value> {
    match raw {
        Value::Object(object) => {
            let es = object.get("es").and_then(text);
            let en = object.get("en").and_then(text);
            match (es, en) {
                (Some(es), Some(en)) => Some(pair(es, en)),
                (Some(one), None) | (None, Some(one)) => Some(pair(one.clone(), one)),
                (None, None) => None,
            }
        }
        Value::String(s) => match parse_encoded(s) {
            Some(parsed @ Value::Object(_)) => repair_bilingual(&parsed),
            _ => Some(pair(s.clone(), s.clone())),
        },
        Value::Number(n) => Some(pair(n.to_string(), n.to_string())),
        _ => None,
    }
}

fn repair_record(members: &[Member], object: &Map<String, Value>, fallback: &Value) -> Value {
    let mut out = Map::new();

    for member in members {
        let found = std::iter::once(member.key)
            .chain(member.aliases.iter().copied())
            .find_map(|key| object.get(key).filter(|v| !v.is_null()));
        let previous = fallback.get(member.key).unwrap_or(&Value::Null);

        let value = match found {
            Some(value) => repair(&member.shape, value, previous, LegacyEncoding::None),
            None if !previous.is_null() => previous.clone(),
            None if member.optional => continue,
            None => member.shape.blank(),
        };
        out.insert(member.key.to_string(), value);
    }

    Value::Object(out)
}

fn lookup<'a>(canonical: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(canonical, |current, segment| current.get(segment))
        .filter(|value| !value.is_null())
}

/// Walks to the canonical slot for a dotted path, seeding absent optional
/// sections (e.g. a banner the defaults lack) with blank records.
fn slot_mut<'a>(canonical: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = canonical;
    let mut members = ROOT;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let member = schema::member(members, segment)?;
        let child = current
            .as_object_mut()?
            .entry(segment)
            .or_insert(Value::Null);

        if segments.peek().is_some() {
            let Shape::Record(children) = member.shape else {
                return None;
            };
            if child.is_null() {
                *child = member.shape.blank();
            }
            members = children;
        }
        current = child;
    }

    Some(current)
}

fn or_blank(shape: &Shape, fallback: &Value) -> Value {
    if fallback.is_null() {
        shape.blank()
    } else {
        fallback.clone()
    }
}

fn pair(es: String, en: String) -> Value {
    let mut object = Map::new();
    object.insert("es".to_string(), Value::String(es));
    object.insert("en".to_string(), Value::String(en));
    Value::Object(object)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|x| x.is_finite())
}

/// Decodes a string holding a JSON object or array. Anything else, including
/// a string that merely starts with `{`, yields `None`.
pub(crate) fn parse_encoded(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Stored value looks like JSON but does not parse");
            None
        }
    }
}
