//! Path-based edits of a [`SiteConfig`].
//!
//! Every operation takes the current config by reference and returns a new
//! one; the caller's value is never touched, so a UI layer can compare old and
//! new values for change detection.
//!
//! Paths are dot-separated canonical member names (`hero.title`,
//! `identity.officeHours.saturday`, `reviews.2.rating`). They are checked
//! against the schema table when parsed, so a misspelled member is an
//! [`MutationError::InvalidPath`] before any value is looked at. Flat store
//! keys such as `heroTitle` or `bannerText` are accepted as aliases for their
//! canonical path.
//!
//! List elements are addressed by index. Removing an element shifts every later
//! element down by one, so indices obtained before a removal must be resolved
//! again.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::normalizer::repair_element;
use super::schema::{self, Member, Shape, ROOT};
use crate::models::{Language, SiteConfig};
use shared::validation::{validate_opacity, validate_rating};

/// Errors returned by path-based edits. The config is never modified when one
/// is returned.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Index {index} is out of range for '{path}' (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid value for '{path}': expected {expected}")]
    InvalidValue { path: String, expected: String },

    #[error("Field '{path}' is bilingual and needs a language")]
    LanguageRequired { path: String },

    #[error("Field '{path}' is not bilingual and takes no language")]
    UnexpectedLanguage { path: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MutationError {
    fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        MutationError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Record member or map entry.
    Key(String),
    /// List element.
    Index(usize),
}

/// A path validated against the schema table.
#[derive(Debug, Clone)]
pub struct FieldPath {
    text: String,
    segments: Vec<Segment>,
    shape: Shape,
}

enum Cursor {
    Record(&'static [Member]),
    List(&'static [Member]),
    Map(&'static [Member]),
    Leaf,
}

impl Cursor {
    fn of(shape: Shape) -> Self {
        match shape {
            Shape::Record(members) => Cursor::Record(members),
            Shape::List(members) => Cursor::List(members),
            Shape::Map(members) => Cursor::Map(members),
            _ => Cursor::Leaf,
        }
    }
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, MutationError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(MutationError::invalid_path(path, "path is empty"));
        }

        let mut parts: Vec<&str> = trimmed.split('.').collect();
        if schema::member(ROOT, parts[0]).is_none() {
            if let Some(field) = schema::field_by_wire_key(parts[0]) {
                let mut expanded: Vec<&str> = field.path.split('.').collect();
                expanded.extend_from_slice(&parts[1..]);
                parts = expanded;
            }
        }

        let mut segments = Vec::with_capacity(parts.len());
        let mut cursor = Cursor::Record(ROOT);
        let mut shape = Shape::Record(ROOT);

        for part in &parts {
            if part.is_empty() {
                return Err(MutationError::invalid_path(path, "empty segment"));
            }
            match cursor {
                Cursor::Record(members) => {
                    let member = schema::member(members, part).ok_or_else(|| {
                        MutationError::invalid_path(path, format!("unknown field '{}'", part))
                    })?;
                    segments.push(Segment::Key(member.key.to_string()));
                    shape = member.shape;
                }
                Cursor::List(members) => {
                    let index = part.parse::<usize>().map_err(|_| {
                        MutationError::invalid_path(path, format!("'{}' is not a list index", part))
                    })?;
                    segments.push(Segment::Index(index));
                    shape = Shape::Record(members);
                }
                Cursor::Map(members) => {
                    segments.push(Segment::Key(part.to_string()));
                    shape = Shape::Record(members);
                }
                Cursor::Leaf => {
                    return Err(MutationError::invalid_path(
                        path,
                        format!("'{}' follows a {} field", part, shape.describe()),
                    ));
                }
            }
            cursor = Cursor::of(shape);
        }

        Ok(Self {
            text: parts.join("."),
            segments,
            shape,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Shape of the value the path points at.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    fn list_members(&self) -> Result<&'static [Member], MutationError> {
        match self.shape {
            Shape::List(members) => Ok(members),
            other => Err(MutationError::invalid_path(
                &self.text,
                format!("expected a list, found a {}", other.describe()),
            )),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reads the value at `path`.
pub fn get(config: &SiteConfig, path: &str) -> Result<Value, MutationError> {
    let path = FieldPath::parse(path)?;
    let root = serde_json::to_value(config)?;
    let mut current = &root;

    for (depth, segment) in path.segments.iter().enumerate() {
        current = match segment {
            Segment::Key(key) => match current.get(key.as_str()) {
                Some(value) if !value.is_null() => value,
                _ if depth + 1 == path.segments.len() => return Ok(Value::Null),
                _ => return Err(missing(&path, depth)),
            },
            Segment::Index(index) => {
                let items = current.as_array().map(Vec::as_slice).unwrap_or_default();
                items.get(*index).ok_or_else(|| MutationError::IndexOutOfRange {
                    path: prefix(&path, depth),
                    index: *index,
                    len: items.len(),
                })?
            }
        };
    }

    Ok(current.clone())
}

/// Sets a leaf field.
///
/// Bilingual leaves need `language` and only that language changes; scalar
/// leaves take no language and `value` is coerced to the leaf type.
pub fn set(
    config: &SiteConfig,
    path: &str,
    value: &str,
    language: Option<Language>,
) -> Result<SiteConfig, MutationError> {
    let path = FieldPath::parse(path)?;
    let mut root = serde_json::to_value(config)?;

    let slot = walk_mut(&mut root, &path)?;
    let updated = leaf_value(&path, slot, value, language)?;
    *slot = updated;

    Ok(serde_json::from_value(root)?)
}

/// Sets `field` of element `index` of the list at `array_path`.
///
/// Fails with [`MutationError::IndexOutOfRange`] when `index` is not within
/// the list; lists never grow here, see [`insert_array_element`].
pub fn set_array_element(
    config: &SiteConfig,
    array_path: &str,
    index: usize,
    field: &str,
    value: &str,
    language: Option<Language>,
) -> Result<SiteConfig, MutationError> {
    let list = FieldPath::parse(array_path)?;
    list.list_members()?;
    set(
        config,
        &format!("{}.{}.{}", list.as_str(), index, field),
        value,
        language,
    )
}

/// Appends `element` to the list at `array_path`.
///
/// The element is repaired against the list's element schema the same way
/// stored list elements are, so missing members get blank values. An absent
/// optional list is created.
pub fn insert_array_element<T: Serialize>(
    config: &SiteConfig,
    array_path: &str,
    element: &T,
) -> Result<SiteConfig, MutationError> {
    let path = FieldPath::parse(array_path)?;
    let members = path.list_members()?;
    let element = repair_element(members, &serde_json::to_value(element)?);

    let mut root = serde_json::to_value(config)?;
    let slot = walk_mut(&mut root, &path)?;
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    match slot.as_array_mut() {
        Some(items) => items.push(element),
        None => return Err(MutationError::invalid_path(path.as_str(), "not a list")),
    }

    Ok(serde_json::from_value(root)?)
}

/// Removes element `index` of the list at `array_path`. Later elements shift
/// down by one.
pub fn remove_array_element(
    config: &SiteConfig,
    array_path: &str,
    index: usize,
) -> Result<SiteConfig, MutationError> {
    let path = FieldPath::parse(array_path)?;
    path.list_members()?;

    let mut root = serde_json::to_value(config)?;
    let slot = walk_mut(&mut root, &path)?;
    let len = slot.as_array().map_or(0, Vec::len);
    if index >= len {
        return Err(MutationError::IndexOutOfRange {
            path: path.to_string(),
            index,
            len,
        });
    }
    if let Some(items) = slot.as_array_mut() {
        items.remove(index);
    }

    Ok(serde_json::from_value(root)?)
}

/// The empty element an editor appends when the operator clicks "Add".
pub fn blank_element(array_path: &str) -> Result<Value, MutationError> {
    let path = FieldPath::parse(array_path)?;
    let members = path.list_members()?;
    Ok(Shape::Record(members).blank())
}

/// Walks to the slot `path` names. Intermediate values must exist; the final
/// member is created as `null` when absent (an unset optional field).
fn walk_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Result<&'a mut Value, MutationError> {
    let mut current = root;
    let last = path.segments.len().saturating_sub(1);

    for (depth, segment) in path.segments.iter().enumerate() {
        current = match segment {
            Segment::Key(key) => {
                let object = current
                    .as_object_mut()
                    .ok_or_else(|| absent(path, depth.saturating_sub(1)))?;
                if depth < last && object.get(key.as_str()).map_or(true, Value::is_null) {
                    return Err(missing(path, depth));
                }
                object.entry(key.as_str()).or_insert(Value::Null)
            }
            Segment::Index(index) => {
                let items = current
                    .as_array_mut()
                    .ok_or_else(|| absent(path, depth.saturating_sub(1)))?;
                let len = items.len();
                items
                    .get_mut(*index)
                    .ok_or_else(|| MutationError::IndexOutOfRange {
                        path: prefix(path, depth),
                        index: *index,
                        len,
                    })?
            }
        };
    }

    Ok(current)
}

fn leaf_value(
    path: &FieldPath,
    current: &Value,
    value: &str,
    language: Option<Language>,
) -> Result<Value, MutationError> {
    let invalid = |expected: &str| MutationError::InvalidValue {
        path: path.to_string(),
        expected: expected.to_string(),
    };

    if let Shape::Bilingual = path.shape {
        let language = language.ok_or_else(|| MutationError::LanguageRequired {
            path: path.to_string(),
        })?;
        let mut pair = match current {
            Value::Object(object) => object.clone(),
            _ => serde_json::Map::new(),
        };
        for lang in Language::ALL {
            pair.entry(lang.as_str())
                .or_insert_with(|| Value::String(String::new()));
        }
        pair.insert(language.as_str().to_string(), Value::String(value.to_string()));
        return Ok(Value::Object(pair));
    }

    if language.is_some() {
        return Err(MutationError::UnexpectedLanguage {
            path: path.to_string(),
        });
    }

    match path.shape {
        Shape::Text => Ok(Value::String(value.to_string())),
        Shape::Flag => match value.trim() {
            v if v.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            v if v.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => Err(invalid("true or false")),
        },
        Shape::Unit => {
            let opacity = value
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(Shape::Unit.describe()))?;
            validate_opacity(opacity).map_err(|_| invalid(Shape::Unit.describe()))?;
            Ok(Value::from(opacity))
        }
        Shape::Rating => {
            let rating = value
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid(Shape::Rating.describe()))?;
            validate_rating(rating).map_err(|_| invalid(Shape::Rating.describe()))?;
            Ok(Value::from(rating))
        }
        Shape::Choice(options) => {
            if options.iter().any(|option| *option == value) {
                Ok(Value::String(value.to_string()))
            } else {
                Err(invalid(&format!("one of {}", options.join(", "))))
            }
        }
        other => Err(MutationError::invalid_path(
            path.as_str(),
            format!("a {} is not a leaf field", other.describe()),
        )),
    }
}

fn prefix(path: &FieldPath, depth: usize) -> String {
    path.segments[..depth]
        .iter()
        .map(|segment| match segment {
            Segment::Key(key) => key.clone(),
            Segment::Index(index) => index.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Error for a member absent in the middle of `path`. An absent optional list
/// has no elements, so indexing into it is out of range.
fn missing(path: &FieldPath, depth: usize) -> MutationError {
    match path.segments.get(depth + 1) {
        Some(Segment::Index(index)) => MutationError::IndexOutOfRange {
            path: prefix(path, depth + 1),
            index: *index,
            len: 0,
        },
        _ => absent(path, depth),
    }
}

fn absent(path: &FieldPath, depth: usize) -> MutationError {
    MutationError::invalid_path(
        path.as_str(),
        format!("'{}' is not present on this config", prefix(path, depth + 1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bilingual, Review, TemplateType};
    use crate::services::defaults::defaults_for;
    use serde_json::json;

    fn config() -> SiteConfig {
        defaults_for(TemplateType::Services)
    }

    #[test]
    fn test_set_bilingual_leaf() {
        let original = config();
        let updated = set(&original, "hero.title", "X", Some(Language::Es)).unwrap();

        assert_eq!(updated.hero.title.es, "X");
        assert_eq!(updated.hero.title.en, original.hero.title.en);

        let mut expected = original.clone();
        expected.hero.title.es = "X".to_string();
        assert_eq!(updated, expected);
        assert_ne!(original.hero.title.es, "X");
    }

    #[test]
    fn test_set_scalar_leaves() {
        let original = config();
        let updated = set(&original, "branding.primaryColor", "#123456", None).unwrap();
        assert_eq!(updated.branding.primary_color, "#123456");

        let updated = set(&updated, "hero.opacity", "0.25", None).unwrap();
        assert_eq!(updated.hero.opacity, 0.25);

        let updated = set(&updated, "chatbot.enabled", "false", None).unwrap();
        assert!(!updated.chatbot.enabled);
    }

    #[test]
    fn test_set_nested_bilingual() {
        let updated = set(
            &config(),
            "identity.officeHours.saturday",
            "Closed",
            Some(Language::En),
        )
        .unwrap();
        assert_eq!(updated.identity.office_hours.saturday.en, "Closed");
    }

    #[test]
    fn test_set_accepts_wire_key_alias() {
        let updated = set(&config(), "bannerText", "Oferta", Some(Language::Es)).unwrap();
        assert_eq!(updated.banner.unwrap().text.es, "Oferta");
    }

    #[test]
    fn test_set_unknown_path_fails() {
        let err = set(&config(), "hero.nope", "x", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidPath { .. }));

        let err = set(&config(), "heroes.title", "x", Some(Language::Es)).unwrap_err();
        assert!(matches!(err, MutationError::InvalidPath { .. }));

        let err = set(&config(), "", "x", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidPath { .. }));
    }

    #[test]
    fn test_set_through_absent_section_fails() {
        let restaurants = defaults_for(TemplateType::Restaurants);
        assert!(restaurants.banner.is_none());
        let err = set(&restaurants, "banner.title", "x", Some(Language::Es)).unwrap_err();
        assert!(matches!(err, MutationError::InvalidPath { .. }));
    }

    #[test]
    fn test_set_language_rules() {
        let err = set(&config(), "hero.title", "X", None).unwrap_err();
        assert!(matches!(err, MutationError::LanguageRequired { .. }));

        let err = set(&config(), "identity.phone", "1", Some(Language::En)).unwrap_err();
        assert!(matches!(err, MutationError::UnexpectedLanguage { .. }));
    }

    #[test]
    fn test_set_rejects_values_outside_leaf_type() {
        let err = set(&config(), "hero.opacity", "1.5", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidValue { .. }));

        let err = set(&config(), "reviews.0.rating", "9", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidValue { .. }));

        let err = set(&config(), "chatbot.enabled", "yes", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidValue { .. }));

        let err = set(&config(), "approval.formStatus", "archived", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidValue { .. }));
    }

    #[test]
    fn test_set_container_path_fails() {
        let err = set(&config(), "hero", "x", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidPath { .. }));
    }

    #[test]
    fn test_set_map_entry() {
        let updated = set(
            &config(),
            "approval.sectionApprovals.hero.status",
            "approved",
            None,
        )
        .unwrap();
        let approval = updated.approval.unwrap();
        assert_eq!(
            approval.section_approvals["hero"].status,
            crate::models::ApprovalStatus::Approved
        );
    }

    #[test]
    fn test_set_array_element() {
        let original = config();
        let updated =
            set_array_element(&original, "gallery", 1, "caption", "Tools", Some(Language::En))
                .unwrap();
        assert_eq!(updated.gallery[1].caption.en, "Tools");
        assert_eq!(updated.gallery[0], original.gallery[0]);
    }

    #[test]
    fn test_set_array_element_out_of_range() {
        let original = config();
        assert!(original.gallery.len() <= 99);
        let err = set_array_element(&original, "gallery", 99, "url", "x", None).unwrap_err();
        match err {
            MutationError::IndexOutOfRange { path, index, len } => {
                assert_eq!(path, "gallery");
                assert_eq!(index, 99);
                assert_eq!(len, original.gallery.len());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_set_array_element_requires_list() {
        let err = set_array_element(&config(), "hero", 0, "title", "x", None).unwrap_err();
        assert!(matches!(err, MutationError::InvalidPath { .. }));
    }

    #[test]
    fn test_set_optional_member_of_element() {
        let updated = set_array_element(&config(), "catalog", 0, "price", "$500", None).unwrap();
        assert_eq!(updated.catalog[0].price.as_deref(), Some("$500"));
    }

    #[test]
    fn test_insert_then_remove_last_is_identity() {
        let original = config();
        let review = Review {
            name: "Nuevo".to_string(),
            rating: 4,
            text: Bilingual::new("Muy bien", "Very good"),
        };

        let inserted = insert_array_element(&original, "reviews", &review).unwrap();
        assert_eq!(inserted.reviews.len(), original.reviews.len() + 1);
        assert_eq!(inserted.reviews.last(), Some(&review));

        let removed = remove_array_element(&inserted, "reviews", original.reviews.len()).unwrap();
        assert_eq!(removed, original);
    }

    #[test]
    fn test_insert_repairs_partial_element() {
        let updated =
            insert_array_element(&config(), "gallery", &json!({"url": "new.jpg"})).unwrap();
        let added = updated.gallery.last().unwrap();
        assert_eq!(added.url, "new.jpg");
        assert_eq!(added.caption, Bilingual::default());
    }

    #[test]
    fn test_insert_creates_absent_optional_list() {
        let tourism = defaults_for(TemplateType::Tourism);
        assert!(tourism.about.stats.is_none());
        let blank = blank_element("about.stats").unwrap();
        let updated = insert_array_element(&tourism, "about.stats", &blank).unwrap();
        assert_eq!(updated.about.stats.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_index_into_absent_optional_list_is_out_of_range() {
        let tourism = defaults_for(TemplateType::Tourism);
        assert!(tourism.about.stats.is_none());

        let err =
            set_array_element(&tourism, "about.stats", 0, "icon", "star", None).unwrap_err();
        match err {
            MutationError::IndexOutOfRange { path, index, len } => {
                assert_eq!(path, "about.stats");
                assert_eq!(index, 0);
                assert_eq!(len, 0);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = get(&tourism, "about.stats.0.icon").unwrap_err();
        assert!(matches!(err, MutationError::IndexOutOfRange { len: 0, .. }));

        let err = remove_array_element(&tourism, "about.stats", 0).unwrap_err();
        assert!(matches!(err, MutationError::IndexOutOfRange { len: 0, .. }));
    }

    #[test]
    fn test_remove_shifts_later_elements() {
        let original = config();
        let updated = remove_array_element(&original, "gallery", 0).unwrap();
        assert_eq!(updated.gallery.len(), original.gallery.len() - 1);
        assert_eq!(updated.gallery[0], original.gallery[1]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let original = config();
        let err = remove_array_element(&original, "reviews", original.reviews.len()).unwrap_err();
        assert!(matches!(err, MutationError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_blank_element_for_reviews() {
        let blank = blank_element("reviews").unwrap();
        assert_eq!(
            blank,
            json!({"name": "", "rating": 5, "text": {"es": "", "en": ""}})
        );
        assert!(blank_element("hero.title").is_err());
    }

    #[test]
    fn test_get_values() {
        let original = config();
        assert_eq!(
            get(&original, "hero.title.es").map_err(|e| e.to_string()),
            Err("Invalid path 'hero.title.es': 'es' follows a bilingual text field".to_string())
        );
        assert_eq!(
            get(&original, "hero.title").unwrap(),
            serde_json::to_value(&original.hero.title).unwrap()
        );
        assert_eq!(get(&original, "reviews.0.name").unwrap(), json!("Luis Hernández"));
        assert!(matches!(
            get(&original, "reviews.10.name"),
            Err(MutationError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_field_path_parse() {
        let path = FieldPath::parse("heroTitle").unwrap();
        assert_eq!(path.as_str(), "hero.title");
        assert!(matches!(path.shape(), Shape::Bilingual));

        let path = FieldPath::parse("reviews.3.text").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("reviews".to_string()),
                Segment::Index(3),
                Segment::Key("text".to_string())
            ]
        );

        assert!(FieldPath::parse("reviews.first.text").is_err());
        assert!(FieldPath::parse("hero..title").is_err());
        assert!(FieldPath::parse("templateType").is_err());
    }
}
