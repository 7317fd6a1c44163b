//! One editing session over one client's configuration.
//!
//! The session owns the current [`SiteConfig`]. Loads never fail: when the
//! store is unreachable or the record is missing the session continues with
//! the template defaults. Edits replace the whole value through the mutator,
//! so a failed edit leaves the previous config in place.

use std::path::{Path, PathBuf};

use domain::models::{CreateSiteConfigRequest, Language, SiteConfig, TemplateType};
use domain::services::{
    defaults_for, insert_array_element, is_known_key, normalize, remove_array_element,
    reset_client_approvals, serialize, serialize_structured, set, set_array_element,
    MutationError,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use crate::client::{ClientError, ConfigStore};

const GENERIC_SAVE_ERROR: &str = "Error saving configuration";

/// Save or create failure, with the text to show the operator.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SaveError {
    pub message: String,
    #[source]
    pub source: Option<ClientError>,
}

impl From<ClientError> for SaveError {
    fn from(err: ClientError) -> Self {
        let message = err
            .store_message()
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_SAVE_ERROR.to_string());
        Self {
            message,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err).into()
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Imported configuration must be a JSON object")]
    NotAnObject,

    #[error("Imported file has no configuration fields for the {0} template")]
    UnrecognizedShape(TemplateType),
}

/// How the last load went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Defaulted,
}

/// A downloadable snapshot of the config.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

impl Export {
    /// Writes the snapshot into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

pub struct EditorSession<S> {
    store: S,
    client_id: String,
    defaults: SiteConfig,
    config: SiteConfig,
}

impl<S: ConfigStore> EditorSession<S> {
    /// Opens a session and performs the initial load.
    pub async fn open(store: S, client_id: impl Into<String>, template: TemplateType) -> Self {
        let defaults = defaults_for(template);
        let mut session = Self {
            store,
            client_id: client_id.into(),
            config: defaults.clone(),
            defaults,
        };
        session.reload().await;
        session
    }

    /// Fetches the stored record again and replaces the in-memory config.
    ///
    /// Any failure falls back to the defaults.
    pub async fn reload(&mut self) -> LoadOutcome {
        match self.store.load(&self.client_id).await {
            Ok(record) => {
                self.config = normalize(Some(&record), &self.defaults);
                info!(client_id = %self.client_id, "Config loaded");
                LoadOutcome::Loaded
            }
            Err(err) => {
                if err.is_not_found() {
                    info!(client_id = %self.client_id, "No stored config, using defaults");
                } else {
                    warn!(client_id = %self.client_id, error = %err, "Config load failed, using defaults");
                }
                self.config = self.defaults.clone();
                LoadOutcome::Defaulted
            }
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn template_type(&self) -> TemplateType {
        self.defaults.template_type
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn defaults(&self) -> &SiteConfig {
        &self.defaults
    }

    pub fn set(
        &mut self,
        path: &str,
        value: &str,
        language: Option<Language>,
    ) -> Result<(), MutationError> {
        self.config = set(&self.config, path, value, language)?;
        Ok(())
    }

    pub fn set_array_element(
        &mut self,
        array_path: &str,
        index: usize,
        field: &str,
        value: &str,
        language: Option<Language>,
    ) -> Result<(), MutationError> {
        self.config = set_array_element(&self.config, array_path, index, field, value, language)?;
        Ok(())
    }

    pub fn insert_array_element<T: Serialize>(
        &mut self,
        array_path: &str,
        element: &T,
    ) -> Result<(), MutationError> {
        self.config = insert_array_element(&self.config, array_path, element)?;
        Ok(())
    }

    pub fn remove_array_element(
        &mut self,
        array_path: &str,
        index: usize,
    ) -> Result<(), MutationError> {
        self.config = remove_array_element(&self.config, array_path, index)?;
        Ok(())
    }

    /// Puts every section of the client-approval form back to pending.
    pub fn reset_approvals(&mut self) {
        self.config = reset_client_approvals(&self.config);
    }

    /// Writes the config to the store in its legacy-compatible layout.
    pub async fn save(&self) -> Result<Value, SaveError> {
        let record = serialize(&self.config)?;
        let stored = self.store.save(&self.client_id, &record).await?;
        info!(client_id = %self.client_id, "Config saved");
        Ok(stored)
    }

    /// "Generate Client": stores a copy of the current config as a new client
    /// named `name` and returns the new client id.
    pub async fn create_client(&self, name: &str) -> Result<String, SaveError> {
        let request = CreateSiteConfigRequest::from_wire(
            name.trim(),
            self.template_type(),
            serialize(&self.config)?,
        );
        if let Err(errors) = request.validate() {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid client name".to_string());
            return Err(SaveError {
                message,
                source: None,
            });
        }

        let stored = self.store.create(&request).await?;
        let id = stored
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SaveError::from(ClientError::InvalidResponse(
                    "created record has no id".to_string(),
                ))
            })?
            .to_string();

        info!(client_id = %id, template_type = %self.template_type(), "Client created");
        Ok(id)
    }

    /// Pretty-printed structured JSON named `websitiopro-config-<client id>.json`.
    pub fn export(&self) -> Result<Export, serde_json::Error> {
        let contents = serde_json::to_string_pretty(&serialize_structured(&self.config)?)?;
        Ok(Export {
            file_name: format!("websitiopro-config-{}.json", self.client_id),
            contents,
        })
    }

    /// Replaces the config with an imported file. On error nothing changes.
    pub fn import(&mut self, text: &str) -> Result<(), ImportError> {
        let value: Value = serde_json::from_str(text)?;
        let Some(object) = value.as_object() else {
            return Err(ImportError::NotAnObject);
        };
        let template = self.template_type();
        if !object.keys().any(|key| is_known_key(key, template)) {
            return Err(ImportError::UnrecognizedShape(template));
        }
        self.config = normalize(Some(&value), &self.defaults);
        info!(client_id = %self.client_id, "Config imported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain::models::{Bilingual, Review};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store. `fail_with` makes every call fail with that status.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, Value>>,
        fail_with: Option<(u16, Option<&'static str>, Option<&'static str>)>,
    }

    impl MemoryStore {
        fn with(client_id: &str, record: Value) -> Self {
            let store = Self::default();
            store
                .records
                .lock()
                .unwrap()
                .insert(client_id.to_string(), record);
            store
        }

        fn failing(status: u16, error: Option<&'static str>, message: Option<&'static str>) -> Self {
            Self {
                fail_with: Some((status, error, message)),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), ClientError> {
            match self.fail_with {
                Some((status, error, message)) => Err(ClientError::Status {
                    status,
                    error: error.map(str::to_string),
                    message: message.map(str::to_string),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ConfigStore for MemoryStore {
        async fn load(&self, client_id: &str) -> Result<Value, ClientError> {
            self.check()?;
            self.records
                .lock()
                .unwrap()
                .get(client_id)
                .cloned()
                .ok_or(ClientError::Status {
                    status: 404,
                    error: Some("not_found".into()),
                    message: Some("Configuration not found".into()),
                })
        }

        async fn save(&self, client_id: &str, record: &Value) -> Result<Value, ClientError> {
            self.check()?;
            self.records
                .lock()
                .unwrap()
                .insert(client_id.to_string(), record.clone());
            Ok(record.clone())
        }

        async fn create(&self, request: &CreateSiteConfigRequest) -> Result<Value, ClientError> {
            self.check()?;
            let id = format!("client-{}", self.records.lock().unwrap().len() + 1);
            let mut record = serde_json::to_value(request)?;
            record["id"] = Value::String(id.clone());
            self.records.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }
    }

    #[tokio::test]
    async fn test_open_missing_record_uses_defaults() {
        let session = EditorSession::open(MemoryStore::default(), "acme", TemplateType::Retail).await;
        assert_eq!(session.config(), &defaults_for(TemplateType::Retail));
    }

    #[tokio::test]
    async fn test_open_store_failure_uses_defaults() {
        let store = MemoryStore::failing(500, Some("boom"), None);
        let mut session = EditorSession::open(store, "acme", TemplateType::Tourism).await;
        assert_eq!(session.config(), &defaults_for(TemplateType::Tourism));
        assert_eq!(session.reload().await, LoadOutcome::Defaulted);
    }

    #[tokio::test]
    async fn test_open_normalizes_stored_record() {
        let store = MemoryStore::with(
            "acme",
            json!({"templateType": "professionals", "address": "Calle 5", "businessName": "Acme"}),
        );
        let session = EditorSession::open(store, "acme", TemplateType::Professionals).await;
        assert_eq!(session.config().identity.address, Bilingual::same("Calle 5"));
        assert_eq!(session.config().identity.business_name, "Acme");
    }

    #[tokio::test]
    async fn test_reload_picks_up_external_changes() {
        let mut session = EditorSession::open(
            MemoryStore::with("acme", json!({"businessName": "Uno"})),
            "acme",
            TemplateType::Services,
        )
        .await;
        session
            .store
            .records
            .lock()
            .unwrap()
            .insert("acme".into(), json!({"businessName": "Dos"}));

        assert_eq!(session.reload().await, LoadOutcome::Loaded);
        assert_eq!(session.config().identity.business_name, "Dos");
    }

    #[tokio::test]
    async fn test_edit_save_reload_round_trip() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Professionals).await;
        session.set("hero.title", "Bienvenidos", Some(Language::Es)).unwrap();
        session
            .set("bannerText", "Oferta de verano", Some(Language::En))
            .unwrap();
        session
            .insert_array_element(
                "reviews",
                &Review {
                    name: "Ana".into(),
                    rating: 4,
                    text: Bilingual::new("Excelente", "Great"),
                },
            )
            .unwrap();
        let edited = session.config().clone();

        let stored = session.save().await.unwrap();
        assert!(stored["bannerText"].is_string());

        assert_eq!(session.reload().await, LoadOutcome::Loaded);
        assert_eq!(session.config(), &edited);
    }

    #[tokio::test]
    async fn test_failed_edit_keeps_config() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Retail).await;
        let before = session.config().clone();
        let len = before.gallery.len();

        let err = session
            .set_array_element("gallery", len + 10, "url", "x", None)
            .unwrap_err();
        assert!(matches!(err, MutationError::IndexOutOfRange { .. }));
        assert_eq!(session.config(), &before);
    }

    #[tokio::test]
    async fn test_remove_then_insert_shifts_indices() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Services).await;
        let reviews = session.config().reviews.clone();
        assert!(reviews.len() >= 2);

        session.remove_array_element("reviews", 0).unwrap();
        assert_eq!(session.config().reviews[0], reviews[1]);
    }

    #[tokio::test]
    async fn test_save_error_uses_store_message() {
        let store = MemoryStore::failing(400, Some("validation_error"), Some("Value rejected"));
        let session = EditorSession::open(store, "acme", TemplateType::Retail).await;
        let err = session.save().await.unwrap_err();
        assert_eq!(err.message, "Value rejected");
        assert!(err.source.is_some());
    }

    #[tokio::test]
    async fn test_save_error_generic_fallback() {
        let store = MemoryStore::failing(502, None, None);
        let session = EditorSession::open(store, "acme", TemplateType::Retail).await;
        let err = session.save().await.unwrap_err();
        assert_eq!(err.message, GENERIC_SAVE_ERROR);
    }

    #[tokio::test]
    async fn test_create_client_returns_new_id() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "template", TemplateType::Restaurants).await;
        session.set("identity.phone", "555-0101", None).unwrap();

        let id = session.create_client("  La Terraza ").await.unwrap();
        let records = session.store.records.lock().unwrap();
        let stored = &records[&id];
        assert_eq!(stored["name"], "La Terraza");
        assert_eq!(stored["businessName"], "La Terraza");
        assert_eq!(stored["templateType"], "restaurants");
        assert_eq!(stored["phone"], "555-0101");
        assert!(stored["menuPages"].is_array());
    }

    #[tokio::test]
    async fn test_create_client_rejects_blank_name() {
        let session =
            EditorSession::open(MemoryStore::default(), "template", TemplateType::Retail).await;
        let err = session.create_client("   ").await.unwrap_err();
        assert!(err.source.is_none());
        assert!(session.store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_file_name_and_contents() {
        let session =
            EditorSession::open(MemoryStore::default(), "acme-01", TemplateType::Professionals).await;
        let export = session.export().unwrap();
        assert_eq!(export.file_name, "websitiopro-config-acme-01.json");
        assert!(export.contents.contains('\n'));

        let parsed: Value = serde_json::from_str(&export.contents).unwrap();
        assert!(parsed["address"].is_object());

        let dir = tempfile::tempdir().unwrap();
        let path = export.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), export.contents);
    }

    #[tokio::test]
    async fn test_export_then_import_restores_config() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Tourism).await;
        session.set("hero.title", "Cenotes", Some(Language::Es)).unwrap();
        let edited = session.config().clone();
        let export = session.export().unwrap();

        session.set("hero.title", "Otro", Some(Language::Es)).unwrap();
        session.import(&export.contents).unwrap();
        assert_eq!(session.config(), &edited);
    }

    #[tokio::test]
    async fn test_import_not_json_leaves_config_unchanged() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Retail).await;
        let before = session.config().clone();

        let err = session.import("not json").unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
        assert_eq!(session.config(), &before);

        let err = session.import("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ImportError::NotAnObject));
        assert_eq!(session.config(), &before);
    }

    #[tokio::test]
    async fn test_import_canonical_config_keeps_edits() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Retail).await;
        session
            .set("identity.businessName", "Mi Tienda", None)
            .unwrap();
        session
            .set("hero.title", "Bienvenidos", Some(Language::Es))
            .unwrap();
        let edited = session.config().clone();
        let file = serde_json::to_string_pretty(&edited).unwrap();

        let mut fresh =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Retail).await;
        fresh.import(&file).unwrap();

        assert_eq!(fresh.config(), &edited);
        assert_eq!(fresh.config().identity.business_name, "Mi Tienda");
    }

    #[tokio::test]
    async fn test_import_without_known_fields_is_rejected() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Retail).await;
        session
            .set("identity.businessName", "Mi Tienda", None)
            .unwrap();
        let before = session.config().clone();

        for text in [r#"{}"#, r#"{"templateType": "retail"}"#, r#"{"foo": 1, "menuPages": []}"#] {
            let err = session.import(text).unwrap_err();
            assert!(
                matches!(err, ImportError::UnrecognizedShape(TemplateType::Retail)),
                "{}",
                text
            );
            assert_eq!(session.config(), &before);
        }
    }

    #[test]
    fn test_import_partial_object_fills_defaults() {
        let mut session = tokio_test::block_on(EditorSession::open(
            MemoryStore::default(),
            "acme",
            TemplateType::Tourism,
        ));

        session.import(r#"{"address": "Calle 5"}"#).unwrap();

        let config = session.config();
        assert_eq!(config.identity.address, Bilingual::same("Calle 5"));
        assert_eq!(config.hero, session.defaults().hero);
        assert_eq!(config.template_type, TemplateType::Tourism);
    }

    #[tokio::test]
    async fn test_reset_approvals_keeps_form_flag() {
        let mut session =
            EditorSession::open(MemoryStore::default(), "acme", TemplateType::Services).await;
        session.set("approval.isFormEnabled", "true", None).unwrap();
        session.set("approval.formStatus", "completed", None).unwrap();

        session.reset_approvals();

        let approval = session.config().approval.as_ref().unwrap();
        assert!(approval.enabled);
        assert_eq!(
            approval,
            &domain::models::Approval::pending_for(TemplateType::Services, true)
        );
    }
}
