//! Editor client for the WebSitio config store.
//!
//! [`EditorSession`] holds one client's [`domain::models::SiteConfig`] in
//! memory, routes every edit through the path mutator and talks to the store
//! through a [`ConfigStore`]. [`HttpConfigStore`] is the reqwest-backed store.

pub mod client;
pub mod config;
pub mod session;

pub use client::{ClientError, ConfigStore, HttpConfigStore};
pub use config::EditorConfig;
pub use session::{EditorSession, Export, ImportError, LoadOutcome, SaveError};
