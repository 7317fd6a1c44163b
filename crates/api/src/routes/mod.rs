//! HTTP route handlers.

pub mod health;
pub mod site_configs;
pub mod templates;
