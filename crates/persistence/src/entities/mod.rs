//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod site_config;
pub mod site_template;

pub use site_config::SiteConfigEntity;
pub use site_template::SiteTemplateEntity;
