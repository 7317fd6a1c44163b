//! Repository implementations for database operations.

pub mod site_config;
pub mod site_template;

pub use site_config::SiteConfigRepository;
pub use site_template::SiteTemplateRepository;
