//! Application services.

pub mod site_generator;

pub use site_generator::{GeneratedSite, GeneratorError, SiteGenerator};
