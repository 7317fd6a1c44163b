//! Domain layer for WebSitio.
//!
//! This crate contains:
//! - The site configuration model (`SiteConfig` and its sections)
//! - Built-in defaults per business vertical
//! - The normalizer, path mutator and serializer for stored records
//! - Request and response bodies of the config store API

pub mod models;
pub mod services;
