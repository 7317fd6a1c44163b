//! WebSitio config store: HTTP API over PostgreSQL for client website
//! configurations and general templates, plus the static-site generator.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
