//! Shared utilities for the WebSitio backend.
//!
//! This crate provides common functionality used across the other crates:
//! - Validation helpers for client ids, template ids and color strings

pub mod validation;
