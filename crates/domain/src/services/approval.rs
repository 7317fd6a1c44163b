//! Client-approval helpers.

use crate::models::{Approval, SiteConfig};

/// Starts the client-approval round over: every section back to pending,
/// client info and instructions cleared. Whether the form is enabled is kept.
///
/// Templates without an approval workflow are returned unchanged.
pub fn reset_client_approvals(config: &SiteConfig) -> SiteConfig {
    let template = config.template_type;
    if !template.supports_approval() {
        return config.clone();
    }

    let enabled = config.approval.as_ref().is_some_and(|a| a.enabled);
    SiteConfig {
        approval: Some(Approval::pending_for(template, enabled)),
        ..config.clone()
    }
}
