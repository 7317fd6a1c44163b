//! Canonical in-memory model of one client website.
//!
//! A `SiteConfig` is always total: every field is present and well typed.
//! Records coming from the config store go through
//! [`crate::services::normalizer::normalize`] before they become a `SiteConfig`,
//! and edits go through [`crate::services::mutator`], which returns new values.
//!
//! List fields (`catalog`, `gallery`, `reviews`, `about.stats`,
//! `chatbot.questions`) keep display order, allow duplicates and are addressed
//! by index. Removing an element shifts every later index down by one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bilingual::Bilingual;
use super::template::TemplateType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub template_type: TemplateType,
    pub identity: Identity,
    pub branding: Branding,
    pub hero: Hero,
    pub about: About,
    pub catalog_title: Bilingual,
    pub catalog: Vec<Offering>,
    pub gallery: Vec<Photo>,
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    pub chatbot: Chatbot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<Approval>,
}

/// Business identity and contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub business_name: String,
    pub logo: String,
    pub phone: String,
    pub email: String,
    pub whatsapp_number: String,
    pub whatsapp_message: Bilingual,
    pub show_whatsapp_button: bool,
    pub address: Bilingual,
    pub office_hours: OfficeHours,
    pub google_maps_embed: String,
    pub facebook_url: String,
    pub instagram_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeHours {
    pub monday_friday: Bilingual,
    pub saturday: Bilingual,
}

/// Site colors as free-form strings (usually `#rrggbb`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: Bilingual,
    pub subtitle: Bilingual,
    pub description: Bilingual,
    pub image: String,
    /// Background image opacity in `[0, 1]`.
    pub opacity: f64,
    pub text_alignment: String,
    pub vertical_alignment: String,
    pub text_spacing: String,
    pub title_position: String,
    pub text_color: String,
    pub subtext_color: String,
    pub title_size: String,
    pub subtitle_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub title: Bilingual,
    pub text: Bilingual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<Stat>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub icon: String,
    pub value: Bilingual,
    pub label: Bilingual,
}

/// A catalog entry: a service, product, menu page or tour depending on the vertical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub title: Bilingual,
    pub description: Bilingual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub url: String,
    pub caption: Bilingual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub text: Bilingual,
}

/// Expandable announcement banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub enabled: bool,
    pub title: Bilingual,
    pub text: Bilingual,
    pub background_color: String,
    pub text_color: String,
    pub text_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chatbot {
    pub enabled: bool,
    pub icon: String,
    pub color: String,
    pub title: Bilingual,
    pub welcome: Bilingual,
    pub questions: Vec<ChatbotQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotQuestion {
    pub key: String,
    pub question: Bilingual,
    pub answer: Bilingual,
}

/// Client-approval form state.
///
/// Descriptive only: transitions happen in the client-facing form, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// Whether the client-facing form accepts input. Stored as `isFormEnabled`.
    #[serde(rename = "isFormEnabled")]
    pub enabled: bool,
    pub form_status: FormStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    pub client_info: ClientInfo,
    pub section_approvals: BTreeMap<String, SectionApproval>,
    pub general_instructions: String,
    pub overall_approved: bool,
    pub last_saved_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Active,
    Completed,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub submission_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionApproval {
    pub status: ApprovalStatus,
    pub approved: bool,
    pub comments: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalStatus {
    Pending,
    NeedsEdit,
    Approved,
}

impl SectionApproval {
    pub fn pending() -> Self {
        Self {
            status: ApprovalStatus::Pending,
            approved: false,
            comments: String::new(),
        }
    }
}

impl Approval {
    /// Fresh approval state with every section of `template` pending.
    pub fn pending_for(template: TemplateType, enabled: bool) -> Self {
        Self {
            enabled,
            form_status: FormStatus::Active,
            notification_email: None,
            client_info: ClientInfo {
                name: String::new(),
                email: String::new(),
                submission_date: String::new(),
            },
            section_approvals: template
                .approval_sections()
                .iter()
                .map(|section| (section.to_string(), SectionApproval::pending()))
                .collect(),
            general_instructions: String::new(),
            overall_approved: false,
            last_saved_at: String::new(),
        }
    }
}
