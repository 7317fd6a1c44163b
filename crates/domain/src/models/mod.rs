//! Domain models for WebSitio.

pub mod bilingual;
pub mod requests;
pub mod site_config;
pub mod template;

pub use bilingual::{Bilingual, Language};
pub use requests::{CreateSiteConfigRequest, GenerateSiteResponse, SaveTemplateResponse};
pub use site_config::{
    About, Approval, ApprovalStatus, Banner, Branding, Chatbot, ChatbotQuestion, ClientInfo,
    FormStatus, Hero, Identity, OfficeHours, Offering, Photo, Review, SectionApproval, SiteConfig,
    Stat,
};
pub use template::TemplateType;
