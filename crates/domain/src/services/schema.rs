//! Schema table for site configurations.
//!
//! Two tables live here:
//!
//! - the canonical tree ([`ROOT`]), describing the shape of a serialized
//!   [`SiteConfig`](crate::models::SiteConfig) member by member; path
//!   validation and value repair both walk it;
//! - the wire table ([`FIELDS`]), mapping each flat key of a store record to a
//!   canonical path, together with the legacy encoding the store may use for it
//!   and the templates whose save path writes it as a JSON string.

use serde_json::{json, Map, Value};

use crate::models::TemplateType;

/// How the config store may hold a structured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyEncoding {
    /// Always stored structured.
    None,
    /// Sometimes stored as `JSON.stringify` of the structured value.
    JsonString,
    /// Sometimes stored as a single plain string used for both languages.
    SingleLangString,
}

/// Shape of one value in the canonical tree.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Free-form string.
    Text,
    /// Boolean toggle.
    Flag,
    /// Float clamped to `[0, 1]`.
    Unit,
    /// Integer star rating, 1 to 5.
    Rating,
    /// One of a closed set of strings.
    Choice(&'static [&'static str]),
    /// `{es, en}` string pair.
    Bilingual,
    /// Object with a fixed member set.
    Record(&'static [Member]),
    /// Ordered list of records.
    List(&'static [Member]),
    /// Object keyed by arbitrary strings, every value a record.
    Map(&'static [Member]),
}

impl Shape {
    pub fn is_container(&self) -> bool {
        matches!(self, Shape::Record(_) | Shape::List(_) | Shape::Map(_))
    }

    /// The empty value the editors start from: `""`, `false`, full opacity,
    /// five stars, the first choice, an empty pair, a record of blanks, `[]`
    /// or `{}`. Optional record members are left out.
    pub fn blank(&self) -> Value {
        match self {
            Shape::Text => Value::String(String::new()),
            Shape::Flag => Value::Bool(false),
            Shape::Unit => json!(1.0),
            Shape::Rating => json!(5),
            Shape::Choice(options) => {
                Value::String(options.first().copied().unwrap_or_default().to_string())
            }
            Shape::Bilingual => json!({"es": "", "en": ""}),
            Shape::Record(members) => Value::Object(
                members
                    .iter()
                    .filter(|m| !m.optional)
                    .map(|m| (m.key.to_string(), m.shape.blank()))
                    .collect::<Map<String, Value>>(),
            ),
            Shape::List(_) => Value::Array(Vec::new()),
            Shape::Map(_) => Value::Object(Map::new()),
        }
    }

    /// Name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Text => "text",
            Shape::Flag => "flag",
            Shape::Unit => "number between 0 and 1",
            Shape::Rating => "rating between 1 and 5",
            Shape::Choice(_) => "choice",
            Shape::Bilingual => "bilingual text",
            Shape::Record(_) => "record",
            Shape::List(_) => "list",
            Shape::Map(_) => "map",
        }
    }
}

/// A named member of a record.
#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub key: &'static str,
    /// Alternative keys accepted when reading stored records.
    pub aliases: &'static [&'static str],
    pub shape: Shape,
    /// Optional members may be absent from the canonical value.
    pub optional: bool,
}

impl Member {
    const fn required(key: &'static str, shape: Shape) -> Self {
        Self {
            key,
            aliases: &[],
            shape,
            optional: false,
        }
    }

    const fn optional(key: &'static str, shape: Shape) -> Self {
        Self {
            key,
            aliases: &[],
            shape,
            optional: true,
        }
    }

    const fn alias(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

pub const FORM_STATUSES: &[&str] = &["active", "completed", "disabled"];
pub const APPROVAL_STATUSES: &[&str] = &["pending", "needsEdit", "approved"];

const OFFICE_HOURS: &[Member] = &[
    Member::required("mondayFriday", Shape::Bilingual).alias(&["mondayToFriday"]),
    Member::required("saturday", Shape::Bilingual),
];

const IDENTITY: &[Member] = &[
    Member::required("businessName", Shape::Text),
    Member::required("logo", Shape::Text),
    Member::required("phone", Shape::Text),
    Member::required("email", Shape::Text),
    Member::required("whatsappNumber", Shape::Text),
    Member::required("whatsappMessage", Shape::Bilingual),
    Member::required("showWhatsappButton", Shape::Flag),
    Member::required("address", Shape::Bilingual),
    Member::required("officeHours", Shape::Record(OFFICE_HOURS)),
    Member::required("googleMapsEmbed", Shape::Text),
    Member::required("facebookUrl", Shape::Text),
    Member::required("instagramUrl", Shape::Text),
];

const BRANDING: &[Member] = &[
    Member::required("primaryColor", Shape::Text),
    Member::required("secondaryColor", Shape::Text),
    Member::required("accentColor", Shape::Text),
];

const HERO: &[Member] = &[
    Member::required("title", Shape::Bilingual),
    Member::required("subtitle", Shape::Bilingual),
    Member::required("description", Shape::Bilingual),
    Member::required("image", Shape::Text),
    Member::required("opacity", Shape::Unit),
    Member::required("textAlignment", Shape::Text),
    Member::required("verticalAlignment", Shape::Text),
    Member::required("textSpacing", Shape::Text),
    Member::required("titlePosition", Shape::Text),
    Member::required("textColor", Shape::Text),
    Member::required("subtextColor", Shape::Text),
    Member::required("titleSize", Shape::Text),
    Member::required("subtitleSize", Shape::Text),
];

const STAT: &[Member] = &[
    Member::required("icon", Shape::Text),
    Member::required("value", Shape::Bilingual),
    Member::required("label", Shape::Bilingual),
];

const ABOUT: &[Member] = &[
    Member::required("title", Shape::Bilingual),
    Member::required("text", Shape::Bilingual),
    Member::optional("stats", Shape::List(STAT)),
];

const OFFERING: &[Member] = &[
    Member::required("title", Shape::Bilingual).alias(&["name"]),
    Member::required("description", Shape::Bilingual),
    Member::optional("icon", Shape::Text),
    Member::optional("price", Shape::Text),
    Member::optional("image", Shape::Text).alias(&["url"]),
];

const PHOTO: &[Member] = &[
    Member::required("url", Shape::Text),
    Member::required("caption", Shape::Bilingual),
];

const REVIEW: &[Member] = &[
    Member::required("name", Shape::Text),
    Member::required("rating", Shape::Rating),
    Member::required("text", Shape::Bilingual),
];

const BANNER: &[Member] = &[
    Member::required("enabled", Shape::Flag),
    Member::required("title", Shape::Bilingual),
    Member::required("text", Shape::Bilingual),
    Member::required("backgroundColor", Shape::Text),
    Member::required("textColor", Shape::Text),
    Member::required("textSize", Shape::Text),
];

const CHATBOT_QUESTION: &[Member] = &[
    Member::required("key", Shape::Text),
    Member::required("question", Shape::Bilingual),
    Member::required("answer", Shape::Bilingual),
];

const CHATBOT: &[Member] = &[
    Member::required("enabled", Shape::Flag),
    Member::required("icon", Shape::Text),
    Member::required("color", Shape::Text),
    Member::required("title", Shape::Bilingual),
    Member::required("welcome", Shape::Bilingual),
    Member::required("questions", Shape::List(CHATBOT_QUESTION)),
];

const CLIENT_INFO: &[Member] = &[
    Member::required("name", Shape::Text),
    Member::required("email", Shape::Text),
    Member::required("submissionDate", Shape::Text),
];

const SECTION_APPROVAL: &[Member] = &[
    Member::required("status", Shape::Choice(APPROVAL_STATUSES)),
    Member::required("approved", Shape::Flag),
    Member::required("comments", Shape::Text),
];

const APPROVAL: &[Member] = &[
    Member::required("isFormEnabled", Shape::Flag).alias(&["enabled"]),
    Member::required("formStatus", Shape::Choice(FORM_STATUSES)),
    Member::optional("notificationEmail", Shape::Text),
    Member::required("clientInfo", Shape::Record(CLIENT_INFO)),
    Member::required("sectionApprovals", Shape::Map(SECTION_APPROVAL)),
    Member::required("generalInstructions", Shape::Text),
    Member::required("overallApproved", Shape::Flag),
    Member::required("lastSavedAt", Shape::Text),
];

/// Editable members of a serialized `SiteConfig`. `templateType` is fixed at
/// creation and deliberately absent.
pub const ROOT: &[Member] = &[
    Member::required("identity", Shape::Record(IDENTITY)),
    Member::required("branding", Shape::Record(BRANDING)),
    Member::required("hero", Shape::Record(HERO)),
    Member::required("about", Shape::Record(ABOUT)),
    Member::required("catalogTitle", Shape::Bilingual),
    Member::required("catalog", Shape::List(OFFERING)),
    Member::required("gallery", Shape::List(PHOTO)),
    Member::required("reviews", Shape::List(REVIEW)),
    Member::optional("banner", Shape::Record(BANNER)),
    Member::required("chatbot", Shape::Record(CHATBOT)),
    Member::optional("approval", Shape::Record(APPROVAL)),
];

/// Looks up a member of a record by its canonical key.
pub fn member<'a>(members: &'a [Member], key: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.key == key)
}

/// Resolves a dotted canonical path (no list indices) to its member.
pub fn resolve(path: &str) -> Option<&'static Member> {
    let mut members = ROOT;
    let mut found: Option<&'static Member> = None;

    for segment in path.split('.') {
        let current = members.iter().find(|m| m.key == segment)?;
        found = Some(current);
        members = match current.shape {
            Shape::Record(children) | Shape::List(children) | Shape::Map(children) => children,
            _ => &[],
        };
    }

    found
}

/// Key of a field in the flat store record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKey {
    Fixed(&'static str),
    /// Depends on the template, see [`TemplateType::catalog_key`].
    Catalog,
}

impl WireKey {
    pub fn resolve(&self, template: TemplateType) -> &'static str {
        match self {
            WireKey::Fixed(key) => key,
            WireKey::Catalog => template.catalog_key(),
        }
    }
}

/// One row of the wire table.
#[derive(Debug, Clone, Copy)]
pub struct WireField {
    pub wire: WireKey,
    /// Dotted canonical path, resolvable with [`resolve`].
    pub path: &'static str,
    pub legacy: LegacyEncoding,
    /// Templates whose save path writes this field with its legacy encoding.
    pub encoded_for: &'static [TemplateType],
}

impl WireField {
    const fn plain(wire: &'static str, path: &'static str) -> Self {
        Self {
            wire: WireKey::Fixed(wire),
            path,
            legacy: LegacyEncoding::None,
            encoded_for: &[],
        }
    }

    const fn legacy(wire: &'static str, path: &'static str, legacy: LegacyEncoding) -> Self {
        Self {
            wire: WireKey::Fixed(wire),
            path,
            legacy,
            encoded_for: &[],
        }
    }

    const fn encoded(mut self, templates: &'static [TemplateType]) -> Self {
        self.encoded_for = templates;
        self
    }

    pub fn shape(&self) -> Option<Shape> {
        resolve(self.path).map(|m| m.shape)
    }

    /// Encoding the save path uses for this field on `template`.
    pub fn save_encoding(&self, template: TemplateType) -> LegacyEncoding {
        if self.encoded_for.contains(&template) {
            self.legacy
        } else {
            LegacyEncoding::None
        }
    }
}

const GENERAL: &[TemplateType] = &[TemplateType::Professionals];

/// The store's flat record layout. Order is the order keys are written on save.
pub const FIELDS: &[WireField] = &[
    WireField::plain("businessName", "identity.businessName"),
    WireField::plain("logo", "identity.logo"),
    WireField::plain("phone", "identity.phone"),
    WireField::plain("email", "identity.email"),
    WireField::plain("whatsappNumber", "identity.whatsappNumber"),
    WireField::legacy(
        "whatsappMessage",
        "identity.whatsappMessage",
        LegacyEncoding::SingleLangString,
    ),
    WireField::plain("showWhatsappButton", "identity.showWhatsappButton"),
    WireField::legacy("address", "identity.address", LegacyEncoding::JsonString).encoded(GENERAL),
    WireField::legacy(
        "officeHours",
        "identity.officeHours",
        LegacyEncoding::JsonString,
    ),
    WireField::plain("googleMapsEmbed", "identity.googleMapsEmbed"),
    WireField::plain("facebookUrl", "identity.facebookUrl"),
    WireField::plain("instagramUrl", "identity.instagramUrl"),
    WireField::plain("primaryColor", "branding.primaryColor"),
    WireField::plain("secondaryColor", "branding.secondaryColor"),
    WireField::plain("accentColor", "branding.accentColor"),
    WireField::legacy("heroTitle", "hero.title", LegacyEncoding::JsonString),
    WireField::legacy("heroSubtitle", "hero.subtitle", LegacyEncoding::JsonString),
    WireField::legacy("heroDescription", "hero.description", LegacyEncoding::JsonString),
    WireField::plain("heroImage", "hero.image"),
    WireField::plain("heroImageOpacity", "hero.opacity"),
    WireField::plain("heroTextAlignment", "hero.textAlignment"),
    WireField::plain("heroVerticalAlignment", "hero.verticalAlignment"),
    WireField::plain("heroTextSpacing", "hero.textSpacing"),
    WireField::plain("heroTitlePosition", "hero.titlePosition"),
    WireField::plain("heroTextColor", "hero.textColor"),
    WireField::plain("heroSubtextColor", "hero.subtextColor"),
    WireField::plain("heroTitleSize", "hero.titleSize"),
    WireField::plain("heroSubtitleSize", "hero.subtitleSize"),
    WireField::plain("aboutTitle", "about.title"),
    WireField::plain("aboutText", "about.text"),
    WireField::plain("aboutStats", "about.stats"),
    WireField::plain("servicesTitle", "catalogTitle"),
    WireField {
        wire: WireKey::Catalog,
        path: "catalog",
        legacy: LegacyEncoding::None,
        encoded_for: &[],
    },
    WireField::plain("photos", "gallery"),
    WireField::plain("reviews", "reviews"),
    WireField::plain("showBanner", "banner.enabled"),
    WireField::plain("bannerTitle", "banner.title"),
    WireField::legacy("bannerText", "banner.text", LegacyEncoding::JsonString).encoded(GENERAL),
    WireField::plain("bannerBackgroundColor", "banner.backgroundColor"),
    WireField::plain("bannerTextColor", "banner.textColor"),
    WireField::plain("bannerTextSize", "banner.textSize"),
    WireField::plain("showChatbot", "chatbot.enabled"),
    WireField::plain("chatbotIcon", "chatbot.icon"),
    WireField::plain("chatbotColor", "chatbot.color"),
    WireField::legacy("chatbotTitle", "chatbot.title", LegacyEncoding::JsonString)
        .encoded(GENERAL),
    WireField::legacy("chatbotWelcome", "chatbot.welcome", LegacyEncoding::JsonString)
        .encoded(GENERAL),
    WireField::legacy(
        "chatbotQuestions",
        "chatbot.questions",
        LegacyEncoding::JsonString,
    )
    .encoded(GENERAL),
    WireField::legacy("clientApproval", "approval", LegacyEncoding::JsonString),
];

/// Finds the wire-table row for a fixed wire key.
pub fn field_by_wire_key(key: &str) -> Option<&'static WireField> {
    FIELDS
        .iter()
        .find(|field| matches!(field.wire, WireKey::Fixed(k) if k == key))
}

/// Whether `key` names a field of `template` in either layout: a flat store key
/// or a section of a serialized `SiteConfig`.
pub fn is_known_key(key: &str, template: TemplateType) -> bool {
    member(ROOT, key).is_some() || FIELDS.iter().any(|field| field.wire.resolve(template) == key)
}
