//! Static-site generator.
//!
//! Renders a stored general-template document into plain files:
//!
//! ```text
//! <output_dir>/<template_id>/
//!     index.html      Spanish page
//!     en/index.html   English page
//!     style.css       colors from the branding section
//!     config.json     structured config the pages were rendered from
//! ```
//!
//! The document is normalized first, so partially filled or legacy records
//! still produce a complete site.

use std::path::{Path, PathBuf};

use askama::Template;
use domain::models::{Bilingual, Language, SiteConfig, TemplateType};
use domain::services::{defaults_for, normalize, serialize_structured};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GeneratorConfig;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    pub template_type: TemplateType,
    /// Directory the files were written to.
    pub directory: PathBuf,
    /// Public path of the site, e.g. `/generated/<template_id>`.
    pub output_path: String,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SiteGenerator {
    output_dir: PathBuf,
    public_base_path: String,
}

impl SiteGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output_dir),
            public_base_path: config.public_base_path.trim_end_matches('/').to_string(),
        }
    }

    /// Renders and writes the site for `template_id`. Existing files are
    /// overwritten.
    pub async fn generate(
        &self,
        template_id: &str,
        document: &Value,
    ) -> Result<GeneratedSite, GeneratorError> {
        let template_type = document
            .get("templateType")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<TemplateType>().ok())
            .unwrap_or(TemplateType::Professionals);
        let config = normalize(Some(document), &defaults_for(template_type));

        let es = render_page(&config, Language::Es)?;
        let en = render_page(&config, Language::En)?;
        let css = render_stylesheet(&config)?;
        let structured = serde_json::to_string_pretty(&serialize_structured(&config)?)?;

        let directory = self.output_dir.join(template_id);
        tokio::fs::create_dir_all(directory.join("en")).await?;

        let mut files = Vec::with_capacity(4);
        files.push(write(&directory, "index.html", es).await?);
        files.push(write(&directory, "en/index.html", en).await?);
        files.push(write(&directory, "style.css", css).await?);
        files.push(write(&directory, "config.json", structured).await?);

        info!(
            template_id = %template_id,
            template_type = %template_type,
            directory = %directory.display(),
            "Static site generated"
        );

        Ok(GeneratedSite {
            template_type,
            directory,
            output_path: format!("{}/{}", self.public_base_path, template_id),
            files,
        })
    }
}

async fn write(directory: &Path, name: &str, contents: String) -> Result<PathBuf, GeneratorError> {
    let path = directory.join(name);
    tokio::fs::write(&path, contents).await?;
    debug!(path = %path.display(), "Wrote generated file");
    Ok(path)
}

struct Labels {
    about: &'static str,
    gallery: &'static str,
    reviews: &'static str,
    contact: &'static str,
    hours_weekdays: &'static str,
    hours_saturday: &'static str,
    switch_language: &'static str,
    whatsapp: &'static str,
}

fn labels(language: Language) -> Labels {
    match language {
        Language::Es => Labels {
            about: "Acerca de",
            gallery: "Galería",
            reviews: "Opiniones",
            contact: "Contacto",
            hours_weekdays: "Lunes a viernes",
            hours_saturday: "Sábado",
            switch_language: "English",
            whatsapp: "Escríbenos por WhatsApp",
        },
        Language::En => Labels {
            about: "About",
            gallery: "Gallery",
            reviews: "Reviews",
            contact: "Contact",
            hours_weekdays: "Monday to Friday",
            hours_saturday: "Saturday",
            switch_language: "Español",
            whatsapp: "Message us on WhatsApp",
        },
    }
}

#[derive(Template)]
#[template(path = "site/index.html")]
struct PageTemplate<'a> {
    lang: &'static str,
    template: &'static str,
    asset_prefix: &'static str,
    other_page: &'static str,
    labels: Labels,
    business_name: &'a str,
    logo: Option<&'a str>,
    banner: Option<BannerView<'a>>,
    hero: HeroView<'a>,
    about: AboutView<'a>,
    catalog: Option<CatalogView<'a>>,
    gallery: Vec<PhotoView<'a>>,
    reviews: Vec<ReviewView<'a>>,
    contact: ContactView<'a>,
    chatbot: Option<ChatbotView<'a>>,
    social: Vec<SocialLink<'a>>,
    whatsapp: Option<String>,
}

#[derive(Clone, Copy)]
struct BannerView<'a> {
    size: &'a str,
    title: &'a str,
    text: &'a str,
}

struct HeroView<'a> {
    align: &'a str,
    valign: &'a str,
    image: &'a str,
    opacity: f64,
    title_size: &'a str,
    subtitle_size: &'a str,
    title: &'a str,
    subtitle: &'a str,
    description: &'a str,
}

struct AboutView<'a> {
    title: &'a str,
    text: &'a str,
    stats: Vec<StatView<'a>>,
}

struct StatView<'a> {
    value: &'a str,
    label: &'a str,
}

struct CatalogView<'a> {
    key: &'static str,
    title: &'a str,
    items: Vec<OfferingView<'a>>,
}

struct OfferingView<'a> {
    title: &'a str,
    description: &'a str,
    image: Option<&'a str>,
    price: Option<&'a str>,
}

struct PhotoView<'a> {
    url: &'a str,
    caption: &'a str,
}

struct ReviewView<'a> {
    name: &'a str,
    rating: usize,
    stars: String,
    text: &'a str,
}

struct ContactView<'a> {
    phone: Option<&'a str>,
    email: Option<&'a str>,
    address: &'a str,
    monday_friday: &'a str,
    saturday: &'a str,
    map: Option<&'a str>,
}

struct ChatbotView<'a> {
    title: &'a str,
    welcome: &'a str,
    questions: Vec<QuestionView<'a>>,
}

struct QuestionView<'a> {
    question: &'a str,
    answer: &'a str,
}

struct SocialLink<'a> {
    class: &'static str,
    url: &'a str,
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

impl<'a> PageTemplate<'a> {
    fn new(config: &'a SiteConfig, language: Language) -> Self {
        let text = |value: &'a Bilingual| value.get(language);
        let labels = labels(language);
        let identity = &config.identity;
        let hero = &config.hero;
        let about = &config.about;
        let (asset_prefix, other_page) = match language {
            Language::Es => ("", "en/index.html"),
            Language::En => ("../", "../index.html"),
        };

        let about = AboutView {
            title: non_empty(text(&about.title)).unwrap_or(labels.about),
            text: text(&about.text),
            stats: about
                .stats
                .iter()
                .flatten()
                .map(|stat| StatView {
                    value: text(&stat.value),
                    label: text(&stat.label),
                })
                .collect(),
        };

        let catalog = (!config.catalog.is_empty()).then(|| CatalogView {
            key: config.template_type.catalog_key(),
            title: text(&config.catalog_title),
            items: config
                .catalog
                .iter()
                .map(|item| OfferingView {
                    title: text(&item.title),
                    description: text(&item.description),
                    image: item.image.as_deref().and_then(non_empty),
                    price: item.price.as_deref().and_then(non_empty),
                })
                .collect(),
        });

        let reviews = config
            .reviews
            .iter()
            .map(|review| {
                let rating = usize::from(review.rating.min(5));
                ReviewView {
                    name: &review.name,
                    rating,
                    stars: format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating)),
                    text: text(&review.text),
                }
            })
            .collect();

        let chatbot = (config.chatbot.enabled && !config.chatbot.questions.is_empty()).then(|| {
            ChatbotView {
                title: text(&config.chatbot.title),
                welcome: text(&config.chatbot.welcome),
                questions: config
                    .chatbot
                    .questions
                    .iter()
                    .map(|q| QuestionView {
                        question: text(&q.question),
                        answer: text(&q.answer),
                    })
                    .collect(),
            }
        });

        Self {
            lang: language.as_str(),
            template: config.template_type.as_str(),
            asset_prefix,
            other_page,
            business_name: &identity.business_name,
            logo: non_empty(&identity.logo),
            banner: config
                .banner
                .as_ref()
                .filter(|b| b.enabled)
                .map(|banner| BannerView {
                    size: &banner.text_size,
                    title: text(&banner.title),
                    text: text(&banner.text),
                }),
            hero: HeroView {
                align: &hero.text_alignment,
                valign: &hero.vertical_alignment,
                image: &hero.image,
                opacity: hero.opacity,
                title_size: &hero.title_size,
                subtitle_size: &hero.subtitle_size,
                title: text(&hero.title),
                subtitle: text(&hero.subtitle),
                description: text(&hero.description),
            },
            about,
            catalog,
            gallery: config
                .gallery
                .iter()
                .map(|photo| PhotoView {
                    url: &photo.url,
                    caption: text(&photo.caption),
                })
                .collect(),
            reviews,
            contact: ContactView {
                phone: non_empty(&identity.phone),
                email: non_empty(&identity.email),
                address: text(&identity.address),
                monday_friday: text(&identity.office_hours.monday_friday),
                saturday: text(&identity.office_hours.saturday),
                map: non_empty(&identity.google_maps_embed),
            },
            chatbot,
            social: [
                ("facebook", &identity.facebook_url),
                ("instagram", &identity.instagram_url),
            ]
            .into_iter()
            .filter(|(_, url)| !url.is_empty())
            .map(|(class, url)| SocialLink { class, url })
            .collect(),
            whatsapp: whatsapp_link(config, language),
            labels,
        }
    }
}

/// Renders the single-page site in one language.
pub fn render_page(config: &SiteConfig, language: Language) -> Result<String, askama::Error> {
    PageTemplate::new(config, language).render()
}

/// `https://wa.me/<digits>?text=<message>`, or `None` when the button is off
/// or there is no number.
fn whatsapp_link(config: &SiteConfig, language: Language) -> Option<String> {
    let identity = &config.identity;
    if !identity.show_whatsapp_button {
        return None;
    }
    let digits: String = identity
        .whatsapp_number
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let message = identity.whatsapp_message.get(language);
    if message.is_empty() {
        Some(format!("https://wa.me/{}", digits))
    } else {
        Some(format!(
            "https://wa.me/{}?text={}",
            digits,
            urlencoding::encode(message)
        ))
    }
}

/// Stylesheet with the branding colors as custom properties.
#[derive(Template)]
#[template(path = "site/style.css", escape = "none")]
struct StylesheetTemplate {
    primary: String,
    secondary: String,
    accent: String,
    hero_text: String,
    hero_subtext: String,
    banner: Option<BannerColors>,
    chatbot_color: String,
}

struct BannerColors {
    background: String,
    text: String,
}

pub fn render_stylesheet(config: &SiteConfig) -> Result<String, askama::Error> {
    let branding = &config.branding;
    StylesheetTemplate {
        primary: brand_color(&branding.primary_color),
        secondary: brand_color(&branding.secondary_color),
        accent: brand_color(&branding.accent_color),
        hero_text: css_value(&config.hero.text_color),
        hero_subtext: css_value(&config.hero.subtext_color),
        banner: config.banner.as_ref().map(|banner| BannerColors {
            background: css_value(&banner.background_color),
            text: css_value(&banner.text_color),
        }),
        chatbot_color: css_value(&config.chatbot.color),
    }
    .render()
}

/// Brand colors are hex strings; anything else is left to the base stylesheet.
fn brand_color(value: &str) -> String {
    match shared::validation::validate_hex_color(value) {
        Ok(()) => value.to_string(),
        Err(_) => {
            debug!(color = %value, "Ignoring non-hex brand color");
            "inherit".to_string()
        }
    }
}

/// Drops characters that could end a declaration.
fn css_value(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect();
    if cleaned.trim().is_empty() {
        "inherit".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::set;
    use serde_json::json;

    fn professionals() -> SiteConfig {
        defaults_for(TemplateType::Professionals)
    }

    #[test]
    fn test_render_page_uses_requested_language() {
        let config = set(&professionals(), "hero.title", "Bienvenidos", Some(Language::Es)).unwrap();
        let config = set(&config, "hero.title", "Welcome", Some(Language::En)).unwrap();

        let es = render_page(&config, Language::Es).unwrap();
        let en = render_page(&config, Language::En).unwrap();
        assert!(es.contains("<html lang=\"es\">"));
        assert!(es.contains("Bienvenidos"));
        assert!(!es.contains("Welcome"));
        assert!(en.contains("Welcome"));
        assert!(en.contains("href=\"../style.css\""));
        assert!(es.contains("href=\"en/index.html\""));
    }

    #[test]
    fn test_render_page_escapes_user_text() {
        let config = set(
            &professionals(),
            "identity.businessName",
            "<script>alert(1)</script>",
            None,
        )
        .unwrap();
        let html = render_page(&config, Language::Es).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_page_escapes_attributes() {
        let config = set(&professionals(), "identity.businessName", r#"Tom "&" Jerry"#, None).unwrap();
        let config = set(&config, "identity.logo", "/img/logo.png", None).unwrap();
        let html = render_page(&config, Language::Es).unwrap();
        assert!(html.contains("<title>Tom &quot;&amp;&quot; Jerry</title>"));
        assert!(!html.contains(r#"alt="Tom "&" Jerry""#));
    }

    #[test]
    fn test_render_page_keeps_generated_links_verbatim() {
        let config = set(&professionals(), "identity.whatsappNumber", "5219831234567", None).unwrap();
        let config = set(&config, "identity.showWhatsappButton", "true", None).unwrap();
        let html = render_page(&config, Language::En).unwrap();
        assert!(html.contains(r#"href="../index.html""#));
        assert!(html.contains(r#"href="https://wa.me/5219831234567"#));
    }

    #[test]
    fn test_disabled_banner_is_not_rendered() {
        let config = set(&professionals(), "banner.enabled", "false", None).unwrap();
        assert!(!render_page(&config, Language::Es).unwrap().contains("class=\"banner"));

        let config = set(&config, "banner.enabled", "true", None).unwrap();
        assert!(render_page(&config, Language::Es).unwrap().contains("class=\"banner"));
    }

    #[test]
    fn test_reviews_render_stars() {
        let html = render_page(&defaults_for(TemplateType::Services), Language::En).unwrap();
        assert!(html.contains("aria-label=\"5/5\""));
        assert!(html.contains("class=\"stars\""));
        assert!(html.contains('★'));
    }

    #[test]
    fn test_whatsapp_link() {
        let config = set(&professionals(), "identity.whatsappNumber", "+52 (983) 123-4567", None)
            .unwrap();
        let config = set(&config, "identity.showWhatsappButton", "true", None).unwrap();
        let config = set(&config, "identity.whatsappMessage", "Hola, quiero info", Some(Language::Es))
            .unwrap();
        assert_eq!(
            whatsapp_link(&config, Language::Es).as_deref(),
            Some("https://wa.me/529831234567?text=Hola%2C%20quiero%20info")
        );

        let hidden = set(&config, "identity.showWhatsappButton", "false", None).unwrap();
        assert!(whatsapp_link(&hidden, Language::Es).is_none());
    }

    #[test]
    fn test_stylesheet_uses_branding_colors() {
        let config = set(&professionals(), "branding.primaryColor", "#123456", None).unwrap();
        let css = render_stylesheet(&config).unwrap();
        assert!(css.contains("--primary: #123456;"));
    }

    #[test]
    fn test_stylesheet_is_not_html_escaped() {
        let config = set(&professionals(), "hero.textColor", "'white'", None).unwrap();
        let css = render_stylesheet(&config).unwrap();
        assert!(css.contains("--hero-text: 'white';"));
        assert!(css.contains(".chatbot { border-color:"));
    }

    #[test]
    fn test_css_value_strips_declaration_breakers() {
        assert_eq!(css_value("red; } body { display:none"), "red  body  display:none");
        assert_eq!(css_value("  "), "inherit");
    }

    #[test]
    fn test_brand_color_requires_hex() {
        assert_eq!(brand_color("#1a2B3c"), "#1a2B3c");
        assert_eq!(brand_color("red;}"), "inherit");
    }

    #[tokio::test]
    async fn test_generate_writes_site_files() {
        let dir = tempfile::tempdir().unwrap();
        let generator = SiteGenerator::new(&GeneratorConfig {
            output_dir: dir.path().to_string_lossy().to_string(),
            public_base_path: "/generated/".to_string(),
        });
        let document = json!({
            "templateType": "restaurants",
            "businessName": "La Terraza",
            "heroTitle": {"es": "Sabores del Caribe", "en": "Caribbean flavors"}
        });

        let site = generator.generate("t-100", &document).await.unwrap();

        assert_eq!(site.template_type, TemplateType::Restaurants);
        assert_eq!(site.output_path, "/generated/t-100");
        assert_eq!(site.files.len(), 4);
        let es = std::fs::read_to_string(dir.path().join("t-100/index.html")).unwrap();
        assert!(es.contains("La Terraza"));
        assert!(es.contains("Sabores del Caribe"));
        let en = std::fs::read_to_string(dir.path().join("t-100/en/index.html")).unwrap();
        assert!(en.contains("Caribbean flavors"));
        let stored: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("t-100/config.json")).unwrap())
                .unwrap();
        assert_eq!(stored["templateType"], "restaurants");
        assert!(stored["menuPages"].is_array());
    }

    #[tokio::test]
    async fn test_generate_unknown_template_type_uses_general_template() {
        let dir = tempfile::tempdir().unwrap();
        let generator = SiteGenerator::new(&GeneratorConfig {
            output_dir: dir.path().to_string_lossy().to_string(),
            public_base_path: "/generated".to_string(),
        });
        let site = generator
            .generate("t-1", &json!({"templateType": "bakery"}))
            .await
            .unwrap();
        assert_eq!(site.template_type, TemplateType::Professionals);
        assert!(dir.path().join("t-1/style.css").exists());
    }
}
