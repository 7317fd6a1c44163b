//! Business-vertical template types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The vertical a client website is built from. Fixed when a record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Professionals,
    Restaurants,
    Retail,
    Services,
    Tourism,
}

impl TemplateType {
    pub const ALL: [TemplateType; 5] = [
        TemplateType::Professionals,
        TemplateType::Restaurants,
        TemplateType::Retail,
        TemplateType::Services,
        TemplateType::Tourism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Professionals => "professionals",
            TemplateType::Restaurants => "restaurants",
            TemplateType::Retail => "retail",
            TemplateType::Services => "services",
            TemplateType::Tourism => "tourism",
        }
    }

    /// Whether records of this vertical carry the client-approval workflow.
    pub fn supports_approval(&self) -> bool {
        matches!(
            self,
            TemplateType::Services | TemplateType::Restaurants | TemplateType::Retail
        )
    }

    /// Store key holding the catalog list for this vertical.
    pub fn catalog_key(&self) -> &'static str {
        match self {
            TemplateType::Professionals | TemplateType::Services | TemplateType::Tourism => {
                "services"
            }
            TemplateType::Retail => "products",
            TemplateType::Restaurants => "menuPages",
        }
    }

    /// Store key holding a catalog element's image URL.
    pub fn catalog_image_key(&self) -> &'static str {
        match self {
            TemplateType::Restaurants => "url",
            _ => "image",
        }
    }

    /// Sections a client reviews in the approval form.
    pub fn approval_sections(&self) -> &'static [&'static str] {
        match self {
            TemplateType::Retail => &["hero", "about", "products", "photos", "reviews", "contact"],
            TemplateType::Restaurants => &["hero", "about", "menu", "photos", "reviews", "contact"],
            TemplateType::Tourism => &["hero", "about", "tours", "photos", "reviews", "contact"],
            TemplateType::Professionals | TemplateType::Services => {
                &["hero", "about", "services", "photos", "reviews", "contact"]
            }
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professionals" => Ok(TemplateType::Professionals),
            "restaurants" => Ok(TemplateType::Restaurants),
            "retail" => Ok(TemplateType::Retail),
            "services" => Ok(TemplateType::Services),
            "tourism" => Ok(TemplateType::Tourism),
            _ => Err(format!("Unknown template type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_type_round_trip() {
        for template in TemplateType::ALL {
            assert_eq!(template.as_str().parse::<TemplateType>().unwrap(), template);
            let json = serde_json::to_string(&template).unwrap();
            assert_eq!(json, format!("\"{}\"", template));
        }
    }

    #[test]
    fn test_unknown_template_type() {
        assert!("bakery".parse::<TemplateType>().is_err());
    }

    #[test]
    fn test_supports_approval() {
        assert!(TemplateType::Services.supports_approval());
        assert!(TemplateType::Restaurants.supports_approval());
        assert!(TemplateType::Retail.supports_approval());
        assert!(!TemplateType::Tourism.supports_approval());
        assert!(!TemplateType::Professionals.supports_approval());
    }

    #[test]
    fn test_catalog_keys() {
        assert_eq!(TemplateType::Retail.catalog_key(), "products");
        assert_eq!(TemplateType::Restaurants.catalog_key(), "menuPages");
        assert_eq!(TemplateType::Tourism.catalog_key(), "services");
        assert_eq!(TemplateType::Restaurants.catalog_image_key(), "url");
        assert_eq!(TemplateType::Tourism.catalog_image_key(), "image");
    }
}
