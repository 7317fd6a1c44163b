//! Bilingual text values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of a bilingual field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    /// All supported languages, Spanish first (the default site language).
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// A Spanish/English string pair.
///
/// Both keys are always present once a record has been normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual {
    pub es: String,
    pub en: String,
}

impl Bilingual {
    pub fn new(es: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            en: en.into(),
        }
    }

    /// Same text for both languages (legacy single-language values).
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            es: text.clone(),
            en: text,
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Es => &self.es,
            Language::En => &self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("es".parse::<Language>().unwrap(), Language::Es);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serialization() {
        assert_eq!(serde_json::to_string(&Language::Es).unwrap(), "\"es\"");
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn test_bilingual_same() {
        let text = Bilingual::same("Calle 5");
        assert_eq!(text.es, "Calle 5");
        assert_eq!(text.en, "Calle 5");
    }

    #[test]
    fn test_bilingual_get() {
        let text = Bilingual::new("Hola", "Hi");
        assert_eq!(text.get(Language::Es), "Hola");
        assert_eq!(text.get(Language::En), "Hi");
    }
}
