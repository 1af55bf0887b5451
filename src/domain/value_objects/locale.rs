//! Bilingual text handling.
//!
//! The storefront is Arabic first. Catalog fields carry a primary value plus
//! optional per-locale copies; customer-facing order data always carries both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display locale of the storefront.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts bare language codes and region tags (`en-US`, `ar_EG`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next().unwrap_or("") {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            _ => Err(LocaleError::Unsupported(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("Unsupported locale: {0:?}")]
    Unsupported(String),
}

/// A text field with optional per-locale copies.
///
/// `primary` is what the shop owner typed first and is always shown when the
/// requested locale has no copy of its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedText {
    pub fn new(primary: impl Into<String>) -> Self {
        Self { primary: primary.into(), ar: None, en: None }
    }

    /// Primary value with both locale copies set.
    pub fn bilingual(ar: impl Into<String>, en: impl Into<String>) -> Self {
        let ar = ar.into();
        Self { primary: ar.clone(), ar: Some(ar), en: Some(en.into()) }
    }

    pub fn with_variant(mut self, locale: Locale, value: impl Into<String>) -> Self {
        match locale {
            Locale::Ar => self.ar = Some(value.into()),
            Locale::En => self.en = Some(value.into()),
        }
        self
    }

    pub fn variant(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Ar => self.ar.as_deref(),
            Locale::En => self.en.as_deref(),
        }
    }

    /// Text to display for `locale`. Empty copies count as absent.
    pub fn resolve(&self, locale: Locale) -> &str {
        self.variant(locale).filter(|v| !v.trim().is_empty()).unwrap_or(&self.primary)
    }

    /// True if the primary value or any copy equals `value`.
    pub fn matches(&self, value: &str) -> bool {
        self.primary == value || self.ar.as_deref() == Some(value) || self.en.as_deref() == Some(value)
    }

    pub(crate) fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        [Some(self.primary.as_str()), self.ar.as_deref(), self.en.as_deref()]
            .into_iter()
            .flatten()
            .any(|v| v.to_lowercase().contains(needle_lower))
    }
}

/// Text that always exists in both locales.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BilingualText {
    pub ar: String,
    pub en: String,
}

impl BilingualText {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self { ar: ar.into(), en: en.into() }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.ar,
            Locale::En => &self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("AR_eg".parse::<Locale>().unwrap(), Locale::Ar);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_resolve_prefers_variant() {
        let text = LocalizedText::bilingual("بادي لوشن", "Body Lotion");
        assert_eq!(text.resolve(Locale::En), "Body Lotion");
        assert_eq!(text.resolve(Locale::Ar), "بادي لوشن");
    }

    #[test]
    fn test_resolve_falls_back_to_primary() {
        let text = LocalizedText::new("زيت الشعر").with_variant(Locale::En, "  ");
        assert_eq!(text.resolve(Locale::En), "زيت الشعر");
        assert_eq!(LocalizedText::new("x").resolve(Locale::Ar), "x");
    }

    #[test]
    fn test_matches_any_copy() {
        let text = LocalizedText::bilingual("ليب بالم", "Lip Balm");
        assert!(text.matches("Lip Balm"));
        assert!(text.matches("ليب بالم"));
        assert!(!text.matches("lip balm"));
    }
}
