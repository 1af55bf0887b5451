//! Product Aggregate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};
use crate::domain::value_objects::{BilingualText, Locale, LocalizedText, Money, ProductId};

/// Catalog section a product is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category { BodySplash, BodyLotion, LipBalm, HairOil }

impl Category {
    pub const ALL: [Category; 4] = [Self::BodySplash, Self::BodyLotion, Self::LipBalm, Self::HairOil];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BodySplash => "body-splash",
            Self::BodyLotion => "body-lotion",
            Self::LipBalm => "lip-balm",
            Self::HairOil => "hair-oil",
        }
    }

    /// Icon tag the dashboard renders next to the category's products.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::BodySplash => "spray-can-sparkles",
            Self::BodyLotion => "pump-soap",
            Self::LipBalm => "kiss-wink-heart",
            Self::HairOil => "droplet",
        }
    }

    pub fn label(self) -> BilingualText {
        match self {
            Self::BodySplash => BilingualText::new("بادي سبلاش", "Body Splash"),
            Self::BodyLotion => BilingualText::new("بادي لوشن", "Body Lotion"),
            Self::LipBalm => BilingualText::new("ليب بالم", "Lip Balm"),
            Self::HairOil => BilingualText::new("زيت الشعر", "Hair Oil"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Category {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(ProductError::UnknownCategory(s))
    }
}

/// Everything a product has except its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(custom = "validate_primary_text")]
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: Category,
    #[validate(custom = "validate_price")]
    pub price: Money,
    #[validate(length(min = 1, message = "image reference is required"))]
    pub image_url: String,
    #[serde(default)]
    pub details: LocalizedText,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
}

impl ProductDraft {
    pub fn new(name: LocalizedText, category: Category, price: Money) -> Self {
        Self {
            name, description: LocalizedText::default(), category, price,
            image_url: PLACEHOLDER_IMAGE.to_string(), details: LocalizedText::default(),
            is_new: false, is_bestseller: false,
        }
    }
}

/// Image shown until the owner uploads a photo.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=400";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Product {
    id: ProductId,
    #[validate(custom = "validate_primary_text")]
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: Category,
    #[validate(custom = "validate_price")]
    pub price: Money,
    #[validate(length(min = 1, message = "image reference is required"))]
    pub image_url: String,
    #[serde(default)]
    pub details: LocalizedText,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
}

impl Product {
    pub fn create(draft: ProductDraft) -> Self { Self::with_id(ProductId::generate(), draft) }

    pub fn with_id(id: ProductId, draft: ProductDraft) -> Self {
        let ProductDraft { name, description, category, price, image_url, details, is_new, is_bestseller } = draft;
        Self { id, name, description, category, price, image_url, details, is_new, is_bestseller }
    }

    pub fn id(&self) -> &ProductId { &self.id }
    pub fn display_name(&self, locale: Locale) -> &str { self.name.resolve(locale) }
    pub fn display_description(&self, locale: Locale) -> &str { self.description.resolve(locale) }
    pub fn display_details(&self, locale: Locale) -> &str { self.details.resolve(locale) }

    /// True if an order line named `name` refers to this product.
    pub fn is_named(&self, name: &str) -> bool { self.name.matches(name) }
}

fn validate_primary_text(text: &LocalizedText) -> Result<(), ValidationError> {
    if text.primary.trim().is_empty() {
        return Err(ValidationError::new("empty_text"));
    }
    Ok(())
}

fn validate_price(price: &Money) -> Result<(), ValidationError> {
    if !price.is_in_range() {
        return Err(ValidationError::new("price_out_of_range"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),
}
