//! JSON encoding of the persisted collections.
//!
//! Snapshots are a JSON array of records. Decoding also understands the
//! camelCase layout written by the first web storefront release, so an existing
//! browser cache is upgraded on its next save instead of being discarded.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use super::PersistenceError;
use crate::domain::aggregates::{Category, LineItem, Order, OrderDraft, OrderStatus, Product, ProductDraft, PLACEHOLDER_IMAGE};
use crate::domain::value_objects::{BilingualText, LocalizedText, Money, OrderId, ProductId};

pub fn encode<T: Serialize>(records: &[T]) -> Result<String, PersistenceError> {
    serde_json::to_string(records).map_err(PersistenceError::Encode)
}

pub fn decode_products(text: &str) -> Result<Vec<Product>, PersistenceError> {
    let err = match serde_json::from_str::<Vec<Product>>(text) {
        Ok(products) => return Ok(products),
        Err(e) => e,
    };
    let Ok(legacy) = serde_json::from_str::<Vec<LegacyProduct>>(text) else {
        return Err(PersistenceError::Decode(err));
    };
    info!(count = legacy.len(), "upgrading legacy product snapshot");
    legacy.into_iter().map(LegacyProduct::upgrade).collect()
}

pub fn decode_orders(text: &str) -> Result<Vec<Order>, PersistenceError> {
    let err = match serde_json::from_str::<Vec<Order>>(text) {
        Ok(orders) => return Ok(orders),
        Err(e) => e,
    };
    let Ok(legacy) = serde_json::from_str::<Vec<LegacyOrder>>(text) else {
        return Err(PersistenceError::Decode(err));
    };
    info!(count = legacy.len(), "upgrading legacy order snapshot");
    Ok(legacy.into_iter().map(LegacyOrder::upgrade).collect())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProduct {
    id: ProductId,
    name: String,
    arabic_name: Option<String>,
    english_name: Option<String>,
    #[serde(default)]
    description: String,
    arabic_description: Option<String>,
    english_description: Option<String>,
    #[serde(default)]
    image_url: String,
    category: String,
    price: Option<Money>,
    #[serde(default)]
    details: String,
    arabic_details: Option<String>,
    english_details: Option<String>,
    #[serde(default)]
    is_new: bool,
    #[serde(default)]
    is_bestseller: bool,
}

impl LegacyProduct {
    fn upgrade(self) -> Result<Product, PersistenceError> {
        let category: Category = self.category.parse().map_err(|e| PersistenceError::Corrupt(format!("product {}: {e}", self.id)))?;
        let text = |primary: String, ar: Option<String>, en: Option<String>| LocalizedText { primary, ar, en };
        let image_url = if self.image_url.is_empty() { PLACEHOLDER_IMAGE.to_string() } else { self.image_url };
        Ok(Product::with_id(self.id, ProductDraft {
            name: text(self.name, self.arabic_name, self.english_name),
            description: text(self.description, self.arabic_description, self.english_description),
            category,
            price: self.price.unwrap_or_default(),
            image_url,
            details: text(self.details, self.arabic_details, self.english_details),
            is_new: self.is_new,
            is_bestseller: self.is_bestseller,
        }))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyOrder {
    id: OrderId,
    customer: String,
    customer_en: String,
    #[serde(deserialize_with = "lenient_date")]
    date: NaiveDate,
    status: OrderStatus,
    total: Money,
    #[serde(default)]
    items: Vec<LegacyLineItem>,
    address: String,
    address_en: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLineItem {
    name: String,
    name_en: String,
    price: Money,
    quantity: u32,
}

impl LegacyOrder {
    fn upgrade(self) -> Order {
        let items = self
            .items
            .into_iter()
            .map(|i| LineItem::new(BilingualText::new(i.name, i.name_en), i.price, i.quantity))
            .collect();
        Order::with_id(self.id, OrderDraft {
            customer: BilingualText::new(self.customer, self.customer_en),
            address: BilingualText::new(self.address, self.address_en),
            phone: self.phone,
            email: self.email,
            date: self.date,
            status: self.status,
            total: self.total,
            items,
        })
    }
}

/// Accepts `2024-04-01` as well as a full RFC 3339 timestamp.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
        .map_err(serde::de::Error::custom)
}
