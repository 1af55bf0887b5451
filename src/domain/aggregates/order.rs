//! Order Aggregate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};
use crate::domain::value_objects::{BilingualText, Locale, Money, MoneyError, OrderId};

/// One product line, priced at the time the order was placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LineItem {
    pub name: BilingualText,
    #[validate(custom = "validate_amount")]
    pub unit_price: Money,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: BilingualText, unit_price: Money, quantity: u32) -> Self { Self { name, unit_price, quantity } }
    pub fn line_total(&self) -> Result<Money, MoneyError> { self.unit_price.multiply(self.quantity) }
}

/// Fulfilment state. Any status may follow any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus { #[default] Pending, Shipped, Delivered, Cancelled }

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [Self::Pending, Self::Shipped, Self::Delivered, Self::Cancelled];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pending, Locale::Ar) => "قيد الانتظار",
            (Self::Pending, Locale::En) => "Pending",
            (Self::Shipped, Locale::Ar) => "تم الشحن",
            (Self::Shipped, Locale::En) => "Shipped",
            (Self::Delivered, Locale::Ar) => "تم التسليم",
            (Self::Delivered, Locale::En) => "Delivered",
            (Self::Cancelled, Locale::Ar) => "ملغي",
            (Self::Cancelled, Locale::En) => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or(OrderError::UnknownStatus(s))
    }
}

/// Everything an order has except its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderDraft {
    #[validate(custom = "validate_bilingual")]
    pub customer: BilingualText,
    pub address: BilingualText,
    pub phone: String,
    #[validate(email)]
    pub email: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: OrderStatus,
    #[validate(custom = "validate_amount")]
    pub total: Money,
    #[validate]
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Order {
    id: OrderId,
    #[validate(custom = "validate_bilingual")]
    pub customer: BilingualText,
    pub address: BilingualText,
    pub phone: String,
    #[validate(email)]
    pub email: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    #[validate(custom = "validate_amount")]
    pub total: Money,
    #[validate]
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Order {
    pub fn with_id(id: OrderId, draft: OrderDraft) -> Self {
        let OrderDraft { customer, address, phone, email, date, status, total, items } = draft;
        Self { id, customer, address, phone, email, date, status, total, items }
    }

    pub fn id(&self) -> &OrderId { &self.id }
    pub fn status(&self) -> OrderStatus { self.status }
    pub fn total(&self) -> &Money { &self.total }
    pub fn items(&self) -> &[LineItem] { &self.items }

    /// Sum of the line items. Independent of the stored `total`, which may
    /// include shipping or discounts that are not itemised.
    pub fn line_items_total(&self) -> Result<Money, MoneyError> {
        self.items.iter().try_fold(Money::zero(self.total.currency()), |acc, i| acc.add(&i.line_total()?))
    }

    /// Stored total minus the line-item sum.
    pub fn total_discrepancy(&self) -> Result<Money, MoneyError> {
        self.total.subtract(&self.line_items_total()?)
    }

    pub fn set_status(&mut self, status: OrderStatus) -> OrderStatus { std::mem::replace(&mut self.status, status) }
}

fn validate_bilingual(text: &BilingualText) -> Result<(), ValidationError> {
    if text.ar.trim().is_empty() || text.en.trim().is_empty() {
        return Err(ValidationError::new("missing_locale"));
    }
    Ok(())
}

fn validate_amount(amount: &Money) -> Result<(), ValidationError> {
    if !amount.is_in_range() {
        return Err(ValidationError::new("amount_out_of_range"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Unknown order status: {0:?}")]
    UnknownStatus(String),
}
