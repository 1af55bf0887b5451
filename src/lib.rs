//! MOANAA Storefront Store
//!
//! State layer of the bilingual (Arabic/English) MOANAA cosmetics shop.
//!
//! ## Features
//! - Product catalog with per-locale names, descriptions and details
//! - Order list with unrestricted status changes
//! - Dashboard analytics recomputed after every change
//! - Persistence to any key-value blob store (files, memory, browser storage)
//! - Admin search over products and orders

pub mod analytics;
pub mod config;
pub mod domain;
pub mod query;
pub mod seed;
pub mod storage;
pub mod store;

pub use analytics::Analytics;
pub use config::{ConfigError, StoreConfig};
pub use domain::aggregates::{Category, LineItem, Order, OrderDraft, OrderStatus, Product, ProductDraft};
pub use domain::events::StoreEvent;
pub use domain::value_objects::{BilingualText, Locale, LocalizedText, Money, OrderId, ProductId};
pub use query::{OrderQuery, ProductQuery};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistenceError};
pub use store::CatalogStore;

use domain::aggregates::{OrderError, ProductError};
use domain::value_objects::{LocaleError, MoneyError};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error("Storage error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<ProductError> for StoreError {
    fn from(e: ProductError) -> Self { Self::InvalidInput(e.to_string()) }
}

impl From<OrderError> for StoreError {
    fn from(e: OrderError) -> Self { Self::InvalidInput(e.to_string()) }
}

impl From<LocaleError> for StoreError {
    fn from(e: LocaleError) -> Self { Self::InvalidInput(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, StoreError>;
