//! Aggregates module
pub mod product;
pub mod order;

pub use product::{Category, Product, ProductDraft, ProductError, PLACEHOLDER_IMAGE};
pub use order::{LineItem, Order, OrderDraft, OrderError, OrderStatus};
