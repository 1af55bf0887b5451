//! Store events
//!
//! Recorded by every store mutation and drained by the presentation layer
//! through `CatalogStore::take_events`.
use crate::domain::aggregates::OrderStatus;
use crate::domain::value_objects::{OrderId, ProductId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    ProductAdded { product_id: ProductId },
    ProductUpdated { product_id: ProductId },
    ProductDeleted { product_id: ProductId },
    OrderAdded { order_id: OrderId },
    OrderStatusChanged { order_id: OrderId, from: OrderStatus, to: OrderStatus },
    /// A save failed; the store keeps serving from memory.
    PersistenceDegraded { key: String, reason: String },
    /// A saved snapshot could not be read and seed data was used instead.
    /// `backup` names the key the unreadable blob was copied to; `None`
    /// means the original is held and only `flush` will overwrite it.
    SnapshotRecovered { key: String, reason: String, backup: Option<String> },
    /// A restored record fails validation. It is kept as it was saved.
    InvalidRecordRestored { key: String, id: String, reason: String },
}
