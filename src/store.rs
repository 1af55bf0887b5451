//! The catalog and order store.
//!
//! [`CatalogStore`] owns the live product catalog, the order list and the
//! analytics snapshot derived from them. Every successful mutation runs the
//! same tail: update memory, recompute analytics, save products, save orders.
//! Readers therefore never see analytics that lag behind the collections.
//!
//! A failed save does not undo the mutation. The store logs it, records a
//! [`StoreEvent::PersistenceDegraded`] and carries on in memory until a later
//! save succeeds.
//!
//! A snapshot that cannot be read on open is copied to `<key>.corrupt`
//! before anything is saved over it. When that copy is impossible the key is
//! held: ordinary saves and [`CatalogStore::close`] skip it, and only
//! [`CatalogStore::flush`] overwrites it.

use std::collections::HashSet;
use tracing::{debug, info, warn};
use validator::Validate;
use crate::analytics::{Analytics, AnalyticsSeed};
use crate::config::StoreConfig;
use crate::domain::aggregates::{Order, OrderDraft, OrderStatus, Product, ProductDraft};
use crate::domain::events::StoreEvent;
use crate::domain::value_objects::{Money, MoneyError, OrderId, ProductId};
use crate::query::{self, OrderQuery, ProductQuery};
use crate::seed;
use crate::storage::{self, KeyValueStore, PersistenceError};
use crate::{Result, StoreError};

pub struct CatalogStore<S> {
    config: StoreConfig,
    substrate: S,
    products: Vec<Product>,
    orders: Vec<Order>,
    seed: AnalyticsSeed,
    analytics: Analytics,
    events: Vec<StoreEvent>,
    degraded: bool,
    held: HashSet<String>,
}

type Save<S> = fn(&CatalogStore<S>) -> std::result::Result<(), PersistenceError>;

impl<S: KeyValueStore> CatalogStore<S> {
    /// Restores both collections from `substrate`.
    ///
    /// A key that was never written starts from the sample data (or empty,
    /// when `seed_when_empty` is off). An unreadable snapshot is treated the
    /// same way and reported as [`StoreEvent::SnapshotRecovered`].
    pub fn open(config: StoreConfig, substrate: S) -> Self {
        let mut events = Vec::new();
        let seeded = config.seed_when_empty;
        let products = load_collection(&substrate, &config.products_key, storage::decode_products, seeded.then(seed::products), &mut events);
        let orders = load_collection(&substrate, &config.orders_key, storage::decode_orders, seeded.then(seed::orders), &mut events);
        let held: HashSet<String> = [(&config.products_key, products.held), (&config.orders_key, orders.held)]
            .into_iter()
            .filter_map(|(key, held)| held.then(|| key.clone()))
            .collect();
        let product_id = |p: &Product| p.id().as_str().to_string();
        let order_id = |o: &Order| o.id().as_str().to_string();
        let products = dedup_by_id(products.records, product_id, "product");
        let orders = dedup_by_id(orders.records, order_id, "order");
        audit(&products, product_id, &config.products_key, &mut events);
        audit(&orders, order_id, &config.orders_key, &mut events);
        let seed = seed::analytics();
        let analytics = Analytics::compute(&seed, &products, &orders, config.top_products, &config.currency);
        info!(products = products.len(), orders = orders.len(), held = held.len(), "store opened");
        let degraded = !held.is_empty();
        Self { config, substrate, products, orders, seed, analytics, events, degraded, held }
    }

    /// Replaces the dashboard's static figures and recomputes.
    pub fn with_analytics_seed(mut self, seed: AnalyticsSeed) -> Self {
        self.seed = seed;
        self.refresh_analytics();
        self
    }

    pub fn config(&self) -> &StoreConfig { &self.config }
    pub fn products(&self) -> &[Product] { &self.products }
    pub fn orders(&self) -> &[Order] { &self.orders }
    pub fn analytics(&self) -> &Analytics { &self.analytics }
    pub fn product(&self, id: &ProductId) -> Option<&Product> { self.products.iter().find(|p| p.id() == id) }
    pub fn order(&self, id: &OrderId) -> Option<&Order> { self.orders.iter().find(|o| o.id() == id) }

    /// True while the last save attempt failed or a snapshot is held.
    pub fn is_degraded(&self) -> bool { self.degraded }

    /// Keys whose unreadable snapshot is kept intact until the next `flush`.
    pub fn held_keys(&self) -> impl Iterator<Item = &str> { self.held.iter().map(String::as_str) }

    pub fn take_events(&mut self) -> Vec<StoreEvent> { std::mem::take(&mut self.events) }

    pub fn search_products(&self, query: &ProductQuery) -> Vec<&Product> { query::filter_products(&self.products, query) }
    pub fn search_orders(&self, query: &OrderQuery) -> Vec<&Order> { query::filter_orders(&self.orders, query) }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<Product> {
        draft.validate()?;
        self.ensure_currency(&draft.price)?;
        let product = Product::create(draft);
        info!(product_id = %product.id(), name = %product.name.primary, "product added");
        self.products.push(product.clone());
        self.raise_event(StoreEvent::ProductAdded { product_id: product.id().clone() });
        self.commit();
        Ok(product)
    }

    /// Replaces the stored record with the same id wholesale.
    pub fn update_product(&mut self, product: Product) -> Result<()> {
        product.validate()?;
        self.ensure_currency(&product.price)?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id() == product.id())
            .ok_or_else(|| StoreError::ProductNotFound(product.id().clone()))?;
        let product_id = product.id().clone();
        *slot = product;
        info!(product_id = %product_id, "product updated");
        self.raise_event(StoreEvent::ProductUpdated { product_id });
        self.commit();
        Ok(())
    }

    /// Hard delete. Orders keep their own copy of the product's name and price.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;
        let removed = self.products.remove(index);
        info!(product_id = %id, "product deleted");
        self.raise_event(StoreEvent::ProductDeleted { product_id: id.clone() });
        self.commit();
        Ok(removed)
    }

    pub fn add_order(&mut self, draft: OrderDraft) -> Result<Order> {
        draft.validate()?;
        self.ensure_currency(&draft.total)?;
        for item in &draft.items {
            self.ensure_currency(&item.unit_price)?;
        }
        let order = Order::with_id(self.next_order_id()?, draft);
        info!(order_id = %order.id(), total = %order.total(), items = order.items().len(), "order added");
        self.orders.push(order.clone());
        self.raise_event(StoreEvent::OrderAdded { order_id: order.id().clone() });
        self.commit();
        Ok(order)
    }

    /// Sets the status unconditionally; any transition is allowed.
    pub fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> Result<()> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or_else(|| StoreError::OrderNotFound(id.clone()))?;
        let from = order.set_status(status);
        if from != status {
            info!(order_id = %id, %from, to = %status, "order status changed");
            self.raise_event(StoreEvent::OrderStatusChanged { order_id: id.clone(), from, to: status });
        }
        self.commit();
        Ok(())
    }

    /// Rebuilds the analytics snapshot from the current collections.
    pub fn refresh_analytics(&mut self) {
        self.analytics = Analytics::compute(&self.seed, &self.products, &self.orders, self.config.top_products, &self.config.currency);
    }

    /// Saves both collections, failing on the first save that fails.
    ///
    /// Held snapshots are overwritten too.
    pub fn flush(&mut self) -> Result<()> {
        let result = self.save_products().and_then(|_| self.save_orders());
        if result.is_ok() && !self.held.is_empty() {
            warn!(keys = ?self.held, "held snapshots overwritten");
            self.held.clear();
        }
        self.degraded = result.is_err() || !self.held.is_empty();
        result.map_err(StoreError::from)
    }

    /// Final save before the store is dropped. Held snapshots are left as they are.
    pub fn close(self) -> Result<()> {
        for (key, save) in self.saves() {
            if self.held.contains(&key) {
                warn!(key = %key, "held snapshot left untouched");
                continue;
            }
            save(&self)?;
        }
        info!("store closed");
        Ok(())
    }

    /// Gives the substrate back without saving.
    pub fn into_substrate(self) -> S { self.substrate }

    fn commit(&mut self) {
        self.refresh_analytics();
        self.degraded = !self.held.is_empty();
        for (key, save) in self.saves() {
            if self.held.contains(&key) {
                debug!(key = %key, "snapshot held; save skipped");
                continue;
            }
            if let Err(e) = save(self) {
                warn!(key = %key, error = %e, "save failed; continuing in memory");
                self.degraded = true;
                self.raise_event(StoreEvent::PersistenceDegraded { key, reason: e.to_string() });
            }
        }
    }

    fn saves(&self) -> [(String, Save<S>); 2] {
        [(self.config.products_key.clone(), Self::save_products), (self.config.orders_key.clone(), Self::save_orders)]
    }

    fn save_products(&self) -> std::result::Result<(), PersistenceError> {
        let blob = storage::encode(&self.products)?;
        self.substrate.save(&self.config.products_key, &blob)?;
        debug!(key = %self.config.products_key, bytes = blob.len(), "products saved");
        Ok(())
    }

    fn save_orders(&self) -> std::result::Result<(), PersistenceError> {
        let blob = storage::encode(&self.orders)?;
        self.substrate.save(&self.config.orders_key, &blob)?;
        debug!(key = %self.config.orders_key, bytes = blob.len(), "orders saved");
        Ok(())
    }

    fn next_order_id(&self) -> Result<OrderId> {
        let last = self.orders.iter().filter_map(|o| o.id().sequence()).max().unwrap_or(0);
        let next = last
            .checked_add(1)
            .ok_or_else(|| StoreError::InvalidInput(format!("order numbers exhausted after {}", OrderId::from_sequence(last))))?;
        Ok(OrderId::from_sequence(next))
    }

    fn ensure_currency(&self, money: &Money) -> Result<()> {
        if money.currency() != self.config.currency {
            return Err(MoneyError::CurrencyMismatch { expected: self.config.currency.clone(), found: money.currency().to_string() }.into());
        }
        Ok(())
    }

    fn raise_event(&mut self, event: StoreEvent) { self.events.push(event); }
}

/// Key an unreadable snapshot is copied to before the store replaces it.
pub fn backup_key(key: &str) -> String { format!("{key}.corrupt") }

struct Restored<T> {
    records: Vec<T>,
    /// The saved blob could not be read or backed up and must not be saved over.
    held: bool,
}

fn load_collection<T>(
    substrate: &impl KeyValueStore,
    key: &str,
    decode: fn(&str) -> std::result::Result<Vec<T>, PersistenceError>,
    fallback: Option<Vec<T>>,
    events: &mut Vec<StoreEvent>,
) -> Restored<T> {
    let blob = match substrate.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!(key, seeded = fallback.is_some(), "no snapshot saved yet");
            return Restored { records: fallback.unwrap_or_default(), held: false };
        }
        Err(e) => {
            warn!(key, error = %e, "snapshot unreadable; holding it and starting over");
            events.push(StoreEvent::SnapshotRecovered { key: key.to_string(), reason: e.to_string(), backup: None });
            return Restored { records: fallback.unwrap_or_default(), held: true };
        }
    };
    let error = match decode(&blob) {
        Ok(records) => {
            debug!(key, count = records.len(), "snapshot restored");
            return Restored { records, held: false };
        }
        Err(e) => e,
    };
    let backup = backup_key(key);
    let held = match substrate.save(&backup, &blob) {
        Ok(()) => {
            warn!(key, backup = %backup, error = %error, "snapshot unreadable; copied aside and starting over");
            false
        }
        Err(e) => {
            warn!(key, error = %error, backup_error = %e, "snapshot unreadable and not copied; holding it");
            true
        }
    };
    events.push(StoreEvent::SnapshotRecovered { key: key.to_string(), reason: error.to_string(), backup: (!held).then_some(backup) });
    Restored { records: fallback.unwrap_or_default(), held }
}

/// Reports restored records that would be rejected if entered today.
fn audit<T: Validate>(records: &[T], id: impl Fn(&T) -> String, key: &str, events: &mut Vec<StoreEvent>) {
    for record in records {
        if let Err(e) = record.validate() {
            let id = id(record);
            warn!(key, id = %id, error = %e, "restored record fails validation");
            events.push(StoreEvent::InvalidRecordRestored { key: key.to_string(), id, reason: e.to_string() });
        }
    }
}

/// Keeps the first record for each id.
fn dedup_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> String, kind: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    let before = records.len();
    let kept: Vec<T> = records.into_iter().filter(|r| seen.insert(id(r))).collect();
    if kept.len() != before {
        warn!(kind, dropped = before - kept.len(), "duplicate ids in snapshot");
    }
    kept
}
