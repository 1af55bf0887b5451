//! MOANAA Store - opens the file-backed store and prints the dashboard snapshot.

use anyhow::{Context, Result};
use moanaa_store::{CatalogStore, FileStore, Locale, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();

    let config = StoreConfig::from_env().context("invalid store configuration")?;
    let locale: Locale = std::env::var("STORE_LOCALE").ok().and_then(|l| l.parse().ok()).unwrap_or_default();
    let substrate = FileStore::new(config.data_dir.clone());
    tracing::info!(data_dir = %substrate.dir().display(), currency = %config.currency, "opening MOANAA store");
    let mut store = CatalogStore::open(config, substrate);
    for event in store.take_events() {
        tracing::warn!(?event, "startup");
    }
    for key in store.held_keys() {
        tracing::warn!(key, "saved snapshot unreadable; it is left untouched on exit");
    }

    let analytics = store.analytics();
    tracing::info!(
        products = store.products().len(),
        orders = analytics.total_orders,
        total_sales = %analytics.total_sales,
        average_order = %analytics.average_order_value,
        "store ready"
    );
    for (rank, top) in analytics.top_selling_products.iter().enumerate() {
        tracing::info!(rank = rank + 1, name = top.name.get(locale), units = top.units, revenue = %top.revenue, "top seller");
    }
    for order in store.orders() {
        if let Ok(gap) = order.total_discrepancy() {
            if !gap.amount().is_zero() {
                tracing::info!(order_id = %order.id(), gap = %gap, "order total differs from its line items");
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(analytics)?);
    store.close().context("failed to save store snapshot")?;
    Ok(())
}
