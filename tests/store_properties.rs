//! Property tests for the catalog and order store.
//!
//! 1. Product ids handed out by `add_product` are unique
//! 2. Total sales always equals the sum of order totals
//! 3. The top-seller list respects the configured length and is sorted by revenue
//! 4. Saved collections decode to equal records
//! 5. Repeating a status update changes nothing

use chrono::NaiveDate;
use moanaa_store::storage::{decode_orders, decode_products, encode};
use moanaa_store::{
    BilingualText, CatalogStore, Category, LineItem, LocalizedText, MemoryStore, Money, OrderDraft, OrderId,
    OrderStatus, ProductDraft, StoreConfig,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

// ── Strategies ──────────────────────────────────────────────────────────

const NAMES: [(&str, &str); 5] = [
    ("بادي سبلاش", "Body Splash"),
    ("بادي لوشن", "Body Lotion"),
    ("ليب بالم", "Lip Balm"),
    ("زيت الشعر", "Hair Oil"),
    ("هدية", "Gift Box"),
];

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn status_strategy() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(OrderStatus::ALL.to_vec())
}

fn money_strategy() -> impl Strategy<Value = Money> {
    (0i64..100_000, 0u32..3).prop_map(|(units, scale)| Money::egp(Decimal::new(units, scale)))
}

fn text_strategy() -> impl Strategy<Value = LocalizedText> {
    ("[a-z]{1,12}", prop::option::of("[a-z ]{0,12}"), prop::option::of("[a-z ]{0,12}"))
        .prop_map(|(primary, ar, en)| LocalizedText { primary, ar, en })
}

fn product_strategy() -> impl Strategy<Value = ProductDraft> {
    (text_strategy(), text_strategy(), category_strategy(), money_strategy(), any::<bool>(), any::<bool>()).prop_map(
        |(name, details, category, price, is_new, is_bestseller)| ProductDraft {
            details,
            is_new,
            is_bestseller,
            ..ProductDraft::new(name, category, price)
        },
    )
}

fn item_strategy() -> impl Strategy<Value = LineItem> {
    (0usize..NAMES.len(), 1i64..1_000, 1u32..10).prop_map(|(n, price, qty)| {
        LineItem::new(BilingualText::new(NAMES[n].0, NAMES[n].1), Money::egp(Decimal::from(price)), qty)
    })
}

fn order_strategy() -> impl Strategy<Value = OrderDraft> {
    (money_strategy(), status_strategy(), prop::collection::vec(item_strategy(), 0..5), 1u32..28).prop_map(
        |(total, status, items, day)| OrderDraft {
            customer: BilingualText::new("عميل", "Customer"),
            address: BilingualText::new("القاهرة", "Cairo"),
            phone: "+201000000000".into(),
            email: "customer@example.com".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            status,
            total,
            items,
        },
    )
}

fn empty_store(top_products: usize) -> CatalogStore<MemoryStore> {
    let config = StoreConfig { seed_when_empty: false, top_products, ..StoreConfig::default() };
    CatalogStore::open(config, MemoryStore::new())
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Unique product ids
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn added_products_get_unique_ids(drafts in prop::collection::vec(product_strategy(), 1..40)) {
        let mut store = empty_store(3);
        let mut ids = HashSet::new();
        for draft in drafts {
            let product = store.add_product(draft).unwrap();
            prop_assert!(ids.insert(product.id().clone()));
        }
        prop_assert_eq!(store.products().len(), ids.len());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Total sales is the exact sum of order totals
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn total_sales_matches_order_totals(
        drafts in prop::collection::vec(order_strategy(), 0..20),
        updates in prop::collection::vec((0usize..20, status_strategy()), 0..10),
    ) {
        let mut store = empty_store(3);
        for draft in drafts {
            store.add_order(draft).unwrap();
        }
        for (index, status) in updates {
            let Some(id) = store.orders().get(index).map(|o| o.id().clone()) else { continue };
            store.update_order_status(&id, status).unwrap();
        }
        let expected: Decimal = store.orders().iter().map(|o| o.total().amount()).sum();
        prop_assert_eq!(store.analytics().total_sales.amount(), expected);
        prop_assert_eq!(store.analytics().total_orders, store.orders().len());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Top sellers: bounded and sorted
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn top_sellers_bounded_and_sorted(
        drafts in prop::collection::vec(order_strategy(), 0..20),
        top_n in 1usize..6,
    ) {
        let mut store = empty_store(top_n);
        for draft in drafts {
            store.add_order(draft).unwrap();
        }
        let top = &store.analytics().top_selling_products;
        prop_assert!(top.len() <= top_n);
        for pair in top.windows(2) {
            prop_assert!(pair[0].revenue.amount() >= pair[1].revenue.amount());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Round trip through the persisted format
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn catalog_round_trips(drafts in prop::collection::vec(product_strategy(), 0..20)) {
        let mut store = empty_store(3);
        for draft in drafts {
            store.add_product(draft).unwrap();
        }
        let decoded = decode_products(&encode(store.products()).unwrap()).unwrap();
        prop_assert_eq!(decoded.as_slice(), store.products());
    }

    #[test]
    fn orders_round_trip(drafts in prop::collection::vec(order_strategy(), 0..20)) {
        let mut store = empty_store(3);
        for draft in drafts {
            store.add_order(draft).unwrap();
        }
        let decoded = decode_orders(&encode(store.orders()).unwrap()).unwrap();
        prop_assert_eq!(decoded.as_slice(), store.orders());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Status updates are idempotent
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_status_update_is_idempotent(draft in order_strategy(), status in status_strategy()) {
        let mut store = empty_store(3);
        let id: OrderId = store.add_order(draft).unwrap().id().clone();
        store.update_order_status(&id, status).unwrap();
        let once = (store.orders().to_vec(), store.analytics().clone());
        store.update_order_status(&id, status).unwrap();
        prop_assert_eq!((store.orders().to_vec(), store.analytics().clone()), once);
    }
}
