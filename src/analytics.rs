//! Dashboard analytics derived from the catalog and the order list.
//!
//! [`Analytics::compute`] always rebuilds the snapshot from scratch. Sales
//! totals, order count, average order value, category revenue, product
//! distribution and the top sellers come from live data. New-customer count,
//! growth percentages and the period series are carried over from the
//! [`AnalyticsSeed`] unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use crate::domain::aggregates::{Category, LineItem, Order, Product};
use crate::domain::value_objects::{BilingualText, Locale, Money};

/// Icon for a top seller that no longer matches anything in the catalog.
pub const DEFAULT_ICON: &str = "kiss-wink-heart";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub label: BilingualText,
    pub amount: Decimal,
}

impl SalesPoint {
    pub fn new(ar: &str, en: &str, amount: i64) -> Self {
        Self { label: BilingualText::new(ar, en), amount: Decimal::from(amount) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesByPeriod {
    pub week: Vec<SalesPoint>,
    pub month: Vec<SalesPoint>,
    pub year: Vec<SalesPoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    /// Percent of matched revenue, one decimal place.
    pub percentage: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: Category,
    pub revenue: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: BilingualText,
    pub units: u64,
    pub revenue: Money,
    pub icon: String,
}

/// Figures the dashboard shows that are not derived from store data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSeed {
    pub new_customers: u32,
    pub sales_growth: Decimal,
    pub orders_growth: Decimal,
    pub customers_growth: Decimal,
    pub sales_by_period: SalesByPeriod,
    /// Shown until at least one order line matches a catalog product.
    pub product_distribution: Vec<CategoryShare>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_sales: Money,
    pub total_orders: usize,
    pub average_order_value: Money,
    pub new_customers: u32,
    pub sales_growth: Decimal,
    pub orders_growth: Decimal,
    pub customers_growth: Decimal,
    pub sales_by_period: SalesByPeriod,
    pub category_revenue: Vec<CategoryRevenue>,
    pub product_distribution: Vec<CategoryShare>,
    pub top_selling_products: Vec<TopProduct>,
}

impl Analytics {
    pub fn compute(seed: &AnalyticsSeed, products: &[Product], orders: &[Order], top_n: usize, currency: &str) -> Self {
        let total_sales = total_sales(orders, currency);
        let average_order_value = total_sales.divide(orders.len());
        let catalog = CatalogIndex::new(products);
        let category_revenue = category_revenue(&catalog, orders, currency);
        let product_distribution = if category_revenue.is_empty() {
            seed.product_distribution.clone()
        } else {
            distribution(&category_revenue)
        };
        let top_selling_products = top_sellers(&catalog, orders, top_n, currency);
        debug!(
            orders = orders.len(),
            total_sales = %total_sales,
            top = top_selling_products.len(),
            "analytics recomputed"
        );
        Self {
            total_sales,
            total_orders: orders.len(),
            average_order_value,
            new_customers: seed.new_customers,
            sales_growth: seed.sales_growth,
            orders_growth: seed.orders_growth,
            customers_growth: seed.customers_growth,
            sales_by_period: seed.sales_by_period.clone(),
            category_revenue,
            product_distribution,
            top_selling_products,
        }
    }
}

fn total_sales(orders: &[Order], currency: &str) -> Money {
    orders.iter().fold(Money::zero(currency), |acc, order| match acc.add(order.total()) {
        Ok(sum) => sum,
        Err(e) => {
            warn!(order_id = %order.id(), error = %e, "order total left out of sales");
            acc
        }
    })
}

/// Line-item revenue in the store currency; `None` for foreign-currency
/// lines and for lines too large to represent.
fn line_revenue(item: &LineItem, currency: &str) -> Option<Decimal> {
    if item.unit_price.currency() != currency {
        warn!(item = %item.name.en, currency = item.unit_price.currency(), "foreign-currency line left out of analytics");
        return None;
    }
    match item.line_total() {
        Ok(total) => Some(total.amount()),
        Err(e) => {
            warn!(item = %item.name.en, error = %e, "line item left out of analytics");
            None
        }
    }
}

/// Lookup of catalog products by any of their name variants.
struct CatalogIndex<'a> {
    by_name: HashMap<&'a str, &'a Product>,
}

impl<'a> CatalogIndex<'a> {
    fn new(products: &'a [Product]) -> Self {
        let mut by_name = HashMap::new();
        for p in products {
            let names = [Some(p.name.primary.as_str()), p.name.ar.as_deref(), p.name.en.as_deref()];
            for name in names.into_iter().flatten() {
                by_name.entry(name).or_insert(p);
            }
        }
        Self { by_name }
    }

    fn find(&self, name: &BilingualText) -> Option<&'a Product> {
        self.by_name.get(name.ar.as_str()).or_else(|| self.by_name.get(name.en.as_str())).copied()
    }
}

fn category_revenue(catalog: &CatalogIndex<'_>, orders: &[Order], currency: &str) -> Vec<CategoryRevenue> {
    let mut totals: HashMap<Category, Decimal> = HashMap::new();
    for item in orders.iter().flat_map(|o| o.items()) {
        let Some(product) = catalog.find(&item.name) else { continue };
        let Some(revenue) = line_revenue(item, currency) else { continue };
        let total = totals.entry(product.category).or_default();
        match total.checked_add(revenue) {
            Some(sum) => *total = sum,
            None => warn!(category = %product.category, "category revenue overflow; line left out"),
        }
    }
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let amount = totals.get(&category)?;
            Some(CategoryRevenue { category, revenue: Money::new(*amount, currency) })
        })
        .collect()
}

fn distribution(revenue: &[CategoryRevenue]) -> Vec<CategoryShare> {
    let total = revenue.iter().try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.revenue.amount()));
    revenue
        .iter()
        .map(|r| {
            let percentage = match total {
                Some(total) if !total.is_zero() => (r.revenue.amount() / total * Decimal::ONE_HUNDRED).round_dp(1),
                _ => Decimal::ZERO,
            };
            CategoryShare { category: r.category, percentage }
        })
        .collect()
}

fn top_sellers(catalog: &CatalogIndex<'_>, orders: &[Order], top_n: usize, currency: &str) -> Vec<TopProduct> {
    let mut ranked: Vec<TopProduct> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for item in orders.iter().flat_map(|o| o.items()) {
        let Some(revenue) = line_revenue(item, currency) else { continue };
        let slot = *slots.entry(item.name.ar.as_str()).or_insert_with(|| {
            let product = catalog.find(&item.name);
            let en = product.and_then(|p| p.name.variant(Locale::En)).unwrap_or(item.name.en.as_str());
            ranked.push(TopProduct {
                name: BilingualText::new(item.name.ar.as_str(), en),
                units: 0,
                revenue: Money::zero(currency),
                icon: product.map_or(DEFAULT_ICON, |p| p.category.icon()).to_string(),
            });
            ranked.len() - 1
        });
        let entry = &mut ranked[slot];
        let Some(sum) = entry.revenue.amount().checked_add(revenue) else {
            warn!(item = %item.name.en, "top seller revenue overflow; line left out");
            continue;
        };
        entry.units = entry.units.saturating_add(u64::from(item.quantity));
        entry.revenue = Money::new(sum, currency);
    }
    // sort_by is stable: equal revenue keeps first-encounter order
    ranked.sort_by(|a, b| b.revenue.amount().cmp(&a.revenue.amount()));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::aggregates::{OrderDraft, OrderStatus, ProductDraft};
    use crate::domain::value_objects::{LocalizedText, OrderId, ProductId};

    fn product(id: &str, ar: &str, en: &str, category: Category, price: i64) -> Product {
        Product::with_id(
            ProductId::from(id),
            ProductDraft::new(LocalizedText::bilingual(ar, en), category, Money::egp(Decimal::from(price))),
        )
    }

    fn item(ar: &str, en: &str, price: i64, quantity: u32) -> LineItem {
        LineItem::new(BilingualText::new(ar, en), Money::egp(Decimal::from(price)), quantity)
    }

    fn order(id: &str, total: i64, items: Vec<LineItem>) -> Order {
        Order::with_id(
            OrderId::from(id),
            OrderDraft {
                customer: BilingualText::new("نورا", "Noura"),
                address: BilingualText::new("القاهرة", "Cairo"),
                phone: "+20".into(),
                email: "noura@example.com".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 22).unwrap(),
                status: OrderStatus::Delivered,
                total: Money::egp(Decimal::from(total)),
                items,
            },
        )
    }

    fn seed() -> AnalyticsSeed {
        AnalyticsSeed {
            new_customers: 38,
            sales_growth: Decimal::new(125, 1),
            product_distribution: vec![CategoryShare { category: Category::HairOil, percentage: Decimal::ONE_HUNDRED }],
            ..AnalyticsSeed::default()
        }
    }

    #[test]
    fn test_single_product_revenue() {
        let products = vec![product("1", "بادي سبلاش", "Body Splash", Category::BodySplash, 250)];
        let orders = vec![order("ORD-001", 500, vec![item("بادي سبلاش", "Body Splash", 250, 2)])];
        let a = Analytics::compute(&seed(), &products, &orders, 3, "EGP");
        assert_eq!(a.top_selling_products.len(), 1);
        let top = &a.top_selling_products[0];
        assert_eq!(top.units, 2);
        assert_eq!(top.revenue.amount(), Decimal::from(500));
        assert_eq!(top.icon, "spray-can-sparkles");
    }

    #[test]
    fn test_seed_fields_carried_over() {
        let a = Analytics::compute(&seed(), &[], &[], 3, "EGP");
        assert_eq!(a.new_customers, 38);
        assert_eq!(a.sales_growth, Decimal::new(125, 1));
        assert_eq!(a.total_orders, 0);
        assert_eq!(a.total_sales.amount(), Decimal::ZERO);
        assert_eq!(a.average_order_value.amount(), Decimal::ZERO);
        assert!(a.top_selling_products.is_empty());
        assert_eq!(a.product_distribution, seed().product_distribution);
    }

    #[test]
    fn test_top_sellers_sorted_and_truncated() {
        let orders = vec![
            order("ORD-001", 0, vec![item("أ", "A", 100, 1), item("ب", "B", 300, 1)]),
            order("ORD-002", 0, vec![item("ج", "C", 200, 1), item("أ", "A", 100, 3)]),
        ];
        let a = Analytics::compute(&seed(), &[], &orders, 2, "EGP");
        let names: Vec<&str> = a.top_selling_products.iter().map(|t| t.name.en.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(a.top_selling_products[0].icon, DEFAULT_ICON);
    }

    #[test]
    fn test_ties_keep_first_encounter_order() {
        let orders = vec![order("ORD-001", 0, vec![item("ب", "B", 100, 1), item("أ", "A", 50, 2)])];
        let a = Analytics::compute(&seed(), &[], &orders, 5, "EGP");
        let names: Vec<&str> = a.top_selling_products.iter().map(|t| t.name.en.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_category_distribution() {
        let products = vec![
            product("1", "بادي سبلاش", "Body Splash", Category::BodySplash, 250),
            product("2", "ليب بالم", "Lip Balm", Category::LipBalm, 150),
        ];
        let orders = vec![order(
            "ORD-001",
            400,
            vec![item("بادي سبلاش", "Body Splash", 250, 1), item("ليب بالم", "Lip Balm", 150, 1), item("x", "y", 99, 1)],
        )];
        let a = Analytics::compute(&seed(), &products, &orders, 3, "EGP");
        assert_eq!(a.category_revenue.len(), 2);
        assert_eq!(a.category_revenue[0].revenue.amount(), Decimal::from(250));
        let shares: Vec<Decimal> = a.product_distribution.iter().map(|s| s.percentage).collect();
        assert_eq!(shares, [Decimal::new(625, 1), Decimal::new(375, 1)]);
    }

    #[test]
    fn test_oversized_restored_amounts_do_not_panic() {
        let products = vec![product("1", "بادي سبلاش", "Body Splash", Category::BodySplash, 250)];
        let mut first = order("ORD-001", 0, vec![item("بادي سبلاش", "Body Splash", 250, 1)]);
        first.total = Money::egp(Decimal::MAX);
        first.items[0].unit_price = Money::egp(Decimal::MAX);
        let mut second = order("ORD-002", 0, vec![item("بادي سبلاش", "Body Splash", 250, 1)]);
        second.total = Money::egp(Decimal::MAX);
        second.items[0].unit_price = Money::egp(Decimal::MAX);
        second.items[0].quantity = 2;

        let a = Analytics::compute(&seed(), &products, &[first, second], 3, "EGP");
        assert_eq!(a.total_sales.amount(), Decimal::MAX);
        assert_eq!(a.total_orders, 2);
        assert_eq!(a.top_selling_products[0].revenue.amount(), Decimal::MAX);
        assert_eq!(a.top_selling_products[0].units, 1);
        assert_eq!(a.product_distribution[0].percentage, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_foreign_currency_totals_skipped() {
        let mut foreign = order("ORD-002", 0, vec![]);
        foreign.total = Money::new(Decimal::from(10), "USD");
        let orders = vec![order("ORD-001", 100, vec![]), foreign];
        let a = Analytics::compute(&seed(), &[], &orders, 3, "EGP");
        assert_eq!(a.total_sales.amount(), Decimal::from(100));
        assert_eq!(a.total_orders, 2);
    }
}
