//! Admin and storefront list filters.

use crate::domain::aggregates::{Category, Order, OrderStatus, Product};
use crate::domain::value_objects::Locale;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring of a name, the description or the category slug.
    pub term: Option<String>,
    pub category: Option<Category>,
    pub new_only: bool,
    pub bestsellers_only: bool,
}

impl ProductQuery {
    pub fn term(term: impl Into<String>) -> Self { Self { term: Some(term.into()), ..Self::default() } }

    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) { return false; }
        if self.new_only && !product.is_new { return false; }
        if self.bestsellers_only && !product.is_bestseller { return false; }
        let Some(needle) = normalized(self.term.as_deref()) else { return true };
        product.name.contains_ignore_case(&needle)
            || product.description.primary.to_lowercase().contains(&needle)
            || product.category.as_str().contains(&needle)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Matched against id, customer name in `locale`, email and phone.
    pub term: Option<String>,
    pub status: Option<OrderStatus>,
    pub locale: Locale,
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status()) { return false; }
        let Some(needle) = normalized(self.term.as_deref()) else { return true };
        let raw = self.term.as_deref().unwrap_or_default().trim();
        order.id().as_str().to_lowercase().contains(&needle)
            || order.customer.get(self.locale).to_lowercase().contains(&needle)
            || order.email.to_lowercase().contains(&needle)
            || order.phone.contains(raw)
    }
}

fn normalized(term: Option<&str>) -> Option<String> {
    term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase)
}

pub fn filter_products<'a>(products: &'a [Product], query: &ProductQuery) -> Vec<&'a Product> {
    products.iter().filter(|p| query.matches(p)).collect()
}

/// Matching orders, newest first. Orders on the same day keep list order.
pub fn filter_orders<'a>(orders: &'a [Order], query: &OrderQuery) -> Vec<&'a Order> {
    let mut hits: Vec<&Order> = orders.iter().filter(|o| query.matches(o)).collect();
    hits.sort_by(|a, b| b.date.cmp(&a.date));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_product_term_matches_any_locale() {
        let products = seed::products();
        let hits = filter_products(&products, &ProductQuery::term("lip"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id().as_str(), "3");
        let hits = filter_products(&products, &ProductQuery::term("زيت"));
        assert_eq!(hits[0].id().as_str(), "4");
    }

    #[test]
    fn test_product_flags_and_category() {
        let products = seed::products();
        let q = ProductQuery { bestsellers_only: true, ..ProductQuery::default() };
        assert_eq!(filter_products(&products, &q).len(), 1);
        let q = ProductQuery { category: Some(Category::HairOil), ..ProductQuery::default() };
        assert_eq!(filter_products(&products, &q)[0].id().as_str(), "4");
        assert_eq!(filter_products(&products, &ProductQuery::term("body-")).len(), 2);
    }

    #[test]
    fn test_orders_sorted_newest_first() {
        let orders = seed::orders();
        let ids: Vec<&str> = filter_orders(&orders, &OrderQuery::default()).iter().map(|o| o.id().as_str()).collect();
        assert_eq!(ids, ["ORD-001", "ORD-002", "ORD-003", "ORD-004", "ORD-005"]);
    }

    #[test]
    fn test_order_search_by_locale_status_and_phone() {
        let orders = seed::orders();
        let q = OrderQuery { term: Some("fatima".into()), locale: Locale::En, ..OrderQuery::default() };
        assert_eq!(filter_orders(&orders, &q)[0].id().as_str(), "ORD-003");
        let q = OrderQuery { term: Some("fatima".into()), locale: Locale::Ar, ..OrderQuery::default() };
        // the email still matches in Arabic mode
        assert_eq!(filter_orders(&orders, &q).len(), 1);
        let q = OrderQuery { status: Some(OrderStatus::Delivered), ..OrderQuery::default() };
        assert_eq!(filter_orders(&orders, &q).len(), 2);
        let q = OrderQuery { term: Some("+201234567894".into()), ..OrderQuery::default() };
        assert_eq!(filter_orders(&orders, &q)[0].id().as_str(), "ORD-005");
    }
}
