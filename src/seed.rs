//! Sample catalog, orders and dashboard figures for a fresh installation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use crate::analytics::{AnalyticsSeed, CategoryShare, SalesByPeriod, SalesPoint};
use crate::domain::aggregates::{Category, LineItem, Order, OrderDraft, OrderStatus, Product, ProductDraft};
use crate::domain::value_objects::{BilingualText, LocalizedText, Money, OrderId, ProductId};

const IMAGE_BASE: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com";

fn egp(amount: i64) -> Money { Money::egp(Decimal::from(amount)) }

fn product(id: &str, name: (&str, &str), description: (&str, &str), details: (&str, &str), category: Category, price: i64, image: &str) -> Product {
    Product::with_id(ProductId::from(id), ProductDraft {
        name: LocalizedText::bilingual(name.0, name.1),
        description: LocalizedText::bilingual(description.0, description.1),
        category,
        price: egp(price),
        image_url: format!("{IMAGE_BASE}/{image}"),
        details: LocalizedText::bilingual(details.0, details.1),
        is_new: false,
        is_bestseller: false,
    })
}

pub fn products() -> Vec<Product> {
    let mut splash = product(
        "1",
        ("بادي سبلاش موانا", "MOANAÀ Body Splash"),
        ("عطرك المفضل في شكل بادي سبلاش", "Your favorite fragrance as a body splash"),
        (
            "مع موانا بادي سبلاش، هتنسى كل مشاكل العطور التقليدية! ثبات قوي، فوحان مميز، وآمن تمامًا حتى لأصحاب البشرة الحساسة.",
            "With MOANAÀ Body Splash, you'll forget all traditional perfume problems! Strong longevity, distinctive fragrance, and completely safe even for sensitive skin.",
        ),
        Category::BodySplash,
        250,
        "body-splash.jpeg",
    );
    splash.is_bestseller = true;
    let lotion = product(
        "2",
        ("بادي لوشن", "Body Lotion"),
        ("لوشن مرطب للجسم", "Moisturizing body lotion"),
        (
            "يعتبر من أهم منتجات العناية بالبشرة، خاصة في فصل الشتاء، بسبب تأثير العوامل الجوية الباردة التي تسبب جفاف وتشقق البشرة.",
            "Considered one of the most important skincare products, especially in winter, due to the effect of cold weather conditions that cause dry and cracked skin.",
        ),
        Category::BodyLotion,
        200,
        "body-lotion.jpeg",
    );
    let mut balm = product(
        "3",
        ("ليب بالم موانا", "MOANAÀ Lip Balm"),
        ("بلسم مرطب للشفاه", "Moisturizing lip balm"),
        (
            "تغير الجو بيعرض الشفايف للحساسيه والتقشر عشان كدا موانا عملتلكم اقوي ليب بالم ناعم مرطب للشفايف وملمسه خفيف غير دهني.",
            "Weather changes expose lips to sensitivity and peeling, that's why MOANAÀ created the strongest lip balm. Smooth, moisturizing for the lips with a light, non-greasy texture.",
        ),
        Category::LipBalm,
        150,
        "lip-balm.jpeg",
    );
    balm.is_new = true;
    let oil = product(
        "4",
        ("زيت موانا للشعر", "MOANAÀ Hair Oil"),
        ("زيت طبيعي للعناية بالشعر", "Natural hair care oil"),
        (
            "زيت موانا للشعر هو الحل الأمثل للعناية بالشعر وتقويته. يساعد على تكثيف الشعر ويقلل من تساقط الشعر.",
            "MOANAÀ hair oil is the perfect solution for hair care and strengthening. It helps thicken hair and reduces hair loss.",
        ),
        Category::HairOil,
        180,
        "hair-oil.jpeg",
    );
    vec![splash, lotion, balm, oil]
}

fn splash() -> LineItem { LineItem::new(BilingualText::new("بادي سبلاش موانا", "MOANAÀ Body Splash"), egp(250), 1) }
fn lotion() -> LineItem { LineItem::new(BilingualText::new("بادي لوشن", "Body Lotion"), egp(200), 1) }
fn balm() -> LineItem { LineItem::new(BilingualText::new("ليب بالم موانا", "MOANAÀ Lip Balm"), egp(150), 1) }
fn oil() -> LineItem { LineItem::new(BilingualText::new("زيت موانا للشعر", "MOANAÀ Hair Oil"), egp(180), 1) }

#[allow(clippy::too_many_arguments)]
fn order(seq: u64, customer: (&str, &str), address: (&str, &str), contact: (&str, &str), date: (i32, u32, u32), status: OrderStatus, total: i64, items: Vec<LineItem>) -> Order {
    Order::with_id(OrderId::from_sequence(seq), OrderDraft {
        customer: BilingualText::new(customer.0, customer.1),
        address: BilingualText::new(address.0, address.1),
        phone: contact.0.to_string(),
        email: contact.1.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        status,
        total: egp(total),
        items,
    })
}

// Recorded totals are what the customer was charged and do not always match
// the itemised lines.
pub fn orders() -> Vec<Order> {
    vec![
        order(
            1,
            ("سارة أحمد", "Sarah Ahmed"),
            ("شارع المعز، القاهرة، مصر", "El Moez Street, Cairo, Egypt"),
            ("+201234567890", "sarah@example.com"),
            (2024, 4, 1),
            OrderStatus::Pending,
            450,
            vec![splash(), balm(), oil()],
        ),
        order(
            2,
            ("محمد علي", "Mohamed Ali"),
            ("شارع الهرم، الجيزة، مصر", "Pyramid Street, Giza, Egypt"),
            ("+201234567891", "mohamed@example.com"),
            (2024, 3, 30),
            OrderStatus::Shipped,
            250,
            vec![splash()],
        ),
        order(
            3,
            ("فاطمة محمود", "Fatima Mahmoud"),
            ("شارع التحرير، القاهرة، مصر", "Tahrir Street, Cairo, Egypt"),
            ("+201234567892", "fatima@example.com"),
            (2024, 3, 28),
            OrderStatus::Delivered,
            380,
            vec![lotion(), balm()],
        ),
        order(
            4,
            ("أحمد حسن", "Ahmed Hassan"),
            ("شارع المنيل، القاهرة، مصر", "El Manial Street, Cairo, Egypt"),
            ("+201234567893", "ahmed@example.com"),
            (2024, 3, 25),
            OrderStatus::Cancelled,
            180,
            vec![oil()],
        ),
        order(
            5,
            ("نورا سعيد", "Noura Saeed"),
            ("شارع جامعة الدول العربية، القاهرة، مصر", "Arab League Street, Cairo, Egypt"),
            ("+201234567894", "noura@example.com"),
            (2024, 3, 22),
            OrderStatus::Delivered,
            600,
            vec![splash(), lotion(), balm()],
        ),
    ]
}

pub fn analytics() -> AnalyticsSeed {
    AnalyticsSeed {
        new_customers: 38,
        sales_growth: Decimal::new(125, 1),
        orders_growth: Decimal::new(82, 1),
        customers_growth: Decimal::new(187, 1),
        sales_by_period: SalesByPeriod {
            week: vec![
                SalesPoint::new("الأحد", "Sun", 4000),
                SalesPoint::new("الإثنين", "Mon", 3000),
                SalesPoint::new("الثلاثاء", "Tue", 2000),
                SalesPoint::new("الأربعاء", "Wed", 2780),
                SalesPoint::new("الخميس", "Thu", 1890),
                SalesPoint::new("الجمعة", "Fri", 2390),
                SalesPoint::new("السبت", "Sat", 3490),
            ],
            month: vec![
                SalesPoint::new("الأسبوع 1", "Week 1", 12000),
                SalesPoint::new("الأسبوع 2", "Week 2", 9800),
                SalesPoint::new("الأسبوع 3", "Week 3", 11200),
                SalesPoint::new("الأسبوع 4", "Week 4", 14500),
            ],
            year: vec![
                SalesPoint::new("يناير", "Jan", 35000),
                SalesPoint::new("فبراير", "Feb", 28000),
                SalesPoint::new("مارس", "Mar", 32000),
                SalesPoint::new("أبريل", "Apr", 39000),
                SalesPoint::new("مايو", "May", 42000),
                SalesPoint::new("يونيو", "Jun", 35000),
                SalesPoint::new("يوليو", "Jul", 29000),
                SalesPoint::new("أغسطس", "Aug", 33000),
                SalesPoint::new("سبتمبر", "Sep", 37000),
                SalesPoint::new("أكتوبر", "Oct", 45000),
                SalesPoint::new("نوفمبر", "Nov", 48000),
                SalesPoint::new("ديسمبر", "Dec", 52000),
            ],
        },
        product_distribution: vec![
            CategoryShare { category: Category::BodySplash, percentage: Decimal::from(40) },
            CategoryShare { category: Category::BodyLotion, percentage: Decimal::from(30) },
            CategoryShare { category: Category::LipBalm, percentage: Decimal::from(15) },
            CategoryShare { category: Category::HairOil, percentage: Decimal::from(15) },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_seed_records_are_valid() {
        for p in products() { assert!(p.validate().is_ok(), "{}", p.id()); }
        for o in orders() { assert!(o.validate().is_ok(), "{}", o.id()); }
    }

    #[test]
    fn test_every_order_line_matches_the_catalog() {
        let catalog = products();
        for item in orders().iter().flat_map(|o| o.items().to_vec()) {
            assert!(catalog.iter().any(|p| p.is_named(&item.name.ar)), "{}", item.name.en);
        }
    }

    #[test]
    fn test_period_series_lengths() {
        let seed = analytics();
        assert_eq!(seed.sales_by_period.week.len(), 7);
        assert_eq!(seed.sales_by_period.month.len(), 4);
        assert_eq!(seed.sales_by_period.year.len(), 12);
    }
}
