//! Value Objects for the storefront

mod locale;

pub use locale::{BilingualText, Locale, LocaleError, LocalizedText};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Currency every price in the shop is quoted in unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "EGP";

/// Largest single price or order total the store accepts.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Catalog product identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
    /// Fresh time-ordered id for a product created in this session.
    pub fn generate() -> Self { Self(Uuid::now_v7().to_string()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self { Self::new(value) }
}

/// Order identifier in the `ORD-NNN` shape shown to customers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    const PREFIX: &'static str = "ORD-";

    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
    pub fn from_sequence(number: u64) -> Self { Self(format!("{}{:03}", Self::PREFIX, number)) }
    pub fn as_str(&self) -> &str { &self.0 }

    /// Numeric suffix, if the id follows the `ORD-NNN` convention.
    pub fn sequence(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(Self::PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) { return None; }
        digits.parse().ok()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self { Self::new(value) }
}

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn egp(amount: Decimal) -> Self { Self::new(amount, DEFAULT_CURRENCY) }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_negative(&self) -> bool { self.amount.is_sign_negative() && !self.amount.is_zero() }

    /// Within `0..=MAX_AMOUNT`.
    pub fn is_in_range(&self) -> bool { !self.is_negative() && self.amount <= MAX_AMOUNT }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let sum = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(sum, &self.currency))
    }

    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let difference = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(difference, &self.currency))
    }

    pub fn multiply(&self, qty: u32) -> Result<Money, MoneyError> {
        let product = self.amount.checked_mul(Decimal::from(qty)).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(product, &self.currency))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch { expected: self.currency.clone(), found: other.currency.clone() });
        }
        Ok(())
    }

    /// Even split across `parts`, rounded to two places. Zero parts yields zero.
    pub fn divide(&self, parts: usize) -> Money {
        if parts == 0 { return Money::zero(&self.currency); }
        Money::new((self.amount / Decimal::from(parts as u64)).round_dp(2), &self.currency)
    }

    /// Parses a display string such as `"EGP 450"` or `"٢٥٠ جنيه"`.
    ///
    /// ASCII and Arabic-Indic digits are both accepted. The currency is taken
    /// from a three-letter uppercase code in the text, the Egyptian pound
    /// word, or `fallback_currency` when neither is present.
    pub fn parse_formatted(text: &str, fallback_currency: &str) -> Result<Money, MoneyError> {
        let mut digits = String::new();
        for c in text.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '\u{0660}'..='\u{0669}' => digits.push(shift_digit(c, 0x0660)),
                '\u{06F0}'..='\u{06F9}' => digits.push(shift_digit(c, 0x06F0)),
                '.' | '\u{066B}' if !digits.is_empty() && !digits.contains('.') => digits.push('.'),
                _ => {}
            }
        }
        let digits = digits.trim_end_matches('.');
        if digits.is_empty() { return Err(MoneyError::Unparseable(text.to_string())); }
        let amount = Decimal::from_str(digits).map_err(|_| MoneyError::Unparseable(text.to_string()))?;
        let currency = detect_currency(text).unwrap_or(fallback_currency);
        Ok(Money::new(amount, currency))
    }
}

fn shift_digit(c: char, zero: u32) -> char {
    char::from_digit(c as u32 - zero, 10).unwrap_or('0')
}

fn detect_currency(text: &str) -> Option<&str> {
    let code = text
        .split(|c: char| !c.is_ascii_alphabetic())
        .find(|word| word.len() == 3 && word.chars().all(|c| c.is_ascii_uppercase()));
    if code.is_some() { return code; }
    if text.contains("جنيه") || text.contains("ج.م") { return Some(DEFAULT_CURRENCY); }
    None
}

impl Default for Money { fn default() -> Self { Self::zero(DEFAULT_CURRENCY) } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{} {}", self.currency, self.amount) }
}

// Snapshots written by the first storefront release kept prices as display
// strings ("EGP 250") or bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Structured { amount: Decimal, currency: String },
    Plain(Decimal),
    Formatted(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Structured { amount, currency } => Ok(Money { amount, currency }),
            MoneyRepr::Plain(amount) => Ok(Money::egp(amount)),
            MoneyRepr::Formatted(text) => {
                Money::parse_formatted(&text, DEFAULT_CURRENCY).map_err(serde::de::Error::custom)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },
    #[error("Unparseable amount: {0:?}")]
    Unparseable(String),
    #[error("Amount out of range")]
    Overflow,
}
