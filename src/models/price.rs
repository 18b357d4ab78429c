use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest listing prices scraped from the catalog.
///
/// Either side may be missing when the catalog has no estimate for it;
/// a missing price counts as zero when prices are compared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentValue {
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub new_price: Option<Decimal>,
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub used_price: Option<Decimal>,
}

impl CurrentValue {
    pub fn new(new_price: Option<Decimal>, used_price: Option<Decimal>) -> Self {
        Self {
            new_price,
            used_price,
        }
    }

    pub fn new_or_zero(&self) -> Decimal {
        self.new_price.unwrap_or(Decimal::ZERO)
    }

    pub fn used_or_zero(&self) -> Decimal {
        self.used_price.unwrap_or(Decimal::ZERO)
    }
}

/// One detected price move, stored in a record's "Price History".
///
/// At most one entry exists per record and calendar day. Amounts are
/// written as JSON numbers; older files with string amounts still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub date: NaiveDate,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub new_price_old: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub used_price_old: Decimal,
    pub new_price_diff: bool,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub new_price_diff_amount: Decimal,
    pub used_price_diff: bool,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub used_price_diff_amount: Decimal,
}

/// Read-time comparison of the current used price against the used
/// price in effect before the latest recorded change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedPriceComparison {
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub last_used_price: Option<Decimal>,
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub current_used_price: Option<Decimal>,
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub difference: Option<Decimal>,
    pub increase: bool,
    pub decrease: bool,
    pub unchanged: bool,
}

impl Default for UsedPriceComparison {
    fn default() -> Self {
        Self {
            last_used_price: None,
            current_used_price: None,
            difference: None,
            increase: false,
            decrease: false,
            unchanged: true,
        }
    }
}
