use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::price::{CurrentValue, PriceChange, UsedPriceComparison};

/// Persisted key of the minifig identifier
pub const MINIFIG_NUMBER_KEY: &str = "Minifig number";

/// Persisted key of the set identifier
pub const SET_NUMBER_KEY: &str = "Number";

/// Persisted key of the price pair
pub const CURRENT_VALUE_KEY: &str = "Current value";

/// A scraped attribute: plain text, or the texts of several links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::List(_) => None,
        }
    }
}

/// One tracked collectible as persisted in the collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minifigure {
    #[serde(rename = "Minifig number", default, skip_serializing_if = "Option::is_none")]
    pub minifig_number: Option<String>,

    #[serde(rename = "Number", default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<String>,

    #[serde(rename = "Current value", default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<CurrentValue>,

    #[serde(rename = "Price History", default)]
    pub price_history: Vec<PriceChange>,

    #[serde(rename = "Quantity", default = "default_quantity")]
    pub quantity: u32,

    // Older files persisted the read-time comparison; it is recomputed on
    // every read, so the stored copy is dropped on the next save.
    #[serde(rename = "Used price comparison", default, skip_serializing)]
    pub stale_comparison: Option<serde_json::Value>,

    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

fn default_quantity() -> u32 {
    1
}

impl Default for Minifigure {
    fn default() -> Self {
        Self {
            minifig_number: None,
            set_number: None,
            current_value: None,
            price_history: Vec::new(),
            quantity: default_quantity(),
            stale_comparison: None,
            attributes: BTreeMap::new(),
        }
    }
}

impl Minifigure {
    pub fn new(minifig_number: impl Into<String>) -> Self {
        Self {
            minifig_number: Some(minifig_number.into()),
            ..Default::default()
        }
    }

    /// Build a record from a scraped attribute list.
    ///
    /// Identifier keys are lifted out of the attributes. When the page did
    /// not carry one, the requested id becomes the minifig number. The raw
    /// "Current value" text is replaced by the parsed prices.
    pub fn from_scrape(
        requested_id: &str,
        mut attributes: BTreeMap<String, AttributeValue>,
        current_value: Option<CurrentValue>,
    ) -> Self {
        attributes.remove(CURRENT_VALUE_KEY);
        let minifig_number = take_text(&mut attributes, MINIFIG_NUMBER_KEY);
        let set_number = take_text(&mut attributes, SET_NUMBER_KEY);

        let minifig_number = match (&minifig_number, &set_number) {
            (None, None) => Some(requested_id.to_string()),
            _ => minifig_number,
        };

        Self {
            minifig_number,
            set_number,
            current_value,
            attributes,
            ..Default::default()
        }
    }

    /// The record's identifier: minifig number, else set number.
    pub fn id(&self) -> Option<&str> {
        self.minifig_number
            .as_deref()
            .or(self.set_number.as_deref())
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

fn take_text(attributes: &mut BTreeMap<String, AttributeValue>, key: &str) -> Option<String> {
    match attributes.remove(key) {
        Some(AttributeValue::Text(s)) => Some(s),
        Some(AttributeValue::List(items)) => items.into_iter().next(),
        None => None,
    }
}

/// A record as returned by the collection listing, with its used-price
/// comparison attached.
#[derive(Debug, Clone, Serialize)]
pub struct MinifigureView {
    #[serde(flatten)]
    pub minifigure: Minifigure,

    #[serde(rename = "Used price comparison")]
    pub comparison: UsedPriceComparison,
}
