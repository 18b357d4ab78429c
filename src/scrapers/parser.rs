use std::collections::BTreeMap;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::models::{minifigure::AttributeValue, price::CurrentValue};

lazy_static! {
    static ref NEW_PRICE_REGEX: Regex = Regex::new(r"New: ~€([\d,]+\.\d+)").unwrap();
    static ref USED_PRICE_REGEX: Regex = Regex::new(r"Used: ~€([\d,]+\.\d+)").unwrap();
    static ref FEATUREBOX_SELECTOR: Selector = Selector::parse("section.featurebox").unwrap();
    static ref DL_SELECTOR: Selector = Selector::parse("dl").unwrap();
    static ref DT_SELECTOR: Selector = Selector::parse("dt").unwrap();
    static ref DD_SELECTOR: Selector = Selector::parse("dd").unwrap();
    static ref DT_DD_SELECTOR: Selector = Selector::parse("dt, dd").unwrap();
    static ref LINK_SELECTOR: Selector = Selector::parse("a").unwrap();
}

const CURRENT_VALUE_LABEL: &str = "Current value";

/// What a page's feature box yielded
#[derive(Debug, Clone, PartialEq)]
pub enum Featurebox {
    /// No `section.featurebox` on the page
    Absent,
    /// Feature box without a definition list
    NoDetails,
    Details(BTreeMap<String, AttributeValue>),
}

/// Extract the definition list of the page's feature box.
///
/// Each `dt` becomes a key. Its `dd` becomes the link text when it holds
/// one link, the list of link texts when it holds several, otherwise its
/// own text.
pub fn parse_featurebox(html: &str) -> Featurebox {
    let document = Html::parse_document(html);

    let Some(featurebox) = document.select(&FEATUREBOX_SELECTOR).next() else {
        return Featurebox::Absent;
    };
    let Some(dl) = featurebox.select(&DL_SELECTOR).next() else {
        return Featurebox::NoDetails;
    };

    let mut details = BTreeMap::new();
    for (dt, dd) in dl.select(&DT_SELECTOR).zip(dl.select(&DD_SELECTOR)) {
        let key = stripped_text(&dt);

        let links: Vec<String> = dd.select(&LINK_SELECTOR).map(|a| stripped_text(&a)).collect();
        let value = match links.len() {
            0 => AttributeValue::Text(stripped_text(&dd)),
            1 => AttributeValue::Text(links.into_iter().next().unwrap_or_default()),
            _ => AttributeValue::List(links),
        };

        details.insert(key, value);
    }

    Featurebox::Details(details)
}

/// Extract the "Current value" prices of a catalog page.
///
/// Returns `None` when the page has no "Current value" entry at all.
/// Prices the entry does not mention stay `None`.
pub fn parse_current_value(html: &str) -> Option<CurrentValue> {
    let document = Html::parse_document(html);

    let mut entries = document.select(&DT_DD_SELECTOR);
    entries.find(|el| el.value().name() == "dt" && stripped_text(el) == CURRENT_VALUE_LABEL)?;

    let text = match entries.find(|el| el.value().name() == "dd") {
        Some(dd) => dd.text().collect::<String>(),
        None => return Some(CurrentValue::default()),
    };

    Some(parse_price_text(&text))
}

/// Read the "New: ~€x" and "Used: ~€y" estimates out of a text block.
pub fn parse_price_text(text: &str) -> CurrentValue {
    CurrentValue {
        new_price: capture_price(&NEW_PRICE_REGEX, text),
        used_price: capture_price(&USED_PRICE_REGEX, text),
    }
}

fn capture_price(regex: &Regex, text: &str) -> Option<Decimal> {
    let raw = regex.captures(text)?.get(1)?.as_str().replace(',', "");
    match Decimal::from_str(&raw) {
        Ok(price) => Some(price),
        Err(e) => {
            tracing::debug!("Unparseable price '{}': {}", raw, e);
            None
        }
    }
}

/// Text of an element with each text node trimmed and empty nodes dropped
fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
