pub mod brickset;
pub mod parser;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{minifigure::Minifigure, price::CurrentValue};

pub use brickset::BricksetScraper;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    /// Network failure or non-success status from the catalog
    #[error("Request failed: {0}")]
    Request(String),
    /// Page fetched but its layout was not recognised
    #[error("{0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Request(e.to_string())
    }
}

/// Read-only access to the external catalog.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Scrape the full attribute list and prices for a new record.
    async fn fetch_details(&self, id: &str) -> Result<Minifigure, SourceError>;

    /// Scrape only the current listing prices.
    async fn fetch_prices(&self, id: &str) -> Result<CurrentValue, SourceError>;
}
