use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::parser::{parse_current_value, parse_featurebox, Featurebox};
use super::{PriceSource, SourceError};
use crate::models::{
    minifigure::{AttributeValue, Minifigure},
    price::CurrentValue,
};

/// Scraper for the Brickset catalog pages of minifigs and sets.
///
/// Every call goes to the site; nothing is cached and failed requests are
/// not retried.
#[derive(Clone)]
pub struct BricksetScraper {
    client: Client,
    base_url: String,
}

impl BricksetScraper {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn minifig_url(&self, id: &str) -> String {
        format!("{}/minifigs/{}", self.base_url, id)
    }

    fn set_url(&self, id: &str) -> String {
        format!("{}/sets/{}", self.base_url, id)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, SourceError> {
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Request(format!(
                "HTTP error {} for url ({})",
                response.status(),
                url
            )));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PriceSource for BricksetScraper {
    async fn fetch_details(&self, id: &str) -> Result<Minifigure, SourceError> {
        tracing::info!("Scraping Brickset details for {}", id);

        let minifig_html = self.fetch_page(&self.minifig_url(id)).await?;

        // Set numbers only resolve on the set page; a miss there is normal for minifigs
        let set_box = match self.fetch_page(&self.set_url(id)).await {
            Ok(html) => parse_featurebox(&html),
            Err(e) => {
                tracing::debug!("No set page for {}: {}", id, e);
                Featurebox::Absent
            }
        };

        let featurebox = match set_box {
            Featurebox::Absent => parse_featurebox(&minifig_html),
            found => found,
        };

        let details = require_details(featurebox)?;
        let current_value = parse_current_value(&minifig_html);

        tracing::debug!(
            "Scraped {} attributes for {} (prices: {:?})",
            details.len(),
            id,
            current_value
        );

        Ok(Minifigure::from_scrape(id, details, current_value))
    }

    /// Fails on pages that are not a catalog entry (soft 404s, layout
    /// changes) so that reconciliation never reads them as zero prices.
    async fn fetch_prices(&self, id: &str) -> Result<CurrentValue, SourceError> {
        let html = self.fetch_page(&self.minifig_url(id)).await?;

        require_details(parse_featurebox(&html))?;

        parse_current_value(&html)
            .ok_or_else(|| SourceError::Parse("Current value not found".to_string()))
    }
}

fn require_details(
    featurebox: Featurebox,
) -> Result<BTreeMap<String, AttributeValue>, SourceError> {
    match featurebox {
        Featurebox::Details(details) => Ok(details),
        Featurebox::NoDetails => Err(SourceError::Parse("Details list not found".to_string())),
        Featurebox::Absent => Err(SourceError::Parse("Featurebox not found".to_string())),
    }
}
