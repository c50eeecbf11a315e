use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::RETRY_AFTER;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::catalog::ProductSnapshot;
use crate::config::Settings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RATE_LIMIT_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

const ACCESS_TOKEN_HEADER: &str = "X-Store-Access-Token";

#[derive(Deserialize)]
struct ProductEnvelope {
    product: ProductSnapshot,
}

#[derive(Serialize)]
struct DescriptionUpdate<'a> {
    product: DescriptionFields<'a>,
}

#[derive(Serialize)]
struct DescriptionFields<'a> {
    id: i64,
    body_html: &'a str,
}

/// REST client for the catalog store's product API.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CatalogClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.store_base_url.trim_end_matches('/').to_string(),
            token: settings.store_token.clone(),
        })
    }

    /// Fetch the current snapshot of a product.
    ///
    /// Returns `Ok(None)` when the store has no product with this id.
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, product_id: i64) -> Result<Option<ProductSnapshot>> {
        let url = self.product_url(product_id);
        let response = self
            .send_with_retry(|| {
                self.http
                    .get(&url)
                    .header(ACCESS_TOKEN_HEADER, self.token.as_str())
            })
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Product {} not found in store", product_id);
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .with_context(|| format!("Store rejected fetch of product {}", product_id))?;

        let envelope: ProductEnvelope = response
            .json()
            .await
            .context("Failed to parse product payload")?;

        Ok(Some(envelope.product))
    }

    /// Replace a product's stored description HTML.
    #[instrument(skip(self, body_html))]
    pub async fn update_description(&self, product_id: i64, body_html: &str) -> Result<()> {
        let url = self.product_url(product_id);
        let payload = DescriptionUpdate {
            product: DescriptionFields {
                id: product_id,
                body_html,
            },
        };

        let response = self
            .send_with_retry(|| {
                self.http
                    .put(&url)
                    .header(ACCESS_TOKEN_HEADER, self.token.as_str())
                    .json(&payload)
            })
            .await?;

        response
            .error_for_status()
            .with_context(|| format!("Store rejected description update for product {}", product_id))?;

        debug!("Persisted description for product {}", product_id);
        Ok(())
    }

    fn product_url(&self, product_id: i64) -> String {
        format!("{}/products/{}.json", self.base_url, product_id)
    }

    /// Send a request, retrying a bounded number of times when the store's
    /// rate limit answers 429.
    async fn send_with_retry<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let response = build().send().await.context("Store request failed")?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS || attempt >= MAX_RATE_LIMIT_RETRIES
            {
                return Ok(response);
            }

            let delay = retry_delay(&response);
            attempt += 1;
            warn!(
                "Store rate limit hit, retrying in {:?} (attempt {}/{})",
                delay, attempt, MAX_RATE_LIMIT_RETRIES
            );
            tokio::time::sleep(delay).await;
        }
    }
}

fn retry_delay(response: &Response) -> Duration {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .map(Duration::from_secs_f64)
        .unwrap_or(DEFAULT_RETRY_DELAY)
}
