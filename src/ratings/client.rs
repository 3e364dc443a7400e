use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::{parse_ratings, RatingsError, RatingsSnapshot};

/// Trait every ratings source must implement.
///
/// There is exactly one real source (masseyratings.com), but the seam lets
/// the cache and dashboard be tested without the network.
#[async_trait]
pub trait RatingsSource: Send + Sync {
    /// Fetch and parse the full ratings table.
    async fn fetch_ratings(&self) -> Result<RatingsSnapshot, RatingsError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Client for the Massey Ratings site.
#[derive(Clone)]
pub struct MasseyClient {
    http: Client,
    url: String,
}

impl MasseyClient {
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self, RatingsError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| RatingsError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(MasseyClient {
            http,
            url: url.to_string(),
        })
    }

    /// One GET against the ratings page. No retries: a failure is surfaced
    /// to the caller as-is.
    async fn fetch_document(&self) -> Result<String, RatingsError> {
        debug!("Fetching ratings page: {}", self.url);

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RatingsError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RatingsError::Fetch(format!(
                "HTTP {} from {}",
                resp.status(),
                self.url
            )));
        }

        resp.text()
            .await
            .map_err(|e| RatingsError::Fetch(e.to_string()))
    }
}

#[async_trait]
impl RatingsSource for MasseyClient {
    async fn fetch_ratings(&self) -> Result<RatingsSnapshot, RatingsError> {
        let html = self.fetch_document().await?;
        let teams = parse_ratings(&html)?;
        info!("Parsed {} team ratings from {}", teams.len(), self.url);
        Ok(RatingsSnapshot::new(teams))
    }

    fn name(&self) -> &str {
        "masseyratings.com"
    }
}
