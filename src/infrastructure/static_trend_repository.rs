// Hosted JSON datasets for the trend layers
use crate::application::trend_data_repository::TrendDataRepository;
use crate::domain::latest::LatestNumbers;
use crate::domain::trend::{CountyTrendData, StateTrendData};
use crate::infrastructure::config::DataSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct StaticTrendRepository {
    client: reqwest::Client,
    settings: DataSettings,
}

impl StaticTrendRepository {
    pub fn new(settings: DataSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Fetching {} failed with status {}", url, response.status());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {}", url))
    }
}

#[async_trait]
impl TrendDataRepository for StaticTrendRepository {
    async fn fetch_county_trends(&self) -> Result<Vec<CountyTrendData>> {
        self.fetch_json(&self.settings.us_counties_url).await
    }

    async fn fetch_state_trends(&self) -> Result<Vec<StateTrendData>> {
        self.fetch_json(&self.settings.us_states_url).await
    }

    async fn fetch_latest_numbers(&self) -> Result<LatestNumbers> {
        self.fetch_json(&self.settings.latest_numbers_url).await
    }
}
