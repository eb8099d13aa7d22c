// Time-series query client - Cached cases/deaths series per selected region
use crate::application::query_cache::{CachedSeries, QueryCache};
use crate::application::time_series_repository::CasesByTimeRepository;
use crate::domain::cases_by_time::derive_new_deaths;
use crate::domain::feature_query::FeatureQuery;
use crate::domain::selection::Selector;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeSeriesError {
    #[error("time series query for {selector} failed")]
    Query {
        selector: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Clone)]
pub struct TimeSeriesService {
    repository: Arc<dyn CasesByTimeRepository>,
    cache: Arc<QueryCache>,
}

impl TimeSeriesService {
    pub fn new(repository: Arc<dyn CasesByTimeRepository>, cache: Arc<QueryCache>) -> Self {
        Self { repository, cache }
    }

    /// Cached or freshly queried series for the selector. Failures are logged
    /// and reported as `None`, the same as "no data".
    pub async fn fetch_trend_series(&self, selector: &Selector) -> Option<CachedSeries> {
        match self.try_fetch_trend_series(selector).await {
            Ok(series) => Some(series),
            Err(e) => {
                tracing::error!("{:#}", anyhow::Error::new(e));
                None
            }
        }
    }

    pub async fn try_fetch_trend_series(
        &self,
        selector: &Selector,
    ) -> Result<CachedSeries, TimeSeriesError> {
        if let Some(cached) = self.cache.get(selector).await {
            tracing::debug!("Cache hit for {} ({} records)", selector, cached.len());
            return Ok(cached);
        }

        let query = FeatureQuery::for_selector(selector);
        let mut features = self
            .repository
            .query_cases_by_time(&query)
            .await
            .map_err(|source| TimeSeriesError::Query {
                selector: selector.to_string(),
                source,
            })?;

        derive_new_deaths(&mut features);
        let series = self.cache.insert(selector, features).await;
        tracing::debug!(
            "Fetched {} records for {} ({} cached series)",
            series.len(),
            selector,
            self.cache.len().await
        );

        Ok(series)
    }
}
