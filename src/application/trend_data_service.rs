// Trend data fetcher - Loads the hosted datasets that back the map layers
use crate::application::trend_data_repository::TrendDataRepository;
use crate::domain::latest::{LatestNumbers, LatestSnapshot};
use crate::domain::trend::{project_layer, CountyTrendData, LayerFeature, StateTrendData, TrendData};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything one load produced. Replaced as a whole, never patched.
#[derive(Debug, Clone)]
pub struct TrendSnapshot {
    pub counties: Arc<Vec<CountyTrendData>>,
    pub states: Arc<Vec<StateTrendData>>,
    pub latest: Arc<LatestNumbers>,
}

#[derive(Clone)]
pub struct TrendDataService {
    repository: Arc<dyn TrendDataRepository>,
    snapshot: Arc<RwLock<Option<TrendSnapshot>>>,
}

impl TrendDataService {
    pub fn new(repository: Arc<dyn TrendDataRepository>) -> Self {
        Self {
            repository,
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// Load all three datasets. Errors are logged and the previous snapshot,
    /// if any, stays in place.
    pub async fn load(&self) {
        if let Err(e) = self.try_load().await {
            tracing::error!("Failed to load trend data: {:#}", e);
        }
    }

    /// The three reads form one batch: the first failure drops the others and
    /// nothing is published.
    pub async fn try_load(&self) -> anyhow::Result<()> {
        let (counties, states, latest) = futures::try_join!(
            self.repository.fetch_county_trends(),
            self.repository.fetch_state_trends(),
            self.repository.fetch_latest_numbers(),
        )?;

        tracing::info!(
            "Loaded trend data: {} counties, {} states, {} latest entries",
            counties.len(),
            states.len(),
            latest.len()
        );

        *self.snapshot.write().await = Some(TrendSnapshot {
            counties: Arc::new(counties),
            states: Arc::new(states),
            latest: Arc::new(latest),
        });

        Ok(())
    }

    pub async fn county_layer(&self, trend: TrendData) -> Option<Vec<LayerFeature>> {
        let snapshot = self.snapshot.read().await;
        snapshot.as_ref().map(|s| project_layer(s.counties.as_slice(), trend))
    }

    pub async fn state_layer(&self, trend: TrendData) -> Option<Vec<LayerFeature>> {
        let snapshot = self.snapshot.read().await;
        snapshot.as_ref().map(|s| project_layer(s.states.as_slice(), trend))
    }

    /// Hover data for a region
    pub async fn tooltip(&self, fips: &str) -> Option<LatestSnapshot> {
        let snapshot = self.snapshot.read().await;
        snapshot.as_ref()?.latest.get(fips).cloned()
    }
}
