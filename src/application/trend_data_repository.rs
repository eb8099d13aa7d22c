// Repository trait for the hosted trend datasets
use crate::domain::latest::LatestNumbers;
use crate::domain::trend::{CountyTrendData, StateTrendData};
use async_trait::async_trait;

#[async_trait]
pub trait TrendDataRepository: Send + Sync {
    async fn fetch_county_trends(&self) -> anyhow::Result<Vec<CountyTrendData>>;

    async fn fetch_state_trends(&self) -> anyhow::Result<Vec<StateTrendData>>;

    async fn fetch_latest_numbers(&self) -> anyhow::Result<LatestNumbers>;
}
