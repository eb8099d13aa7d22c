// In-memory repositories for service tests
use crate::application::time_series_repository::CasesByTimeRepository;
use crate::application::trend_data_repository::TrendDataRepository;
use crate::domain::cases_by_time::CasesByTimeFeature;
use crate::domain::feature_query::FeatureQuery;
use crate::domain::latest::LatestNumbers;
use crate::domain::trend::{CountyTrendData, StateTrendData};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Answers by `where` clause; unknown clauses fail like a dropped connection.
#[derive(Default)]
pub struct FakeCasesRepository {
    calls: AtomicUsize,
    series: HashMap<String, Vec<CasesByTimeFeature>>,
    gates: HashMap<String, Arc<Notify>>,
}

impl FakeCasesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, where_clause: &str, series: Vec<CasesByTimeFeature>) -> Self {
        self.series.insert(where_clause.to_string(), series);
        self
    }

    /// Hold responses for `where_clause` until the gate is notified.
    pub fn with_gate(mut self, where_clause: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(where_clause.to_string(), gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CasesByTimeRepository for FakeCasesRepository {
    async fn query_cases_by_time(
        &self,
        query: &FeatureQuery,
    ) -> anyhow::Result<Vec<CasesByTimeFeature>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let where_clause = query.param("where").unwrap_or_default();

        if let Some(gate) = self.gates.get(where_clause) {
            gate.notified().await;
        }

        self.series
            .get(where_clause)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))
    }
}

#[derive(Default)]
pub struct FakeTrendRepository {
    pub counties: Option<Vec<CountyTrendData>>,
    pub states: Option<Vec<StateTrendData>>,
    pub latest: Option<LatestNumbers>,
    pub calls: AtomicUsize,
}

impl FakeTrendRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrendDataRepository for FakeTrendRepository {
    async fn fetch_county_trends(&self) -> anyhow::Result<Vec<CountyTrendData>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.counties
            .clone()
            .ok_or_else(|| anyhow::anyhow!("counties dataset unavailable"))
    }

    async fn fetch_state_trends(&self) -> anyhow::Result<Vec<StateTrendData>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.states
            .clone()
            .ok_or_else(|| anyhow::anyhow!("states dataset unavailable"))
    }

    async fn fetch_latest_numbers(&self) -> anyhow::Result<LatestNumbers> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.latest
            .clone()
            .ok_or_else(|| anyhow::anyhow!("latest numbers unavailable"))
    }
}

pub fn county_series(deaths: &[i64]) -> Vec<CasesByTimeFeature> {
    deaths
        .iter()
        .enumerate()
        .map(|(day, deaths)| {
            CasesByTimeFeature::new(day as i64 * 86_400_000, 100 + day as i64, *deaths, 5, 1000)
        })
        .collect()
}
