// Selection orchestration - Drives the summary panel and chart from map picks
use crate::application::query_cache::CachedSeries;
use crate::application::time_series_service::TimeSeriesService;
use crate::domain::selection::{SelectionLocation, SelectionTarget};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    #[default]
    Idle,
    QueryStarted,
    QueryResolved,
    QueryFailed,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Bumped on every select and deselect; results from an older generation
    /// are dropped.
    pub generation: u64,
    pub phase: SelectionPhase,
    pub location: Option<SelectionLocation>,
    pub series: Option<CachedSeries>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct SelectionService {
    time_series: TimeSeriesService,
    state: Arc<RwLock<SelectionState>>,
}

impl SelectionService {
    pub fn new(time_series: TimeSeriesService) -> Self {
        Self {
            time_series,
            state: Arc::new(RwLock::new(SelectionState::default())),
        }
    }

    pub async fn current(&self) -> SelectionState {
        self.state.read().await.clone()
    }

    /// Select a feature and query its series. Returns the state as it stands
    /// once this selection's query settled, which may already belong to a
    /// newer selection.
    pub async fn select<T>(&self, target: &T) -> SelectionState
    where
        T: SelectionTarget + Sync + ?Sized,
    {
        let location = SelectionLocation::from_target(target);
        let selector = target.selector();

        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.phase = SelectionPhase::QueryStarted;
            state.location = Some(location);
            state.series = None;
            state.loading = true;
            state.generation
        };

        tracing::debug!("Selection {} started for {}", generation, selector);

        // The query settles on its own task so a dropped caller cannot leave
        // the state stuck in QueryStarted.
        let time_series = self.time_series.clone();
        let shared = self.state.clone();
        let query = tokio::spawn(async move {
            let result = time_series.fetch_trend_series(&selector).await;
            Self::settle(&shared, generation, result).await
        });

        match query.await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Selection {} query task failed: {}", generation, e);
                self.current().await
            }
        }
    }

    async fn settle(
        shared: &RwLock<SelectionState>,
        generation: u64,
        result: Option<CachedSeries>,
    ) -> SelectionState {
        let mut state = shared.write().await;
        if state.generation != generation {
            tracing::debug!(
                "Dropping result of selection {}, current is {}",
                generation,
                state.generation
            );
            return state.clone();
        }

        state.loading = false;
        match result {
            Some(series) => {
                state.phase = SelectionPhase::QueryResolved;
                state.series = Some(series);
            }
            None => {
                state.phase = SelectionPhase::QueryFailed;
                state.series = None;
            }
        }

        state.clone()
    }

    /// Clear the selection. Any query still in flight is ignored when it lands.
    pub async fn deselect(&self) -> SelectionState {
        let mut state = self.state.write().await;
        let generation = state.generation + 1;
        *state = SelectionState {
            generation,
            ..SelectionState::default()
        };
        state.clone()
    }
}
