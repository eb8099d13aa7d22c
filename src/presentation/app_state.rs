// Application state for HTTP handlers
use crate::application::selection_service::SelectionService;
use crate::application::time_series_service::TimeSeriesService;
use crate::application::trend_data_service::TrendDataService;

#[derive(Clone)]
pub struct AppState {
    pub trend_data_service: TrendDataService,
    pub time_series_service: TimeSeriesService,
    pub selection_service: SelectionService,
}
