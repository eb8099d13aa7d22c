// Domain layer - Trend datasets, time series records and map selections
pub mod cases_by_time;
pub mod count;
pub mod feature_query;
pub mod latest;
pub mod selection;
pub mod trend;
