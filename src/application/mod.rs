// Application layer - Use cases over the trend and time-series sources
pub mod query_cache;
pub mod selection_service;
#[cfg(test)]
pub mod testing;
pub mod time_series_repository;
pub mod time_series_service;
pub mod trend_data_repository;
pub mod trend_data_service;
