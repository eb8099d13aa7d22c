// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod feature_service_repository;
pub mod static_trend_repository;
