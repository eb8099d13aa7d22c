// Presentation layer - HTTP surface consumed by the map front end
pub mod app_state;
pub mod error;
pub mod handlers;
