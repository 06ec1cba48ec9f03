// Presentation layer - HTTP surface over the dashboard and export use cases
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod router;
