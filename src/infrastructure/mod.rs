// Infrastructure layer - External dependencies and adapters
pub mod calamine_reader;
pub mod config;
pub mod csv_export;
pub mod http_response;
