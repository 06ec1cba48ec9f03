// Application layer - Tread-wear pipeline components and use cases
pub mod dashboard_service;
pub mod error;
pub mod export;
pub mod export_service;
pub mod normalizer;
pub mod observation;
pub mod pipeline;
pub mod reference_resolver;
pub mod schema;
pub mod spreadsheet_reader;
pub mod summary;
pub mod vehicle_classifier;
pub mod wear_calculator;
