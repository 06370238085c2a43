// Application layer - Use cases over the air quality backend
pub mod air_quality_api;
pub mod entry_session;
pub mod report_service;
