// Domain layer - Sensor readings, scoring and reports
pub mod metric;
pub mod report;
pub mod scoring;
