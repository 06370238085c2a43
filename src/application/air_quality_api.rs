// Backend trait for air quality data access
use crate::domain::metric::RawAverages;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend read. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("backend responded with status {0}")]
    Status(u16),

    #[error("no response from backend: {0}")]
    Network(String),

    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// HTTP status returned by the backend, if one arrived at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Multi-sensor time series request for the graph view.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub collection: String,
    pub log_time: String,
    pub sensor_ids: Vec<String>,
    pub attribute: String,
}

#[async_trait]
pub trait AirQualityApi: Send + Sync {
    /// Daily and trailing-week averages for a sensor on a given date
    async fn daily_weekly_averages(
        &self,
        user_id: &str,
        date: NaiveDate,
        sensor_id: &str,
    ) -> Result<RawAverages, ApiError>;

    /// Time series for the graph view
    async fn time_series(&self, query: &GraphQuery) -> Result<Value, ApiError>;

    /// Sensors that can be graphed for a user
    async fn sensor_list(&self, user_id: &str) -> Result<Value, ApiError>;

    /// Landing page summary for a user
    async fn main_summary(&self, user_id: &str) -> Result<Value, ApiError>;

    async fn user_profile(&self, user_id: &str) -> Result<Value, ApiError>;

    async fn user_list(&self) -> Result<Value, ApiError>;
}
