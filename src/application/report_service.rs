// Report service - Use case for scoring a sensor page
use crate::application::air_quality_api::{AirQualityApi, ApiError};
use crate::domain::report::{SensorQuery, SensorReport};
use crate::domain::scoring::MetricScorer;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportService {
    api: Arc<dyn AirQualityApi>,
    scorer: Arc<dyn MetricScorer>,
}

impl ReportService {
    pub fn new(api: Arc<dyn AirQualityApi>, scorer: Arc<dyn MetricScorer>) -> Self {
        Self { api, scorer }
    }

    pub async fn load_report(&self, query: &SensorQuery) -> Result<SensorReport, ApiError> {
        let averages = self
            .api
            .daily_weekly_averages(&query.user_id, query.date, &query.sensor_id)
            .await?;

        let report = SensorReport::build(&averages, query.date, self.scorer.as_ref());
        tracing::debug!(
            "Scored {} metrics for sensor {} on {}",
            report.entries.len(),
            query.sensor_id,
            query.date
        );
        Ok(report)
    }
}
