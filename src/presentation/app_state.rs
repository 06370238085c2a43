// Application state for HTTP handlers
use crate::application::air_quality_api::AirQualityApi;
use crate::application::entry_session::SessionRegistry;
use crate::application::report_service::ReportService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn AirQualityApi>,
    pub report_service: ReportService,
    pub sessions: Arc<SessionRegistry>,
}
