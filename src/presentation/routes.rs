// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    graph, health_check, main_summary, select_date, sensor_list, sensor_report, session_view,
    user_list, user_profile,
};
use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/sessions/:user_id/:sensor_id", get(session_view))
        .route("/sessions/:user_id/:sensor_id/date", put(select_date))
        .route("/reports/:user_id/:sensor_id", get(sensor_report))
        .route("/users", get(user_list))
        .route("/users/:user_id/sensors", get(sensor_list))
        .route("/users/:user_id/main", get(main_summary))
        .route("/users/:user_id/profile", get(user_profile))
        .route("/graph/:collection/:attribute", get(graph))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::air_quality_api::ApiError;
    use crate::application::entry_session::SessionRegistry;
    use crate::application::report_service::ReportService;
    use crate::application::report_service::tests::{StubApi, sample_averages};
    use crate::domain::scoring::StandardScorer;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(api: StubApi) -> Router {
        let api: Arc<StubApi> = Arc::new(api);
        let report_service = ReportService::new(api.clone(), Arc::new(StandardScorer));
        let sessions = Arc::new(SessionRegistry::new(
            report_service.clone(),
            Duration::from_secs(5),
            64,
        ));
        build_router(Arc::new(AppState {
            api,
            report_service,
            sessions,
        }))
    }

    fn october_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 7).unwrap()
    }

    async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = app(StubApi::default());
        let (status, _) = send(&router, Method::GET, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_report_ready() {
        let router = app(StubApi::with(october_day(), sample_averages()));
        let (status, body) = send(&router, Method::GET, "/reports/u-1/s-1?date=2024-10-07").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "ready");
        assert_eq!(body["entries"].as_array().unwrap().len(), 6);
        assert_eq!(body["summaries"][0]["display"]["value"], 95.0);
        assert_eq!(body["summaries"][0]["display"]["status"], "good");
    }

    #[tokio::test]
    async fn test_report_error_is_bad_gateway() {
        let router = app(StubApi::failing(ApiError::Status(500)));
        let (status, body) = send(&router, Method::GET, "/reports/u-1/s-1?date=2024-10-07").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["state"], "error");
        assert_eq!(body["entries"], json!([]));
    }

    #[tokio::test]
    async fn test_malformed_date_is_rejected() {
        let router = app(StubApi::default());
        let (status, _) = send(&router, Method::GET, "/reports/u-1/s-1?date=07-10-2024").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, Method::PUT, "/sessions/u-1/s-1/date?date=tomorrow").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_session_flow() {
        let router = app(StubApi::with(october_day(), sample_averages()));

        let (status, _) = send(&router, Method::GET, "/sessions/u-1/s-1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = "/sessions/u-1/s-1/date?date=2024-10-07";
        let (status, _) = send(&router, Method::PUT, uri).await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let mut body = Value::Null;
        for _ in 0..50 {
            let (status, view) = send(&router, Method::GET, "/sessions/u-1/s-1").await;
            assert_eq!(status, StatusCode::OK);
            body = view;
            if body["state"] != "loading" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(body["state"], "ready");
        assert_eq!(body["date"], "2024-10-07");
        assert_eq!(body["summaries"][1]["title"], "Weekly Sensor Score");
    }

    #[tokio::test]
    async fn test_proxies() {
        let router = app(StubApi::default());

        let (status, body) = send(&router, Method::GET, "/users/u-1/sensors").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "id": "s-1", "owner": "u-1" }]));

        let (_, body) = send(&router, Method::GET, "/users/u-1/main").await;
        assert_eq!(body, json!({ "userId": "u-1" }));

        let (_, body) = send(&router, Method::GET, "/users/u-1/profile").await;
        assert_eq!(body, json!({ "id": "u-1" }));

        let (_, body) = send(&router, Method::GET, "/users").await;
        assert_eq!(body, json!([]));

        let (status, body) = send(
            &router,
            Method::GET,
            "/graph/hourly/pm25?logTime=2024-10-07&sensors=s-1,s-2",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "sensors": ["s-1", "s-2"], "airData": "pm25" }));
    }

    #[tokio::test]
    async fn test_graph_requires_sensors() {
        let router = app(StubApi::default());
        let uri = "/graph/hourly/pm25?logTime=2024-10-07&sensors=";
        let (status, _) = send(&router, Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_proxy_status_mapping() {
        let router = app(StubApi::failing(ApiError::Status(401)));
        let (status, _) = send(&router, Method::GET, "/users").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let router = app(StubApi::failing(ApiError::MalformedResponse("eof".to_string())));
        let (status, _) = send(&router, Method::GET, "/users/u-1/main").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
