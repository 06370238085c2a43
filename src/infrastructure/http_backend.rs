// HTTP backend implementation
use crate::application::air_quality_api::{AirQualityApi, ApiError, GraphQuery};
use crate::domain::metric::RawAverages;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const AUTH_HEADER: &str = "X-AUTH-TOKEN";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    auth_token: String,
}

impl HttpBackend {
    pub fn new(base_url: String, auth_token: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTH_HEADER, &self.auth_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Backend request {} failed with status {}", url, status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl AirQualityApi for HttpBackend {
    async fn daily_weekly_averages(
        &self,
        user_id: &str,
        date: NaiveDate,
        sensor_id: &str,
    ) -> Result<RawAverages, ApiError> {
        let date = date.format(DATE_FORMAT).to_string();
        let url = self.build_url(
            "/details",
            &[("userId", user_id), ("date", &date), ("id", sensor_id)],
        );
        self.get_json(&url).await
    }

    async fn time_series(&self, query: &GraphQuery) -> Result<Value, ApiError> {
        let mut params = vec![
            ("collection", query.collection.as_str()),
            ("logTime", query.log_time.as_str()),
        ];
        params.extend(query.sensor_ids.iter().map(|id| ("sensors", id.as_str())));
        params.push(("airData", query.attribute.as_str()));

        let url = self.build_url("/graph", &params);
        self.get_json(&url).await
    }

    async fn sensor_list(&self, user_id: &str) -> Result<Value, ApiError> {
        let url = self.build_url("/graph/sensors", &[("userId", user_id)]);
        self.get_json(&url).await
    }

    async fn main_summary(&self, user_id: &str) -> Result<Value, ApiError> {
        let url = self.build_url("/main", &[("userId", user_id)]);
        self.get_json(&url).await
    }

    async fn user_profile(&self, user_id: &str) -> Result<Value, ApiError> {
        let url = self.build_url("/user/profile", &[("id", user_id)]);
        self.get_json(&url).await
    }

    async fn user_list(&self) -> Result<Value, ApiError> {
        let url = self.build_url("/admin/userList", &[]);
        self.get_json(&url).await
    }
}
