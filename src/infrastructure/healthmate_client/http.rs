use super::{ChartDataSource, HealthMateApi};
use crate::domain::backend_request::{symptom_message, BackendCommand, BackendRequest};
use crate::domain::chart_data::ChartData;
use crate::domain::error::{AppError, Result};
use crate::domain::health_report::{HealthReport, ProfileUpdate};
use crate::infrastructure::config::AppConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SymptomReply {
    #[serde(default)]
    reply: Option<String>,
}

/// Client for the single multiplexed HealthMate endpoint.
pub struct HealthMateClient {
    client: reqwest::Client,
    api_base: String,
}

impl HealthMateClient {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::BackendError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_base.clone(), config.api_timeout())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn post<T: DeserializeOwned>(&self, request: &BackendRequest) -> Result<T> {
        debug!(kind = request.kind(), employee_id = %request.employee_id, "HealthMate request");

        let response = self
            .client
            .post(&self.api_base)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::BackendError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::BackendError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::BackendError(format!("Failed to parse JSON: {}", e)))
    }
}

#[async_trait]
impl HealthMateApi for HealthMateClient {
    async fn health_report(&self, employee_id: &str) -> Result<HealthReport> {
        self.post(&BackendRequest::new(employee_id, BackendCommand::HealthReport))
            .await
    }

    async fn send_symptom(&self, employee_id: &str, message: &str) -> Result<Option<String>> {
        let message = symptom_message(message)?;
        let reply: SymptomReply = self
            .post(&BackendRequest::new(
                employee_id,
                BackendCommand::Symptom {
                    message: message.to_string(),
                },
            ))
            .await?;
        Ok(reply.reply)
    }

    async fn update_profile(&self, employee_id: &str, update: ProfileUpdate) -> Result<()> {
        let _: serde_json::Value = self
            .post(&BackendRequest::new(
                employee_id,
                BackendCommand::UpdateProfile(update),
            ))
            .await?;
        Ok(())
    }

    async fn save_bmi(
        &self,
        employee_id: &str,
        bmi: Option<f64>,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .post(&BackendRequest::new(
                employee_id,
                BackendCommand::SaveBmi {
                    bmi,
                    weight: weight_kg,
                    height: height_cm,
                },
            ))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChartDataSource for HealthMateClient {
    async fn chart_data(&self, employee_id: &str) -> Result<ChartData> {
        self.post(&BackendRequest::new(employee_id, BackendCommand::ChartData))
            .await
    }
}
