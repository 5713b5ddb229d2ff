pub mod http;

use crate::domain::chart_data::ChartData;
use crate::domain::error::Result;
use crate::domain::health_report::{HealthReport, ProfileUpdate};
use async_trait::async_trait;

pub use http::HealthMateClient;

/// Anything that can resolve the `chart_data` payload for an employee.
#[async_trait]
pub trait ChartDataSource: Send + Sync {
    async fn chart_data(&self, employee_id: &str) -> Result<ChartData>;
}

/// Remaining HealthMate requests used by the dashboard.
#[async_trait]
pub trait HealthMateApi: Send + Sync {
    async fn health_report(&self, employee_id: &str) -> Result<HealthReport>;

    /// Ask the symptom helper; `None` when the backend sent no reply.
    async fn send_symptom(&self, employee_id: &str, message: &str) -> Result<Option<String>>;

    async fn update_profile(&self, employee_id: &str, update: ProfileUpdate) -> Result<()>;

    async fn save_bmi(
        &self,
        employee_id: &str,
        bmi: Option<f64>,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<()>;
}
