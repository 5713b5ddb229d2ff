use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};
use super::health_report::ProfileUpdate;

/// Trimmed symptom text; an empty message is not sent.
pub fn symptom_message(message: &str) -> Result<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::ValidationError(
            "Symptom message must not be empty".to_string(),
        ));
    }
    Ok(message)
}

/// Body of a POST to the HealthMate endpoint.
///
/// The endpoint multiplexes on `type`; the command's own fields sit next to
/// `employee_id` at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendRequest {
    pub employee_id: String,
    #[serde(flatten)]
    pub command: BackendCommand,
}

impl BackendRequest {
    pub fn new(employee_id: impl Into<String>, command: BackendCommand) -> Self {
        Self {
            employee_id: employee_id.into(),
            command,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.command.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendCommand {
    HealthReport,
    ChartData,
    Symptom {
        message: String,
    },
    UpdateProfile(ProfileUpdate),
    SaveBmi {
        bmi: Option<f64>,
        weight: f64,
        height: f64,
    },
}

impl BackendCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendCommand::HealthReport => "health_report",
            BackendCommand::ChartData => "chart_data",
            BackendCommand::Symptom { .. } => "symptom",
            BackendCommand::UpdateProfile(_) => "update_profile",
            BackendCommand::SaveBmi { .. } => "save_bmi",
        }
    }
}
