use std::sync::Arc;

use tracing::info;

use crate::application::{ChartDataLoader, ChartExportUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::download::FileDownload;
use crate::infrastructure::healthmate_client::HealthMateClient;
use crate::interfaces::http::HttpState;

/// Wire adapters and use cases from the resolved configuration.
pub fn build_state(config: &AppConfig) -> Result<HttpState> {
    let client = Arc::new(HealthMateClient::from_config(config)?);
    info!(
        api_base = client.api_base(),
        employee_id = %config.employee_id,
        demo_fallback = config.demo_fallback,
        "HealthMate client configured"
    );

    let downloads = FileDownload::new(config.export_dir.clone());
    info!(export_dir = %downloads.dir().display(), "Exports will be saved here");

    Ok(HttpState {
        export_use_case: ChartExportUseCase::new(config.export_layout()),
        downloads,
        chart_loader: ChartDataLoader::new(client.clone(), config.demo_fallback),
        api: client,
        employee_id: config.employee_id.clone(),
    })
}
