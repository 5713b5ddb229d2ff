use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::demo_charts::DemoChartGenerator;
use crate::domain::chart_data::ChartData;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::healthmate_client::ChartDataSource;

/// Resolves chart data for the dashboard, falling back to demo series.
pub struct ChartDataLoader {
    source: Arc<dyn ChartDataSource>,
    demo_fallback: bool,
}

impl ChartDataLoader {
    pub fn new(source: Arc<dyn ChartDataSource>, demo_fallback: bool) -> Self {
        Self {
            source,
            demo_fallback,
        }
    }

    pub async fn load(&self, employee_id: &str) -> Result<ChartData> {
        match self.source.chart_data(employee_id).await {
            Ok(data) if data.has_trend_series() => Ok(data),
            Ok(_) if self.demo_fallback => {
                info!(employee_id, "No trend series from backend, using demo data");
                Ok(demo_chart_data())
            }
            Ok(_) => Err(AppError::NothingToExport(
                "Backend returned no trend series".to_string(),
            )),
            Err(e) if self.demo_fallback => {
                warn!(employee_id, "Chart data fetch failed, using demo data: {}", e);
                Ok(demo_chart_data())
            }
            Err(e) => Err(e),
        }
    }
}

// Thread-local RNG must not live across an await point.
fn demo_chart_data() -> ChartData {
    DemoChartGenerator::new(rand::rng()).generate(Utc::now().date_naive())
}
