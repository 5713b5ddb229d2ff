pub mod use_cases;

pub use use_cases::chart_data_loader::ChartDataLoader;
pub use use_cases::chart_export::{ChartExportUseCase, ExportOutcome, PreparedExport};
pub use use_cases::demo_charts::DemoChartGenerator;
