pub mod chart_data_loader;
pub mod chart_export;
pub mod demo_charts;
