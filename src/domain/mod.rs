pub mod backend_request;
pub mod bmi;
pub mod chart_data;
pub mod error;
pub mod health_report;

// Chart export module
pub mod export;
