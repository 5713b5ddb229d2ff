// ============================================================
// CHART EXPORT USE CASE
// ============================================================
// Build the document, encode it, hand it to a download sink

use chrono::NaiveDate;
use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::export::{
    build_document, export_filename, AvailableSeries, EmptyDocument, ExportDocument, ExportLayout,
};
use crate::infrastructure::csv::CsvEncoder;
use crate::infrastructure::download::{DownloadSink, ExportReceipt};

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// Encoded export, ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedExport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub block_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Delivered(ExportReceipt),
    /// Nothing was exported and the sink was not called
    NothingToExport,
}

/// Chart export use case
pub struct ChartExportUseCase {
    layout: ExportLayout,
    encoder: CsvEncoder,
}

impl ChartExportUseCase {
    pub fn new(layout: ExportLayout) -> Self {
        Self {
            layout,
            encoder: CsvEncoder::new(),
        }
    }

    pub fn layout(&self) -> &ExportLayout {
        &self.layout
    }

    pub fn build_document(
        &self,
        available: &AvailableSeries,
    ) -> std::result::Result<ExportDocument, EmptyDocument> {
        build_document(available, &self.layout)
    }

    /// UTF-8 CSV bytes of the whole document
    pub fn serialize(&self, document: &ExportDocument) -> Result<Vec<u8>> {
        let text = self.encoder.encode(&document.to_rows())?;
        Ok(text.into_bytes())
    }

    /// Build and encode. An empty document is `AppError::NothingToExport`.
    pub fn prepare(&self, available: &AvailableSeries, date: NaiveDate) -> Result<PreparedExport> {
        let document = self.build_document(available).map_err(|e| {
            info!("Chart export skipped: {}", e);
            AppError::from(e)
        })?;
        let bytes = self.serialize(&document)?;
        let filename = export_filename(date);

        info!(
            blocks = document.len(),
            bytes = bytes.len(),
            filename = %filename,
            "Chart export prepared"
        );

        Ok(PreparedExport {
            filename,
            bytes,
            block_count: document.len(),
        })
    }

    /// Full pipeline. The sink is only called when there is something to save.
    pub fn export(
        &self,
        available: &AvailableSeries,
        date: NaiveDate,
        sink: &dyn DownloadSink,
    ) -> Result<ExportOutcome> {
        match self.prepare(available, date) {
            Ok(prepared) => {
                let receipt = sink.deliver(&prepared.bytes, &prepared.filename)?;
                Ok(ExportOutcome::Delivered(receipt))
            }
            Err(AppError::NothingToExport(_)) => Ok(ExportOutcome::NothingToExport),
            Err(e) => Err(e),
        }
    }
}

impl Default for ChartExportUseCase {
    fn default() -> Self {
        Self::new(ExportLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart_data::ChartData;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&self, bytes: &[u8], filename: &str) -> Result<ExportReceipt> {
            self.calls
                .borrow_mut()
                .push((filename.to_string(), bytes.to_vec()));
            Ok(ExportReceipt {
                filename: filename.to_string(),
                path: format!("memory://{}", filename),
                bytes: bytes.len(),
            })
        }
    }

    fn available(value: serde_json::Value) -> AvailableSeries {
        serde_json::from_value::<ChartData>(value)
            .unwrap()
            .into_available_series()
    }

    fn march_fifth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_health_trend_golden_output() {
        let use_case = ChartExportUseCase::default();
        let prepared = use_case
            .prepare(
                &available(json!({
                    "healthTrend": [{"date": "1/1", "score": 80}, {"date": "1/8", "score": 85}]
                })),
                march_fifth(),
            )
            .unwrap();

        assert_eq!(prepared.filename, "healthmate_charts_2024-03-05.csv");
        assert_eq!(prepared.block_count, 1);
        assert_eq!(
            String::from_utf8(prepared.bytes).unwrap(),
            "\"HealthTrend\"\n\"date\",\"score\"\n\"1/1\",\"80\"\n\"1/8\",\"85\""
        );
    }

    #[test]
    fn test_full_document_golden_output() {
        let use_case = ChartExportUseCase::default();
        let data = available(json!({
            "vitalsTrend": [
                {"date": "1/1", "bp_sys": 120, "hr": 70},
                {"date": "1/8", "bp_sys": 118, "hr": 72, "sugar": 90}
            ],
            "sleepTrend": [{"date": "1/1", "hours": 7.5}],
            "healthTrend": [{"date": "1/1", "score": 80}],
            "consultationsByMonth": [{"month": "Jan", "count": 2}]
        }));
        let document = use_case.build_document(&data).unwrap();
        let text = String::from_utf8(use_case.serialize(&document).unwrap()).unwrap();

        let expected = [
            "\"HealthTrend\"",
            "\"date\",\"score\"",
            "\"1/1\",\"80\"",
            "",
            "\"SleepTrend\"",
            "\"date\",\"hours\"",
            "\"1/1\",\"7.5\"",
            "",
            "\"VitalsTrend\"",
            "\"date\",\"bp_sys\",\"hr\"",
            "\"1/1\",\"120\",\"70\"",
            "\"1/8\",\"118\",\"72\"",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_header_only_block_for_empty_series() {
        let use_case = ChartExportUseCase::default();
        let prepared = use_case
            .prepare(&available(json!({"sleepTrend": []})), march_fifth())
            .unwrap();

        assert_eq!(prepared.block_count, 1);
        assert_eq!(
            String::from_utf8(prepared.bytes).unwrap(),
            "\"SleepTrend\"\n\"date\""
        );
    }

    #[test]
    fn test_nothing_to_export_skips_download() {
        let use_case = ChartExportUseCase::default();
        let sink = RecordingSink::default();

        let outcome = use_case
            .export(&available(json!({})), march_fifth(), &sink)
            .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(sink.calls.borrow().is_empty());
    }

    #[test]
    fn test_prepare_reports_notice() {
        let use_case = ChartExportUseCase::default();
        let err = use_case
            .prepare(&AvailableSeries::new(), march_fifth())
            .unwrap_err();
        assert!(matches!(err, AppError::NothingToExport(ref msg) if msg == "No chart data to export."));
    }

    #[test]
    fn test_export_delivers_once() {
        let use_case = ChartExportUseCase::default();
        let sink = RecordingSink::default();

        let outcome = use_case
            .export(
                &available(json!({"healthTrend": [{"date": "1/1", "score": 80}]})),
                march_fifth(),
                &sink,
            )
            .unwrap();

        let calls = sink.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "healthmate_charts_2024-03-05.csv");
        match outcome {
            ExportOutcome::Delivered(receipt) => assert_eq!(receipt.bytes, calls[0].1.len()),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let use_case = ChartExportUseCase::default();
        let data = available(json!({"healthTrend": [{"date": "1/1", "score": 80}]}));
        let document = use_case.build_document(&data).unwrap();
        assert_eq!(
            use_case.serialize(&document).unwrap(),
            use_case.serialize(&document).unwrap()
        );
    }
}
