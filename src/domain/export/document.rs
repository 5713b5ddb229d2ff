// ============================================================
// EXPORT DOCUMENT
// ============================================================
// Fixed section order, block composition and the export filename

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{normalize_records, AvailableSeries, Scalar, TabularBlock};

pub const EXPORT_FILE_PREFIX: &str = "healthmate_charts_";
pub const EXPORT_FILE_EXTENSION: &str = "csv";

/// Raised when no requested series is present in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No chart data to export.")]
pub struct EmptyDocument;

/// One entry of the presentation order: series key and block title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSection {
    pub key: String,
    pub title: String,
}

impl ExportSection {
    /// Title is the series key with its first letter upper-cased
    /// (`healthTrend` -> `HealthTrend`).
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let mut chars = key.chars();
        let title = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self { key, title }
    }

    pub fn titled(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Ordered list of sections included in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLayout {
    pub sections: Vec<ExportSection>,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::from_keys(["healthTrend", "sleepTrend", "vitalsTrend"])
    }
}

impl ExportLayout {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: keys.into_iter().map(ExportSection::new).collect(),
        }
    }

    pub fn with_section(mut self, section: ExportSection) -> Self {
        self.sections.push(section);
        self
    }
}

/// Ordered, non-empty list of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    blocks: Vec<TabularBlock>,
}

impl ExportDocument {
    pub fn blocks(&self) -> &[TabularBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All rows of the document, one empty row between consecutive blocks.
    pub fn to_rows(&self) -> Vec<Vec<Scalar>> {
        let mut rows = Vec::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                rows.push(Vec::new());
            }
            rows.extend(block.to_rows());
        }
        rows
    }
}

/// Build the document in layout order.
///
/// A section whose key is present yields a block, even with zero records.
/// An absent key is skipped. Zero blocks is `EmptyDocument`.
pub fn build_document(
    available: &AvailableSeries,
    layout: &ExportLayout,
) -> Result<ExportDocument, EmptyDocument> {
    let blocks: Vec<TabularBlock> = layout
        .sections
        .iter()
        .filter_map(|section| {
            available
                .get(&section.key)
                .map(|records| normalize_records(&section.title, records))
        })
        .collect();

    if blocks.is_empty() {
        return Err(EmptyDocument);
    }

    Ok(ExportDocument { blocks })
}

/// `healthmate_charts_<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        EXPORT_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        EXPORT_FILE_EXTENSION
    )
}

/// Filename for the current UTC date, computed on every call.
pub fn export_filename_now() -> String {
    export_filename(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export::TimeSeriesRecord;
    use serde_json::json;

    fn series(value: serde_json::Value) -> Vec<TimeSeriesRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_default_layout_order() {
        let titles: Vec<String> = ExportLayout::default()
            .sections
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["HealthTrend", "SleepTrend", "VitalsTrend"]);
    }

    #[test]
    fn test_present_but_empty_series_still_emits_block() {
        let mut available = AvailableSeries::new();
        available.insert("sleepTrend".to_string(), Vec::new());

        let doc = build_document(&available, &ExportLayout::default()).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.blocks()[0].title, "SleepTrend");
        assert_eq!(doc.blocks()[0].row_count(), 0);
        assert!(doc.blocks().iter().all(|b| b.title != "HealthTrend"));
    }

    #[test]
    fn test_all_absent_is_empty_document() {
        let available = AvailableSeries::new();
        assert_eq!(
            build_document(&available, &ExportLayout::default()),
            Err(EmptyDocument)
        );
    }

    #[test]
    fn test_series_outside_layout_are_ignored() {
        let mut available = AvailableSeries::new();
        available.insert(
            "consultationsByMonth".to_string(),
            series(json!([{"month": "Jan", "count": 1}])),
        );
        assert!(build_document(&available, &ExportLayout::default()).is_err());

        let layout = ExportLayout::default().with_section(ExportSection::new("consultationsByMonth"));
        let doc = build_document(&available, &layout).unwrap();
        assert_eq!(doc.blocks()[0].title, "ConsultationsByMonth");
    }

    #[test]
    fn test_layout_order_wins_over_input_order() {
        let mut available = AvailableSeries::new();
        available.insert("vitalsTrend".to_string(), series(json!([{"date": "1/1", "hr": 70}])));
        available.insert("healthTrend".to_string(), series(json!([{"date": "1/1", "score": 80}])));

        let doc = build_document(&available, &ExportLayout::default()).unwrap();
        let titles: Vec<&str> = doc.blocks().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["HealthTrend", "VitalsTrend"]);
    }

    #[test]
    fn test_rows_separate_blocks_with_one_empty_row() {
        let mut available = AvailableSeries::new();
        available.insert("healthTrend".to_string(), series(json!([{"date": "1/1", "score": 80}])));
        available.insert("sleepTrend".to_string(), series(json!([{"date": "1/1", "hours": 7}])));

        let rows = build_document(&available, &ExportLayout::default())
            .unwrap()
            .to_rows();

        // title, header, 1 row, separator, title, header, 1 row
        assert_eq!(rows.len(), 7);
        assert!(rows[3].is_empty());
        assert!(!rows.last().unwrap().is_empty());
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(export_filename(date), "healthmate_charts_2024-03-05.csv");
    }

    #[test]
    fn test_export_filename_now_shape() {
        let name = export_filename_now();
        assert!(name.starts_with(EXPORT_FILE_PREFIX));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "healthmate_charts_YYYY-MM-DD.csv".len());
    }

    #[test]
    fn test_custom_titles() {
        let section = ExportSection::titled("healthTrend", "Health Trend");
        assert_eq!(section.title, "Health Trend");
        assert_eq!(ExportSection::new("").title, "");
    }
}
