// ============================================================
// SERIES NORMALIZER
// ============================================================
// NamedSeries -> TabularBlock with a header fixed by the first record

use super::{NamedSeries, Scalar, TimeSeriesRecord};

pub const DATE_KEY: &str = "date";
pub const MONTH_KEY: &str = "month";

/// One titled table of the export.
///
/// Every row has exactly `header.len()` cells, in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularBlock {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl TabularBlock {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Title row, header row, then the data rows.
    pub fn to_rows(&self) -> Vec<Vec<Scalar>> {
        let mut rows = Vec::with_capacity(self.rows.len() + 2);
        rows.push(vec![Scalar::Text(self.title.clone())]);
        rows.push(self.header.iter().map(|h| Scalar::Text(h.clone())).collect());
        rows.extend(self.rows.iter().cloned());
        rows
    }
}

/// Row-key field of a series: `date`, or `month` when the first record has
/// no `date` but has a `month`. Defaults to `date`.
pub fn row_key_field(first: Option<&TimeSeriesRecord>) -> &'static str {
    match first {
        Some(record) if !record.contains(DATE_KEY) && record.contains(MONTH_KEY) => MONTH_KEY,
        _ => DATE_KEY,
    }
}

pub fn normalize(series: &NamedSeries) -> TabularBlock {
    normalize_records(&series.name, &series.records)
}

/// Header comes from the first record only. Keys first seen in later records
/// are dropped; keys missing from a record become empty cells.
pub fn normalize_records(title: &str, records: &[TimeSeriesRecord]) -> TabularBlock {
    let first = records.first();
    let row_key = row_key_field(first);

    let mut header = vec![row_key.to_string()];
    if let Some(first) = first {
        header.extend(
            first
                .keys()
                .filter(|key| *key != row_key)
                .map(str::to_string),
        );
    }

    let rows = records
        .iter()
        .map(|record| {
            header
                .iter()
                .map(|field| record.get(field).unwrap_or(Scalar::Null))
                .collect()
        })
        .collect();

    TabularBlock {
        title: title.to_string(),
        header,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<TimeSeriesRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn texts(row: &[Scalar]) -> Vec<String> {
        row.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_health_trend_block() {
        let series = NamedSeries::new(
            "HealthTrend",
            records(json!([{"date": "1/1", "score": 80}, {"date": "1/8", "score": 85}])),
        );
        let block = normalize(&series);

        assert_eq!(block.title, "HealthTrend");
        assert_eq!(block.header, vec!["date", "score"]);
        assert_eq!(texts(&block.rows[0]), vec!["1/1", "80"]);
        assert_eq!(texts(&block.rows[1]), vec!["1/8", "85"]);
    }

    #[test]
    fn test_header_from_first_record_only() {
        let series = NamedSeries::new(
            "VitalsTrend",
            records(json!([
                {"date": "1/1", "bp_sys": 120, "hr": 70},
                {"date": "1/8", "bp_sys": 118, "hr": 72, "sugar": 90}
            ])),
        );
        let block = normalize(&series);

        assert_eq!(block.header, vec!["date", "bp_sys", "hr"]);
        assert_eq!(texts(&block.rows[1]), vec!["1/8", "118", "72"]);
    }

    #[test]
    fn test_missing_fields_become_empty_cells() {
        let series = NamedSeries::new(
            "VitalsTrend",
            records(json!([
                {"date": "1/1", "bp_sys": 120, "sugar": 95},
                {"bp_sys": 118},
                {"date": "1/15", "sugar": null}
            ])),
        );
        let block = normalize(&series);

        assert_eq!(texts(&block.rows[1]), vec!["", "118", ""]);
        assert_eq!(texts(&block.rows[2]), vec!["1/15", "", ""]);
    }

    #[test]
    fn test_row_key_moves_to_first_column() {
        let series = NamedSeries::new(
            "ConsultationsByMonth",
            records(json!([{"count": 2, "month": "Jan"}, {"count": 0, "month": "Feb"}])),
        );
        let block = normalize(&series);

        assert_eq!(block.header, vec!["month", "count"]);
        assert_eq!(texts(&block.rows[0]), vec!["Jan", "2"]);
    }

    #[test]
    fn test_empty_series_keeps_header() {
        let block = normalize(&NamedSeries::new("SleepTrend", Vec::new()));

        assert_eq!(block.header, vec!["date"]);
        assert_eq!(block.row_count(), 0);
    }

    #[test]
    fn test_every_row_matches_header_length() {
        let series = NamedSeries::new(
            "Mixed",
            records(json!([
                {"date": "1/1", "a": 1, "b": 2},
                {"date": "1/2"},
                {"date": "1/3", "a": 1, "b": 2, "c": 3, "d": 4}
            ])),
        );
        let block = normalize(&series);

        assert_eq!(block.row_count(), series.records.len());
        assert!(block.rows.iter().all(|row| row.len() == block.column_count()));
    }

    #[test]
    fn test_to_rows_prepends_title_and_header() {
        let block = normalize(&NamedSeries::new(
            "SleepTrend",
            records(json!([{"date": "1/1", "hours": 7}])),
        ));
        let rows = block.to_rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(texts(&rows[0]), vec!["SleepTrend"]);
        assert_eq!(texts(&rows[1]), vec!["date", "hours"]);
    }
}
