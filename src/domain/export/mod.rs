// ============================================================
// CHART EXPORT DOMAIN LAYER
// ============================================================
// Value objects for turning chart series into tabular blocks
// No I/O, no async

mod document;
mod normalizer;
mod record;
mod scalar;

pub use document::{
    build_document, export_filename, export_filename_now, EmptyDocument, ExportDocument,
    ExportLayout, ExportSection,
};
pub use normalizer::{normalize, normalize_records, row_key_field, TabularBlock, DATE_KEY, MONTH_KEY};
pub use record::{NamedSeries, TimeSeriesRecord};
pub use scalar::Scalar;

use std::collections::HashMap;

/// Series name -> records, as resolved from the chart-data payload.
/// A key missing from the map means the series is absent.
pub type AvailableSeries = HashMap<String, Vec<TimeSeriesRecord>>;
