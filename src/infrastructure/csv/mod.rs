// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV encoding for chart exports

mod csv_writer;

pub use csv_writer::CsvEncoder;
