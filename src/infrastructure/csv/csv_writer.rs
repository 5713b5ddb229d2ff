// ============================================================
// CSV ENCODER
// ============================================================
// Rows -> text, every cell quoted, rows joined by '\n'

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::export::Scalar;

/// CSV encoder with unconditional quoting.
///
/// Every cell is wrapped in `"` with inner quotes doubled, including cells
/// that need no escaping. An empty row becomes an empty line. There is no
/// trailing newline after the last row.
pub struct CsvEncoder {
    /// Field delimiter (default: comma)
    delimiter: u8,
}

impl Default for CsvEncoder {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn encode(&self, rows: &[Vec<Scalar>]) -> Result<String> {
        let lines = rows
            .iter()
            .map(|row| self.encode_row(row))
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    /// Encode a single row without its terminator
    pub fn encode_row(&self, row: &[Scalar]) -> Result<String> {
        // The csv writer emits `""` for a zero-field record; an empty line is wanted here.
        if row.is_empty() {
            return Ok(String::new());
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Always)
            .double_quote(true)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|e| AppError::Internal(format!("Failed to encode CSV row: {}", e)))?;

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV row: {}", e)))?;

        let mut line = String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("CSV row is not valid UTF-8: {}", e)))?;
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(line)
    }
}
