//! Streaming CSV file source

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::model::{Row, Value};
use crate::table::StreamTable;

/// A configurable CSV source.
///
/// Rows stream out one record at a time as the file is read; the file is
/// only consumed as fast as the downstream pipeline takes rows.
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
    has_headers: bool,
    infer_types: bool,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
            has_headers: true,
            infer_types: true,
        }
    }

    /// Field delimiter, `,` by default.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whether the first record is a header row, on by default. Without
    /// headers, fields are named `field1`, `field2`, ...
    pub fn headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Whether to infer value types (null, bool, int, float, date,
    /// datetime), on by default. When off, every value is a string.
    pub fn infer_types(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Open the file and start producing rows.
    ///
    /// Open and read failures surface as the table's completion error.
    pub fn open(self) -> StreamTable {
        StreamTable::spawn("csv-source", move |sink, _cancel| {
            let file = File::open(&self.path)
                .with_context(|| format!("failed to open file: {}", self.path.display()))?;
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(self.delimiter)
                .has_headers(self.has_headers)
                .flexible(true)
                .from_reader(BufReader::new(file));

            let field_names: Vec<String> = if self.has_headers {
                reader
                    .headers()
                    .context("failed to read CSV headers")?
                    .iter()
                    .map(str::to_string)
                    .collect()
            } else {
                Vec::new()
            };

            for (record_num, result) in reader.records().enumerate() {
                let record = result
                    .with_context(|| format!("failed to read CSV record {}", record_num + 1))?;
                let mut row = Row::new();
                for (i, raw) in record.iter().enumerate() {
                    let name = field_names
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("field{}", i + 1));
                    let value = if self.infer_types {
                        parse_value(raw)
                    } else {
                        Value::from(raw)
                    };
                    row.set(name, value);
                }
                // Records shorter than the header are padded with nulls.
                for name in field_names.iter().skip(record.len()) {
                    row.set(name.clone(), Value::Null);
                }
                sink.push(row)?;
            }
            Ok(())
        })
    }
}

/// Open a CSV file with default settings.
pub fn read(path: impl AsRef<Path>) -> StreamTable {
    CsvSource::new(path).open()
}

/// Parse a raw string into a Value with type inference
fn parse_value(s: &str) -> Value {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return Value::Null;
    }

    // Try parsing as boolean
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("yes") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("no") {
        return Value::Bool(false);
    }

    // Try parsing as integer
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }

    // Try parsing as float
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }

    // Try parsing as date
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Value::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Value::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Value::DateTime(dt);
    }

    // Default to string
    Value::String(trimmed.to_string())
}
