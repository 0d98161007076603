//! CSV file sink

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use log::debug;

use crate::error::Result;
use crate::model::Value;
use crate::table::Table;

/// Drain a table to a CSV file.
///
/// The header row is taken from the first row's field names; later rows
/// are written in that column order, with missing fields and nulls as
/// empty cells. A table that produces no rows yields an empty file.
///
/// If writing fails, the table is stopped (so the upstream chain unwinds)
/// and the write error is returned. Otherwise the table's completion
/// error, if any, is propagated after the drain.
pub fn write(table: impl Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let result = drain_to(&table, path);
    if result.is_err() {
        debug!("csv sink failed, stopping table");
        table.stop();
        // Unwind the producer before reporting, so no worker is left
        // blocked sending to us.
        for _row in table.rows().iter() {}
    }
    result?;
    match table.err() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn drain_to(table: &impl Table, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create file: {}", path.display()))?;
    // Flexible: rows in one table may carry different field sets.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
    let mut columns: Vec<String> = Vec::new();

    for row in table.rows().iter() {
        if columns.is_empty() {
            columns = row.field_names().map(str::to_string).collect();
            writer
                .write_record(&columns)
                .context("failed to write CSV header")?;
        }
        let record: Vec<String> = columns
            .iter()
            .map(|name| match row.get(name) {
                None | Some(Value::Null) => String::new(),
                Some(value) => value.to_string(),
            })
            .collect();
        writer.write_record(&record).context("failed to write CSV record")?;
    }

    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}
