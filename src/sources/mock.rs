//! Scripted tables for exercising pipelines in tests

use anyhow::anyhow;

use crate::error::Error;
use crate::model::Row;
use crate::table::StreamTable;

/// A table that yields the given rows and then completes with an error
/// carrying `message`.
pub fn failing_table(rows: Vec<Row>, message: &str) -> StreamTable {
    let err = Error::failed(anyhow!("{message}"));
    StreamTable::spawn("failing-source", move |sink, _cancel| {
        for row in rows {
            sink.push(row)?;
        }
        Err(err)
    })
}
