//! Sinks that drain tables to a destination
//!
//! A sink fully drains a table's row sequence (or stops the table if it
//! must exit early) and propagates the table's completion error as its own
//! failure.

pub mod csv;

use crate::error::Result;
use crate::model::Row;
use crate::table::Table;

/// Drain a table into a vector of rows.
///
/// Fails with the table's completion error if it has one, in which case
/// any rows produced before the failure are discarded.
pub fn collect(table: impl Table) -> Result<Vec<Row>> {
    let rows: Vec<Row> = table.rows().iter().collect();
    match table.err() {
        Some(err) => Err(err),
        None => Ok(rows),
    }
}
