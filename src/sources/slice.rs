//! In-memory table source

use crate::model::Row;
use crate::table::StreamTable;

/// A table over an in-memory sequence of rows, produced in order.
pub fn new(rows: Vec<Row>) -> StreamTable {
    StreamTable::spawn("slice-source", move |sink, _cancel| {
        for row in rows {
            sink.push(row)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn test_yields_rows_in_order() {
        let rows = vec![
            Row::from([("a", 1i64)]),
            Row::from([("a", 2i64)]),
            Row::from([("a", 3i64)]),
        ];
        let table = new(rows.clone());
        let produced: Vec<Row> = table.rows().iter().collect();
        assert_eq!(produced, rows);
        assert!(table.err().is_none());
    }

    #[test]
    fn test_empty_slice_closes_immediately() {
        let table = new(Vec::new());
        assert!(table.rows().iter().next().is_none());
        assert!(table.err().is_none());
    }
}
