//! Unbounded table source

use crate::model::Row;
use crate::table::StreamTable;

/// A table that produces empty rows forever, until stopped.
///
/// Useful for exercising cancellation and drainage: any consumer that
/// stops early must leave this source fully unwound rather than blocked
/// on a send that will never complete.
pub fn new() -> StreamTable {
    StreamTable::spawn("infinite-source", move |sink, _cancel| loop {
        sink.push(Row::new())?;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use std::time::Duration;

    #[test]
    fn test_produces_until_stopped() {
        let table = new();
        let rx = table.rows();
        for _ in 0..10 {
            assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        }
        table.stop();
        loop {
            match rx.recv_timeout(Duration::from_secs(5)) {
                Ok(_) => continue,
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
                Err(e) => panic!("source did not unwind: {e}"),
            }
        }
        assert!(table.err().is_none());
    }
}
