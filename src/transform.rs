//! The generic transform operator
//!
//! [`transform`] is the single mechanism behind every built-in transform:
//! it wraps an input table in a new [`StreamTable`] whose worker pulls rows
//! upstream, runs a [`TransformFunc`] over them, and pushes the results
//! downstream. The built-ins in [`crate::transforms`] differ only in the
//! per-row logic they hand to this operator.

use crossbeam_channel::{select, Receiver};

use crate::error::{Error, Result};
use crate::model::Row;
use crate::table::{RowSink, StreamTable, Table};

/// Input handle given to a transform function's worker.
pub struct StageInput<'a> {
    rows: &'a Receiver<Row>,
    cancel: &'a Receiver<()>,
}

impl StageInput<'_> {
    /// The next upstream row, or `None` once the upstream sequence ends.
    ///
    /// Blocks until the upstream producer is ready; the wait races against
    /// the stage's own cancellation, returning [`Error::Cancelled`] if the
    /// stage is stopped first.
    pub fn next(&self) -> Result<Option<Row>> {
        select! {
            recv(self.rows) -> msg => Ok(msg.ok()),
            recv(self.cancel) -> _ => Err(Error::Cancelled),
        }
    }
}

/// Per-stage transform logic driven by the [`transform`] operator.
///
/// `run` consumes the whole input stream. Most transforms are built from
/// the two per-row shapes in [`crate::transforms`]: one row in, one row
/// out ([`crate::transforms::map`]), and one row in, any number of rows
/// out ([`crate::transforms::table_transform`]). Whole-stream transforms
/// such as [`crate::transforms::sort`] implement this directly to buffer
/// across rows.
pub trait TransformFunc: Send + 'static {
    /// Drain `input`, pushing any output rows into `out`.
    ///
    /// Returning an error aborts the stage: the error becomes the output
    /// table's completion error and the input is cancelled. A propagated
    /// [`Error::Cancelled`] from `input` or `out` is not a failure, it
    /// just unwinds the stage.
    fn run(&mut self, input: &StageInput<'_>, out: &RowSink<'_>) -> Result<()>;
}

impl<F> TransformFunc for F
where
    F: FnMut(&StageInput<'_>, &RowSink<'_>) -> Result<()> + Send + 'static,
{
    fn run(&mut self, input: &StageInput<'_>, out: &RowSink<'_>) -> Result<()> {
        self(input, out)
    }
}

/// Run a transform function over a table, producing the transformed table.
///
/// The returned table is backed by exactly one worker. On any exit, be it
/// input exhaustion, transform failure, or cancellation from downstream,
/// the worker closes its own row stream and stops the input table, so the
/// entire upstream chain unwinds and no producer is left blocked.
///
/// If the transform function fails, that error is the output's completion
/// error. Otherwise, once the input sequence has ended, the input's
/// completion error (if any) is adopted unmodified. Adoption never happens
/// earlier, so rows legitimately produced before an upstream failure still
/// flow through.
pub fn transform<T, F>(input: T, mut func: F) -> StreamTable
where
    T: Table + 'static,
    F: TransformFunc,
{
    StreamTable::spawn("transform", move |sink, cancel| {
        let upstream = input.rows();
        let stage_input = StageInput {
            rows: &upstream,
            cancel,
        };
        let result = match func.run(&stage_input, sink) {
            // The function drained its input; carry any upstream failure
            // downstream as our own.
            Ok(()) => input.err().map_or(Ok(()), Err),
            err => err,
        };
        input.stop();
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks;
    use crate::sources::{infinite, mock, slice};
    use crate::transforms;
    use std::time::Duration;

    fn rows3() -> Vec<Row> {
        vec![
            Row::from([("header1", "value1"), ("header2", "value2")]),
            Row::from([("header1", "value3"), ("header2", "value4")]),
            Row::from([("header1", "value5"), ("header2", "value6")]),
        ]
    }

    /// Drain a table until its stream disconnects, failing the test if it
    /// keeps producing past a generous deadline.
    fn assert_unwound(table: &dyn Table) {
        let rx = table.rows();
        loop {
            match rx.recv_timeout(Duration::from_secs(5)) {
                Ok(_) => continue,
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => return,
                Err(e) => panic!("table still producing: {e}"),
            }
        }
    }

    #[test]
    fn test_identity_transform() {
        let out = transform(slice::new(rows3()), transforms::map(Ok));
        assert_eq!(sinks::collect(out).unwrap(), rows3());
    }

    #[test]
    fn test_transform_error_short_circuits_and_drains_input() {
        let input = infinite::new();
        let out = transform(
            input.clone(),
            transforms::table_transform(|_row, _out: &RowSink<'_>| {
                Err(anyhow::anyhow!("some error").into())
            }),
        );

        // No rows come out, and the completion error is the transform's.
        let rows: Vec<Row> = out.rows().iter().collect();
        assert!(rows.is_empty());
        assert_eq!(out.err().map(|e| e.to_string()), Some("some error".into()));

        // The unbounded input must be fully unwound, not left with a
        // producer blocked on a consumer that will never arrive.
        assert_unwound(&out);
        assert_unwound(&input);
    }

    #[test]
    fn test_upstream_error_adopted_after_rows_are_delivered() {
        let input = mock::failing_table(rows3(), "upstream broke");
        let out = transform(input, transforms::map(Ok));

        let rows: Vec<Row> = out.rows().iter().collect();
        assert_eq!(rows, rows3());
        assert_eq!(
            out.err().map(|e| e.to_string()),
            Some("upstream broke".into())
        );
    }

    #[test]
    fn test_transform_error_wins_over_upstream_error() {
        let input = mock::failing_table(rows3(), "upstream broke");
        let out = transform(
            input,
            transforms::map(|_row| Err(anyhow::anyhow!("local error").into())),
        );
        let rows: Vec<Row> = out.rows().iter().collect();
        assert!(rows.is_empty());
        assert_eq!(out.err().map(|e| e.to_string()), Some("local error".into()));
    }

    #[test]
    fn test_stopping_output_unwinds_whole_chain() {
        let source = infinite::new();
        let mid = transform(source.clone(), transforms::map(Ok));
        let out = transform(mid, transforms::map(Ok));

        let rx = out.rows();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        out.stop();
        out.stop();

        assert_unwound(&out);
        assert_unwound(&source);
        assert!(out.err().is_none());
    }

    #[test]
    fn test_fan_out_emits_multiple_rows_per_input() {
        let out = transform(
            slice::new(rows3()),
            transforms::table_transform(|row: Row, out: &RowSink<'_>| {
                out.push(row)?;
                out.push(Row::new())?;
                Ok(())
            }),
        );
        let rows = sinks::collect(out).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], rows3()[0]);
        assert!(rows[1].is_empty());
    }
}
