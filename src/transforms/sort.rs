//! Whole-table sorting

use std::cmp::Ordering;

use crate::model::Row;
use crate::table::RowSink;
use crate::transform::{StageInput, TransformFunc};

/// Sort an entire table with a less-than comparator.
///
/// `less(a, b)` reports whether `a` should sort before `b`. The sort is
/// not guaranteed to be stable for rows that compare equal.
///
/// Unlike the per-row transforms, this is a full barrier: the whole input
/// sequence is buffered in memory and nothing is emitted until the input
/// has ended. If the input terminates with an error, whatever was buffered
/// is still sorted and emitted, and the operator then adopts the upstream
/// error as usual.
pub fn sort<F>(mut less: F) -> impl TransformFunc
where
    F: FnMut(&Row, &Row) -> bool + Send + 'static,
{
    move |input: &StageInput<'_>, out: &RowSink<'_>| {
        let mut rows = Vec::new();
        while let Some(row) = input.next()? {
            rows.push(row);
        }
        rows.sort_unstable_by(|a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        for row in rows {
            out.push(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::sinks;
    use crate::sources::{mock, slice};
    use crate::table::Table;
    use crate::transform::transform;

    fn by_n(a: &Row, b: &Row) -> bool {
        match (a.get("n"), b.get("n")) {
            (Some(Value::Int(x)), Some(Value::Int(y))) => x < y,
            _ => false,
        }
    }

    fn numbered(ns: &[i64]) -> Vec<Row> {
        ns.iter().map(|&n| Row::from([("n", n)])).collect()
    }

    #[test]
    fn test_sort_orders_rows() {
        let input = numbered(&[5, 1, 4, 2, 3]);
        let rows = sinks::collect(transform(slice::new(input), sort(by_n))).unwrap();
        assert_eq!(rows, numbered(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_sort_output_is_permutation_with_no_adjacent_inversion() {
        let input = numbered(&[9, 3, 3, 7, 0, 7, 2]);
        let rows = sinks::collect(transform(slice::new(input), sort(by_n))).unwrap();

        for pair in rows.windows(2) {
            assert!(!by_n(&pair[1], &pair[0]), "adjacent pair out of order");
        }
        // Duplicates survive: the output is a permutation, not a dedup.
        assert_eq!(rows, numbered(&[0, 2, 3, 3, 7, 7, 9]));
    }

    #[test]
    fn test_sort_empty_input() {
        let rows = sinks::collect(transform(slice::new(Vec::new()), sort(by_n))).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_sort_still_emits_buffer_when_upstream_errors() {
        let input = mock::failing_table(numbered(&[2, 1]), "upstream broke");
        let table = transform(input, sort(by_n));
        let rows: Vec<Row> = table.rows().iter().collect();
        assert_eq!(rows, numbered(&[1, 2]));
        assert_eq!(
            table.err().map(|e| e.to_string()),
            Some("upstream broke".into())
        );
    }
}
