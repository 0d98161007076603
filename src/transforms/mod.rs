//! Built-in transform functions
//!
//! Everything here is a [`TransformFunc`] for the generic
//! [`transform`](crate::transform::transform) operator. The per-row
//! builders come in two shapes: [`map`] (exactly one output row per input
//! row) and [`table_transform`] (any number of output rows per input row);
//! [`fieldmap`], [`valuemap`], and [`select`] are instances of those.
//! [`sort`] is the one whole-stream transform.

mod sort;

pub use sort::sort;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Row, Value};
use crate::table::RowSink;
use crate::transform::{StageInput, TransformFunc};

/// Mapping from a source field name to the destination field names its
/// value is copied to.
pub type FieldMapping = IndexMap<String, Vec<String>>;

/// Mapping from a field name to the value substitutions applied to it.
pub type ValueMapping = IndexMap<String, IndexMap<Value, Value>>;

/// Apply a function to every row, producing one replacement row each.
///
/// An error from the function aborts the stage.
pub fn map<F>(mut f: F) -> impl TransformFunc
where
    F: FnMut(Row) -> Result<Row> + Send + 'static,
{
    move |input: &StageInput<'_>, out: &RowSink<'_>| {
        while let Some(row) = input.next()? {
            out.push(f(row)?)?;
        }
        Ok(())
    }
}

/// Apply a function to every row, letting it push any number of output
/// rows (including none) before returning.
///
/// An error from the function aborts the stage after whatever it has
/// already pushed.
pub fn table_transform<F>(mut f: F) -> impl TransformFunc
where
    F: FnMut(Row, &RowSink<'_>) -> Result<()> + Send + 'static,
{
    move |input: &StageInput<'_>, out: &RowSink<'_>| {
        while let Some(row) = input.next()? {
            f(row, out)?;
        }
        Ok(())
    }
}

/// Keep only the rows for which the predicate returns true.
///
/// The predicate itself may fail, which aborts the stage.
pub fn select<F>(mut predicate: F) -> impl TransformFunc
where
    F: FnMut(&Row) -> Result<bool> + Send + 'static,
{
    table_transform(move |row, out: &RowSink<'_>| {
        if predicate(&row)? {
            out.push(row)?;
        }
        Ok(())
    })
}

/// Rebuild every row according to a field mapping.
///
/// For each `(source, destinations)` pair, the source field's value is
/// copied into the output row under every destination name. Source fields
/// not named in the mapping are dropped; sources absent from a row
/// contribute nothing. If two sources map to the same destination, the one
/// later in the mapping's iteration order wins; since the mapping is an
/// [`IndexMap`], that order is the order entries were inserted and the
/// result is deterministic.
pub fn fieldmap(mappings: FieldMapping) -> impl TransformFunc {
    map(move |row| {
        let mut mapped = Row::new();
        for (source, destinations) in &mappings {
            if let Some(value) = row.get(source) {
                for destination in destinations {
                    mapped.set(destination.clone(), value.clone());
                }
            }
        }
        Ok(mapped)
    })
}

/// Rewrite field values according to per-field substitution tables.
///
/// For every field named in the mapping, if the row's current value has a
/// substitution, it is replaced; all other fields and unmatched values are
/// left untouched.
pub fn valuemap(mappings: ValueMapping) -> impl TransformFunc {
    map(move |mut row| {
        for (field, substitutions) in &mappings {
            let replacement = row
                .get(field)
                .and_then(|current| substitutions.get(current))
                .cloned();
            if let Some(value) = replacement {
                row.set(field.clone(), value);
            }
        }
        Ok(row)
    })
}
