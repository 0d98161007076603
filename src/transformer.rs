//! Fluent chaining of transforms

use crate::error::Result;
use crate::model::Row;
use crate::table::{RowSink, Table};
use crate::transform::{transform, TransformFunc};
use crate::transforms;
use crate::transforms::{FieldMapping, ValueMapping};

/// A builder for chaining transforms on a table.
///
/// Each call consumes the builder and returns a new one wrapping the
/// composed table, so partially built chains can never alias each other.
/// Pure sugar over repeated [`transform`] calls; no extra concurrency or
/// error semantics.
///
/// ```
/// use tablepipe::{sinks, sources, Row, Transformer};
/// use tablepipe::transforms::FieldMapping;
///
/// let mut mapping = FieldMapping::new();
/// mapping.insert("name".into(), vec!["id".into()]);
///
/// let table = Transformer::new(sources::slice::new(vec![
///     Row::from([("name", "ada"), ("lang", "analytical engine")]),
///     Row::from([("name", "grace"), ("lang", "cobol")]),
/// ]))
/// .fieldmap(mapping)
/// .select(|row| Ok(row.get("id").is_some()))
/// .table();
///
/// let rows = sinks::collect(table).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0], Row::from([("id", "ada")]));
/// ```
pub struct Transformer {
    table: Box<dyn Table>,
}

impl Transformer {
    /// Start a chain from a table.
    pub fn new(table: impl Table + 'static) -> Self {
        Self {
            table: Box::new(table),
        }
    }

    /// Append any transform function as a stage.
    pub fn apply(self, func: impl TransformFunc) -> Self {
        Self {
            table: Box::new(transform(self.table, func)),
        }
    }

    /// Append a [`transforms::fieldmap`] stage.
    pub fn fieldmap(self, mappings: FieldMapping) -> Self {
        self.apply(transforms::fieldmap(mappings))
    }

    /// Append a [`transforms::valuemap`] stage.
    pub fn valuemap(self, mappings: ValueMapping) -> Self {
        self.apply(transforms::valuemap(mappings))
    }

    /// Append a per-row [`transforms::map`] stage.
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnMut(Row) -> Result<Row> + Send + 'static,
    {
        self.apply(transforms::map(f))
    }

    /// Append a fan-out [`transforms::table_transform`] stage.
    pub fn table_transform<F>(self, f: F) -> Self
    where
        F: FnMut(Row, &RowSink<'_>) -> Result<()> + Send + 'static,
    {
        self.apply(transforms::table_transform(f))
    }

    /// Append a [`transforms::select`] filter stage.
    pub fn select<F>(self, predicate: F) -> Self
    where
        F: FnMut(&Row) -> Result<bool> + Send + 'static,
    {
        self.apply(transforms::select(predicate))
    }

    /// Append a [`transforms::sort`] stage.
    pub fn sort<F>(self, less: F) -> Self
    where
        F: FnMut(&Row, &Row) -> bool + Send + 'static,
    {
        self.apply(transforms::sort(less))
    }

    /// Finish the chain, yielding the composed table.
    pub fn table(self) -> Box<dyn Table> {
        self.table
    }
}
