//! tablepipe - Streaming transformation pipelines for tabular data
//!
//! A pipeline is a chain of stages over an abstract [`Table`] of [`Row`]s.
//! Each stage runs on its own worker thread and hands rows to the next
//! stage over an unbuffered channel, so rows flow downstream as soon as
//! they are produced and a slow consumer naturally backpressures the whole
//! chain. Cancellation and errors flow the other way too: stopping or
//! failing a downstream stage unwinds every producer above it.
//!
//! ```
//! use tablepipe::{sinks, sources, transform, transforms, Row};
//!
//! let source = sources::slice::new(vec![
//!     Row::from([("city", "reykjavik"), ("temp", "4")]),
//!     Row::from([("city", "cairo"), ("temp", "29")]),
//! ]);
//! let warm = transform(
//!     source,
//!     transforms::select(|row| Ok(row.get("temp") != Some(&"4".into()))),
//! );
//! let rows = sinks::collect(warm).unwrap();
//! assert_eq!(rows, vec![Row::from([("city", "cairo"), ("temp", "29")])]);
//! ```
//!
//! Chains read more naturally through the [`Transformer`] builder; see its
//! docs for an example.

pub mod error;
pub mod model;
pub mod sinks;
pub mod sources;
pub mod table;
pub mod transform;
pub mod transformer;
pub mod transforms;

pub use error::{Error, Result};
pub use model::{Row, Value};
pub use table::{RowSink, StreamTable, Table};
pub use transform::{transform, StageInput, TransformFunc};
pub use transformer::Transformer;
