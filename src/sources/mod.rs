//! Sources that produce tables from external origins
//!
//! A source satisfies the [`Table`](crate::Table) contract from somewhere
//! outside the pipeline, such as an in-memory sequence or a file on disk,
//! and honors `stop()` by halting its own production promptly.

pub mod csv;
pub mod infinite;
pub mod mock;
pub mod slice;
