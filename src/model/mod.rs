//! Data model for rows flowing through a pipeline

mod row;
mod value;

pub use row::Row;
pub use value::Value;
