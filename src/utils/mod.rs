//! Utility modules
//!
//! - DataFrame helpers: column validation, numeric extraction, ID filtering

pub mod lazy_helpers;

pub use lazy_helpers::{column_names, filter_to_ids, materialize_with_columns, numeric_column, require_columns};
