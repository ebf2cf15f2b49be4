//! Error types for membership analytics.
//!
//! Public functions return `anyhow::Result` with context attached; the
//! domain failures below are what the context wraps, so callers can
//! `downcast_ref::<MembershipError>()` when they need to branch on them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MembershipError {
    #[error("Missing column '{column}'. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Null UnitID at row {row}")]
    NullKey { row: usize },

    #[error("Qualifying identifier set is empty, market share is undefined")]
    EmptyQualifyingSet,

    #[error("Invalid column mapping: {0}")]
    InvalidMapping(String),

    #[error("Flip column '{0}' is not a derived column of the need-score mapping")]
    UnknownFlipColumn(String),
}
