//! Row-wise category proportions
//!
//! Turns a group of raw headcount columns (e.g. enrollment by race/ethnicity)
//! into shares of their row total. The group total is the denominator for
//! every column in the mapping, so a row's proportions sum to 1.

use crate::config::ColumnMapping;
use crate::error::MembershipError;
use crate::utils::lazy_helpers::numeric_column;
use anyhow::Result;
use polars::prelude::*;

/// Append one proportion column per mapping entry
///
/// A zero row total yields non-finite proportions (NaN or ±inf), and a null
/// count makes every proportion in that row null. Neither is an error.
pub fn gen_proportions(df: &DataFrame, col_dict: &ColumnMapping) -> Result<DataFrame> {
    if col_dict.is_empty() {
        return Err(MembershipError::InvalidMapping(
            "proportions need at least one source column".to_string(),
        )
        .into());
    }
    col_dict.validate(df)?;

    let counts = col_dict
        .sources()
        .map(|source| numeric_column(df, source))
        .collect::<Result<Vec<_>>>()?;

    // Pass 1: row totals
    let totals: Vec<Option<f64>> = (0..df.height())
        .map(|row| counts.iter().map(|column| column[row]).sum())
        .collect();

    // Pass 2: each count over its row total
    let mut out = df.clone();
    for (entry, column) in col_dict.entries().iter().zip(&counts) {
        let proportions: Vec<Option<f64>> = column
            .iter()
            .zip(&totals)
            .map(|(count, total)| Some((*count)? / (*total)?))
            .collect();
        out.with_column(Series::new(entry.derived.as_str().into(), proportions))?;
    }

    tracing::debug!("Generated {} proportion columns", col_dict.len());
    Ok(out)
}
